use super::BiometricCoordinator;
use crate::domain::DeviceDescriptor;
use chrono::Utc;
use rand::Rng;

/// Device-wide secret-store key holding the generated device identity.
pub const DEVICE_ID_KEY: &str = "device_id";

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 13;

impl BiometricCoordinator {
    // ---
    /// Resolve this device's identity, creating and persisting it on first use.
    ///
    /// If the secret store is unusable a throwaway `fallback_` identity is
    /// returned instead; it is not persisted.
    pub async fn device_id(&self) -> String {
        // ---
        match self.load_or_create_device_id().await {
            Ok(device_id) => device_id,
            Err(e) => {
                tracing::error!("Error getting device ID: {:?}", e);
                fallback_device_id(Utc::now().timestamp_millis(), &mut rand::thread_rng())
            }
        }
    }

    async fn load_or_create_device_id(&self) -> anyhow::Result<String> {
        // ---
        if let Some(existing) = self.secrets.get(DEVICE_ID_KEY).await? {
            return Ok(existing);
        }

        let device_id = generate_device_id(
            &self.device,
            Utc::now().timestamp_millis(),
            &mut rand::thread_rng(),
        );
        self.secrets.set(DEVICE_ID_KEY, &device_id).await?;

        tracing::info!("Generated device identity: {}", device_id);
        Ok(device_id)
    }
}

/// `{model}_{os}_{millis}_{suffix}`, with `unknown` for absent descriptor fields.
pub(super) fn generate_device_id<R: Rng>(
    descriptor: &DeviceDescriptor,
    now_millis: i64,
    rng: &mut R,
) -> String {
    // ---
    let model = descriptor
        .model_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");
    let os = descriptor
        .os_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");

    format!("{model}_{os}_{now_millis}_{}", random_suffix(rng))
}

pub(super) fn fallback_device_id<R: Rng>(now_millis: i64, rng: &mut R) -> String {
    // ---
    format!("fallback_{now_millis}_{}", random_suffix(rng))
}

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    // ---
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}
