use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Biometric Registry Agent
Version: {version}

Available endpoints:
  - GET    /biometric/availability              - Sensor capability check
  - POST   /biometric/register                  - Register the device biometric for a user
  - POST   /biometric/authenticate              - Authenticate a user with the device biometric
  - GET    /biometric/status/{{user_id}}          - Validated registration status
  - DELETE /biometric/registration/{{user_id}}    - Revoke the user's registration
  - GET    /biometric/registrations/{{user_id}}   - Every registration row for the user
  - GET    /health                              - Light health check
  - GET    /health?mode=full                    - Full health check (includes secret store)
  - GET    /metrics                             - Prometheus metrics
"#
    )
}
