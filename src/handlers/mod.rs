// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod biometric_authenticate;
mod biometric_availability;
mod biometric_register;
mod biometric_registrations;
mod health;
mod http_metrics;
mod metrics;
mod root;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use http_metrics::track_http_request;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Biometric coordinator handlers
pub use biometric_authenticate::authenticate;
pub use biometric_availability::check_availability;
pub use biometric_register::register;
pub use biometric_registrations::{list_registrations, registration_status, revoke_registration};
