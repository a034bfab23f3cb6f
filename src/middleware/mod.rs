pub mod auth;
pub mod metrics;

pub use auth::AuthGate;
pub use metrics::RequestMetrics;
