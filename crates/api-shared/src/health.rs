//! Health check plumbing shared by the HTTP surface.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response body.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub ok: bool,
    pub message: String,
}

/// Simple health service used by the REST API.
///
/// Provides a standardised way to report liveness; monitoring and load
/// balancers poll this.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static health check; preferred since no instance is needed.
    pub fn check_health() -> HealthStatus {
        HealthStatus {
            ok: true,
            message: "HMS is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_reports_alive() {
        let status = HealthService::check_health();
        assert!(status.ok);
        assert!(status.message.contains("alive"));
    }
}
