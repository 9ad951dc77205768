use crate::{HealthRes, ReadyRes, VERSION};

/// Health reporting shared by the HTTP endpoints.
pub struct HealthService;

impl HealthService {
    /// Builds the health response for the given store state.
    ///
    /// # Returns
    /// `healthy` when the purchase-order store is reachable, otherwise `degraded`.
    pub fn check_health(store_healthy: bool) -> HealthRes {
        HealthRes {
            status: if store_healthy { "healthy" } else { "degraded" }.into(),
            version: VERSION.into(),
        }
    }

    /// Readiness banner served on `GET /validate`.
    pub fn ready() -> ReadyRes {
        ReadyRes {
            message: "Dockcheck PO validator".into(),
            status: "ready".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health() {
        let healthy = HealthService::check_health(true);
        assert_eq!(healthy.status, "healthy");
        assert_eq!(healthy.version, VERSION);

        assert_eq!(HealthService::check_health(false).status, "degraded");
    }

    #[test]
    fn test_ready_serializes() {
        let json = serde_json::to_string(&HealthService::ready()).unwrap();
        assert_eq!(json, r#"{"message":"Dockcheck PO validator","status":"ready"}"#);
    }
}
