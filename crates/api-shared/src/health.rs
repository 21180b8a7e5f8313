use crate::dto::HealthRes;

/// Health service shared by every API surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive. Does not touch the record store.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Doctor directory is alive".into(),
        }
    }
}
