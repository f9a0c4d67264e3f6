//! Health check port - datastore liveness.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Check used by the health endpoint.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trips to the datastore.
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_is_object_safe() {
        fn _accepts_dyn(_check: &dyn HealthCheck) {}
    }
}
