//! Round-trip probe used by the health endpoint.

use async_trait::async_trait;

use crate::result::AppResult;

/// A dependency that can be pinged to measure reachability.
#[async_trait]
pub trait HealthProbe: Send + Sync + std::fmt::Debug + 'static {
    /// Short name of the probed dependency (e.g., "postgres").
    fn name(&self) -> &str;

    /// Perform one trivial round-trip.
    async fn ping(&self) -> AppResult<()>;
}
