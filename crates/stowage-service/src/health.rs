//! Liveness report with a timed round-trip to the metadata store.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use stowage_core::traits::HealthProbe;

/// API generation reported by the health endpoint.
pub const API_VERSION: &str = "v1";

/// Outcome of the metadata-store round-trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DbStatus {
    /// Round-trip latency in milliseconds.
    LatencyMs(f64),
    /// Error text when the store could not be reached.
    Error(String),
}

/// Body of the health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub api: &'static str,
    pub version: String,
    pub db: DbStatus,
}

/// Produces health reports. Never fails; store errors are carried in the report.
#[derive(Debug, Clone)]
pub struct HealthService {
    probe: Arc<dyn HealthProbe>,
    version: String,
}

impl HealthService {
    /// Creates a health service reporting `version`.
    pub fn new(probe: Arc<dyn HealthProbe>, version: impl Into<String>) -> Self {
        Self {
            probe,
            version: version.into(),
        }
    }

    /// Ping the store once and time it.
    pub async fn ping(&self) -> HealthReport {
        let started = Instant::now();
        let db = match self.probe.ping().await {
            Ok(()) => DbStatus::LatencyMs(started.elapsed().as_secs_f64() * 1000.0),
            Err(e) => {
                warn!(probe = self.probe.name(), error = %e, "Health probe failed");
                DbStatus::Error(e.message)
            }
        };

        HealthReport {
            api: API_VERSION,
            version: self.version.clone(),
            db,
        }
    }
}
