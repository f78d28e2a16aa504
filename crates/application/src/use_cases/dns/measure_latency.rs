use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vortexl2_domain::{round_tenth, ProbeResult};

use crate::ports::ResolverProbe;

/// Mean lookup time of a (domain, server) pair over a fixed number of attempts.
pub struct MeasureLatencyUseCase {
    probe: Arc<dyn ResolverProbe>,
    timeout: Duration,
    repetitions: u8,
}

impl MeasureLatencyUseCase {
    pub fn new(probe: Arc<dyn ResolverProbe>, timeout: Duration, repetitions: u8) -> Self {
        Self {
            probe,
            timeout,
            repetitions: repetitions.max(1),
        }
    }

    pub async fn execute(&self, domain: &str, address: &str) -> ProbeResult {
        let mut total_ms = 0.0;
        let mut successes = 0u32;

        for attempt in 1..=self.repetitions {
            match self.probe.resolve(domain, address, self.timeout).await {
                Ok(elapsed) => {
                    total_ms += elapsed.as_secs_f64() * 1000.0;
                    successes += 1;
                }
                Err(e) => {
                    debug!(domain, server = address, attempt, error = %e, "Probe attempt failed");
                }
            }
        }

        let elapsed_ms = (successes > 0).then(|| round_tenth(total_ms / successes as f64));

        ProbeResult {
            address: Arc::from(address),
            domain: Arc::from(domain),
            elapsed_ms,
        }
    }
}
