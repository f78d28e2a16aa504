use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vortexl2_application::ports::ResolverProbe;
use vortexl2_domain::DomainError;

use crate::system::command::command_line;
use crate::system::CommandRunner;

/// Times `nslookup <domain> <server>`.
pub struct NslookupProbe {
    runner: Arc<dyn CommandRunner>,
}

impl NslookupProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn is_available(&self) -> bool {
        self.runner.exists("nslookup")
    }
}

#[async_trait]
impl ResolverProbe for NslookupProbe {
    async fn resolve(
        &self,
        domain: &str,
        server: &str,
        timeout: Duration,
    ) -> Result<Duration, DomainError> {
        let started = Instant::now();
        let output = self
            .runner
            .run_with_timeout("nslookup", &[domain, server], timeout)
            .await?;
        let elapsed = started.elapsed();

        if !output.success() {
            return Err(DomainError::CommandFailed {
                command: command_line("nslookup", &[domain, server]),
                stderr: output.diagnostic(),
            });
        }
        Ok(elapsed)
    }
}
