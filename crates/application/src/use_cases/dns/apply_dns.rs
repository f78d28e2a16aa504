use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use vortexl2_domain::DomainError;

use crate::ports::{DnsApplyMechanism, DnsSelectionRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDns {
    pub mechanism: &'static str,
    pub detail: String,
}

/// Commits a DNS server, trying each mechanism in order until one succeeds.
pub struct ApplyDnsUseCase {
    mechanisms: Vec<Arc<dyn DnsApplyMechanism>>,
    selection_repo: Arc<dyn DnsSelectionRepository>,
}

impl ApplyDnsUseCase {
    pub fn new(
        mechanisms: Vec<Arc<dyn DnsApplyMechanism>>,
        selection_repo: Arc<dyn DnsSelectionRepository>,
    ) -> Self {
        Self {
            mechanisms,
            selection_repo,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, address: IpAddr, name: &str) -> Result<AppliedDns, DomainError> {
        let mut last_error = String::from("no DNS mechanism configured");

        for mechanism in &self.mechanisms {
            if let Err(e) = mechanism.check_available().await {
                warn!(mechanism = mechanism.name(), reason = %e, "DNS mechanism unavailable");
                last_error = format!("{}: {}", mechanism.name(), e);
                continue;
            }

            match mechanism.apply(address).await {
                Ok(detail) => {
                    let mut selection = self.selection_repo.load().await?;
                    selection.record_choice(address, name);
                    self.selection_repo.save(&selection).await?;

                    info!(
                        dns = %address,
                        name = %name,
                        mechanism = mechanism.name(),
                        "DNS applied"
                    );

                    return Ok(AppliedDns {
                        mechanism: mechanism.name(),
                        detail,
                    });
                }
                Err(e) => {
                    warn!(mechanism = mechanism.name(), error = %e, "DNS mechanism failed");
                    last_error = format!("{}: {}", mechanism.name(), e);
                }
            }
        }

        Err(DomainError::DnsApplyExhausted(last_error))
    }
}
