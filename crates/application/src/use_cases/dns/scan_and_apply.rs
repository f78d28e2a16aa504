use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument};
use vortexl2_domain::{pick_best, CandidateServer, DomainError, ScoreResult};

use super::{AppliedDns, ApplyDnsUseCase, ScoreCandidatesUseCase};
use crate::ports::ScanObserver;

#[derive(Debug, Clone)]
pub struct DnsScanReport {
    pub best: ScoreResult,
    pub reachable: usize,
    pub applied: AppliedDns,
}

/// Full scan: score the catalog, pick the fastest server and commit it.
pub struct ScanAndApplyDnsUseCase {
    catalog: Vec<CandidateServer>,
    score: Arc<ScoreCandidatesUseCase>,
    apply: Arc<ApplyDnsUseCase>,
}

impl ScanAndApplyDnsUseCase {
    pub fn new(
        catalog: Vec<CandidateServer>,
        score: Arc<ScoreCandidatesUseCase>,
        apply: Arc<ApplyDnsUseCase>,
    ) -> Self {
        Self {
            catalog,
            score,
            apply,
        }
    }

    #[instrument(skip(self, observer))]
    pub async fn execute(&self, observer: &dyn ScanObserver) -> Result<DnsScanReport, DomainError> {
        let ranked = self.score.execute(&self.catalog, observer).await;
        let best = pick_best(&ranked)?.clone();

        let address: IpAddr = best
            .candidate
            .address
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(best.candidate.address.to_string()))?;

        info!(
            dns = %address,
            name = %best.candidate.name,
            score_ms = best.score,
            "Best DNS server selected"
        );

        let applied = self.apply.execute(address, &best.candidate.name).await?;

        Ok(DnsScanReport {
            reachable: ranked.len(),
            best,
            applied,
        })
    }
}
