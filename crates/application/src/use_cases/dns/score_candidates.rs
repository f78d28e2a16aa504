use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};
use vortexl2_domain::{CandidateServer, ScoreResult};

use super::MeasureLatencyUseCase;
use crate::ports::{ScanEvent, ScanObserver};

/// Probes every candidate against the validation domains.
///
/// A candidate is kept only if every domain resolves; the first failing domain
/// ends its probing. Up to `workers` candidates are probed at once, results
/// and progress events come out in catalog order.
pub struct ScoreCandidatesUseCase {
    measure: Arc<MeasureLatencyUseCase>,
    domains: Vec<Arc<str>>,
    workers: usize,
}

impl ScoreCandidatesUseCase {
    pub fn new(measure: Arc<MeasureLatencyUseCase>, domains: &[&str], workers: usize) -> Self {
        Self {
            measure,
            domains: domains.iter().map(|d| Arc::from(*d)).collect(),
            workers: workers.max(1),
        }
    }

    pub async fn execute(
        &self,
        catalog: &[CandidateServer],
        observer: &dyn ScanObserver,
    ) -> Vec<ScoreResult> {
        let total = catalog.len();
        observer.on_event(&ScanEvent::Started { total });

        let mut scored = stream::iter(catalog.iter().cloned())
            .map(|candidate| self.score_one(candidate))
            .buffered(self.workers);

        let mut ranked = Vec::new();
        let mut index = 0;
        while let Some((candidate, result)) = scored.next().await {
            index += 1;
            match result {
                Some(result) => {
                    observer.on_event(&ScanEvent::Scored {
                        index,
                        total,
                        result: result.clone(),
                    });
                    ranked.push(result);
                }
                None => observer.on_event(&ScanEvent::Failed {
                    index,
                    total,
                    candidate,
                }),
            }
        }

        observer.on_event(&ScanEvent::Finished {
            reachable: ranked.len(),
        });
        info!(total, reachable = ranked.len(), "DNS scan finished");

        ranked
    }

    async fn score_one(&self, candidate: CandidateServer) -> (CandidateServer, Option<ScoreResult>) {
        let mut latencies = Vec::with_capacity(self.domains.len());

        for domain in &self.domains {
            let probe = self.measure.execute(domain, &candidate.address).await;
            match probe.elapsed_ms {
                Some(ms) => latencies.push((Arc::clone(domain), ms)),
                None => {
                    debug!(server = %candidate.address, domain = %domain, "Candidate dropped");
                    return (candidate, None);
                }
            }
        }

        let result = ScoreResult::from_latencies(candidate.clone(), latencies);
        (candidate, result)
    }
}
