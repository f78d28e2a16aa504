use vortexl2_domain::{CandidateServer, ScoreResult};

/// Progress of a DNS scan, delivered in catalog order.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    Started { total: usize },
    Scored { index: usize, total: usize, result: ScoreResult },
    Failed { index: usize, total: usize, candidate: CandidateServer },
    Finished { reachable: usize },
}

pub trait ScanObserver: Send + Sync {
    fn on_event(&self, event: &ScanEvent);
}

pub struct NoopScanObserver;

impl ScanObserver for NoopScanObserver {
    fn on_event(&self, _event: &ScanEvent) {}
}
