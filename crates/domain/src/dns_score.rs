use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dns_candidate::CandidateServer;
use crate::errors::DomainError;

/// Round to one decimal place (milliseconds are reported as e.g. `15.3`).
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Outcome of probing one (domain, address) pair.
///
/// `elapsed_ms` is `None` when every attempt failed or timed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub address: Arc<str>,
    pub domain: Arc<str>,
    pub elapsed_ms: Option<f64>,
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        self.elapsed_ms.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate: CandidateServer,
    /// Mean of `latencies_ms`, rounded to one decimal
    pub score: f64,
    /// Per validation domain, in probing order
    pub latencies_ms: Vec<(Arc<str>, f64)>,
}

impl ScoreResult {
    /// Build a score from per-domain timings. Returns `None` for an empty list.
    pub fn from_latencies(
        candidate: CandidateServer,
        latencies_ms: Vec<(Arc<str>, f64)>,
    ) -> Option<Self> {
        if latencies_ms.is_empty() {
            return None;
        }
        let total: f64 = latencies_ms.iter().map(|(_, ms)| ms).sum();
        let score = round_tenth(total / latencies_ms.len() as f64);
        Some(Self {
            candidate,
            score,
            latencies_ms,
        })
    }
}

/// Lowest score wins; on an exact tie the earliest scanned result is kept.
pub fn pick_best(ranked: &[ScoreResult]) -> Result<&ScoreResult, DomainError> {
    let mut best: Option<&ScoreResult> = None;
    for result in ranked {
        match best {
            Some(current) if result.score >= current.score => {}
            _ => best = Some(result),
        }
    }
    best.ok_or(DomainError::NoCandidateAvailable)
}
