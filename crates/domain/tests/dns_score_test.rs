use std::sync::Arc;
use vortexl2_domain::{pick_best, round_tenth, DomainError, ScoreResult};

mod helpers;
use helpers::{candidate, score};

#[test]
fn test_round_tenth() {
    assert_eq!(round_tenth(15.04), 15.0);
    assert_eq!(round_tenth(15.06), 15.1);
    assert_eq!(round_tenth(0.0), 0.0);
}

#[test]
fn test_score_is_mean_of_domains() {
    let result = ScoreResult::from_latencies(
        candidate("X", "10.0.0.1"),
        vec![
            (Arc::from("chatgpt.com"), 10.0),
            (Arc::from("one.one.one.one"), 20.0),
        ],
    )
    .unwrap();

    assert_eq!(result.score, 15.0);
    assert_eq!(result.latencies_ms.len(), 2);
}

#[test]
fn test_score_requires_latencies() {
    assert!(ScoreResult::from_latencies(candidate("X", "10.0.0.1"), vec![]).is_none());
}

#[test]
fn test_pick_best_lowest_wins() {
    let ranked = vec![
        score("A", "10.0.0.1", 30.0),
        score("B", "10.0.0.2", 12.5),
        score("C", "10.0.0.3", 20.0),
    ];

    let best = pick_best(&ranked).unwrap();
    assert_eq!(best.candidate.name.as_ref(), "B");
}

#[test]
fn test_pick_best_tie_goes_to_earliest() {
    let ranked = vec![
        score("First", "10.0.0.1", 12.0),
        score("Second", "10.0.0.2", 12.0),
    ];

    let best = pick_best(&ranked).unwrap();
    assert_eq!(best.candidate.name.as_ref(), "First");
}

#[test]
fn test_pick_best_empty() {
    let ranked: Vec<ScoreResult> = vec![];
    assert_eq!(pick_best(&ranked).unwrap_err(), DomainError::NoCandidateAvailable);
}
