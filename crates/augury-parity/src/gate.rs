//! Gate: overlap and latency thresholds combined into pass/fail.
//!
//! A metric that was never measured fails its gate.

use augury_core::errors::ParityError;
use augury_core::models::{CandidateVerdict, GateStatus, GateThresholds};

/// Judge one candidate's metrics against the thresholds.
pub fn evaluate_candidate(
    candidate: &str,
    overlap: Option<f64>,
    p95_ms: Option<f64>,
    gates: &GateThresholds,
) -> CandidateVerdict {
    let mut failures = Vec::new();

    match overlap {
        None => failures.push(incomplete(candidate, "overlap")),
        Some(v) if v.is_nan() || v < gates.overlap_threshold => failures.push(format!(
            "overlap {v:.4} below threshold {:.4}",
            gates.overlap_threshold
        )),
        Some(_) => {}
    }
    match p95_ms {
        None => failures.push(incomplete(candidate, "p95_ms")),
        Some(v) if v.is_nan() || v > gates.p95_threshold_ms => failures.push(format!(
            "p95 {v:.3}ms above threshold {:.3}ms",
            gates.p95_threshold_ms
        )),
        Some(_) => {}
    }

    CandidateVerdict {
        overlap,
        p95_ms,
        pass: failures.is_empty(),
        failures,
    }
}

/// PASS only when at least one candidate was judged and all of them passed.
pub fn overall_status<'a>(verdicts: impl IntoIterator<Item = &'a CandidateVerdict>) -> GateStatus {
    let mut any = false;
    for verdict in verdicts {
        if !verdict.pass {
            return GateStatus::Fail;
        }
        any = true;
    }
    if any {
        GateStatus::Pass
    } else {
        GateStatus::Fail
    }
}

fn incomplete(candidate: &str, metric: &str) -> String {
    ParityError::IncompleteMetric {
        candidate: candidate.to_string(),
        metric: metric.to_string(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gates() -> GateThresholds {
        GateThresholds {
            overlap_threshold: 0.99,
            p95_threshold_ms: 150.0,
        }
    }

    #[test]
    fn passing_metrics_pass() {
        let v = evaluate_candidate("flat", Some(0.995), Some(120.0), &gates());
        assert!(v.pass);
        assert!(v.failures.is_empty());
        assert_eq!(overall_status([&v]), GateStatus::Pass);
    }

    #[test]
    fn low_overlap_fails() {
        let v = evaluate_candidate("flat", Some(0.98), Some(120.0), &gates());
        assert!(!v.pass);
        assert_eq!(v.failures.len(), 1);
        assert_eq!(overall_status([&v]), GateStatus::Fail);
    }

    #[test]
    fn slow_candidate_fails() {
        let v = evaluate_candidate("flat", Some(1.0), Some(150.5), &gates());
        assert!(!v.pass);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert!(evaluate_candidate("flat", Some(0.99), Some(150.0), &gates()).pass);
    }

    #[test]
    fn missing_metric_fails() {
        let v = evaluate_candidate("rerank", None, Some(1.0), &gates());
        assert!(!v.pass);
        assert!(v.failures[0].contains("never computed"));
        let v = evaluate_candidate("rerank", Some(1.0), None, &gates());
        assert!(!v.pass);
    }

    #[test]
    fn nan_metrics_fail() {
        assert!(!evaluate_candidate("flat", Some(f64::NAN), Some(1.0), &gates()).pass);
        assert!(!evaluate_candidate("flat", Some(1.0), Some(f64::NAN), &gates()).pass);
    }

    #[test]
    fn one_failing_candidate_fails_the_run() {
        let ok = evaluate_candidate("flat", Some(1.0), Some(1.0), &gates());
        let bad = evaluate_candidate("rerank", Some(0.5), Some(1.0), &gates());
        assert_eq!(overall_status([&ok, &bad]), GateStatus::Fail);
    }

    #[test]
    fn no_candidates_is_not_a_pass() {
        assert_eq!(overall_status(std::iter::empty()), GateStatus::Fail);
    }
}
