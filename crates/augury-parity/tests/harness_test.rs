//! End-to-end parity runs over freshly built synthetic substrates.

use augury_core::config::SearcherKind;
use augury_core::errors::{AuguryError, ParityError};
use augury_core::models::GateStatus;
use augury_index::{IndexBuilder, Substrate};
use augury_parity::{read_receipt, write_receipt, VerificationRun};
use test_fixtures::TestWorkspace;

fn substrate(n: usize, dim: usize) -> (TestWorkspace, Substrate) {
    let mut ws = TestWorkspace::new(n, dim, 99);
    ws.config.parity.samples = 40;
    ws.config.parity.k = 10;
    IndexBuilder::new(ws.config.clone()).build().unwrap();
    let substrate = Substrate::open(&ws.config).unwrap();
    (ws, substrate)
}

#[test]
fn flat_candidate_passes_against_exact_truth() {
    let (ws, substrate) = substrate(300, 16);
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();

    assert_eq!(receipt.substrate.n, 300);
    assert_eq!(receipt.substrate.d, 16);
    assert_eq!(receipt.samples, 40);

    let flat = &receipt.candidates["flat"];
    assert!(flat.pass, "{:?}", flat.failures);
    assert!(flat.overlap.unwrap() >= 0.99);
    assert!(flat.p95_ms.is_some());

    for pair in [
        "exact_truth_vs_flat",
        "exact_truth_vs_rerank",
        "flat_truth_vs_flat",
        "flat_truth_vs_rerank",
    ] {
        let v = receipt.overlap[pair];
        assert!((0.0..=1.0).contains(&v), "{pair} = {v}");
    }
    assert_eq!(receipt.overlap["flat_truth_vs_flat"], 1.0);
    assert!(receipt.latency.p95_ms.is_some());
    assert_eq!(receipt.latency.per_candidate.len(), 2);
}

#[test]
fn exact_against_itself_overlaps_exactly_one() {
    let (mut ws, substrate) = substrate(120, 8);
    ws.config.parity.candidates = vec![SearcherKind::Exact];
    ws.config.parity.truths = vec![SearcherKind::Exact];
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();
    assert_eq!(receipt.overlap["exact_truth_vs_exact"], 1.0);
    assert_eq!(receipt.status, GateStatus::Pass);
}

#[test]
fn overlap_is_reproducible_across_runs() {
    let (ws, substrate) = substrate(200, 12);
    let run = VerificationRun::from_config(&ws.config);
    let a = run.run(&substrate).unwrap();
    let b = run.run(&substrate).unwrap();
    assert_eq!(a.overlap, b.overlap);
    assert_ne!(a.run_id, b.run_id);
}

#[test]
fn empty_sample_fails_every_gate() {
    let (mut ws, substrate) = substrate(50, 8);
    ws.config.parity.samples = 0;
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();

    assert_eq!(receipt.status, GateStatus::Fail);
    assert!(receipt.overlap.is_empty());
    assert!(receipt.latency.p95_ms.is_none());
    for verdict in receipt.candidates.values() {
        assert!(!verdict.pass);
        assert!(verdict.failures.iter().any(|f| f.contains("never computed")));
    }
}

#[test]
fn unreachable_latency_gate_fails() {
    let (mut ws, substrate) = substrate(80, 8);
    ws.config.parity.p95_threshold_ms = 1e-9;
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();
    assert_eq!(receipt.status, GateStatus::Fail);
}

#[test]
fn receipts_are_written_once() {
    let (ws, substrate) = substrate(60, 8);
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();
    let path = ws.config.paths.parity_receipt_path();

    write_receipt(&path, &receipt).unwrap();
    assert_eq!(read_receipt(&path).unwrap(), receipt);

    let err = write_receipt(&path, &receipt).unwrap_err();
    assert!(matches!(
        err,
        AuguryError::ParityError(ParityError::ReceiptExists { .. })
    ));
    assert_eq!(read_receipt(&path).unwrap().run_id, receipt.run_id);

    let leftovers = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn receipt_json_has_documented_shape() {
    let (ws, substrate) = substrate(60, 8);
    let receipt = VerificationRun::from_config(&ws.config).run(&substrate).unwrap();
    let json = serde_json::to_value(&receipt).unwrap();

    assert!(json["overlap"]["exact_truth_vs_flat"].is_f64());
    assert!(json["latency"]["p95_ms"].is_f64());
    assert_eq!(json["gates"]["overlap_threshold"], 0.99);
    assert_eq!(json["gates"]["p95_threshold_ms"], 150.0);
    assert_eq!(json["substrate"]["N"], 60);
    assert!(json["status"] == "PASS" || json["status"] == "FAIL");
}
