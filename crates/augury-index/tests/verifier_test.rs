//! Integrity Verifier integration tests. Each test mutates one artifact of a
//! freshly built substrate and checks the verifier notices.

use augury_core::errors::{AuguryError, SubstrateError};
use augury_core::models::IntegrityStatus;
use augury_index::{IndexBuilder, IntegrityVerifier, Substrate};
use test_fixtures::TestWorkspace;

fn built(n: usize, dim: usize) -> TestWorkspace {
    let ws = TestWorkspace::new(n, dim, 17);
    IndexBuilder::new(ws.config.clone()).build().unwrap();
    ws
}

fn verify(ws: &TestWorkspace) -> augury_core::IntegrityReceipt {
    IntegrityVerifier::new(ws.config.clone()).verify()
}

#[test]
fn fresh_substrate_is_done() {
    let ws = built(24, 8);
    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Done, "{:?}", receipt.violations);
    assert!(receipt.violations.is_empty());
    assert_eq!(receipt.counts.jsonl_lines, 24);
    assert_eq!(receipt.counts.id_map_len, 24);
    assert_eq!(receipt.counts.index_total, 24);
    assert_eq!(receipt.dim, 8);
    assert!(receipt.sha256_match.corpus);
    assert!(receipt.sha256_match.index);
    assert!(receipt.paths.manifest.ends_with("index_manifest.json"));
}

#[test]
fn missing_artifact_abstains_with_named_violation() {
    let ws = built(8, 4);
    std::fs::remove_file(ws.config.paths.id_map_path()).unwrap();

    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert!(receipt.violations.iter().any(|v| v.starts_with("Missing index.ids.json")));
}

#[test]
fn missing_substrate_abstains() {
    let ws = TestWorkspace::new(8, 4, 1);
    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert_eq!(receipt.violations.len(), 3);
}

#[test]
fn corrupting_one_index_byte_breaks_index_hash() {
    let ws = built(16, 8);
    let path = ws.config.paths.index_path();
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    std::fs::write(&path, bytes).unwrap();

    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert!(!receipt.sha256_match.index);
    assert!(receipt.sha256_match.corpus);
    assert!(receipt
        .violations
        .iter()
        .any(|v| v.starts_with("sha256 mismatch: index.bin (manifest ")));
    assert!(!receipt
        .violations
        .iter()
        .any(|v| v.starts_with("sha256 mismatch: corpus")));
}

#[test]
fn malformed_manifest_reports_both_hashes_unavailable() {
    let ws = built(5, 4);
    std::fs::write(ws.config.paths.manifest_path(), b"{not json").unwrap();

    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert!(!receipt.sha256_match.corpus);
    assert!(!receipt.sha256_match.index);
    assert!(receipt
        .violations
        .iter()
        .any(|v| v.starts_with("sha256 mismatch: corpus (manifest unavailable")));
}

#[test]
fn appending_to_corpus_breaks_counts_and_hash() {
    let ws = built(10, 4);
    let path = ws.corpus_path();
    let mut text = std::fs::read_to_string(&path).unwrap();
    text.push_str(
        "{\"chunk_id\":\"extra\",\"content\":\"late arrival\",\"embedding\":[1.0,0.0,0.0,0.0]}\n",
    );
    std::fs::write(&path, text).unwrap();

    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert_eq!(receipt.counts.jsonl_lines, 11);
    assert!(!receipt.sha256_match.corpus);
    assert!(receipt
        .violations
        .iter()
        .any(|v| v.starts_with("Count mismatch (jsonl vs id_map vs index)")));
}

#[test]
fn configured_dim_mismatch_abstains() {
    let mut ws = built(10, 4);
    ws.config.embedding.dim = 8;
    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert!(receipt.violations.iter().any(|v| v == "Dim mismatch: data 4 vs cfg 8"));
}

#[test]
fn reordered_id_map_abstains() {
    let ws = built(6, 4);
    let path = ws.config.paths.id_map_path();
    let text = std::fs::read_to_string(&path)
        .unwrap()
        .replace("chunk-00000", "tmp")
        .replace("chunk-00001", "chunk-00000")
        .replace("tmp", "chunk-00001");
    std::fs::write(&path, text).unwrap();

    let receipt = verify(&ws);
    assert_eq!(receipt.status, IntegrityStatus::Abstain);
    assert!(receipt.violations.iter().any(|v| v.contains("row 0")));
}

#[test]
fn open_refuses_abstained_substrate() {
    let ws = built(8, 4);
    std::fs::remove_file(ws.config.paths.manifest_path()).unwrap();

    let err = Substrate::open(&ws.config).unwrap_err();
    assert!(err.is_abstain());
    assert!(matches!(
        err,
        AuguryError::SubstrateError(SubstrateError::IntegrityAbstain { .. })
    ));
}

#[test]
fn open_loads_verified_substrate() {
    let ws = built(12, 4);
    let substrate = Substrate::open(&ws.config).unwrap();
    assert_eq!(substrate.rows(), 12);
    assert_eq!(substrate.dim(), 4);
    assert_eq!(substrate.chunk_id(3), Some(ws.records[3].chunk_id.as_str()));
    assert_eq!(substrate.text(3), Some(ws.records[3].content.as_str()));
    assert!(substrate.receipt().is_done());
}

#[test]
fn verify_or_abstain_maps_to_error() {
    let ws = TestWorkspace::new(4, 4, 1);
    let err = IntegrityVerifier::new(ws.config.clone())
        .verify_or_abstain()
        .unwrap_err();
    assert!(err.is_abstain());
}
