//! Corpus JSONL reader.
//!
//! One `CorpusRecord` per non-blank line. Line order defines row order.

use std::collections::HashSet;
use std::path::Path;

use augury_core::errors::{AuguryError, AuguryResult, SubstrateError};
use augury_core::CorpusRecord;

/// Read the corpus, mapping a missing file to ABSTAIN.
pub fn read_corpus_bytes(path: &Path) -> AuguryResult<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SubstrateError::MissingInput {
            artifact: "corpus".to_string(),
            path: path.display().to_string(),
        }
        .into()),
        Err(e) => Err(AuguryError::io(path, e)),
    }
}

/// Iterate `(line_number, text)` over non-blank lines, 1-based.
pub fn non_blank_lines(bytes: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    bytes
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
}

/// Count records without decoding them.
pub fn count_records(bytes: &[u8]) -> usize {
    non_blank_lines(bytes).count()
}

/// Parse and validate corpus bytes.
///
/// Rejects malformed lines, ragged or zero-width embeddings, and duplicate
/// chunk ids. All of these are input problems and classify as ABSTAIN.
pub fn parse_corpus(bytes: &[u8], path: &Path) -> AuguryResult<Vec<CorpusRecord>> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut width: Option<usize> = None;

    for (line, text) in non_blank_lines(bytes) {
        let record: CorpusRecord =
            serde_json::from_slice(text).map_err(|e| SubstrateError::MalformedRecord {
                line,
                reason: e.to_string(),
            })?;

        let actual = record.embedding.len();
        match width {
            None if actual == 0 => {
                return Err(SubstrateError::MalformedRecord {
                    line,
                    reason: "embedding is empty".to_string(),
                }
                .into())
            }
            None => width = Some(actual),
            Some(expected) if expected != actual => {
                return Err(SubstrateError::RaggedEmbedding {
                    line,
                    expected,
                    actual,
                }
                .into())
            }
            Some(_) => {}
        }

        if !seen.insert(record.chunk_id.clone()) {
            return Err(SubstrateError::DuplicateChunkId {
                chunk_id: record.chunk_id,
                line,
            }
            .into());
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(SubstrateError::EmptyCorpus {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> AuguryResult<Vec<CorpusRecord>> {
        parse_corpus(text.as_bytes(), Path::new("corpus.jsonl"))
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "{\"chunk_id\":\"a\",\"content\":\"x\",\"embedding\":[1.0,0.0]}\n\n  \n\
                    {\"chunk_id\":\"b\",\"content\":\"y\",\"embedding\":[0.0,1.0]}\n";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(count_records(text.as_bytes()), 2);
    }

    #[test]
    fn legacy_embedding_field_is_accepted() {
        let text = "{\"chunk_id\":\"a\",\"content\":\"x\",\"mean_chunk_embedding\":[3.0,4.0]}";
        assert_eq!(parse(text).unwrap()[0].embedding, vec![3.0, 4.0]);
    }

    #[test]
    fn ragged_width_reports_line_number() {
        let text = "{\"chunk_id\":\"a\",\"content\":\"\",\"embedding\":[1.0,0.0]}\n\n\
                    {\"chunk_id\":\"b\",\"content\":\"\",\"embedding\":[1.0]}";
        let err = parse(text).unwrap_err();
        assert!(err.is_abstain());
        assert!(matches!(
            err,
            AuguryError::SubstrateError(SubstrateError::RaggedEmbedding { line: 3, .. })
        ));
    }

    #[test]
    fn duplicate_ids_abstain() {
        let text = "{\"chunk_id\":\"a\",\"content\":\"\",\"embedding\":[1.0]}\n\
                    {\"chunk_id\":\"a\",\"content\":\"\",\"embedding\":[0.5]}";
        let err = parse(text).unwrap_err();
        assert!(err.is_abstain());
    }

    #[test]
    fn empty_corpus_abstains() {
        assert!(parse("\n\n").unwrap_err().is_abstain());
    }

    #[test]
    fn garbage_line_is_malformed() {
        let err = parse("not json").unwrap_err();
        assert!(matches!(
            err,
            AuguryError::SubstrateError(SubstrateError::MalformedRecord { line: 1, .. })
        ));
    }
}
