//! Row index → chunk id bijection.
//!
//! Serialized as a JSON object keyed by the decimal row index, written in row
//! order so rebuilding from the same corpus yields identical bytes.

use std::collections::{BTreeMap, HashSet};

use augury_core::errors::{AuguryResult, SubstrateError};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    ids: Vec<String>,
}

impl IdMap {
    /// Build from chunk ids in row order. Ids must be unique.
    pub fn new(ids: Vec<String>) -> AuguryResult<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for (row, id) in ids.iter().enumerate() {
            if !seen.insert(id.as_str()) {
                return Err(SubstrateError::MalformedIdMap {
                    reason: format!("chunk id {id:?} appears again at row {row}"),
                }
                .into());
            }
        }
        Ok(Self { ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.ids.get(row).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    /// Pretty JSON bytes as written to `index.ids.json`.
    pub fn to_json_bytes(&self) -> AuguryResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parse the raw JSON object without validating the keys.
    ///
    /// Used by the verifier to report the entry count even for a map that
    /// later fails validation.
    pub fn parse_entries(bytes: &[u8]) -> AuguryResult<BTreeMap<String, String>> {
        serde_json::from_slice(bytes).map_err(|e| {
            SubstrateError::MalformedIdMap {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate raw entries: keys must be exactly `0..N` and values unique.
    pub fn from_entries(entries: BTreeMap<String, String>) -> AuguryResult<Self> {
        let n = entries.len();
        let mut ids: Vec<Option<String>> = vec![None; n];
        for (key, id) in entries {
            let row: usize = key.parse().map_err(|_| SubstrateError::MalformedIdMap {
                reason: format!("key {key:?} is not a row index"),
            })?;
            // "007" and "7" parse to the same row; a second hit lands on a filled slot.
            match ids.get_mut(row) {
                Some(slot @ None) => *slot = Some(id),
                Some(Some(_)) => {
                    return Err(SubstrateError::MalformedIdMap {
                        reason: format!("row {row} appears more than once"),
                    }
                    .into())
                }
                None => {
                    return Err(SubstrateError::MalformedIdMap {
                        reason: format!("row {row} is outside 0..{n}"),
                    }
                    .into())
                }
            }
        }
        // Every slot is filled: n distinct rows, all below n.
        Self::new(ids.into_iter().flatten().collect())
    }

    /// Parse and validate `index.ids.json` bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> AuguryResult<Self> {
        Self::from_entries(Self::parse_entries(bytes)?)
    }
}

impl Serialize for IdMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (row, id) in self.ids.iter().enumerate() {
            map.serialize_entry(&row.to_string(), id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("chunk_{i:05}")).collect()
    }

    #[test]
    fn json_keys_are_written_in_row_order() {
        let map = IdMap::new(ids(12)).unwrap();
        let text = String::from_utf8(map.to_json_bytes().unwrap()).unwrap();
        let pos_2 = text.find("\"2\"").unwrap();
        let pos_10 = text.find("\"10\"").unwrap();
        assert!(pos_2 < pos_10, "row 2 must precede row 10");
    }

    #[test]
    fn json_roundtrip_preserves_rows() {
        let map = IdMap::new(ids(12)).unwrap();
        let parsed = IdMap::from_json_bytes(&map.to_json_bytes().unwrap()).unwrap();
        assert_eq!(parsed, map);
        assert_eq!(parsed.get(10), Some("chunk_00010"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert!(IdMap::new(vec!["a".into(), "b".into(), "a".into()]).is_err());
    }

    #[test]
    fn gap_in_keys_is_rejected() {
        let err = IdMap::from_json_bytes(br#"{"0":"a","2":"b"}"#).unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        assert!(IdMap::from_json_bytes(br#"{"zero":"a"}"#).is_err());
    }

    #[test]
    fn aliased_keys_are_rejected() {
        assert!(IdMap::from_json_bytes(br#"{"1":"a","01":"b"}"#).is_err());
    }
}
