//! Dense row-major vector matrix and its on-disk codec.
//!
//! Format: header (count: u32 LE, dim: u32 LE) + body (count * dim * f32 LE).

use std::path::Path;

use augury_core::errors::{AuguryError, AuguryResult, SubstrateError};
use augury_core::models::NormAudit;

use crate::normalize::l2_norm;

const HEADER_LEN: usize = 8;

/// Rows below this norm are counted as degenerate zero vectors.
const ZERO_ROW_NORM: f64 = 1e-6;

/// N rows of D-dimensional f32 vectors, stored contiguously.
///
/// Immutable once built; share it behind an `Arc` across readers.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
    rows: usize,
    dim: usize,
    data: Vec<f32>,
}

impl VectorMatrix {
    /// Build from row vectors that all have width `dim`.
    pub fn from_rows(rows: Vec<Vec<f32>>, dim: usize) -> AuguryResult<Self> {
        let mut data = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(SubstrateError::CorruptMatrix {
                    reason: format!("row {i} has width {}, expected {dim}", row.len()),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            dim,
            data,
        })
    }

    /// Wrap an already-flattened buffer.
    pub fn from_flat(data: Vec<f32>, dim: usize) -> AuguryResult<Self> {
        if dim == 0 || data.len() % dim != 0 {
            return Err(SubstrateError::CorruptMatrix {
                reason: format!("buffer of {} floats is not a multiple of dim {dim}", data.len()),
            }
            .into());
        }
        Ok(Self {
            rows: data.len() / dim,
            dim,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Row `i` as a slice. Panics if out of range; callers check `rows()`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// The whole matrix as one row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dim.max(1))
    }

    /// Serialize to the on-disk format. Shapes that overflow the u32 header
    /// are rejected.
    pub fn to_bytes(&self) -> AuguryResult<Vec<u8>> {
        let rows = header_field("row count", self.rows)?;
        let dim = header_field("dim", self.dim)?;
        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len() * 4);
        out.extend_from_slice(&rows.to_le_bytes());
        out.extend_from_slice(&dim.to_le_bytes());
        for v in &self.data {
            out.extend_from_slice(&v.to_le_bytes());
        }
        Ok(out)
    }

    /// Parse the on-disk format, rejecting truncated or padded bodies.
    pub fn from_bytes(bytes: &[u8]) -> AuguryResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SubstrateError::CorruptMatrix {
                reason: format!("{} bytes is shorter than the header", bytes.len()),
            }
            .into());
        }
        let rows = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let dim = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        let expected = rows
            .checked_mul(dim)
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(HEADER_LEN));
        if expected != Some(bytes.len()) {
            return Err(SubstrateError::CorruptMatrix {
                reason: format!(
                    "header declares {rows}x{dim} but body holds {} bytes",
                    bytes.len() - HEADER_LEN
                ),
            }
            .into());
        }
        if dim == 0 && rows > 0 {
            return Err(SubstrateError::CorruptMatrix {
                reason: "zero-width rows".to_string(),
            }
            .into());
        }

        let data = bytes[HEADER_LEN..]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Self { rows, dim, data })
    }

    /// Read and parse a matrix file.
    pub fn read(path: &Path) -> AuguryResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| AuguryError::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Audit row norms against the unit-norm invariant.
    pub fn audit_norms(&self) -> NormAudit {
        let mut audit = NormAudit::default();
        for row in self.iter_rows() {
            if row.iter().any(|x| !x.is_finite()) {
                audit.nan_inf = true;
                continue;
            }
            let norm = l2_norm(row);
            if norm < ZERO_ROW_NORM {
                audit.zero_rows += 1;
            } else {
                audit.max_norm_dev = audit.max_norm_dev.max((norm - 1.0).abs());
            }
        }
        audit
    }
}

fn header_field(name: &str, value: usize) -> AuguryResult<u32> {
    u32::try_from(value).map_err(|_| {
        SubstrateError::CorruptMatrix {
            reason: format!("{name} {value} does not fit the u32 header"),
        }
        .into()
    })
}
