//! Hashed-term stand-in embedder.
//!
//! Deterministic dense vectors from term frequencies hashed into fixed
//! buckets. Works offline and in CI. Carries no semantic model, so it is
//! labeled as a stand-in and refused by the production profile.

use std::collections::BTreeMap;

use augury_core::errors::AuguryResult;
use augury_core::traits::IEmbeddingProvider;

pub struct StandInProvider {
    dimensions: usize,
}

impl StandInProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// FNV-1a bucket for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }

        // BTreeMap keeps accumulation order fixed across runs.
        let mut tf: BTreeMap<String, f32> = BTreeMap::new();
        let mut total = 0.0f32;
        for term in Self::terms(text) {
            *tf.entry(term).or_default() += 1.0;
            total += 1.0;
        }
        if total == 0.0 {
            return vec;
        }

        for (term, count) in &tf {
            let weight = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for StandInProvider {
    fn embed(&self, text: &str) -> AuguryResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> AuguryResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "stand-in-hashing"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_stand_in(&self) -> bool {
        true
    }
}
