//! Feature-hashing encoder
//!
//! Deterministic, model-free embeddings: lowercase word tokens and their
//! character trigrams are hashed into signed buckets, then L2-normalized.
//! Texts sharing vocabulary land close together; no download required.

use super::{ensure_non_blank, Embedding, Encoder};
use crate::error::{RagError, Result};

/// Default vector length, same as all-MiniLM-L6-v2
pub const DEFAULT_HASHED_DIMENSION: usize = 384;

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Offline encoder based on the hashing trick
#[derive(Debug, Clone)]
pub struct HashedEncoder {
    dimension: usize,
}

impl HashedEncoder {
    /// Create an encoder producing `dimension`-long vectors
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(RagError::invalid_argument("hashed encoder dimension must be at least 1"));
        }
        Ok(Self { dimension })
    }

    fn embed_text(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0_f32; self.dimension];

        for word in tokenize(text) {
            self.accumulate(&mut vector, b"w:", word.as_bytes(), WORD_WEIGHT);

            let bounded: Vec<char> = format!("<{}>", word).chars().collect();
            for window in bounded.windows(3) {
                let trigram: String = window.iter().collect();
                self.accumulate(&mut vector, b"t:", trigram.as_bytes(), TRIGRAM_WEIGHT);
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }

    fn accumulate(&self, vector: &mut [f32], namespace: &[u8], feature: &[u8], weight: f32) {
        let hash = fnv1a(namespace, feature);
        let bucket = (hash % self.dimension as u64) as usize;
        // top bit picks the sign so collisions tend to cancel instead of pile up
        let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for HashedEncoder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_HASHED_DIMENSION,
        }
    }
}

impl Encoder for HashedEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        ensure_non_blank(texts)?;
        if let Some(i) = texts.iter().position(|t| tokenize(t).next().is_none()) {
            return Err(RagError::invalid_input(format!(
                "text at position {} has no alphanumeric tokens",
                i
            )));
        }
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "hashed"
    }
}

/// Lowercase alphanumeric tokens
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// 64-bit FNV-1a over namespace then feature bytes
fn fnv1a(namespace: &[u8], feature: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    namespace
        .iter()
        .chain(feature.iter())
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::squared_l2;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HashedEncoder::new(0).is_err());
    }

    #[test]
    fn test_deterministic_and_normalized() {
        let encoder = HashedEncoder::default();
        let a = encoder.encode_one("Apple is a common fruit").unwrap();
        let b = encoder.encode_one("Apple is a common fruit").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_HASHED_DIMENSION);

        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let encoder = HashedEncoder::default();
        let a = encoder.encode_one("Rice, wheat!").unwrap();
        let b = encoder.encode_one("rice wheat").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_vocabulary_is_closer() {
        let encoder = HashedEncoder::default();
        let query = encoder.encode_one("fruit rich in vitamin C").unwrap();
        let near = encoder
            .encode_one("Orange is a citrus fruit rich in vitamin C")
            .unwrap();
        let far = encoder
            .encode_one("Highland barley is the main grain in plateau areas")
            .unwrap();
        assert!(squared_l2(&query, &near) < squared_l2(&query, &far));
    }

    #[test]
    fn test_batch_preserves_order() {
        let encoder = HashedEncoder::new(32).unwrap();
        let batch = encoder.encode(&["one", "two", "three"]).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[1], encoder.encode_one("two").unwrap());
        assert_eq!(batch[2], encoder.encode_one("three").unwrap());
    }

    #[test]
    fn test_blank_text_rejected() {
        let encoder = HashedEncoder::default();
        assert!(matches!(encoder.encode(&[""]), Err(RagError::InvalidInput(_))));
    }

    #[test]
    fn test_punctuation_only_text_rejected() {
        let encoder = HashedEncoder::default();
        let err = encoder.encode(&["apple", "???"]).unwrap_err();
        assert!(matches!(err, RagError::InvalidInput(_)));
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_fnv1a_known_value() {
        // FNV-1a("a")
        assert_eq!(fnv1a(b"", b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
