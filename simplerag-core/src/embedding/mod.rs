//! Embedding module for corpus and query encoding
//!
//! Sentence-transformer models run locally through fastembed (ONNX Runtime);
//! `HashedEncoder` is the offline fallback.

mod discovery;
mod hashed;
mod model;
mod onnx;

pub use discovery::{find_cache_dir, CACHE_DIR_ENV};
pub use hashed::{HashedEncoder, DEFAULT_HASHED_DIMENSION};
pub use model::EncoderKind;
pub use onnx::FastEmbedEncoder;

use crate::error::{RagError, Result};

/// Dense vector produced by an encoder
pub type Embedding = Vec<f32>;

/// Maps text to fixed-length vectors
///
/// Implementations are deterministic for a loaded model: the same text always
/// yields the same vector. `encode` returns one embedding per input, in input
/// order, each `dimension()` long.
pub trait Encoder: Send + Sync {
    /// Encode a batch of texts
    fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Length of every vector this encoder produces
    fn dimension(&self) -> usize;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;

    /// Encode a single text
    fn encode_one(&self, text: &str) -> Result<Embedding> {
        self.encode(&[text])?
            .pop()
            .ok_or_else(|| RagError::embedding("encoder returned no embedding"))
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        (**self).encode(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Blank text has no meaningful embedding; reject it up front.
pub(crate) fn ensure_non_blank(texts: &[&str]) -> Result<()> {
    match texts.iter().position(|t| t.trim().is_empty()) {
        Some(i) => Err(RagError::invalid_input(format!("text at position {} is empty", i))),
        None => Ok(()),
    }
}
