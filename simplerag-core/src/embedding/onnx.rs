//! fastembed sentence embeddings
//!
//! Runs sentence-transformer ONNX models locally. Model files are fetched from
//! HuggingFace on first use and cached on disk.

use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::{ensure_non_blank, Embedding, Encoder};
use crate::error::{RagError, Result};

/// Default batch size for document encoding
const DEFAULT_BATCH_SIZE: usize = 256;

/// Encoder backed by a fastembed `TextEmbedding` model
pub struct FastEmbedEncoder {
    model: TextEmbedding,
    model_name: String,
    dimension: usize,
}

impl FastEmbedEncoder {
    /// Load a fastembed model
    ///
    /// # Arguments
    /// * `model` - fastembed model identifier
    /// * `model_name` - human-readable name, used in logs and errors
    /// * `cache_dir` - where model files are cached (fastembed default if `None`)
    ///
    /// # Errors
    /// `ModelUnavailable` if the model cannot be downloaded or initialized.
    pub fn new(
        model: EmbeddingModel,
        model_name: &str,
        cache_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let mut options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        log::info!("Loading embedding model: {}", model_name);

        let model = TextEmbedding::try_new(options)
            .map_err(|e| RagError::model(format!("Failed to load {}: {}", model_name, e)))?;

        // Get dimension by encoding a sample string
        let sample = model
            .embed(vec!["dimension check"], None)
            .map_err(|e| RagError::model(format!("Failed to encode sample string: {}", e)))?;
        let dimension = sample
            .first()
            .map(Vec::len)
            .filter(|d| *d > 0)
            .ok_or_else(|| RagError::model(format!("{} produced an empty embedding", model_name)))?;

        log::info!("Loaded {} ({}d)", model_name, dimension);

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl Encoder for FastEmbedEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        ensure_non_blank(texts)?;

        let embeddings = self
            .model
            .embed(texts.to_vec(), Some(DEFAULT_BATCH_SIZE))
            .map_err(|e| RagError::embedding(format!("Failed to encode texts: {}", e)))?;

        if embeddings.len() != texts.len() {
            return Err(RagError::embedding(format!(
                "expected {} embeddings, model returned {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
