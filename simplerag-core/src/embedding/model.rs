//! Encoder selection by model name

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use fastembed::EmbeddingModel;

use super::discovery::find_cache_dir;
use super::{Encoder, FastEmbedEncoder, HashedEncoder};
use crate::error::{RagError, Result};

/// Supported encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderKind {
    /// sentence-transformers/all-MiniLM-L6-v2 (384d)
    #[default]
    AllMiniLmL6V2,
    /// sentence-transformers/all-MiniLM-L12-v2 (384d)
    AllMiniLmL12V2,
    /// BAAI/bge-small-en-v1.5 (384d)
    BgeSmallEnV15,
    /// BAAI/bge-base-en-v1.5 (768d)
    BgeBaseEnV15,
    /// sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2 (384d)
    ParaphraseMultilingualMiniLmL12V2,
    /// Offline feature-hashing encoder
    Hashed,
}

impl EncoderKind {
    /// Every supported encoder, in display order
    pub const ALL: [EncoderKind; 6] = [
        Self::AllMiniLmL6V2,
        Self::AllMiniLmL12V2,
        Self::BgeSmallEnV15,
        Self::BgeBaseEnV15,
        Self::ParaphraseMultilingualMiniLmL12V2,
        Self::Hashed,
    ];

    /// Canonical model name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            Self::AllMiniLmL12V2 => "all-MiniLM-L12-v2",
            Self::BgeSmallEnV15 => "bge-small-en-v1.5",
            Self::BgeBaseEnV15 => "bge-base-en-v1.5",
            Self::ParaphraseMultilingualMiniLmL12V2 => "paraphrase-multilingual-MiniLM-L12-v2",
            Self::Hashed => "hashed",
        }
    }

    /// Whether loading needs model files (and possibly network access)
    pub fn requires_download(&self) -> bool {
        self.fastembed_model().is_some()
    }

    fn fastembed_model(&self) -> Option<EmbeddingModel> {
        match self {
            Self::AllMiniLmL6V2 => Some(EmbeddingModel::AllMiniLML6V2),
            Self::AllMiniLmL12V2 => Some(EmbeddingModel::AllMiniLML12V2),
            Self::BgeSmallEnV15 => Some(EmbeddingModel::BGESmallENV15),
            Self::BgeBaseEnV15 => Some(EmbeddingModel::BGEBaseENV15),
            Self::ParaphraseMultilingualMiniLmL12V2 => {
                Some(EmbeddingModel::ParaphraseMLMiniLML12V2)
            }
            Self::Hashed => None,
        }
    }

    /// Load the encoder
    ///
    /// # Arguments
    /// * `cache_dir` - explicit model cache directory; discovered when `None`
    ///
    /// # Errors
    /// `ModelUnavailable` if the model cannot be initialized.
    pub fn load(&self, cache_dir: Option<&Path>) -> Result<Box<dyn Encoder>> {
        match self.fastembed_model() {
            Some(model) => {
                let cache_dir = find_cache_dir(cache_dir);
                Ok(Box::new(FastEmbedEncoder::new(model, self.name(), cache_dir)?))
            }
            None => Ok(Box::new(HashedEncoder::default())),
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncoderKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let bare = ["sentence-transformers/", "baai/", "qdrant/", "xenova/"]
            .iter()
            .find_map(|prefix| lower.strip_prefix(prefix))
            .unwrap_or(lower.as_str());

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(bare))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
                RagError::invalid_argument(format!(
                    "unknown model '{}' (supported: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_minilm() {
        assert_eq!(EncoderKind::default(), EncoderKind::AllMiniLmL6V2);
        assert_eq!(EncoderKind::default().to_string(), "all-MiniLM-L6-v2");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("all-MiniLM-L6-v2".parse::<EncoderKind>().unwrap(), EncoderKind::AllMiniLmL6V2);
        assert_eq!(
            "sentence-transformers/all-MiniLM-L6-v2"
                .parse::<EncoderKind>()
                .unwrap(),
            EncoderKind::AllMiniLmL6V2
        );
        assert_eq!(
            "BAAI/bge-small-en-v1.5".parse::<EncoderKind>().unwrap(),
            EncoderKind::BgeSmallEnV15
        );
        assert_eq!(" HASHED ".parse::<EncoderKind>().unwrap(), EncoderKind::Hashed);
    }

    #[test]
    fn test_parse_round_trips_every_name() {
        for kind in EncoderKind::ALL {
            assert_eq!(kind.name().parse::<EncoderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "gpt-5".parse::<EncoderKind>().unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
        assert!(err.to_string().contains("all-MiniLM-L6-v2"));
    }

    #[test]
    fn test_hashed_loads_offline() {
        assert!(!EncoderKind::Hashed.requires_download());
        let encoder = EncoderKind::Hashed.load(None).unwrap();
        assert_eq!(encoder.model_name(), "hashed");
        assert_eq!(encoder.dimension(), crate::embedding::DEFAULT_HASHED_DIMENSION);
    }
}
