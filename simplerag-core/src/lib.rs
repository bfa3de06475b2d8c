//! SimpleRAG Retrieval Core
//!
//! Embeds a fixed corpus of short facts, indexes the vectors for exact
//! nearest-neighbor search and answers free-text queries with the closest
//! corpus entries.
//!
//! ## Pipeline
//!
//! - **Encoder** - text to fixed-length vectors (fastembed ONNX models, or an
//!   offline feature-hashing encoder)
//! - **Index** - exhaustive squared-Euclidean scan, built once
//! - **Retriever** - owns corpus, encoder and index; filters by a relevance
//!   threshold and assembles the textual answer
//!
//! ## Example
//!
//! ```ignore
//! use simplerag_core::{Corpus, EncoderKind, Retriever, RetrieverConfig};
//!
//! let encoder = EncoderKind::default().load(None)?;
//! let mut retriever = Retriever::new(encoder, Corpus::builtin(), RetrieverConfig::default());
//! retriever.build()?;
//!
//! println!("{}", retriever.answer("Which foods can supplement iron?")?);
//! ```

pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod response;
pub mod retriever;

// Re-exports for convenience
pub use corpus::{Corpus, Document};
pub use embedding::{Embedding, Encoder, EncoderKind, FastEmbedEncoder, HashedEncoder};
pub use error::{RagError, Result};
pub use index::{squared_l2, FlatL2Index, Neighbor};
pub use retriever::{
    Answer, Retriever, RetrieverConfig, RetrieverState, SearchResult, DEFAULT_THRESHOLD,
    DEFAULT_TOP_K,
};
