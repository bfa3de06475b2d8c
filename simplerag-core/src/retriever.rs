//! Retrieval orchestration
//!
//! Owns corpus, encoder and index. The index is built once from the whole
//! corpus; queries are encoded, searched, filtered by the relevance threshold
//! and turned into a textual answer.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::embedding::Encoder;
use crate::error::{RagError, Result};
use crate::index::FlatL2Index;
use crate::response;

/// Default number of neighbors to fetch
pub const DEFAULT_TOP_K: usize = 5;

/// Default relevance threshold (squared L2 distance)
pub const DEFAULT_THRESHOLD: f32 = 2.0;

/// Retrieval parameters used by [`Retriever::answer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// Maximum results per query (default: 5)
    pub top_k: usize,
    /// Results with distance >= threshold are dropped (default: 2.0)
    pub threshold: f32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RetrieverConfig {
    /// Reject k == 0 and thresholds that can never or always match
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RagError::invalid_argument("top_k must be at least 1"));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(RagError::invalid_argument(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A retrieved document with its distance to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document id
    pub id: usize,
    /// Squared L2 distance to the query
    pub distance: f32,
    /// Document text
    pub text: String,
}

/// Response to a query: the retrieved documents and the assembled text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Documents that cleared the threshold, nearest first
    pub results: Vec<SearchResult>,
    /// Context block plus trailer, or the "not found" message
    pub text: String,
}

impl Answer {
    /// Whether nothing cleared the relevance threshold
    pub fn is_not_found(&self) -> bool {
        self.results.is_empty()
    }
}

/// Lifecycle of a [`Retriever`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieverState {
    /// Index not built yet; queries fail with `IndexNotReady`
    Uninitialized,
    /// Index built; serving queries
    Ready,
}

/// Corpus + encoder + index
pub struct Retriever<E: Encoder = Box<dyn Encoder>> {
    encoder: E,
    corpus: Corpus,
    index: FlatL2Index,
    config: RetrieverConfig,
}

impl<E: Encoder> Retriever<E> {
    /// Create an uninitialized retriever; call [`Retriever::build`] before querying
    pub fn new(encoder: E, corpus: Corpus, config: RetrieverConfig) -> Self {
        let index = FlatL2Index::new(encoder.dimension());
        Self {
            encoder,
            corpus,
            index,
            config,
        }
    }

    /// Create a retriever and build its index
    pub fn ready(encoder: E, corpus: Corpus, config: RetrieverConfig) -> Result<Self> {
        let mut retriever = Self::new(encoder, corpus, config);
        retriever.build()?;
        Ok(retriever)
    }

    /// Encode every document and build the index
    ///
    /// Succeeds at most once.
    ///
    /// # Errors
    /// - `IndexAlreadyBuilt` on a second call
    /// - `EmptyCorpus` / `DimensionMismatch` from the index
    /// - encoder errors for the corpus batch
    pub fn build(&mut self) -> Result<()> {
        if self.index.is_built() {
            return Err(RagError::IndexAlreadyBuilt);
        }

        let started = Instant::now();
        let texts = self.corpus.texts();
        let embeddings = self.encoder.encode(&texts)?;

        if embeddings.len() != texts.len() {
            return Err(RagError::embedding(format!(
                "encoder returned {} embeddings for {} documents",
                embeddings.len(),
                texts.len()
            )));
        }

        self.index.build(&embeddings)?;

        log::info!(
            "Index ready: {} documents, {}d, model {} ({:?})",
            self.index.len(),
            self.index.dimension(),
            self.encoder.model_name(),
            started.elapsed()
        );
        Ok(())
    }

    /// Up to `k` documents closer than `threshold`, nearest first
    ///
    /// An empty result is a valid outcome. A failing query leaves the
    /// retriever usable.
    pub fn retrieve(&self, query: &str, k: usize, threshold: f32) -> Result<Vec<SearchResult>> {
        if !self.index.is_built() {
            return Err(RagError::IndexNotReady);
        }
        if query.trim().is_empty() {
            return Err(RagError::invalid_input("query is empty"));
        }

        let query_vector = self.encoder.encode_one(query)?;
        let neighbors = self.index.search(&query_vector, k)?;

        let results: Vec<SearchResult> = neighbors
            .into_iter()
            .filter(|n| n.distance < threshold)
            .filter_map(|n| {
                self.corpus.get(n.id).map(|doc| SearchResult {
                    id: doc.id,
                    distance: n.distance,
                    text: doc.text.clone(),
                })
            })
            .collect();

        log::debug!(
            "retrieve {:?}: {} of {} candidates under {}",
            query,
            results.len(),
            k.min(self.index.len()),
            threshold
        );
        Ok(results)
    }

    /// [`Retriever::retrieve`] with the configured k and threshold
    pub fn retrieve_default(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.retrieve(query, self.config.top_k, self.config.threshold)
    }

    /// Retrieve with the configured k and threshold and assemble the response
    pub fn respond(&self, query: &str) -> Result<Answer> {
        let results = self.retrieve_default(query)?;
        let text = response::compose(query, &results);
        Ok(Answer { results, text })
    }

    /// Retrieved texts assembled into a response, or the "not found" message
    pub fn answer(&self, query: &str) -> Result<String> {
        self.respond(query).map(|answer| answer.text)
    }

    /// Current lifecycle state
    pub fn state(&self) -> RetrieverState {
        if self.index.is_built() {
            RetrieverState::Ready
        } else {
            RetrieverState::Uninitialized
        }
    }

    /// Whether queries can be served
    pub fn is_ready(&self) -> bool {
        self.state() == RetrieverState::Ready
    }

    /// The corpus
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The encoder
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// The index
    pub fn index(&self) -> &FlatL2Index {
        &self.index
    }

    /// Retrieval parameters
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }
}
