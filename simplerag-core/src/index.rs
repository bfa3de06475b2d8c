//! Exact nearest-neighbor index
//!
//! Flat squared-Euclidean index: vectors live in one row-major buffer and every
//! search scans all of them. Corpora here are tens to hundreds of entries, so
//! an exhaustive scan is both exact and fast enough.

use std::cmp::Ordering;

use crate::embedding::Embedding;
use crate::error::{RagError, Result};

/// A search hit: document id and its squared Euclidean distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the vector in the build batch
    pub id: usize,
    /// Squared L2 distance, 0 = identical
    pub distance: f32,
}

/// Brute-force index over squared L2 distance
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    /// Row-major vectors, `len * dimension` floats
    data: Vec<f32>,
    len: usize,
    built: bool,
}

impl FlatL2Index {
    /// Create an empty index for `dimension`-long vectors
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
            len: 0,
            built: false,
        }
    }

    /// Load the one and only batch of vectors
    ///
    /// Vector `i` of the batch gets id `i`.
    ///
    /// # Errors
    /// - `IndexAlreadyBuilt` if called twice
    /// - `InvalidArgument` for a zero dimension
    /// - `EmptyCorpus` for an empty batch
    /// - `DimensionMismatch` if any vector has the wrong length; the index
    ///   stays unbuilt
    pub fn build(&mut self, embeddings: &[Embedding]) -> Result<()> {
        if self.built {
            return Err(RagError::IndexAlreadyBuilt);
        }
        if self.dimension == 0 {
            return Err(RagError::invalid_argument("dimension must be at least 1"));
        }
        if embeddings.is_empty() {
            return Err(RagError::EmptyCorpus);
        }
        if let Some((position, found)) = embeddings
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != self.dimension)
        {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                found,
                position,
            });
        }

        let mut data = Vec::with_capacity(embeddings.len() * self.dimension);
        for embedding in embeddings {
            data.extend_from_slice(embedding);
        }

        self.data = data;
        self.len = embeddings.len();
        self.built = true;

        log::debug!("FlatL2Index built: {} vectors x {}d", self.len, self.dimension);
        Ok(())
    }

    /// Return the `k` nearest vectors to `query`
    ///
    /// Results are sorted by ascending distance, ties by ascending id, and
    /// hold `min(k, len)` entries.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if !self.built {
            return Err(RagError::IndexNotReady);
        }
        if k == 0 {
            return Err(RagError::invalid_argument("k must be at least 1"));
        }
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
                position: 0,
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(id, vector)| Neighbor {
                id,
                distance: squared_l2(query, vector),
            })
            .collect();

        neighbors.sort_by(compare_neighbors);
        neighbors.truncate(k);
        Ok(neighbors)
    }

    /// Vector length this index accepts
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed vectors
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before build
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `build` has succeeded
    pub fn is_built(&self) -> bool {
        self.built
    }
}

/// Squared Euclidean distance. Slices must have equal length.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.id.cmp(&b.id))
}
