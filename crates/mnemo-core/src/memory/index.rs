//! Nearest-neighbor index over fixed-dimension vectors.
//!
//! [`VectorIndex`] is the seam for alternative index structures. Any
//! implementation must return hits ordered by ascending squared L2 distance
//! with ties broken by ascending ordinal; [`FlatL2Index`] does this with an
//! exact, exhaustive scan.

use std::cmp::Ordering;

use mnemo_types::error::MemoryError;
use mnemo_types::memory::SearchHit;

/// Append-only vector index keyed by insertion ordinal.
pub trait VectorIndex: Send + Sync {
    /// Length every stored and query vector must have.
    fn dimension(&self) -> usize;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a vector and return its ordinal (the previous `len()`).
    ///
    /// Fails with `DimensionMismatch` without modifying the index.
    fn add(&mut self, vector: Vec<f32>) -> Result<usize, MemoryError>;

    /// The stored vector at `ordinal`, if any.
    fn vector(&self, ordinal: usize) -> Option<&[f32]>;

    /// Up to `k` nearest stored vectors to `query`.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, MemoryError>;
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Ascending distance, then ascending ordinal.
fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Exact brute-force index storing vectors in one row-major buffer.
///
/// Search is O(n * d) per query plus a partial selection of the top `k`.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    rows: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            rows: 0,
            data: Vec::new(),
        }
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), MemoryError> {
        if vector.len() != self.dimension {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    fn row(&self, ordinal: usize) -> &[f32] {
        let start = ordinal * self.dimension;
        &self.data[start..start + self.dimension]
    }
}

impl VectorIndex for FlatL2Index {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.rows
    }

    fn add(&mut self, vector: Vec<f32>) -> Result<usize, MemoryError> {
        self.check_dimension(&vector)?;
        let ordinal = self.rows;
        self.data.extend_from_slice(&vector);
        self.rows += 1;
        Ok(ordinal)
    }

    fn vector(&self, ordinal: usize) -> Option<&[f32]> {
        (ordinal < self.rows).then(|| self.row(ordinal))
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, MemoryError> {
        if k == 0 {
            return Err(MemoryError::InvalidLimit(k));
        }
        self.check_dimension(query)?;

        let mut hits: Vec<SearchHit> = (0..self.rows)
            .map(|ordinal| SearchHit {
                ordinal,
                distance: squared_l2(query, self.row(ordinal)),
            })
            .collect();

        if hits.len() > k {
            hits.select_nth_unstable_by(k - 1, compare_hits);
            hits.truncate(k);
        }
        hits.sort_unstable_by(compare_hits);

        Ok(hits)
    }
}
