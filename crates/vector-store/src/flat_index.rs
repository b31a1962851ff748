use crate::error::{Result, VectorStoreError};

/// Exact nearest-neighbor index over a flat list of vectors.
///
/// Vectors are stored positionally; position `i` here pairs with position
/// `i` in the caller's metadata list. Search is a brute-force scan ranked
/// by L2 distance. Exact and O(n) per query, which is the right trade-off
/// at dashboard corpus sizes.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Dimensionality every stored vector must have.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Append a vector, returning its position.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<usize> {
        if vector.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Find the `k` stored vectors nearest to `query` by L2 distance.
    ///
    /// Returns `(position, distance)` pairs ordered nearest-first. Equal
    /// distances keep insertion order (the sort is stable over positions).
    /// Fewer than `k` stored vectors returns all of them.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (position, squared_l2(query, vector)))
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.truncate(k);

        Ok(hits
            .into_iter()
            .map(|(position, squared)| (position, squared.sqrt()))
            .collect())
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Stored vectors in insertion order, for persistence.
    #[must_use]
    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Drop the most recently added vectors until `len` remain.
    ///
    /// Used to unwind a partially applied batch before reporting failure.
    pub fn truncate(&mut self, len: usize) {
        self.vectors.truncate(len);
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
