use async_trait::async_trait;
use thiserror::Error;

/// Opaque failure reported by an embedding provider implementation.
///
/// The store does not interpret provider failures; it bubbles them to the
/// caller wrapped in [`crate::VectorStoreError::Provider`].
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Capability for turning text into fixed-length vectors.
///
/// Implementations must return exactly one vector per input text, in input
/// order, each of length [`dimension`](Self::dimension). How the vectors
/// are produced (remote API, local model) is the implementation's concern,
/// as are timeouts and retries.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per text, preserving order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}

/// Deterministic hash-seeded embedding provider.
///
/// Each text is hashed (FNV-1a) and the hash seeds a splitmix64 stream
/// that fills a normalized vector. The output is stable across runs and
/// platforms but carries no semantic signal whatsoever: two paraphrases
/// land nowhere near each other. Use it for development and tests where
/// determinism matters and meaning does not; production deployments plug
/// in a real [`EmbeddingProvider`].
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut state = fnv1a_64(text.as_bytes())
            ^ (self.dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut vec = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            let bits = splitmix64(&mut state);
            let high = (bits >> 32) as u32;
            let mantissa = high >> 9;
            let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
            vec.push(unit.mul_add(2.0, -1.0));
        }
        normalize(&mut vec);
        vec
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        log::debug!("Hash-embedding {} texts", texts.len());
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
