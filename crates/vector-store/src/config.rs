use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default embedding dimensionality.
pub const DEFAULT_DIMENSION: usize = 1536;

/// Default directory holding the persisted index pair.
pub const DEFAULT_INDEX_DIR: &str = "news_index";

const INDEX_FILE_NAME: &str = "news.index.json";
const META_FILE_NAME: &str = "meta.json";

/// Configuration for a [`crate::VectorStore`].
///
/// The persisted state lives in two files: `index_path` (the serialized
/// vectors) and `meta_path` (the serialized documents). Both are owned
/// exclusively by one store instance at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Embedding dimensionality every stored vector must have.
    pub dimension: usize,

    /// Path of the serialized vector index.
    pub index_path: PathBuf,

    /// Path of the serialized document metadata list.
    pub meta_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_INDEX_DIR)
    }
}

impl StoreConfig {
    /// Standard file layout inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dimension: DEFAULT_DIMENSION,
            index_path: dir.join(INDEX_FILE_NAME),
            meta_path: dir.join(META_FILE_NAME),
        }
    }

    /// Builder: set the embedding dimensionality.
    #[must_use]
    pub const fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Configuration from the process environment.
    ///
    /// `NEWSLENS_INDEX_DIR` overrides the storage directory and
    /// `NEWSLENS_EMBEDDING_DIM` the dimensionality; unset variables fall
    /// back to the defaults.
    pub fn from_env() -> Result<Self> {
        let dir = std::env::var("NEWSLENS_INDEX_DIR")
            .unwrap_or_else(|_| DEFAULT_INDEX_DIR.to_string());
        let mut config = Self::in_dir(dir);

        if let Ok(raw) = std::env::var("NEWSLENS_EMBEDDING_DIM") {
            let dimension: usize = raw.parse().map_err(|e| {
                VectorStoreError::Initialization(format!(
                    "Invalid NEWSLENS_EMBEDDING_DIM '{raw}': {e}"
                ))
            })?;
            config.dimension = dimension;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(VectorStoreError::Initialization(
                "embedding dimension must be > 0".to_string(),
            ));
        }
        if self.index_path == self.meta_path {
            return Err(VectorStoreError::Initialization(format!(
                "index_path and meta_path must differ (both {})",
                self.index_path.display()
            )));
        }
        Ok(())
    }
}
