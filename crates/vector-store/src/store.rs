use crate::config::StoreConfig;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VectorStoreError};
use crate::flat_index::FlatIndex;
use crate::storage;
use newslens_articles::NewsDocument;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const INDEX_SCHEMA_VERSION: u32 = 1;
pub const META_SCHEMA_VERSION: u32 = 1;

/// One search result: the stored document plus its L2 distance to the
/// query embedding. Smaller distance means a closer match.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub document: NewsDocument,
    pub distance: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    schema_version: u32,
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedMetadata {
    schema_version: u32,
    documents: Vec<NewsDocument>,
}

/// Durable nearest-neighbor store over news documents.
///
/// Vectors live in a [`FlatIndex`] and documents in a parallel list;
/// position `i` in one always pairs with position `i` in the other, both
/// in memory and on disk. The store is append-only and persists after
/// every successful batch insertion, so a fresh [`VectorStore::open`] on
/// the same paths reproduces identical search behavior.
pub struct VectorStore {
    config: StoreConfig,
    index: FlatIndex,
    documents: Vec<NewsDocument>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl VectorStore {
    /// Open the store at the configured paths.
    ///
    /// Loads persisted state when the index file exists, otherwise
    /// initializes an empty store and persists it immediately so the
    /// location is well-formed for future loads. Corrupt, truncated, or
    /// incompatible persisted state fails here, never at first query.
    pub async fn open(config: StoreConfig, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        config.validate()?;

        if provider.dimension() != config.dimension {
            return Err(VectorStoreError::Initialization(format!(
                "embedding provider produces {}-dimensional vectors, store is configured for {}",
                provider.dimension(),
                config.dimension
            )));
        }

        if storage::exists(&config.index_path) {
            Self::load(config, provider).await
        } else if storage::exists(&config.meta_path) {
            Err(VectorStoreError::Initialization(format!(
                "metadata file {} exists without its index file {}",
                config.meta_path.display(),
                config.index_path.display()
            )))
        } else {
            log::info!(
                "Initializing empty vector store at {}",
                config.index_path.display()
            );
            let store = Self {
                index: FlatIndex::new(config.dimension),
                documents: Vec::new(),
                config,
                provider,
            };
            store.persist().await?;
            Ok(store)
        }
    }

    async fn load(config: StoreConfig, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        log::info!("Loading vector store from {}", config.index_path.display());

        if !storage::exists(&config.meta_path) {
            return Err(VectorStoreError::Initialization(format!(
                "metadata file {} is missing for existing index {}",
                config.meta_path.display(),
                config.index_path.display()
            )));
        }

        let index_bytes = storage::read(&config.index_path).await.map_err(|e| {
            VectorStoreError::Initialization(format!(
                "failed to read index file {}: {e}",
                config.index_path.display()
            ))
        })?;
        let persisted_index: PersistedIndex =
            serde_json::from_slice(&index_bytes).map_err(|e| {
                VectorStoreError::Initialization(format!(
                    "malformed index file {}: {e}",
                    config.index_path.display()
                ))
            })?;

        let meta_bytes = storage::read(&config.meta_path).await.map_err(|e| {
            VectorStoreError::Initialization(format!(
                "failed to read metadata file {}: {e}",
                config.meta_path.display()
            ))
        })?;
        let persisted_meta: PersistedMetadata =
            serde_json::from_slice(&meta_bytes).map_err(|e| {
                VectorStoreError::Initialization(format!(
                    "malformed metadata file {}: {e}",
                    config.meta_path.display()
                ))
            })?;

        if persisted_index.schema_version != INDEX_SCHEMA_VERSION {
            return Err(VectorStoreError::Initialization(format!(
                "unsupported index schema_version {} (expected {INDEX_SCHEMA_VERSION})",
                persisted_index.schema_version
            )));
        }
        if persisted_meta.schema_version != META_SCHEMA_VERSION {
            return Err(VectorStoreError::Initialization(format!(
                "unsupported metadata schema_version {} (expected {META_SCHEMA_VERSION})",
                persisted_meta.schema_version
            )));
        }
        if persisted_index.dimension != config.dimension {
            return Err(VectorStoreError::Initialization(format!(
                "persisted index dimension {} does not match configured dimension {}",
                persisted_index.dimension, config.dimension
            )));
        }
        if persisted_index.vectors.len() != persisted_meta.documents.len() {
            return Err(VectorStoreError::Initialization(format!(
                "index holds {} vectors but metadata holds {} documents",
                persisted_index.vectors.len(),
                persisted_meta.documents.len()
            )));
        }

        let mut index = FlatIndex::new(config.dimension);
        for (position, vector) in persisted_index.vectors.into_iter().enumerate() {
            let len = vector.len();
            index.add(vector).map_err(|_| {
                VectorStoreError::Initialization(format!(
                    "stored vector at position {position} has length {len}, expected {}",
                    config.dimension
                ))
            })?;
        }

        log::info!("Loaded {} documents", persisted_meta.documents.len());

        Ok(Self {
            index,
            documents: persisted_meta.documents,
            config,
            provider,
        })
    }

    /// Append a batch of documents, embedding each via the provider.
    ///
    /// All-or-nothing: the batch is embedded and dimension-checked in
    /// full before anything is appended, and the previously persisted
    /// state stays untouched on any failure. An empty batch is a no-op
    /// with no persistence write.
    pub async fn add_documents(&mut self, documents: Vec<NewsDocument>) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        log::info!("Adding {} documents to vector store", documents.len());

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.provider.embed_batch(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(VectorStoreError::Embedding(format!(
                "provider returned {} embeddings for {} documents",
                vectors.len(),
                documents.len()
            )));
        }
        for vector in &vectors {
            if vector.len() != self.config.dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: self.config.dimension,
                    actual: vector.len(),
                });
            }
        }

        let checkpoint = self.documents.len();
        let result = self.apply_batch(documents, vectors).await;
        if result.is_err() {
            // Unwind the in-memory tail so it matches what is durable.
            self.index.truncate(checkpoint);
            self.documents.truncate(checkpoint);
        }
        result
    }

    async fn apply_batch(
        &mut self,
        documents: Vec<NewsDocument>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<()> {
        for (document, vector) in documents.into_iter().zip(vectors.into_iter()) {
            self.index.add(vector)?;
            self.documents.push(document);
        }
        self.persist().await?;
        log::info!("Store now holds {} documents", self.documents.len());
        Ok(())
    }

    /// Retrieve up to `k` documents nearest to `query`, nearest-first.
    ///
    /// An empty store (or a blank query) yields an empty result set, not
    /// an error. Equal distances keep insertion order; `k` larger than
    /// the corpus returns every document.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        if self.documents.is_empty() || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        log::debug!("Searching for '{query}' (k={k})");

        let mut vectors = self.provider.embed_batch(&[query.to_string()]).await?;
        let query_vector = match vectors.pop() {
            Some(vector) if vectors.is_empty() => vector,
            _ => {
                return Err(VectorStoreError::Embedding(
                    "provider returned an unexpected number of query embeddings".to_string(),
                ))
            }
        };
        if query_vector.len() != self.config.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.config.dimension,
                actual: query_vector.len(),
            });
        }

        let neighbors = self.index.search(&query_vector, k)?;
        let hits: Vec<SearchHit> = neighbors
            .into_iter()
            .filter_map(|(position, distance)| {
                self.documents.get(position).map(|document| SearchHit {
                    document: document.clone(),
                    distance,
                })
            })
            .collect();

        log::debug!("Found {} results", hits.len());
        Ok(hits)
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored documents in insertion order.
    #[must_use]
    pub fn documents(&self) -> &[NewsDocument] {
        &self.documents
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persist the current state to the configured paths.
    pub async fn save(&self) -> Result<()> {
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        let persisted_index = PersistedIndex {
            schema_version: INDEX_SCHEMA_VERSION,
            dimension: self.config.dimension,
            vectors: self.index.vectors().to_vec(),
        };
        let index_bytes = serde_json::to_vec_pretty(&persisted_index)?;

        let persisted_meta = PersistedMetadata {
            schema_version: META_SCHEMA_VERSION,
            documents: self.documents.clone(),
        };
        let meta_bytes = serde_json::to_vec_pretty(&persisted_meta)?;

        // Index first, metadata second; the loader's length check turns a
        // torn pair into an initialization failure instead of misaligned
        // results.
        storage::write_atomic(&self.config.index_path, &index_bytes).await?;
        storage::write_atomic(&self.config.meta_path, &meta_bytes).await?;

        log::debug!(
            "Persisted {} documents to {}",
            self.documents.len(),
            self.config.index_path.display()
        );
        Ok(())
    }
}
