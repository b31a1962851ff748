//! # NewsLens Vector Store
//!
//! Durable similarity search over news documents.
//!
//! ## Features
//!
//! - **Exact nearest-neighbor search** by L2 distance over a flat index
//! - **Pluggable embeddings** via the [`EmbeddingProvider`] capability
//! - **Persistent storage** as a schema-versioned JSON index/metadata pair
//! - **All-or-nothing batch inserts** with the prior durable state kept
//!   intact on any failure
//!
//! ## Architecture
//!
//! ```text
//! NewsDocument[]
//!     │
//!     ├──> EmbeddingProvider (external capability)
//!     │      └─> Vector[D]
//!     │
//!     ├──> FlatIndex
//!     │      └─> Exact L2 search, ties in insertion order
//!     │
//!     └──> Persistent Storage
//!            └─> news.index.json + meta.json (atomic writes)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use newslens_vector_store::{HashEmbedder, NewsDocument, StoreConfig, VectorStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StoreConfig::in_dir("news_index").dimension(1536);
//!     let provider = Arc::new(HashEmbedder::new(1536));
//!     let mut store = VectorStore::open(config, provider).await?;
//!
//!     store
//!         .add_documents(vec![
//!             NewsDocument::new("Apple reports record profit").title("Apple Q3"),
//!         ])
//!         .await?;
//!
//!     for hit in store.search("Apple profit growth", 5).await? {
//!         println!("{:?}: {:.3}", hit.document.title, hit.distance);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod embeddings;
mod error;
mod flat_index;
mod storage;
mod store;

pub use config::{StoreConfig, DEFAULT_DIMENSION, DEFAULT_INDEX_DIR};
pub use embeddings::{EmbeddingProvider, HashEmbedder, ProviderError};
pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIndex;
pub use store::{SearchHit, VectorStore, INDEX_SCHEMA_VERSION, META_SCHEMA_VERSION};

// Re-export the document type for convenience
pub use newslens_articles::NewsDocument;
