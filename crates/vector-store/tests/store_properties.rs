//! End-to-end properties of the persisted store: durability round-trips,
//! ordering guarantees, and all-or-nothing batch behavior.

use async_trait::async_trait;
use newslens_vector_store::{
    EmbeddingProvider, NewsDocument, ProviderError, SearchHit, StoreConfig, VectorStore,
    VectorStoreError,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

/// Maps exact texts to fixed vectors; unknown texts are a provider error.
struct CannedEmbedder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl CannedEmbedder {
    fn new(dimension: usize, entries: &[(&str, &[f32])]) -> Self {
        let vectors = entries
            .iter()
            .map(|(text, vector)| ((*text).to_string(), vector.to_vec()))
            .collect();
        Self { dimension, vectors }
    }
}

#[async_trait]
impl EmbeddingProvider for CannedEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .ok_or_else(|| ProviderError::new(format!("no canned vector for '{text}'")))
            })
            .collect()
    }
}

/// Embeds everything as a constant vector, except one trigger text that
/// fails the whole call.
struct TrippingEmbedder {
    dimension: usize,
    trigger: String,
}

#[async_trait]
impl EmbeddingProvider for TrippingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        if texts.iter().any(|text| *text == self.trigger) {
            return Err(ProviderError::new("simulated provider outage"));
        }
        Ok(texts.iter().map(|_| vec![0.0; self.dimension]).collect())
    }
}

fn titles(hits: &[SearchHit]) -> Vec<Option<String>> {
    hits.iter().map(|hit| hit.document.title.clone()).collect()
}

fn scenario_provider() -> Arc<CannedEmbedder> {
    Arc::new(CannedEmbedder::new(
        2,
        &[
            ("Apple reports record profit", &[1.0, 0.0]),
            ("Apple faces antitrust suit", &[0.0, 1.0]),
            ("Apple profit growth", &[0.9, 0.1]),
        ],
    ))
}

#[tokio::test]
async fn round_trip_reproduces_search_results() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);

    let mut store = VectorStore::open(config.clone(), scenario_provider())
        .await
        .unwrap();
    store
        .add_documents(vec![
            NewsDocument::new("Apple reports record profit").title("profit"),
            NewsDocument::new("Apple faces antitrust suit").title("antitrust"),
        ])
        .await
        .unwrap();

    let before = store.search("Apple profit growth", 5).await.unwrap();

    let reopened = VectorStore::open(config, scenario_provider()).await.unwrap();
    let after = reopened.search("Apple profit growth", 5).await.unwrap();

    assert_eq!(titles(&before), titles(&after));
    let docs_before: Vec<&NewsDocument> = before.iter().map(|h| &h.document).collect();
    let docs_after: Vec<&NewsDocument> = after.iter().map(|h| &h.document).collect();
    assert_eq!(docs_before, docs_after);
}

#[tokio::test]
async fn identical_documents_return_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);
    let provider = Arc::new(CannedEmbedder::new(
        2,
        &[("same story", &[0.5, 0.5]), ("probe", &[0.4, 0.6])],
    ));

    let mut store = VectorStore::open(config, provider).await.unwrap();
    store
        .add_documents(vec![
            NewsDocument::new("same story").title("first"),
            NewsDocument::new("same story").title("second"),
            NewsDocument::new("same story").title("third"),
        ])
        .await
        .unwrap();

    let hits = store.search("probe", 3).await.unwrap();
    assert_eq!(
        titles(&hits),
        vec![
            Some("first".to_string()),
            Some("second".to_string()),
            Some("third".to_string()),
        ]
    );
}

#[tokio::test]
async fn wrong_dimension_embedding_rejected_without_mutation() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);
    let provider = Arc::new(CannedEmbedder::new(2, &[("oversized", &[1.0, 0.0, 0.0])]));

    let mut store = VectorStore::open(config.clone(), provider.clone())
        .await
        .unwrap();
    let result = store
        .add_documents(vec![NewsDocument::new("oversized")])
        .await;

    assert!(matches!(
        result,
        Err(VectorStoreError::InvalidDimension {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(store.len(), 0);

    // The rejected document must be absent from durable state too.
    let reopened = VectorStore::open(config, provider).await.unwrap();
    assert_eq!(reopened.len(), 0);
}

#[tokio::test]
async fn empty_store_search_returns_empty() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);
    let store = VectorStore::open(config, scenario_provider()).await.unwrap();

    let hits = store.search("Apple profit growth", 5).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn k_larger_than_corpus_returns_everything_nearest_first() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);
    let provider = Arc::new(CannedEmbedder::new(
        2,
        &[
            ("near", &[0.9, 0.1]),
            ("middle", &[0.5, 0.5]),
            ("far", &[0.0, 1.0]),
            ("query text", &[1.0, 0.0]),
        ],
    ));

    let mut store = VectorStore::open(config, provider).await.unwrap();
    store
        .add_documents(vec![
            NewsDocument::new("far").title("far"),
            NewsDocument::new("near").title("near"),
            NewsDocument::new("middle").title("middle"),
        ])
        .await
        .unwrap();

    let hits = store.search("query text", 10).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(
        titles(&hits),
        vec![
            Some("near".to_string()),
            Some("middle".to_string()),
            Some("far".to_string()),
        ]
    );
    assert!(hits[0].distance <= hits[1].distance);
    assert!(hits[1].distance <= hits[2].distance);
}

#[tokio::test]
async fn failed_batch_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(4);
    let provider = Arc::new(TrippingEmbedder {
        dimension: 4,
        trigger: "third document".to_string(),
    });

    let mut store = VectorStore::open(config.clone(), provider.clone())
        .await
        .unwrap();
    let result = store
        .add_documents(vec![
            NewsDocument::new("first document"),
            NewsDocument::new("second document"),
            NewsDocument::new("third document"),
        ])
        .await;

    assert!(matches!(result, Err(VectorStoreError::Provider(_))));
    assert_eq!(store.len(), 0);

    let reopened = VectorStore::open(config, provider).await.unwrap();
    assert_eq!(reopened.len(), 0);
}

#[tokio::test]
async fn nearest_neighbor_example_scenario() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);

    let mut store = VectorStore::open(config, scenario_provider()).await.unwrap();
    store
        .add_documents(vec![
            NewsDocument::new("Apple reports record profit"),
            NewsDocument::new("Apple faces antitrust suit"),
        ])
        .await
        .unwrap();

    let hits = store.search("Apple profit growth", 1).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.content, "Apple reports record profit");
    // L2([0.9,0.1] - [1,0]) ≈ 0.141, vs ≈ 1.273 for the other document.
    assert!((hits[0].distance - 0.141_421).abs() < 1e-3);
}

#[tokio::test]
async fn additions_accumulate_across_reopens() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(dir.path()).dimension(2);
    let provider = Arc::new(CannedEmbedder::new(
        2,
        &[("one", &[1.0, 0.0]), ("two", &[0.0, 1.0])],
    ));

    let mut store = VectorStore::open(config.clone(), provider.clone())
        .await
        .unwrap();
    store
        .add_documents(vec![NewsDocument::new("one")])
        .await
        .unwrap();
    drop(store);

    let mut store = VectorStore::open(config.clone(), provider.clone())
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
    store
        .add_documents(vec![NewsDocument::new("two")])
        .await
        .unwrap();
    drop(store);

    let store = VectorStore::open(config, provider).await.unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.documents()[0].content, "one");
    assert_eq!(store.documents()[1].content, "two");
}
