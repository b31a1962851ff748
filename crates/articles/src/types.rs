use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One retrievable piece of news text with its metadata.
///
/// `content` is the text that gets embedded for similarity search. The
/// remaining well-known fields are optional descriptors from the upstream
/// feed. Anything else the feed attaches travels in `extra` and is never
/// interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsDocument {
    /// The raw article text.
    pub content: String,

    /// Headline, if the upstream feed provided one.
    #[serde(default)]
    pub title: Option<String>,

    /// Publisher or domain the article came from.
    #[serde(default)]
    pub source: Option<String>,

    /// Canonical link to the article.
    #[serde(default)]
    pub url: Option<String>,

    /// Publication timestamp as reported upstream, kept verbatim.
    #[serde(default)]
    pub published_at: Option<String>,

    /// Open extension map for upstream fields with no dedicated slot
    /// (analysis results, relevance scores, ticker symbols, ...).
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NewsDocument {
    /// Create a document from its content alone.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
            source: None,
            url: None,
            published_at: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder: set the headline.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set the source.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder: set the article URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder: set the publication timestamp.
    #[must_use]
    pub fn published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Builder: attach an extension field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
