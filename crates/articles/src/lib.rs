//! # NewsLens Articles
//!
//! The document data model shared by the NewsLens crates.
//!
//! A [`NewsDocument`] is one piece of retrievable text: its `content` is
//! what gets embedded, the well-known fields (title, source, url,
//! published_at) describe where it came from, and the `extra` map carries
//! any additional upstream fields opaquely. Consumers that index or rank
//! documents never need to inspect `extra`; they store it and hand it
//! back.
//!
//! ## Example
//!
//! ```rust
//! use newslens_articles::NewsDocument;
//!
//! let doc = NewsDocument::new("Apple reports record profit")
//!     .title("Apple Q3 earnings")
//!     .source("example.com")
//!     .url("https://example.com/apple-q3");
//!
//! assert_eq!(doc.title.as_deref(), Some("Apple Q3 earnings"));
//! ```

mod types;

pub use types::NewsDocument;
