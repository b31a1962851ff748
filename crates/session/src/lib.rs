//! # NewsLens Session
//!
//! Session-scoped coordination state shared by dashboard collaborators.
//!
//! [`SessionMemory`] replaces ambient global state with an explicitly
//! constructed object: the process owner creates one at startup, passes
//! it to whichever components need it, and drops it at teardown. Nothing
//! in this crate reaches for a global.
//!
//! ## Example
//!
//! ```rust
//! use newslens_session::SessionMemory;
//!
//! let mut memory = SessionMemory::new();
//! memory.set("selected_topic", serde_json::json!("semiconductors"));
//!
//! assert_eq!(
//!     memory.get("selected_topic"),
//!     Some(&serde_json::json!("semiconductors"))
//! );
//! ```

mod memory;

pub use memory::{MemoryStatus, SessionMemory};
