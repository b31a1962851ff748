use serde::Serialize;
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Key/value state for one dashboard session.
///
/// Values are JSON so collaborators with different payload shapes can
/// share one object without the owner inspecting them. Each `set` stamps
/// the key's modification time. The owner constructs the memory, hands
/// out `&`/`&mut` borrows, and tears it down with the session; there is
/// no shared global instance.
#[derive(Debug, Default)]
pub struct SessionMemory {
    values: BTreeMap<String, serde_json::Value>,
    last_modified: BTreeMap<String, SystemTime>,
}

/// Snapshot of what a [`SessionMemory`] currently holds.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemoryStatus {
    pub keys: Vec<String>,
}

impl SessionMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, stamping its modification time.
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        let key = key.into();
        log::debug!("Session memory set '{key}'");
        self.last_modified.insert(key.clone(), SystemTime::now());
        self.values.insert(key, value);
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// When `key` was last written, if it ever was.
    #[must_use]
    pub fn last_modified(&self, key: &str) -> Option<SystemTime> {
        self.last_modified.get(key).copied()
    }

    /// Drop every stored value and timestamp.
    pub fn clear(&mut self) {
        log::debug!("Session memory cleared ({} keys)", self.values.len());
        self.values.clear();
        self.last_modified.clear();
    }

    /// Report the currently populated keys.
    #[must_use]
    pub fn status(&self) -> MemoryStatus {
        MemoryStatus {
            keys: self.values.keys().cloned().collect(),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
