//! In-memory product information cache.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use inapp_core::Information;

/// Concurrency-safe mapping from product identifier to [`Information`].
///
/// Cheap to clone and safe to share between the fetch worker (writer) and
/// query callers (readers). A completed fetch replaces the whole map in one
/// swap, so readers only ever observe a complete generation, never a
/// partially repopulated one.
#[derive(Debug, Clone, Default)]
pub struct InformationCache {
    entries: Arc<RwLock<HashMap<String, Information>>>,
}

impl InformationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one identifier; the unavailable sentinel when absent.
    pub fn get(&self, identifier: &str) -> Information {
        let entries = self.entries.read().expect("information cache lock poisoned");
        entries
            .get(identifier)
            .cloned()
            .unwrap_or_else(Information::unavailable)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("information cache lock poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("information cache lock poisoned").len()
    }

    /// Swap in a freshly fetched generation atomically.
    pub fn replace(&self, entries: HashMap<String, Information>) {
        let mut guard = self.entries.write().expect("information cache lock poisoned");
        *guard = entries;
    }

    /// Drop every entry (dispose path).
    pub fn clear(&self) {
        let mut guard = self.entries.write().expect("information cache lock poisoned");
        guard.clear();
    }
}
