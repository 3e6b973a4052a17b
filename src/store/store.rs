//! In-memory document store

use std::collections::HashMap;

use serde_json::Value;

use super::collection::Collection;
use super::errors::StoreResult;

/// A set of named collections held in memory.
///
/// Writes happen during setup; once the store is shared with an engine it
/// is read-only, so concurrent lookups need no locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Collection>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
        }
    }

    /// Inserts a document, creating the collection on first use.
    pub fn insert(&mut self, collection: &str, body: Value) -> StoreResult<String> {
        self.collections
            .entry(collection.to_string())
            .or_insert_with(|| Collection::new(collection))
            .insert(body)
    }

    /// Returns a collection by name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Returns the number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Returns true when the store holds no collections.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_creates_collection() {
        let mut store = MemoryStore::new();
        store.insert("users", json!({"_id": "u1", "name": "Alice"})).unwrap();

        let users = store.collection("users").unwrap();
        assert_eq!(users.len(), 1);
        assert!(store.collection("ghosts").is_none());
    }

    #[test]
    fn test_collections_are_independent() {
        let mut store = MemoryStore::new();
        store.insert("users", json!({"_id": "u1"})).unwrap();
        store.insert("posts", json!({"_id": "p1"})).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.collection("users").unwrap().len(), 1);
        assert_eq!(store.collection("posts").unwrap().len(), 1);
    }
}
