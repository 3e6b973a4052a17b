//! A named, ordered set of documents

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::document::{doc_id, ID_FIELD};

use super::errors::{StoreError, StoreResult};

/// One collection of documents, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    documents: Vec<Value>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a document and returns its identifier.
    ///
    /// A caller-supplied string `_id` is honored (useful for fixtures);
    /// otherwise one is generated. `created_at`/`updated_at` are stamped
    /// when absent.
    pub fn insert(&mut self, body: Value) -> StoreResult<String> {
        let mut body = body;
        let obj = body.as_object_mut().ok_or_else(|| StoreError::NotAnObject {
            collection: self.name.clone(),
        })?;

        let id = match obj.get(ID_FIELD) {
            None => {
                let id = Uuid::new_v4().to_string();
                obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(StoreError::InvalidId {
                    collection: self.name.clone(),
                })
            }
        };

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        obj.entry("created_at")
            .or_insert_with(|| Value::String(now.clone()));
        obj.entry("updated_at").or_insert_with(|| Value::String(now));

        self.documents.push(body);
        Ok(id)
    }

    /// Returns a document by identifier.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.documents.iter().find(|doc| doc_id(doc) == Some(id))
    }

    /// Returns all documents in insertion order.
    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true when the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_generates_id_and_timestamps() {
        let mut users = Collection::new("users");
        let id = users.insert(json!({"name": "Alice"})).unwrap();

        let doc = users.get(&id).unwrap();
        assert_eq!(doc["name"], "Alice");
        assert!(doc["created_at"].is_string());
        assert!(doc["updated_at"].is_string());
    }

    #[test]
    fn test_insert_honors_supplied_id() {
        let mut users = Collection::new("users");
        let id = users.insert(json!({"_id": "u1", "name": "Alice"})).unwrap();
        assert_eq!(id, "u1");
        assert!(users.get("u1").is_some());
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let mut users = Collection::new("users");
        assert!(users.insert(json!("Alice")).is_err());
    }

    #[test]
    fn test_insert_rejects_non_string_id() {
        let mut users = Collection::new("users");
        assert!(users.insert(json!({"_id": 1, "name": "Alice"})).is_err());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut users = Collection::new("users");
        users.insert(json!({"_id": "u1"})).unwrap();
        users.insert(json!({"_id": "u2"})).unwrap();
        users.insert(json!({"_id": "u3"})).unwrap();

        let ids: Vec<_> = users
            .documents()
            .iter()
            .map(|d| d["_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }
}
