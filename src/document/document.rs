//! Document identifier helpers

use serde_json::Value;

/// Field name carrying a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Returns the document's identifier, if present and a string.
pub fn doc_id(document: &Value) -> Option<&str> {
    document.get(ID_FIELD)?.as_str()
}
