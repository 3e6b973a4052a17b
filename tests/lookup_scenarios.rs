//! End-to-end lookup scenarios
//!
//! Exercises the full path: wire expression -> compiled pipeline -> one
//! engine call -> reconciled documents, over a users/categories/posts
//! fixture.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use aerojoin::document::SchemaConstructor;
use aerojoin::executor::MemoryEngine;
use aerojoin::lookup::LookupClient;
use aerojoin::schema::{CollectionSchema, FieldDef, SchemaRegistry};
use aerojoin::store::MemoryStore;

// =============================================================================
// Fixture
// =============================================================================

fn registry() -> SchemaRegistry {
    let mut users = HashMap::new();
    users.insert("name".to_string(), FieldDef::required_string());

    let mut categories = HashMap::new();
    categories.insert("name".to_string(), FieldDef::required_string());

    let mut posts = HashMap::new();
    posts.insert("title".to_string(), FieldDef::required_string());
    posts.insert("author".to_string(), FieldDef::reference("users"));
    posts.insert(
        "categories".to_string(),
        FieldDef::reference_list("categories"),
    );

    let mut registry = SchemaRegistry::new();
    registry
        .register(CollectionSchema::new("users", users))
        .unwrap();
    registry
        .register(CollectionSchema::new("categories", categories))
        .unwrap();
    registry
        .register(CollectionSchema::new("posts", posts))
        .unwrap();
    registry
}

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();

    for (id, name) in [
        ("u1", "Jed Watson"),
        ("u2", "Jess Telford"),
        ("u3", "Boris Bozic"),
    ] {
        store
            .insert("users", json!({"_id": id, "name": name}))
            .unwrap();
    }

    for (id, name) in [
        ("c1", "React"),
        ("c2", "GraphQL"),
        ("c3", "node"),
        ("c4", "frontend"),
    ] {
        store
            .insert("categories", json!({"_id": id, "name": name}))
            .unwrap();
    }

    let posts = [
        ("p1", "Something", "u1", vec!["c1"]),
        ("p2", "An Article", "u1", vec!["c1", "c2"]),
        ("p3", "And another thing!", "u2", vec!["c2", "c3"]),
        ("p4", "Oh hi there...", "u3", vec!["c3", "c4"]),
    ];
    for (id, title, author, categories) in posts {
        store
            .insert(
                "posts",
                json!({"_id": id, "title": title, "author": author, "categories": categories}),
            )
            .unwrap();
    }

    store
}

fn client() -> LookupClient {
    let registry = Arc::new(registry());
    let engine = MemoryEngine::new(Arc::new(store()));
    LookupClient::new(registry.clone(), Arc::new(engine))
        .with_constructor(Arc::new(SchemaConstructor::new(registry)))
}

fn ids(documents: &[Value]) -> Vec<&str> {
    documents
        .iter()
        .map(|d| d["_id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Singular References
// =============================================================================

/// A singular lookup embeds the matched author and leaves other reference
/// fields untouched.
#[tokio::test]
async fn test_singular_lookup_embeds_author() {
    let out = client()
        .lookup(
            "posts",
            &json!({"path": "author", "query": {"name": {"matches": "(?i)jess"}}}),
        )
        .await
        .unwrap();

    assert_eq!(ids(&out), vec!["p3"]);

    let post = &out[0];
    assert_eq!(post["author"]["_id"], "u2");
    assert_eq!(post["author"]["name"], "Jess Telford");
    // Categories stay raw identifiers
    assert_eq!(post["categories"], json!(["c2", "c3"]));
    // Join artifacts are gone
    assert!(post.get("author__matched").is_none());
}

/// The embedded document's id round-trips to the pre-lookup raw identifier.
#[tokio::test]
async fn test_singular_round_trip_identity() {
    let out = client()
        .lookup("posts", &json!({"path": "author", "query": {}}))
        .await
        .unwrap();

    assert_eq!(out.len(), 4);
    let expected = ["u1", "u1", "u2", "u3"];
    for (post, raw_id) in out.iter().zip(expected) {
        assert_eq!(post["author"]["_id"], raw_id);
    }
}

// =============================================================================
// Multi-Valued References
// =============================================================================

/// Multi-valued lookup keeps array length and order; unmatched entries stay
/// raw identifiers.
#[tokio::test]
async fn test_multi_valued_lookup_partial_embed() {
    let out = client()
        .lookup(
            "posts",
            &json!({"path": "categories", "query": {"name": {"in": ["React", "GraphQL"]}}}),
        )
        .await
        .unwrap();

    // p4 has neither React nor GraphQL
    assert_eq!(ids(&out), vec!["p1", "p2", "p3"]);

    // p2 referenced [c1, c2], both matched, order preserved
    let p2 = &out[1];
    let categories = p2["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["_id"], "c1");
    assert_eq!(categories[1]["_id"], "c2");

    // p3 referenced [c2, c3]; only c2 matched, c3 stays raw
    let p3 = &out[2];
    let categories = p3["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["_id"], "c2");
    assert_eq!(categories[1], json!("c3"));
}

// =============================================================================
// Composition
// =============================================================================

/// An array is an implicit AND; both relations are reconciled.
#[tokio::test]
async fn test_implicit_and_composes_and_reconciles_both() {
    let out = client()
        .lookup(
            "posts",
            &json!([
                {"path": "categories", "query": {"name": {"in": ["React", "GraphQL"]}}},
                {"path": "author", "query": {"name": {"in": ["Jess Telford"]}}},
            ]),
        )
        .await
        .unwrap();

    assert_eq!(ids(&out), vec!["p3"]);

    let post = &out[0];
    assert_eq!(post["author"]["name"], "Jess Telford");
    let categories = post["categories"].as_array().unwrap();
    assert_eq!(categories[0]["name"], "GraphQL");
    assert_eq!(categories[1], json!("c3"));
    assert!(post.get("author__matched").is_none());
    assert!(post.get("categories__matched").is_none());
}

/// Explicit AND behaves like the implicit form.
#[tokio::test]
async fn test_explicit_and_matches_implicit() {
    let implicit = json!([
        {"path": "categories", "query": {"name": {"in": ["React"]}}},
        {"path": "author", "query": {}},
    ]);
    let explicit = json!({"AND": [
        {"path": "categories", "query": {"name": {"in": ["React"]}}},
        {"path": "author", "query": {}},
    ]});

    let client = client();
    let a = client.lookup("posts", &implicit).await.unwrap();
    let b = client.lookup("posts", &explicit).await.unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Empty and Error Outcomes
// =============================================================================

/// A leaf matching nothing empties the result set without erroring.
#[tokio::test]
async fn test_no_match_returns_empty() {
    let out = client()
        .lookup("posts", &json!({"path": "author", "query": {"name": "Nobody"}}))
        .await
        .unwrap();
    assert!(out.is_empty());
}

/// OR is declared but unsupported.
#[tokio::test]
async fn test_or_reports_unsupported() {
    let err = client()
        .lookup(
            "posts",
            &json!({"OR": [
                {"path": "author", "query": {"name": "Jed Watson"}},
            ]}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AERO_JOIN_UNSUPPORTED_COMBINATOR");
}

/// Mixing AND and OR on one node fails before anything touches the store.
#[tokio::test]
async fn test_conflicting_combinators_rejected() {
    let err = client()
        .lookup(
            "posts",
            &json!({
                "AND": [{"path": "author", "query": {}}],
                "OR": [{"path": "categories", "query": {}}],
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AERO_EXPR_CONFLICTING_COMBINATORS");
}

/// The `every` modifier is declared but unsupported.
#[tokio::test]
async fn test_every_modifier_reports_unsupported() {
    let err = client()
        .lookup(
            "posts",
            &json!({"path": "categories", "query": {}, "modifiers": {"every": true}}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AERO_JOIN_UNSUPPORTED_MODIFIER");
}

/// A leaf naming an undeclared field fails before execution.
#[tokio::test]
async fn test_unknown_field_rejected() {
    let err = client()
        .lookup("posts", &json!({"path": "writer", "query": {}}))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AERO_UNKNOWN_RELATION");
}

/// A leaf naming a non-reference field fails before execution.
#[tokio::test]
async fn test_non_reference_field_rejected() {
    let err = client()
        .lookup("posts", &json!({"path": "title", "query": {}}))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "AERO_NOT_A_REFERENCE");
}
