//! End-to-end tests of the generic document store adapter over the in-memory backend.

use assert_matches::assert_matches;
use bson::{Bson, oid::ObjectId};
use dappdir_core::{
    backend::StoreBackendBuilder,
    document::DocumentExt,
    error::DocumentStoreError,
    query::Filter,
    record::{Comment, Dapp},
    schema::Kind,
    store::DocumentStore,
};
use dappdir_memory::InMemoryStore;
use serde_json::json;

fn store() -> DocumentStore {
    DocumentStore::new(InMemoryStore::new())
}

fn dapp(body: serde_json::Value) -> Dapp {
    Dapp::from_json_validated(&body).expect("valid dapp")
}

#[tokio::test]
async fn created_documents_can_be_read_back() {
    let store = store();
    let id = store
        .create_document(&dapp(json!({ "name": "Foo", "tagline": "Bar" })))
        .await
        .unwrap();

    let stored = store.get_by_id(Kind::Dapp, &id).await.unwrap();

    assert_eq!(stored.get_object_id("_id").unwrap().to_hex(), id);
    assert_eq!(stored.get_str("name").unwrap(), "Foo");
    assert_eq!(stored.get_i64("votes").unwrap(), 0);
    assert!(stored.get_datetime("created_at").is_ok());
    assert_eq!(stored.get("created_at"), stored.get("updated_at"));
    assert_eq!(Dapp::from_document(stored).unwrap().tagline, "Bar");
}

#[tokio::test]
async fn lookups_distinguish_malformed_and_missing_ids() {
    let store = store();

    assert_matches!(
        store.get_by_id(Kind::Dapp, "nope").await,
        Err(DocumentStoreError::InvalidId(_))
    );
    assert_matches!(
        store.get_by_id(Kind::Dapp, &ObjectId::new().to_hex()).await,
        Err(DocumentStoreError::NotFound { collection, .. }) if collection == "dapp"
    );
}

#[tokio::test]
async fn queries_filter_by_category_and_chain() {
    let store = store();
    for body in [
        json!({ "name": "A", "tagline": "t", "category": "DeFi", "chains": ["Ethereum", "Base"] }),
        json!({ "name": "B", "tagline": "t", "category": "DeFi", "chains": ["Solana"] }),
        json!({ "name": "C", "tagline": "t", "category": "NFT", "chains": ["Ethereum"] }),
    ] {
        store.create_document(&dapp(body)).await.unwrap();
    }

    let filter = Filter::eq("category", "DeFi").and(Filter::any_of("chains", ["Ethereum"]));
    let found = store.get_documents(Kind::Dapp, Some(filter), 100).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_str("name").unwrap(), "A");

    let all = store.get_documents(Kind::Dapp, None, 100).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn queries_are_capped_by_limit() {
    let store = store();
    let dapp_id = ObjectId::new().to_hex();
    for n in 0..10 {
        let comment = Comment::from_json_validated(&json!({
            "dapp_id": dapp_id,
            "content": format!("comment {n}"),
        }))
        .unwrap();
        store.create_document(&comment).await.unwrap();
    }

    let found = store
        .get_documents(Kind::Comment, Some(Filter::eq("dapp_id", dapp_id.as_str())), 4)
        .await
        .unwrap();

    assert_eq!(found.len(), 4);
}

#[tokio::test]
async fn querying_an_unknown_collection_is_empty() {
    let found = store().get_documents(Kind::Product, None, 10).await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn sequential_increments_add_up() {
    let store = store();
    let id = store
        .create_document(&dapp(json!({ "name": "Foo", "tagline": "Bar" })))
        .await
        .unwrap();
    let created_at = store.get_by_id(Kind::Dapp, &id).await.unwrap().get_datetime("updated_at").copied().unwrap();

    for _ in 0..5 {
        store.increment_field(Kind::Dapp, &id, "votes", 1).await.unwrap();
    }

    let stored = store.get_by_id(Kind::Dapp, &id).await.unwrap();
    assert_eq!(stored.get("votes"), Some(&Bson::Int64(5)));
    assert!(*stored.get_datetime("updated_at").unwrap() >= created_at);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let store = store();
    let id = store
        .create_document(&dapp(json!({ "name": "Foo", "tagline": "Bar", "votes": 2 })))
        .await
        .unwrap();

    let votes = (0..50).map(|_| {
        let store = store.clone();
        let id = id.clone();
        tokio::spawn(async move { store.increment_field(Kind::Dapp, &id, "votes", 1).await })
    });
    for result in futures::future::join_all(votes).await {
        result.unwrap().unwrap();
    }

    let stored = store.get_by_id(Kind::Dapp, &id).await.unwrap();
    assert_eq!(stored.get("votes"), Some(&Bson::Int64(52)));
}

#[tokio::test]
async fn incrementing_a_missing_document_has_no_side_effects() {
    let store = store();

    assert_matches!(
        store.increment_field(Kind::Dapp, &ObjectId::new().to_hex(), "votes", 1).await,
        Err(DocumentStoreError::NotFound { .. })
    );
    assert_matches!(
        store.increment_field(Kind::Dapp, "bad-id", "votes", 1).await,
        Err(DocumentStoreError::InvalidId(_))
    );
    assert!(store.list_collections().await.unwrap().is_empty());
}

#[tokio::test]
async fn increment_past_i64_max_fails_without_changing_the_count() {
    let store = store();
    let id = store
        .create_document(&dapp(json!({ "name": "Foo", "tagline": "Bar", "votes": i64::MAX })))
        .await
        .unwrap();

    assert_matches!(
        store.increment_field(Kind::Dapp, &id, "votes", 1).await,
        Err(DocumentStoreError::Write(_))
    );

    let stored = store.get_by_id(Kind::Dapp, &id).await.unwrap();
    assert_eq!(stored.get_i64("votes").unwrap(), i64::MAX);
}

#[tokio::test]
async fn collections_are_listed_by_name() {
    let store = store();
    store
        .create_document(&dapp(json!({ "name": "Foo", "tagline": "Bar" })))
        .await
        .unwrap();

    assert_eq!(store.list_collections().await.unwrap(), vec!["dapp".to_string()]);
}

#[tokio::test]
async fn builder_sets_database_name() {
    let backend = InMemoryStore::builder().database_name("dapps").build().await.unwrap();
    let store = DocumentStore::new(backend);

    assert_eq!(store.database_name(), Some("dapps"));
    assert_eq!(DocumentStore::new(InMemoryStore::new()).database_name(), Some("memory"));
}
