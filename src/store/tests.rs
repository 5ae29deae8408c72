//! Store Integration Tests
//!
//! Exercises MemoryListStore through the ListStore trait.

use chrono::{NaiveDate, Utc};

use crate::domain::{ListItem, ShoppingList, UserId};
use crate::store::{ListPatch, ListStore, MemoryListStore, StoreError};

fn new_list(owner: &str, name: &str) -> ShoppingList {
    ShoppingList::new(
        UserId(owner.to_string()),
        name.to_string(),
        "lidl".to_string(),
        None,
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
    )
}

#[tokio::test]
async fn test_create_and_fetch_scoped_by_owner() {
    let store = MemoryListStore::new();

    store.create(&new_list("ana", "Semanal")).await.unwrap();
    store.create(&new_list("ana", "Barbacoa")).await.unwrap();
    store.create(&new_list("luis", "Cena")).await.unwrap();

    let ana = store.fetch_for_owner(&UserId("ana".to_string())).await.unwrap();
    assert_eq!(ana.len(), 2);
    assert!(ana.iter().all(|l| l.user_id.0 == "ana"));

    let luis = store.fetch_for_owner(&UserId("luis".to_string())).await.unwrap();
    assert_eq!(luis.len(), 1);
}

#[tokio::test]
async fn test_patch_replaces_full_item_collection() {
    let store = MemoryListStore::new();
    let list = new_list("ana", "Semanal");
    let id = store.create(&list).await.unwrap();

    let items = vec![
        ListItem::new("Pan".to_string(), 1.0, "unidad".to_string()),
        ListItem::new("Leche".to_string(), 2.0, "l".to_string()),
    ];
    store.patch(&id, ListPatch::replace_items(items.clone())).await.unwrap();

    // A later whole-collection write overwrites, last writer wins
    store
        .patch(&id, ListPatch::replace_items(vec![items[0].clone()]))
        .await
        .unwrap();

    let fetched = store.fetch_for_owner(&list.user_id).await.unwrap();
    assert_eq!(fetched[0].items.len(), 1);
    assert_eq!(fetched[0].items[0].name, "Pan");
}

#[tokio::test]
async fn test_completion_patch_keeps_invariant() {
    let store = MemoryListStore::new();
    let list = new_list("ana", "Semanal");
    let id = store.create(&list).await.unwrap();

    store
        .patch(&id, ListPatch::completed(12.5, Utc::now()))
        .await
        .unwrap();
    let fetched = store.fetch_for_owner(&list.user_id).await.unwrap();
    assert!(!fetched[0].active);
    assert_eq!(fetched[0].total_cost, Some(12.5));
    assert!(fetched[0].is_consistent());

    store.patch(&id, ListPatch::reactivated()).await.unwrap();
    let fetched = store.fetch_for_owner(&list.user_id).await.unwrap();
    assert!(fetched[0].active);
    assert_eq!(fetched[0].total_cost, None);
    assert_eq!(fetched[0].completed_at, None);
    assert!(fetched[0].is_consistent());
}

#[tokio::test]
async fn test_patch_unknown_id_is_not_found() {
    let store = MemoryListStore::new();
    let missing = crate::domain::ListId("nope".to_string());

    let err = store
        .patch(&missing, ListPatch::reactivated())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let store = MemoryListStore::new();
    let list = new_list("ana", "Semanal");
    let id = store.create(&list).await.unwrap();

    store.delete(&id).await.unwrap();
    let err = store.delete(&id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let fetched = store.fetch_for_owner(&list.user_id).await.unwrap();
    assert!(fetched.is_empty());
}

#[tokio::test]
async fn test_changes_emitted_per_write() {
    let store = MemoryListStore::new();
    let mut rx = store.changes();

    let list = new_list("ana", "Semanal");
    let id = store.create(&list).await.unwrap();
    assert_eq!(rx.recv().await.unwrap().owner.0, "ana");

    store.delete(&id).await.unwrap();
    assert_eq!(rx.recv().await.unwrap().owner.0, "ana");
}
