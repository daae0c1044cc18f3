use super::*;
use serde_json::json;

use crate::test_support::{MockBackend, logged_in_harness};

fn milk() -> Product {
    Product { id: 7, name: "Milk".to_owned() }
}

fn bread() -> Product {
    Product { id: 8, name: "Bread".to_owned() }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_list_is_empty_with_blank_draft() {
    let list = ProductList::new();
    assert!(list.products.is_empty());
    assert_eq!(list.draft, Product::draft());
}

#[test]
fn set_draft_name_keeps_draft_id() {
    let mut list = ProductList::new();
    list.set_draft_name("Café");
    assert_eq!(list.draft, Product { id: 0, name: "Café".to_owned() });
}

// =============================================================
// load
// =============================================================

#[tokio::test]
async fn load_replaces_products() {
    let backend = MockBackend::start(&[("GET", "/products/all", 200, json!([{ "id": 7, "name": "Milk" }]))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![bread()], draft: Product::draft() };
    list.load(&client).await.unwrap();
    assert_eq!(list.products, vec![milk()]);
}

#[tokio::test]
async fn load_failure_keeps_previous_products() {
    let backend = MockBackend::start(&[("GET", "/products/all", 500, json!({ "error": "boom" }))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![bread()], draft: Product::draft() };
    assert!(list.load(&client).await.is_err());
    assert_eq!(list.products, vec![bread()]);
}

#[tokio::test]
async fn refresh_failure_is_swallowed() {
    let backend = MockBackend::start(&[("GET", "/products/all", 500, json!({ "error": "boom" }))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![bread()], draft: Product::draft() };
    assert!(!list.refresh(&client).await);
    assert_eq!(list.products, vec![bread()]);
}

// =============================================================
// add
// =============================================================

#[tokio::test]
async fn add_appends_created_product_and_resets_draft() {
    let backend =
        MockBackend::start(&[("POST", "/products/create", 201, json!({ "product": { "id": 7, "name": "Milk" } }))])
            .await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![bread()], draft: Product::draft() };
    list.set_draft_name("Milk");
    let added = list.add(&client).await.unwrap().cloned();

    assert_eq!(added, Some(milk()));
    assert_eq!(list.products, vec![bread(), milk()]);
    assert_eq!(list.draft, Product { id: 0, name: String::new() });
}

#[tokio::test]
async fn add_blank_draft_is_silent_noop() {
    let backend = MockBackend::start(&[]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList::new();
    list.set_draft_name("  ");
    assert_eq!(list.add(&client).await.unwrap(), None);
    assert!(list.products.is_empty());
    assert_eq!(list.draft.name, "  ");
    assert!(backend.seen().is_empty());
}

#[tokio::test]
async fn add_failure_keeps_draft_for_retry() {
    let backend = MockBackend::start(&[("POST", "/products/create", 403, json!({ "error": "forbidden" }))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList::new();
    list.set_draft_name("Milk");
    assert!(list.add(&client).await.is_err());
    assert!(list.products.is_empty());
    assert_eq!(list.draft.name, "Milk");
}

// =============================================================
// remove
// =============================================================

#[tokio::test]
async fn remove_confirmed_drops_only_that_id() {
    let backend = MockBackend::start(&[("DELETE", "/products/delete/7", 200, json!({ "message": "ok" }))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![milk(), bread()], draft: Product::draft() };
    let removed = list
        .remove(&client, 7, |id, product| {
            assert_eq!(id, 7);
            assert_eq!(product, Some(&milk()));
            true
        })
        .await
        .unwrap();

    assert!(removed);
    assert_eq!(list.products, vec![bread()]);
}

#[tokio::test]
async fn remove_declined_sends_nothing() {
    let backend = MockBackend::start(&[]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![milk()], draft: Product::draft() };
    assert!(!list.remove(&client, 7, |_, _| false).await.unwrap());
    assert_eq!(list.products, vec![milk()]);
    assert!(backend.seen().is_empty());
}

#[tokio::test]
async fn remove_failure_keeps_product() {
    let backend = MockBackend::start(&[("DELETE", "/products/delete/7", 500, json!({ "error": "boom" }))]).await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList { products: vec![milk(), bread()], draft: Product::draft() };
    assert!(list.remove(&client, 7, |_, _| true).await.is_err());
    assert_eq!(list.products, vec![milk(), bread()]);
}

#[tokio::test]
async fn remove_proceeds_after_failed_refresh() {
    let backend = MockBackend::start(&[
        ("GET", "/products/all", 500, json!({ "error": "boom" })),
        ("DELETE", "/products/delete/7", 200, json!({ "message": "ok" })),
    ])
    .await;
    let h = logged_in_harness("tok");
    let client = ProductClient::new(backend.api(&h.session));

    let mut list = ProductList::new();
    assert!(!list.refresh(&client).await);
    let removed = list
        .remove(&client, 7, |id, product| {
            assert_eq!(id, 7);
            assert_eq!(product, None);
            true
        })
        .await
        .unwrap();

    assert!(removed);
    let paths: Vec<_> = backend.seen().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/products/all", "/products/delete/7"]);
}
