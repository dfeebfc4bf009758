// m3-client/tests/catalog_view_model.rs
// Catalog grid: selection races, resize, failures

use async_trait::async_trait;
use m3_client::catalog::ViewportSignal;
use m3_client::{
    CatalogConfig, CatalogViewModel, FetchOutcome, MemoryStore, ProductFilter, ProductStore,
    QueryError, StoreResult,
};
use parking_lot::Mutex;
use serde_json::json;
use shared::Document;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

fn seed(store: &MemoryStore, category: &str, count: usize) {
    for i in 0..count {
        store.insert_json(
            "products",
            &format!("{category}-{i:02}"),
            json!({
                "name": format!("{category} {i}"),
                "price": 25000,
                "category": category,
                "createdAt": format!("2024-02-01T10:{:02}:00Z", i),
            }),
        );
    }
}

/// Product store whose queries for a category block until released
struct GatedStore {
    inner: Arc<MemoryStore>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedStore {
    fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, category: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(category.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ProductStore for GatedStore {
    async fn query_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Document>> {
        let gate = filter
            .category_equals
            .as_ref()
            .and_then(|c| self.gates.lock().remove(c));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.query_products(filter).await
    }

    async fn product(&self, id: &str) -> StoreResult<Option<Document>> {
        self.inner.product(id).await
    }

    async fn categories(&self) -> StoreResult<Vec<Document>> {
        self.inner.categories().await
    }
}

#[tokio::test]
async fn test_latest_selection_wins() {
    let memory = Arc::new(MemoryStore::new());
    seed(&memory, "hats", 3);
    seed(&memory, "shoes", 5);
    let store = Arc::new(GatedStore::new(Arc::clone(&memory)));
    let release_hats = store.gate("hats");

    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 1024);

    let (hats, shoes) = tokio::join!(vm.select_category(Some("hats")), async {
        // hats is in flight: nothing from any category is on screen
        assert!(vm.loading());
        assert!(vm.current_page_items().is_empty());

        let outcome = vm.select_category(Some("shoes")).await;
        let _ = release_hats.send(());
        outcome
    });

    assert_eq!(shoes, FetchOutcome::Applied);
    assert_eq!(hats, FetchOutcome::Superseded);

    let snap = vm.snapshot();
    assert_eq!(snap.selected_category.as_deref(), Some("shoes"));
    assert_eq!(snap.items.len(), 5);
    assert!(snap.items.iter().all(|p| p.category.as_deref() == Some("shoes")));
    assert!(!snap.loading);
}

#[tokio::test]
async fn test_reselecting_active_category_does_not_refetch() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, "shoes", 4);
    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 1024);

    assert_eq!(vm.select_category(Some("shoes")).await, FetchOutcome::Applied);
    let fetched = store.query_count();

    assert_eq!(vm.select_category(Some("shoes")).await, FetchOutcome::Unchanged);
    assert_eq!(store.query_count(), fetched);
    assert_eq!(vm.current_page_items().len(), 4);
}

#[tokio::test]
async fn test_resize_clamps_page_without_refetch() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, "jerseys", 12);
    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 375);
    vm.mount().await;

    assert_eq!(vm.page_size(), 10);
    assert_eq!(vm.total_pages(), 2);
    assert_eq!(vm.go_to_page(2), 2);
    assert_eq!(vm.current_page_items().len(), 2);
    let fetched = store.query_count();

    vm.resize(1024);
    assert_eq!(vm.page_size(), 12);
    assert_eq!(vm.total_pages(), 1);
    assert_eq!(vm.current_page(), 1);
    assert_eq!(vm.current_page_items().len(), 12);
    assert_eq!(store.query_count(), fetched);
}

#[tokio::test]
async fn test_empty_catalog() {
    let vm = CatalogViewModel::new(Arc::new(MemoryStore::new()), CatalogConfig::default(), 1024);
    assert_eq!(vm.mount().await, FetchOutcome::Applied);

    let snap = vm.snapshot();
    assert!(snap.items.is_empty());
    assert_eq!(snap.total_pages, 1);
    assert_eq!(snap.current_page, 1);
    assert_eq!(vm.go_to_page(5), 1);
}

#[tokio::test]
async fn test_fetch_failure_then_retry() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, "bags", 3);
    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 1024);

    store.fail_next(1);
    assert_eq!(vm.select_category(Some("bags")).await, FetchOutcome::Failed);

    let snap = vm.snapshot();
    assert!(matches!(snap.error, Some(QueryError::Unreachable(_))));
    assert!(snap.items.is_empty());
    assert!(!snap.loading);

    // same category again retries after a failure
    assert_eq!(vm.select_category(Some("bags")).await, FetchOutcome::Applied);
    assert!(vm.error().is_none());
    assert_eq!(vm.current_page_items().len(), 3);
}

#[tokio::test]
async fn test_malformed_record_surfaces_as_error() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, "shoes", 2);
    store.insert_json("products", "broken", json!({ "name": "No price", "category": "shoes" }));
    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 1024);

    assert_eq!(vm.mount().await, FetchOutcome::Failed);
    assert!(matches!(vm.error(), Some(QueryError::Malformed(_))));
    assert!(vm.current_page_items().is_empty());
}

#[tokio::test]
async fn test_follow_viewport_until_signal_closes() {
    let store = Arc::new(MemoryStore::new());
    seed(&store, "shoes", 12);
    let vm = CatalogViewModel::new(Arc::clone(&store), CatalogConfig::default(), 1024);
    vm.mount().await;

    let signal = ViewportSignal::new(1024);
    let subscription = signal.subscribe();
    assert_eq!(signal.subscriber_count(), 1);

    let grid = &vm;
    tokio::join!(vm.follow_viewport(subscription), async move {
        signal.resize(375);
        for _ in 0..50 {
            if grid.page_size() == 10 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(grid.page_size(), 10);
        assert_eq!(grid.total_pages(), 2);
        drop(signal);
    });

    assert_eq!(vm.page_size(), 10);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let signal = ViewportSignal::new(800);
    let first = signal.subscribe();
    let second = signal.subscribe();
    assert_eq!(signal.subscriber_count(), 2);

    drop(first);
    assert_eq!(signal.subscriber_count(), 1);
    assert_eq!(second.width(), 800);
    drop(second);
    assert_eq!(signal.subscriber_count(), 0);
}
