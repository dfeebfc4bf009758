//! Catalog view model
//!
//! Owns the whole grid state behind one lock. Events (fetch resolved,
//! category selected, page navigated, viewport resized) each take the lock
//! once and never hold it across an await, so they apply in the order they
//! arrive. Fetch results are applied only when their ticket is still the
//! latest one issued.

use super::{
    CatalogConfig, CatalogQuery, CategoryFilter, FetchTicket, Paginator, ViewportClassifier,
    ViewportSubscription,
};
use crate::error::QueryError;
use crate::store::ProductStore;
use parking_lot::Mutex;
use shared::models::Product;
use std::sync::Arc;

/// What happened to a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result became the visible state
    Applied,
    /// Fetch failed; error state is visible
    Failed,
    /// A newer selection was issued meanwhile; result dropped
    Superseded,
    /// Category already active, nothing fetched
    Unchanged,
}

/// Everything the grid renders from
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub items: Vec<Product>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub selected_category: Option<String>,
    pub loading: bool,
    pub error: Option<QueryError>,
}

#[derive(Debug)]
struct CatalogState {
    filter: CategoryFilter,
    viewport: ViewportClassifier,
    paginator: Paginator,
    products: Vec<Product>,
    loading: bool,
    error: Option<QueryError>,
}

impl CatalogState {
    /// Enter loading for a new ticket; the previous result is dropped so a
    /// different category's products are never shown under this selection.
    fn begin(&mut self, ticket: FetchTicket) -> FetchTicket {
        self.loading = true;
        self.error = None;
        self.products.clear();
        self.paginator.reset(0);
        ticket
    }
}

pub struct CatalogViewModel<S: ProductStore + ?Sized> {
    query: CatalogQuery<S>,
    state: Mutex<CatalogState>,
}

impl<S: ProductStore + ?Sized> CatalogViewModel<S> {
    /// Create for a window of `width_px`; nothing is fetched until [`mount`](Self::mount)
    pub fn new(store: Arc<S>, config: CatalogConfig, width_px: u32) -> Self {
        let mut viewport = ViewportClassifier::new(config);
        let page_size = viewport.observe(width_px);
        Self {
            query: CatalogQuery::new(store),
            state: Mutex::new(CatalogState {
                filter: CategoryFilter::new(),
                viewport,
                paginator: Paginator::new(page_size),
                products: Vec::new(),
                loading: false,
                error: None,
            }),
        }
    }

    pub fn query(&self) -> &CatalogQuery<S> {
        &self.query
    }

    /// Initial load: every product, page 1
    pub async fn mount(&self) -> FetchOutcome {
        self.refresh().await
    }

    /// Switch category and load it. Re-selecting the active category is a
    /// no-op unless the last fetch failed, in which case it retries.
    pub async fn select_category(&self, category: Option<&str>) -> FetchOutcome {
        let ticket = {
            let mut state = self.state.lock();
            let retry = state.error.is_some() && state.filter.active() == category;
            let ticket = if retry {
                Some(state.filter.refresh())
            } else {
                state.filter.select(category)
            };
            match ticket {
                Some(t) => state.begin(t),
                None => {
                    tracing::debug!(category = ?category, "Category already active");
                    return FetchOutcome::Unchanged;
                }
            }
        };
        self.run(ticket).await
    }

    /// Refetch the active category, superseding anything in flight
    pub async fn refresh(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.state.lock();
            let ticket = state.filter.refresh();
            state.begin(ticket)
        };
        self.run(ticket).await
    }

    async fn run(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.query.fetch(ticket.category.as_deref()).await;

        let mut state = self.state.lock();
        if !state.filter.is_current(&ticket) {
            tracing::debug!(
                generation = ticket.generation,
                latest = state.filter.generation(),
                category = ?ticket.category,
                "Discarding superseded catalog response"
            );
            return FetchOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(products) => {
                tracing::info!(category = ?ticket.category, count = products.len(), "Catalog loaded");
                state.paginator.reset(products.len());
                state.products = products;
                state.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(category = ?ticket.category, error = %err, "Catalog fetch failed");
                state.products.clear();
                state.paginator.reset(0);
                state.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Jump to page `n`, clamped; returns the page now shown
    pub fn go_to_page(&self, n: i64) -> usize {
        self.state.lock().paginator.go_to(n)
    }

    pub fn next_page(&self) -> usize {
        self.state.lock().paginator.next()
    }

    pub fn prev_page(&self) -> usize {
        self.state.lock().paginator.prev()
    }

    /// Apply a width change: re-slice only, no refetch
    pub fn resize(&self, width_px: u32) {
        let mut state = self.state.lock();
        let page_size = state.viewport.observe(width_px);
        if page_size != state.paginator.page_size() {
            state.paginator.set_page_size(page_size);
            tracing::debug!(width_px, page_size, "Catalog density changed");
        }
    }

    /// Apply every width published on `subscription` until its signal closes.
    /// The subscription is released when this returns.
    pub async fn follow_viewport(&self, mut subscription: ViewportSubscription) {
        self.resize(subscription.width());
        while let Some(width) = subscription.changed().await {
            self.resize(width);
        }
        tracing::debug!("Viewport signal closed");
    }

    pub fn current_page_items(&self) -> Vec<Product> {
        let state = self.state.lock();
        state.paginator.slice(&state.products).to_vec()
    }

    pub fn current_page(&self) -> usize {
        self.state.lock().paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.state.lock().paginator.total_pages()
    }

    pub fn page_size(&self) -> usize {
        self.state.lock().paginator.page_size()
    }

    pub fn selected_category(&self) -> Option<String> {
        self.state.lock().filter.active().map(str::to_string)
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn error(&self) -> Option<QueryError> {
        self.state.lock().error.clone()
    }

    /// Consistent view of all render fields at once
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.lock();
        CatalogSnapshot {
            items: state.paginator.slice(&state.products).to_vec(),
            current_page: state.paginator.current_page(),
            total_pages: state.paginator.total_pages(),
            page_size: state.paginator.page_size(),
            selected_category: state.filter.active().map(str::to_string),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn store_with(count: usize, category: &str) -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        for i in 0..count {
            store.insert_json(
                "products",
                &format!("p{i:02}"),
                json!({
                    "name": format!("Item {i}"),
                    "price": 1000,
                    "category": category,
                    "createdAt": format!("2024-01-01T00:{:02}:00Z", i),
                }),
            );
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_mount_loads_first_page() {
        let vm = CatalogViewModel::new(store_with(25, "shoes"), CatalogConfig::default(), 1024);
        assert_eq!(vm.mount().await, FetchOutcome::Applied);

        let snap = vm.snapshot();
        assert_eq!(snap.items.len(), 12);
        assert_eq!(snap.total_pages, 3);
        assert_eq!(snap.current_page, 1);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
        // newest first
        assert_eq!(snap.items[0].id, "p24");
    }

    #[tokio::test]
    async fn test_navigation_clamps() {
        let vm = CatalogViewModel::new(store_with(25, "shoes"), CatalogConfig::default(), 1024);
        vm.mount().await;

        assert_eq!(vm.go_to_page(-3), 1);
        assert_eq!(vm.go_to_page(42), 3);
        assert_eq!(vm.current_page_items().len(), 1);
        assert_eq!(vm.next_page(), 3);
        assert_eq!(vm.prev_page(), 2);
    }

    #[tokio::test]
    async fn test_category_change_resets_page() {
        let vm = CatalogViewModel::new(store_with(25, "shoes"), CatalogConfig::default(), 1024);
        vm.mount().await;
        vm.go_to_page(3);

        assert_eq!(vm.select_category(Some("shoes")).await, FetchOutcome::Applied);
        assert_eq!(vm.current_page(), 1);
        assert_eq!(vm.selected_category().as_deref(), Some("shoes"));
    }
}
