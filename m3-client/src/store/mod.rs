//! Document store collaborators
//!
//! The storefront has no backend of its own: everything is read from and
//! written to a hosted document database. [`DocumentStore`] is the whole
//! surface the client needs; [`ProductStore`] is the narrower read-only view
//! the catalog consumes.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - in-process, with fault injection
//! - [`RestStore`] - HTTP document API

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::StoreResult;
use async_trait::async_trait;
use shared::document::DocumentData;
use shared::{Document, FieldFilter};
use std::sync::Arc;

/// Collection names
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const ORDERS: &str = "orders";
    pub const USERS: &str = "users";
    pub const ADMINS: &str = "admins";

    /// Per-user cart lines
    pub fn cart_items(uid: &str) -> String {
        format!("carts/{uid}/items")
    }

    /// Per-user wishlist entries
    pub fn wishlist_items(uid: &str) -> String {
        format!("wishlists/{uid}/items")
    }
}

/// Hosted document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, `None` if it does not exist
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// All documents matching every equality filter; order is unspecified
    async fn query(&self, collection: &str, filters: &[FieldFilter]) -> StoreResult<Vec<Document>>;

    /// Create or overwrite; with `merge` the fields are merged into an existing document
    async fn set(&self, collection: &str, id: &str, data: DocumentData, merge: bool) -> StoreResult<()>;

    /// Create with a store-assigned id
    async fn add(&self, collection: &str, data: DocumentData) -> StoreResult<String>;

    /// Merge fields into an existing document; fails with `NotFound` if absent
    async fn update(&self, collection: &str, id: &str, data: DocumentData) -> StoreResult<()>;

    /// Delete; deleting a missing document is not an error
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        (**self).get(collection, id).await
    }

    async fn query(&self, collection: &str, filters: &[FieldFilter]) -> StoreResult<Vec<Document>> {
        (**self).query(collection, filters).await
    }

    async fn set(&self, collection: &str, id: &str, data: DocumentData, merge: bool) -> StoreResult<()> {
        (**self).set(collection, id, data, merge).await
    }

    async fn add(&self, collection: &str, data: DocumentData) -> StoreResult<String> {
        (**self).add(collection, data).await
    }

    async fn update(&self, collection: &str, id: &str, data: DocumentData) -> StoreResult<()> {
        (**self).update(collection, id, data).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        (**self).delete(collection, id).await
    }
}

/// Product query filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to one category; `None` returns every product
    pub category_equals: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category_id: impl Into<String>) -> Self {
        Self {
            category_equals: Some(category_id.into()),
        }
    }

    fn to_field_filters(&self) -> Vec<FieldFilter> {
        self.category_equals
            .iter()
            .map(|c| FieldFilter::equals("category", c.as_str()))
            .collect()
    }
}

/// Read-only product and category source used by the catalog
///
/// Rows come back undecoded; shape checking belongs to the caller.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn query_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Document>>;
    async fn product(&self, id: &str) -> StoreResult<Option<Document>>;
    async fn categories(&self) -> StoreResult<Vec<Document>>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> ProductStore for T {
    async fn query_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Document>> {
        self.query(collections::PRODUCTS, &filter.to_field_filters()).await
    }

    async fn product(&self, id: &str) -> StoreResult<Option<Document>> {
        self.get(collections::PRODUCTS, id).await
    }

    async fn categories(&self) -> StoreResult<Vec<Document>> {
        self.query(collections::CATEGORIES, &[]).await
    }
}
