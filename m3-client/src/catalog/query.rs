//! Catalog reads
//!
//! The store makes no ordering promise, so results are always sorted here:
//! newest first, ties broken by id so identical data gives identical order.

use crate::error::{QueryError, StoreError};
use crate::store::{ProductFilter, ProductStore, collections};
use serde::de::DeserializeOwned;
use shared::Document;
use shared::models::{Category, Product};
use std::sync::Arc;

/// Read-only product and category queries
pub struct CatalogQuery<S: ProductStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ProductStore + ?Sized> Clone for CatalogQuery<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ProductStore + ?Sized> CatalogQuery<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Products in `category` (all products for `None`), newest first
    pub async fn fetch(&self, category: Option<&str>) -> Result<Vec<Product>, QueryError> {
        let filter = match category {
            Some(id) => ProductFilter::category(id),
            None => ProductFilter::all(),
        };
        let docs = self.store.query_products(&filter).await?;

        let mut products: Vec<Product> = decode_all(collections::PRODUCTS, &docs)?;
        for product in &products {
            product
                .check()
                .map_err(|reason| QueryError::Malformed(format!("products/{}: {}", product.id, reason)))?;
        }
        sort_newest_first(&mut products);

        tracing::debug!(category = ?category, count = products.len(), "Catalog fetched");
        Ok(products)
    }

    /// One product by id
    pub async fn product(&self, id: &str) -> Result<Product, QueryError> {
        let doc = self
            .store
            .product(id)
            .await?
            .ok_or_else(|| QueryError::NotFound(format!("product {id}")))?;
        let product: Product = decode(collections::PRODUCTS, &doc)?;
        product
            .check()
            .map_err(|reason| QueryError::Malformed(format!("products/{id}: {reason}")))?;
        Ok(product)
    }

    /// All categories by name
    pub async fn categories(&self) -> Result<Vec<Category>, QueryError> {
        let docs = self.store.categories().await?;
        let mut categories: Vec<Category> = decode_all(collections::CATEGORIES, &docs)?;
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(categories)
    }

    /// First `n` categories, for the featured strip
    pub async fn featured(&self, n: usize) -> Result<Vec<Category>, QueryError> {
        let mut categories = self.categories().await?;
        categories.truncate(n);
        Ok(categories)
    }
}

/// Newest first; equal timestamps ordered by id
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn decode<T: DeserializeOwned>(collection: &str, doc: &Document) -> Result<T, QueryError> {
    doc.decode()
        .map_err(|e| QueryError::from(StoreError::malformed(collection, e)))
}

fn decode_all<T: DeserializeOwned>(collection: &str, docs: &[Document]) -> Result<Vec<T>, QueryError> {
    docs.iter().map(|doc| decode(collection, doc)).collect()
}
