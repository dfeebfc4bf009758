//! Wishlist

use crate::error::{ClientResult, StoreError};
use crate::session::Session;
use crate::store::{DocumentStore, collections};
use chrono::Utc;
use shared::document::to_data;
use shared::models::{Product, WishlistItem};
use std::sync::Arc;

#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn DocumentStore>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Save a product; saving it again refreshes the snapshot
    pub async fn add(&self, session: &Session, product: &Product) -> ClientResult<WishlistItem> {
        let user = session.require_user("add items to wishlist")?;
        let collection = collections::wishlist_items(&user.uid);
        let item = WishlistItem::from_product(product, Utc::now());

        let data = to_data(&item).map_err(|e| StoreError::malformed(&collection, e))?;
        self.store.set(&collection, &product.id, data, true).await?;
        Ok(item)
    }

    /// Saved products, most recent first
    pub async fn items(&self, session: &Session) -> ClientResult<Vec<WishlistItem>> {
        let user = session.require_user("view your wishlist")?;
        let collection = collections::wishlist_items(&user.uid);
        let docs = self.store.query(&collection, &[]).await?;

        let mut items = docs
            .iter()
            .map(|doc| doc.decode::<WishlistItem>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::malformed(&collection, e))?;
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    pub async fn contains(&self, session: &Session, product_id: &str) -> ClientResult<bool> {
        let user = session.require_user("view your wishlist")?;
        let doc = self
            .store
            .get(&collections::wishlist_items(&user.uid), product_id)
            .await?;
        Ok(doc.is_some())
    }

    pub async fn remove(&self, session: &Session, product_id: &str) -> ClientResult<()> {
        let user = session.require_user("update your wishlist")?;
        self.store
            .delete(&collections::wishlist_items(&user.uid), product_id)
            .await?;
        Ok(())
    }
}
