//! Shopping cart
//!
//! One document per product under `carts/{uid}/items`. Quantities are
//! clamped to at least 1; removing a line is an explicit operation.

use crate::error::{ClientError, ClientResult, StoreError};
use crate::session::Session;
use crate::store::{DocumentStore, collections};
use chrono::Utc;
use serde_json::json;
use shared::document::{DocumentData, to_data};
use shared::models::{CartItem, CartSummary, Product};
use std::sync::Arc;

/// Clamp a requested quantity to the smallest sellable amount
pub fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, u32::MAX as i64) as u32
}

#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn DocumentStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Put a product in the cart. Adding a product already present replaces
    /// its quantity.
    pub async fn add(&self, session: &Session, product: &Product, quantity: i64) -> ClientResult<CartItem> {
        let user = session.require_user("add items to cart")?;
        let item = CartItem::from_product(product, clamp_quantity(quantity), Utc::now());
        let collection = collections::cart_items(&user.uid);

        let data = to_data(&item).map_err(|e| StoreError::malformed(&collection, e))?;
        self.store.set(&collection, &product.id, data, true).await?;

        tracing::info!(uid = %user.uid, product = %product.id, quantity = item.quantity, "Added to cart");
        Ok(item)
    }

    /// Cart lines, oldest addition first
    pub async fn items(&self, session: &Session) -> ClientResult<Vec<CartItem>> {
        let user = session.require_user("view your cart")?;
        let collection = collections::cart_items(&user.uid);
        let docs = self.store.query(&collection, &[]).await?;

        let mut items = docs
            .iter()
            .map(|doc| doc.decode::<CartItem>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::malformed(&collection, e))?;
        items.sort_by(|a, b| a.added_at.cmp(&b.added_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Total units, for the navbar badge. Signed-out visitors have 0.
    pub async fn count(&self, session: &Session) -> ClientResult<u32> {
        if !session.is_authenticated() {
            return Ok(0);
        }
        Ok(CartSummary::item_count(&self.items(session).await?))
    }

    pub async fn summary(&self, session: &Session) -> ClientResult<CartSummary> {
        Ok(CartSummary::from_items(&self.items(session).await?))
    }

    /// Set a line's quantity (clamped to at least 1)
    pub async fn update_quantity(&self, session: &Session, product_id: &str, quantity: i64) -> ClientResult<u32> {
        let user = session.require_user("update your cart")?;
        let collection = collections::cart_items(&user.uid);
        let quantity = clamp_quantity(quantity);

        let mut data = DocumentData::new();
        data.insert("quantity".into(), json!(quantity));
        match self.store.update(&collection, product_id, data).await {
            Ok(()) => Ok(quantity),
            Err(StoreError::NotFound(_)) => Err(ClientError::NotFound(format!("cart item {product_id}"))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn increment(&self, session: &Session, product_id: &str) -> ClientResult<u32> {
        let current = self.quantity_of(session, product_id).await?;
        self.update_quantity(session, product_id, current as i64 + 1).await
    }

    /// Never drops below 1
    pub async fn decrement(&self, session: &Session, product_id: &str) -> ClientResult<u32> {
        let current = self.quantity_of(session, product_id).await?;
        self.update_quantity(session, product_id, current as i64 - 1).await
    }

    pub async fn remove(&self, session: &Session, product_id: &str) -> ClientResult<()> {
        let user = session.require_user("update your cart")?;
        self.store
            .delete(&collections::cart_items(&user.uid), product_id)
            .await?;
        Ok(())
    }

    /// Delete every line
    pub async fn clear(&self, session: &Session) -> ClientResult<()> {
        let user = session.require_user("update your cart")?;
        let collection = collections::cart_items(&user.uid);
        let docs = self.store.query(&collection, &[]).await?;
        let deletes = docs.iter().map(|doc| self.store.delete(&collection, &doc.id));
        futures::future::try_join_all(deletes).await?;
        Ok(())
    }

    async fn quantity_of(&self, session: &Session, product_id: &str) -> ClientResult<u32> {
        let user = session.require_user("update your cart")?;
        let collection = collections::cart_items(&user.uid);
        let doc = self
            .store
            .get(&collection, product_id)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("cart item {product_id}")))?;
        let item: CartItem = doc.decode().map_err(|e| StoreError::malformed(&collection, e))?;
        Ok(item.quantity)
    }
}
