//! Checkout
//!
//! Turns the signed-in user's cart into an order document and empties the
//! cart. The cart is only cleared after the order has been written.

use crate::cart::CartService;
use crate::error::{ClientError, ClientResult, StoreError};
use crate::session::Session;
use crate::store::{DocumentStore, collections};
use chrono::Utc;
use shared::document::to_data;
use shared::models::{CartSummary, Order, OrderStatus, SHIPPING_COUNTRY, ShippingDetails};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<dyn DocumentStore>,
    cart: CartService,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            cart: CartService::new(Arc::clone(&store)),
            store,
        }
    }

    /// Place an order for everything in the cart
    pub async fn place_order(&self, session: &Session, details: ShippingDetails) -> ClientResult<Order> {
        let user = session.require_user("place an order")?;
        details.validate()?;
        if details.country != SHIPPING_COUNTRY {
            return Err(ClientError::Validation(format!(
                "country: shipping is only available to {SHIPPING_COUNTRY}"
            )));
        }

        let items = self.cart.items(session).await?;
        if items.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let now = Utc::now();
        let mut order = Order {
            id: String::new(),
            user_id: user.uid.clone(),
            total: CartSummary::from_items(&items).total,
            items,
            shipping_details: details,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let data = to_data(&order).map_err(|e| StoreError::malformed(collections::ORDERS, e))?;
        order.id = self.store.add(collections::ORDERS, data).await?;
        tracing::info!(uid = %user.uid, order = %order.id, total = %order.total, "Order placed");

        self.cart.clear(session).await?;
        Ok(order)
    }
}
