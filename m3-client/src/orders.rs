//! Order history

use crate::error::{ClientError, ClientResult, StoreError};
use crate::session::Session;
use crate::store::{DocumentStore, collections};
use shared::FieldFilter;
use shared::models::Order;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn DocumentStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The user's orders, newest first
    pub async fn history(&self, session: &Session) -> ClientResult<Vec<Order>> {
        let user = session.require_user("view your orders")?;
        let docs = self
            .store
            .query(collections::ORDERS, &[FieldFilter::equals("userId", user.uid.as_str())])
            .await?;

        let mut orders = docs
            .iter()
            .map(|doc| doc.decode::<Order>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::malformed(collections::ORDERS, e))?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// One order; other users' orders are reported as missing
    pub async fn get(&self, session: &Session, order_id: &str) -> ClientResult<Order> {
        let user = session.require_user("view your orders")?;
        let not_found = || ClientError::NotFound(format!("order {order_id}"));

        let doc = self
            .store
            .get(collections::ORDERS, order_id)
            .await?
            .ok_or_else(not_found)?;
        let order: Order = doc
            .decode()
            .map_err(|e| StoreError::malformed(collections::ORDERS, e))?;
        if order.user_id != user.uid {
            return Err(not_found());
        }
        Ok(order)
    }
}
