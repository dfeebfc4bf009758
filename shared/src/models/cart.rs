//! Cart Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Cart line: product snapshot plus quantity, keyed by product id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id (also the cart document id)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
            added_at,
        }
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order summary shown next to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Standard shipping and tax are both free.
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let shipping = Decimal::ZERO;
        let tax = Decimal::ZERO;
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Total units across all lines
    pub fn item_count(items: &[CartItem]) -> u32 {
        items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: None,
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_uses_exact_decimal_math() {
        // 0.1 * 3 + 0.2 must be exactly 0.5
        let items = vec![
            item("a", Decimal::new(1, 1), 3),
            item("b", Decimal::new(2, 1), 1),
        ];
        let summary = CartSummary::from_items(&items);
        assert_eq!(summary.subtotal, Decimal::new(5, 1));
        assert_eq!(summary.total, summary.subtotal);
        assert_eq!(CartSummary::item_count(&items), 4);
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = CartSummary::from_items(&[]);
        assert_eq!(summary.total, Decimal::ZERO);
    }
}
