//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned document id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URI
    #[serde(default)]
    pub image: String,
    /// Category reference; `None` means uncategorized
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Record-level sanity check applied after decoding
    pub fn check(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("missing id".into());
        }
        if self.price < Decimal::ZERO {
            return Err(format!("price must be non-negative, got {}", self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;
    use serde_json::{Value, json};

    fn doc(body: Value) -> Document {
        let Value::Object(map) = body else { unreachable!() };
        Document::new("p1", map)
    }

    #[test]
    fn test_decode_store_row() {
        let product: Product = doc(json!({
            "name": "Home Jersey",
            "description": "2024 season",
            "price": 45000.5,
            "image": "https://i.ibb.co/x/jersey.png",
            "category": "jerseys",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .decode()
        .unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price, Decimal::new(450005, 1));
        assert_eq!(product.category.as_deref(), Some("jerseys"));
        assert!(product.check().is_ok());
    }

    #[test]
    fn test_uncategorized_and_defaults() {
        let product: Product = doc(json!({
            "name": "Sandals",
            "price": 10,
            "category": null,
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .decode()
        .unwrap();

        assert!(product.category.is_none());
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let product: Product = doc(json!({
            "name": "Broken",
            "price": -1,
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .decode()
        .unwrap();

        assert!(product.check().is_err());
    }

    #[test]
    fn test_missing_created_at_is_malformed() {
        let result = doc(json!({ "name": "Old", "price": 1 })).decode::<Product>();
        assert!(result.is_err());
    }
}
