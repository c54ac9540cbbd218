//! Wire types for the gift API.
//!
//! The backend serializes fields in camelCase; every struct here carries
//! `#[serde(rename_all = "camelCase")]` so the Rust side stays snake_case.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use giftbox_core::{CategoryId, OptionId, OrderId, Price, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A product, read-only from the storefront's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
}

/// A purchasable option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: OptionId,
    pub name: String,
    /// Remaining stock, when the backend reports it.
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Payload for creating an order.
///
/// Sent once, never mutated after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub option_id: OptionId,
    pub quantity: i64,
    pub message: String,
    pub product_id: ProductId,
}

/// A past order as returned by the order-history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderId,
    pub name: String,
    pub price: Price,
    pub quantity: i64,
    pub image_url: String,
    /// Zone-less local datetime, e.g. `2026-07-09T11:55:00`.
    pub order_date_time: NaiveDateTime,
}

/// A wishlist entry.
///
/// The backend exposes the wished product's id as `wishId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub wish_id: ProductId,
}

/// Credentials for login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of the authentication endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{"id":42,"name":"Chocolate Box","price":29000,"imageUrl":"https://img.example.com/42.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(42));
        assert_eq!(product.price, Price::new(29_000));
        assert_eq!(product.image_url, "https://img.example.com/42.jpg");
    }

    #[test]
    fn test_order_request_camel_case() {
        let order = OrderRequest {
            option_id: OptionId::new(7),
            quantity: 2,
            message: "Happy Birthday!".to_string(),
            product_id: ProductId::new(42),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "optionId": 7,
                "quantity": 2,
                "message": "Happy Birthday!",
                "productId": 42,
            })
        );
    }

    #[test]
    fn test_order_item_datetime() {
        let json = r#"{"id":1,"name":"Chocolate Box","price":29000,"quantity":1,"imageUrl":"x.jpg","orderDateTime":"2026-07-09T11:55:00"}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(
            item.order_date_time.format("%Y-%m-%d %H:%M").to_string(),
            "2026-07-09 11:55"
        );
    }

    #[test]
    fn test_wish_uses_wish_id_key() {
        let wishes: Vec<Wish> = serde_json::from_str(r#"[{"wishId":42},{"wishId":7}]"#).unwrap();
        let ids: Vec<_> = wishes.iter().map(|w| w.wish_id).collect();
        assert_eq!(ids, vec![ProductId::new(42), ProductId::new(7)]);
    }

    #[test]
    fn test_token_response_optional_email() {
        let with_email: TokenResponse =
            serde_json::from_str(r#"{"token":"abc","email":"user@example.com"}"#).unwrap();
        assert_eq!(with_email.email.as_deref(), Some("user@example.com"));

        let token_only: TokenResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(token_only.token, "abc");
        assert!(token_only.email.is_none());
    }

    #[test]
    fn test_category_optional_fields() {
        let category: Category = serde_json::from_str(r#"{"id":1,"name":"Birthday"}"#).unwrap();
        assert!(category.image_url.is_none());
        assert!(category.description.is_none());
    }
}
