//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::api::types::OrderItem;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Orders fetched per page.
pub const ORDERS_PAGE_SIZE: u32 = 10;

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub name: String,
    pub price: String,
    pub quantity: i64,
    pub image_url: String,
    pub ordered_at: String,
}

impl From<&OrderItem> for OrderView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
            image_url: item.image_url.clone(),
            ordered_at: item.order_date_time.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Query parameters for the order history page.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub page: Option<u32>,
    /// Set after a successful order submission.
    pub created: Option<bool>,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderView>,
    pub created: bool,
    pub error: Option<String>,
}

/// Display the order history, newest first.
#[instrument(skip(state, member))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    let page = query.page.unwrap_or(0);

    match state
        .api()
        .get_orders(member.token(), page, ORDERS_PAGE_SIZE)
        .await
    {
        Ok(orders) => OrdersIndexTemplate {
            orders: orders.iter().map(OrderView::from).collect(),
            created: query.created.unwrap_or(false),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Failed to fetch orders: {e}");
            OrdersIndexTemplate {
                orders: Vec::new(),
                created: false,
                error: Some("Could not load your orders. Please try again later.".to_string()),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use giftbox_core::{OrderId, Price};

    #[test]
    fn test_order_view_formatting() {
        let item = OrderItem {
            id: OrderId::new(1),
            name: "Chocolate Box".to_string(),
            price: Price::new(29_000),
            quantity: 2,
            image_url: "https://img.example.com/1.jpg".to_string(),
            order_date_time: "2026-07-09T11:55:00".parse().unwrap(),
        };

        let view = OrderView::from(&item);
        assert_eq!(view.price, "29,000원");
        assert_eq!(view.ordered_at, "2026-07-09 11:55");
    }
}
