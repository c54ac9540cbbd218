//! Wishlist route handlers.
//!
//! The remote wishlist is the source of truth. Heart toggles go over HTMX
//! and swap only the button fragment; on a failed call the fragment renders
//! with its previous state so nothing on screen lies about the backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::instrument;

use giftbox_core::ProductId;

use crate::api::types::Product;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Wishlist row display data for templates.
#[derive(Clone)]
pub struct WishlistItemView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub favorited: bool,
}

impl WishlistItemView {
    fn favorited(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            favorited: true,
        }
    }
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/index.html")]
pub struct WishlistIndexTemplate {
    pub items: Vec<WishlistItemView>,
    pub error: Option<String>,
}

/// Heart button fragment template (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wish_button.html")]
pub struct WishButtonTemplate {
    pub product_id: i64,
    pub favorited: bool,
}

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: ProductId,
    /// The state the heart currently shows.
    pub favorited: bool,
}

const LOAD_ERROR: &str = "Could not load your wishlist. Please try again later.";

/// Display the wishlist page.
#[instrument(skip(state, member))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
) -> WishlistIndexTemplate {
    let wishes = match state.api().get_wishes(member.token()).await {
        Ok(wishes) => wishes,
        Err(e) => {
            tracing::warn!("Failed to fetch wishlist: {e}");
            return WishlistIndexTemplate {
                items: Vec::new(),
                error: Some(LOAD_ERROR.to_string()),
            };
        }
    };

    // Fan out the product-detail fetches; the page renders only once all
    // of them have completed
    let details = try_join_all(
        wishes
            .iter()
            .map(|wish| state.api().get_product(wish.wish_id, member.token())),
    )
    .await;

    match details {
        Ok(products) => WishlistIndexTemplate {
            items: products.iter().map(WishlistItemView::favorited).collect(),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Failed to fetch wishlist product details: {e}");
            WishlistIndexTemplate {
                items: Vec::new(),
                error: Some(LOAD_ERROR.to_string()),
            }
        }
    }
}

/// Toggle favorite status for a product (HTMX).
///
/// Returns the heart fragment in its new state on success, or unchanged on
/// failure.
#[instrument(skip(state, member))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Form(form): Form<ToggleForm>,
) -> Response {
    let result = if form.favorited {
        state.api().remove_wish(member.token(), form.product_id).await
    } else {
        state.api().add_wish(member.token(), form.product_id).await
    };

    match result {
        Ok(()) => (
            AppendHeaders([("HX-Trigger", "wishlist-updated")]),
            WishButtonTemplate {
                product_id: form.product_id.as_i64(),
                favorited: !form.favorited,
            },
        )
            .into_response(),
        Err(e) => {
            // State is unchanged on failure; the error is only logged
            tracing::error!("Failed to update wishlist: {e}");
            WishButtonTemplate {
                product_id: form.product_id.as_i64(),
                favorited: form.favorited,
            }
            .into_response()
        }
    }
}
