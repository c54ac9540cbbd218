//! Product route handlers.
//!
//! Product detail requires a logged-in member - the detail endpoint of the
//! gift API is bearer-authenticated, and hitting the page while logged out
//! bounces through the login page back to the product.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use giftbox_core::ProductId;

use crate::api::types::{Product, ProductOption};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Option display data for templates.
#[derive(Clone)]
pub struct OptionView {
    pub id: i64,
    pub name: String,
    pub sold_out: bool,
}

impl From<&ProductOption> for OptionView {
    fn from(option: &ProductOption) -> Self {
        Self {
            id: option.id.as_i64(),
            name: option.name.clone(),
            sold_out: option.quantity == Some(0),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub options: Vec<OptionView>,
    pub favorited: bool,
}

/// Display the product detail page.
#[instrument(skip(state, member))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let product = state.api().get_product(product_id, member.token()).await?;
    let options = state.api().get_product_options(product_id).await?;

    // Heart state comes from the remote wishlist; the page must still
    // render if that read fails
    let favorited = match state.api().get_wishes(member.token()).await {
        Ok(wishes) => wishes.iter().any(|wish| wish.wish_id == product_id),
        Err(e) => {
            tracing::warn!("Failed to fetch wishlist for product page: {e}");
            false
        }
    };

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        options: options.iter().map(OptionView::from).collect(),
        favorited,
    })
}
