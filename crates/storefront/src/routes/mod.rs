//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (category grid)
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /products/{id}           - Product detail (requires auth)
//!
//! # Orders
//! POST /order/start             - Stash an order draft, go to the form
//! GET  /order/new               - Order form
//! POST /order                   - Submit the order
//! GET  /orders                  - Order history
//!
//! # Wishlist (HTMX fragments)
//! GET  /wishlist                - Wishlist page
//! POST /wishlist/toggle         - Toggle favorite (returns heart fragment)
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! POST /auth/register           - Register action
//! POST /auth/kakao              - Social login (307 to the provider endpoint)
//! GET  /auth/kakao/callback     - Social login return leg
//! POST /auth/logout             - Logout action
//! ```

pub mod auth;
pub mod home;
pub mod order;
pub mod orders;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .route("/kakao", post(auth::kakao_login))
        .route("/kakao/callback", get(auth::kakao_callback))
        .route("/logout", post(auth::logout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(order::create))
        .route("/start", post(order::start))
        .route("/new", get(order::new))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index))
        .route("/toggle", post(wishlist::toggle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product detail
        .route("/products/{id}", get(products::show))
        // Order flow
        .nest("/order", order_routes())
        // Order history
        .route("/orders", get(orders::index))
        // Wishlist
        .nest("/wishlist", wishlist_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
