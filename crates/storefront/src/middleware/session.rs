//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session cookie
//! expires when the browser closes, so the stored token is session-scoped:
//! it lives exactly as long as the visit.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "giftbox_session";

/// Create the session layer with an in-memory store.
///
/// All session state (member token, order draft) is small and disposable,
/// so there is no persistent store behind it.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
