//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::GiftApiClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the gift API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: GiftApiClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let api = GiftApiClient::new(&config.api_base_url);

        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the gift API client.
    #[must_use]
    pub fn api(&self) -> &GiftApiClient {
        &self.inner.api
    }
}
