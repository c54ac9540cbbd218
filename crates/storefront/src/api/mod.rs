//! Gift API client.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest` against a fixed base URL
//! - The backend is the source of truth - no local sync, direct API calls
//! - Bearer tokens are attached per call; the client holds no credentials
//! - In-memory caching via `moka` for public catalog reads (5 minute TTL);
//!   orders and wishes are mutable state and are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use giftbox_storefront::api::GiftApiClient;
//!
//! let client = GiftApiClient::new("https://api.gift.example.com");
//!
//! // Public catalog read
//! let categories = client.get_categories().await?;
//!
//! // Authenticated call
//! let wishes = client.get_wishes(&token).await?;
//! ```

mod client;
pub mod types;

pub use client::GiftApiClient;

use thiserror::Error;

/// Errors that can occur when calling the gift API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("gift API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// JSON decoding of a response body failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bearer token was missing, invalid, or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("/api/products/42".to_string());
        assert_eq!(err.to_string(), "Not found: /api/products/42");

        let err = ApiError::Unauthorized;
        assert_eq!(err.to_string(), "Unauthorized");

        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "gift API returned 500: boom");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
