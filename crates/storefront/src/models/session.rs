//! Session-related types.
//!
//! Types stored in the session for authentication state and the order
//! handoff between the product page and the order form.

use serde::{Deserialize, Serialize};

use giftbox_core::{Email, ProductId};

/// Session-stored member identity.
///
/// Created at login success, read on every authenticated call, destroyed
/// on logout. The token is opaque to the storefront; it is forwarded to
/// the gift API as a bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentMember {
    /// Member's email address, when the authentication flow provided one
    /// (the social flow only returns a token).
    pub email: Option<Email>,
    /// Bearer token issued by the gift API.
    token: String,
}

impl CurrentMember {
    /// Create a new session member.
    #[must_use]
    pub const fn new(email: Option<Email>, token: String) -> Self {
        Self { email, token }
    }

    /// The bearer token for gift API calls.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// A pending order started from a product page.
///
/// Written when the user hits the gift button, consumed by the order form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderDraft {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Session keys for stored state.
pub mod keys {
    /// Key for storing the current logged-in member.
    pub const CURRENT_MEMBER: &str = "current_member";

    /// Key for the pending order draft.
    pub const ORDER_DRAFT: &str = "order_draft";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_member_serde_roundtrip() {
        let member = CurrentMember::new(
            Some(Email::parse("user@example.com").unwrap()),
            "tok-123".to_string(),
        );
        let json = serde_json::to_string(&member).unwrap();
        let parsed: CurrentMember = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.token(), "tok-123");
        assert_eq!(
            parsed.email.map(Email::into_inner).as_deref(),
            Some("user@example.com")
        );
    }

    #[test]
    fn test_current_member_without_email() {
        let member = CurrentMember::new(None, "tok-456".to_string());
        let json = serde_json::to_string(&member).unwrap();
        let parsed: CurrentMember = serde_json::from_str(&json).unwrap();
        assert!(parsed.email.is_none());
        assert_eq!(parsed.token(), "tok-456");
    }

    #[test]
    fn test_order_draft_roundtrip() {
        let draft = OrderDraft {
            product_id: ProductId::new(42),
            quantity: 3,
        };
        let json = serde_json::to_string(&draft).unwrap();
        let parsed: OrderDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.product_id, ProductId::new(42));
        assert_eq!(parsed.quantity, 3);
    }
}
