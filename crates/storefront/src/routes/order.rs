//! Order form route handlers.
//!
//! The gift button on a product page stashes an order draft in the session;
//! the order form consumes it. Validation runs before anything is sent to
//! the backend, and the first failing rule is the one shown.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use giftbox_core::{OptionId, ProductId};

use crate::api::types::OrderRequest;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{OrderDraft, session_keys};
use crate::routes::products::{OptionView, ProductView};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the pending order draft from the session.
async fn get_order_draft(session: &Session) -> Option<OrderDraft> {
    session
        .get::<OrderDraft>(session_keys::ORDER_DRAFT)
        .await
        .ok()
        .flatten()
}

/// Set the pending order draft in the session.
async fn set_order_draft(
    session: &Session,
    draft: OrderDraft,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ORDER_DRAFT, draft).await
}

// =============================================================================
// Form Types
// =============================================================================

/// Gift-button form data from a product page.
#[derive(Debug, Deserialize)]
pub struct StartOrderForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Order form data.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub option_id: OptionId,
    pub message: String,
    /// Checkbox; present ("on") when checked.
    pub has_cash_receipt: Option<String>,
    pub cash_receipt_number: Option<String>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Validation
// =============================================================================

/// Validate the order form, returning the first failing message.
///
/// Receipt rules are checked before message rules.
pub(crate) fn validate_order_form(
    has_cash_receipt: bool,
    cash_receipt_number: Option<&str>,
    message: &str,
) -> Result<(), &'static str> {
    if has_cash_receipt {
        let number = cash_receipt_number.unwrap_or("");
        if number.is_empty() {
            return Err("Please enter a cash receipt number.");
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err("The cash receipt number must contain digits only.");
        }
    }

    let length = message.chars().count();
    if length < 1 {
        return Err("Please enter a gift message.");
    }
    if length > 100 {
        return Err("Gift messages can be at most 100 characters.");
    }

    Ok(())
}

// =============================================================================
// Templates
// =============================================================================

/// Order form page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/new.html")]
pub struct OrderNewTemplate {
    pub product: ProductView,
    pub options: Vec<OptionView>,
    pub quantity: i64,
    pub total: String,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Stash an order draft and go to the order form.
#[instrument(skip(session))]
pub async fn start(
    _: RequireAuth,
    session: Session,
    Form(form): Form<StartOrderForm>,
) -> Response {
    let draft = OrderDraft {
        product_id: form.product_id,
        quantity: form.quantity.max(1),
    };

    if let Err(e) = set_order_draft(&session, draft).await {
        tracing::error!("Failed to save order draft to session: {e}");
        return Redirect::to(&format!("/products/{}", form.product_id)).into_response();
    }

    Redirect::to("/order/new").into_response()
}

/// Display the order form.
#[instrument(skip(state, member, session))]
pub async fn new(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<Response, AppError> {
    let Some(draft) = get_order_draft(&session).await else {
        // Nothing to order; start over from the catalog
        return Ok(Redirect::to("/").into_response());
    };

    let product = state
        .api()
        .get_product(draft.product_id, member.token())
        .await?;
    let options = state.api().get_product_options(draft.product_id).await?;

    Ok(OrderNewTemplate {
        total: product.price.total(draft.quantity).to_string(),
        product: ProductView::from(&product),
        options: options.iter().map(OptionView::from).collect(),
        quantity: draft.quantity,
        error: query.error,
    }
    .into_response())
}

/// Submit the order.
#[instrument(skip(state, member, session, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Response {
    let Some(draft) = get_order_draft(&session).await else {
        return Redirect::to("/").into_response();
    };

    let has_cash_receipt = form.has_cash_receipt.is_some();
    if let Err(message) = validate_order_form(
        has_cash_receipt,
        form.cash_receipt_number.as_deref(),
        &form.message,
    ) {
        return form_error_redirect(message);
    }

    let order = OrderRequest {
        option_id: form.option_id,
        quantity: draft.quantity,
        message: form.message,
        product_id: draft.product_id,
    };

    match state.api().create_order(member.token(), &order).await {
        Ok(()) => {
            if let Err(e) = session.remove::<OrderDraft>(session_keys::ORDER_DRAFT).await {
                tracing::error!("Failed to clear order draft: {e}");
            }
            Redirect::to("/orders?created=true").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to place order: {e}");
            form_error_redirect("Failed to place the order. Please try again.")
        }
    }
}

/// Redirect back to the order form with a notice.
fn form_error_redirect(message: &str) -> Response {
    Redirect::to(&format!(
        "/order/new?error={}",
        urlencoding::encode(message)
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_fails() {
        let result = validate_order_form(false, None, "");
        assert_eq!(result, Err("Please enter a gift message."));
    }

    #[test]
    fn test_message_over_100_chars_fails() {
        let message = "a".repeat(101);
        let result = validate_order_form(false, None, &message);
        assert_eq!(result, Err("Gift messages can be at most 100 characters."));
    }

    #[test]
    fn test_message_boundaries_pass() {
        assert!(validate_order_form(false, None, "a").is_ok());
        assert!(validate_order_form(false, None, &"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_message_length_counts_chars_not_bytes() {
        // 100 Hangul syllables are 300 bytes but exactly 100 characters
        let message = "가".repeat(100);
        assert!(validate_order_form(false, None, &message).is_ok());
    }

    #[test]
    fn test_missing_receipt_number_fails() {
        assert_eq!(
            validate_order_form(true, None, "Happy Birthday!"),
            Err("Please enter a cash receipt number.")
        );
        assert_eq!(
            validate_order_form(true, Some(""), "Happy Birthday!"),
            Err("Please enter a cash receipt number.")
        );
    }

    #[test]
    fn test_non_numeric_receipt_number_fails() {
        assert_eq!(
            validate_order_form(true, Some("010-1234-5678"), "Happy Birthday!"),
            Err("The cash receipt number must contain digits only.")
        );
    }

    #[test]
    fn test_numeric_receipt_number_passes() {
        assert!(validate_order_form(true, Some("01012345678"), "Happy Birthday!").is_ok());
    }

    #[test]
    fn test_receipt_checked_before_message() {
        // Both rules fail; the receipt message wins
        assert_eq!(
            validate_order_form(true, None, ""),
            Err("Please enter a cash receipt number.")
        );
    }

    #[test]
    fn test_no_receipt_skips_receipt_checks() {
        assert!(validate_order_form(false, Some("not-digits"), "Happy Birthday!").is_ok());
    }
}
