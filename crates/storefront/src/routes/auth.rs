//! Authentication route handlers.
//!
//! Handles credential login, registration, and the Kakao social-login
//! redirect. Credentials are verified by the gift API; the storefront only
//! stores the returned token in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use giftbox_core::Email;

use crate::filters;
use crate::middleware::{clear_current_member, set_current_member};
use crate::models::CurrentMember;
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login and registration form data.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
    /// Return URL carried through the form.
    pub redirect: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub redirect: Option<String>,
}

/// Query parameters of the social-login return leg.
#[derive(Debug, Deserialize)]
pub struct KakaoCallbackQuery {
    pub token: Option<String>,
    pub redirect: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub redirect: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Validate a post-login return URL.
///
/// Only same-site absolute paths are allowed; anything else falls back to
/// the site root.
fn sanitize_redirect(redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

/// Redirect back to the login page with a notice, preserving the return URL.
fn login_error_redirect(message: &str, redirect: &str) -> Response {
    Redirect::to(&format!(
        "/auth/login?error={}&redirect={}",
        urlencoding::encode(message),
        urlencoding::encode(redirect)
    ))
    .into_response()
}

/// Store the member in the session and follow the return URL.
async fn finish_login(session: &Session, member: CurrentMember, redirect: &str) -> Response {
    if let Err(e) = set_current_member(session, &member).await {
        tracing::error!("Failed to set session: {e}");
        return login_error_redirect("Something went wrong. Please try again.", redirect);
    }

    Redirect::to(redirect).into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        redirect: sanitize_redirect(query.redirect.as_deref()),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let redirect = sanitize_redirect(form.redirect.as_deref());

    if form.email.is_empty() || form.password.is_empty() {
        return login_error_redirect("Please enter your email and password.", &redirect);
    }

    match state.api().login(&form.email, &form.password).await {
        Ok(response) => {
            let email = response.email.as_deref().unwrap_or(&form.email);
            let member = CurrentMember::new(Email::parse(email).ok(), response.token);
            finish_login(&session, member, &redirect).await
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            login_error_redirect("Login failed. Please check your email and password.", &redirect)
        }
    }
}

/// Handle registration form submission.
///
/// Registration logs the member straight in - the backend returns a token
/// just like login.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let redirect = sanitize_redirect(form.redirect.as_deref());

    if form.email.is_empty() || form.password.is_empty() {
        return login_error_redirect("Please enter your email and password.", &redirect);
    }

    match state.api().register(&form.email, &form.password).await {
        Ok(response) => {
            let email = response.email.as_deref().unwrap_or(&form.email);
            let member = CurrentMember::new(Email::parse(email).ok(), response.token);
            finish_login(&session, member, &redirect).await
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            login_error_redirect("Registration failed. Please try again.", &redirect)
        }
    }
}

/// Forward the social-login POST to the provider endpoint.
///
/// A 307 preserves the method, so the browser re-posts to the gift API
/// exactly as if the login form had targeted it directly.
pub async fn kakao_login(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.api().kakao_login_url())
}

/// Handle the return leg of the social login.
///
/// Same token-storage and redirect behavior as credential login; the
/// provider flow does not report an email.
pub async fn kakao_callback(session: Session, Query(query): Query<KakaoCallbackQuery>) -> Response {
    let redirect = sanitize_redirect(query.redirect.as_deref());

    let Some(token) = query.token.filter(|token| !token.is_empty()) else {
        tracing::warn!("Social login callback missing token");
        return login_error_redirect("Social login failed. Please try again.", &redirect);
    };

    finish_login(&session, CurrentMember::new(None, token), &redirect).await
}

/// Handle logout.
///
/// Clears the member and destroys the session; the token is gone with it.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_member(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_redirect_allows_site_paths() {
        assert_eq!(sanitize_redirect(Some("/wishlist")), "/wishlist");
        assert_eq!(
            sanitize_redirect(Some("/products/42?from=home")),
            "/products/42?from=home"
        );
    }

    #[test]
    fn test_sanitize_redirect_rejects_external_urls() {
        assert_eq!(sanitize_redirect(Some("https://evil.example.com")), "/");
        assert_eq!(sanitize_redirect(Some("//evil.example.com")), "/");
    }

    #[test]
    fn test_sanitize_redirect_defaults_to_root() {
        assert_eq!(sanitize_redirect(None), "/");
        assert_eq!(sanitize_redirect(Some("")), "/");
    }
}
