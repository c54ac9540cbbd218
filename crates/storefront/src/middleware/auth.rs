//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in member in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentMember, session_keys};

/// Extractor that requires a logged-in member.
///
/// If the member is not logged in, redirects to the login page with the
/// requested path as the return URL.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(member): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("token: {}", member.token())
/// }
/// ```
pub struct RequireAuth(pub CurrentMember);

/// Error returned when authentication is required but the member is not
/// logged in.
pub enum AuthRejection {
    /// Redirect to the login page, preserving the return URL.
    RedirectToLogin(String),
    /// Unauthorized response (no session layer present).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(target) => {
                Redirect::to(&login_path_with_redirect(&target)).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Build the login path carrying a return URL.
#[must_use]
pub fn login_path_with_redirect(target: &str) -> String {
    format!("/auth/login?redirect={}", urlencoding::encode(target))
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        // Get the current member from the session
        let member: CurrentMember = session
            .get(session_keys::CURRENT_MEMBER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                let target = parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| "/".to_string(), ToString::to_string);
                AuthRejection::RedirectToLogin(target)
            })?;

        Ok(Self(member))
    }
}

/// Extractor that optionally gets the current member.
///
/// Unlike `RequireAuth`, this does not reject the request if the member is
/// not logged in.
pub struct OptionalAuth(pub Option<CurrentMember>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let member = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentMember>(session_keys::CURRENT_MEMBER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(member))
    }
}

/// Helper to set the current member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_member(
    session: &Session,
    member: &CurrentMember,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_MEMBER, member).await
}

/// Helper to clear the current member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_member(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentMember>(session_keys::CURRENT_MEMBER)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_path_encodes_return_url() {
        assert_eq!(
            login_path_with_redirect("/products/42?from=home"),
            "/auth/login?redirect=%2Fproducts%2F42%3Ffrom%3Dhome"
        );
    }

    #[test]
    fn test_login_path_root() {
        assert_eq!(login_path_with_redirect("/"), "/auth/login?redirect=%2F");
    }
}
