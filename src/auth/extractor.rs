use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::models::Claims;
use crate::error::ApiError;

/// The signed-in user, as placed in the request by `auth_middleware`.
/// Handlers behind the middleware take this instead of parsing cookies.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> Result<i32, ApiError> {
        self.0.user_id()
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Claims>() {
            Some(claims) => Ok(AuthenticatedUser(claims.clone())),
            None => {
                tracing::debug!(path = %parts.uri.path(), "No session claims on request");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
