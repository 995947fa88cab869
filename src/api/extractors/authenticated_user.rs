use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::gate::Identity;

/// Hands the gate-verified [`Identity`] to a handler.
///
/// Assumes `middleware::auth::gate` already ran and stored the identity in
/// request extensions. Missing (gate not applied, or lenient allow without a
/// user id) is answered with 401.
pub struct AuthenticatedUser(pub Identity);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
