//! Authentication extractor
//!
//! Extracts and verifies session tokens from the Authorization header,
//! yielding the request-scoped actor threaded into every core operation.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use prio_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated actor extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        // Get the app state to access the session service
        let app_state = AppState::from_ref(state);

        // Verify the token
        let claims = app_state
            .session_service()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid session token");
                ApiError::InvalidAuthFormat
            })?;

        let actor = claims.actor().map_err(|e| {
            tracing::warn!(error = %e, "Invalid subject in session token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthActor(actor))
    }
}

/// Optional authentication: a missing or invalid token degrades to the
/// anonymous actor instead of rejecting, per the read-only public surface.
#[derive(Debug, Clone)]
pub struct OptionalAuthActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_result =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;

        let actor = match auth_result {
            Ok(TypedHeader(Authorization(bearer))) => {
                let app_state = AppState::from_ref(state);
                match app_state.session_service().verify(bearer.token()) {
                    Ok(claims) => claims.actor().unwrap_or(Actor::Anonymous),
                    Err(_) => Actor::Anonymous,
                }
            }
            Err(_) => Actor::Anonymous,
        };

        Ok(OptionalAuthActor(actor))
    }
}
