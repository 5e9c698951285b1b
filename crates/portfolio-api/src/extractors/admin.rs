//! Admin authentication extractor
//!
//! Compares the bearer token against the configured admin token.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use portfolio_common::AppError;
use subtle::ConstantTimeEq;

use crate::response::ApiError;
use crate::state::AppState;

/// Marker for a request carrying the admin token
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| match e.reason() {
                    TypedHeaderRejectionReason::Missing => ApiError::MissingAuth,
                    _ => ApiError::InvalidAuthFormat,
                })?;

        let app_state = AppState::from_ref(state);

        if !tokens_match(bearer.token(), app_state.admin_token()) {
            tracing::warn!("Rejected admin request with invalid token");
            return Err(AppError::InvalidToken.into());
        }

        Ok(AdminUser)
    }
}

/// Comparison whose running time does not depend on where the inputs differ
fn tokens_match(given: &str, expected: &str) -> bool {
    bool::from(given.as_bytes().ct_eq(expected.as_bytes()))
}
