//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor whose rejection is an `ApiError`
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters with post_id
#[derive(Debug, Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

/// Path parameters with post_id and emoji.
/// Both stay raw strings; the reaction service validates them in order.
#[derive(Debug, Deserialize)]
pub struct ReactionPath {
    pub post_id: String,
    pub emoji: String,
}
