//! Post id path segment

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use blog_core::PostId;

/// `{id}` segment of `/posts/{id}`
///
/// Only non-negative decimal integers match; anything else is answered
/// with 404, as if no route existed for the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub PostId);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        parse_post_id(&raw).map(PathId).ok_or(ApiError::NotFound)
    }
}

fn parse_post_id(raw: &str) -> Option<PostId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
