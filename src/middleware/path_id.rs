use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::NambiError;

/// Numeric `{id}` path segment.
///
/// A segment that is not an integer can never name a row, so it is reported
/// as the same JSON 404 a missing row gets instead of axum's plain-text 400.
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = NambiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| NambiError::Validation(rejection.body_text()))?;

        raw.parse::<i64>()
            .map(ItemId)
            .map_err(|_| NambiError::NotFound("Itinerary".to_string()))
    }
}
