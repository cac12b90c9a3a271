//! Integer id path segment whose rejection renders through [`GatewayError`].

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::GatewayError;

/// The `{id}` segment of `/heroes/{id}` and `/powers/{id}`.
///
/// A segment that is not an integer names no resource, so it is reported as
/// not found rather than with axum's plain-text path rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| GatewayError::InvalidId(e.to_string()))?;
        raw.trim().parse::<i64>().map(Self).map_err(|_| GatewayError::InvalidId(raw))
    }
}
