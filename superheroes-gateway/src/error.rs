//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use superheroes_core::CoreError;
use superheroes_store::StoreError;

use crate::policy::ErrorClass;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the store layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Form fields failed domain validation.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A path id segment is not an integer.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// The request body could not be decoded as a form.
    #[error("invalid form body: {0}")]
    InvalidForm(String),
}

impl IntoResponse for GatewayError {
    /// Not-found and validation failures render with status 200 and carry an
    /// [`ErrorClass`] extension so [`apply_status_policy`] can rewrite the
    /// status. Store failures are always 500.
    ///
    /// [`apply_status_policy`]: crate::policy::apply_status_policy
    fn into_response(self) -> Response {
        match self {
            GatewayError::Store(StoreError::NotFound { entity, id }) => {
                tracing::debug!(%entity, id, "lookup miss");
                classified(ErrorClass::NotFound, json!({"error": format!("{entity} not found")}))
            }
            GatewayError::InvalidId(raw) => {
                tracing::debug!(%raw, "non-integer id");
                classified(ErrorClass::NotFound, json!({"error": format!("invalid id: {raw}")}))
            }
            GatewayError::Store(err @ StoreError::UnknownReference { .. }) => {
                tracing::warn!(error = %err, "rejected association");
                validation(vec![err.to_string()])
            }
            GatewayError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "internal server error"})),
                )
                    .into_response()
            }
            GatewayError::Validation(err) => {
                tracing::warn!(error = %err, "rejected form");
                validation(err.details())
            }
            GatewayError::InvalidForm(reason) => {
                tracing::warn!(%reason, "undecodable form body");
                validation(vec![reason])
            }
        }
    }
}

fn validation(details: Vec<String>) -> Response {
    classified(ErrorClass::Validation, json!({"error": "validation errors", "details": details}))
}

fn classified(class: ErrorClass, body: Value) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();
    response.extensions_mut().insert(class);
    response
}
