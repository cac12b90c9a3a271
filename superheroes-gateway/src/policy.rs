//! Status-code policy for not-found and validation responses.
//!
//! Error bodies are rendered with status 200, matching the established wire
//! contract. [`StatusPolicy::Strict`] rewrites them to 404 and 422 instead.

use axum::{extract::State, http::StatusCode, response::Response};

/// Response extension marking a handled client-side failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Validation,
}

/// How handled failures are reported at the HTTP status level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Always 200; the JSON body carries the `error` key.
    #[default]
    Compatible,
    /// 404 for not-found, 422 for validation failures.
    Strict,
}

impl StatusPolicy {
    /// Parse `"compatible"` or `"strict"`, ignoring ASCII case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compatible" => Some(Self::Compatible),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    /// The status to report for a failure of the given class.
    #[must_use]
    pub fn status_for(self, class: ErrorClass) -> StatusCode {
        match (self, class) {
            (Self::Compatible, _) => StatusCode::OK,
            (Self::Strict, ErrorClass::NotFound) => StatusCode::NOT_FOUND,
            (Self::Strict, ErrorClass::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Response middleware applying `policy` to classified error responses.
pub async fn apply_status_policy(
    State(policy): State<StatusPolicy>,
    mut response: Response,
) -> Response {
    if let Some(class) = response.extensions().get::<ErrorClass>().copied() {
        *response.status_mut() = policy.status_for(class);
    }
    response
}
