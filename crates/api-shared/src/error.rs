//! HTTP error mapping for core outcomes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hms_core::ServiceError;
use serde_json::json;
use thiserror::Error;

/// Errors a REST handler can produce.
///
/// Note what is *not* here: a missing record on `delete` is an ordinary
/// `deleted: false` response, never an error, matching the core's contract.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A get or update referenced an id absent from the collection.
    #[error("record not found: {0}")]
    NotFound(String),
    /// The request carried a malformed identifier or body.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A core operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(ServiceError::AuthenticationFailed { .. }) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::Service(ServiceError::TokenStorage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound("patient abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let response = ApiError::InvalidInput("bad id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authentication_failure_maps_to_401() {
        let err = ApiError::Service(ServiceError::AuthenticationFailed {
            username: "admin".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
