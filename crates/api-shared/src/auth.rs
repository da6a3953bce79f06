//! Authentication request and response shapes.
//!
//! The username is a [`NonEmptyText`]: required-field validation happens here
//! at the API edge, before the call ever reaches the core. The data service
//! itself validates nothing.

use hms_domain::User;
use hms_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request body.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String, example = "admin")]
    pub username: NonEmptyText,
    pub password: String,
}

/// Login response body: the authenticated identity.
///
/// The session token is persisted by the session store's durable slot rather
/// than handed back to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_rejects_blank_username() {
        let err = serde_json::from_str::<LoginRequest>(r#"{"username": "  ", "password": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn login_request_parses_valid_credentials() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username": "admin", "password": "secret"}"#)
                .expect("valid request");
        assert_eq!(req.username.as_str(), "admin");
        assert_eq!(req.password, "secret");
    }
}
