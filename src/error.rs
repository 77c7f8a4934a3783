use reqwest::StatusCode;
use thiserror::Error;

use crate::middleware::auth::AuthError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unauthorized, please log in again")]
    Unauthorized,
    #[error("Access denied: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Failed to validate: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("No shipping address selected")]
    NoAddressSelected,
    #[error("Insufficient stock. Available: {available}, requested: {requested}")]
    InsufficientStock { available: i64, requested: i64 },
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
    #[error("No cart item with {0} id")]
    UnknownCartItem(u64),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// 401 means the session is gone and the caller should send the user to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized
                | ClientError::Auth(AuthError::MissingToken)
                | ClientError::Auth(AuthError::TokenExpired)
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ClientError::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Maps a non-success response to an error, taking the message from the body.
    pub(crate) fn from_response(status: StatusCode, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api { status, message },
        }
    }
}
