//! HTTP error mapping.
//!
//! Bodies are short plain-text codes. Token failures all map to the same
//! `401 Unauthorized` so callers cannot tell why a token was refused.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("unsupported_grant_type")]
    UnsupportedGrantType,

    #[error("invalid_client")]
    InvalidClient,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("invalid redirect target")]
    InvalidRedirect,

    #[error("internal error: {0}")]
    Internal(String),
}

impl GateError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidClient => StatusCode::UNAUTHORIZED,
            Self::UnsupportedGrantType | Self::InvalidRedirect => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<dale_auth::Error> for GateError {
    fn from(err: dale_auth::Error) -> Self {
        use dale_auth::Error;
        match err {
            Error::MalformedToken(_) | Error::SignatureMismatch | Error::Expired(_) => {
                Self::Unauthorized
            }
            Error::InvalidCredentials => Self::InvalidClient,
            Error::UnsupportedGrantType(_) => Self::UnsupportedGrantType,
            Error::InvalidIdentity(_) | Error::Cookie(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "internal gateway error");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, body).into_response()
    }
}

pub type GateResult<T> = Result<T, GateError>;
