use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Handler failures. Bodies are plain text, which is what ApoloHRA
/// clients parse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
}

impl ApiError {
    /// 400 with the endpoint's fixed message. The underlying detail is
    /// appended only when the deployment opts in.
    pub fn bad_request_with_detail(message: &str, detail: impl fmt::Display, expose_detail: bool) -> Self {
        if expose_detail {
            ApiError::BadRequest(format!("{} Error: {}", message, detail))
        } else {
            ApiError::BadRequest(message.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg,
        };

        (status, message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
