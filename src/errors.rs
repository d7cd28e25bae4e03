use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: &'static str,
    },
    #[error("unauthorized: {message}")]
    Unauthorized {
        code: &'static str,
        message: &'static str,
    },
    #[error("not found: {message}")]
    NotFound {
        code: &'static str,
        message: &'static str,
    },
    #[error("internal error")]
    Internal { code: &'static str, message: String },
}

/// Per-call failures of a tool handler.
///
/// These never reach the transport as faults; the dispatcher turns them into a
/// `CallToolResult` flagged with `isError`.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("required argument \"{0}\" not found")]
    MissingArgument(&'static str),
    #[error("argument \"{name}\" is not a {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },
    #[error("second_number is required for {0}")]
    MissingSecondNumber(&'static str),
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("cannot calculate square root of negative number")]
    NegativeSquareRoot,
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("unknown info_type: {0}")]
    UnknownInfoType(String),
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: &'static str) -> Self {
        Self::BadRequest { code, message }
    }

    pub fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self::Unauthorized { code, message }
    }

    pub fn not_found(code: &'static str, message: &'static str) -> Self {
        Self::NotFound { code, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message.to_string())
            }
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, code, message.to_string())
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message.to_string()),
            Self::Internal { code, message } => {
                tracing::error!(error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details: json!({}),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ToolError;

    #[test]
    fn tool_error_messages_match_caller_contract() {
        assert_eq!(
            ToolError::MissingArgument("operation").to_string(),
            "required argument \"operation\" not found"
        );
        assert_eq!(
            ToolError::MissingSecondNumber("division").to_string(),
            "second_number is required for division"
        );
        assert_eq!(ToolError::DivisionByZero.to_string(), "cannot divide by zero");
        assert_eq!(
            ToolError::NegativeSquareRoot.to_string(),
            "cannot calculate square root of negative number"
        );
        assert_eq!(
            ToolError::UnknownOperation("modulo".to_string()).to_string(),
            "unknown operation: modulo"
        );
    }
}
