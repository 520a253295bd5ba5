use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Body of a rejected request: parsed JSON when the server sent JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    Json(Value),
    Text(String),
}

impl ErrorPayload {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(body.to_string()),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{}", value),
            ErrorPayload::Text(text) if text.is_empty() => write!(f, "<empty body>"),
            ErrorPayload::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} (expected {expected}): {payload}")]
    Status {
        status: u16,
        expected: u16,
        payload: ErrorPayload,
    },

    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn config(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    /// The server's error payload, when the failure was a rejected status.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            AppError::Status { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Short text shown inside a control after a failed action.
    pub fn notice(&self) -> String {
        match self {
            AppError::Transport(_) => "Network error, please try again".to_string(),
            AppError::Status { status, .. } => match status {
                401 | 403 => "You are not allowed to do that".to_string(),
                404 => "This item no longer exists".to_string(),
                _ => "The server rejected the request".to_string(),
            },
            AppError::Validation(msg) => msg.clone(),
            AppError::ValidatorError(_) => "Please check the text you entered".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_prefers_json() {
        let payload = ErrorPayload::from_body(r#"{"detail": "Not found."}"#);
        assert_eq!(payload, ErrorPayload::Json(json!({"detail": "Not found."})));
    }

    #[test]
    fn test_payload_falls_back_to_text() {
        let payload = ErrorPayload::from_body("<h1>Server Error</h1>");
        assert_eq!(payload, ErrorPayload::Text("<h1>Server Error</h1>".to_string()));
        assert_eq!(ErrorPayload::Text(String::new()).to_string(), "<empty body>");
    }

    #[test]
    fn test_status_notice() {
        let err = AppError::Status {
            status: 403,
            expected: 201,
            payload: ErrorPayload::Text(String::new()),
        };
        assert_eq!(err.notice(), "You are not allowed to do that");
        assert!(err.payload().is_some());
        assert!(AppError::validation("x").payload().is_none());
    }
}
