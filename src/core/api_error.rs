//! Failure taxonomy for calls against the remote API.
//!
//! Each kind carries a fixed retry verdict decided at construction. Nothing
//! here retries; callers read [`SmartsheetError::should_retry`] and apply
//! their own backoff (see [`crate::core::retry::RetryPolicy`]).

use crate::domain::ports::Model;
use crate::models::ErrorResult;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Generic,
    SystemMaintenance,
    ServerTimeoutExceeded,
    RateLimitExceeded,
    UnexpectedErrorShouldRetry,
}

impl ApiErrorKind {
    /// Map the API's `errorCode` to a kind.
    pub fn from_error_code(code: i64) -> Self {
        match code {
            4001 => ApiErrorKind::SystemMaintenance,
            4002 => ApiErrorKind::ServerTimeoutExceeded,
            4003 => ApiErrorKind::RateLimitExceeded,
            4004 => ApiErrorKind::UnexpectedErrorShouldRetry,
            _ => ApiErrorKind::Generic,
        }
    }

    /// Kinds other than `Generic` are always retryable.
    pub fn forces_retry(self) -> bool {
        !matches!(self, ApiErrorKind::Generic)
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            ApiErrorKind::Generic => "Do not retry without fixing the problem.",
            ApiErrorKind::SystemMaintenance => {
                "The service is offline for maintenance. Retry later with exponential backoff."
            }
            ApiErrorKind::ServerTimeoutExceeded => {
                "The request timed out on the server. Retry with exponential backoff."
            }
            ApiErrorKind::RateLimitExceeded => {
                "Too many requests. Retry with exponential backoff."
            }
            ApiErrorKind::UnexpectedErrorShouldRetry => {
                "An unexpected error occurred. Retry with exponential backoff."
            }
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Generic => "ApiError",
            ApiErrorKind::SystemMaintenance => "SystemMaintenanceError",
            ApiErrorKind::ServerTimeoutExceeded => "ServerTimeoutExceededError",
            ApiErrorKind::RateLimitExceeded => "RateLimitExceededError",
            ApiErrorKind::UnexpectedErrorShouldRetry => "UnexpectedErrorShouldRetryError",
        };
        f.write_str(name)
    }
}

/// Error reported by the API itself, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ApiErrorKind,
    error: ErrorResult,
    message: Option<String>,
    should_retry: bool,
}

impl ApiError {
    /// Generic API error with a caller-chosen retry verdict.
    pub fn new(error: ErrorResult, message: Option<String>, should_retry: bool) -> Self {
        Self {
            kind: ApiErrorKind::Generic,
            error,
            message,
            should_retry,
        }
    }

    /// Error of a specific kind. Retryable kinds force `should_retry`.
    pub fn with_kind(kind: ApiErrorKind, error: ErrorResult, message: Option<String>) -> Self {
        Self {
            kind,
            error,
            message,
            should_retry: kind.forces_retry(),
        }
    }

    pub fn system_maintenance(error: ErrorResult, message: Option<String>) -> Self {
        Self::with_kind(ApiErrorKind::SystemMaintenance, error, message)
    }

    pub fn server_timeout_exceeded(error: ErrorResult, message: Option<String>) -> Self {
        Self::with_kind(ApiErrorKind::ServerTimeoutExceeded, error, message)
    }

    pub fn rate_limit_exceeded(error: ErrorResult, message: Option<String>) -> Self {
        Self::with_kind(ApiErrorKind::RateLimitExceeded, error, message)
    }

    pub fn unexpected_error_should_retry(error: ErrorResult, message: Option<String>) -> Self {
        Self::with_kind(ApiErrorKind::UnexpectedErrorShouldRetry, error, message)
    }

    /// Classify a decoded error payload by its `errorCode`.
    pub fn from_error_result(error: ErrorResult) -> Self {
        let kind = error
            .code()
            .map_or(ApiErrorKind::Generic, ApiErrorKind::from_error_code);
        let message = error.message().map(str::to_string);
        Self::with_kind(kind, error, message)
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn error(&self) -> &ErrorResult {
        &self.error
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_retry(&self) -> bool {
        self.should_retry
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(code) = self.error.code() {
            write!(f, " (code={})", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmartsheetError {
    #[error("HTTP error {status_code}: {body}")]
    Http { status_code: u16, body: String },

    #[error("internal server error {status_code}: {message}")]
    InternalServer { status_code: u16, message: String },

    /// Failure inside the transport library, before a usable response existed.
    #[error("unexpected request error: {reason}")]
    UnexpectedRequest {
        request: Option<String>,
        response: Option<u16>,
        reason: String,
    },

    #[error("{0}")]
    Api(ApiError),
}

impl SmartsheetError {
    /// Classify a failed response from its status code and raw body.
    ///
    /// A JSON object body is an API error, kind taken from `errorCode`. Other
    /// bodies are HTTP-layer errors, internal-server for 5xx statuses.
    pub fn classify(status_code: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(payload @ Value::Object(_)) => {
                let error = ErrorResult::from_json(&payload).unwrap_or_else(|err| {
                    tracing::warn!("undecodable error payload ({}): {}", err, body);
                    ErrorResult::default()
                });
                SmartsheetError::Api(ApiError::from_error_result(error))
            }
            _ if (500..600).contains(&status_code) => SmartsheetError::InternalServer {
                status_code,
                message: body.to_string(),
            },
            _ => SmartsheetError::Http {
                status_code,
                body: body.to_string(),
            },
        }
    }

    pub fn should_retry(&self) -> bool {
        match self {
            SmartsheetError::Api(error) => error.should_retry(),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            SmartsheetError::Http { status_code, .. }
            | SmartsheetError::InternalServer { status_code, .. } => Some(*status_code),
            SmartsheetError::UnexpectedRequest { response, .. } => *response,
            SmartsheetError::Api(_) => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SmartsheetError::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ApiError> for SmartsheetError {
    fn from(error: ApiError) -> Self {
        SmartsheetError::Api(error)
    }
}

impl From<reqwest::Error> for SmartsheetError {
    fn from(err: reqwest::Error) -> Self {
        SmartsheetError::UnexpectedRequest {
            request: err.url().map(|url| url.to_string()),
            response: err.status().map(|status| status.as_u16()),
            reason: err.to_string(),
        }
    }
}
