//! Error types for the tracker HTTP server.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};
use tracker::domain::ParseEnumError;

/// Errors returned to HTTP clients.
///
/// Every variant renders as `{"detail": "<message>"}` with the matching
/// status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested issue does not exist.
    #[error("Issue not found")]
    NotFound,

    /// The request was malformed or failed validation.
    #[error("{0}")]
    Validation(String),

    /// The store failed in a way the client cannot fix.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(message) => error!(%message, "Request failed"),
            Self::Validation(message) => warn!(%message, "Rejected request"),
            Self::NotFound => {}
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<tracker::error::Error> for ApiError {
    fn from(err: tracker::error::Error) -> Self {
        use tracker::error::Error;

        match err {
            Error::IssueNotFound(_) => Self::NotFound,
            Error::Validation(message) => Self::Validation(message),
            Error::Storage(message) => Self::Internal(message),
        }
    }
}

impl From<ParseEnumError> for ApiError {
    fn from(err: ParseEnumError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Errors loading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`ServerConfig`](crate::config::ServerConfig).
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A CORS origin is not a valid header value.
    #[error("Invalid CORS origin: '{0}'")]
    InvalidOrigin(String),
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Seeding the store failed.
    #[error("Failed to seed sample data: {0}")]
    Seed(#[from] tracker::error::Error),

    /// The listen address could not be bound.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// The address that was requested.
        address: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an IO error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
