//! Error types for the storefront API client.
//!
//! # Design
//! `NotFound` and `Conflict` get dedicated variants because callers branch on
//! them ("the record is gone", "that email is taken"). 5xx responses land in
//! `ServerError`, every other non-2xx status in `HttpError`, both keeping the
//! raw status and body. Network failures never reach the status check and
//! surface as `Transport`.

use thiserror::Error;

/// Errors returned by resource services and the sans-IO client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 409.
    #[error("conflict: {body}")]
    Conflict { body: String },

    /// The server returned a 5xx status.
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// The server returned any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Map a non-2xx status and its body to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound,
            409 => ApiError::Conflict { body },
            500..=599 => ApiError::ServerError { status, body },
            _ => ApiError::HttpError { status, body },
        }
    }

    /// The HTTP status behind this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::ServerError { status, .. } | ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("base url must not be empty")]
    EmptyBaseUrl,
}
