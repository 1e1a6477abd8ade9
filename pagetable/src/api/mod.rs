//! Helpers for data sources that fetch table pages from an API.
//!
//! A table loader typically starts a request, flips the table's loading
//! flag, and records an error message when the request fails.
//! [`ApiAction`] packages that sequence.

mod action;
mod status;

pub use action::ApiAction;
pub use status::{HttpStatus, status_message};

use thiserror::Error;

/// Outcome of an API call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Ok { data: T, status: u16 },
    Bad { error: Option<String>, status: u16 },
}

impl<T> ApiResponse<T> {
    /// A `200 OK` response.
    pub fn ok(data: T) -> Self {
        Self::Ok {
            data,
            status: HttpStatus::Ok.code(),
        }
    }

    /// A failed response, optionally carrying the server's error text.
    pub fn bad(status: impl Into<u16>, error: Option<String>) -> Self {
        Self::Bad {
            error,
            status: status.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Ok { status, .. } | Self::Bad { status, .. } => *status,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// An API call that never produced a response.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ApiError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ApiError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
