//! REST client for the remote Savor backend.
//!
//! # Architecture
//!
//! - The backend is the source of truth for every entity - NO local
//!   persistence, direct API calls
//! - In-memory caching via `moka` for home data and distance lookups
//!   (5 minute TTL, matching the browser's geolocation position cache)
//! - Plain JSON over `reqwest`; camelCase field names on the wire
//!
//! # Surfaces
//!
//! ## Consumer
//! - Home/discovery aggregate, guest reservations, cancel, maps distance,
//!   partner contact
//!
//! ## Store owner (bearer-token authenticated)
//! - Reservation list and status transitions, settings, daily stats

mod client;
pub mod types;

mod cache;

pub use client::BackendClient;

use thiserror::Error;

/// Errors that can occur when talking to the Savor backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network, DNS, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx status.
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided error message, or the status reason.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request was rejected as unauthenticated (401).
    #[error("Unauthorized")]
    Unauthorized,
}

impl ApiError {
    /// Build the error for a non-2xx response, mapping the well-known codes.
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether this error is the 401 that triggers the session-endpoint
    /// fallback on the reservations screen.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 503: maintenance");
    }

    #[test]
    fn test_unauthorized_mapping() {
        let err = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, String::new());
        assert!(err.is_unauthorized());

        let err = ApiError::from_status(
            reqwest::StatusCode::NOT_FOUND,
            "no such store".to_string(),
        );
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
