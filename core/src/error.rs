//! Error types for the myFlix API client.
//!
//! # Design
//! Every failure keeps its origin (`Network` vs `Server`) so callers can
//! branch on it, but every variant *displays* as the same fixed sentence.
//! Code that only shows `err.to_string()` to a user therefore sees exactly
//! what the hosted web client has always shown.

use thiserror::Error;

/// The message every failed operation displays.
pub const FAILURE_MESSAGE: &str = "Something bad happened; please try again later.";

/// Errors returned by `MyflixClient` parsers and `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received (connection refused, DNS, TLS, ...).
    #[error("{}", FAILURE_MESSAGE)]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{}", FAILURE_MESSAGE)]
    Server { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("{}", FAILURE_MESSAGE)]
    Serialization(String),

    /// A 2xx response body was not valid JSON.
    #[error("{}", FAILURE_MESSAGE)]
    Deserialization(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// HTTP status of a server-returned error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a server-returned error.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Server { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Human-readable description of the underlying cause.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Network(msg) => format!("network error: {msg}"),
            ApiError::Server { status, body } => format!("HTTP {status}: {body}"),
            ApiError::Serialization(msg) => format!("serialization failed: {msg}"),
            ApiError::Deserialization(msg) => format!("deserialization failed: {msg}"),
        }
    }

    /// Log the failure and hand it back unchanged.
    ///
    /// Server errors are logged with status and body; everything else is a
    /// client-side failure and is logged with its message.
    pub fn report(self) -> Self {
        match &self {
            ApiError::Server { status, body } => {
                tracing::error!("Error Status code {status}, Error body is: {body}");
            }
            ApiError::Network(msg)
            | ApiError::Serialization(msg)
            | ApiError::Deserialization(msg) => {
                tracing::error!("Some error occurred: {msg}");
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;

    #[test]
    fn every_variant_displays_the_fixed_message() {
        let errors = [
            ApiError::Network("connection refused".to_string()),
            ApiError::Server {
                status: 401,
                body: "Unauthorized".to_string(),
            },
            ApiError::Serialization("key must be a string".to_string()),
            ApiError::Deserialization("expected value".to_string()),
        ];
        for err in errors {
            assert_eq!(err.to_string(), FAILURE_MESSAGE);
        }
    }

    #[test]
    fn server_error_exposes_status_and_body() {
        let err = ApiError::Server {
            status: 404,
            body: "Movie not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("Movie not found"));
        assert!(!err.is_network());
        assert_eq!(err.detail(), "HTTP 404: Movie not found");
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::Network("dns failure".to_string()).report();
        assert!(err.is_network());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }

    #[test]
    fn report_logs_client_side_failures_with_their_message() {
        let logs = capture_logs(|| {
            ApiError::Network("connection refused".to_string()).report();
            ApiError::Deserialization("expected value at line 1".to_string()).report();
        });
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("Some error occurred: connection refused"), "{logs}");
        assert!(logs.contains("Some error occurred: expected value at line 1"), "{logs}");
        assert!(!logs.contains("Error Status code"), "{logs}");
    }

    #[test]
    fn report_logs_server_failures_with_status_and_body() {
        let logs = capture_logs(|| {
            ApiError::Server {
                status: 401,
                body: "Unauthorized".to_string(),
            }
            .report();
        });
        assert!(logs.contains("Error Status code 401, Error body is: Unauthorized"), "{logs}");
        assert!(!logs.contains("Some error occurred"), "{logs}");
    }
}
