//! Boundary error type
//!
//! Errors that cross a request boundary (CLI command, MCP tool call) carry an
//! HTTP-style status and serialize to the `{"error": "..."}` envelope.

use serde_json::{json, Value};
use thiserror::Error;

/// Errors surfaced to callers of the admin and search surfaces
#[derive(Debug, Error)]
pub enum SukhanError {
    /// Malformed input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or wrong credentials (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested row does not exist or was soft-deleted (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage or other unexpected failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SukhanError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SukhanError::BadRequest(_) => 400,
            SukhanError::Unauthorized => 401,
            SukhanError::NotFound(_) => 404,
            SukhanError::Conflict(_) => 409,
            SukhanError::Internal(_) => 500,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// JSON error envelope
    pub fn to_json(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl From<rusqlite::Error> for SukhanError {
    fn from(err: rusqlite::Error) -> Self {
        SukhanError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for SukhanError {
    fn from(err: anyhow::Error) -> Self {
        SukhanError::Internal(err.to_string())
    }
}

/// Result alias for boundary operations
pub type SukhanResult<T> = std::result::Result<T, SukhanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SukhanError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(SukhanError::Unauthorized.status_code(), 401);
        assert_eq!(SukhanError::NotFound("x".into()).status_code(), 404);
        assert_eq!(SukhanError::Conflict("x".into()).status_code(), 409);
        assert_eq!(SukhanError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_client_error_split() {
        assert!(SukhanError::Unauthorized.is_client_error());
        assert!(!SukhanError::Internal("db".into()).is_client_error());
    }

    #[test]
    fn test_json_envelope() {
        let body = SukhanError::NotFound("user 'ayaz'".into()).to_json();
        assert_eq!(body["error"], "Not found: user 'ayaz'");
    }
}
