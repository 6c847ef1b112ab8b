//! Error types surfaced by the toggle endpoints.

use thiserror::Error;

/// Failure of a toggle request. All variants collapse to one user-facing
/// message; the variant only matters for the console log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status.
    #[error("unexpected http status {status}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
    },
    /// Request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// Response body was not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify an HTTP status; `None` for success codes.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        if (200..300).contains(&status) {
            None
        } else {
            Some(Self::Status { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_not_errors() {
        assert_eq!(ApiError::from_status(200), None);
        assert_eq!(ApiError::from_status(204), None);
        assert_eq!(
            ApiError::from_status(403),
            Some(ApiError::Status { status: 403 })
        );
        assert_eq!(
            ApiError::from_status(302),
            Some(ApiError::Status { status: 302 })
        );
    }

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            ApiError::Status { status: 500 }.to_string(),
            "unexpected http status 500"
        );
        assert!(ApiError::Decode("eof".into()).to_string().contains("eof"));
    }
}
