//! Dynatrace client errors

use thiserror::Error;

/// Errors that can occur when interacting with the Dynatrace API
#[derive(Debug, Error)]
pub enum DynatraceError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dynatrace API returned a non-success status
    #[error("Dynatrace API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credentials could not be decoded or are incomplete
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// Response was well-formed JSON but not what the endpoint promises
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DynatraceError {
    /// True when the remote object does not exist (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, DynatraceError::Api { code: 404, .. })
    }

    /// Status code reported by the API, if any
    pub fn code(&self) -> Option<u16> {
        match self {
            DynatraceError::Api { code, .. } => Some(*code),
            DynatraceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_only_for_404() {
        let missing = DynatraceError::Api { code: 404, message: "gone".to_string() };
        let forbidden = DynatraceError::Api { code: 403, message: "no".to_string() };
        assert!(missing.is_not_found());
        assert!(!forbidden.is_not_found());
        assert!(!DynatraceError::Credentials("x".to_string()).is_not_found());
        assert_eq!(forbidden.code(), Some(403));
    }

    #[test]
    fn test_api_error_display_keeps_remote_message() {
        let err = DynatraceError::Api { code: 400, message: "Given property 'name' is invalid".to_string() };
        assert_eq!(err.to_string(), "Dynatrace API error (400): Given property 'name' is invalid");
    }
}
