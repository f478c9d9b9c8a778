use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response format from API: {0}")]
    MalformedResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Http {
            status,
            body: Self::truncate_body(body),
        }
    }

    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(502, &body);
        assert_eq!(err.status(), Some(502));
        let ApiError::Http { body, .. } = err else {
            panic!("expected Http error");
        };
        assert!(body.starts_with(&"x".repeat(500)));
        assert!(body.ends_with("(truncated, 2000 total bytes)"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_status(500, "boom");
        assert_eq!(err.to_string(), "API request failed with status 500: boom");
        assert_eq!(ApiError::Network("refused".into()).status(), None);
    }
}
