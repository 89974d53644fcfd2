use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure classes at the GitHub fetch boundary.
///
/// Rate limiting is its own variant because callers present it differently
/// (remediation hint instead of a generic failure message).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("GitHub rate limit reached (HTTP {status})")]
    RateLimited { status: u16 },
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {message}")]
    Transport { message: String },
    #[error("unexpected response shape: {message}")]
    Decode { message: String },
    #[error("operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status carried by the failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status } | Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } | Self::Cancelled => None,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Classify a non-success HTTP status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 403 {
            Self::RateLimited { status }
        } else {
            Self::Status {
                status,
                message: message.into(),
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_403_as_rate_limit() {
        let err = ApiError::from_status(403, "rate limit exceeded");
        assert!(err.is_rate_limit());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_from_status_other_codes_are_plain_status_errors() {
        let err = ApiError::from_status(404, "Not Found");
        assert!(!err.is_rate_limit());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_transport_and_decode_carry_no_status() {
        let transport = ApiError::Transport {
            message: "connection refused".to_string(),
        };
        let decode = ApiError::Decode {
            message: "missing field".to_string(),
        };
        assert_eq!(transport.status(), None);
        assert_eq!(decode.status(), None);
        assert!(!transport.is_rate_limit());
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(ApiError::Cancelled.to_string(), "operation cancelled");
    }
}
