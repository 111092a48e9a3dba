// ── Core error types ──
//
// Errors surfaced by wavespa-core. Vendor codes arrive here already
// classified; the `From<wavespa_api::Error>` impl folds the remaining
// transport detail into `Transport`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Auth token is invalid or has expired")]
    AuthInvalidToken,

    #[error("User does not exist")]
    AuthUserNotFound,

    #[error("Incorrect password")]
    AuthBadPassword,

    // ── Device ───────────────────────────────────────────────────────
    #[error("Device is offline")]
    DeviceOffline,

    #[error("Unrecognised device: {device_id}")]
    UnrecognizedDevice { device_id: String },

    #[error("{operation} is not supported by {family} devices")]
    Unsupported { operation: String, family: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status, when the failure came with one.
        status: Option<u16>,
        message: String,
    },

    #[error("Timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Controller is not connected")]
    Disconnected,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for failures that a fresh login may resolve.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthInvalidToken | Self::AuthUserNotFound | Self::AuthBadPassword
        )
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wavespa_api::Error> for CoreError {
    fn from(err: wavespa_api::Error) -> Self {
        use wavespa_api::Error as ApiError;

        match err {
            ApiError::TokenInvalid => CoreError::AuthInvalidToken,
            ApiError::UserNotFound => CoreError::AuthUserNotFound,
            ApiError::IncorrectPassword => CoreError::AuthBadPassword,
            ApiError::DeviceOffline => CoreError::DeviceOffline,
            ApiError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ApiError::Http { status, body } => CoreError::Transport {
                status: Some(status),
                message: format!("HTTP {status}: {}", body.trim()),
            },
            ApiError::Transport(ref e) => CoreError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid API root: {e}"),
            },
            ApiError::ClientBuild(message) => CoreError::Config { message },
            ApiError::Encode(e) => CoreError::Transport {
                status: None,
                message: format!("failed to encode request: {e}"),
            },
            ApiError::Deserialization { message, body: _ } => CoreError::Transport {
                status: None,
                message: format!("unexpected response: {message}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_errors_map_to_core_variants() {
        assert!(matches!(
            CoreError::from(wavespa_api::Error::TokenInvalid),
            CoreError::AuthInvalidToken
        ));
        assert!(matches!(
            CoreError::from(wavespa_api::Error::IncorrectPassword),
            CoreError::AuthBadPassword
        ));
        assert!(matches!(
            CoreError::from(wavespa_api::Error::DeviceOffline),
            CoreError::DeviceOffline
        ));
        assert!(CoreError::from(wavespa_api::Error::UserNotFound).is_auth());
    }

    #[test]
    fn http_error_keeps_status() {
        let err = CoreError::from(wavespa_api::Error::Http {
            status: 500,
            body: "boom\n".into(),
        });
        match err {
            CoreError::Transport { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "HTTP 500: boom");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
