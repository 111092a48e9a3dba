use thiserror::Error;

/// Vendor error codes carried in the `error_code` field of failed responses.
pub mod vendor_code {
    pub const TOKEN_INVALID: i64 = 9004;
    pub const USER_NOT_EXIST: i64 = 9005;
    pub const INCORRECT_PASSWORD: i64 = 9020;
    pub const DEVICE_OFFLINE: i64 = 9042;
}

/// Top-level error type for the `wavespa-api` crate.
///
/// Vendor error codes are lifted into dedicated variants by
/// [`classify`](crate::classify::classify); anything the vendor does not
/// name ends up as [`Error::Http`]. `wavespa-core` maps these into its
/// own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The user token was rejected (expired or revoked).
    #[error("Auth token is invalid or has expired")]
    TokenInvalid,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    // ── Device ──────────────────────────────────────────────────────
    /// The cloud cannot reach the spa's WiFi module.
    #[error("Device is offline")]
    DeviceOffline,

    // ── Transport ───────────────────────────────────────────────────
    /// Non-success status without a recognised vendor code.
    #[error("HTTP {status} from vendor API")]
    Http { status: u16, body: String },

    /// Connection refused, DNS failure, TLS failure, etc.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Data ────────────────────────────────────────────────────────
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for the three vendor authentication codes.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::TokenInvalid | Self::UserNotFound | Self::IncorrectPassword
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::DeviceOffline => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status associated with this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
