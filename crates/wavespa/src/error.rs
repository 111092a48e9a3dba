//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use wavespa_config::ConfigError;
use wavespa_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {reason}")]
    #[diagnostic(
        code(wavespa::auth_failed),
        help(
            "Check the account e-mail and password.\n\
             Run: wavespa config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, reason: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(wavespa::no_credentials),
        help(
            "Configure credentials with: wavespa config init\n\
             Or set WAVESPA_USERNAME and WAVESPA_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("Device '{identifier}' not found")]
    #[diagnostic(
        code(wavespa::not_found),
        help("Run: wavespa devices to see the spas bound to this account")
    )]
    NotFound { identifier: String },

    #[error("Device is offline")]
    #[diagnostic(
        code(wavespa::device_offline),
        help("The spa is not reachable by the cloud. Check its Wi-Fi connection.")
    )]
    DeviceOffline,

    #[error("{operation} is not supported by {family} devices")]
    #[diagnostic(code(wavespa::unsupported))]
    Unsupported { operation: String, family: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Could not reach the cloud API: {message}")]
    #[diagnostic(
        code(wavespa::connection_failed),
        help("Check your network connection and the profile's api_root / region.")
    )]
    ConnectionFailed { message: String },

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(wavespa::api_error))]
    ApiError { status: u16, message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(wavespa::timeout),
        help("Increase timeout with --timeout or try again later.")
    )]
    Timeout { seconds: u64 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wavespa::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wavespa::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wavespa config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(wavespa::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(wavespa::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::ConnectionFailed { .. } | Self::DeviceOffline => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to authentication failures.
    #[must_use]
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { reason, .. } => Self::AuthFailed {
                profile: name.into(),
                reason,
            },
            other => other,
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthInvalidToken | CoreError::AuthUserNotFound | CoreError::AuthBadPassword => {
                CliError::AuthFailed {
                    profile: "default".into(),
                    reason: err.to_string(),
                }
            }

            CoreError::DeviceOffline => CliError::DeviceOffline,

            CoreError::UnrecognizedDevice { device_id } => CliError::NotFound {
                identifier: device_id,
            },

            CoreError::Unsupported { operation, family } => {
                CliError::Unsupported { operation, family }
            }

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Transport {
                status: Some(status),
                message,
            } => CliError::ApiError { status, message },

            CoreError::Transport {
                status: None,
                message,
            } => CliError::ConnectionFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Disconnected => CliError::ConnectionFailed {
                message: "not connected".into(),
            },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
