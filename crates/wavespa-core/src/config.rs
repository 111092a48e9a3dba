// ── Runtime connection configuration ──
//
// These types describe how to reach the cloud and how often to poll.
// They carry credential data but never touch disk; the CLI builds a
// `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wavespa_api::TransportConfig;

pub const EU_API_ROOT: &str = "https://euapi.gizwits.com";
pub const US_API_ROOT: &str = "https://usapi.gizwits.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(20);

/// How to authenticate with the cloud.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// A user token obtained earlier.
    Token(SecretString),
    /// Account credentials, exchanged for a token on connect.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// Configuration for one account on one regional API root.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub api_root: Url,
    pub auth: AuthCredentials,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Background poll period (seconds). 0 = no background polling.
    pub poll_interval_secs: u64,
    /// Upper bound on one poll cycle.
    pub cycle_timeout: Duration,
}

impl ControllerConfig {
    pub fn new(api_root: Url, auth: AuthCredentials) -> Self {
        Self {
            api_root,
            auth,
            timeout: DEFAULT_TIMEOUT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            cycle_timeout: DEFAULT_CYCLE_TIMEOUT,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(self.timeout)
    }
}
