// Transport configuration for the Gizwits cloud.
//
// The cloud expects the headers of the vendor's Android app; every request
// carries them, plus the user token once authenticated.

use std::time::Duration;

use reqwest::header::{CONNECTION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

/// Application id registered by the vendor's mobile app.
pub const APPLICATION_ID: &str = "78a879318939402b9c70819d918ef8ed";

/// User agent of the vendor's mobile app.
pub const USER_AGENT: &str = "okhttp/5.0.0-alpha.3";

pub const APPLICATION_ID_HEADER: &str = "x-gizwits-application-id";
pub const USER_TOKEN_HEADER: &str = "x-gizwits-user-token";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }

    /// Build a `reqwest::Client` carrying the vendor's default headers.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        headers.insert(
            APPLICATION_ID_HEADER,
            HeaderValue::from_static(APPLICATION_ID),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("Keep-Alive"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
