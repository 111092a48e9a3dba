// Async HTTP client for the Gizwits app API.
//
// Base path: /app/
// Auth: X-Gizwits-User-token header, obtained from POST /app/login

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::classify::classify;
use crate::error::Error;
use crate::models::{
    Attributes, BindingsResponse, ControlRequest, LatestStatus, LoginRequest, LoginResponse,
    RawDevice,
};
use crate::redact::redact_bindings;
use crate::transport::{TransportConfig, USER_TOKEN_HEADER};

/// Number of body characters echoed into deserialization error messages.
const BODY_PREVIEW_CHARS: usize = 200;

// ── User token ───────────────────────────────────────────────────────

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct UserToken {
    pub user_id: String,
    pub token: SecretString,
    /// Unix seconds after which the token is no longer accepted.
    pub expires_at: i64,
}

impl UserToken {
    pub fn is_expired_at(&self, unix_secs: i64) -> bool {
        unix_secs >= self.expires_at
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Authenticated client for one account on one regional API root.
///
/// Holds a single pooled `reqwest::Client`, so it is meant to be shared
/// (behind an `Arc`) by every request a controller issues.
pub struct WavespaClient {
    http: reqwest::Client,
    api_root: Url,
    token_header: HeaderValue,
    timeout_secs: u64,
}

impl WavespaClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an existing user token.
    pub fn new(
        api_root: &Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(http, api_root, token, transport.timeout_secs())
    }

    /// Wrap an existing `reqwest::Client` built by [`TransportConfig`].
    pub fn from_reqwest(
        http: reqwest::Client,
        api_root: &Url,
        token: &SecretString,
        timeout_secs: u64,
    ) -> Result<Self, Error> {
        let mut token_header = HeaderValue::from_str(token.expose_secret())
            .map_err(|e| Error::ClientBuild(format!("invalid user token header value: {e}")))?;
        token_header.set_sensitive(true);

        Ok(Self {
            http,
            api_root: normalize_api_root(api_root),
            token_header,
            timeout_secs,
        })
    }

    /// Exchange account credentials for a user token.
    pub async fn login(
        api_root: &Url,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<UserToken, Error> {
        let http = transport.build_client()?;
        let url = normalize_api_root(api_root).join("app/login")?;
        debug!("POST {url}");

        let body = encode(&LoginRequest {
            username,
            password: password.expose_secret(),
            lang: "en",
        })?;
        let resp = http
            .post(url)
            .body(body)
            .send()
            .await
            .map_err(|e| map_send_error(e, transport.timeout_secs()))?;
        let text = read_body(resp, transport.timeout_secs()).await?;
        let login: LoginResponse = decode(&text)?;

        Ok(UserToken {
            user_id: login.uid,
            token: SecretString::from(login.token),
            expires_at: login.expire_at,
        })
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List every device bound to the account.
    ///
    /// The listing is logged at debug level with identifiers masked.
    pub async fn list_bindings(&self) -> Result<Vec<RawDevice>, Error> {
        let text = self.get_text("app/bindings").await?;
        let raw: Value = serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: format!(
                "unparseable bindings listing ({:?} at line {}, column {})",
                e.classify(),
                e.line(),
                e.column()
            ),
            body: String::new(),
        })?;
        let redacted = redact_bindings(&raw);
        debug!(listing = %redacted, "bindings received");

        // Data errors echo field values; only the redacted listing leaves here.
        let listing: BindingsResponse =
            serde_json::from_value(raw).map_err(|_| Error::Deserialization {
                message: "bindings listing does not match the expected shape".into(),
                body: redacted.to_string(),
            })?;
        Ok(listing.devices)
    }

    /// Latest reported attributes of one device.
    pub async fn latest_status(&self, device_id: &str) -> Result<LatestStatus, Error> {
        let text = self
            .get_text(&format!("app/devdata/{device_id}/latest"))
            .await?;
        decode(&text)
    }

    /// Write attributes to one device. The response body is ignored.
    pub async fn control(&self, device_id: &str, attrs: &Attributes) -> Result<(), Error> {
        self.post(&format!("app/control/{device_id}"), &ControlRequest { attrs })
            .await
            .map(drop)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_text(&self, path: &str) -> Result<String, Error> {
        let url = self.api_root.join(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(USER_TOKEN_HEADER, self.token_header.clone())
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout_secs))?;
        read_body(resp, self.timeout_secs).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, Error> {
        let url = self.api_root.join(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(USER_TOKEN_HEADER, self.token_header.clone())
            .body(encode(body)?)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout_secs))?;
        read_body(resp, self.timeout_secs).await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Ensure the root ends with `/` so relative joins append instead of replace.
fn normalize_api_root(raw: &Url) -> Url {
    let mut url = raw.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Encode a body by hand: `RequestBuilder::json` would replace the vendor
/// content-type header.
fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(body)?)
}

fn map_send_error(err: reqwest::Error, timeout_secs: u64) -> Error {
    if err.is_timeout() {
        Error::Timeout { timeout_secs }
    } else {
        Error::Transport(err)
    }
}

/// Read the body as text and classify the status against it.
async fn read_body(resp: reqwest::Response, timeout_secs: u64) -> Result<String, Error> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| map_send_error(e, timeout_secs))?;
    classify(status, &text)?;
    Ok(text)
}

/// Parse a body as JSON regardless of the declared content-type.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: text.to_owned(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_trailing_slash() {
        let root = Url::parse("https://euapi.gizwits.com").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(normalize_api_root(&root).as_str(), "https://euapi.gizwits.com/");

        let prefixed = Url::parse("http://127.0.0.1:8080/proxy").unwrap_or_else(|e| panic!("{e}"));
        let joined = normalize_api_root(&prefixed)
            .join("app/bindings")
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(joined.as_str(), "http://127.0.0.1:8080/proxy/app/bindings");
    }

    #[test]
    fn token_expiry() {
        let token = UserToken {
            user_id: "u".into(),
            token: SecretString::from("t".to_owned()),
            expires_at: 1_000,
        };
        assert!(!token.is_expired_at(999));
        assert!(token.is_expired_at(1_000));
    }

    #[test]
    fn decode_error_keeps_body() {
        match decode::<LatestStatus>("<html>oops</html>") {
            Err(Error::Deserialization { body, message }) => {
                assert_eq!(body, "<html>oops</html>");
                assert!(message.contains("body preview"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
