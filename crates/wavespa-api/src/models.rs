// Wire types for the Gizwits app endpoints.
//
// Only the fields the controller consumes are modelled. Deserialization is
// strict: a listing with a malformed entry fails as a whole.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute name → raw JSON value, as reported by the device.
pub type Attributes = Map<String, Value>;

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub lang: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub uid: String,
    pub token: String,
    pub expire_at: i64,
}

// ── Bindings ─────────────────────────────────────────────────────────

/// Response of `GET /app/bindings`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindingsResponse {
    pub devices: Vec<RawDevice>,
}

/// A device bound to the account, as listed by the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawDevice {
    pub protoc: i64,
    pub did: String,
    pub product_name: String,
    pub dev_alias: String,
    pub mcu_soft_version: String,
    pub mcu_hard_version: String,
    pub wifi_soft_version: String,
    pub wifi_hard_version: String,
    pub is_online: bool,
}

// ── Device data ──────────────────────────────────────────────────────

/// Response of `GET /app/devdata/{did}/latest`.
///
/// `updated_at == 0` means the cloud holds no data for the device yet, in
/// which case `attr` is usually absent.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestStatus {
    pub updated_at: i64,
    #[serde(default)]
    pub attr: Attributes,
}

/// Body of `POST /app/control/{did}`.
#[derive(Debug, Serialize)]
pub struct ControlRequest<'a> {
    pub attrs: &'a Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_status_without_attr_defaults_to_empty() {
        let status: LatestStatus =
            serde_json::from_str(r#"{"updated_at": 0}"#).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(status.updated_at, 0);
        assert!(status.attr.is_empty());
    }

    #[test]
    fn raw_device_requires_every_field() {
        let missing_alias = r#"{
            "protoc": 3, "did": "abc", "product_name": "Airjet_V01",
            "mcu_soft_version": "1", "mcu_hard_version": "1",
            "wifi_soft_version": "1", "wifi_hard_version": "1", "is_online": true
        }"#;
        assert!(serde_json::from_str::<RawDevice>(missing_alias).is_err());
    }

    #[test]
    fn control_request_wraps_attrs() {
        let mut attrs = Attributes::new();
        attrs.insert("Heater".into(), Value::from(1));
        let body = serde_json::to_value(ControlRequest { attrs: &attrs })
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(body, serde_json::json!({"attrs": {"Heater": 1}}));
    }
}
