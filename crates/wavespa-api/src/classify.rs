// ── Response classification ──
//
// Failed responses carry a JSON body with a numeric `error_code`. The body
// is inspected whatever the declared content-type; the vendor is not
// consistent about it.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, vendor_code};

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error_code: Option<i64>,
}

/// Extract the vendor `error_code` from a response body, if there is one.
pub fn vendor_error_code(body: &str) -> Option<i64> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error_code)
}

/// Map a response onto the error taxonomy.
///
/// Success-class statuses pass through untouched. Everything else becomes
/// a dedicated variant when the body names a known vendor code, or
/// [`Error::Http`] otherwise.
pub fn classify(status: StatusCode, body: &str) -> Result<(), Error> {
    if status.is_success() {
        return Ok(());
    }

    Err(match vendor_error_code(body) {
        Some(vendor_code::TOKEN_INVALID) => Error::TokenInvalid,
        Some(vendor_code::USER_NOT_EXIST) => Error::UserNotFound,
        Some(vendor_code::INCORRECT_PASSWORD) => Error::IncorrectPassword,
        Some(vendor_code::DEVICE_OFFLINE) => Error::DeviceOffline,
        _ => Error::Http {
            status: status.as_u16(),
            body: body.to_owned(),
        },
    })
}
