//! Masking of device identifiers before a listing reaches the logs.

use serde_json::Value;

/// Fields of a bindings entry that identify a physical unit.
pub const SENSITIVE_FIELDS: [&str; 4] = ["did", "passcode", "product_key", "mac"];

/// Return a copy of a raw bindings listing with every sensitive value
/// replaced by `*` repeated to the length of its text form.
pub fn redact_bindings(listing: &Value) -> Value {
    let mut sanitized = listing.clone();
    if let Some(devices) = sanitized.get_mut("devices").and_then(Value::as_array_mut) {
        for device in devices.iter_mut().filter_map(Value::as_object_mut) {
            for field in SENSITIVE_FIELDS {
                if let Some(value) = device.get_mut(field) {
                    mask(value);
                }
            }
        }
    }
    sanitized
}

fn mask(value: &mut Value) {
    let len = match &*value {
        Value::Null => return,
        Value::String(s) => s.chars().count(),
        other => other.to_string().chars().count(),
    };
    *value = Value::String("*".repeat(len));
}
