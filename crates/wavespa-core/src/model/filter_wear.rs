// ── Filter wear ──
//
// The `Time_filter` attribute counts filter usage up to FILTER_WEAR_MAX.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::model::attributes::as_int;

/// Attribute carrying the filter usage counter.
pub const FILTER_WEAR_ATTRIBUTE: &str = "Time_filter";

/// Counter value of a fully used filter.
pub const FILTER_WEAR_MAX: u32 = 10_200;

/// Filter usage counter, guaranteed within `0..=FILTER_WEAR_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FilterWear(u32);

impl FilterWear {
    pub fn new(counter: u32) -> Result<Self, CoreError> {
        if counter > FILTER_WEAR_MAX {
            return Err(CoreError::validation(format!(
                "filter wear must be between 0 and {FILTER_WEAR_MAX}, got {counter}"
            )));
        }
        Ok(Self(counter))
    }

    /// Validate a raw attribute value.
    pub fn from_attribute(value: &Value) -> Result<Self, CoreError> {
        let raw = as_int(value).ok_or_else(|| {
            CoreError::validation(format!("filter wear must be an integer, got {value}"))
        })?;
        Self::try_from(raw)
    }

    pub fn counter(self) -> u32 {
        self.0
    }

    pub fn percent_remaining(self) -> u8 {
        percent_remaining(self.0)
    }
}

impl TryFrom<u32> for FilterWear {
    type Error = CoreError;

    fn try_from(counter: u32) -> Result<Self, Self::Error> {
        Self::new(counter)
    }
}

impl TryFrom<i64> for FilterWear {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        let counter = u32::try_from(raw).map_err(|_| {
            CoreError::validation(format!(
                "filter wear must be between 0 and {FILTER_WEAR_MAX}, got {raw}"
            ))
        })?;
        Self::new(counter)
    }
}

impl From<FilterWear> for u32 {
    fn from(wear: FilterWear) -> Self {
        wear.0
    }
}

/// Percentage of filter life remaining: `100 - ceil(counter * 100 / MAX)`,
/// clamped to `0..=100`.
pub fn percent_remaining(counter: u32) -> u8 {
    let used = (u64::from(counter) * 100).div_ceil(u64::from(FILTER_WEAR_MAX));
    u8::try_from(100_u64.saturating_sub(used)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn percent_boundaries() {
        assert_eq!(percent_remaining(0), 100);
        assert_eq!(percent_remaining(1), 99);
        assert_eq!(percent_remaining(102), 99);
        assert_eq!(percent_remaining(103), 98);
        assert_eq!(percent_remaining(5_100), 50);
        assert_eq!(percent_remaining(10_200), 0);
    }

    #[test]
    fn percent_clamps_out_of_range() {
        assert_eq!(percent_remaining(20_000), 0);
        assert_eq!(percent_remaining(u32::MAX), 0);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(FilterWear::new(10_200).is_ok());
        assert!(matches!(
            FilterWear::new(10_201),
            Err(CoreError::Validation { .. })
        ));
        assert!(FilterWear::try_from(-1_i64).is_err());
    }

    #[test]
    fn from_attribute_requires_integer() {
        assert_eq!(
            FilterWear::from_attribute(&json!(5_100)).ok().map(FilterWear::counter),
            Some(5_100)
        );
        assert!(FilterWear::from_attribute(&json!("5100")).is_err());
        assert!(FilterWear::from_attribute(&json!(99_999)).is_err());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<FilterWear>("10200").is_ok());
        assert!(serde_json::from_str::<FilterWear>("10201").is_err());
    }
}
