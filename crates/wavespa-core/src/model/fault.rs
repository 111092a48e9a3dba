// ── Error report ──
//
// Devices expose fault flags as ordinary attributes. Which keys count as
// faults depends on the family.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Attributes;
use super::attributes::truthy;

/// Diagnostic code reported alongside the fault codes that is not a fault.
const NON_FAULT_CODE: &str = "E32";

/// A kind of attribute key that carries a fault flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPattern {
    /// `system_err` followed by at least one digit.
    SystemError,
    /// Exactly `earth`.
    EarthLeak,
    /// `E` followed by two digits, except exactly `E32`.
    FaultCode,
    /// Exactly `error`.
    Generic,
}

impl FaultPattern {
    pub const ALL: [Self; 4] = [
        Self::SystemError,
        Self::EarthLeak,
        Self::FaultCode,
        Self::Generic,
    ];

    pub fn matches(self, key: &str) -> bool {
        match self {
            Self::SystemError => key
                .strip_prefix("system_err")
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit())),
            Self::EarthLeak => key == "earth",
            Self::FaultCode => {
                key != NON_FAULT_CODE
                    && key.strip_prefix('E').is_some_and(|rest| {
                        rest.len() >= 2 && rest.bytes().take(2).all(|b| b.is_ascii_digit())
                    })
            }
            Self::Generic => key == "error",
        }
    }
}

/// Fault flags found in one status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Every matching attribute with its truthiness.
    pub candidates: BTreeMap<String, bool>,
    /// The subset currently raised.
    pub active: BTreeMap<String, bool>,
}

impl ErrorReport {
    pub fn scan(attrs: &Attributes, patterns: &[FaultPattern]) -> Self {
        let candidates: BTreeMap<String, bool> = attrs
            .iter()
            .filter(|(key, _)| patterns.iter().any(|p| p.matches(key)))
            .map(|(key, value)| (key.clone(), truthy(value)))
            .collect();
        let active = candidates
            .iter()
            .filter(|(_, raised)| **raised)
            .map(|(key, raised)| (key.clone(), *raised))
            .collect();

        Self { candidates, active }
    }

    pub fn has_error(&self) -> bool {
        !self.active.is_empty()
    }

    /// Names of the raised faults, in key order.
    pub fn active_codes(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attrs(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn pattern_matching() {
        assert!(FaultPattern::SystemError.matches("system_err1"));
        assert!(FaultPattern::SystemError.matches("system_err12"));
        assert!(!FaultPattern::SystemError.matches("system_err"));
        assert!(!FaultPattern::SystemError.matches("my_system_err1"));

        assert!(FaultPattern::FaultCode.matches("E01"));
        assert!(FaultPattern::FaultCode.matches("E320"));
        assert!(!FaultPattern::FaultCode.matches("E32"));
        assert!(!FaultPattern::FaultCode.matches("E1"));
        assert!(!FaultPattern::FaultCode.matches("Ex1"));

        assert!(FaultPattern::EarthLeak.matches("earth"));
        assert!(!FaultPattern::EarthLeak.matches("earth1"));
        assert!(FaultPattern::Generic.matches("error"));
    }

    #[test]
    fn e32_never_reported() {
        let report = ErrorReport::scan(&attrs(json!({"E32": 1})), &FaultPattern::ALL);
        assert!(report.candidates.is_empty());
        assert!(!report.has_error());
    }

    #[test]
    fn only_truthy_matches_are_active() {
        let report = ErrorReport::scan(
            &attrs(json!({"E01": 1, "E02": 0, "earth": false, "Heater": 1})),
            &FaultPattern::ALL,
        );
        assert_eq!(report.candidates.len(), 3);
        assert_eq!(report.active_codes().collect::<Vec<_>>(), vec!["E01"]);
        assert!(report.has_error());
    }

    #[test]
    fn restricted_pattern_set() {
        let report = ErrorReport::scan(
            &attrs(json!({"system_err3": 1, "earth": 1})),
            &[FaultPattern::FaultCode, FaultPattern::Generic],
        );
        assert!(!report.has_error());
    }
}
