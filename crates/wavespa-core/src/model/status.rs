// ── Published status ──
//
// What consumers read: the cached attributes of each device, joined with
// the directory's filter wear and family.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Attributes, DeviceFamily, DeviceId, ErrorReport, FilterWear, SpaState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatus {
    pub device_id: DeviceId,
    /// Server timestamp of the attributes, or the local write time after
    /// an optimistic update.
    pub timestamp: i64,
    pub attrs: Attributes,
    pub filter_wear: Option<FilterWear>,
    #[serde(skip)]
    pub family: DeviceFamily,
}

impl DeviceStatus {
    pub fn state(&self) -> SpaState {
        self.family.read(&self.attrs)
    }

    pub fn errors(&self) -> ErrorReport {
        self.family.error_report(&self.attrs)
    }

    pub fn has_error(&self) -> bool {
        self.errors().has_error()
    }

    pub fn filter_percent(&self) -> Option<u8> {
        self.filter_wear.map(FilterWear::percent_remaining)
    }
}

/// Point-in-time view of every cached device.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub devices: BTreeMap<DeviceId, DeviceStatus>,
    pub taken_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn get(&self, device_id: &str) -> Option<&DeviceStatus> {
        self.devices.get(device_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceStatus> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
