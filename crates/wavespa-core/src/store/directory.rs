// ── Device directory ──
//
// The set of bound devices, swapped wholesale on every refresh so readers
// never observe a half-updated listing. Filter wear and each device's last
// known family live beside it and survive the swap.

use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use indexmap::IndexMap;

use crate::model::{Device, DeviceFamily, DeviceId, FilterWear};

/// Listing order is preserved.
pub type DeviceMap = IndexMap<DeviceId, Arc<Device>>;

pub struct DeviceDirectory {
    devices: ArcSwap<DeviceMap>,
    filter_wear: DashMap<DeviceId, FilterWear>,
    families: DashMap<DeviceId, DeviceFamily>,
}

impl Default for DeviceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDirectory {
    pub fn new() -> Self {
        Self {
            devices: ArcSwap::from_pointee(IndexMap::new()),
            filter_wear: DashMap::new(),
            families: DashMap::new(),
        }
    }

    /// Replace the whole listing in one step.
    pub fn replace(&self, devices: Vec<Device>) {
        let map: DeviceMap = devices
            .into_iter()
            .map(|device| (device.id.clone(), Arc::new(device)))
            .collect();
        for (id, device) in &map {
            self.families.insert(id.clone(), device.family);
        }
        self.devices.store(Arc::new(map));
    }

    /// Current listing (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<DeviceMap> {
        self.devices.load_full()
    }

    pub fn get(&self, device_id: &str) -> Option<Arc<Device>> {
        self.devices.load().get(device_id).cloned()
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.devices.load().contains_key(device_id)
    }

    /// Family of a device as last listed. Devices never seen in a listing
    /// are driven like unknown models.
    pub fn family_of(&self, device_id: &str) -> DeviceFamily {
        self.families
            .get(device_id)
            .map_or(DeviceFamily::Airjet, |family| *family)
    }

    pub fn len(&self) -> usize {
        self.devices.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.load().is_empty()
    }

    // ── Filter wear ──────────────────────────────────────────────────

    pub fn filter_wear(&self, device_id: &str) -> Option<FilterWear> {
        self.filter_wear.get(device_id).map(|wear| *wear)
    }

    pub fn record_filter_wear(&self, device_id: &DeviceId, wear: FilterWear) {
        self.filter_wear.insert(device_id.clone(), wear);
    }
}
