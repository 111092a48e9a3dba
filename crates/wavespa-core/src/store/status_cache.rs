// ── Status cache ──
//
// Latest known attributes per device. Every mutation is a single
// read-modify-write on one entry, so a poll merge and a command's
// optimistic write to the same device cannot interleave.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{Attributes, DeviceId};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    /// Unix seconds.
    pub timestamp: i64,
    pub attrs: Attributes,
}

/// What a merge did with an incoming status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Server reported timestamp 0; the cache is untouched.
    NoData,
    /// Server timestamp is strictly older than the cached one.
    Stale { server: i64, cached: i64 },
    Applied,
}

#[derive(Default)]
pub struct StatusCache {
    entries: DashMap<DeviceId, StatusEntry>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a status fetched from the server, guarding against staleness.
    ///
    /// An equal timestamp applies: the server may confirm an optimistic
    /// write within the same second.
    pub fn merge(&self, device_id: &DeviceId, incoming: StatusEntry) -> MergeOutcome {
        if incoming.timestamp == 0 {
            return MergeOutcome::NoData;
        }

        match self.entries.entry(device_id.clone()) {
            Entry::Occupied(mut occupied) => {
                let cached = occupied.get().timestamp;
                if incoming.timestamp < cached {
                    MergeOutcome::Stale {
                        server: incoming.timestamp,
                        cached,
                    }
                } else {
                    occupied.insert(incoming);
                    MergeOutcome::Applied
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(incoming);
                MergeOutcome::Applied
            }
        }
    }

    /// Apply the writes of an accepted command and bump the timestamp to
    /// `max(now, cached + 1)`. Returns the new timestamp.
    pub fn apply_optimistic(
        &self,
        device_id: &str,
        now: i64,
        writes: &[(&'static str, Value)],
    ) -> Result<i64, CoreError> {
        let mut entry =
            self.entries
                .get_mut(device_id)
                .ok_or_else(|| CoreError::UnrecognizedDevice {
                    device_id: device_id.to_owned(),
                })?;

        let timestamp = now.max(entry.timestamp.saturating_add(1));
        entry.timestamp = timestamp;
        for (attribute, value) in writes {
            entry.attrs.insert((*attribute).to_owned(), value.clone());
        }
        Ok(timestamp)
    }

    pub fn get(&self, device_id: &str) -> Option<StatusEntry> {
        self.entries.get(device_id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.entries.contains_key(device_id)
    }

    /// Copy of every entry, in no particular order.
    pub fn entries(&self) -> Vec<(DeviceId, StatusEntry)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
