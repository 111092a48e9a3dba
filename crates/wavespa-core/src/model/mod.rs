// ── Domain model ──
//
// Typed view over the raw attribute maps reported by the cloud.

pub mod attributes;
pub mod bubbles;
pub mod device;
pub mod device_id;
pub mod family;
pub mod fault;
pub mod filter_wear;
pub mod state;
pub mod status;

pub use attributes::Attributes;
pub use bubbles::{AIRJET_V01_BUBBLES, BubblesLevel, BubblesMapping, BubblesValues, HYDROJET_BUBBLES};
pub use device::{Device, DeviceType};
pub use device_id::DeviceId;
pub use family::DeviceFamily;
pub use fault::{ErrorReport, FaultPattern};
pub use filter_wear::{FILTER_WEAR_MAX, FilterWear};
pub use state::{SpaState, TemperatureUnit};
pub use status::{DeviceStatus, Snapshot};
