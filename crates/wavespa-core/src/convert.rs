// ── API-to-domain type conversions ──
//
// Bridges raw `wavespa_api` response types into `wavespa_core::model`
// domain types.

use wavespa_api::{LatestStatus, RawDevice};

use crate::model::{Device, DeviceType};
use crate::store::StatusEntry;

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let device_type = DeviceType::from_product_name(&raw.product_name);
        Device {
            id: raw.did.into(),
            protocol_version: raw.protoc,
            product_name: raw.product_name,
            device_type,
            family: device_type.family(),
            alias: raw.dev_alias,
            mcu_soft_version: raw.mcu_soft_version,
            mcu_hard_version: raw.mcu_hard_version,
            wifi_soft_version: raw.wifi_soft_version,
            wifi_hard_version: raw.wifi_hard_version,
            is_online: raw.is_online,
        }
    }
}

impl From<LatestStatus> for StatusEntry {
    fn from(latest: LatestStatus) -> Self {
        StatusEntry {
            timestamp: latest.updated_at,
            attrs: latest.attr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceFamily;

    fn raw(product_name: &str) -> RawDevice {
        RawDevice {
            protoc: 3,
            did: "dev-a".into(),
            product_name: product_name.into(),
            dev_alias: String::new(),
            mcu_soft_version: "m".into(),
            mcu_hard_version: "mh".into(),
            wifi_soft_version: "w".into(),
            wifi_hard_version: "wh".into(),
            is_online: false,
        }
    }

    #[test]
    fn known_product_resolves_family() {
        let device = Device::from(raw("Hydrojet_Pro"));
        assert_eq!(device.device_type, DeviceType::HydrojetPro);
        assert_eq!(device.family, DeviceFamily::HYDROJET);
        assert_eq!(device.id.as_str(), "dev-a");
        assert_eq!(device.display_name(), "Hydrojet_Pro");
    }

    #[test]
    fn unknown_product_is_kept() {
        let device = Device::from(raw("Mystery_Tub"));
        assert_eq!(device.device_type, DeviceType::Unknown);
        assert_eq!(device.product_name, "Mystery_Tub");
        assert_eq!(device.family, DeviceFamily::Airjet);
    }
}
