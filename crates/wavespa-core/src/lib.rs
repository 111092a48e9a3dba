// wavespa-core: Device model, status reconciliation and polling between wavespa-api and consumers.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{CommandPlan, SpaCommand};
pub use config::{AuthCredentials, ControllerConfig};
pub use controller::{ConnectionState, Controller};
pub use diagnostics::Diagnostic;
pub use error::CoreError;
pub use store::{DeviceDirectory, MergeOutcome, StatusCache, StatusEntry};
pub use stream::SnapshotStream;

pub use model::{
    Attributes, BubblesLevel, BubblesMapping, Device, DeviceFamily, DeviceId, DeviceStatus,
    DeviceType, ErrorReport, FaultPattern, FilterWear, Snapshot, SpaState, TemperatureUnit,
};

// Token type returned by `Controller::login`.
pub use wavespa_api::UserToken;
