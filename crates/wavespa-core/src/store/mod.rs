// ── Device directory and status cache ──

mod directory;
mod status_cache;

pub use directory::DeviceDirectory;
pub use status_cache::{MergeOutcome, StatusCache, StatusEntry};
