// ── Structured diagnostics ──
//
// Lenient fallbacks and absorbed failures are reported here as typed
// events, in addition to the `tracing` output, so consumers can surface
// them without scraping logs.

use std::fmt;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const DIAGNOSTIC_CHANNEL_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    UnknownDeviceType {
        device_id: String,
        product_name: String,
    },
    UnmappedBubblesValue {
        device_id: String,
        raw: i64,
    },
    /// The cloud holds no data for the device yet.
    NoData {
        device_id: String,
    },
    StaleStatusDiscarded {
        device_id: String,
        server: i64,
        cached: i64,
    },
    InvalidFilterWear {
        device_id: String,
        raw: String,
    },
    DirectoryRefreshFailed {
        message: String,
    },
    StatusFetchFailed {
        device_id: String,
        message: String,
    },
    /// A background poll cycle failed.
    PollCycleFailed {
        message: String,
        auth_required: bool,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDeviceType {
                device_id,
                product_name,
            } => write!(f, "{device_id}: unknown product '{product_name}'"),
            Self::UnmappedBubblesValue { device_id, raw } => {
                write!(f, "{device_id}: unrecognised bubbles value {raw}, reading as OFF")
            }
            Self::NoData { device_id } => write!(f, "{device_id}: no data reported yet"),
            Self::StaleStatusDiscarded {
                device_id,
                server,
                cached,
            } => write!(
                f,
                "{device_id}: discarded status from {server}, cache holds {cached}"
            ),
            Self::InvalidFilterWear { device_id, raw } => {
                write!(f, "{device_id}: invalid filter wear {raw}")
            }
            Self::DirectoryRefreshFailed { message } => {
                write!(f, "device list refresh failed: {message}")
            }
            Self::StatusFetchFailed { device_id, message } => {
                write!(f, "{device_id}: status fetch failed: {message}")
            }
            Self::PollCycleFailed { message, .. } => write!(f, "poll cycle failed: {message}"),
        }
    }
}

/// Broadcast sender for diagnostics. Emitting never blocks and never
/// fails, whether or not anyone is subscribed.
pub(crate) struct Diagnostics {
    tx: broadcast::Sender<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(DIAGNOSTIC_CHANNEL_SIZE);
        Self { tx }
    }

    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "diagnostic");
        let _ = self.tx.send(diagnostic);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Diagnostic> {
        self.tx.subscribe()
    }
}
