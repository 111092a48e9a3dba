// ── Controller ──
//
// Lifecycle of one account connection: login, directory refresh, status
// polling with staleness reconciliation, command execution with
// optimistic cache updates, and snapshot publication.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use secrecy::SecretString;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wavespa_api::{LatestStatus, UserToken, WavespaClient};

use crate::command::SpaCommand;
use crate::config::{AuthCredentials, ControllerConfig};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CoreError;
use crate::model::filter_wear::FILTER_WEAR_ATTRIBUTE;
use crate::model::{BubblesLevel, Device, DeviceStatus, FilterWear, Snapshot};
use crate::store::{DeviceDirectory, MergeOutcome, StatusCache, StatusEntry};
use crate::stream::SnapshotStream;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// The server rejected the token; a new login is needed.
    AuthRequired,
}

// ── Controller ───────────────────────────────────────────────────

/// Main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Commands may run while a
/// poll cycle is in flight; poll cycles never overlap each other.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    directory: DeviceDirectory,
    cache: StatusCache,
    client: ArcSwapOption<WavespaClient>,
    snapshot: watch::Sender<Arc<Snapshot>>,
    connection_state: watch::Sender<ConnectionState>,
    diagnostics: Diagnostics,
    cycle_lock: Mutex<()>,
    cancel: CancellationToken,
    /// Cancelled on disconnect, replaced on every connect.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller {
    /// Create a controller. Does NOT connect; call
    /// [`connect()`](Self::connect) to authenticate and start polling.
    pub fn new(config: ControllerConfig) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ControllerInner {
                config,
                directory: DeviceDirectory::new(),
                cache: StatusCache::new(),
                client: ArcSwapOption::empty(),
                snapshot,
                connection_state,
                diagnostics: Diagnostics::new(),
                cycle_lock: Mutex::new(()),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Authentication ───────────────────────────────────────────

    /// Exchange the configured credentials for a user token.
    ///
    /// Renewal before `expires_at` is left to the caller.
    pub async fn login(config: &ControllerConfig) -> Result<UserToken, CoreError> {
        let AuthCredentials::Credentials { username, password } = &config.auth else {
            return Err(CoreError::Config {
                message: "login requires a username and password".into(),
            });
        };

        let token =
            WavespaClient::login(&config.api_root, username, password, &config.transport())
                .await?;
        debug!(user_id = %token.user_id, expires_at = token.expires_at, "login successful");
        Ok(token)
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Authenticate, run one poll cycle, and spawn the background poll
    /// task when `poll_interval_secs > 0`.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        if let Err(e) = self.establish().await {
            self.inner
                .connection_state
                .send_replace(if e.is_auth() {
                    ConnectionState::AuthRequired
                } else {
                    ConnectionState::Disconnected
                });
            return Err(e);
        }

        let interval_secs = self.inner.config.poll_interval_secs;
        if interval_secs > 0 {
            let ctrl = self.clone();
            let cancel = child.clone();
            self.inner
                .task_handles
                .lock()
                .await
                .push(tokio::spawn(poll_task(ctrl, interval_secs, cancel)));
        }

        self.inner
            .connection_state
            .send_replace(ConnectionState::Connected);
        info!(devices = self.inner.directory.len(), "connected");
        Ok(())
    }

    async fn establish(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let token = match &config.auth {
            AuthCredentials::Token(token) => token.clone(),
            AuthCredentials::Credentials { .. } => Self::login(config).await?.token,
        };
        self.install_client(&token)?;
        self.poll_cycle().await.map(drop)
    }

    /// Use `token` for subsequent requests, replacing any previous client.
    pub fn install_client(&self, token: &SecretString) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let client = WavespaClient::new(&config.api_root, token, &config.transport())?;
        self.inner.client.store(Some(Arc::new(client)));
        Ok(())
    }

    /// Cancel background tasks and drop the client.
    pub async fn disconnect(&self) {
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner.client.store(None);
        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    fn client(&self) -> Result<Arc<WavespaClient>, CoreError> {
        self.inner.client.load_full().ok_or(CoreError::Disconnected)
    }

    // ── Directory ────────────────────────────────────────────────

    /// Replace the directory with the account's current bindings.
    ///
    /// On failure the previous directory is kept.
    pub async fn refresh_directory(&self) -> Result<(), CoreError> {
        let client = self.client()?;
        let devices: Vec<Device> = client
            .list_bindings()
            .await?
            .into_iter()
            .map(Device::from)
            .collect();

        for device in devices.iter().filter(|d| !d.device_type.is_known()) {
            warn!(
                device_id = %device.id,
                product_name = %device.product_name,
                "unknown product, driving it as a Wave spa"
            );
            self.emit(Diagnostic::UnknownDeviceType {
                device_id: device.id.to_string(),
                product_name: device.product_name.clone(),
            });
        }

        debug!(devices = devices.len(), "directory refreshed");
        self.inner.directory.replace(devices);
        Ok(())
    }

    // ── Polling ──────────────────────────────────────────────────

    /// Fetch every listed device's latest status concurrently, merge each
    /// into the cache, and publish a snapshot.
    ///
    /// A failing or slow device does not affect the others: each result is
    /// merged as it arrives, and fetches still pending after
    /// `cycle_timeout` fail on their own. Authentication failures are
    /// returned after every result has been merged.
    pub async fn fetch_all(&self) -> Result<Arc<Snapshot>, CoreError> {
        self.fetch_all_until(Instant::now() + self.inner.config.cycle_timeout)
            .await
    }

    async fn fetch_all_until(&self, deadline: Instant) -> Result<Arc<Snapshot>, CoreError> {
        let client = self.client()?;
        let devices = self.inner.directory.snapshot();
        let timeout_secs = self.inner.config.cycle_timeout.as_secs();

        let mut pending: FuturesUnordered<_> = devices
            .values()
            .map(|device| {
                let client = &client;
                async move {
                    let fetch = client.latest_status(device.id.as_str());
                    let result = match tokio::time::timeout_at(deadline, fetch).await {
                        Ok(result) => result.map_err(CoreError::from),
                        Err(_) => Err(CoreError::Timeout { timeout_secs }),
                    };
                    (device, result)
                }
            })
            .collect();

        let mut auth_error = None;
        while let Some((device, result)) = pending.next().await {
            match result {
                Ok(latest) => self.merge_latest(device, latest),
                Err(err) => {
                    if err.is_auth() {
                        auth_error.get_or_insert(err);
                    } else {
                        warn!(device_id = %device.id, error = %err, "status fetch failed");
                        self.emit(Diagnostic::StatusFetchFailed {
                            device_id: device.id.to_string(),
                            message: err.to_string(),
                        });
                    }
                }
            }
        }

        let snapshot = self.publish();
        match auth_error {
            Some(err) => {
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::AuthRequired);
                Err(err)
            }
            None => Ok(snapshot),
        }
    }

    fn merge_latest(&self, device: &Device, latest: LatestStatus) {
        let device_id = &device.id;
        if latest.updated_at == 0 {
            debug!(%device_id, "no data reported yet");
            self.emit(Diagnostic::NoData {
                device_id: device_id.to_string(),
            });
            return;
        }

        // Filter wear is tracked whether or not the status itself is kept.
        if let Some(raw) = latest.attr.get(FILTER_WEAR_ATTRIBUTE) {
            match FilterWear::from_attribute(raw) {
                Ok(wear) => self.inner.directory.record_filter_wear(device_id, wear),
                Err(e) => {
                    warn!(%device_id, error = %e, "ignoring filter wear");
                    self.emit(Diagnostic::InvalidFilterWear {
                        device_id: device_id.to_string(),
                        raw: raw.to_string(),
                    });
                }
            }
        }

        let unmapped_bubbles = device.family.unmapped_bubbles(&latest.attr);
        match self.inner.cache.merge(device_id, StatusEntry::from(latest)) {
            MergeOutcome::NoData => {}
            MergeOutcome::Stale { server, cached } => {
                debug!(%device_id, server, cached, "discarding stale status");
                self.emit(Diagnostic::StaleStatusDiscarded {
                    device_id: device_id.to_string(),
                    server,
                    cached,
                });
            }
            MergeOutcome::Applied => {
                if let Some(raw) = unmapped_bubbles {
                    warn!(%device_id, raw, "unrecognised bubbles value, reading as OFF");
                    self.emit(Diagnostic::UnmappedBubblesValue {
                        device_id: device_id.to_string(),
                        raw,
                    });
                }
            }
        }
    }

    /// One full cycle: directory refresh, then `fetch_all`.
    ///
    /// Cycles are serialised and share one `cycle_timeout` deadline. A
    /// failed directory refresh is reported and the previous directory is
    /// used; a refresh still running at the deadline abandons the cycle.
    pub async fn poll_cycle(&self) -> Result<Arc<Snapshot>, CoreError> {
        let _guard = self.inner.cycle_lock.lock().await;
        let cycle_timeout = self.inner.config.cycle_timeout;
        let deadline = Instant::now() + cycle_timeout;

        match tokio::time::timeout_at(deadline, self.refresh_directory()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_auth() => return Err(e),
            Ok(Err(e)) => {
                warn!(error = %e, "directory refresh failed, keeping previous listing");
                self.emit(Diagnostic::DirectoryRefreshFailed {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(CoreError::Timeout {
                    timeout_secs: cycle_timeout.as_secs(),
                });
            }
        }

        self.fetch_all_until(deadline).await
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Send `command` to a device and apply its effects to the cache.
    ///
    /// Devices without a cached status are rejected before any request is
    /// made. The cache is only touched once the server accepted the write.
    pub async fn execute(&self, device_id: &str, command: SpaCommand) -> Result<(), CoreError> {
        let Some(cached) = self.inner.cache.get(device_id) else {
            return Err(CoreError::UnrecognizedDevice {
                device_id: device_id.to_owned(),
            });
        };

        let family = self.inner.directory.family_of(device_id);
        let plan = family.plan(&command, &cached.attrs)?;
        let client = self.client()?;

        debug!(
            device_id,
            command = command.as_ref(),
            attribute = plan.attribute,
            "sending control request"
        );
        client.control(device_id, &plan.request_attrs()).await?;

        let timestamp =
            self.inner
                .cache
                .apply_optimistic(device_id, Utc::now().timestamp(), &plan.writes)?;
        debug!(device_id, timestamp, writes = plan.writes.len(), "optimistic update applied");

        self.publish();
        Ok(())
    }

    pub async fn set_power(&self, device_id: &str, on: bool) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetPower(on)).await
    }

    pub async fn set_filter(&self, device_id: &str, on: bool) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetFilter(on)).await
    }

    pub async fn set_heater(&self, device_id: &str, on: bool) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetHeater(on)).await
    }

    pub async fn set_bubbles(&self, device_id: &str, level: BubblesLevel) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetBubbles(level)).await
    }

    pub async fn set_locked(&self, device_id: &str, locked: bool) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetLocked(locked)).await
    }

    pub async fn set_target_temperature(&self, device_id: &str, target: i64) -> Result<(), CoreError> {
        self.execute(device_id, SpaCommand::SetTargetTemperature(target))
            .await
    }

    // ── State observation ────────────────────────────────────────

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn snapshots(&self) -> SnapshotStream {
        SnapshotStream::new(self.inner.snapshot.subscribe())
    }

    pub fn diagnostics(&self) -> broadcast::Receiver<Diagnostic> {
        self.inner.diagnostics.subscribe()
    }

    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Listed devices, in listing order.
    pub fn devices(&self) -> Vec<Arc<Device>> {
        self.inner.directory.snapshot().values().cloned().collect()
    }

    pub fn device(&self, device_id: &str) -> Option<Arc<Device>> {
        self.inner.directory.get(device_id)
    }

    pub fn filter_wear(&self, device_id: &str) -> Option<FilterWear> {
        self.inner.directory.filter_wear(device_id)
    }

    // ── Private helpers ──────────────────────────────────────────

    fn emit(&self, diagnostic: Diagnostic) {
        self.inner.diagnostics.emit(diagnostic);
    }

    /// Rebuild the snapshot from the cache and publish it.
    fn publish(&self) -> Arc<Snapshot> {
        let directory = &self.inner.directory;
        let devices = self
            .inner
            .cache
            .entries()
            .into_iter()
            .map(|(device_id, entry)| {
                let status = DeviceStatus {
                    filter_wear: directory.filter_wear(device_id.as_str()),
                    family: directory.family_of(device_id.as_str()),
                    device_id: device_id.clone(),
                    timestamp: entry.timestamp,
                    attrs: entry.attrs,
                };
                (device_id, status)
            })
            .collect();

        let snapshot = Arc::new(Snapshot {
            devices,
            taken_at: Some(Utc::now()),
        });
        self.inner.snapshot.send_replace(Arc::clone(&snapshot));
        snapshot
    }
}

// ── Background tasks ─────────────────────────────────────────────

async fn poll_task(controller: Controller, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // connect() already ran the first cycle

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = controller.poll_cycle().await {
                    warn!(error = %e, "poll cycle failed");
                    controller.emit(Diagnostic::PollCycleFailed {
                        message: e.to_string(),
                        auth_required: e.is_auth(),
                    });
                }
            }
        }
    }
}
