//! Multi-hub session manager.
//!
//! The [`HubManager`] owns the device lifecycle for every hub: scanning,
//! per-hub connection bring-up, characteristic subscription, notification
//! dispatch, and the write-serialization path. It is the single owner of
//! all per-hub state; observers receive lifecycle events and read-only
//! snapshots, never a mutable handle into the maps.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  CentralEvent   ┌────────────┐  HubEvent   ┌──────────┐
//! │ BLE radio  │────(mpsc)──────►│ HubManager │───(mpsc)───►│ Observer │
//! │ backend    │◄── Central ops ─│            │             │ (UI/log) │
//! └────────────┘                 └────────────┘             └──────────┘
//! ```
//!
//! Radio callbacks and application commands are two independent call
//! paths into shared state; a single async mutex with short critical
//! sections guards the identity→session map, and all radio I/O happens
//! outside the lock. Event processing is driven by one consumer of the
//! [`CentralEvent`] stream ([`HubManager::run`]), which serializes radio
//! callbacks and therefore preserves per-hub notification order end to
//! end.
//!
//! # State machine per hub
//!
//! ```text
//! unknown ─discovered─► pending ─connected─► connected ─characteristic─► ready
//!                          │                    │                          │
//!                          └─── failed/disconnected: session dropped ──────┘
//! ```
//!
//! `ready` is the only state in which [`HubManager::write`] reaches the
//! radio; everywhere else writes are silently dropped, so a control
//! surface issuing rapid power commands never blocks or backlogs against
//! a hub that has gone away.

use crate::central::{Central, CentralEvent, Characteristic};
use crate::dispatcher::dispatch;
use crate::session::{HubSession, HubSnapshot, SessionPhase};
use hublink_core::constants::{CONTROL_CHARACTERISTIC_UUID, CONTROL_SERVICE_UUID};
use hublink_core::{HubId, HubKind};
use hublink_protocol::{Command, Notification};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, trace, warn};

/// Capacity of the observer event channel.
///
/// Events are delivered with `try_send`; a receiver that stops draining
/// loses events rather than blocking the manager.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lifecycle and notification events delivered to the observer.
///
/// For one hub, events arrive in exactly the order the manager processed
/// the underlying radio callbacks.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum HubEvent {
    /// A hub completed its connect request.
    Connected { id: HubId, kind: HubKind },

    /// A connect request failed; all state for the hub was discarded.
    FailedToConnect { id: HubId, cause: String },

    /// A hub disconnected (intentionally or radio-driven); all state for
    /// the hub was discarded.
    Disconnected { id: HubId, cause: Option<String> },

    /// A decoded notification was processed for a hub.
    Notification {
        id: HubId,
        notification: Notification,
    },
}

/// Scan behavior after the first successful connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Stop scanning once one hub connects (single-hub control surface).
    #[default]
    SingleTarget,

    /// Keep scanning so additional hubs can join.
    MultiTarget,
}

/// Configuration for the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagerConfig {
    pub scan_policy: ScanPolicy,
}

/// Shared mutable state: every per-hub field lives in one map entry.
struct ManagerState {
    sessions: HashMap<HubId, HubSession>,
    scanning: bool,
}

/// Session manager for one process-wide radio central.
///
/// Cheaply cloneable; clones share the same central and session state, so
/// an application thread can issue commands while the event loop runs
/// elsewhere.
///
/// # Examples
///
/// ```no_run
/// use hublink_session::{HubManager, ManagerConfig, MockCentral};
///
/// #[tokio::main]
/// async fn main() {
///     let (central, _handle) = MockCentral::new();
///     let (manager, mut events) = HubManager::new(central, ManagerConfig::default());
///
///     manager.start_scan().await;
///
///     while let Some(event) = events.recv().await {
///         println!("hub event: {event:?}");
///     }
/// }
/// ```
pub struct HubManager<C: Central> {
    central: Arc<C>,
    state: Arc<Mutex<ManagerState>>,
    event_tx: mpsc::Sender<HubEvent>,
    config: ManagerConfig,
}

impl<C: Central> Clone for HubManager<C> {
    fn clone(&self) -> Self {
        Self {
            central: Arc::clone(&self.central),
            state: Arc::clone(&self.state),
            event_tx: self.event_tx.clone(),
            config: self.config,
        }
    }
}

impl<C: Central> HubManager<C> {
    /// Create a manager around a radio central.
    ///
    /// Returns the manager and the receiver for observer events.
    pub fn new(central: C, config: ManagerConfig) -> (Self, mpsc::Receiver<HubEvent>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let manager = Self {
            central: Arc::new(central),
            state: Arc::new(Mutex::new(ManagerState {
                sessions: HashMap::new(),
                scanning: false,
            })),
            event_tx,
            config,
        };
        (manager, event_rx)
    }

    /// Request discovery of hubs advertising the control-link service.
    ///
    /// A no-op (not an error) while the radio is not ready, and idempotent
    /// while a scan is already running.
    pub async fn start_scan(&self) {
        if !self.central.is_ready() {
            debug!("radio not ready, scan request ignored");
            return;
        }

        {
            let mut state = self.state.lock().await;
            if state.scanning {
                return;
            }
            state.scanning = true;
        }

        if let Err(e) = self.central.start_scan(CONTROL_SERVICE_UUID).await {
            warn!(error = %e, "scan request failed");
            self.state.lock().await.scanning = false;
        }
    }

    /// Cancel discovery; idempotent.
    pub async fn stop_scan(&self) {
        {
            let mut state = self.state.lock().await;
            if !state.scanning {
                return;
            }
            state.scanning = false;
        }

        if let Err(e) = self.central.stop_scan().await {
            warn!(error = %e, "stop scan failed");
        }
    }

    /// Request disconnection of one hub.
    ///
    /// Teardown happens when the radio confirms via
    /// [`CentralEvent::Disconnected`]; until then the session stays live.
    /// No-op for an unknown identity.
    pub async fn disconnect(&self, id: HubId) {
        let known = self.state.lock().await.sessions.contains_key(&id);
        if !known {
            return;
        }
        if let Err(e) = self.central.cancel_connection(id).await {
            warn!(%id, error = %e, "cancel connection failed");
        }
    }

    /// Request disconnection of every live hub.
    pub async fn disconnect_all(&self) {
        let ids: Vec<HubId> = self.state.lock().await.sessions.keys().copied().collect();
        for id in ids {
            if let Err(e) = self.central.cancel_connection(id).await {
                warn!(%id, error = %e, "cancel connection failed");
            }
        }
    }

    /// Write raw command bytes to a hub.
    ///
    /// Silently dropped unless the hub's session is in the ready state;
    /// callers gate on readiness rather than the manager queuing or
    /// erroring. Returns once the payload is handed to the radio's send
    /// queue.
    pub async fn write(&self, id: HubId, value: &[u8]) {
        let characteristic = {
            let state = self.state.lock().await;
            state.sessions.get(&id).and_then(HubSession::characteristic)
        };

        let Some(characteristic) = characteristic else {
            trace!(%id, "write dropped, hub not ready");
            return;
        };

        if let Err(e) = self.central.write_value(id, &characteristic, value).await {
            warn!(%id, error = %e, "write failed");
        }
    }

    /// Encode and write a typed command to a hub.
    ///
    /// Same fail-silent contract as [`HubManager::write`].
    pub async fn send(&self, id: HubId, command: &impl Command) {
        self.write(id, &command.encode()).await;
    }

    /// True iff at least one hub is past the pending phase.
    pub async fn is_any_connected(&self) -> bool {
        self.state
            .lock()
            .await
            .sessions
            .values()
            .any(|session| !matches!(session.phase, SessionPhase::Pending))
    }

    /// Identities and kinds of all hubs past the pending phase.
    pub async fn connected_hubs(&self) -> Vec<(HubId, HubKind)> {
        self.state
            .lock()
            .await
            .sessions
            .iter()
            .filter(|(_, session)| !matches!(session.phase, SessionPhase::Pending))
            .map(|(id, session)| (*id, session.kind()))
            .collect()
    }

    /// Read-only snapshot of one hub's model.
    pub async fn hub_snapshot(&self, id: HubId) -> Option<HubSnapshot> {
        self.state
            .lock()
            .await
            .sessions
            .get(&id)
            .map(HubSession::snapshot)
    }

    /// Process radio events until the channel closes.
    ///
    /// Run this on one task; the single consumer is what guarantees
    /// per-hub notification ordering.
    pub async fn run(&self, mut events: mpsc::Receiver<CentralEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("central event channel closed, event loop exiting");
    }

    /// Process one radio event.
    ///
    /// Exposed so tests and embedding event loops can drive the manager
    /// deterministically; production code normally uses
    /// [`HubManager::run`].
    pub async fn handle_event(&self, event: CentralEvent) {
        match event {
            CentralEvent::Discovered {
                id,
                manufacturer_data,
            } => self.on_discovered(id, &manufacturer_data).await,
            CentralEvent::Connected { id } => self.on_connected(id).await,
            CentralEvent::FailedToConnect { id, cause } => {
                self.on_failed_to_connect(id, cause).await;
            }
            CentralEvent::Disconnected { id, cause } => self.on_disconnected(id, cause).await,
            CentralEvent::CharacteristicDiscovered { id, characteristic } => {
                self.on_characteristic_discovered(id, characteristic).await;
            }
            CentralEvent::ValueUpdated { id, value } => self.on_value_updated(id, &value).await,
        }
    }

    async fn on_discovered(&self, id: HubId, manufacturer_data: &[u8]) {
        let Some(kind) = hublink_protocol::identify_hub_kind(manufacturer_data) else {
            trace!(%id, "advertisement without a known hub kind ignored");
            return;
        };

        {
            let mut state = self.state.lock().await;
            if state.sessions.contains_key(&id) {
                debug!(%id, "duplicate discovery ignored");
                return;
            }
            state.sessions.insert(id, HubSession::new(kind));
        }

        info!(%id, %kind, "hub discovered, connecting");
        if let Err(e) = self.central.connect(id).await {
            warn!(%id, error = %e, "connect request failed");
            self.state.lock().await.sessions.remove(&id);
            self.emit(HubEvent::FailedToConnect {
                id,
                cause: e.to_string(),
            });
        }
    }

    async fn on_connected(&self, id: HubId) {
        let kind = {
            let mut state = self.state.lock().await;
            match state.sessions.get_mut(&id) {
                Some(session) => {
                    session.phase = SessionPhase::Connected;
                    Some(session.kind())
                }
                None => None,
            }
        };

        let Some(kind) = kind else {
            debug!(%id, "connect confirmation for unknown hub ignored");
            return;
        };

        info!(%id, %kind, "hub connected");

        if self.config.scan_policy == ScanPolicy::SingleTarget {
            self.stop_scan().await;
        }

        if let Err(e) = self
            .central
            .discover_characteristic(id, CONTROL_SERVICE_UUID, CONTROL_CHARACTERISTIC_UUID)
            .await
        {
            warn!(%id, error = %e, "characteristic discovery request failed");
        }

        self.emit(HubEvent::Connected { id, kind });
    }

    async fn on_failed_to_connect(&self, id: HubId, cause: String) {
        let removed = self.state.lock().await.sessions.remove(&id).is_some();
        if !removed {
            debug!(%id, "connect failure for unknown hub ignored");
            return;
        }
        warn!(%id, %cause, "hub failed to connect");
        self.emit(HubEvent::FailedToConnect { id, cause });
    }

    async fn on_disconnected(&self, id: HubId, cause: Option<String>) {
        let removed = self.state.lock().await.sessions.remove(&id).is_some();
        if !removed {
            debug!(%id, "disconnect for unknown hub ignored");
            return;
        }
        info!(%id, cause = cause.as_deref().unwrap_or("requested"), "hub disconnected");
        self.emit(HubEvent::Disconnected { id, cause });
    }

    async fn on_characteristic_discovered(&self, id: HubId, characteristic: Characteristic) {
        if !characteristic.is_usable() {
            // Deliberately silent upward: the session simply never
            // becomes writable (same posture as unrecognized
            // advertisements).
            debug!(%id, "characteristic lacks write+notify, rejected");
            return;
        }

        let recorded = {
            let mut state = self.state.lock().await;
            match state.sessions.get_mut(&id) {
                Some(session) => {
                    session.phase = SessionPhase::Ready(characteristic);
                    true
                }
                None => false,
            }
        };

        if !recorded {
            debug!(%id, "characteristic for unknown hub ignored");
            return;
        }

        debug!(%id, handle = characteristic.handle, "control characteristic ready");
        if let Err(e) = self.central.set_notify(id, &characteristic, true).await {
            warn!(%id, error = %e, "enabling notifications failed");
        }
    }

    async fn on_value_updated(&self, id: HubId, value: &[u8]) {
        let Some(notification) = Notification::decode(value) else {
            debug!(%id, "undecodable notification dropped");
            return;
        };

        let (follow_ups, characteristic) = {
            let mut state = self.state.lock().await;
            let Some(session) = state.sessions.get_mut(&id) else {
                debug!(%id, "notification for unknown hub dropped");
                return;
            };
            let follow_ups = dispatch(session, &notification);
            (follow_ups, session.characteristic())
        };

        trace!(%id, %notification, follow_ups = follow_ups.len(), "notification processed");

        if let Some(characteristic) = characteristic {
            for frame in &follow_ups {
                if let Err(e) = self.central.write_value(id, &characteristic, frame).await {
                    warn!(%id, error = %e, "follow-up write failed");
                }
            }
        } else if !follow_ups.is_empty() {
            debug!(%id, "follow-up commands dropped, hub not writable");
        }

        self.emit(HubEvent::Notification { id, notification });
    }

    /// Hand an event to the observer without ever blocking the manager.
    fn emit(&self, event: HubEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            debug!(error = %e, "observer event dropped");
        }
    }
}
