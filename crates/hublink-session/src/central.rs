//! Radio capability boundary.
//!
//! This module defines the contract between the session manager and the
//! platform BLE central (CoreBluetooth, BlueZ, a test double). The manager
//! calls into the [`Central`] trait for every radio operation and observes
//! completions as [`CentralEvent`]s delivered over a channel, so the radio
//! backend never holds a reference back into session state.
//!
//! All trait methods use native `async fn` (Rust 1.90 + Edition 2024
//! RPITIT); backends are plugged in via a generic parameter on the manager,
//! not trait objects.

#![allow(async_fn_in_trait)]

use hublink_core::{HubId, Result};
use uuid::Uuid;

/// The write/notify GATT characteristic of one hub's control link.
///
/// The handle is only meaningful to the radio backend that produced it.
/// Capability flags are checked once, when the characteristic is
/// discovered; a characteristic lacking either flag is never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Characteristic {
    /// Backend-assigned attribute handle.
    pub handle: u16,

    /// Characteristic supports write requests.
    pub supports_write: bool,

    /// Characteristic supports value notifications.
    pub supports_notify: bool,
}

impl Characteristic {
    /// Whether this characteristic can carry control-link traffic.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.supports_write && self.supports_notify
    }
}

/// Asynchronous events delivered by the radio backend.
///
/// Events for one hub are delivered in the order the radio observed them;
/// the manager processes the stream on a single consumer so that order is
/// preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CentralEvent {
    /// An advertisement matching the scan filter was received.
    Discovered {
        id: HubId,
        manufacturer_data: Vec<u8>,
    },

    /// A connect request completed successfully.
    Connected { id: HubId },

    /// A connect request failed.
    FailedToConnect { id: HubId, cause: String },

    /// An established connection was torn down, intentionally or not.
    Disconnected { id: HubId, cause: Option<String> },

    /// Characteristic discovery finished for the control-link service.
    CharacteristicDiscovered {
        id: HubId,
        characteristic: Characteristic,
    },

    /// A notification payload arrived on the control-link characteristic.
    ValueUpdated { id: HubId, value: Vec<u8> },
}

/// Platform BLE central abstraction.
///
/// Exactly one central is shared process-wide. Operations are dispatched
/// and return once handed to the radio; their outcomes arrive later as
/// [`CentralEvent`]s. `write_value` in particular returns once the payload
/// is queued, not once the remote device processed it.
pub trait Central: Send + Sync {
    /// Whether the radio is powered and ready for scan/connect requests.
    ///
    /// The manager treats a not-ready central as "try again later": scan
    /// requests become no-ops rather than errors.
    fn is_ready(&self) -> bool;

    /// Start scanning for peripherals advertising the given service.
    async fn start_scan(&self, service: Uuid) -> Result<()>;

    /// Cancel an in-progress scan.
    async fn stop_scan(&self) -> Result<()>;

    /// Initiate a connection to a discovered peripheral.
    async fn connect(&self, id: HubId) -> Result<()>;

    /// Cancel a pending or established connection.
    ///
    /// Teardown is confirmed later by a [`CentralEvent::Disconnected`];
    /// it is never assumed synchronous.
    async fn cancel_connection(&self, id: HubId) -> Result<()>;

    /// Discover the control-link characteristic on a connected peripheral.
    async fn discover_characteristic(
        &self,
        id: HubId,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<()>;

    /// Enable or disable notification delivery on a characteristic.
    async fn set_notify(
        &self,
        id: HubId,
        characteristic: &Characteristic,
        enabled: bool,
    ) -> Result<()>;

    /// Queue a write of `value` to a characteristic.
    async fn write_value(
        &self,
        id: HubId,
        characteristic: &Characteristic,
        value: &[u8],
    ) -> Result<()>;
}
