//! Per-hub mutable state.
//!
//! One [`HubSession`] exists for every identity the manager is connecting
//! to or has connected, bundling every per-hub field in a single record so
//! the parallel maps of older revisions cannot drift out of sync. A
//! session is created the instant a connect attempt is initiated and
//! destroyed the instant a disconnect or connect failure is observed.

use crate::central::Characteristic;
use bytes::Bytes;
use hublink_core::{HubKind, HubProperty, IoType, PortId};
use hublink_protocol::{Notification, PropertyValue};
use std::collections::HashMap;

/// Connection bring-up phase of one hub.
///
/// ```text
/// Pending ──connected──► Connected ──characteristic──► Ready
///    │                       │                           │
///    └───────────────────────┴───── gone (session dropped)
/// ```
///
/// `Ready` is the only phase in which writes reach the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Connect requested, outcome not yet observed.
    Pending,
    /// Link established, control characteristic not yet discovered.
    Connected,
    /// Control characteristic recorded; the hub is writable.
    Ready(Characteristic),
}

/// Mutable model of one connected hub.
///
/// Mutated only by notification-driven events; application-issued commands
/// never touch it.
#[derive(Debug, Clone)]
pub struct HubSession {
    /// Hub family, fixed at discovery time.
    kind: HubKind,

    /// Bring-up phase.
    pub(crate) phase: SessionPhase,

    /// True until the first notification after connection has been
    /// processed and the bring-up sequence issued.
    pub(crate) initializing: bool,

    /// Peripheral currently mounted on each port.
    pub(crate) connected_ios: HashMap<PortId, IoType>,

    /// Latest cached raw reading per subscribed port.
    pub(crate) sensor_values: HashMap<PortId, Bytes>,

    /// Display-oriented property cache.
    pub(crate) advertising_name: Option<String>,
    pub(crate) firmware_version: Option<String>,
    pub(crate) battery_percent: Option<u8>,
}

impl HubSession {
    /// Create the session for a freshly initiated connect attempt.
    #[must_use]
    pub(crate) fn new(kind: HubKind) -> Self {
        Self {
            kind,
            phase: SessionPhase::Pending,
            initializing: true,
            connected_ios: HashMap::new(),
            sensor_values: HashMap::new(),
            advertising_name: None,
            firmware_version: None,
            battery_percent: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> HubKind {
        self.kind
    }

    /// The control characteristic, once the session is ready for writes.
    #[must_use]
    pub(crate) fn characteristic(&self) -> Option<Characteristic> {
        match self.phase {
            SessionPhase::Ready(characteristic) => Some(characteristic),
            _ => None,
        }
    }

    /// Apply one model mutation from a decoded notification.
    ///
    /// Follow-up command generation lives in the dispatcher; this only
    /// keeps the port maps and property cache consistent with the
    /// notification stream.
    pub(crate) fn apply(&mut self, notification: &Notification) {
        match notification {
            Notification::Attached { port, io_type } => {
                self.connected_ios.insert(*port, *io_type);
            }
            Notification::Detached { port } => {
                self.connected_ios.remove(port);
                self.sensor_values.remove(port);
            }
            Notification::SensorValue { port, value } => {
                self.sensor_values.insert(*port, value.clone());
            }
            Notification::HubProperty { property, value } => {
                self.cache_property(*property, value);
            }
        }
    }

    fn cache_property(&mut self, property: HubProperty, value: &PropertyValue) {
        match property {
            HubProperty::AdvertisingName => {
                self.advertising_name = value.as_utf8().map(str::to_owned);
            }
            HubProperty::FirmwareVersion => {
                self.firmware_version = value.as_version_string();
            }
            HubProperty::BatteryVoltage => {
                self.battery_percent = value.as_battery_percent();
            }
            _ => {}
        }
    }

    /// Read-only snapshot for observers.
    #[must_use]
    pub(crate) fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            kind: self.kind,
            ready: matches!(self.phase, SessionPhase::Ready(_)),
            connected_ios: self.connected_ios.clone(),
            sensor_values: self.sensor_values.clone(),
            advertising_name: self.advertising_name.clone(),
            firmware_version: self.firmware_version.clone(),
            battery_percent: self.battery_percent,
        }
    }
}

/// Point-in-time copy of one hub's model, handed to observers.
///
/// External code never receives a mutable handle into the session maps.
#[derive(Debug, Clone)]
pub struct HubSnapshot {
    pub kind: HubKind,
    /// Whether the session currently accepts writes.
    pub ready: bool,
    pub connected_ios: HashMap<PortId, IoType>,
    pub sensor_values: HashMap<PortId, Bytes>,
    pub advertising_name: Option<String>,
    pub firmware_version: Option<String>,
    pub battery_percent: Option<u8>,
}

impl HubSnapshot {
    /// Peripheral mounted on `port`, if any.
    #[must_use]
    pub fn io_on(&self, port: PortId) -> Option<IoType> {
        self.connected_ios.get(&port).copied()
    }

    /// Latest cached reading for `port`, if any.
    #[must_use]
    pub fn sensor_value(&self, port: PortId) -> Option<&Bytes> {
        self.sensor_values.get(&port)
    }

    /// Ports with a motor-class peripheral attached.
    #[must_use]
    pub fn motor_ports(&self) -> Vec<PortId> {
        let mut ports: Vec<PortId> = self
            .connected_ios
            .iter()
            .filter(|(_, io)| io.is_motor())
            .map(|(port, _)| *port)
            .collect();
        ports.sort_unstable();
        ports
    }
}
