//! Mock radio central for testing and development.
//!
//! Simulates the platform BLE central without any hardware: the handle
//! records every radio call the manager issues so tests can assert on the
//! exact call sequence, and radio callbacks are injected by feeding
//! [`CentralEvent`]s straight into the manager under test.

use crate::central::{Central, Characteristic};
use hublink_core::{Error, HubId, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// One recorded call into the radio boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    StartScan {
        service: Uuid,
    },
    StopScan,
    Connect {
        id: HubId,
    },
    CancelConnection {
        id: HubId,
    },
    DiscoverCharacteristic {
        id: HubId,
        service: Uuid,
        characteristic: Uuid,
    },
    SetNotify {
        id: HubId,
        handle: u16,
        enabled: bool,
    },
    Write {
        id: HubId,
        value: Vec<u8>,
    },
}

#[derive(Default)]
struct Shared {
    ready: AtomicBool,
    fail_all: AtomicBool,
    calls: std::sync::Mutex<Vec<RadioCall>>,
}

impl Shared {
    fn record(&self, call: RadioCall) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(Error::RadioError("injected failure".to_string()));
        }
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
        Ok(())
    }
}

/// Mock radio central.
///
/// # Examples
///
/// ```
/// use hublink_session::{MockCentral, RadioCall};
/// use hublink_core::HubId;
///
/// #[tokio::main]
/// async fn main() {
///     use hublink_session::Central;
///
///     let (central, handle) = MockCentral::new();
///     let id = HubId::new();
///
///     central.connect(id).await.unwrap();
///     assert_eq!(handle.calls(), vec![RadioCall::Connect { id }]);
/// }
/// ```
pub struct MockCentral {
    shared: Arc<Shared>,
}

impl MockCentral {
    /// Create a mock central (powered on) and its control handle.
    pub fn new() -> (Self, MockCentralHandle) {
        let shared = Arc::new(Shared::default());
        shared.ready.store(true, Ordering::SeqCst);
        let central = Self {
            shared: Arc::clone(&shared),
        };
        (central, MockCentralHandle { shared })
    }
}

impl Central for MockCentral {
    fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::SeqCst)
    }

    async fn start_scan(&self, service: Uuid) -> Result<()> {
        self.shared.record(RadioCall::StartScan { service })
    }

    async fn stop_scan(&self) -> Result<()> {
        self.shared.record(RadioCall::StopScan)
    }

    async fn connect(&self, id: HubId) -> Result<()> {
        self.shared.record(RadioCall::Connect { id })
    }

    async fn cancel_connection(&self, id: HubId) -> Result<()> {
        self.shared.record(RadioCall::CancelConnection { id })
    }

    async fn discover_characteristic(
        &self,
        id: HubId,
        service: Uuid,
        characteristic: Uuid,
    ) -> Result<()> {
        self.shared.record(RadioCall::DiscoverCharacteristic {
            id,
            service,
            characteristic,
        })
    }

    async fn set_notify(
        &self,
        id: HubId,
        characteristic: &Characteristic,
        enabled: bool,
    ) -> Result<()> {
        self.shared.record(RadioCall::SetNotify {
            id,
            handle: characteristic.handle,
            enabled,
        })
    }

    async fn write_value(
        &self,
        id: HubId,
        _characteristic: &Characteristic,
        value: &[u8],
    ) -> Result<()> {
        self.shared.record(RadioCall::Write {
            id,
            value: value.to_vec(),
        })
    }
}

/// Control handle for a [`MockCentral`].
///
/// Held by the test alongside the manager; the central itself is moved
/// into the manager.
pub struct MockCentralHandle {
    shared: Arc<Shared>,
}

impl MockCentralHandle {
    /// Simulate the radio powering on or off.
    pub fn set_ready(&self, ready: bool) {
        self.shared.ready.store(ready, Ordering::SeqCst);
    }

    /// Make every subsequent radio call fail.
    pub fn fail_all(&self, fail: bool) {
        self.shared.fail_all.store(fail, Ordering::SeqCst);
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> Vec<RadioCall> {
        self.shared
            .calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded calls.
    pub fn take_calls(&self) -> Vec<RadioCall> {
        std::mem::take(
            &mut *self
                .shared
                .calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }

    /// Payloads of all writes issued to `id`, in issue order.
    pub fn writes_to(&self, id: HubId) -> Vec<Vec<u8>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RadioCall::Write { id: to, value } if to == id => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Number of connect requests issued to `id`.
    pub fn connect_count(&self, id: HubId) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RadioCall::Connect { id: to } if *to == id))
            .count()
    }
}
