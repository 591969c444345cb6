//! Common test utilities for session integration tests.
//!
//! Helpers here build raw advertisement payloads and notification frames
//! byte-for-byte, so tests exercise the same decode path a real radio
//! feed would.

use hublink_session::{
    Central, CentralEvent, Characteristic, HubEvent, HubId, HubManager, ManagerConfig, MockCentral,
    MockCentralHandle,
};
use tokio::sync::mpsc;

/// Manufacturer data advertising the given system type under the LEGO
/// company identifier.
pub fn manufacturer_data(system_type: u8) -> Vec<u8> {
    vec![0x97, 0x03, 0x00, system_type]
}

/// A control characteristic with both required capabilities.
pub fn usable_characteristic() -> Characteristic {
    Characteristic {
        handle: 0x12,
        supports_write: true,
        supports_notify: true,
    }
}

/// Attached-I/O notification frame for `port` carrying a raw IO type id.
pub fn attached_frame(port: u8, io_type: u16) -> Vec<u8> {
    let io = io_type.to_le_bytes();
    vec![0x0F, 0x00, 0x04, port, 0x01, io[0], io[1], 0, 0, 0, 0, 0, 0, 0, 0]
}

/// Detached-I/O notification frame for `port`.
pub fn detached_frame(port: u8) -> Vec<u8> {
    vec![0x05, 0x00, 0x04, port, 0x00]
}

/// Single port value notification frame.
pub fn sensor_frame(port: u8, value: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x00, 0x00, 0x45, port];
    frame.extend_from_slice(value);
    frame[0] = frame.len() as u8;
    frame
}

/// Hub property update frame.
pub fn property_frame(property: u8, value: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x00, 0x00, 0x01, property, 0x06];
    frame.extend_from_slice(value);
    frame[0] = frame.len() as u8;
    frame
}

/// The three bring-up command frames, in issue order.
pub fn bring_up_frames() -> Vec<Vec<u8>> {
    vec![
        vec![0x05, 0x00, 0x01, 0x01, 0x02], // advertising name: enable updates
        vec![0x05, 0x00, 0x01, 0x03, 0x05], // firmware version: request update
        vec![0x05, 0x00, 0x01, 0x06, 0x02], // battery voltage: enable updates
    ]
}

/// A manager over a mock central plus its observer event stream.
pub fn manager_with_mock(
    config: ManagerConfig,
) -> (
    HubManager<MockCentral>,
    MockCentralHandle,
    mpsc::Receiver<HubEvent>,
) {
    let (central, handle) = MockCentral::new();
    let (manager, events) = HubManager::new(central, config);
    (manager, handle, events)
}

/// Drive one hub through discovery, connection, and characteristic
/// bring-up so it is ready for writes. Returns its identity.
pub async fn connect_hub<C: Central>(manager: &HubManager<C>, system_type: u8) -> HubId {
    let id = HubId::new();
    manager
        .handle_event(CentralEvent::Discovered {
            id,
            manufacturer_data: manufacturer_data(system_type),
        })
        .await;
    manager.handle_event(CentralEvent::Connected { id }).await;
    manager
        .handle_event(CentralEvent::CharacteristicDiscovered {
            id,
            characteristic: usable_characteristic(),
        })
        .await;
    id
}

/// Drain every event currently queued for the observer.
pub fn drain_events(events: &mut mpsc::Receiver<HubEvent>) -> Vec<HubEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}
