//! Port input format setup (sensor subscribe/unsubscribe).

use super::Command;
use hublink_core::{IoType, PortId};

/// Message type of port input format setup commands.
const MESSAGE_TYPE: u8 = 0x41;

/// Configure how a port reports sensor values.
///
/// The dispatcher issues one with `notifications = true` when a peripheral
/// attaches and one with `notifications = false` when it detaches. The mode
/// defaults to the attached IO type's preferred sensor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInputFormatSetupCommand {
    pub port: PortId,
    pub mode: u8,
    /// Minimum change required before the hub reports a new value.
    pub delta: u32,
    pub notifications: bool,
}

impl PortInputFormatSetupCommand {
    #[must_use]
    pub fn new(port: PortId, mode: u8, delta: u32, notifications: bool) -> Self {
        Self {
            port,
            mode,
            delta,
            notifications,
        }
    }

    /// Subscribe to value updates for a freshly attached peripheral.
    #[must_use]
    pub fn subscribe(port: PortId, io_type: IoType) -> Self {
        Self::new(port, io_type.default_sensor_mode(), 1, true)
    }

    /// Stop value updates for a detached peripheral's port.
    #[must_use]
    pub fn unsubscribe(port: PortId) -> Self {
        Self::new(port, 0x00, 1, false)
    }
}

impl Command for PortInputFormatSetupCommand {
    fn message_type(&self) -> u8 {
        MESSAGE_TYPE
    }

    fn payload(&self) -> Vec<u8> {
        let mut payload = vec![self.port.as_u8(), self.mode];
        payload.extend_from_slice(&self.delta.to_le_bytes());
        payload.push(u8::from(self.notifications));
        payload
    }
}
