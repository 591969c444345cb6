//! Hub property subscription and query commands.

use super::Command;
use hublink_core::HubProperty;

/// Message type of hub property commands and updates.
const MESSAGE_TYPE: u8 = 0x01;

/// Operation requested on a hub property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOperation {
    /// Subscribe to updates of the property.
    EnableUpdates,
    /// Unsubscribe from updates of the property.
    DisableUpdates,
    /// Request a single report of the current value.
    RequestUpdate,
}

impl PropertyOperation {
    #[must_use]
    pub fn as_raw(&self) -> u8 {
        match self {
            Self::EnableUpdates => 0x02,
            Self::DisableUpdates => 0x03,
            Self::RequestUpdate => 0x05,
        }
    }
}

/// Command operating on a hub-level property.
///
/// The bring-up sequence issued after the first post-connect notification
/// is built entirely from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubPropertiesCommand {
    pub property: HubProperty,
    pub operation: PropertyOperation,
}

impl HubPropertiesCommand {
    #[must_use]
    pub fn new(property: HubProperty, operation: PropertyOperation) -> Self {
        Self {
            property,
            operation,
        }
    }

    /// The fixed bring-up sequence: name updates on, one firmware report,
    /// battery updates on.
    ///
    /// Issued exactly once per session, triggered by the first notification
    /// received after connection regardless of that notification's type.
    /// Identical across all hub families.
    #[must_use]
    pub fn bring_up_sequence() -> [Self; 3] {
        [
            Self::new(HubProperty::AdvertisingName, PropertyOperation::EnableUpdates),
            Self::new(HubProperty::FirmwareVersion, PropertyOperation::RequestUpdate),
            Self::new(HubProperty::BatteryVoltage, PropertyOperation::EnableUpdates),
        ]
    }
}

impl Command for HubPropertiesCommand {
    fn message_type(&self) -> u8 {
        MESSAGE_TYPE
    }

    fn payload(&self) -> Vec<u8> {
        vec![self.property.as_raw(), self.operation.as_raw()]
    }
}
