//! Decoded notification messages from the control link.
//!
//! Notifications are the sole input that mutates hub session state. Each
//! GATT notification carries exactly one complete message; there is no
//! streaming reassembly at this layer.

use bytes::Bytes;
use hublink_core::{Error, HubProperty, IoType, PortId, Result};
use std::fmt;

/// Message type identifiers of the notifications this core consumes.
mod message_type {
    pub const HUB_PROPERTIES: u8 = 0x01;
    pub const ATTACHED_IO: u8 = 0x04;
    pub const PORT_VALUE: u8 = 0x45;
}

/// Hub property operation carried in a hub-properties message.
const OPERATION_UPDATE: u8 = 0x06;

/// Attached-I/O event codes.
const EVENT_DETACHED: u8 = 0x00;
const EVENT_ATTACHED: u8 = 0x01;
const EVENT_ATTACHED_VIRTUAL: u8 = 0x02;

/// Raw value payload of a hub property update.
///
/// The wire encoding depends on the property, so the payload is kept as raw
/// bytes with typed accessors for the encodings the display layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue(Bytes);

impl PropertyValue {
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        PropertyValue(bytes)
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Interpret the payload as a UTF-8 string (advertising name).
    ///
    /// Returns `None` if the payload is not valid UTF-8.
    #[must_use]
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Interpret the payload as a version number (firmware or hardware
    /// version, 32-bit little endian, BCD-encoded fields).
    ///
    /// Returns `None` if the payload is not exactly four bytes.
    #[must_use]
    pub fn as_version_string(&self) -> Option<String> {
        if self.0.len() != 4 {
            return None;
        }
        let raw = u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        let major = (raw >> 28) & 0x7;
        let minor = (raw >> 24) & 0xF;
        let bugfix = (raw >> 16) & 0xFF;
        let build = raw & 0xFFFF;
        Some(format!("{major}.{minor}.{bugfix:02x}.{build:04x}"))
    }

    /// Interpret the payload as a battery charge percentage.
    #[must_use]
    pub fn as_battery_percent(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// Interpret the payload as a signed byte (RSSI).
    #[must_use]
    pub fn as_i8(&self) -> Option<i8> {
        self.0.first().map(|b| *b as i8)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A decoded notification from a hub.
///
/// One of four shapes, matching the messages the session layer reacts to.
/// Everything else on the wire (port output feedback, hub actions, errors
/// from newer firmware) is rejected by the decoder and dropped upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A hub property changed or was reported on request.
    HubProperty {
        property: HubProperty,
        value: PropertyValue,
    },
    /// A peripheral was attached to a port.
    Attached { port: PortId, io_type: IoType },
    /// The peripheral on a port was detached.
    Detached { port: PortId },
    /// A subscribed sensor reported a value.
    SensorValue { port: PortId, value: Bytes },
}

impl Notification {
    /// Parse a complete notification frame, reporting why a frame is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns an error for truncated frames, length-prefix mismatches,
    /// message types this core does not consume, and payloads shorter than
    /// their message type requires.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::MessageTooShort(data.len()));
        }

        // Single-byte length covers every control-link message; the
        // multi-byte extension (bit 7 set) never appears in frames this
        // core consumes.
        let declared = data[0] as usize;
        if data[0] & 0x80 != 0 || declared != data.len() {
            return Err(Error::LengthMismatch {
                declared,
                actual: data.len(),
            });
        }

        let message_type = data[2];
        let payload = &data[3..];

        match message_type {
            message_type::HUB_PROPERTIES => Self::parse_hub_property(payload),
            message_type::ATTACHED_IO => Self::parse_attached_io(payload),
            message_type::PORT_VALUE => Ok(Self::SensorValue {
                port: PortId::new(payload[0]),
                value: Bytes::copy_from_slice(&payload[1..]),
            }),
            other => Err(Error::UnknownMessageType(other)),
        }
    }

    /// Decode a notification, treating every malformed or unrecognized
    /// frame as absent.
    ///
    /// This is the entry point the session layer uses: a frame that does
    /// not decode is ignored, never fatal.
    #[must_use]
    pub fn decode(data: &[u8]) -> Option<Self> {
        Self::parse(data).ok()
    }

    fn parse_hub_property(payload: &[u8]) -> Result<Self> {
        if payload.len() < 2 {
            return Err(Error::InvalidPayload {
                message_type: message_type::HUB_PROPERTIES,
                reason: "missing property or operation byte".to_string(),
            });
        }
        if payload[1] != OPERATION_UPDATE {
            return Err(Error::InvalidPayload {
                message_type: message_type::HUB_PROPERTIES,
                reason: format!("unexpected operation 0x{:02x}", payload[1]),
            });
        }
        Ok(Self::HubProperty {
            property: HubProperty::from_raw(payload[0]),
            value: PropertyValue::new(Bytes::copy_from_slice(&payload[2..])),
        })
    }

    fn parse_attached_io(payload: &[u8]) -> Result<Self> {
        if payload.len() < 2 {
            return Err(Error::InvalidPayload {
                message_type: message_type::ATTACHED_IO,
                reason: "missing port or event byte".to_string(),
            });
        }
        let port = PortId::new(payload[0]);
        match payload[1] {
            EVENT_DETACHED => Ok(Self::Detached { port }),
            EVENT_ATTACHED | EVENT_ATTACHED_VIRTUAL => {
                if payload.len() < 4 {
                    return Err(Error::InvalidPayload {
                        message_type: message_type::ATTACHED_IO,
                        reason: "attached event without IO type".to_string(),
                    });
                }
                let raw = u16::from_le_bytes([payload[2], payload[3]]);
                Ok(Self::Attached {
                    port,
                    io_type: IoType::from_raw(raw),
                })
            }
            other => Err(Error::InvalidPayload {
                message_type: message_type::ATTACHED_IO,
                reason: format!("unknown event 0x{other:02x}"),
            }),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HubProperty { property, value } => {
                write!(f, "property {property} = {value}")
            }
            Self::Attached { port, io_type } => {
                write!(f, "attached {io_type:?} on port {port}")
            }
            Self::Detached { port } => write!(f, "detached port {port}"),
            Self::SensorValue { port, value } => {
                write!(f, "sensor value on port {port}: ")?;
                for byte in value.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}
