//! LEGO Wireless Protocol 3.0 codec for the hublink control link.
//!
//! This crate encodes outgoing commands and decodes incoming notifications
//! for the single write/notify GATT characteristic every supported hub
//! exposes. It is a pure codec: no I/O, no session state. The session
//! manager (`hublink-session`) treats it as an opaque boundary:
//!
//! ```text
//! Command  ──encode()──►  bytes  ──(GATT write)──►  hub
//! hub  ──(GATT notify)──►  bytes  ──Notification::decode()──►  Notification
//! ```
//!
//! # Wire format
//!
//! Every message shares the common header of the LEGO Wireless Protocol:
//!
//! ```text
//! [ length | hub id (0x00) | message type | payload... ]
//! ```
//!
//! The length byte counts the whole message including the header. All
//! traffic this core produces or consumes fits in a single GATT payload, so
//! the multi-byte length extension of the protocol is treated as malformed
//! input rather than reassembled.
//!
//! # Decoding posture
//!
//! [`Notification::decode`] returns `None` for anything malformed or
//! unrecognized. An unknown message type from newer firmware must never
//! tear down a session, so the session layer drops such frames silently.
//! [`Notification::parse`] exposes the precise rejection reason for
//! diagnostics and tests.

pub mod commands;
pub mod identify;
pub mod message;

pub use commands::{
    Color, Command, HubPropertiesCommand, MotorStartPowerCommand, PortInputFormatSetupCommand,
    PropertyOperation, RgbLightColorCommand,
};
pub use identify::identify_hub_kind;
pub use message::{Notification, PropertyValue};

// Re-export the shared value types for convenience
pub use hublink_core::{HubKind, HubProperty, IoType, PortId};
