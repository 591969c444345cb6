//! Outgoing command encoding for the control link.
//!
//! Every command is an immutable value that encodes to a complete wire
//! frame. Commands are fire-and-forget: the session layer hands the bytes
//! to the radio and tracks no acknowledgement.

pub mod hub_properties;
pub mod port_input;
pub mod port_output;

pub use hub_properties::{HubPropertiesCommand, PropertyOperation};
pub use port_input::PortInputFormatSetupCommand;
pub use port_output::{Color, MotorStartPowerCommand, RgbLightColorCommand};

use bytes::{BufMut, Bytes, BytesMut};
use hublink_core::constants::MESSAGE_HUB_ID;

/// A command encodable to a control-link frame.
///
/// Implementors provide the message type byte and the payload; the common
/// header (length, hub id, message type) is prepended by [`Command::encode`].
pub trait Command {
    /// Message type byte of this command.
    fn message_type(&self) -> u8;

    /// Payload bytes following the common header.
    fn payload(&self) -> Vec<u8>;

    /// Encode the complete wire frame.
    fn encode(&self) -> Bytes {
        let payload = self.payload();
        let mut buf = BytesMut::with_capacity(payload.len() + 3);
        buf.put_u8((payload.len() + 3) as u8);
        buf.put_u8(MESSAGE_HUB_ID);
        buf.put_u8(self.message_type());
        buf.put_slice(&payload);
        buf.freeze()
    }
}
