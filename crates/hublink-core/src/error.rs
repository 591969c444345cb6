use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Protocol errors
    #[error("Message too short: {0} bytes")]
    MessageTooShort(usize),

    #[error("Length prefix mismatch: declared {declared}, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Unknown message type: 0x{0:02x}")]
    UnknownMessageType(u8),

    #[error("Invalid payload for message type 0x{message_type:02x}: {reason}")]
    InvalidPayload { message_type: u8, reason: String },

    // Radio errors
    #[error("Radio not ready")]
    RadioNotReady,

    #[error("Radio operation failed: {0}")]
    RadioError(String),

    // Session errors
    #[error("Unknown hub: {0}")]
    UnknownHub(String),

    #[error("Hub not ready for writes: {0}")]
    HubNotReady(String),

    #[error("Event channel closed")]
    ChannelClosed,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
