//! Core types shared across the hublink workspace.
//!
//! This crate defines the identity types, closed enumerations, and protocol
//! constants used by the codec (`hublink-protocol`) and the session manager
//! (`hublink-session`). It carries no I/O and no async code, so it can be
//! depended on from any context.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
