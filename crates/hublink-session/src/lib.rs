//! Session management for BLE hubs speaking the LEGO Wireless Protocol.
//!
//! This crate owns the device lifecycle: scanning, per-hub connection
//! bring-up, characteristic subscription, notification dispatch, and the
//! command write path. Encoding and decoding live in `hublink-protocol`;
//! the platform radio is abstracted behind the [`Central`] trait so the
//! same manager drives CoreBluetooth, BlueZ, or the in-process
//! [`MockCentral`].
//!
//! # Design Philosophy
//!
//! - **Async-first**: radio operations use native `async fn` in traits
//!   (Rust 1.90 + Edition 2024 RPITIT); their outcomes arrive later as
//!   [`CentralEvent`]s.
//! - **Single owner of state**: every per-hub field lives in one
//!   identity-keyed session record inside the manager; observers get
//!   events and snapshots, never mutable handles.
//! - **Fail-silent edges**: unrecognized advertisements, malformed
//!   notifications, unusable characteristics, and writes to absent hubs
//!   are dropped (logged at debug level), never surfaced as errors. A
//!   control surface issuing rapid idempotent commands must never block
//!   against a hub that has gone away.
//! - **No fatal failures**: connect failures and unexpected disconnects
//!   clear all state for the affected hub and leave it cleanly
//!   re-scannable without disturbing other hubs.
//!
//! # Quick Start
//!
//! ```no_run
//! use hublink_session::{HubEvent, HubManager, ManagerConfig, MockCentral};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (central, _handle) = MockCentral::new();
//!     let (manager, mut events) = HubManager::new(central, ManagerConfig::default());
//!
//!     // Drive radio callbacks on one task...
//!     // tokio::spawn({ let m = manager.clone(); async move { m.run(rx).await } });
//!
//!     manager.start_scan().await;
//!
//!     while let Some(event) = events.recv().await {
//!         if let HubEvent::Connected { id, kind } = event {
//!             println!("connected to {kind} ({id})");
//!         }
//!     }
//! }
//! ```

pub mod central;
mod dispatcher;
pub mod manager;
pub mod mock;
pub mod session;

pub use central::{Central, CentralEvent, Characteristic};
pub use manager::{HubEvent, HubManager, ManagerConfig, ScanPolicy};
pub use mock::{MockCentral, MockCentralHandle, RadioCall};
pub use session::{HubSnapshot, SessionPhase};

// Re-export the identity and value types observers handle
pub use hublink_core::{HubId, HubKind, HubProperty, IoType, PortId};
pub use hublink_protocol::Notification;
