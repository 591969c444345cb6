//! Protocol-level constants for the hub control link.
//!
//! This module centralizes the GATT identifiers and advertisement layout
//! constants of the LEGO Wireless Protocol 3.0 control link. All protocol
//! traffic with a hub flows through a single service exposing a single
//! bidirectional (write + notify) characteristic.
//!
//! # Control link layout
//!
//! ```text
//! Service  00001623-1212-efde-1623-785feabcd123
//!   └── Characteristic  00001624-1212-efde-1623-785feabcd123  (write, notify)
//! ```
//!
//! # Advertisement layout
//!
//! Hubs advertise manufacturer-specific data carrying the LEGO company
//! identifier followed by a button-state byte and a system-type byte. The
//! system-type byte selects the hub family:
//!
//! ```text
//! offset  0..2   company identifier, little endian (0x0397)
//! offset  2      button state
//! offset  3      system type / device number
//! ```
//!
//! Modifying these values breaks compatibility with shipped hub firmware.

use uuid::Uuid;

/// GATT service UUID of the hub control link.
///
/// Every supported hub family advertises and exposes this single service.
/// Scanning filters on it so foreign BLE devices never reach the session
/// manager.
pub const CONTROL_SERVICE_UUID: Uuid = Uuid::from_u128(0x00001623_1212_efde_1623_785feabcd123);

/// GATT characteristic UUID of the control link.
///
/// The one bidirectional channel used for all protocol traffic: commands are
/// written to it, notifications are delivered from it. A characteristic
/// lacking either the write or the notify property is unusable and rejected
/// by the session manager.
pub const CONTROL_CHARACTERISTIC_UUID: Uuid =
    Uuid::from_u128(0x00001624_1212_efde_1623_785feabcd123);

/// Bluetooth SIG company identifier of LEGO System A/S.
///
/// First two bytes (little endian) of the manufacturer data in every hub
/// advertisement. Advertisements carrying a different company identifier are
/// ignored during discovery.
pub const LEGO_COMPANY_ID: u16 = 0x0397;

/// Minimum manufacturer-data length for hub-kind identification.
///
/// Identification reads the system-type byte at offset 3, so anything
/// shorter cannot name a hub family.
pub const MIN_MANUFACTURER_DATA_LEN: usize = 4;

/// Hub identifier byte carried in every protocol message header.
///
/// The wire format reserves a hub-id byte after the length prefix; current
/// firmware always sends and expects zero.
pub const MESSAGE_HUB_ID: u8 = 0x00;

/// Maximum length of a protocol message this core will emit or accept.
///
/// All control-link traffic fits in a single unfragmented GATT payload on
/// the default 23-byte MTU; longer inbound frames are rejected as malformed
/// rather than reassembled.
pub const MAX_MESSAGE_LEN: usize = 127;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_id_little_endian_layout() {
        let bytes = LEGO_COMPANY_ID.to_le_bytes();
        assert_eq!(bytes, [0x97, 0x03]);
    }

    #[test]
    fn test_control_link_uuids() {
        assert_eq!(
            CONTROL_SERVICE_UUID.to_string(),
            "00001623-1212-efde-1623-785feabcd123"
        );
        assert_eq!(
            CONTROL_CHARACTERISTIC_UUID.to_string(),
            "00001624-1212-efde-1623-785feabcd123"
        );
    }
}
