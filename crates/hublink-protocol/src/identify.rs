//! Hub-family identification from advertised manufacturer data.

use hublink_core::HubKind;
use hublink_core::constants::{LEGO_COMPANY_ID, MIN_MANUFACTURER_DATA_LEN};

/// Resolve a hub family from the manufacturer data of an advertisement.
///
/// Layout checked here:
/// - bytes 0..2: company identifier, little endian, must equal
///   [`LEGO_COMPANY_ID`]
/// - byte 3: system type selecting the hub family
///
/// Returns `None` for foreign advertisements, truncated data, and system
/// types this crate does not support. Discovery ignores such
/// advertisements; they are never an error.
///
/// # Examples
///
/// ```
/// use hublink_protocol::identify_hub_kind;
/// use hublink_core::HubKind;
///
/// // Move Hub advertisement (company id 0x0397 LE, button up, system type 0x40)
/// let data = [0x97, 0x03, 0x00, 0x40, 0x06];
/// assert_eq!(identify_hub_kind(&data), Some(HubKind::MoveHub));
///
/// // Foreign vendor
/// assert_eq!(identify_hub_kind(&[0x4C, 0x00, 0x00, 0x40]), None);
/// ```
#[must_use]
pub fn identify_hub_kind(manufacturer_data: &[u8]) -> Option<HubKind> {
    if manufacturer_data.len() < MIN_MANUFACTURER_DATA_LEN {
        return None;
    }

    let company = u16::from_le_bytes([manufacturer_data[0], manufacturer_data[1]]);
    if company != LEGO_COMPANY_ID {
        return None;
    }

    HubKind::from_system_type(manufacturer_data[3])
}
