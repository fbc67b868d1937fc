//! GATT identifiers for the Fitness Machine Service
//!
//! Short 16-bit assigned numbers plus helpers to expand them onto the
//! Bluetooth base UUID (`0000xxxx-0000-1000-8000-00805f9b34fb`).

/// Fitness Machine Service
pub const FTMS_SERVICE: u16 = 0x1826;

/// Treadmill Data characteristic (notify); the "data point"
pub const TREADMILL_DATA: u16 = 0x2ACD;

/// Fitness Machine Control Point characteristic (write with response)
pub const CONTROL_POINT: u16 = 0x2AD9;

/// Bluetooth base UUID with the 16-bit slot zeroed
pub const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5f9b_34fb;

/// Expand a 16-bit assigned number into a full 128-bit UUID
pub const fn uuid_from_short(short: u16) -> u128 {
    BLUETOOTH_BASE_UUID | ((short as u128) << 96)
}

/// Recover the 16-bit assigned number from a base-derived UUID
pub const fn short_from_uuid(uuid: u128) -> Option<u16> {
    let short_mask: u128 = 0xFFFF_FFFF << 96;
    if uuid & !short_mask != BLUETOOTH_BASE_UUID || (uuid >> 112) != 0 {
        return None;
    }
    Some((uuid >> 96) as u16)
}
