//! Big-endian on-wire integers, host-endian in memory.
//!
//! `width`, `height`, chunk `length`, and chunk `crc_32` are the only fields
//! in the container that are multi-byte integers; every other component
//! routes through here rather than reading raw bytes directly.

/// Reads a big-endian `u32` from the front of `bytes`.
pub fn be_to_host_u32(bytes: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*bytes)
}

/// Converts a host `u32` to its big-endian on-wire representation.
pub fn host_to_be_u32(val: u32) -> [u8; 4] {
    val.to_be_bytes()
}

/// Reverses an arbitrary byte range in place.
///
/// On a big-endian host this would be the only place byte order ever needs
/// correcting; `be_to_host_u32`/`host_to_be_u32` above already handle the
/// common 32-bit case via the standard library's own byte-order intrinsics,
/// so this helper exists for the rare multi-byte field that isn't a `u32`.
pub fn reverse_bytes_in_place(bytes: &mut [u8]) {
    bytes.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_be_and_back() {
        for val in [0u32, 1, 0x1234_5678, u32::MAX] {
            let wire = host_to_be_u32(val);
            assert_eq!(be_to_host_u32(&wire), val);
        }
    }

    #[test]
    fn wire_bytes_are_big_endian() {
        assert_eq!(host_to_be_u32(0x0102_0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn reverse_is_an_involution() {
        let mut buf = [1u8, 2, 3, 4, 5];
        let original = buf;
        reverse_bytes_in_place(&mut buf);
        assert_ne!(buf, original);
        reverse_bytes_in_place(&mut buf);
        assert_eq!(buf, original);
    }
}
