//! The container's mandated CRC-32 (IEEE 802.3 / ISO-HDLC: polynomial
//! `0xEDB88320`, reflected, init `0xFFFFFFFF`, final XOR `0xFFFFFFFF`).

use crc::{Crc, CRC_32_ISO_HDLC};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// The constant CRC-32 of an empty-body `IEND` chunk: `CRC("IEND" ‖ "")`.
pub const IEND_CRC: u32 = 0xAE42_6082;

/// Computes the CRC-32 of `chunk_type ‖ data`, as the container format
/// requires (length and the CRC field itself are excluded).
pub fn checksum(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut digest = CRC32.digest();
    digest.update(chunk_type);
    digest.update(data);
    digest.finalize()
}
