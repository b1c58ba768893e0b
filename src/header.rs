//! The `IHDR` header descriptor and the chunk framing record it (and every
//! other top-level chunk) carries.

use crate::error::{Error, Result};

/// Required `IHDR` field values for the truecolor-with-alpha subset this
/// codec supports. Any other combination is `Error::UnsupportedImage`.
pub const REQUIRED_BIT_DEPTH: u8 = 8;
pub const REQUIRED_COLOR_TYPE: u8 = 6;
pub const REQUIRED_COMPRESSION_METHOD: u8 = 0;
pub const REQUIRED_FILTER_METHOD: u8 = 0;
pub const REQUIRED_INTERLACE_METHOD: u8 = 0;

pub const IHDR_BODY_LEN: u32 = 13;

/// `(data_length, type, crc_32, entry_offset)` — the framing of a single
/// top-level chunk, as scanned by `reader::Reader::chunk_seek`.
///
/// `entry_offset` is the byte offset at which the length field began; it
/// lets the reader re-seek to a chunk's body without holding the body in
/// memory during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkFraming {
    pub data_length: u32,
    pub chunk_type: [u8; 4],
    pub crc32: u32,
    pub entry_offset: u64,
}

impl ChunkFraming {
    pub const NULL_TYPE: [u8; 4] = *b"NULL";

    /// The sentinel yielded once scanning has passed `IEND`.
    pub const fn null() -> ChunkFraming {
        ChunkFraming {
            data_length: 0,
            chunk_type: Self::NULL_TYPE,
            crc32: 0,
            entry_offset: 0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.chunk_type == Self::NULL_TYPE
    }

    pub fn is_type(&self, tag: &[u8; 4]) -> bool {
        &self.chunk_type == tag
    }
}

/// The parsed `IHDR` chunk: image dimensions plus the mode fields this codec
/// requires to have fixed values.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
    /// The chunk framing the `IHDR` chunk itself was read with, preserved
    /// for diagnostics and round-trip testing. Never reused verbatim when
    /// writing — the CRC is always recomputed (SPEC_FULL.md §9, item 1).
    pub framing: ChunkFraming,
}

impl Header {
    /// Builds a fresh `IHDR` for an image of the given size, with every mode
    /// field set to the one value this codec supports.
    pub fn new(width: u32, height: u32) -> Header {
        Header {
            width,
            height,
            bit_depth: REQUIRED_BIT_DEPTH,
            color_type: REQUIRED_COLOR_TYPE,
            compression_method: REQUIRED_COMPRESSION_METHOD,
            filter_method: REQUIRED_FILTER_METHOD,
            interlace_method: REQUIRED_INTERLACE_METHOD,
            framing: ChunkFraming::null(),
        }
    }

    /// Parses the 13-byte `IHDR` body and validates it against the
    /// supported subset. `framing` is the chunk's own framing record, kept
    /// for diagnostics.
    pub fn parse(body: &[u8; 13], framing: ChunkFraming) -> Result<Header> {
        let width = u32::from_be_bytes(body[0..4].try_into().unwrap());
        let height = u32::from_be_bytes(body[4..8].try_into().unwrap());
        let bit_depth = body[8];
        let color_type = body[9];
        let compression_method = body[10];
        let filter_method = body[11];
        let interlace_method = body[12];

        if width == 0 || height == 0 {
            return Err(Error::unsupported("width and height must both be at least 1"));
        }
        if width > (1u32 << 31) - 1 || height > (1u32 << 31) - 1 {
            return Err(Error::unsupported("width and height must fit in 2^31 - 1"));
        }
        if bit_depth != REQUIRED_BIT_DEPTH {
            return Err(Error::unsupported(format!(
                "bit depth must be {REQUIRED_BIT_DEPTH}, found {bit_depth}"
            )));
        }
        if color_type != REQUIRED_COLOR_TYPE {
            return Err(Error::unsupported(format!(
                "color type must be {REQUIRED_COLOR_TYPE} (truecolor with alpha), found {color_type}"
            )));
        }
        if compression_method != REQUIRED_COMPRESSION_METHOD {
            return Err(Error::unsupported(format!(
                "compression method must be {REQUIRED_COMPRESSION_METHOD}, found {compression_method}"
            )));
        }
        if filter_method != REQUIRED_FILTER_METHOD {
            return Err(Error::unsupported(format!(
                "filter method must be {REQUIRED_FILTER_METHOD}, found {filter_method}"
            )));
        }
        if interlace_method != REQUIRED_INTERLACE_METHOD {
            return Err(Error::unsupported(format!(
                "interlace method must be {REQUIRED_INTERLACE_METHOD} (non-interlaced), found {interlace_method}"
            )));
        }

        Ok(Header {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
            framing,
        })
    }

    /// Serializes the 13-byte `IHDR` body (without the chunk envelope).
    pub fn to_body(self) -> [u8; 13] {
        let mut body = [0u8; 13];
        body[0..4].copy_from_slice(&self.width.to_be_bytes());
        body[4..8].copy_from_slice(&self.height.to_be_bytes());
        body[8] = self.bit_depth;
        body[9] = self.color_type;
        body[10] = self.compression_method;
        body[11] = self.filter_method;
        body[12] = self.interlace_method;
        body
    }

    /// Length, in bytes, of the filtered uncompressed stream this header
    /// implies: `height * (1 + width * 4)`.
    pub fn filtered_stream_len(&self) -> usize {
        self.height as usize * (1 + self.width as usize * 4)
    }

    /// Row stride in bytes, excluding the leading filter-type byte.
    pub fn row_byte_len(&self) -> usize {
        self.width as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_valid_header() {
        let header = Header::new(8, 8);
        let body = header.to_body();
        let parsed = Header::parse(&body, ChunkFraming::null()).unwrap();
        assert_eq!(parsed.width, 8);
        assert_eq!(parsed.height, 8);
        assert_eq!(parsed.bit_depth, REQUIRED_BIT_DEPTH);
        assert_eq!(parsed.color_type, REQUIRED_COLOR_TYPE);
    }

    #[test]
    fn rejects_indexed_color() {
        let mut header = Header::new(4, 4);
        header.color_type = 3;
        let body = header.to_body();
        let err = Header::parse(&body, ChunkFraming::null()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage { .. }));
    }

    #[test]
    fn filtered_stream_len_matches_spec_formula() {
        let header = Header::new(8, 8);
        assert_eq!(header.filtered_stream_len(), 8 * (1 + 8 * 4));
    }
}
