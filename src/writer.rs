//! The container serializer half of the container codec (spec §4.3).

use std::io::Write;

use crate::crc32;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::reader::{IDAT_TAG, IEND_TAG, IHDR_TAG, SIGNATURE};

/// Writes the signature, `IHDR`, a single `IDAT`, and `IEND` to an output
/// stream. Always recomputes each chunk's CRC rather than preserving one
/// read from elsewhere (SPEC_FULL.md §9, item 1).
pub struct Writer<W: Write> {
    output: W,
}

impl<W: Write> Writer<W> {
    pub fn new(output: W) -> Writer<W> {
        Writer { output }
    }

    pub fn write_signature(&mut self) -> Result<()> {
        self.output.write_all(&SIGNATURE)?;
        Ok(())
    }

    fn write_chunk(&mut self, chunk_type: &[u8; 4], data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len()).map_err(|_| Error::Allocation)?;
        self.output.write_all(&len.to_be_bytes())?;
        self.output.write_all(chunk_type)?;
        self.output.write_all(data)?;
        let crc = crc32::checksum(chunk_type, data);
        self.output.write_all(&crc.to_be_bytes())?;
        Ok(())
    }

    pub fn write_header(&mut self, header: Header) -> Result<()> {
        self.write_chunk(&IHDR_TAG, &header.to_body())
    }

    pub fn write_idat(&mut self, data: &[u8]) -> Result<()> {
        self.write_chunk(&IDAT_TAG, data)
    }

    pub fn write_iend(&mut self) -> Result<()> {
        self.write_chunk(&IEND_TAG, &[])
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_signature_then_three_chunks() {
        let mut out = Vec::new();
        let mut writer = Writer::new(&mut out);
        writer.write_signature().unwrap();
        writer.write_header(Header::new(1, 1)).unwrap();
        writer.write_idat(b"body").unwrap();
        writer.write_iend().unwrap();

        assert_eq!(&out[0..8], &SIGNATURE);
        assert_eq!(&out[8..12], &13u32.to_be_bytes());
        assert_eq!(&out[12..16], b"IHDR");
    }

    #[test]
    fn iend_crc_matches_the_documented_constant() {
        let mut out = Vec::new();
        let mut writer = Writer::new(&mut out);
        writer.write_iend().unwrap();
        let crc = u32::from_be_bytes(out[8..12].try_into().unwrap());
        assert_eq!(crc, crc32::IEND_CRC);
    }

    #[test]
    fn crc_matches_known_good_value() {
        // From a 1x1 truecolor black pixel made with gd.
        let one_pixel = b"\x08\x99\x63\x60\x60\x60\x00\x00\x00\x04\x00\x01";
        let mut out = Vec::new();
        Writer::new(&mut out).write_idat(one_pixel).unwrap();
        assert_eq!(&out[0..4], b"\x00\x00\x00\x0c");
        assert_eq!(&out[4..8], b"IDAT");
        assert_eq!(&out[8..20], &one_pixel[..]);
        assert_eq!(&out[20..24], b"\xa3\x0a\x15\xe3");
    }
}
