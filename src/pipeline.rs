//! Stage-ordered encode/decode orchestration (spec §4.7), tying together
//! the container codec, the compression adapter, the filter engine, and the
//! steganographic codec.

use std::io::{Cursor, Read, Seek};

use log::debug;

use crate::deflate;
use crate::error::Result;
use crate::filter;
use crate::header::Header;
use crate::pixel::Matrix;
use crate::reader::Reader;
use crate::stego;
use crate::writer::Writer;

/// Reads `cover` as a PNG, embeds `payload` into its pixel LSBs, and writes
/// a freshly re-encoded PNG containing the result.
///
/// Stage order: parse container -> inflate -> unfilter -> embed -> filter ->
/// deflate -> write container.
pub fn encode<R: Read + Seek>(cover: R, payload: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Reader::open(cover)?;
    let header = reader.read_ihdr()?;
    debug!("encode: {}x{} source image", header.width, header.height);

    let compressed = reader.read_all_idat()?;
    let raw = deflate::inflate(&compressed, header.filtered_stream_len())?;
    let mut matrix = filter::unfilter(&raw, &header)?;

    stego::embed(&mut matrix, payload)?;

    let filtered = filter::filter(&matrix, &header);
    let recompressed = deflate::deflate(&filtered)?;

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out);
    writer.write_signature()?;
    writer.write_header(header)?;
    writer.write_idat(&recompressed)?;
    writer.write_iend()?;
    writer.flush()?;

    debug!("encode: wrote {} byte container with {} byte payload", out.len(), payload.len());
    Ok(out)
}

/// Reads `carrier` as a PNG and recovers the payload previously embedded by
/// [`encode`].
///
/// Stage order: parse container -> inflate -> unfilter -> extract.
pub fn decode<R: Read + Seek>(carrier: R) -> Result<Vec<u8>> {
    let mut reader = Reader::open(carrier)?;
    let header = reader.read_ihdr()?;
    debug!("decode: {}x{} carrier image", header.width, header.height);

    let compressed = reader.read_all_idat()?;
    let raw = deflate::inflate(&compressed, header.filtered_stream_len())?;
    let matrix = filter::unfilter(&raw, &header)?;

    let payload = stego::extract(&matrix)?;
    debug!("decode: recovered {} byte payload", payload.len());
    Ok(payload)
}

/// Convenience wrapper over [`encode`] for in-memory buffers.
pub fn encode_bytes(cover: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    encode(Cursor::new(cover), payload)
}

/// Convenience wrapper over [`decode`] for in-memory buffers.
pub fn decode_bytes(carrier: &[u8]) -> Result<Vec<u8>> {
    decode(Cursor::new(carrier))
}

/// Builds a flat, uncompressed, unfiltered PNG of the given size filled with
/// one color, useful for generating small fixtures in tests and for the
/// library's own doctest.
pub fn blank_png(width: u32, height: u32, fill: crate::pixel::Pixel) -> Result<Vec<u8>> {
    let header = Header::new(width, height);
    let mut matrix = Matrix::from_header(&header);
    for i in 0..matrix.total_pixels() {
        *matrix.get_linear_mut(i) = fill;
    }
    let filtered = filter::filter(&matrix, &header);
    let compressed = deflate::deflate(&filtered)?;

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out);
    writer.write_signature()?;
    writer.write_header(header)?;
    writer.write_idat(&compressed)?;
    writer.write_iend()?;
    writer.flush()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn encode_then_decode_recovers_the_payload() {
        let cover = blank_png(8, 8, Pixel::new(0x80, 0x80, 0x80, 0x80)).unwrap();
        let carrier = encode_bytes(&cover, b"hi").unwrap();
        let recovered = decode_bytes(&carrier).unwrap();
        assert_eq!(recovered, b"hi");
    }

    #[test]
    fn rejects_unsupported_color_type_before_touching_payload() {
        // A grayscale (color type 0) IHDR should fail at the header stage.
        let mut out = Vec::new();
        {
            let mut writer = Writer::new(&mut out);
            writer.write_signature().unwrap();
            let mut header = Header::new(4, 4);
            header.color_type = 0;
            writer.write_header(header).unwrap();
            writer.write_iend().unwrap();
        }
        let err = encode_bytes(&out, b"x").unwrap_err();
        assert!(matches!(err, crate::error::Error::UnsupportedImage { .. }));
    }

    #[test]
    fn encoding_preserves_image_dimensions() {
        let cover = blank_png(6, 5, Pixel::new(1, 2, 3, 4)).unwrap();
        let carrier = encode_bytes(&cover, b"ok").unwrap();
        let mut reader = Reader::open(Cursor::new(carrier)).unwrap();
        let header = reader.read_ihdr().unwrap();
        assert_eq!((header.width, header.height), (6, 5));
    }
}
