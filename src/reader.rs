//! The container parser half of the container codec (spec §4.3).
//!
//! `Reader` owns the open handle and the chunk-scanning cursor as instance
//! fields rather than process-wide statics (spec §9's design note), so two
//! images can be read from the same process without cross-contamination.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};
use crate::header::{ChunkFraming, Header};

pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const IHDR_TAG: [u8; 4] = *b"IHDR";
pub const IDAT_TAG: [u8; 4] = *b"IDAT";
pub const IEND_TAG: [u8; 4] = *b"IEND";

/// Reads the signature, framed chunks, `IHDR`, and the concatenated `IDAT`
/// stream out of a container.
#[derive(Debug)]
pub struct Reader<R: Read + Seek> {
    input: R,
    last_address: u64,
    at_end: bool,
}

impl<R: Read + Seek> Reader<R> {
    pub fn open(mut input: R) -> Result<Reader<R>> {
        let mut sig = [0u8; 8];
        input
            .read_exact(&mut sig)
            .map_err(|_| Error::corrupt("truncated file: missing signature"))?;
        if sig != SIGNATURE {
            return Err(Error::corrupt("not a PNG file: bad signature"));
        }
        Ok(Reader {
            input,
            last_address: SIGNATURE.len() as u64,
            at_end: false,
        })
    }

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.input.seek(SeekFrom::Start(offset))?;
        self.input
            .read_exact(buf)
            .map_err(|_| Error::corrupt("truncated chunk"))?;
        Ok(())
    }

    /// Reads the framing of the chunk that begins at `offset`, without
    /// consuming its body into memory.
    fn peek_chunk_at(&mut self, offset: u64) -> Result<ChunkFraming> {
        let mut header = [0u8; 8];
        self.read_exact_at(offset, &mut header)?;
        let data_length = u32::from_be_bytes(header[0..4].try_into().unwrap());
        let chunk_type: [u8; 4] = header[4..8].try_into().unwrap();

        let crc_offset = offset + 8 + data_length as u64;
        let mut crc_bytes = [0u8; 4];
        self.read_exact_at(crc_offset, &mut crc_bytes)?;
        let crc32 = u32::from_be_bytes(crc_bytes);

        Ok(ChunkFraming {
            data_length,
            chunk_type,
            crc32,
            entry_offset: offset,
        })
    }

    /// Scans forward for the next chunk of type `tag`.
    ///
    /// `reset = true` rewinds to the first post-signature chunk;
    /// `reset = false` resumes after the most recently yielded record.
    /// Yields [`ChunkFraming::null`] once scanning has passed `IEND`.
    pub fn chunk_seek(&mut self, tag: &[u8; 4], reset: bool) -> Result<ChunkFraming> {
        if reset {
            self.last_address = SIGNATURE.len() as u64;
            self.at_end = false;
        } else if self.at_end {
            return Ok(ChunkFraming::null());
        }

        loop {
            let frame = self.peek_chunk_at(self.last_address)?;
            self.last_address = frame.entry_offset + 8 + frame.data_length as u64 + 4;

            if frame.is_type(&IEND_TAG) {
                self.at_end = true;
                return Ok(if frame.is_type(tag) { frame } else { ChunkFraming::null() });
            }
            if frame.is_type(tag) {
                return Ok(frame);
            }
        }
    }

    /// Locates the `IHDR` chunk and parses its body.
    pub fn read_ihdr(&mut self) -> Result<Header> {
        let framing = self.chunk_seek(&IHDR_TAG, true)?;
        if framing.is_null() {
            return Err(Error::corrupt("missing IHDR chunk"));
        }
        if framing.data_length != 13 {
            return Err(Error::corrupt(format!(
                "IHDR body must be 13 bytes, found {}",
                framing.data_length
            )));
        }
        let mut body = [0u8; 13];
        self.read_exact_at(framing.entry_offset + 8, &mut body)?;
        Header::parse(&body, framing)
    }

    /// Walks chunks forward from the signature, accumulating the body of
    /// every `IDAT` chunk in file order, stopping once `IEND` is seen.
    /// Tolerates any number of `IDAT` chunks (spec §4.9: "asymmetric" with
    /// the writer, which always emits exactly one).
    pub fn read_all_idat(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut framing = self.chunk_seek(&IDAT_TAG, true)?;
        let mut saw_idat = false;

        loop {
            if framing.is_null() {
                break;
            }
            saw_idat = true;
            let mut body = vec![0u8; framing.data_length as usize];
            self.read_exact_at(framing.entry_offset + 8, &mut body)?;
            out.extend_from_slice(&body);

            framing = self.chunk_seek(&IDAT_TAG, false)?;
        }

        if !saw_idat {
            return Err(Error::corrupt("missing IDAT chunk"));
        }
        Ok(out)
    }
}
