//! Zlib-stream compression adapter (spec §4.4).
//!
//! Pluggable by Cargo feature: the `miniz` feature (default) uses a pure-Rust
//! backend, the `zlib` feature links the system zlib via `libz-sys`. Both
//! implement the same `deflate`/`inflate` contract so the rest of the crate
//! never sees which backend is active.

use crate::error::{Error, Result};

#[cfg(feature = "miniz")]
mod backend {
    use super::*;

    pub fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
        Ok(miniz_oxide::deflate::compress_to_vec_zlib(raw, 6))
    }

    pub fn inflate(compressed: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(compressed, expected_len)
            .map_err(|e| Error::compression(format!("zlib inflate failed: {e:?}")))
    }
}

#[cfg(all(feature = "zlib", not(feature = "miniz")))]
mod backend {
    use super::*;
    use std::os::raw::{c_int, c_ulong};

    pub fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
        let bound = unsafe { libz_sys::compressBound(raw.len() as c_ulong) };
        let mut out = vec![0u8; bound as usize];
        let mut out_len = bound;
        let rc = unsafe {
            libz_sys::compress2(
                out.as_mut_ptr(),
                &mut out_len,
                raw.as_ptr(),
                raw.len() as c_ulong,
                6 as c_int,
            )
        };
        if rc != 0 {
            return Err(Error::compression(format!("zlib compress2 failed: rc={rc}")));
        }
        out.truncate(out_len as usize);
        Ok(out)
    }

    pub fn inflate(compressed: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; expected_len];
        let mut out_len = expected_len as c_ulong;
        let rc = unsafe {
            libz_sys::uncompress(
                out.as_mut_ptr(),
                &mut out_len,
                compressed.as_ptr(),
                compressed.len() as c_ulong,
            )
        };
        if rc != 0 {
            return Err(Error::compression(format!("zlib uncompress failed: rc={rc}")));
        }
        out.truncate(out_len as usize);
        Ok(out)
    }
}

/// Compresses `raw` into a zlib stream.
pub fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    backend::deflate(raw)
}

/// Decompresses a zlib stream, expecting exactly `expected_len` bytes of
/// output. Mirrors `IDAT`'s own contract: the expected length is always
/// known ahead of time from `Header::filtered_stream_len`.
pub fn inflate(compressed: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    backend::inflate(compressed, expected_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let raw: Vec<u8> = (0..500u32).map(|n| (n % 251) as u8).collect();
        let compressed = deflate(&raw).unwrap();
        let restored = inflate(&compressed, raw.len()).unwrap();
        assert_eq!(restored, raw);
    }

    #[test]
    fn rejects_corrupt_stream() {
        let err = inflate(&[0xff, 0xff, 0xff, 0xff], 16).unwrap_err();
        assert!(matches!(err, Error::Compression { .. }));
    }
}
