//! A least-significant-bit steganographic codec for truecolor-with-alpha
//! PNG images: embed an arbitrary byte payload into a cover image's pixel
//! data, or recover one previously embedded.
//!
//! The public surface is [`pipeline::encode_bytes`]/[`pipeline::decode_bytes`]
//! for whole-buffer use, and [`pipeline::encode`]/[`pipeline::decode`] for
//! any `Read + Seek` source. Everything else — the container codec, the
//! compression adapter, the row-filter engine, and the bit-level
//! steganographic codec — is exposed for composing custom pipelines or for
//! testing, but the two pipeline entry points are the intended surface.

pub mod cli;
pub mod crc32;
pub mod deflate;
pub mod endian;
pub mod error;
pub mod filter;
pub mod header;
pub mod pipeline;
pub mod pixel;
pub mod reader;
pub mod stego;
pub mod writer;

pub use error::{Error, Result};
pub use header::Header;
pub use pixel::{Matrix, Pixel};
