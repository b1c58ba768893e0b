//! Error taxonomy for the pngveil pipeline.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. No stage
//! attempts local recovery; errors propagate to the orchestrator in
//! `pipeline.rs`, which is the only place that decides what to clean up.

use std::io;

/// Specialized `Result` type used throughout pngveil.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while embedding or recovering a payload.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CLI input was malformed: conflicting flags, a missing required value,
    /// or a flag the original program also rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input path does not exist or could not be opened.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other I/O failure (short read, permission error, disk full...).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The `IHDR` chunk declares a combination of fields this codec does not
    /// support (anything other than 8-bit truecolor-with-alpha,
    /// non-interlaced, zlib-compressed, filter method 0).
    #[error("unsupported image: {reason}")]
    UnsupportedImage { reason: String },

    /// The chunk framing didn't make sense: bad signature, truncated chunk,
    /// or a required chunk (`IHDR`, `IDAT`, `IEND`) was missing.
    #[error("corrupt container: {reason}")]
    CorruptContainer { reason: String },

    /// The deflate/inflate provider reported a failure or a length mismatch.
    #[error("compression error: {reason}")]
    Compression { reason: String },

    /// The payload does not fit in the image's available LSB capacity.
    #[error("payload too large: needs {needed} bytes, image holds {available}")]
    CapacityExceeded { needed: u64, available: u64 },

    /// A buffer of the required size could not be allocated.
    #[error("allocation failure")]
    Allocation,
}

impl Error {
    pub fn unsupported(reason: impl Into<String>) -> Error {
        Error::UnsupportedImage { reason: reason.into() }
    }

    pub fn corrupt(reason: impl Into<String>) -> Error {
        Error::CorruptContainer { reason: reason.into() }
    }

    pub fn compression(reason: impl Into<String>) -> Error {
        Error::Compression { reason: reason.into() }
    }

    /// Maps to the non-zero process exit code the CLI reports for pipeline
    /// failures (spec §6: "0 success; 1 wrong input; 2 no input/help shown;
    /// other non-zero on pipeline error").
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 1,
            Error::NotFound(_) => 1,
            Error::Io(_) => 3,
            Error::UnsupportedImage { .. } => 4,
            Error::CorruptContainer { .. } => 5,
            Error::Compression { .. } => 6,
            Error::CapacityExceeded { .. } => 7,
            Error::Allocation => 8,
        }
    }
}
