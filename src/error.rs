//! Error kinds shared by every public entry point (one-shot and streaming).
//!
//! A small `Copy` enum with no heap payload, one variant per failure kind,
//! implementing `Display`/`Error` by hand.

use std::fmt;

/// Stable error kinds. `code()` returns the negative-integer error code a
/// C-ABI caller receives from `error_name`/the `c-abi` exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZxcError {
    /// Allocation failure.
    Memory,
    /// Destination capacity insufficient.
    DstTooSmall,
    /// Source truncated before a structurally required byte.
    SrcTooSmall,
    /// File header magic mismatch.
    BadMagic,
    /// Unsupported file format version.
    BadVersion,
    /// Header CRC mismatch or malformed sub-header.
    BadHeader,
    /// Block or global content hash mismatch.
    BadChecksum,
    /// Structural invariant violated (size mismatch, stream overlap, EOF placement).
    CorruptData,
    /// Match offset zero, greater than bytes written, or greater than the block window.
    BadOffset,
    /// Decoded size would exceed destination capacity.
    Overflow,
    /// Underlying read/write failure. Carries only the `io::ErrorKind` so the
    /// enum stays `Copy`/`Eq`; the original `std::io::Error` is not preserved.
    Io(std::io::ErrorKind),
    /// Required input was empty where non-empty input is required.
    NullInput,
    /// Unknown block-type byte.
    BadBlockType,
}

impl ZxcError {
    /// Stable name, equivalent to the C API's `zxc_error_name`.
    pub fn name(self) -> &'static str {
        match self {
            ZxcError::Memory => "ZXC_ERROR_MEMORY",
            ZxcError::DstTooSmall => "ZXC_ERROR_DST_TOO_SMALL",
            ZxcError::SrcTooSmall => "ZXC_ERROR_SRC_TOO_SMALL",
            ZxcError::BadMagic => "ZXC_ERROR_BAD_MAGIC",
            ZxcError::BadVersion => "ZXC_ERROR_BAD_VERSION",
            ZxcError::BadHeader => "ZXC_ERROR_BAD_HEADER",
            ZxcError::BadChecksum => "ZXC_ERROR_BAD_CHECKSUM",
            ZxcError::CorruptData => "ZXC_ERROR_CORRUPT_DATA",
            ZxcError::BadOffset => "ZXC_ERROR_BAD_OFFSET",
            ZxcError::Overflow => "ZXC_ERROR_OVERFLOW",
            ZxcError::Io(_) => "ZXC_ERROR_IO",
            ZxcError::NullInput => "ZXC_ERROR_NULL_INPUT",
            ZxcError::BadBlockType => "ZXC_ERROR_BAD_BLOCK_TYPE",
        }
    }

    /// The stable negative error code, for C-ABI / language-neutral callers.
    pub fn code(self) -> i32 {
        match self {
            ZxcError::Memory => -1,
            ZxcError::DstTooSmall => -2,
            ZxcError::SrcTooSmall => -3,
            ZxcError::BadMagic => -4,
            ZxcError::BadVersion => -5,
            ZxcError::BadHeader => -6,
            ZxcError::BadChecksum => -7,
            ZxcError::CorruptData => -8,
            ZxcError::BadOffset => -9,
            ZxcError::Overflow => -10,
            ZxcError::Io(_) => -11,
            ZxcError::NullInput => -12,
            ZxcError::BadBlockType => -13,
        }
    }
}

impl fmt::Display for ZxcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZxcError::Io(kind) => write!(f, "{} ({kind})", self.name()),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl std::error::Error for ZxcError {}

impl From<std::io::Error> for ZxcError {
    fn from(e: std::io::Error) -> Self {
        ZxcError::Io(e.kind())
    }
}

/// Result alias used throughout the core.
pub type ZxcResult<T> = Result<T, ZxcError>;

/// Free-function form of `error_name`, matching the language-neutral API (§6).
pub fn error_name(code: i32) -> &'static str {
    match code {
        -1 => ZxcError::Memory.name(),
        -2 => ZxcError::DstTooSmall.name(),
        -3 => ZxcError::SrcTooSmall.name(),
        -4 => ZxcError::BadMagic.name(),
        -5 => ZxcError::BadVersion.name(),
        -6 => ZxcError::BadHeader.name(),
        -7 => ZxcError::BadChecksum.name(),
        -8 => ZxcError::CorruptData.name(),
        -9 => ZxcError::BadOffset.name(),
        -10 => ZxcError::Overflow.name(),
        -11 => ZxcError::Io(std::io::ErrorKind::Other).name(),
        -12 => ZxcError::NullInput.name(),
        -13 => ZxcError::BadBlockType.name(),
        _ => "ZXC_ERROR_UNKNOWN",
    }
}
