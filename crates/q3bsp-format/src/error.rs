//! Error types for loading IBSP map files

use crate::lump::LumpKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a map file or reading its records
#[derive(Debug, Error)]
pub enum BspError {
    /// The map file could not be opened or read
    #[error("Failed to open map file {path}: {source}")]
    Open {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes were read than the file size announced
    #[error("Short read from {path}: expected {expected} bytes, got {actual} bytes")]
    ShortRead {
        /// Path that was being read
        path: PathBuf,
        /// File size reported by the filesystem
        expected: u64,
        /// Bytes actually read
        actual: usize,
    },

    /// Data is too short to hold the header
    #[error("Truncated file: expected at least {expected} bytes, got {actual} bytes")]
    Truncated {
        /// Minimum size needed
        expected: usize,
        /// Actual file size
        actual: usize,
    },

    /// Header magic is not "IBSP"
    #[error("Invalid magic: expected 'IBSP', got {found:?}")]
    MagicMismatch {
        /// The four bytes found at the start of the file
        found: [u8; 4],
    },

    /// A lump's byte range reaches past the bytes available to it
    #[error("Lump '{lump}' out of bounds: bytes {start}..{end} exceed limit {limit}")]
    LumpOutOfBounds {
        /// Offending lump
        lump: LumpKind,
        /// First byte of the range
        start: u64,
        /// One past the last byte of the range
        end: u64,
        /// Number of bytes actually available
        limit: u64,
    },

    /// A fixed-record lump's length is not a multiple of its record size
    #[error(
        "Lump '{lump}' has misaligned size: {length} bytes is not a multiple of {record_size} (remainder {remainder})"
    )]
    MisalignedLumpSize {
        /// Offending lump
        lump: LumpKind,
        /// Declared lump length
        length: u32,
        /// Record size for this lump
        record_size: usize,
        /// `length % record_size`
        remainder: usize,
    },

    /// Record index past the end of a lump
    #[error("Index {index} out of range for lump '{lump}' with {count} records")]
    IndexOutOfRange {
        /// Lump being accessed
        lump: LumpKind,
        /// Requested index
        index: usize,
        /// Number of records in the lump
        count: usize,
    },

    /// A record could not be decoded from its bytes
    #[error("Failed to decode record {index} of lump '{lump}': {reason}")]
    RecordDecode {
        /// Lump being decoded
        lump: LumpKind,
        /// Record index
        index: usize,
        /// Decoder message
        reason: String,
    },
}

/// Coarse classification of a [`BspError`], for callers that branch on cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Path unreadable, or read came up short
    OpenFailure,
    /// File shorter than the header, or a record's bytes are missing
    TruncatedFile,
    /// Header tag incorrect
    MagicMismatch,
    /// Descriptor or derived visibility length exceeds the available bytes
    LumpOutOfBounds,
    /// Fixed-record lump length not a multiple of its record size
    MisalignedLumpSize,
    /// Accessor index past the lump's record count
    IndexOutOfRange,
}

impl BspError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } | Self::ShortRead { .. } => ErrorKind::OpenFailure,
            Self::Truncated { .. } | Self::RecordDecode { .. } => ErrorKind::TruncatedFile,
            Self::MagicMismatch { .. } => ErrorKind::MagicMismatch,
            Self::LumpOutOfBounds { .. } => ErrorKind::LumpOutOfBounds,
            Self::MisalignedLumpSize { .. } => ErrorKind::MisalignedLumpSize,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }

    /// The lump this error is about, if any
    pub const fn lump(&self) -> Option<LumpKind> {
        match self {
            Self::LumpOutOfBounds { lump, .. }
            | Self::MisalignedLumpSize { lump, .. }
            | Self::IndexOutOfRange { lump, .. }
            | Self::RecordDecode { lump, .. } => Some(*lump),
            Self::Open { .. }
            | Self::ShortRead { .. }
            | Self::Truncated { .. }
            | Self::MagicMismatch { .. } => None,
        }
    }
}

/// Result type alias for map loading operations
pub type Result<T> = std::result::Result<T, BspError>;
