//! Error types for the codec crate.

use crate::scalar::ScalarType;
use std::io;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A write would overflow the cursor. Nothing was written.
    #[error("insufficient space: need {needed} bytes, {available} available")]
    InsufficientSpace {
        /// Bytes the write requires.
        needed: usize,
        /// Bytes left before the end of the cursor.
        available: usize,
    },

    /// A read would run past the end of the input.
    #[error("unexpected end of input: need {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes the read requires.
        needed: usize,
        /// Bytes left before the end of the cursor.
        available: usize,
    },

    /// Collection version is `INVALID` or newer than the latest supported one.
    #[error("invalid or unsupported collection version {0}")]
    InvalidVersion(u16),

    /// Stored CRC-32 does not match the payload.
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Checksum read from the stream.
        stored: u32,
        /// Checksum recomputed over the payload.
        computed: u32,
    },

    /// A count or length does not fit its wire slot.
    #[error("too many {what}: {count} exceeds maximum of {max}")]
    CountOverflow {
        /// What was being counted.
        what: &'static str,
        /// The offending count.
        count: usize,
        /// The largest count the format can hold.
        max: usize,
    },

    /// A string holds a character above U+00FF, which has no one-byte form.
    #[error("character {0:?} cannot be encoded in one byte")]
    UnsupportedChar(char),

    /// A structural marker byte did not match the expected one.
    #[error("unexpected marker: expected {expected}, found {found:#04x}")]
    UnexpectedMarker {
        /// The marker required at this position.
        expected: ScalarType,
        /// The byte actually read.
        found: u8,
    },

    /// A type tag byte does not name a known scalar type.
    #[error("unknown scalar type tag {0:#04x}")]
    UnknownType(u8),

    /// A typed accessor was used on a value of another type.
    #[error("type mismatch: requested {expected}, stored {actual}")]
    TypeMismatch {
        /// The type the caller asked for.
        expected: ScalarType,
        /// The type actually stored.
        actual: ScalarType,
    },

    /// The catalog magic number is wrong.
    #[error("bad catalog magic {0:#06x}")]
    BadMagic(u16),

    /// The catalog offset table disagrees with the stream layout.
    #[error("collection offset mismatch: table says {expected}, stream is at {actual}")]
    OffsetMismatch {
        /// Offset recorded in the header table.
        expected: usize,
        /// Natural read position of the cursor.
        actual: usize,
    },

    /// The stream is structurally malformed.
    #[error("invalid structure: {message}")]
    InvalidStructure {
        /// Description of the structural error.
        message: String,
    },

    /// An I/O error occurred while loading or saving a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Create an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Create a count overflow error.
    pub fn count_overflow(what: &'static str, count: usize, max: usize) -> Self {
        Self::CountOverflow { what, count, max }
    }
}

/// Fails with [`CodecError::CountOverflow`] when `count` exceeds `max`.
pub(crate) fn check_count(what: &'static str, count: usize, max: usize) -> CodecResult<()> {
    if count > max {
        return Err(CodecError::count_overflow(what, count, max));
    }
    Ok(())
}
