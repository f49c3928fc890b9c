//! Decode error type.

use thiserror::Error;

/// Why a byte sequence could not be decoded.
///
/// Offsets are absolute positions in the decoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown type tag 0x{tag:02x} at offset {offset}")]
    UnknownTypeTag { tag: u8, offset: usize },
    #[error("unexpected end of input at offset {offset}")]
    TruncatedInput { offset: usize },
    #[error("trailing bytes after value (consumed {consumed} of {len})")]
    TrailingBytes { consumed: usize, len: usize },
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("variable-length integer too long at offset {offset}")]
    VarintOverflow { offset: usize },
    #[error("length at offset {offset} does not fit in memory")]
    LengthOverflow { offset: usize },
    #[error("element at offset {offset} overruns its container frame")]
    FrameOverrun { offset: usize },
    #[error("invalid field width code {0}")]
    InvalidFieldWidth(u8),
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),
}

impl DecodeError {
    pub(crate) fn from_buffer(err: tagpack_buffers::BufferError, offset: usize) -> Self {
        match err {
            tagpack_buffers::BufferError::EndOfBuffer => DecodeError::TruncatedInput { offset },
            tagpack_buffers::BufferError::InvalidUtf8 => DecodeError::InvalidUtf8 { offset },
        }
    }
}
