//! Error types for STL import.

use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL import operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while importing an STL file.
///
/// Every error is fatal: the import unwinds to the caller and no partial mesh
/// is returned.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A read asked for more bytes than the stream had left.
    #[error("truncated input: needed {needed} bytes at offset {offset}")]
    TruncatedInput {
        /// Stream offset where the short read started.
        offset: u64,
        /// Number of bytes the read required.
        needed: usize,
    },

    /// An ASCII coordinate token is not a valid float.
    #[error("malformed numeric literal {token:?} on line {line}")]
    MalformedNumericLiteral {
        /// 1-based line number in the file.
        line: usize,
        /// The offending token (or line, if tokens were missing).
        token: String,
    },

    /// Import parameters are out of range.
    #[error("invalid import parameters: {message}")]
    InvalidParams {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IoError {
    /// Create an `InvalidParams` error with the given message.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a `MalformedNumericLiteral` error.
    #[must_use]
    pub fn malformed_number(line: usize, token: impl Into<String>) -> Self {
        Self::MalformedNumericLiteral {
            line,
            token: token.into(),
        }
    }

    /// True for `TruncatedInput`.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

/// Fill `buf` completely, reporting a short read as `TruncatedInput`.
///
/// `offset` is the stream position of the first byte of `buf`; it only feeds
/// the error report.
pub(crate) fn read_exact_at<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    offset: u64,
) -> IoResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            IoError::TruncatedInput {
                offset,
                needed: buf.len(),
            }
        } else {
            IoError::Io(e)
        }
    })
}
