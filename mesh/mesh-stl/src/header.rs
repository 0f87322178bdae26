//! STL header sniffing.
//!
//! The first five bytes decide the variant: the literal `solid` means ASCII,
//! anything else means binary. Nothing beyond that is checked, so a binary
//! file whose header happens to begin with `solid` is read as ASCII.

use std::io::BufRead;

use tracing::debug;

use crate::error::{read_exact_at, IoResult};

/// Binary STL header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Leading bytes that mark an ASCII STL.
pub const ASCII_MAGIC: &[u8; 5] = b"solid";

/// STL encoding variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlKind {
    /// Text STL (`solid ... endsolid`).
    Ascii,
    /// Fixed-layout little-endian STL.
    Binary,
}

/// A consumed STL header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StlHeader {
    /// ASCII header line. The reader is positioned on the next line.
    Ascii {
        /// Trimmed text following `solid` on the first line.
        solid_name: String,
    },
    /// Binary header. The reader is positioned on the triangle count.
    Binary {
        /// All 80 header bytes.
        raw: [u8; HEADER_SIZE],
    },
}

impl StlHeader {
    /// The encoding variant.
    #[must_use]
    pub const fn kind(&self) -> StlKind {
        match self {
            Self::Ascii { .. } => StlKind::Ascii,
            Self::Binary { .. } => StlKind::Binary,
        }
    }

    /// The solid name of an ASCII header.
    #[must_use]
    pub fn solid_name(&self) -> Option<&str> {
        match self {
            Self::Ascii { solid_name } => Some(solid_name),
            Self::Binary { .. } => None,
        }
    }
}

/// Classify the stream and consume its header.
///
/// Reads exactly five bytes. For ASCII the rest of the first line is also
/// consumed; for binary the remaining 75 header bytes are.
///
/// # Errors
///
/// Returns `TruncatedInput` if the stream ends before five bytes, or before
/// the full 80-byte binary header.
///
/// # Example
///
/// ```
/// use mesh_stl::{sniff_header, StlKind};
///
/// let mut input: &[u8] = b"solid part\nfacet normal 0 0 1\n";
/// let header = sniff_header(&mut input).unwrap();
/// assert_eq!(header.kind(), StlKind::Ascii);
/// assert_eq!(header.solid_name(), Some("part"));
/// assert_eq!(input, b"facet normal 0 0 1\n");
/// ```
pub fn sniff_header<R: BufRead>(reader: &mut R) -> IoResult<StlHeader> {
    let mut raw = [0u8; HEADER_SIZE];
    let magic_len = ASCII_MAGIC.len();
    read_exact_at(reader, &mut raw[..magic_len], 0)?;

    if &raw[..magic_len] == ASCII_MAGIC {
        let mut rest = Vec::new();
        reader.read_until(b'\n', &mut rest)?;
        let solid_name = String::from_utf8_lossy(&rest).trim().to_owned();
        debug!(solid_name = %solid_name, "classified STL as ASCII");
        return Ok(StlHeader::Ascii { solid_name });
    }

    read_exact_at(reader, &mut raw[magic_len..], magic_len as u64)?;
    debug!("classified STL as binary");
    Ok(StlHeader::Binary { raw })
}
