//! Binary STL body parser.
//!
//! ```text
//! UINT8[80]    – Header (consumed by the sniffer)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (discarded)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (discarded)
//! end
//! ```

use std::io::Read;

use mesh_types::{Face, Vertex};
use tracing::debug;

use crate::assemble::MeshAssembler;
use crate::error::{read_exact_at, IoResult};
use crate::header::HEADER_SIZE;
use crate::pool::BinaryKey;

/// Size of one triangle record (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Byte offset of the first vertex inside a triangle record.
const VERTEX_OFFSET: usize = 12;

/// Size of one encoded vertex.
const VERTEX_SIZE: usize = 12;

/// Upper bound on up-front allocation; the declared count is not trusted.
const MAX_PREALLOCATED_TRIANGLES: usize = 1 << 20;

/// Parse a binary STL body, starting right after the 80-byte header.
///
/// Reads the triangle count `N`, then exactly `N` records. Vertices are
/// deduplicated on their raw 12-byte encoding, so the output always has
/// exactly `N` faces.
///
/// # Errors
///
/// - `TruncatedInput` if the stream ends before the count or any record
/// - `Io` if the underlying read fails
///
/// # Example
///
/// ```
/// use mesh_stl::parse_binary;
///
/// let body = 0u32.to_le_bytes();
/// let mesh = parse_binary(&body[..]).unwrap().finish(None);
/// assert!(mesh.faces.is_empty());
/// ```
pub fn parse_binary<R: Read>(mut reader: R) -> IoResult<MeshAssembler<BinaryKey>> {
    let mut count_buf = [0u8; 4];
    read_exact_at(&mut reader, &mut count_buf, HEADER_SIZE as u64)?;
    let triangle_count = u32::from_le_bytes(count_buf);
    debug!(triangles = triangle_count, "reading binary STL body");

    let reserve = (triangle_count as usize).min(MAX_PREALLOCATED_TRIANGLES);
    let mut assembler = MeshAssembler::with_capacity(reserve, reserve);

    let mut record = [0u8; TRIANGLE_SIZE];
    let mut offset = (HEADER_SIZE + count_buf.len()) as u64;
    for _ in 0..triangle_count {
        read_exact_at(&mut reader, &mut record, offset)?;
        offset += TRIANGLE_SIZE as u64;

        let mut corners = [0u32; 3];
        for (i, corner) in corners.iter_mut().enumerate() {
            let start = VERTEX_OFFSET + i * VERTEX_SIZE;
            let mut key: BinaryKey = [0u8; VERTEX_SIZE];
            key.copy_from_slice(&record[start..start + VERTEX_SIZE]);
            *corner = assembler.resolve_vertex(&key, || Ok(decode_vertex(&key)))?;
        }

        let [a, b, c] = corners;
        assembler.push_face(Face::triangle(a, b, c));
    }

    Ok(assembler)
}

/// Decode three little-endian `f32`s.
fn decode_vertex(buf: &BinaryKey) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(x, y, z)
}
