//! ASCII STL body parser.
//!
//! Only two line kinds carry data: `vertex x y z` and `endfacet`. Everything
//! else (`facet normal`, `outer loop`, `endloop`, `endsolid`, blank lines) is
//! skipped. Facet normals are not kept.

use std::io::BufRead;

use mesh_types::{Face, Vertex};
use smallvec::SmallVec;
use tracing::warn;

use crate::assemble::MeshAssembler;
use crate::error::{IoError, IoResult};
use crate::pool::AsciiKey;

const VERTEX: &[u8] = b"vertex";
const END_FACET: &[u8] = b"endfacet";

/// Parse an ASCII STL body, starting right after the `solid` header line.
///
/// Each `vertex` line is deduplicated on its trimmed bytes. Each `endfacet`
/// closes a face from the indices collected since the previous one. A facet
/// with other than three vertices still produces a face of that length.
///
/// # Errors
///
/// - `MalformedNumericLiteral` if a coordinate is not a float or a `vertex`
///   line has fewer than three tokens after the keyword
/// - `Io` if the underlying read fails
///
/// # Example
///
/// ```
/// use mesh_stl::parse_ascii;
///
/// let body = b"facet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\n";
/// let mesh = parse_ascii(&body[..]).unwrap().finish(None);
/// assert_eq!(mesh.vertices.len(), 3);
/// assert_eq!(mesh.faces.len(), 1);
/// ```
pub fn parse_ascii<R: BufRead>(mut reader: R) -> IoResult<MeshAssembler<AsciiKey>> {
    let mut assembler = MeshAssembler::new();
    let mut facet: SmallVec<[u32; 3]> = SmallVec::new();
    let mut buf = Vec::new();
    // Line 1 is the header consumed by the sniffer.
    let mut line_no = 1;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = trim_line(&buf);

        if line.starts_with(VERTEX) {
            let idx = assembler.resolve_vertex(line, || parse_vertex(line, line_no))?;
            facet.push(idx);
        } else if line.starts_with(END_FACET) {
            if facet.len() != 3 {
                warn!(
                    line = line_no,
                    vertices = facet.len(),
                    "facet does not have exactly 3 vertices"
                );
            }
            assembler.push_face(Face::from_indices(&facet));
            facet.clear();
        }
    }

    Ok(assembler)
}

/// ASCII whitespace plus vertical tab.
const fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0B
}

fn trim_line(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|&b| !is_space(b))
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|&b| !is_space(b))
        .map_or(start, |i| i + 1);
    &line[start..end]
}

/// Parse the last three whitespace-separated tokens of a `vertex` line.
///
/// Only those tokens need to be UTF-8; the rest of the line is opaque.
fn parse_vertex(line: &[u8], line_no: usize) -> IoResult<Vertex> {
    let mut coords = [0.0f32; 3];
    let mut tokens = line
        .split(|&b| is_space(b))
        .filter(|t| !t.is_empty())
        .rev();

    for slot in coords.iter_mut().rev() {
        let token = tokens.next().ok_or_else(|| malformed(line_no, line))?;
        *slot = std::str::from_utf8(token)
            .ok()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| malformed(line_no, token))?;
    }

    Ok(Vertex::from_array(coords))
}

fn malformed(line_no: usize, bytes: &[u8]) -> IoError {
    IoError::malformed_number(line_no, String::from_utf8_lossy(bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{IndexedMesh, MeshTopology};

    fn parse(body: &str) -> IoResult<IndexedMesh> {
        parse_ascii(body.as_bytes()).map(|asm| asm.finish(None))
    }

    const FACET: &str = "\
 facet normal 0 0 1
  outer loop
   vertex 0 0 0
   vertex 1 0 0
   vertex 1 1 0
  endloop
 endfacet
";

    #[test]
    fn single_facet() {
        let mesh = parse(&format!("{FACET}endsolid cube\n")).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![Face::triangle(0, 1, 2)]);
        assert_eq!(mesh.vertices[2], Vertex::from_coords(1.0, 1.0, 0.0));
    }

    #[test]
    fn repeated_facet_reuses_vertices() {
        let mesh = parse(&format!("{FACET}{FACET}")).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[1], [0, 1, 2]);
    }

    #[test]
    fn indentation_does_not_affect_key() {
        let body = "vertex 0 0 0\n\t\t   vertex 0 0 0   \nvertex 1 0 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.faces[0], [0, 0, 1]);
    }

    #[test]
    fn different_formatting_is_a_different_vertex() {
        let body = "vertex 1.0 0 0\nvertex 1.00000 0 0\nvertex 1 0 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[0], mesh.vertices[1]);
    }

    #[test]
    fn inner_spacing_is_part_of_key() {
        let body = "vertex 0 0 0\nvertex 0  0 0\nvertex 0 0 1\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn scientific_notation() {
        let body = "vertex 1.5e+01 -2.0E-1 3e0\nvertex 0 0 0\nvertex 0 1 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        let v = mesh.vertices[0].position;
        assert_eq!(v.x, 15.0);
        assert_eq!(v.y, -0.2);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn crlf_line_endings() {
        let body = FACET.replace('\n', "\r\n");
        let mesh = parse(&body).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn last_line_without_newline() {
        let body = "vertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn short_facet_is_kept_malformed() {
        let body = "vertex 0 0 0\nvertex 1 0 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0].as_slice(), &[0, 1]);
        assert!(!mesh.is_triangulated());
    }

    #[test]
    fn long_facet_is_kept_malformed() {
        let body = "vertex 0 0 0\nvertex 1 0 0\nvertex 1 1 0\nvertex 0 1 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.faces[0].as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn vertices_after_last_endfacet_are_pooled_but_not_faced() {
        let body = format!("{FACET}vertex 5 5 5\n");
        let mesh = parse(&body).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn bad_float_reports_line_and_token() {
        let body = "facet normal 0 0 1\nouter loop\nvertex 0 abc 0\n";
        let err = parse(body).unwrap_err();
        match err {
            IoError::MalformedNumericLiteral { line, token } => {
                assert_eq!(line, 4);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_coordinates_is_malformed() {
        let err = parse("vertex 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::MalformedNumericLiteral { line: 2, .. }
        ));

        let err = parse("vertex\n").unwrap_err();
        assert!(matches!(err, IoError::MalformedNumericLiteral { .. }));
    }

    #[test]
    fn duplicate_bad_line_fails_on_first_sight() {
        let err = parse("vertex 0 0 0\nvertex 1 x 0\nvertex 1 x 0\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::MalformedNumericLiteral { line: 3, .. }
        ));
    }

    #[test]
    fn empty_body() {
        let mesh = parse("").unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn non_utf8_bytes_outside_coordinates_are_kept_in_key() {
        let body = b"vertex\xff 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nvertex\xfe 0 0 0\nendfacet\n";
        let mesh = parse_ascii(&body[..]).unwrap().finish(None);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertices[0], mesh.vertices[3]);
        assert_eq!(mesh.faces[0].as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn non_utf8_coordinate_reports_token() {
        let err = parse_ascii(&b"vertex 0 \xff1 0\n"[..]).unwrap_err();
        match err {
            IoError::MalformedNumericLiteral { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "\u{fffd}1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn vertical_tab_is_trimmed() {
        let body = "\x0bvertex 0 0 0\x0b\nvertex 1 0 0\n\x0b vertex 0 1 0\nendfacet\x0b\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![Face::triangle(0, 1, 2)]);
        assert_eq!(mesh.vertices[0], Vertex::from_coords(0.0, 0.0, 0.0));
    }

    #[test]
    fn facet_normal_is_ignored() {
        let body = "facet normal 1e9 bogus 0\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet\n";
        let mesh = parse(body).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }
}
