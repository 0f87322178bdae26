//! STL import into a deduplicated indexed mesh.
//!
//! Reads ASCII or binary STL and produces an [`IndexedMesh`]: a pool of
//! unique vertices plus faces that index into it.
//!
//! # Pipeline
//!
//! 1. [`sniff_header`] classifies the file on its first five bytes and
//!    consumes the header.
//! 2. [`parse_ascii`] or [`parse_binary`] reads the body.
//! 3. Every vertex goes through a [`VertexPool`], keyed on its exact source
//!    representation.
//! 4. A [`MeshAssembler`] folds pool and faces into the mesh.
//! 5. Optionally, [`weld_sorted`] merges near-identical vertices.
//!
//! # Vertex identity
//!
//! Dedup is exact, not geometric. Binary vertices merge when their 12 raw
//! bytes match; ASCII vertices merge when their trimmed `vertex` lines match.
//! `vertex 1.0 0 0` and `vertex 1.00000 0 0` stay separate.
//!
//! # Known limitations
//!
//! - A binary file whose header starts with `solid` is read as ASCII.
//! - An ASCII facet with other than three `vertex` lines yields a face of
//!   that length rather than an error.
//! - Facet normals are discarded.
//!
//! # Example
//!
//! ```no_run
//! use mesh_stl::import_stl;
//! use mesh_types::MeshTopology;
//!
//! let mesh = import_stl("model.stl").unwrap();
//! println!("{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod ascii;
mod assemble;
mod binary;
mod error;
mod header;
mod params;
mod pool;
mod weld;

pub use ascii::parse_ascii;
pub use assemble::MeshAssembler;
pub use binary::{parse_binary, TRIANGLE_SIZE};
pub use error::{IoError, IoResult};
pub use header::{sniff_header, StlHeader, StlKind, ASCII_MAGIC, HEADER_SIZE};
pub use params::{DedupPolicy, ImportParams, MeshNaming};
pub use pool::{AsciiKey, BinaryKey, VertexPool};
pub use weld::{weld_sorted, WeldResult};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mesh_types::{IndexedMesh, MeshTopology};
use tracing::{info, info_span};

/// Import an STL file with default parameters.
///
/// The mesh is named after the file stem and vertices are deduplicated on
/// their exact representation.
///
/// # Errors
///
/// - `FileNotFound` if the path does not exist
/// - `TruncatedInput` if the file ends early
/// - `MalformedNumericLiteral` if an ASCII coordinate does not parse
/// - `Io` for other read failures
///
/// # Example
///
/// ```no_run
/// use mesh_stl::import_stl;
///
/// let mesh = import_stl("bracket.stl").unwrap();
/// assert_eq!(mesh.name.as_deref(), Some("bracket"));
/// ```
pub fn import_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    import_stl_with(path, &ImportParams::default())
}

/// Import an STL file with explicit parameters.
///
/// The file is opened here and closed when this call returns, on success
/// and on every error path.
///
/// # Errors
///
/// Same as [`import_stl`], plus `InvalidParams` for a bad weld tolerance.
///
/// # Example
///
/// ```no_run
/// use mesh_stl::{import_stl_with, ImportParams, MeshNaming};
///
/// let params = ImportParams::welded(1e-5).with_naming(MeshNaming::SolidName);
/// let mesh = import_stl_with("scan.stl", &params).unwrap();
/// ```
pub fn import_stl_with<P: AsRef<Path>>(path: P, params: &ImportParams) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let _span = info_span!("import_stl", path = %path.display()).entered();

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let stem = path.file_stem().map(|s| s.to_string_lossy());
    read_stl(BufReader::new(file), stem.as_deref(), params)
}

/// Import STL data from any buffered reader.
///
/// `file_stem` is used for naming when the policy asks for it; pass `None`
/// for in-memory data with no file behind it.
///
/// # Errors
///
/// Same as [`import_stl_with`], except `FileNotFound`.
///
/// # Example
///
/// ```
/// use mesh_stl::{read_stl, ImportParams};
/// use mesh_types::MeshTopology;
///
/// let stl = b"solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
/// let mesh = read_stl(&stl[..], Some("t"), &ImportParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
pub fn read_stl<R: BufRead>(
    mut reader: R,
    file_stem: Option<&str>,
    params: &ImportParams,
) -> IoResult<IndexedMesh> {
    params.validate()?;

    let header = sniff_header(&mut reader)?;
    let name = params.naming.resolve(&header, file_stem);

    let mesh = match header.kind() {
        StlKind::Ascii => {
            info!("Reading ASCII STL");
            parse_ascii(reader)?.finish(name)
        }
        StlKind::Binary => {
            info!("Reading binary STL");
            parse_binary(reader)?.finish(name)
        }
    };

    let mesh = match params.dedup {
        DedupPolicy::Exact => mesh,
        DedupPolicy::SortedWeld { epsilon } => weld_sorted(&mesh, epsilon)?.mesh,
    };

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "STL import finished"
    );
    Ok(mesh)
}
