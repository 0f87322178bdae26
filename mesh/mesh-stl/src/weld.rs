//! Tolerance welding by sorted sweep.
//!
//! This is a post-pass over an already imported mesh and is never applied
//! unless [`DedupPolicy::SortedWeld`](crate::DedupPolicy::SortedWeld) is
//! selected. Vertices are ordered lexicographically by (x, y, z) and each one
//! is compared only against the current representative, so two close
//! vertices separated in sort order by a third are not merged. It is not a
//! true proximity weld and does not replace the exact-key dedup.

use std::cmp::Ordering;

use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::error::IoResult;
use crate::params::validate_epsilon;

/// Result of [`weld_sorted`].
#[derive(Debug, Clone)]
pub struct WeldResult {
    /// The welded mesh.
    pub mesh: IndexedMesh,
    /// Number of vertices folded into an earlier representative.
    pub merged: usize,
}

/// Merge vertices that are within `epsilon` of the current representative in
/// sorted order.
///
/// The output vertex pool is in sorted order. Face count and order are
/// preserved, including faces that collapse to repeated indices.
///
/// # Errors
///
/// Returns `InvalidParams` if `epsilon` is negative or NaN.
///
/// # Example
///
/// ```
/// use mesh_stl::weld_sorted;
/// use mesh_types::{Face, IndexedMesh, Vertex};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///         Vertex::from_coords(1.00001, 0.0, 0.0),
///     ],
///     vec![Face::triangle(0, 1, 2), Face::triangle(0, 3, 2)],
/// );
///
/// let welded = weld_sorted(&mesh, 1e-3).unwrap();
/// assert_eq!(welded.merged, 1);
/// assert_eq!(welded.mesh.vertices.len(), 3);
/// assert_eq!(welded.mesh.faces[0], welded.mesh.faces[1]);
/// ```
#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
pub fn weld_sorted(mesh: &IndexedMesh, epsilon: f32) -> IoResult<WeldResult> {
    validate_epsilon(epsilon)?;

    let mut order: Vec<u32> = (0..mesh.vertices.len() as u32).collect();
    order.sort_by(|&a, &b| lexicographic(&mesh.vertices[a as usize], &mesh.vertices[b as usize]));

    let mut remap = vec![0u32; mesh.vertices.len()];
    let mut unique: Vec<Vertex> = Vec::with_capacity(mesh.vertices.len());
    let mut current: Option<Vertex> = None;

    for &idx in &order {
        let vertex = mesh.vertices[idx as usize];
        let starts_new = match current {
            None => true,
            Some(rep) => vertex.max_abs_diff(&rep) > epsilon,
        };
        if starts_new {
            unique.push(vertex);
            current = Some(vertex);
        }
        remap[idx as usize] = (unique.len() - 1) as u32;
    }

    let faces = mesh
        .faces
        .iter()
        .map(|face| {
            let mut face = face.clone();
            for idx in face.indices_mut() {
                *idx = remap[*idx as usize];
            }
            face
        })
        .collect();

    let merged = mesh.vertices.len() - unique.len();
    debug!(epsilon, merged, "sorted weld finished");

    let mut welded = IndexedMesh::from_parts(unique, faces);
    welded.name.clone_from(&mesh.name);
    Ok(WeldResult {
        mesh: welded,
        merged,
    })
}

fn lexicographic(a: &Vertex, b: &Vertex) -> Ordering {
    a.position
        .x
        .total_cmp(&b.position.x)
        .then_with(|| a.position.y.total_cmp(&b.position.y))
        .then_with(|| a.position.z.total_cmp(&b.position.z))
}
