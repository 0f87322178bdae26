//! Mesh assembly.
//!
//! Both parsers feed the same assembler, so the output contract does not
//! depend on which variant was read.

use std::borrow::Borrow;
use std::hash::Hash;

use mesh_types::{Face, IndexedMesh, Vertex};
use tracing::debug;

use crate::error::IoResult;
use crate::pool::VertexPool;

/// Accumulates a vertex pool and a face list for one import.
#[derive(Debug, Clone)]
pub struct MeshAssembler<K> {
    pool: VertexPool<K>,
    faces: Vec<Face>,
}

impl<K: Hash + Eq> MeshAssembler<K> {
    /// Create an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: VertexPool::new(),
            faces: Vec::new(),
        }
    }

    /// Create an assembler with room for the given vertex and face counts.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            pool: VertexPool::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Resolve a vertex through the pool.
    ///
    /// # Errors
    ///
    /// Propagates errors from `make`.
    pub fn resolve_vertex<Q>(
        &mut self,
        key: &Q,
        make: impl FnOnce() -> IoResult<Vertex>,
    ) -> IoResult<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.pool.resolve(key, make)
    }

    /// Append a face.
    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Number of unique vertices so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.pool.len()
    }

    /// Number of faces so far.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Build the final mesh. No further dedup or validation happens here.
    #[must_use]
    pub fn finish(self, name: Option<String>) -> IndexedMesh {
        debug!(
            vertices = self.pool.len(),
            faces = self.faces.len(),
            "assembled mesh"
        );
        let mut mesh = IndexedMesh::from_parts(self.pool.into_vertices(), self.faces);
        mesh.name = name;
        mesh
    }
}

impl<K: Hash + Eq> Default for MeshAssembler<K> {
    fn default() -> Self {
        Self::new()
    }
}
