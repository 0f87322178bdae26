//! Vertex deduplication by canonical key.
//!
//! A vertex's identity is the exact representation it had in the file, not
//! its value: the 12 raw coordinate bytes in binary STL, the trimmed line
//! text in ASCII STL. `1.0` and `1.00000` are different keys.

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashMap;
use mesh_types::Vertex;

use crate::error::IoResult;

/// Canonical key of a binary STL vertex: its three little-endian `f32`s.
pub type BinaryKey = [u8; 12];

/// Canonical key of an ASCII STL vertex: the raw bytes of the trimmed
/// `vertex` line. Looked up by `&[u8]`.
pub type AsciiKey = Vec<u8>;

/// Insertion-ordered pool of unique vertices.
///
/// Each distinct key gets the next index the first time it is seen and keeps
/// it for the rest of the import.
///
/// # Example
///
/// ```
/// use mesh_stl::{AsciiKey, VertexPool};
/// use mesh_types::Vertex;
///
/// let mut pool: VertexPool<AsciiKey> = VertexPool::new();
/// let origin = Vertex::from_coords(0.0, 0.0, 0.0);
/// let a = pool.resolve(b"vertex 0 0 0".as_slice(), || Ok(origin)).unwrap();
/// let x = Vertex::from_coords(1.0, 0.0, 0.0);
/// let b = pool.resolve(b"vertex 1 0 0".as_slice(), || Ok(x)).unwrap();
/// let c = pool.resolve(b"vertex 0 0 0".as_slice(), || unreachable!()).unwrap();
///
/// assert_eq!((a, b, c), (0, 1, 0));
/// assert_eq!(pool.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VertexPool<K> {
    index: HashMap<K, u32>,
    vertices: Vec<Vertex>,
}

impl<K: Hash + Eq> VertexPool<K> {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    /// Create an empty pool sized for `capacity` unique vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Return the pool index for `key`, inserting a new vertex on first sight.
    ///
    /// `make` is only called when the key is new, so coordinates of repeated
    /// vertices are decoded once.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `make`; the pool is left unchanged.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    pub fn resolve<Q>(
        &mut self,
        key: &Q,
        make: impl FnOnce() -> IoResult<Vertex>,
    ) -> IoResult<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&idx) = self.index.get(key) {
            return Ok(idx);
        }

        let vertex = make()?;
        let idx = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.index.insert(key.to_owned(), idx);
        Ok(idx)
    }

    /// Look up a key without inserting.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Number of unique vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if no vertex has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unique vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Consume the pool, returning the unique vertices in insertion order.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

impl<K: Hash + Eq> Default for VertexPool<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::IoError;

    fn key(x: f32, y: f32, z: f32) -> BinaryKey {
        let mut k = [0u8; 12];
        k[0..4].copy_from_slice(&x.to_le_bytes());
        k[4..8].copy_from_slice(&y.to_le_bytes());
        k[8..12].copy_from_slice(&z.to_le_bytes());
        k
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut pool: VertexPool<BinaryKey> = VertexPool::new();
        let keys = [key(0.0, 0.0, 0.0), key(1.0, 0.0, 0.0), key(0.0, 1.0, 0.0)];

        for (expected, k) in keys.iter().enumerate() {
            let idx = pool
                .resolve(k, || Ok(Vertex::from_coords(0.0, 0.0, 0.0)))
                .unwrap();
            assert_eq!(idx as usize, expected);
        }
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn repeated_key_reuses_index() {
        let mut pool: VertexPool<BinaryKey> = VertexPool::new();
        let origin = key(0.0, 0.0, 0.0);

        let first = pool
            .resolve(&origin, || Ok(Vertex::from_coords(0.0, 0.0, 0.0)))
            .unwrap();
        let mut called = false;
        let second = pool
            .resolve(&origin, || {
                called = true;
                Ok(Vertex::from_coords(9.0, 9.0, 9.0))
            })
            .unwrap();

        assert_eq!(first, second);
        assert!(!called);
        assert_eq!(pool.vertices(), &[Vertex::from_coords(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn signed_zero_keys_stay_distinct() {
        let mut pool: VertexPool<BinaryKey> = VertexPool::new();
        let zero = Vertex::from_coords(0.0, 0.0, 0.0);
        let neg = Vertex::from_coords(-0.0, 0.0, 0.0);
        let a = pool.resolve(&key(0.0, 0.0, 0.0), || Ok(zero)).unwrap();
        let b = pool.resolve(&key(-0.0, 0.0, 0.0), || Ok(neg)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn text_keys_are_not_numeric() {
        let mut pool: VertexPool<AsciiKey> = VertexPool::new();
        let one = Vertex::from_coords(1.0, 0.0, 0.0);
        let short = b"vertex 1.0 0 0".as_slice();
        let padded = b"vertex 1.00000 0 0".as_slice();
        let a = pool.resolve(short, || Ok(one)).unwrap();
        let b = pool.resolve(padded, || Ok(one)).unwrap();
        assert_ne!(a, b);
        assert_eq!(pool.get(short), Some(0));
        assert_eq!(pool.get(b"vertex 2 0 0".as_slice()), None);
    }

    #[test]
    fn failed_make_leaves_pool_unchanged() {
        let mut pool: VertexPool<AsciiKey> = VertexPool::new();
        let line = b"vertex x 0 0".as_slice();
        let result = pool.resolve(line, || Err(IoError::malformed_number(3, "x")));
        assert!(result.is_err());
        assert!(pool.is_empty());
        assert_eq!(pool.get(line), None);
    }
}
