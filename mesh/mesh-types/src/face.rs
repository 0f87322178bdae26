//! Face type.

use smallvec::SmallVec;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A face as an ordered list of indices into the vertex pool.
///
/// STL is triangle-only, so three indices are stored inline. The ASCII reader
/// closes a face on every `endfacet` with however many `vertex` lines it saw,
/// which means a malformed file can yield faces with fewer or more than three
/// indices. Those are kept as-is; use [`Face::is_triangle`] to detect them.
///
/// # Example
///
/// ```
/// use mesh_types::Face;
///
/// let face = Face::triangle(0, 1, 2);
/// assert!(face.is_triangle());
/// assert_eq!(face.as_triangle(), Some([0, 1, 2]));
/// assert_eq!(face, [0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face(SmallVec<[u32; 3]>);

impl Face {
    /// Create a triangle face.
    #[inline]
    #[must_use]
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self(SmallVec::from_buf([a, b, c]))
    }

    /// Create a face from any number of indices, in order.
    #[must_use]
    pub fn from_indices(indices: &[u32]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    /// Number of corners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the face has no corners at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the face has exactly three corners.
    #[inline]
    #[must_use]
    pub fn is_triangle(&self) -> bool {
        self.0.len() == 3
    }

    /// The three indices, if this face is a triangle.
    #[must_use]
    pub fn as_triangle(&self) -> Option<[u32; 3]> {
        match self.0.as_slice() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Indices as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        self.0.as_slice()
    }

    /// Mutable access to the indices.
    #[inline]
    pub fn indices_mut(&mut self) -> &mut [u32] {
        self.0.as_mut_slice()
    }
}

impl Deref for Face {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.0.as_slice()
    }
}

impl From<[u32; 3]> for Face {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::triangle(a, b, c)
    }
}

impl PartialEq<[u32; 3]> for Face {
    fn eq(&self, other: &[u32; 3]) -> bool {
        self.0.as_slice() == other.as_slice()
    }
}
