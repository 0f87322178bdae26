//! Vertex type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex in 3D space.
///
/// STL stores coordinates as little-endian `f32`, so the position is kept at
/// that precision. Facet normals are not carried on vertices.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1, v2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f32>,
}

impl Vertex {
    /// Create a new vertex from a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.x, 1.0);
    /// assert_eq!(v.position.z, 3.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    /// Create a vertex from an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub fn from_array(coords: [f32; 3]) -> Self {
        Self::from_coords(coords[0], coords[1], coords[2])
    }

    /// Coordinates as an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [f32; 3] {
        [self.position.x, self.position.y, self.position.z]
    }

    /// Largest absolute per-axis difference to another vertex.
    ///
    /// This is the Chebyshev (L-infinity) distance between the positions.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let a = Vertex::from_coords(0.0, 0.0, 0.0);
    /// let b = Vertex::from_coords(0.5, -2.0, 1.0);
    /// assert_eq!(a.max_abs_diff(&b), 2.0);
    /// ```
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        (self.position - other.position).amax()
    }
}

impl From<[f32; 3]> for Vertex {
    fn from(coords: [f32; 3]) -> Self {
        Self::from_array(coords)
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_coords_matches_point() {
        let v = Vertex::from_coords(1.5, -2.0, 3.25);
        assert_eq!(v.position, Point3::new(1.5, -2.0, 3.25));
        assert_eq!(v.to_array(), [1.5, -2.0, 3.25]);
    }

    #[test]
    fn from_array_roundtrip() {
        let v: Vertex = [4.0, 5.0, 6.0].into();
        assert_eq!(v.to_array(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn max_abs_diff_is_symmetric() {
        let a = Vertex::from_coords(1.0, 2.0, 3.0);
        let b = Vertex::from_coords(1.1, 1.7, 3.05);
        assert_relative_eq!(a.max_abs_diff(&b), 0.3, epsilon = 1e-6);
        assert_relative_eq!(b.max_abs_diff(&a), a.max_abs_diff(&b));
    }

    #[test]
    fn max_abs_diff_of_identical_is_zero() {
        let a = Vertex::from_coords(7.0, 8.0, 9.0);
        assert_eq!(a.max_abs_diff(&a), 0.0);
    }
}
