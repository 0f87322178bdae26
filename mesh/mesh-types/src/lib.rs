//! Indexed mesh types for STL import.
//!
//! - [`Vertex`] - A point in 3D space (`f32`, the STL storage precision)
//! - [`Face`] - An ordered list of vertex-pool indices
//! - [`IndexedMesh`] - A vertex pool plus faces referencing it
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This crate has no I/O and no application-framework dependencies. The
//! reader lives in `mesh-stl`; hosts only need these types to consume its
//! output.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Vertex, Face, IndexedMesh, Point3, MeshTopology};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push(Face::triangle(0, 1, 2));
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod face;
mod mesh;
mod traits;
mod vertex;

pub use bounds::Aabb;
pub use face::Face;
pub use mesh::IndexedMesh;
pub use traits::{MeshBounds, MeshTopology};
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
