//! Core planar mesh types.
//!
//! This crate provides the foundational types for planar mesh processing:
//!
//! - [`PlanarMesh`] - A triangle mesh with indexed 2-D vertices
//! - [`Triangle2`] - A concrete triangle with vertex positions
//! - [`Orientation`] - Winding of a triangle, derived from its signed area
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Winding
//!
//! Faces are expected to share one winding across the mesh. Generators in this
//! crate emit **counter-clockwise (CCW)** faces, i.e. positive signed area.
//!
//! # Example
//!
//! ```
//! use mesh_types::{PlanarMesh, Point2, MeshTopology};
//!
//! let mut mesh = PlanarMesh::new();
//! mesh.vertices.push(Point2::new(0.0, 0.0));
//! mesh.vertices.push(Point2::new(1.0, 0.0));
//! mesh.vertices.push(Point2::new(0.0, 1.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!((mesh.total_area() - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod traits;
mod triangle;

pub use mesh::{PlanarMesh, regular_polygon_fan, unit_square_grid};
pub use traits::MeshTopology;
pub use triangle::{Orientation, Triangle2};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

/// Largest absolute out-of-plane coordinate accepted when flattening 3-D input.
pub const FLATNESS_TOLERANCE: f64 = 1.0e-15;
