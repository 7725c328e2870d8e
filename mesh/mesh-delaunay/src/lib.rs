//! Planar triangulation engine.
//!
//! This crate owns a [`PlanarMesh`](mesh_types::PlanarMesh) plus its edge
//! adjacency and keeps the triangulation Delaunay under vertex motion:
//!
//! - [`EdgeAdjacency`] - edge-to-face lookup, boundary edges, vertices and faces
//! - [`orient2d`] / [`in_circumcircle`] - floating-point predicates
//! - [`flip_until_delaunay`] - Lawson edge flipping with a flip budget
//! - [`DelaunayMesh`] - validated engine with per-cell queries and restoration
//!
//! Only interior edges are ever flipped, so the boundary and the vertex set
//! are fixed for the engine's lifetime.
//!
//! # Example
//!
//! ```
//! use mesh_delaunay::DelaunayMesh;
//! use mesh_types::{PlanarMesh, Point2};
//!
//! // A kite split along its long diagonal
//! let mesh = PlanarMesh::from_parts(
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(1.0, -0.5),
//!         Point2::new(2.0, 0.0),
//!         Point2::new(1.0, 0.5),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//!
//! let mut engine = DelaunayMesh::new(mesh)?;
//! assert_eq!(engine.restore_delaunay().flips, 1);
//! assert!(engine.adjacency().faces_for_edge(1, 3).is_some());
//! # Ok::<(), mesh_delaunay::DelaunayError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
mod flip;
mod mesh;
mod predicates;

pub use adjacency::EdgeAdjacency;
pub use error::{DelaunayError, DelaunayResult};
pub use flip::{FlipReport, flip_until_delaunay};
pub use mesh::DelaunayMesh;
pub use predicates::{INCIRCLE_TOLERANCE, in_circumcircle, incircle, orient2d};
