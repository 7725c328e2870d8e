//! Relaxation of planar triangle meshes.
//!
//! This crate improves cell quality by moving interior vertices while the
//! boundary stays fixed. Two schemes share one loop:
//!
//! - **ODT** (Optimal Delaunay Triangulation): vertices move toward the
//!   weighted average of the circumcenters of their cells; cells on the
//!   boundary contribute their barycenter instead
//! - **CPT** (Centroidal Patch Triangulation): vertices move toward the
//!   weighted average of the centroids of their cells
//!
//! Each step is shortened by halving until no cell changes orientation, then
//! the triangulation is flipped back to Delaunay. The loop stops once every
//! vertex moves less than the tolerance or the step limit is reached.
//!
//! The loop talks to the triangulation through the [`MeshEngine`] trait;
//! [`mesh_delaunay::DelaunayMesh`] is the provided engine.
//!
//! # Examples
//!
//! Relax a jittered grid:
//!
//! ```
//! use mesh_relax::{odt, RelaxParams};
//! use mesh_types::{unit_square_grid, Point2};
//!
//! let mut grid = unit_square_grid(4);
//! grid.vertices[6] = Point2::new(0.3, 0.2);
//!
//! let output = odt(&grid, &RelaxParams::quick().with_verbosity(0))?;
//!
//! // Boundary vertices never move
//! assert_eq!(output.mesh.vertices[0], grid.vertices[0]);
//! assert!(output.summary.iterations >= 1);
//! # Ok::<(), mesh_relax::RelaxError>(())
//! ```
//!
//! Area-weighted CPT with per-step snapshots:
//!
//! ```no_run
//! use mesh_relax::{cpt, RelaxParams, WeightingPolicy};
//!
//! let mesh = mesh_io::load_mesh("domain.obj")?;
//! let params = RelaxParams::high_quality()
//!     .with_weighting(WeightingPolicy::AreaWeighted)
//!     .with_step_files("steps/step_{}.ply");
//!
//! let output = cpt(&mesh, &params)?;
//! mesh_io::save_mesh(&output.mesh, "relaxed.obj")?;
//! println!("{}", output.summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod aggregate;
mod engine;
mod error;
mod params;
mod reference;
mod relax;
mod result;
mod snapshot;
mod stats;
mod step;

pub use aggregate::aggregate;
pub use engine::MeshEngine;
pub use error::{RelaxError, RelaxResult};
pub use params::{RelaxParams, WeightingPolicy};
pub use reference::{CentroidalPatch, OptimalDelaunay, ReferencePoints, RelaxMethod};
pub use relax::{cpt, odt, relax, relax_with_engine, relax_xyz};
pub use result::{RelaxOutput, RelaxSummary, Termination};
pub use snapshot::{FileSnapshots, SnapshotHook};
pub use stats::{QualityStats, energy};
pub use step::{StepOutcome, step_toward};
