//! Planar triangle mesh relaxation toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates, providing a unified API
//! for loading a planar mesh, relaxing it with ODT or CPT and saving the
//! result.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // Load a mesh
//! let mesh = mesh::io::load_mesh("domain.obj").unwrap();
//!
//! // Relax interior vertices toward circumcenters
//! let params = RelaxParams::default().with_step_files("steps/step_{}.ply");
//! let output = odt(&mesh, &params).unwrap();
//! println!("{}", output.summary);
//!
//! // Save the result
//! mesh::io::save_mesh(&output.mesh, "relaxed.obj").unwrap();
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`types`] - Core data structures: `PlanarMesh`, `Triangle2`, `Orientation`
//! - [`io`] - File I/O for OBJ and PLY formats
//!
//! ## Topology
//! - [`delaunay`] - Edge adjacency, boundary marking and Delaunay edge flips
//!
//! ## Relaxation
//! - [`relax`] - ODT and CPT relaxation with orientation-safe steps
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize `PlanarMesh`

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `PlanarMesh`, `Triangle2`, `Orientation`.
pub use mesh_types as types;

/// File I/O for OBJ and PLY formats.
pub use mesh_io as io;

/// Edge adjacency, boundary marking and Delaunay edge flips.
pub use mesh_delaunay as delaunay;

/// ODT and CPT relaxation.
pub use mesh_relax as relax;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh relaxation.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{MeshTopology, Orientation, PlanarMesh, Point2, Triangle2};

    // I/O
    pub use mesh_io::{MeshFormat, load_mesh, save_mesh};

    // Topology
    pub use mesh_delaunay::DelaunayMesh;

    // Relaxation (main use case)
    pub use mesh_relax::{
        MeshEngine, RelaxMethod, RelaxOutput, RelaxParams, Termination, WeightingPolicy, cpt,
        odt, relax,
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        // Verify prelude types are accessible
        use prelude::*;

        let mesh = PlanarMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_module_reexports() {
        // Verify all modules are accessible
        let _ = types::PlanarMesh::new();
        let _ = relax::RelaxParams::default();
        let _ = io::MeshFormat::from_path("mesh.obj");
        let _ = delaunay::INCIRCLE_TOLERANCE;
    }
}
