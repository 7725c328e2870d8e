//! Error types for mesh relaxation.

use mesh_delaunay::DelaunayError;
use mesh_io::IoError;
use thiserror::Error;

/// Errors that can occur during relaxation.
#[derive(Debug, Error)]
pub enum RelaxError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// Input coordinates are not flat.
    #[error("Vertex {vertex} has z = {z:e}, input must be planar")]
    NonPlanar {
        /// Index of the first out-of-plane vertex.
        vertex: usize,
        /// Its z coordinate.
        z: f64,
    },

    /// Convergence tolerance is not a positive finite number.
    #[error("Invalid tolerance: {0} (must be > 0)")]
    InvalidTolerance(f64),

    /// Maximum step count is zero.
    #[error("Invalid maximum step count: 0 (must be >= 1)")]
    InvalidMaxSteps,

    /// Raw coordinate or index arrays have the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A vertex belongs to no face.
    #[error("Vertex {0} is not referenced by any face")]
    IsolatedVertex(u32),

    /// An input face has zero area.
    #[error("Face {0} has zero area")]
    DegenerateCell(usize),

    /// The triangulation engine rejected the mesh or an update.
    #[error(transparent)]
    Topology(#[from] DelaunayError),

    /// Writing a step snapshot failed.
    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] IoError),
}

/// Result type for relaxation operations.
pub type RelaxResult<T> = std::result::Result<T, RelaxError>;
