//! Error types for triangulation engine operations.

use thiserror::Error;

/// Result type for triangulation engine operations.
pub type DelaunayResult<T> = Result<T, DelaunayError>;

/// Errors that can occur when building or updating a [`DelaunayMesh`](crate::DelaunayMesh).
#[derive(Debug, Error)]
pub enum DelaunayError {
    /// Mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("mesh has no faces")]
    NoFaces,

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Index of the offending face.
        face: usize,
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face names the same vertex more than once.
    #[error("face {face} repeats a vertex: {indices:?}")]
    RepeatedIndex {
        /// Index of the offending face.
        face: usize,
        /// The face's vertex indices.
        indices: [u32; 3],
    },

    /// An edge is shared by more than two faces.
    #[error("edge ({v0}, {v1}) is shared by {face_count} faces")]
    NonManifoldEdge {
        /// First edge endpoint (smaller index).
        v0: u32,
        /// Second edge endpoint (larger index).
        v1: u32,
        /// Number of faces sharing the edge.
        face_count: usize,
    },

    /// A coordinate update does not match the vertex count.
    #[error("coordinate update has {actual} points, mesh has {expected} vertices")]
    CoordinateCountMismatch {
        /// Number of vertices in the mesh.
        expected: usize,
        /// Number of points supplied.
        actual: usize,
    },
}
