//! Traits for mesh types.

use crate::Triangle2;
use nalgebra::Point2;

/// Trait for types that provide planar mesh topology information.
///
/// This trait defines the minimal read-only interface for a mesh structure,
/// allowing algorithms to work with different mesh representations.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex position by index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn vertex(&self, index: usize) -> Option<Point2<f64>>;

    /// Get a face by index.
    ///
    /// Returns `None` if the index is out of bounds.
    /// The returned array contains vertex indices.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index or any of its vertex indices is out of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle2> {
        let [i0, i1, i2] = self.face(face_index)?;
        Some(Triangle2::new(
            self.vertex(i0 as usize)?,
            self.vertex(i1 as usize)?,
            self.vertex(i2 as usize)?,
        ))
    }

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Iterate over all triangles with resolved vertex positions.
    ///
    /// Faces referencing missing vertices are skipped.
    fn triangles(&self) -> impl Iterator<Item = Triangle2> {
        (0..self.face_count()).filter_map(|fi| self.triangle(fi))
    }
}
