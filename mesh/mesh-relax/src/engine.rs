//! The triangulation interface the relaxation loop runs against.

use mesh_delaunay::DelaunayMesh;
use mesh_types::{PlanarMesh, Point2};

use crate::error::RelaxResult;

/// Mesh storage and maintenance consumed by the relaxation loop.
///
/// Cells are triangles given as vertex index triples. The loop changes
/// coordinates only through [`update_coordinates`](Self::update_coordinates)
/// and connectivity only through [`restore_delaunay`](Self::restore_delaunay).
pub trait MeshEngine {
    /// Current vertex coordinates.
    fn coordinates(&self) -> &[Point2<f64>];

    /// Current cells.
    fn cells(&self) -> &[[u32; 3]];

    /// Circumcenter of every cell.
    fn circumcenters(&self) -> Vec<Point2<f64>>;

    /// Centroid (barycenter) of every cell.
    fn centroids(&self) -> Vec<Point2<f64>>;

    /// Cells owning at least one boundary edge.
    fn boundary_cell_ids(&self) -> Vec<usize>;

    /// Area of every cell, signed by winding when `signed` is true.
    fn cell_areas(&self, signed: bool) -> Vec<f64>;

    /// Per-vertex boundary flags.
    fn is_boundary_vertex(&self) -> &[bool];

    /// Replace every vertex coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if `coordinates` does not hold one point per vertex.
    fn update_coordinates(&mut self, coordinates: &[Point2<f64>]) -> RelaxResult<()>;

    /// Flip edges until the triangulation is Delaunay, returning the flip count.
    fn restore_delaunay(&mut self) -> usize;

    /// Classify boundary vertices. Called once before the first step.
    fn mark_boundary(&mut self);

    /// Snapshot of the current mesh.
    fn to_mesh(&self) -> PlanarMesh {
        PlanarMesh::from_parts(self.coordinates().to_vec(), self.cells().to_vec())
    }
}

impl MeshEngine for DelaunayMesh {
    fn coordinates(&self) -> &[Point2<f64>] {
        self.vertices()
    }

    fn cells(&self) -> &[[u32; 3]] {
        self.faces()
    }

    fn circumcenters(&self) -> Vec<Point2<f64>> {
        Self::circumcenters(self)
    }

    fn centroids(&self) -> Vec<Point2<f64>> {
        Self::centroids(self)
    }

    fn boundary_cell_ids(&self) -> Vec<usize> {
        self.boundary_face_ids()
    }

    fn cell_areas(&self, signed: bool) -> Vec<f64> {
        if signed {
            self.signed_areas()
        } else {
            self.areas()
        }
    }

    fn is_boundary_vertex(&self) -> &[bool] {
        self.boundary_vertices()
    }

    fn update_coordinates(&mut self, coordinates: &[Point2<f64>]) -> RelaxResult<()> {
        Ok(Self::update_coordinates(self, coordinates)?)
    }

    fn restore_delaunay(&mut self) -> usize {
        Self::restore_delaunay(self).flips
    }

    fn mark_boundary(&mut self) {
        Self::mark_boundary(self);
    }

    fn to_mesh(&self) -> PlanarMesh {
        self.mesh().clone()
    }
}
