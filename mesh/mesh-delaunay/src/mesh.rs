//! Triangulation engine with boundary bookkeeping and Delaunay maintenance.

use mesh_types::{MeshTopology, PlanarMesh, Point2};
use tracing::{debug, warn};

use crate::adjacency::EdgeAdjacency;
use crate::error::{DelaunayError, DelaunayResult};
use crate::flip::{FlipReport, flip_until_delaunay};

/// Lower bound on the flip budget of a single restoration pass.
const MIN_FLIP_BUDGET: usize = 64;

/// A planar triangulation that can restore the Delaunay property in place.
///
/// Owns a [`PlanarMesh`] together with its edge adjacency, which is kept in
/// sync across edge flips. Vertex count and boundary edges never change.
///
/// # Example
///
/// ```
/// use mesh_delaunay::DelaunayMesh;
/// use mesh_types::unit_square_grid;
///
/// let mut engine = DelaunayMesh::new(unit_square_grid(4))?;
/// engine.mark_boundary();
///
/// assert_eq!(engine.boundary_vertices().iter().filter(|&&b| b).count(), 16);
/// let report = engine.restore_delaunay();
/// assert_eq!(report.flips, 0);
/// # Ok::<(), mesh_delaunay::DelaunayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DelaunayMesh {
    mesh: PlanarMesh,
    adjacency: EdgeAdjacency,
    boundary_vertices: Vec<bool>,
    boundary_marked: bool,
}

impl DelaunayMesh {
    /// Build an engine from a mesh, validating its connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The mesh has no vertices or no faces
    /// - A face references a missing vertex or repeats a vertex
    /// - An edge is shared by more than two faces
    pub fn new(mesh: PlanarMesh) -> DelaunayResult<Self> {
        if mesh.vertices.is_empty() {
            return Err(DelaunayError::EmptyMesh);
        }
        if mesh.faces.is_empty() {
            return Err(DelaunayError::NoFaces);
        }

        let vertex_count = mesh.vertices.len();
        for (face, &indices) in mesh.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(DelaunayError::InvalidIndex {
                    face,
                    index,
                    vertex_count,
                });
            }
            let [a, b, c] = indices;
            if a == b || b == c || c == a {
                return Err(DelaunayError::RepeatedIndex { face, indices });
            }
        }

        let adjacency = EdgeAdjacency::build(&mesh.faces);
        if let Some(((v0, v1), face_count)) = adjacency.non_manifold_edges().min() {
            return Err(DelaunayError::NonManifoldEdge {
                v0,
                v1,
                face_count,
            });
        }

        let boundary_vertices = adjacency.boundary_vertex_flags(vertex_count);

        debug!(
            vertices = vertex_count,
            faces = mesh.faces.len(),
            edges = adjacency.edge_count(),
            boundary_edges = adjacency.boundary_edge_count(),
            "built triangulation engine"
        );

        Ok(Self {
            mesh,
            adjacency,
            boundary_vertices,
            boundary_marked: false,
        })
    }

    /// The current mesh.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &PlanarMesh {
        &self.mesh
    }

    /// Consume the engine and return the mesh.
    #[must_use]
    pub fn into_mesh(self) -> PlanarMesh {
        self.mesh
    }

    /// Current vertex coordinates.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.mesh.vertices
    }

    /// Current faces.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.mesh.faces
    }

    /// Edge adjacency of the current faces.
    #[inline]
    #[must_use]
    pub const fn adjacency(&self) -> &EdgeAdjacency {
        &self.adjacency
    }

    /// Classify boundary vertices from the current boundary edges.
    ///
    /// Flips never touch boundary edges, so the classification holds for the
    /// rest of the engine's life.
    pub fn mark_boundary(&mut self) {
        self.boundary_vertices = self
            .adjacency
            .boundary_vertex_flags(self.mesh.vertices.len());
        self.boundary_marked = true;
        debug!(
            boundary_vertices = self.boundary_vertices.iter().filter(|&&b| b).count(),
            "marked boundary"
        );
    }

    /// Whether [`mark_boundary`](Self::mark_boundary) has run.
    #[must_use]
    pub const fn is_boundary_marked(&self) -> bool {
        self.boundary_marked
    }

    /// Per-vertex boundary flags.
    #[inline]
    #[must_use]
    pub fn boundary_vertices(&self) -> &[bool] {
        &self.boundary_vertices
    }

    /// Faces owning at least one boundary edge, in the current topology.
    #[must_use]
    pub fn boundary_face_ids(&self) -> Vec<usize> {
        self.adjacency.boundary_faces()
    }

    /// Circumcenter of every face.
    ///
    /// Faces without a circumcenter (collinear corners) report their centroid.
    #[must_use]
    pub fn circumcenters(&self) -> Vec<Point2<f64>> {
        self.mesh
            .triangles()
            .map(|tri| tri.circumcenter().unwrap_or_else(|| tri.centroid()))
            .collect()
    }

    /// Centroid of every face.
    #[must_use]
    pub fn centroids(&self) -> Vec<Point2<f64>> {
        self.mesh.triangles().map(|tri| tri.centroid()).collect()
    }

    /// Signed area of every face.
    #[must_use]
    pub fn signed_areas(&self) -> Vec<f64> {
        self.mesh.signed_areas()
    }

    /// Unsigned area of every face.
    #[must_use]
    pub fn areas(&self) -> Vec<f64> {
        self.mesh.triangles().map(|tri| tri.area()).collect()
    }

    /// Replace every vertex coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::CoordinateCountMismatch`] if `coordinates`
    /// does not have one point per vertex; the mesh is left unchanged.
    pub fn update_coordinates(&mut self, coordinates: &[Point2<f64>]) -> DelaunayResult<()> {
        if coordinates.len() != self.mesh.vertices.len() {
            return Err(DelaunayError::CoordinateCountMismatch {
                expected: self.mesh.vertices.len(),
                actual: coordinates.len(),
            });
        }
        self.mesh.vertices.copy_from_slice(coordinates);
        Ok(())
    }

    /// Flip interior edges until the triangulation is Delaunay.
    ///
    /// Idempotent: a second call right after the first performs no flips.
    pub fn restore_delaunay(&mut self) -> FlipReport {
        let budget = self
            .mesh
            .faces
            .len()
            .saturating_mul(self.mesh.faces.len())
            .max(MIN_FLIP_BUDGET);

        let report = flip_until_delaunay(
            &self.mesh.vertices,
            &mut self.mesh.faces,
            &mut self.adjacency,
            budget,
        );

        if report.exhausted {
            warn!(
                flips = report.flips,
                budget, "flip budget exhausted before the triangulation became Delaunay"
            );
        } else if report.changed() {
            debug!(flips = report.flips, "restored Delaunay property");
        }

        report
    }
}

impl MeshTopology for DelaunayMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    fn vertex(&self, index: usize) -> Option<Point2<f64>> {
        self.mesh.vertex(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.mesh.face(index)
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.mesh.faces.iter().copied()
    }
}
