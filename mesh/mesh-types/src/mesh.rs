//! Indexed planar triangle mesh.

use crate::MeshTopology;
use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed planar triangle mesh.
///
/// Stores vertex positions and faces separately, with faces referencing
/// vertices by index.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point2<f64>>` - Vertex positions
/// - `faces`: `Vec<[u32; 3]>` - Triangle faces as vertex indices
///
/// # Example
///
/// ```
/// use mesh_types::{PlanarMesh, Point2, MeshTopology};
///
/// let mut mesh = PlanarMesh::new();
/// mesh.vertices.push(Point2::new(0.0, 0.0));
/// mesh.vertices.push(Point2::new(1.0, 0.0));
/// mesh.vertices.push(Point2::new(0.0, 1.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanarMesh {
    /// Vertex positions.
    pub vertices: Vec<Point2<f64>>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl PlanarMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point2<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Signed area of every face, in face order.
    ///
    /// Faces referencing missing vertices report zero.
    #[must_use]
    pub fn signed_areas(&self) -> Vec<f64> {
        (0..self.faces.len())
            .map(|fi| self.triangle(fi).map_or(0.0, |t| t.signed_area()))
            .collect()
    }

    /// Total unsigned area of all faces.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Reverse the winding of every face.
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }
}

impl MeshTopology for PlanarMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<Point2<f64>> {
        self.vertices.get(index).copied()
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }
}

/// Create a structured triangulation of the unit square.
///
/// `n` cells per side, `(n + 1)^2` vertices and `2 n^2` counter-clockwise
/// triangles of equal area. Each grid square is split along its rising
/// diagonal. Returns an empty mesh for `n == 0`.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_square_grid, MeshTopology};
///
/// let grid = unit_square_grid(4);
/// assert_eq!(grid.vertex_count(), 25);
/// assert_eq!(grid.face_count(), 32);
/// ```
#[must_use]
pub fn unit_square_grid(n: u32) -> PlanarMesh {
    if n == 0 {
        return PlanarMesh::new();
    }

    let side = n + 1;
    let step = 1.0 / f64::from(n);
    let mut mesh = PlanarMesh::with_capacity((side * side) as usize, (2 * n * n) as usize);

    for j in 0..side {
        for i in 0..side {
            mesh.vertices
                .push(Point2::new(f64::from(i) * step, f64::from(j) * step));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * side + i;
            let v10 = v00 + 1;
            let v01 = v00 + side;
            let v11 = v01 + 1;
            mesh.faces.push([v00, v10, v11]);
            mesh.faces.push([v00, v11, v01]);
        }
    }

    mesh
}

/// Create a fan triangulation of a regular polygon around its center.
///
/// Vertex 0 is the center; vertices `1..=sides` lie on the circle of the
/// given radius, starting on the positive x axis. Faces are
/// counter-clockwise. Returns an empty mesh for fewer than 3 sides.
///
/// # Example
///
/// ```
/// use mesh_types::{regular_polygon_fan, MeshTopology};
///
/// let hexagon = regular_polygon_fan(6, 1.0);
/// assert_eq!(hexagon.vertex_count(), 7);
/// assert_eq!(hexagon.face_count(), 6);
/// ```
#[must_use]
pub fn regular_polygon_fan(sides: u32, radius: f64) -> PlanarMesh {
    if sides < 3 {
        return PlanarMesh::new();
    }

    let mut mesh = PlanarMesh::with_capacity(sides as usize + 1, sides as usize);
    mesh.vertices.push(Point2::origin());

    let sector = std::f64::consts::TAU / f64::from(sides);
    for k in 0..sides {
        let (sin, cos) = (sector * f64::from(k)).sin_cos();
        mesh.vertices.push(Point2::new(radius * cos, radius * sin));
    }

    for k in 1..=sides {
        let next = k % sides + 1;
        mesh.faces.push([0, k, next]);
    }

    mesh
}
