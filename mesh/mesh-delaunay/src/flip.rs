//! Lawson edge flipping toward the Delaunay condition.

use mesh_types::Point2;

use crate::adjacency::{EdgeAdjacency, normalize_edge};
use crate::predicates::{in_circumcircle, orient2d};

/// Outcome of a flip pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipReport {
    /// Number of edge flips performed.
    pub flips: usize,
    /// The flip budget ran out before every edge was checked.
    pub exhausted: bool,
}

impl FlipReport {
    /// Check if any edge was flipped.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.flips > 0
    }
}

/// Flip interior edges until every one of them is locally Delaunay.
///
/// Edges are processed from a stack seeded with every interior edge; each
/// flip pushes the four edges of the surrounding quadrilateral. An edge is
/// flipped only when the opposite vertex lies strictly inside the
/// circumcircle and the quadrilateral is strictly convex. The new triangles
/// keep the winding of the first face of the pair.
///
/// `faces` and `adjacency` are kept in sync. At most `max_flips` flips are
/// performed.
pub fn flip_until_delaunay(
    vertices: &[Point2<f64>],
    faces: &mut [[u32; 3]],
    adjacency: &mut EdgeAdjacency,
    max_flips: usize,
) -> FlipReport {
    let mut report = FlipReport::default();
    let mut stack = adjacency.interior_edges();
    stack.reverse();

    while let Some((a, b)) = stack.pop() {
        let Some(&[f0, f1]) = adjacency.faces_for_edge(a, b) else {
            continue;
        };
        let (Some(u), Some(v)) = (opposite(faces[f0], a, b), opposite(faces[f1], a, b)) else {
            continue;
        };
        let (Some(pa), Some(pb), Some(pu), Some(pv)) = (
            point(vertices, a),
            point(vertices, b),
            point(vertices, u),
            point(vertices, v),
        ) else {
            continue;
        };

        if !in_circumcircle(pa, pb, pu, pv) || !is_strictly_convex(pa, pb, pu, pv) {
            continue;
        }

        if report.flips >= max_flips {
            report.exhausted = true;
            break;
        }

        let ccw = is_ccw(vertices, faces[f0]);
        let new0 = with_winding(vertices, [u, v, a], ccw);
        let new1 = with_winding(vertices, [v, u, b], ccw);

        let old0 = std::mem::replace(&mut faces[f0], new0);
        let old1 = std::mem::replace(&mut faces[f1], new1);
        adjacency.replace_face(f0, old0, new0);
        adjacency.replace_face(f1, old1, new1);
        report.flips += 1;

        stack.extend([
            normalize_edge(a, u),
            normalize_edge(u, b),
            normalize_edge(b, v),
            normalize_edge(v, a),
        ]);
    }

    report
}

/// The vertex of `face` that is not on edge `(a, b)`.
fn opposite(face: [u32; 3], a: u32, b: u32) -> Option<u32> {
    face.iter().copied().find(|&v| v != a && v != b)
}

fn point(vertices: &[Point2<f64>], index: u32) -> Option<Point2<f64>> {
    vertices.get(index as usize).copied()
}

/// `u` and `v` strictly on opposite sides of `ab`, and `a` and `b` strictly
/// on opposite sides of `uv`.
fn is_strictly_convex(a: Point2<f64>, b: Point2<f64>, u: Point2<f64>, v: Point2<f64>) -> bool {
    orient2d(a, b, u) * orient2d(a, b, v) < 0.0 && orient2d(u, v, a) * orient2d(u, v, b) < 0.0
}

fn is_ccw(vertices: &[Point2<f64>], face: [u32; 3]) -> bool {
    match (
        point(vertices, face[0]),
        point(vertices, face[1]),
        point(vertices, face[2]),
    ) {
        (Some(p0), Some(p1), Some(p2)) => orient2d(p0, p1, p2) > 0.0,
        _ => true,
    }
}

/// Reorder `face` so its winding matches `ccw`.
fn with_winding(vertices: &[Point2<f64>], mut face: [u32; 3], ccw: bool) -> [u32; 3] {
    if is_ccw(vertices, face) != ccw {
        face.swap(1, 2);
    }
    face
}
