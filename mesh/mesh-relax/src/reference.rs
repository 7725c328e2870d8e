//! Per-cell reference points that vertices are pulled toward.

use mesh_types::Point2;

use crate::engine::MeshEngine;

/// Strategy producing one reference point per cell.
pub trait ReferencePoints {
    /// One point per cell of `engine`, in cell order.
    fn reference_points(&self, engine: &dyn MeshEngine) -> Vec<Point2<f64>>;

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Optimal Delaunay Triangulation: cell circumcenters.
///
/// Cells owning a boundary edge use their barycenter instead, since their
/// circumcenter may lie outside the domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalDelaunay;

impl ReferencePoints for OptimalDelaunay {
    fn reference_points(&self, engine: &dyn MeshEngine) -> Vec<Point2<f64>> {
        let mut points = engine.circumcenters();
        let barycenters = engine.centroids();
        for cell in engine.boundary_cell_ids() {
            if let (Some(point), Some(&barycenter)) = (points.get_mut(cell), barycenters.get(cell)) {
                *point = barycenter;
            }
        }
        points
    }

    fn name(&self) -> &'static str {
        "ODT"
    }
}

/// Centroidal Patch Triangulation: cell centroids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CentroidalPatch;

impl ReferencePoints for CentroidalPatch {
    fn reference_points(&self, engine: &dyn MeshEngine) -> Vec<Point2<f64>> {
        engine.centroids()
    }

    fn name(&self) -> &'static str {
        "CPT"
    }
}

/// The built-in relaxation schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RelaxMethod {
    /// Pull vertices toward circumcenters ([`OptimalDelaunay`]).
    #[default]
    OptimalDelaunay,
    /// Pull vertices toward centroids ([`CentroidalPatch`]).
    CentroidalPatch,
}

impl ReferencePoints for RelaxMethod {
    fn reference_points(&self, engine: &dyn MeshEngine) -> Vec<Point2<f64>> {
        match self {
            Self::OptimalDelaunay => OptimalDelaunay.reference_points(engine),
            Self::CentroidalPatch => CentroidalPatch.reference_points(engine),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::OptimalDelaunay => OptimalDelaunay.name(),
            Self::CentroidalPatch => CentroidalPatch.name(),
        }
    }
}

impl std::fmt::Display for RelaxMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
