//! Relaxation loop scenarios against the real engine and a recording mock.
//!
//! Run with: cargo test -p mesh-relax --test controller

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use approx::assert_relative_eq;
use mesh_delaunay::DelaunayMesh;
use mesh_relax::{
    CentroidalPatch, MeshEngine, OptimalDelaunay, ReferencePoints, RelaxError, RelaxMethod,
    RelaxParams, RelaxResult, Termination, WeightingPolicy, cpt, odt, relax, relax_with_engine,
};
use mesh_types::{PlanarMesh, Point2, Triangle2, regular_polygon_fan, unit_square_grid};

// =============================================================================
// Mock engine
// =============================================================================

/// Fixed-topology engine that counts calls into the maintenance hooks.
struct CountingEngine {
    vertices: Vec<Point2<f64>>,
    cells: Vec<[u32; 3]>,
    boundary: Vec<bool>,
    restore_calls: usize,
    mark_calls: usize,
    updates: usize,
}

impl CountingEngine {
    fn hexagon(center: Point2<f64>) -> Self {
        let mut mesh = regular_polygon_fan(6, 1.0);
        mesh.vertices[0] = center;
        let mut boundary = vec![true; mesh.vertices.len()];
        boundary[0] = false;
        Self {
            vertices: mesh.vertices,
            cells: mesh.faces,
            boundary,
            restore_calls: 0,
            mark_calls: 0,
            updates: 0,
        }
    }

    /// Unit square fanned around an interior vertex just above the bottom edge.
    fn near_degenerate_square() -> Self {
        Self::square_fan(0.0, Point2::new(0.5, 0.05))
    }

    /// Unit square with bottom edge at `base`, fanned around `interior`.
    fn square_fan(base: f64, interior: Point2<f64>) -> Self {
        Self {
            vertices: vec![
                Point2::new(0.0, base),
                Point2::new(1.0, base),
                Point2::new(1.0, base + 1.0),
                Point2::new(0.0, base + 1.0),
                interior,
            ],
            cells: vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
            boundary: vec![true, true, true, true, false],
            restore_calls: 0,
            mark_calls: 0,
            updates: 0,
        }
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle2> + '_ {
        self.cells.iter().map(move |&[a, b, c]| {
            let p = |i: u32| self.vertices[i as usize];
            Triangle2::new(p(a), p(b), p(c))
        })
    }
}

impl MeshEngine for CountingEngine {
    fn coordinates(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    fn cells(&self) -> &[[u32; 3]] {
        &self.cells
    }

    fn circumcenters(&self) -> Vec<Point2<f64>> {
        self.triangles()
            .map(|t| t.circumcenter().unwrap_or_else(|| t.centroid()))
            .collect()
    }

    fn centroids(&self) -> Vec<Point2<f64>> {
        self.triangles().map(|t| t.centroid()).collect()
    }

    fn boundary_cell_ids(&self) -> Vec<usize> {
        (0..self.cells.len()).collect()
    }

    fn cell_areas(&self, signed: bool) -> Vec<f64> {
        self.triangles()
            .map(|t| if signed { t.signed_area() } else { t.area() })
            .collect()
    }

    fn is_boundary_vertex(&self) -> &[bool] {
        &self.boundary
    }

    fn update_coordinates(&mut self, coordinates: &[Point2<f64>]) -> RelaxResult<()> {
        self.vertices.copy_from_slice(coordinates);
        self.updates += 1;
        Ok(())
    }

    fn restore_delaunay(&mut self) -> usize {
        self.restore_calls += 1;
        0
    }

    fn mark_boundary(&mut self) {
        self.mark_calls += 1;
    }
}

/// Pulls every vertex toward one fixed point.
struct FixedTarget(Point2<f64>);

impl ReferencePoints for FixedTarget {
    fn reference_points(&self, engine: &dyn MeshEngine) -> Vec<Point2<f64>> {
        vec![self.0; engine.cells().len()]
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn quiet(tolerance: f64, max_steps: u32) -> RelaxParams {
    RelaxParams::with_limits(tolerance, max_steps).with_verbosity(0)
}

fn perturbed_hexagon() -> PlanarMesh {
    let mut hex = regular_polygon_fan(6, 1.0);
    hex.vertices[0] = Point2::new(0.1, 0.05);
    hex
}

// =============================================================================
// Mock engine scenarios
// =============================================================================

#[test]
fn restore_runs_once_before_and_once_per_step() {
    let mut engine = CountingEngine::hexagon(Point2::new(0.1, 0.05));
    let summary =
        relax_with_engine(&mut engine, &CentroidalPatch, &quiet(1e-8, 3), None).unwrap();

    assert_eq!(summary.termination, Termination::MaxStepsReached);
    assert_eq!(summary.iterations, 3);
    assert_eq!(engine.restore_calls, 4);
    assert_eq!(engine.mark_calls, 1);
    // One accepted trial per step
    assert_eq!(engine.updates, 3);
}

#[test]
fn mock_cpt_contracts_toward_center() {
    let mut engine = CountingEngine::hexagon(Point2::new(0.9, 0.0));
    relax_with_engine(&mut engine, &CentroidalPatch, &quiet(1e-12, 1), None).unwrap();

    // The centroid average of a regular fan is one third of the center offset
    assert_relative_eq!(engine.vertices[0].x, 0.3, epsilon = 1e-12);
    assert_relative_eq!(engine.vertices[0].y, 0.0, epsilon = 1e-12);
}

#[test]
fn odt_on_all_boundary_cells_matches_cpt() {
    let mut a = CountingEngine::hexagon(Point2::new(0.2, -0.1));
    let mut b = CountingEngine::hexagon(Point2::new(0.2, -0.1));
    relax_with_engine(&mut a, &OptimalDelaunay, &quiet(1e-12, 4), None).unwrap();
    relax_with_engine(&mut b, &CentroidalPatch, &quiet(1e-12, 4), None).unwrap();
    assert_eq!(a.vertices, b.vertices);
}

#[test]
fn unsafe_target_is_approached_by_halving() {
    let mut engine = CountingEngine::near_degenerate_square();
    let target = FixedTarget(Point2::new(0.5, -0.5));
    let summary = relax_with_engine(&mut engine, &target, &quiet(1e-12, 1), None).unwrap();

    assert_eq!(summary.method, "fixed");
    assert_eq!(summary.termination, Termination::MaxStepsReached);
    assert_eq!(summary.total_halvings, 4);
    assert_relative_eq!(engine.vertices[4].y, 0.015_625, epsilon = 1e-12);
    assert!(engine.cell_areas(true).iter().all(|&a| a > 0.0));
}

#[test]
fn stalls_without_halvings() {
    let mut engine = CountingEngine::near_degenerate_square();
    let target = FixedTarget(Point2::new(0.5, -0.5));
    let params = quiet(1e-12, 10).with_max_halvings(0);
    let summary = relax_with_engine(&mut engine, &target, &params, None).unwrap();

    assert_eq!(summary.termination, Termination::Stalled);
    assert_eq!(summary.iterations, 0);
    assert_eq!(engine.vertices[4], Point2::new(0.5, 0.05));
    // Only the initial restore ran
    assert_eq!(engine.restore_calls, 1);
}

#[test]
fn step_below_coordinate_resolution_stalls() {
    // Interior vertex one ulp above the bottom edge, far from the origin
    let base = 1.0e6_f64;
    let just_above = f64::from_bits(base.to_bits() + 1);
    let mut engine = CountingEngine::square_fan(base, Point2::new(0.5, just_above));
    let target = FixedTarget(Point2::new(0.5, base - 0.5));

    let summary = relax_with_engine(&mut engine, &target, &quiet(1e-12, 10), None).unwrap();

    assert_eq!(summary.termination, Termination::Stalled);
    assert_eq!(summary.iterations, 0);
    assert!(summary.total_halvings < 52);
    assert_eq!(engine.vertices[4], Point2::new(0.5, just_above));
    assert!(engine.cell_areas(true).iter().all(|&a| a > 0.0));
}

#[test]
fn cancelled_before_first_step() {
    let flag = Arc::new(AtomicBool::new(true));
    let params = quiet(1e-12, 10).with_cancel_flag(Arc::clone(&flag));
    let mut engine = CountingEngine::hexagon(Point2::new(0.4, 0.0));

    let summary = relax_with_engine(&mut engine, &CentroidalPatch, &params, None).unwrap();
    assert_eq!(summary.termination, Termination::Cancelled);
    assert_eq!(summary.iterations, 0);
    assert_eq!(engine.vertices[0], Point2::new(0.4, 0.0));
}

#[test]
fn cancelled_from_snapshot_hook() {
    let flag = Arc::new(AtomicBool::new(false));
    let params = quiet(1e-12, 50).with_cancel_flag(Arc::clone(&flag));
    let mut engine = CountingEngine::hexagon(Point2::new(0.4, 0.0));

    let mut hook = |step: u32, _: &PlanarMesh| -> RelaxResult<()> {
        if step == 2 {
            flag.store(true, Ordering::Relaxed);
        }
        Ok(())
    };
    let summary =
        relax_with_engine(&mut engine, &CentroidalPatch, &params, Some(&mut hook)).unwrap();

    assert_eq!(summary.termination, Termination::Cancelled);
    assert_eq!(summary.iterations, 2);
}

#[test]
fn hook_failure_aborts_run() {
    let mut engine = CountingEngine::hexagon(Point2::new(0.4, 0.0));
    let mut hook = |step: u32, _: &PlanarMesh| -> RelaxResult<()> {
        if step == 1 {
            Err(RelaxError::Snapshot(mesh_io::IoError::invalid_content("disk full")))
        } else {
            Ok(())
        }
    };

    let result =
        relax_with_engine(&mut engine, &CentroidalPatch, &quiet(1e-12, 5), Some(&mut hook));
    assert!(matches!(result, Err(RelaxError::Snapshot(_))));
}

#[test]
fn isolated_vertex_rejected_up_front() {
    let mut engine = CountingEngine::hexagon(Point2::origin());
    engine.vertices.push(Point2::new(3.0, 3.0));
    engine.boundary.push(false);

    let result = relax_with_engine(&mut engine, &CentroidalPatch, &quiet(1e-12, 5), None);
    assert!(matches!(result, Err(RelaxError::IsolatedVertex(7))));
    assert_eq!(engine.restore_calls, 0);
}

// =============================================================================
// Real engine scenarios
// =============================================================================

#[test]
fn centered_hexagon_is_a_fixed_point() {
    let hex = regular_polygon_fan(6, 1.0);
    let output = relax(&hex, RelaxMethod::CentroidalPatch, &quiet(1e-12, 10)).unwrap();

    assert!(output.summary.converged());
    assert_eq!(output.summary.iterations, 1);
    assert_relative_eq!(output.mesh.vertices[0].x, 0.0, epsilon = 1e-15);
    assert_relative_eq!(output.mesh.vertices[0].y, 0.0, epsilon = 1e-15);
    assert_eq!(output.mesh.faces, hex.faces);
}

#[test]
fn perturbed_vertex_displacement_strictly_decreases() {
    let hex = perturbed_hexagon();
    let mut engine = DelaunayMesh::new(hex).unwrap();
    let params = quiet(1e-8, 50).with_weighting(WeightingPolicy::Uniform);

    let mut centers = Vec::new();
    let mut hook = |_: u32, mesh: &PlanarMesh| -> RelaxResult<()> {
        centers.push(mesh.vertices[0]);
        Ok(())
    };
    let summary =
        relax_with_engine(&mut engine, &CentroidalPatch, &params, Some(&mut hook)).unwrap();

    assert_eq!(summary.termination, Termination::Converged);
    assert!(summary.iterations <= 20, "took {} steps", summary.iterations);
    assert_eq!(centers.len(), summary.iterations as usize + 1);

    let displacements: Vec<f64> = centers.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
    for pair in displacements.windows(2) {
        assert!(pair[1] < pair[0], "{} !< {}", pair[1], pair[0]);
    }
    assert!(engine.vertices()[0].coords.norm() < 1e-8);
}

#[test]
fn rerun_after_convergence_converges_in_one_step() {
    let params = quiet(1e-9, 100);
    let first = cpt(&perturbed_hexagon(), &params).unwrap();
    assert!(first.summary.converged());

    let second = cpt(&first.mesh, &params).unwrap();
    assert!(second.summary.converged());
    assert_eq!(second.summary.iterations, 1);
}

#[test]
fn odt_lowers_energy_and_raises_quality() {
    let mut grid = unit_square_grid(4);
    grid.vertices[6] = Point2::new(0.3, 0.2);
    grid.vertices[12] = Point2::new(0.46, 0.55);

    let params = quiet(1e-10, 200).with_weighting(WeightingPolicy::AreaWeighted);
    let output = odt(&grid, &params).unwrap();
    let summary = &output.summary;

    assert!(summary.final_energy < summary.initial_energy, "{summary}");
    assert!(summary.energy_reduction() > 0.0);
    assert!(summary.min_quality_improvement() > 0.0, "{summary}");
}

#[test]
fn odt_keeps_boundary_and_orientation() {
    let mut grid = unit_square_grid(5);
    grid.vertices[14] = Point2::new(0.45, 0.41);
    grid.vertices[21] = Point2::new(0.62, 0.55);

    let output = odt(&grid, &quiet(1e-10, 100)).unwrap();
    let mut engine = DelaunayMesh::new(grid.clone()).unwrap();
    engine.mark_boundary();
    for (i, &on_boundary) in engine.boundary_vertices().iter().enumerate() {
        if on_boundary {
            assert_eq!(output.mesh.vertices[i], grid.vertices[i]);
        }
    }
    assert!(output.mesh.signed_areas().iter().all(|&a| a > 0.0));
    assert_relative_eq!(output.mesh.total_area(), 1.0, epsilon = 1e-12);
}

#[test]
fn snapshot_files_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("step_{}.obj");
    let params = quiet(1e-8, 3).with_step_files(template.to_str().unwrap());

    let output = cpt(&perturbed_hexagon(), &params).unwrap();
    assert_eq!(output.summary.iterations, 3);

    for step in 0..=3 {
        let path = dir.path().join(format!("step_{step}.obj"));
        let mesh = mesh_io::load_mesh(&path).unwrap();
        assert_eq!(mesh.faces.len(), 6);
    }
    let last = mesh_io::load_mesh(dir.path().join("step_3.obj")).unwrap();
    assert_eq!(last, output.mesh);
}
