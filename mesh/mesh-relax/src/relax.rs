//! The relaxation loop.

use mesh_delaunay::DelaunayMesh;
use mesh_types::{FLATNESS_TOLERANCE, Orientation, PlanarMesh, Point2};
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, find_isolated_vertex};
use crate::engine::MeshEngine;
use crate::error::{RelaxError, RelaxResult};
use crate::params::RelaxParams;
use crate::reference::{ReferencePoints, RelaxMethod};
use crate::result::{RelaxOutput, RelaxSummary, Termination};
use crate::snapshot::{FileSnapshots, SnapshotHook};
use crate::stats::{QualityStats, energy};
use crate::step::{StepOutcome, step_toward};

/// Relax a planar mesh with the given scheme.
///
/// Interior vertices move toward the weighted average of their cells'
/// reference points; boundary vertices never move. Every step keeps every
/// cell's orientation and is followed by Delaunay edge flips.
///
/// Snapshots are written when `params.step_filename_format` is set.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty, has no faces, or has invalid connectivity
/// - The tolerance or step limit is invalid
/// - A vertex belongs to no face or a face has zero area
/// - A snapshot cannot be written
///
/// # Examples
///
/// ```
/// use mesh_relax::{relax, RelaxMethod, RelaxParams, Termination};
/// use mesh_types::regular_polygon_fan;
///
/// let mut mesh = regular_polygon_fan(6, 1.0);
/// mesh.vertices[0].x = 0.2;
///
/// let params = RelaxParams::with_limits(1e-10, 100).with_verbosity(0);
/// let output = relax(&mesh, RelaxMethod::CentroidalPatch, &params)?;
///
/// assert_eq!(output.summary.termination, Termination::Converged);
/// assert!(output.mesh.vertices[0].x.abs() < 1e-9);
/// # Ok::<(), mesh_relax::RelaxError>(())
/// ```
pub fn relax(
    mesh: &PlanarMesh,
    method: RelaxMethod,
    params: &RelaxParams,
) -> RelaxResult<RelaxOutput> {
    if mesh.vertices.is_empty() {
        return Err(RelaxError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(RelaxError::NoFaces);
    }
    params.validate()?;

    debug!(
        "Relaxing mesh ({}): {} vertices, {} faces, tolerance {:e}, {} max steps",
        method,
        mesh.vertices.len(),
        mesh.faces.len(),
        params.tolerance,
        params.max_steps
    );

    let mut engine = DelaunayMesh::new(mesh.clone())?;
    let mut files = params
        .step_filename_format
        .as_deref()
        .map(FileSnapshots::new);

    let summary = relax_with_engine(
        &mut engine,
        &method,
        params,
        files.as_mut().map(|f| f as &mut dyn SnapshotHook),
    )?;

    Ok(RelaxOutput {
        mesh: engine.into_mesh(),
        summary,
    })
}

/// Optimal Delaunay Triangulation relaxation; see [`relax`].
///
/// # Errors
///
/// See [`relax`].
pub fn odt(mesh: &PlanarMesh, params: &RelaxParams) -> RelaxResult<RelaxOutput> {
    relax(mesh, RelaxMethod::OptimalDelaunay, params)
}

/// Centroidal Patch Triangulation relaxation; see [`relax`].
///
/// # Errors
///
/// See [`relax`].
pub fn cpt(mesh: &PlanarMesh, params: &RelaxParams) -> RelaxResult<RelaxOutput> {
    relax(mesh, RelaxMethod::CentroidalPatch, params)
}

/// Relax a mesh given by 3-D points that all lie in the `z = 0` plane.
///
/// The z coordinate is dropped; the output mesh is planar.
///
/// # Errors
///
/// Returns [`RelaxError::NonPlanar`] for the first point with
/// `|z| >= FLATNESS_TOLERANCE`, before anything else is checked. Otherwise
/// see [`relax`].
pub fn relax_xyz(
    points: &[[f64; 3]],
    cells: &[[u32; 3]],
    method: RelaxMethod,
    params: &RelaxParams,
) -> RelaxResult<RelaxOutput> {
    if let Some((vertex, point)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !(p[2].abs() < FLATNESS_TOLERANCE))
    {
        return Err(RelaxError::NonPlanar {
            vertex,
            z: point[2],
        });
    }

    let mesh = PlanarMesh::from_parts(
        points.iter().map(|p| Point2::new(p[0], p[1])).collect(),
        cells.to_vec(),
    );
    relax(&mesh, method, params)
}

/// Run the relaxation loop on any engine with any reference-point strategy.
///
/// The engine is first flipped to Delaunay, recorded as snapshot 0 and has
/// its boundary marked. Each step then computes reference points, averages
/// them per vertex, takes an orientation-safe step, restores the Delaunay
/// property and records a snapshot. The loop ends when every vertex moved
/// less than `params.tolerance`, after `params.max_steps` steps, when a step
/// stalls, or when cancellation is requested.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the engine holds an
/// isolated vertex or a zero-area cell, the engine rejects an update, or a
/// snapshot hook fails.
pub fn relax_with_engine<E, R>(
    engine: &mut E,
    strategy: &R,
    params: &RelaxParams,
    mut snapshots: Option<&mut dyn SnapshotHook>,
) -> RelaxResult<RelaxSummary>
where
    E: MeshEngine,
    R: ReferencePoints + ?Sized,
{
    params.validate()?;
    check_engine(engine)?;

    let mut flips_performed = engine.restore_delaunay();
    if let Some(hook) = snapshots.as_deref_mut() {
        hook.record(0, &engine.to_mesh())?;
    }

    let initial_quality = QualityStats::compute(engine.coordinates(), engine.cells());
    let initial_energy = energy(engine.coordinates(), engine.cells(), params.weighting);
    if params.verbosity > 0 {
        info!(
            method = strategy.name(),
            energy = initial_energy,
            "Before relaxation: {initial_quality}"
        );
    }

    engine.mark_boundary();

    let tolerance_sq = params.tolerance * params.tolerance;
    let mut iterations = 0_u32;
    let mut total_halvings = 0_u64;
    let mut max_displacement_sq = 0.0;

    let termination = loop {
        if params.is_cancelled() {
            info!(iterations, "Relaxation cancelled");
            break Termination::Cancelled;
        }
        let step = iterations + 1;

        let reference = strategy.reference_points(&*engine);
        let areas = engine.cell_areas(false);
        let candidate = aggregate(
            engine.cells(),
            &reference,
            &areas,
            engine.coordinates().len(),
            params.weighting,
        )?;
        let original = engine.coordinates().to_vec();

        let outcome = step_toward(engine, &original, &candidate, params.max_halvings)?;
        total_halvings += u64::from(outcome.halvings());
        let StepOutcome::Accepted { alpha, halvings } = outcome else {
            warn!(
                step,
                max_halvings = params.max_halvings,
                "No orientation-preserving step found, keeping the last valid mesh"
            );
            break Termination::Stalled;
        };

        let step_flips = engine.restore_delaunay();
        flips_performed += step_flips;
        iterations = step;

        if let Some(hook) = snapshots.as_deref_mut() {
            hook.record(step, &engine.to_mesh())?;
        }

        max_displacement_sq = max_squared_displacement(&original, engine.coordinates());
        debug!(
            "Step {}: alpha {}, {} halvings, {} flips, max displacement² {:e}",
            step, alpha, halvings, step_flips, max_displacement_sq
        );

        if max_displacement_sq < tolerance_sq {
            break Termination::Converged;
        }
        if step >= params.max_steps {
            break Termination::MaxStepsReached;
        }

        if params.verbosity > 1 {
            let quality = QualityStats::compute(engine.coordinates(), engine.cells());
            info!(step, "{quality}");
        }
    };

    let final_quality = QualityStats::compute(engine.coordinates(), engine.cells());
    let final_energy = energy(engine.coordinates(), engine.cells(), params.weighting);
    if params.verbosity > 0 {
        info!(
            method = strategy.name(),
            energy = final_energy,
            "Final ({iterations} steps, {termination}): {final_quality}"
        );
    }

    Ok(RelaxSummary {
        method: strategy.name(),
        iterations,
        termination,
        total_halvings,
        flips_performed,
        max_displacement_sq,
        initial_energy,
        final_energy,
        initial_quality,
        final_quality,
    })
}

/// Reject engines the loop cannot relax.
fn check_engine<E: MeshEngine + ?Sized>(engine: &E) -> RelaxResult<()> {
    if engine.coordinates().is_empty() {
        return Err(RelaxError::EmptyMesh);
    }
    if engine.cells().is_empty() {
        return Err(RelaxError::NoFaces);
    }
    if let Some(vertex) = find_isolated_vertex(engine.cells(), engine.coordinates().len()) {
        return Err(RelaxError::IsolatedVertex(vertex));
    }
    if let Some(cell) = engine
        .cell_areas(true)
        .iter()
        .position(|&area| Orientation::of_signed_area(area) == Orientation::Degenerate)
    {
        return Err(RelaxError::DegenerateCell(cell));
    }
    Ok(())
}

fn max_squared_displacement(before: &[Point2<f64>], after: &[Point2<f64>]) -> f64 {
    before
        .iter()
        .zip(after)
        .map(|(a, b)| (b - a).norm_squared())
        .fold(0.0, f64::max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{regular_polygon_fan, unit_square_grid};

    fn quiet() -> RelaxParams {
        RelaxParams::with_limits(1e-12, 10).with_verbosity(0)
    }

    #[test]
    fn test_relax_empty_mesh() {
        let result = relax(&PlanarMesh::new(), RelaxMethod::OptimalDelaunay, &quiet());
        assert!(matches!(result, Err(RelaxError::EmptyMesh)));
    }

    #[test]
    fn test_relax_no_faces() {
        let mesh = PlanarMesh::from_parts(vec![Point2::origin()], Vec::new());
        let result = relax(&mesh, RelaxMethod::OptimalDelaunay, &quiet());
        assert!(matches!(result, Err(RelaxError::NoFaces)));
    }

    #[test]
    fn test_relax_invalid_params() {
        let grid = unit_square_grid(2);
        let result = cpt(&grid, &quiet().with_tolerance(0.0));
        assert!(matches!(result, Err(RelaxError::InvalidTolerance(_))));

        let result = cpt(&grid, &quiet().with_max_steps(0));
        assert!(matches!(result, Err(RelaxError::InvalidMaxSteps)));
    }

    #[test]
    fn test_relax_isolated_vertex() {
        let mut grid = unit_square_grid(1);
        grid.vertices.push(Point2::new(5.0, 5.0));
        let result = odt(&grid, &quiet());
        assert!(matches!(result, Err(RelaxError::IsolatedVertex(4))));
    }

    #[test]
    fn test_relax_degenerate_cell() {
        let mesh = PlanarMesh::from_parts(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            vec![[0, 1, 3], [1, 2, 3], [0, 2, 1]],
        );
        let result = odt(&mesh, &quiet());
        assert!(matches!(result, Err(RelaxError::DegenerateCell(2))));
    }

    #[test]
    fn test_relax_bad_connectivity() {
        let mut grid = unit_square_grid(1);
        grid.faces.push([0, 1, 9]);
        let result = odt(&grid, &quiet());
        assert!(matches!(result, Err(RelaxError::Topology(_))));
    }

    #[test]
    fn test_relax_xyz_rejects_lifted_points() {
        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 1e-9], [0.0, 1.0, 0.0]];
        let result = relax_xyz(&points, &[[0, 1, 2]], RelaxMethod::CentroidalPatch, &quiet());
        assert!(matches!(result, Err(RelaxError::NonPlanar { vertex: 1, .. })));
    }

    #[test]
    fn test_relax_xyz_drops_z() {
        let hex = regular_polygon_fan(6, 1.0);
        let points: Vec<[f64; 3]> = hex.vertices.iter().map(|p| [p.x, p.y, 0.0]).collect();
        let output =
            relax_xyz(&points, &hex.faces, RelaxMethod::CentroidalPatch, &quiet()).unwrap();
        assert_eq!(output.mesh.faces, hex.faces);
        assert_eq!(output.summary.iterations, 1);
    }

    #[test]
    fn test_centered_hexagon_converges_immediately() {
        let hex = regular_polygon_fan(6, 1.0);
        let output = cpt(&hex, &quiet()).unwrap();

        assert_eq!(output.summary.termination, Termination::Converged);
        assert_eq!(output.summary.iterations, 1);
        assert_eq!(output.summary.total_halvings, 0);
        assert!(output.mesh.vertices[0].coords.norm() < 1e-15);
        assert_eq!(&output.mesh.vertices[1..], &hex.vertices[1..]);
    }

    #[test]
    fn test_max_steps_reached() {
        let mut hex = regular_polygon_fan(6, 1.0);
        hex.vertices[0] = Point2::new(0.3, 0.1);
        let output = cpt(&hex, &quiet().with_max_steps(2)).unwrap();

        assert_eq!(output.summary.termination, Termination::MaxStepsReached);
        assert_eq!(output.summary.iterations, 2);
        assert!(output.summary.max_displacement_sq > 1e-24);
    }

    #[test]
    fn test_max_squared_displacement() {
        let before = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let after = [Point2::new(0.0, 0.5), Point2::new(1.0, 1.0)];
        assert_eq!(max_squared_displacement(&before, &after), 0.25);
    }
}
