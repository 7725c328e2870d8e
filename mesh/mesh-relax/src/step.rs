//! Orientation-safe line search between old and candidate coordinates.

use mesh_types::{Orientation, Point2};

use crate::engine::MeshEngine;
use crate::error::RelaxResult;

/// Result of one step attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The trial at `alpha = 2^-halvings` kept every cell's orientation and
    /// is now applied to the engine.
    Accepted {
        /// Accepted step fraction.
        alpha: f64,
        /// Number of times the step was halved.
        halvings: u32,
    },
    /// No admissible step was found; the engine holds the original coordinates.
    Stalled {
        /// Number of times the step was halved.
        halvings: u32,
    },
}

impl StepOutcome {
    /// Halvings spent on this step.
    #[must_use]
    pub const fn halvings(&self) -> u32 {
        match *self {
            Self::Accepted { halvings, .. } | Self::Stalled { halvings } => halvings,
        }
    }

    /// Check if the step was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Move the engine from `original` toward `candidate` without flipping any cell.
///
/// The engine must hold `original` on entry. Trials use
/// `alpha = 1, 1/2, 1/4, ...` up to `2^-max_halvings`; boundary vertices keep
/// their original coordinates bit for bit. A trial is accepted when every
/// cell's orientation (positive, zero or negative) matches the original.
/// A trial that rounds back to `original` while `candidate` differs counts
/// as a stall, not as an accepted step.
///
/// # Errors
///
/// Returns an error if the engine rejects a coordinate update.
pub fn step_toward<E: MeshEngine + ?Sized>(
    engine: &mut E,
    original: &[Point2<f64>],
    candidate: &[Point2<f64>],
    max_halvings: u32,
) -> RelaxResult<StepOutcome> {
    let original_orientation = orientations(&engine.cell_areas(true));
    let boundary = engine.is_boundary_vertex().to_vec();
    let is_boundary = |i: usize| boundary.get(i).copied().unwrap_or(false);
    let wants_motion = original
        .iter()
        .zip(candidate)
        .enumerate()
        .any(|(i, (old, new))| !is_boundary(i) && old != new);
    let mut trial = original.to_vec();

    let mut alpha = 1.0_f64;
    let mut halvings = 0;
    loop {
        let pairs = original.iter().zip(candidate);
        for (i, (slot, (old, new))) in trial.iter_mut().zip(pairs).enumerate() {
            *slot = if is_boundary(i) {
                *old
            } else {
                Point2::from(old.coords * (1.0 - alpha) + new.coords * alpha)
            };
        }

        // alpha is below the coordinate resolution
        if wants_motion && trial.as_slice() == original {
            break;
        }

        engine.update_coordinates(&trial)?;
        if orientations(&engine.cell_areas(true)) == original_orientation {
            return Ok(StepOutcome::Accepted { alpha, halvings });
        }
        if halvings == max_halvings {
            break;
        }
        alpha *= 0.5;
        halvings += 1;
    }

    engine.update_coordinates(original)?;
    Ok(StepOutcome::Stalled { halvings })
}

fn orientations(signed_areas: &[f64]) -> Vec<Orientation> {
    signed_areas
        .iter()
        .map(|&area| Orientation::of_signed_area(area))
        .collect()
}
