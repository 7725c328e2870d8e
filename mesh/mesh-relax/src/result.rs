//! Result types for relaxation runs.

use mesh_types::PlanarMesh;

use crate::stats::QualityStats;

/// Why a relaxation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Every vertex moved less than the tolerance in the last step.
    Converged,
    /// The step limit was reached first.
    MaxStepsReached,
    /// No orientation-preserving step was found; the mesh is the last valid one.
    Stalled,
    /// The cancellation flag was raised.
    Cancelled,
}

impl Termination {
    /// Check if the run met its tolerance.
    #[must_use]
    pub const fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Converged => "converged",
            Self::MaxStepsReached => "max steps reached",
            Self::Stalled => "stalled",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Diagnostics of a relaxation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxSummary {
    /// Name of the scheme that produced the reference points.
    pub method: &'static str,

    /// Number of completed steps.
    pub iterations: u32,

    /// Why the run stopped.
    pub termination: Termination,

    /// Step halvings accumulated over all steps.
    pub total_halvings: u64,

    /// Edge flips performed, including the initial Delaunay pass.
    pub flips_performed: usize,

    /// Largest squared vertex displacement of the last completed step.
    pub max_displacement_sq: f64,

    /// Energy before the first step.
    pub initial_energy: f64,

    /// Energy after the last step.
    pub final_energy: f64,

    /// Cell quality before the first step.
    pub initial_quality: QualityStats,

    /// Cell quality after the last step.
    pub final_quality: QualityStats,
}

impl RelaxSummary {
    /// Check if the run met its tolerance.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.termination.is_converged()
    }

    /// Change of the worst cell quality (positive = better).
    #[must_use]
    pub fn min_quality_improvement(&self) -> f64 {
        self.final_quality.min_quality - self.initial_quality.min_quality
    }

    /// Relative energy decrease (positive = lower energy).
    #[must_use]
    pub fn energy_reduction(&self) -> f64 {
        if self.initial_energy.abs() > 0.0 {
            (self.initial_energy - self.final_energy) / self.initial_energy.abs()
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for RelaxSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} after {} steps, min quality {:.4} → {:.4}, energy {:.5e} → {:.5e}, {} flips",
            self.method,
            self.termination,
            self.iterations,
            self.initial_quality.min_quality,
            self.final_quality.min_quality,
            self.initial_energy,
            self.final_energy,
            self.flips_performed
        )
    }
}

/// Relaxed mesh together with its run diagnostics.
#[derive(Debug, Clone)]
pub struct RelaxOutput {
    /// Final coordinates and connectivity.
    pub mesh: PlanarMesh,

    /// Run diagnostics.
    pub summary: RelaxSummary,
}

impl std::fmt::Display for RelaxOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} vertices, {} faces)",
            self.summary,
            self.mesh.vertices.len(),
            self.mesh.faces.len()
        )
    }
}
