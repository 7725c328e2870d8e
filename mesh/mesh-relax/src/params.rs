//! Relaxation parameters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{RelaxError, RelaxResult};

/// How reference points of incident cells are averaged into a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeightingPolicy {
    /// Every incident cell counts once.
    #[default]
    Uniform,
    /// Incident cells are weighted by their area.
    AreaWeighted,
}

/// Parameters for ODT / CPT relaxation.
#[derive(Debug, Clone)]
pub struct RelaxParams {
    /// Stop once every vertex moved less than this distance in one step.
    pub tolerance: f64,

    /// Maximum number of relaxation steps.
    pub max_steps: u32,

    /// Averaging policy for reference points.
    pub weighting: WeightingPolicy,

    /// 0 is silent, 1 logs statistics before and after the run, 2 also logs
    /// them after every step.
    pub verbosity: u8,

    /// Snapshot path template; `{}` is replaced by the step index and the
    /// extension selects the file format.
    pub step_filename_format: Option<String>,

    /// Maximum number of step halvings before a step is declared stalled.
    pub max_halvings: u32,

    /// Cooperative cancellation flag, checked before every step.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for RelaxParams {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-6,
            max_steps: 100,
            weighting: WeightingPolicy::Uniform,
            verbosity: 1,
            step_filename_format: None,
            max_halvings: 52, // smallest alpha is 2^-52 = f64::EPSILON
            cancel: None,
        }
    }
}

impl RelaxParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters with a specific tolerance and step limit.
    #[must_use]
    pub fn with_limits(tolerance: f64, max_steps: u32) -> Self {
        Self {
            tolerance,
            max_steps,
            ..Self::default()
        }
    }

    /// Create parameters for a few coarse smoothing steps.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            tolerance: 1.0e-3,
            max_steps: 10,
            ..Self::default()
        }
    }

    /// Create parameters for a run to tight convergence.
    #[must_use]
    pub fn high_quality() -> Self {
        Self {
            tolerance: 1.0e-10,
            max_steps: 1000,
            ..Self::default()
        }
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of steps.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the weighting policy.
    #[must_use]
    pub const fn with_weighting(mut self, weighting: WeightingPolicy) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the verbosity level.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the maximum number of step halvings.
    #[must_use]
    pub const fn with_max_halvings(mut self, max_halvings: u32) -> Self {
        self.max_halvings = max_halvings;
        self
    }

    /// Write a snapshot before the first step and after every step.
    #[must_use]
    pub fn with_step_files(mut self, template: impl Into<String>) -> Self {
        self.step_filename_format = Some(template.into());
        self
    }

    /// Attach a cancellation flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Check tolerance and step limit.
    ///
    /// # Errors
    ///
    /// Returns [`RelaxError::InvalidTolerance`] for a tolerance that is not
    /// positive and finite, and [`RelaxError::InvalidMaxSteps`] for a zero
    /// step limit.
    pub fn validate(&self) -> RelaxResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RelaxError::InvalidTolerance(self.tolerance));
        }
        if self.max_steps == 0 {
            return Err(RelaxError::InvalidMaxSteps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = RelaxParams::default();
        assert!((params.tolerance - 1.0e-6).abs() < 1e-18);
        assert_eq!(params.max_steps, 100);
        assert_eq!(params.weighting, WeightingPolicy::Uniform);
        assert_eq!(params.max_halvings, 52);
        assert!(params.step_filename_format.is_none());
        assert!(!params.is_cancelled());
    }

    #[test]
    fn test_builder() {
        let params = RelaxParams::new()
            .with_tolerance(1e-9)
            .with_max_steps(5)
            .with_weighting(WeightingPolicy::AreaWeighted)
            .with_verbosity(0)
            .with_step_files("out/step_{}.obj");

        assert!((params.tolerance - 1e-9).abs() < 1e-20);
        assert_eq!(params.max_steps, 5);
        assert_eq!(params.weighting, WeightingPolicy::AreaWeighted);
        assert_eq!(params.verbosity, 0);
        assert_eq!(params.step_filename_format.as_deref(), Some("out/step_{}.obj"));
    }

    #[test]
    fn test_presets() {
        assert_eq!(RelaxParams::quick().max_steps, 10);
        assert_eq!(RelaxParams::high_quality().max_steps, 1000);
        assert_eq!(RelaxParams::with_limits(0.1, 3).max_steps, 3);
    }

    #[test]
    fn test_validate() {
        assert!(RelaxParams::default().validate().is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RelaxParams::default().with_tolerance(bad).validate(),
                Err(RelaxError::InvalidTolerance(_))
            ));
        }
        assert!(matches!(
            RelaxParams::default().with_max_steps(0).validate(),
            Err(RelaxError::InvalidMaxSteps)
        ));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let params = RelaxParams::default().with_cancel_flag(Arc::clone(&flag));
        assert!(!params.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(params.is_cancelled());
    }
}
