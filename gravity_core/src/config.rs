//! Simulation parameters passed explicitly into every step

use crate::error::{ensure_finite, EngineError, Result};

/// Gravitational constant (scaled for visualization)
pub const DEFAULT_GRAVITY: f64 = 100.0;

/// Upper bound on any single pairwise force magnitude
pub const DEFAULT_MAX_FORCE: f64 = 100.0;

/// Added to the squared distance before inverting it
pub const DEFAULT_SOFTENING: f64 = 1e-5;

/// Body count at which force evaluation moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub gravity: f64,
    /// Pairwise force cap; `f64::INFINITY` disables it.
    pub max_force: f64,
    pub softening: f64,
    pub parallel_threshold: usize,
}

impl SimulationConfig {
    pub fn new(gravity: f64, max_force: f64) -> Self {
        Self {
            gravity,
            max_force,
            ..Self::default()
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_max_force(mut self, max_force: f64) -> Self {
        self.max_force = max_force;
        self
    }

    /// Removes the force cap
    pub fn uncapped(self) -> Self {
        self.with_max_force(f64::INFINITY)
    }

    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("gravity", self.gravity)?;
        if self.max_force.is_nan() || self.max_force <= 0.0 {
            return Err(EngineError::invalid(
                "max_force",
                format!("must be positive, got {}", self.max_force),
            ));
        }
        ensure_finite("softening", self.softening)?;
        if self.softening < 0.0 {
            return Err(EngineError::invalid(
                "softening",
                format!("must not be negative, got {}", self.softening),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            max_force: DEFAULT_MAX_FORCE,
            softening: DEFAULT_SOFTENING,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(SimulationConfig::default().uncapped().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = SimulationConfig::default();
        assert!(base.with_gravity(f64::NAN).validate().is_err());
        assert!(base.with_max_force(0.0).validate().is_err());
        assert!(base.with_max_force(f64::NAN).validate().is_err());
        assert!(base.with_softening(-1e-3).validate().is_err());
    }

    #[test]
    fn new_keeps_other_defaults() {
        let config = SimulationConfig::new(1.0, 5.0);
        assert_eq!(config.gravity, 1.0);
        assert_eq!(config.max_force, 5.0);
        assert_eq!(config.softening, DEFAULT_SOFTENING);
    }
}
