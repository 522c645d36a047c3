//! Command-line configuration for the viewer

use clap::Parser;
use gravity_core::{EngineError, SimulationConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "gravity_sim", about = "Interactive 2D N-body gravity simulation")]
pub struct Args {
    /// Gravitational constant
    #[arg(long, default_value_t = gravity_core::config::DEFAULT_GRAVITY)]
    pub gravity: f64,

    /// Cap on any pairwise force magnitude
    #[arg(long, default_value_t = gravity_core::config::DEFAULT_MAX_FORCE)]
    pub max_force: f64,

    /// Bodies produced by the ring, spiral and random generators
    #[arg(long, default_value_t = 1500)]
    pub bodies: usize,

    /// Bodies in each galaxy of the collision preset
    #[arg(long, default_value_t = 150)]
    pub per_galaxy: usize,

    /// Simulation steps per rendered frame
    #[arg(long, default_value_t = 1)]
    pub substeps: u32,

    /// Upper bound on the frame time fed to the simulation, in seconds
    #[arg(long, default_value_t = 0.045)]
    pub max_dt: f64,

    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    #[arg(long, default_value_t = 750)]
    pub height: u32,
}

/// Host-side settings that never reach the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub bodies: usize,
    pub per_galaxy: usize,
    pub substeps: u32,
    pub max_dt: f64,
    pub width: u32,
    pub height: u32,
}

impl Args {
    pub fn into_configs(self) -> Result<(SimulationConfig, ViewerConfig), EngineError> {
        let simulation = SimulationConfig::new(self.gravity, self.max_force);
        simulation.validate()?;
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(EngineError::invalid(
                "max_dt",
                format!("must be positive and finite, got {}", self.max_dt),
            ));
        }

        let viewer = ViewerConfig {
            bodies: self.bodies,
            per_galaxy: self.per_galaxy,
            substeps: self.substeps.max(1),
            max_dt: self.max_dt,
            width: self.width.max(1),
            height: self.height.max(1),
        };
        Ok((simulation, viewer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_engine_defaults() {
        let args = Args::parse_from(["gravity_sim"]);
        let (simulation, viewer) = args.into_configs().unwrap();
        assert_eq!(simulation, SimulationConfig::default());
        assert_eq!(viewer.bodies, 1500);
        assert_eq!(viewer.substeps, 1);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["gravity_sim", "--gravity", "5", "--max-force", "2.5", "--substeps", "0"]);
        let (simulation, viewer) = args.into_configs().unwrap();
        assert_eq!(simulation.gravity, 5.0);
        assert_eq!(simulation.max_force, 2.5);
        assert_eq!(viewer.substeps, 1);
    }

    #[test]
    fn non_positive_max_dt_is_rejected() {
        for flag in ["--max-dt=-1", "--max-dt=0", "--max-dt=NaN", "--max-dt=inf"] {
            let args = Args::parse_from(["gravity_sim", flag]);
            assert!(matches!(
                args.into_configs(),
                Err(EngineError::InvalidParameter { name: "max_dt", .. })
            ));
        }
    }

    #[test]
    fn invalid_force_cap_is_rejected() {
        let args = Args::parse_from(["gravity_sim", "--max-force", "0"]);
        assert!(args.into_configs().is_err());
    }
}
