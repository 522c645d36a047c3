//! Per-frame orchestration: force pass, then integration

use crate::body::Body;
use crate::config::SimulationConfig;
use crate::forces::ForceField;
use crate::integrator;

/// Whether the host wants the bodies to move this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }

    pub fn toggle(&mut self) {
        *self = match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
    }
}

/// Advance the host's bodies by one step of `dt`.
///
/// When `paused` nothing is touched. Otherwise accelerations are recomputed
/// from scratch and every body is integrated; accelerations are zero again
/// when this returns, so pausing between steps loses nothing.
///
/// `config` must pass [`SimulationConfig::validate`]; a non-positive cap
/// would turn the pull into a push. Debug builds check this.
pub fn step(bodies: &mut [Body], dt: f64, config: &SimulationConfig, paused: bool) {
    if paused {
        return;
    }
    debug_assert!(
        config.validate().is_ok(),
        "invalid simulation config: {config:?}"
    );

    log::trace!("step: {} bodies, dt = {dt}", bodies.len());
    ForceField::from(config).compute(bodies);
    integrator::advance(bodies, dt, config.parallel_threshold);

    check_finite(bodies);
}

/// Non-finite state means the softening or cap was bypassed upstream.
fn check_finite(bodies: &[Body]) {
    if let Some(index) = bodies.iter().position(|b| !b.is_finite()) {
        log::error!("body {index} became non-finite: {:?}", bodies[index]);
        if cfg!(debug_assertions) {
            panic!("body {index} became non-finite: {:?}", bodies[index]);
        }
    }
}
