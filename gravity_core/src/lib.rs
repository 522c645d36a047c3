//! 2D N-body gravity engine
//!
//! The engine borrows a host-owned body collection once per frame:
//!
//! - **Body**: point mass with position, velocity and transient acceleration
//! - **ForceField**: capped, softened pairwise gravity written as acceleration
//! - **Integrator**: semi-implicit Euler, one body at a time
//! - **Generators**: uniform random field, ring, spiral, two galaxies, solar system
//! - **Simulation step**: force pass then integration, gated by a pause flag
//!
//! Interactive helpers for spawning clusters and picking bodies live in
//! [`interaction`]; conserved-quantity readouts live in [`diagnostics`].

pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod generators;
pub mod integrator;
pub mod interaction;
pub mod simulation;

pub use body::{Body, BodyTemplate};
pub use config::SimulationConfig;
pub use error::{EngineError, Result};
pub use forces::ForceField;
pub use generators::{
    ring, solar_system, spiral, two_galaxies, uniform_random, GalaxyPairParams,
    SolarSystemParams, SpiralParams, UniformParams,
};
pub use interaction::{find_body_index_near, find_body_near, spawn_cluster};
pub use simulation::{step, RunState};

pub use glam::DVec2;
