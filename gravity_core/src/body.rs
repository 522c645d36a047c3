//! Point-mass body record

use glam::DVec2;

/// Visual radius given to generated bodies when no template says otherwise
pub const DEFAULT_RADIUS: f64 = 2.0;

/// A point mass in the simulation.
///
/// `acceleration` is scratch space: it is written by the force pass and
/// cleared by the integrator, so it is zero whenever a frame starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    pub mass: f64,
    /// Rendering and picking hint; plays no part in the force law.
    pub radius: f64,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, mass: f64, radius: f64) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        Self {
            position,
            velocity,
            acceleration: DVec2::ZERO,
            mass,
            radius,
        }
    }

    /// A body with zero velocity and the default radius
    pub fn at_rest(position: DVec2, mass: f64) -> Self {
        Self::new(position, DVec2::ZERO, mass, DEFAULT_RADIUS)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }

    /// True when position and velocity hold no NaN or infinity
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Shared mass and radius for bodies created interactively
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTemplate {
    pub mass: f64,
    pub radius: f64,
}

impl BodyTemplate {
    pub fn new(mass: f64, radius: f64) -> Self {
        Self { mass, radius }
    }

    pub fn instantiate(&self, position: DVec2, velocity: DVec2) -> Body {
        Body::new(position, velocity, self.mass, self.radius)
    }
}

impl Default for BodyTemplate {
    fn default() -> Self {
        Self::new(20.0, 5.0)
    }
}
