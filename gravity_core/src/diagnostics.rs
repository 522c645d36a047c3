//! Whole-system quantities for status readouts and conservation checks

use glam::DVec2;

use crate::body::Body;
use crate::forces::ForceField;

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

/// Mass-weighted mean position, or the origin for an empty system
pub fn center_of_mass(bodies: &[Body]) -> DVec2 {
    let total_mass = total_mass(bodies);
    if total_mass > 0.0 {
        let weighted = bodies
            .iter()
            .fold(DVec2::ZERO, |acc, b| acc + b.position * b.mass);
        weighted / total_mass
    } else {
        DVec2::ZERO
    }
}

pub fn total_momentum(bodies: &[Body]) -> DVec2 {
    bodies.iter().fold(DVec2::ZERO, |acc, b| acc + b.momentum())
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Softened pairwise potential `-G·m_i·m_j / sqrt(r² + softening)`.
///
/// Coincident pairs exert no force and carry no potential. The force cap is
/// ignored, so this is only an energy of the uncapped system.
pub fn potential_energy(bodies: &[Body], field: &ForceField) -> f64 {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let dist_sq = a.position.distance_squared(b.position);
            if dist_sq > 0.0 {
                energy -= field.gravity * a.mass * b.mass / (dist_sq + field.softening).sqrt();
            }
        }
    }
    energy
}

/// Snapshot for the viewer's status line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total_mass: f64,
    pub center_of_mass: DVec2,
    pub momentum: DVec2,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
}

impl Summary {
    pub fn of(bodies: &[Body], field: &ForceField) -> Self {
        Self {
            count: bodies.len(),
            total_mass: total_mass(bodies),
            center_of_mass: center_of_mass(bodies),
            momentum: total_momentum(bodies),
            kinetic_energy: kinetic_energy(bodies),
            potential_energy: potential_energy(bodies, field),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}
