//! Pairwise Newtonian gravity with a force cap
//!
//! Every pair of bodies attracts with magnitude
//! `min(G·m_i·m_j / (r² + softening), max_force)` along the line joining
//! them. A pair at exactly the same position has no direction and
//! contributes nothing. The result is stored as acceleration: each body's
//! share of the force is divided by its own mass.

use glam::DVec2;
use rayon::prelude::*;

use crate::body::Body;
use crate::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    pub gravity: f64,
    pub max_force: f64,
    pub softening: f64,
    pub parallel_threshold: usize,
}

impl ForceField {
    pub fn new(gravity: f64, max_force: f64, softening: f64) -> Self {
        Self {
            gravity,
            max_force,
            softening,
            parallel_threshold: usize::MAX,
        }
    }

    /// Force magnitude before the cap is applied
    #[inline]
    pub fn raw_force_magnitude(&self, m_i: f64, m_j: f64, dist_sq: f64) -> f64 {
        self.gravity * m_i * m_j / (dist_sq + self.softening)
    }

    /// Capped force magnitude between two masses `sqrt(dist_sq)` apart
    #[inline]
    pub fn pair_force_magnitude(&self, m_i: f64, m_j: f64, dist_sq: f64) -> f64 {
        self.raw_force_magnitude(m_i, m_j, dist_sq).min(self.max_force)
    }

    /// Force exerted on a body at `from` by a body at `to`, or `None` when
    /// the two coincide.
    #[inline]
    fn pair_force(&self, from: DVec2, m_from: f64, to: DVec2, m_to: f64) -> Option<DVec2> {
        let r = to - from;
        let dist_sq = r.length_squared();
        if dist_sq == 0.0 {
            return None;
        }
        let direction = r / dist_sq.sqrt();
        Some(direction * self.pair_force_magnitude(m_from, m_to, dist_sq))
    }

    /// Overwrite every body's acceleration with the net gravitational pull
    /// of all the others. Fewer than two bodies is a no-op.
    pub fn compute(&self, bodies: &mut [Body]) {
        let n = bodies.len();
        if n < 2 {
            return;
        }

        if n >= self.parallel_threshold {
            log::trace!("parallel force pass over {n} bodies");
            self.compute_rows(bodies);
        } else {
            self.compute_pairs(bodies);
        }
    }

    /// Visits each unordered pair once and applies the reaction to the
    /// second body.
    fn compute_pairs(&self, bodies: &mut [Body]) {
        for body in bodies.iter_mut() {
            body.acceleration = DVec2::ZERO;
        }

        let n = bodies.len();
        for i in 0..n {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if let Some(force) = self.pair_force(a.position, a.mass, b.position, b.mass) {
                    a.acceleration += force / a.mass;
                    b.acceleration -= force / b.mass;
                }
            }
        }
    }

    /// One full row of the interaction matrix per body, spread over the
    /// rayon pool. Each body's accumulator is written only by the task that
    /// owns it, and `for_each` returns once all rows are done.
    fn compute_rows(&self, bodies: &mut [Body]) {
        let sources: Vec<(DVec2, f64)> = bodies.iter().map(|b| (b.position, b.mass)).collect();

        bodies.par_iter_mut().enumerate().for_each(|(i, body)| {
            let mut force = DVec2::ZERO;
            for (j, &(position, mass)) in sources.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(f) = self.pair_force(body.position, body.mass, position, mass) {
                    force += f;
                }
            }
            body.acceleration = force / body.mass;
        });
    }
}

impl From<&SimulationConfig> for ForceField {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            gravity: config.gravity,
            max_force: config.max_force,
            softening: config.softening,
            parallel_threshold: config.parallel_threshold,
        }
    }
}

impl Default for ForceField {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pair(m1: f64, m2: f64, distance: f64) -> Vec<Body> {
        vec![
            Body::at_rest(DVec2::ZERO, m1),
            Body::at_rest(DVec2::new(distance, 0.0), m2),
        ]
    }

    fn scattered(count: usize, seed: u64) -> Vec<Body> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let position = DVec2::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0));
                Body::at_rest(position, rng.gen_range(1.0..100.0))
            })
            .collect()
    }

    #[test]
    fn empty_and_single_body_are_untouched() {
        let field = ForceField::default();

        let mut none: Vec<Body> = Vec::new();
        field.compute(&mut none);

        let mut one = vec![Body::at_rest(DVec2::new(3.0, 4.0), 10.0)];
        field.compute(&mut one);
        assert_eq!(one[0].acceleration, DVec2::ZERO);
    }

    #[test]
    fn uncapped_magnitude_matches_newton() {
        let field = ForceField::new(1.0, f64::INFINITY, 0.0);
        let mut bodies = pair(10.0, 20.0, 5.0);
        field.compute(&mut bodies);

        // F = 1 * 10 * 20 / 25 = 8
        assert_relative_eq!(field.raw_force_magnitude(10.0, 20.0, 25.0), 8.0);
        assert_relative_eq!(bodies[0].acceleration.x, 8.0 / 10.0);
        assert_relative_eq!(bodies[1].acceleration.x, -8.0 / 20.0);
        assert_eq!(bodies[0].acceleration.y, 0.0);
    }

    #[test]
    fn cap_limits_magnitude_not_direction() {
        let field = ForceField::new(1.0, 5.0, 0.0);
        assert_relative_eq!(field.pair_force_magnitude(10.0, 20.0, 25.0), 5.0);

        let mut bodies = vec![
            Body::at_rest(DVec2::ZERO, 10.0),
            Body::at_rest(DVec2::new(3.0, 4.0), 20.0),
        ];
        field.compute(&mut bodies);
        assert_relative_eq!(bodies[0].acceleration.length(), 5.0 / 10.0, epsilon = 1e-12);
        let direction = bodies[0].acceleration.normalize();
        assert_relative_eq!(direction.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(direction.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn default_softening_barely_moves_the_result() {
        let field = ForceField::new(1.0, f64::INFINITY, 1e-5);
        assert_relative_eq!(
            field.raw_force_magnitude(10.0, 20.0, 25.0),
            8.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn raw_magnitude_is_symmetric() {
        let field = ForceField::default();
        for &(a, b, d2) in &[(1.0, 99.0, 0.3), (5.0, 50.0, 1e4), (0.1, 2e3, 1e-9)] {
            assert_relative_eq!(
                field.raw_force_magnitude(a, b, d2),
                field.raw_force_magnitude(b, a, d2),
                max_relative = 1e-15
            );
        }
    }

    #[test]
    fn reaction_is_equal_and_opposite() {
        let field = ForceField::default();
        let mut bodies = scattered(40, 7);
        field.compute(&mut bodies);

        let net = bodies
            .iter()
            .fold(DVec2::ZERO, |acc, b| acc + b.acceleration * b.mass);
        let scale: f64 = bodies.iter().map(|b| (b.acceleration * b.mass).length()).sum();
        assert!(net.length() <= scale * 1e-10, "net force {net} should vanish");
    }

    #[test]
    fn close_encounter_respects_cap() {
        let field = ForceField::default();
        for distance in [1.0, 1e-3, 1e-6, 1e-12] {
            let mut bodies = pair(2.0, 80.0, distance);
            field.compute(&mut bodies);
            for body in &bodies {
                assert!(body.acceleration.length() <= field.max_force / body.mass * (1.0 + 1e-12));
            }
            assert!(bodies[0].acceleration.length() <= field.max_force / 2.0 * (1.0 + 1e-12));
        }
    }

    #[test]
    fn coincident_bodies_produce_no_force() {
        let field = ForceField::default();
        let mut bodies = pair(1.0, 1.0, 0.0);
        field.compute(&mut bodies);
        assert_eq!(bodies[0].acceleration, DVec2::ZERO);
        assert_eq!(bodies[1].acceleration, DVec2::ZERO);
    }

    #[test]
    fn stale_acceleration_is_overwritten() {
        let field = ForceField::new(1.0, f64::INFINITY, 0.0);
        let mut bodies = pair(10.0, 20.0, 5.0);
        bodies[0].acceleration = DVec2::new(100.0, 100.0);
        field.compute(&mut bodies);
        assert_relative_eq!(bodies[0].acceleration.x, 0.8);
        assert_eq!(bodies[0].acceleration.y, 0.0);
    }

    #[test]
    fn parallel_rows_agree_with_pair_loop() {
        let serial = ForceField::default();
        let parallel = ForceField {
            parallel_threshold: 2,
            ..serial
        };

        let mut a = scattered(300, 11);
        let mut b = a.clone();
        serial.compute(&mut a);
        parallel.compute(&mut b);

        for (x, y) in a.iter().zip(&b) {
            assert_relative_eq!(x.acceleration.x, y.acceleration.x, epsilon = 1e-8, max_relative = 1e-9);
            assert_relative_eq!(x.acceleration.y, y.acceleration.y, epsilon = 1e-8, max_relative = 1e-9);
        }
    }
}
