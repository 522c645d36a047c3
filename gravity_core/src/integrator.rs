//! Semi-implicit Euler time integration

use rayon::prelude::*;

use crate::body::Body;

/// Advance one body by `dt` and clear its acceleration.
///
/// Velocity is updated first and the new velocity moves the position.
/// `dt` is not validated; clamping it is the caller's job.
#[inline]
pub fn step(body: &mut Body, dt: f64) {
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
    body.acceleration = glam::DVec2::ZERO;
}

/// Apply [`step`] to every body, on the rayon pool once the slice holds at
/// least `parallel_threshold` bodies.
pub fn advance(bodies: &mut [Body], dt: f64, parallel_threshold: usize) {
    if bodies.len() >= parallel_threshold {
        bodies.par_iter_mut().for_each(|body| step(body, dt));
    } else {
        bodies.iter_mut().for_each(|body| step(body, dt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn moving_body() -> Body {
        let mut body = Body::new(DVec2::new(1.0, 2.0), DVec2::new(0.5, -0.5), 3.0, 1.0);
        body.acceleration = DVec2::new(2.0, 4.0);
        body
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut body = moving_body();
        step(&mut body, 0.5);

        // v = (0.5, -0.5) + (2, 4) * 0.5 = (1.5, 1.5)
        assert_relative_eq!(body.velocity.x, 1.5);
        assert_relative_eq!(body.velocity.y, 1.5);
        // x = (1, 2) + (1.5, 1.5) * 0.5
        assert_relative_eq!(body.position.x, 1.75);
        assert_relative_eq!(body.position.y, 2.75);
    }

    #[test]
    fn acceleration_is_cleared() {
        let mut body = moving_body();
        step(&mut body, 0.01);
        assert_eq!(body.acceleration, DVec2::ZERO);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let mut a = moving_body();
        let mut b = moving_body();
        step(&mut a, 0.016);
        step(&mut b, 0.016);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_dt_only_clears_acceleration() {
        let before = moving_body();
        let mut body = before;
        step(&mut body, 0.0);
        assert_eq!(body.position, before.position);
        assert_eq!(body.velocity, before.velocity);
        assert_eq!(body.acceleration, DVec2::ZERO);
    }

    #[test]
    fn parallel_advance_matches_serial() {
        let bodies: Vec<Body> = (0..64)
            .map(|i| {
                let mut body = moving_body();
                body.position.x += i as f64;
                body
            })
            .collect();

        let mut serial = bodies.clone();
        let mut parallel = bodies;
        advance(&mut serial, 0.02, usize::MAX);
        advance(&mut parallel, 0.02, 1);
        assert_eq!(serial, parallel);
    }
}
