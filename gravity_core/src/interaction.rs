//! Host-driven mutation and picking: click-drag spawning and inspection

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use crate::body::{Body, BodyTemplate};
use crate::error::{ensure_finite, ensure_finite_vec, ensure_positive, EngineError, Result};

/// Append `count` bodies scattered uniformly over the disc of
/// `scatter_radius` around `anchor`, all moving with `velocity`.
///
/// A single body is placed exactly on the anchor. The new bodies are built
/// before anything is appended, so on error `bodies` is left as it was.
pub fn spawn_cluster(
    bodies: &mut Vec<Body>,
    anchor: DVec2,
    count: usize,
    velocity: DVec2,
    template: BodyTemplate,
    scatter_radius: f64,
    rng: &mut impl Rng,
) -> Result<()> {
    ensure_finite_vec("anchor", anchor)?;
    ensure_finite_vec("velocity", velocity)?;
    ensure_positive("mass", template.mass)?;
    ensure_finite("radius", template.radius)?;
    ensure_finite("scatter_radius", scatter_radius)?;
    if scatter_radius < 0.0 {
        return Err(EngineError::invalid(
            "scatter_radius",
            format!("must not be negative, got {scatter_radius}"),
        ));
    }

    let cluster: Vec<Body> = if count == 1 {
        vec![template.instantiate(anchor, velocity)]
    } else {
        (0..count)
            .map(|_| {
                // sqrt keeps the density uniform over the disc's area
                let r = scatter_radius * rng.gen::<f64>().sqrt();
                let angle = rng.gen::<f64>() * TAU;
                template.instantiate(anchor + DVec2::from_angle(angle) * r, velocity)
            })
            .collect()
    };

    log::debug!("spawned cluster of {} bodies at {anchor}", cluster.len());
    bodies.extend(cluster);
    Ok(())
}

/// Index of the body nearest to `point` among those within
/// `max(tolerance, body.radius)` of it.
pub fn find_body_index_near(bodies: &[Body], point: DVec2, tolerance: f64) -> Option<usize> {
    bodies
        .iter()
        .enumerate()
        .filter_map(|(i, body)| {
            let distance = body.distance_to(point);
            (distance <= tolerance.max(body.radius)).then_some((i, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// The body nearest to `point`, if any lies within `max(tolerance, radius)`.
pub fn find_body_near(bodies: &[Body], point: DVec2, tolerance: f64) -> Option<&Body> {
    find_body_index_near(bodies, point, tolerance).map(|i| &bodies[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cluster_stays_within_scatter_radius() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bodies = vec![Body::at_rest(DVec2::ZERO, 1.0)];
        let anchor = DVec2::new(100.0, 50.0);
        let velocity = DVec2::new(4.0, -2.0);

        spawn_cluster(&mut bodies, anchor, 25, velocity, BodyTemplate::default(), 30.0, &mut rng)
            .unwrap();

        assert_eq!(bodies.len(), 26);
        for body in &bodies[1..] {
            assert!(body.distance_to(anchor) <= 30.0);
            assert_eq!(body.velocity, velocity);
            assert_eq!(body.mass, BodyTemplate::default().mass);
            assert_eq!(body.radius, BodyTemplate::default().radius);
        }
    }

    #[test]
    fn single_body_lands_on_anchor() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bodies = Vec::new();
        let anchor = DVec2::new(-3.0, 8.0);
        spawn_cluster(&mut bodies, anchor, 1, DVec2::ZERO, BodyTemplate::default(), 30.0, &mut rng)
            .unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].position, anchor);
    }

    #[test]
    fn zero_count_appends_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bodies = Vec::new();
        spawn_cluster(&mut bodies, DVec2::ZERO, 0, DVec2::ZERO, BodyTemplate::default(), 30.0, &mut rng)
            .unwrap();
        assert!(bodies.is_empty());
    }

    #[test]
    fn non_positive_mass_is_rejected_without_side_effects() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bodies = vec![Body::at_rest(DVec2::ZERO, 1.0)];
        for mass in [0.0, -5.0] {
            let result = spawn_cluster(
                &mut bodies,
                DVec2::ZERO,
                10,
                DVec2::ZERO,
                BodyTemplate::new(mass, 5.0),
                30.0,
                &mut rng,
            );
            assert!(matches!(result, Err(EngineError::InvalidParameter { name: "mass", .. })));
        }
        assert_eq!(bodies.len(), 1);
    }

    #[test]
    fn negative_scatter_is_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut bodies = Vec::new();
        let result = spawn_cluster(
            &mut bodies,
            DVec2::ZERO,
            3,
            DVec2::ZERO,
            BodyTemplate::default(),
            -1.0,
            &mut rng,
        );
        assert!(result.is_err());
        assert!(bodies.is_empty());
    }

    #[test]
    fn finds_nearest_within_tolerance() {
        let bodies = vec![
            Body::new(DVec2::new(0.0, 0.0), DVec2::ZERO, 1.0, 2.0),
            Body::new(DVec2::new(4.0, 0.0), DVec2::ZERO, 2.0, 2.0),
            Body::new(DVec2::new(100.0, 0.0), DVec2::ZERO, 3.0, 2.0),
        ];

        assert_eq!(find_body_index_near(&bodies, DVec2::new(3.0, 0.0), 5.0), Some(1));
        assert_eq!(find_body_near(&bodies, DVec2::new(0.5, 0.0), 5.0).map(|b| b.mass), Some(1.0));
        assert!(find_body_near(&bodies, DVec2::new(50.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn large_radius_widens_the_pick() {
        let bodies = vec![Body::new(DVec2::ZERO, DVec2::ZERO, 1.0, 12.0)];
        assert!(find_body_near(&bodies, DVec2::new(10.0, 0.0), 5.0).is_some());
        assert!(find_body_near(&bodies, DVec2::new(13.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn empty_collection_finds_nothing() {
        assert!(find_body_near(&[], DVec2::ZERO, 100.0).is_none());
    }
}
