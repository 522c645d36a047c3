//! Initial-condition generators
//!
//! Each generator is a pure function returning a fully built `Vec<Body>`;
//! none of them look at an existing simulation. The geometric shapes are
//! deterministic. `uniform_random` draws from the caller's RNG so hosts can
//! pass `thread_rng()` and tests a seeded generator.
//!
//! All tangential velocities point counterclockwise, `(-sin φ, cos φ)`.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use rand::Rng;

use crate::body::{Body, DEFAULT_RADIUS};
use crate::error::{
    ensure_finite, ensure_finite_vec, ensure_positive, ensure_range, EngineError, Result,
};

/// Mass of every ring body
pub const RING_MASS: f64 = 5.0;
/// Tangential speed given to ring bodies
pub const RING_SPEED: f64 = 20.0;

/// Radius gained per radian of spiral angle (`r = k·θ`)
pub const SPIRAL_RADIAL_STEP: f64 = 4.0;
/// Numerator of the orbital-speed falloff `sqrt(K / (r + ε))`
pub const SPIRAL_SPEED_K: f64 = 2000.0;
/// Keeps the speed falloff finite at the spiral's origin
pub const SPIRAL_EPSILON: f64 = 5.0;
/// Mass of every spiral body
pub const SPIRAL_MASS: f64 = 50.0;

#[inline]
fn tangent(angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(-sin, cos)
}

/// Rejects layouts whose farthest body would land outside the finite plane.
fn ensure_extent(name: &'static str, center: DVec2, reach: f64) -> Result<()> {
    let extent = center.abs().max_element() + reach.abs();
    if extent.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(
            name,
            format!("layout reaching {reach} from {center} overflows"),
        ))
    }
}

#[inline]
fn sample(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

// ============================================================================
// Uniform random field
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformParams {
    pub count: usize,
    /// Inclusive range for each velocity component
    pub velocity_range: (f64, f64),
    /// Inclusive mass range; both bounds must be positive
    pub mass_range: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl UniformParams {
    fn validate(&self) -> Result<()> {
        ensure_range("velocity_range", self.velocity_range)?;
        ensure_range("mass_range", self.mass_range)?;
        if self.mass_range.0 <= 0.0 {
            return Err(EngineError::invalid(
                "mass_range",
                format!("masses must be positive, lower bound is {}", self.mass_range.0),
            ));
        }
        ensure_positive("width", self.width)?;
        ensure_positive("height", self.height)?;
        ensure_range("width", (0.0, self.width))?;
        ensure_range("height", (0.0, self.height))?;
        Ok(())
    }
}

/// Bodies scattered uniformly over `[0, width) × [0, height)`.
pub fn uniform_random(params: &UniformParams, rng: &mut impl Rng) -> Result<Vec<Body>> {
    params.validate()?;

    let bodies: Vec<Body> = (0..params.count)
        .map(|_| {
            let position = DVec2::new(
                rng.gen_range(0.0..params.width),
                rng.gen_range(0.0..params.height),
            );
            let velocity = DVec2::new(
                sample(rng, params.velocity_range),
                sample(rng, params.velocity_range),
            );
            let mass = sample(rng, params.mass_range);
            Body::new(position, velocity, mass, DEFAULT_RADIUS)
        })
        .collect();

    log::debug!("generated {} uniformly random bodies", bodies.len());
    Ok(bodies)
}

// ============================================================================
// Ring
// ============================================================================

/// `count` bodies evenly spaced on a circle, each moving tangentially.
///
/// The speed is a fixed visual choice, not a circular-orbit solution.
pub fn ring(count: usize, center: DVec2, radius: f64) -> Result<Vec<Body>> {
    ensure_finite_vec("center", center)?;
    ensure_finite("radius", radius)?;
    ensure_extent("radius", center, radius)?;

    let bodies: Vec<Body> = (0..count)
        .map(|i| {
            let theta = TAU * i as f64 / count as f64;
            let position = center + DVec2::from_angle(theta) * radius;
            Body::new(position, tangent(theta) * RING_SPEED, RING_MASS, DEFAULT_RADIUS)
        })
        .collect();

    log::debug!("generated ring of {} bodies", bodies.len());
    Ok(bodies)
}

// ============================================================================
// Spiral
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub count: usize,
    /// Angle step between consecutive bodies, in radians
    pub spacing: f64,
    pub center: DVec2,
    /// Added to every body's velocity
    pub velocity_offset: DVec2,
    /// Bodies are dealt round-robin onto this many evenly rotated arms
    pub arms: usize,
    /// Rotation applied to the whole spiral
    pub arm_offset: f64,
}

impl SpiralParams {
    /// A single-armed spiral
    pub fn new(count: usize, spacing: f64, center: DVec2, velocity_offset: DVec2) -> Self {
        Self {
            count,
            spacing,
            center,
            velocity_offset,
            arms: 1,
            arm_offset: 0.0,
        }
    }

    pub fn with_arms(mut self, arms: usize) -> Self {
        self.arms = arms;
        self
    }

    pub fn with_arm_offset(mut self, arm_offset: f64) -> Self {
        self.arm_offset = arm_offset;
        self
    }

    fn validate(&self) -> Result<()> {
        ensure_positive("spacing", self.spacing)?;
        ensure_finite_vec("center", self.center)?;
        ensure_finite_vec("velocity_offset", self.velocity_offset)?;
        ensure_finite("arm_offset", self.arm_offset)?;
        if self.arms == 0 {
            return Err(EngineError::invalid("arms", "need at least one arm"));
        }
        ensure_extent("spacing", self.center, self.outer_radius())?;
        Ok(())
    }

    /// Radius of the last body
    pub fn outer_radius(&self) -> f64 {
        SPIRAL_RADIAL_STEP * self.count.saturating_sub(1) as f64 * self.spacing
    }
}

/// Archimedean spiral: body `i` sits at angle `θ = i·spacing` and radius
/// `r = SPIRAL_RADIAL_STEP·θ`, moving tangentially at
/// `sqrt(SPIRAL_SPEED_K / (r + SPIRAL_EPSILON))` plus the velocity offset.
pub fn spiral(params: &SpiralParams) -> Result<Vec<Body>> {
    params.validate()?;

    let arm_step = TAU / params.arms as f64;
    let bodies: Vec<Body> = (0..params.count)
        .map(|i| {
            let theta = i as f64 * params.spacing;
            let r = SPIRAL_RADIAL_STEP * theta;
            let angle = theta + (i % params.arms) as f64 * arm_step + params.arm_offset;

            let position = params.center + DVec2::from_angle(angle) * r;
            let speed = (SPIRAL_SPEED_K / (r + SPIRAL_EPSILON)).sqrt();
            let velocity = tangent(angle) * speed + params.velocity_offset;

            Body::new(position, velocity, SPIRAL_MASS, DEFAULT_RADIUS)
        })
        .collect();

    log::debug!(
        "generated spiral of {} bodies on {} arm(s)",
        bodies.len(),
        params.arms
    );
    Ok(bodies)
}

// ============================================================================
// Two galaxies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyPairParams {
    pub count_per_galaxy: usize,
    pub center1: DVec2,
    pub center2: DVec2,
    pub velocity1: DVec2,
    pub velocity2: DVec2,
    pub spacing: f64,
    pub arms: usize,
}

impl GalaxyPairParams {
    pub fn new(
        count_per_galaxy: usize,
        center1: DVec2,
        center2: DVec2,
        velocity1: DVec2,
        velocity2: DVec2,
    ) -> Self {
        Self {
            count_per_galaxy,
            center1,
            center2,
            velocity1,
            velocity2,
            spacing: 0.1,
            arms: 3,
        }
    }
}

/// Two spirals, the second rotated by half a turn, concatenated into one
/// collection for a galaxy-collision run.
pub fn two_galaxies(params: &GalaxyPairParams) -> Result<Vec<Body>> {
    let first = SpiralParams::new(
        params.count_per_galaxy,
        params.spacing,
        params.center1,
        params.velocity1,
    )
    .with_arms(params.arms);
    let second = SpiralParams::new(
        params.count_per_galaxy,
        params.spacing,
        params.center2,
        params.velocity2,
    )
    .with_arms(params.arms)
    .with_arm_offset(PI);

    let mut bodies = spiral(&first)?;
    bodies.extend(spiral(&second)?);
    Ok(bodies)
}

// ============================================================================
// Solar system
// ============================================================================

/// Radius of the central star
pub const STAR_RADIUS: f64 = 12.0;
/// Radius of each planet
pub const PLANET_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSystemParams {
    pub center: DVec2,
    pub star_mass: f64,
    pub planets: usize,
    pub planet_mass: f64,
    /// Orbit radius of the innermost planet
    pub inner_radius: f64,
    /// Gap between consecutive orbits
    pub orbit_spacing: f64,
    /// Gravitational constant the orbits are solved for
    pub gravity: f64,
}

impl SolarSystemParams {
    /// Five light planets around a heavy star, small enough that the
    /// default force cap never clips the star's pull.
    pub fn new(center: DVec2, gravity: f64) -> Self {
        Self {
            center,
            star_mass: 1000.0,
            planets: 5,
            planet_mass: 0.5,
            inner_radius: 80.0,
            orbit_spacing: 45.0,
            gravity,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite_vec("center", self.center)?;
        ensure_positive("star_mass", self.star_mass)?;
        ensure_positive("planet_mass", self.planet_mass)?;
        ensure_positive("inner_radius", self.inner_radius)?;
        ensure_finite("orbit_spacing", self.orbit_spacing)?;
        if self.orbit_spacing < 0.0 {
            return Err(EngineError::invalid(
                "orbit_spacing",
                format!("must not be negative, got {}", self.orbit_spacing),
            ));
        }
        ensure_positive("gravity", self.gravity)?;
        ensure_extent("orbit_spacing", self.center, self.orbit_radius(self.planets))?;
        Ok(())
    }

    pub fn orbit_radius(&self, planet: usize) -> f64 {
        self.inner_radius + planet as f64 * self.orbit_spacing
    }
}

/// A star at rest on `center` followed by planets on circular orbits of
/// speed `sqrt(G·M / r)`. Planets alternate sides of the star so the
/// system starts roughly balanced.
pub fn solar_system(params: &SolarSystemParams) -> Result<Vec<Body>> {
    params.validate()?;

    let star = Body::new(params.center, DVec2::ZERO, params.star_mass, STAR_RADIUS);
    let planets = (0..params.planets).map(|i| {
        let r = params.orbit_radius(i);
        let angle = if i % 2 == 0 { PI } else { 0.0 };
        let speed = (params.gravity * params.star_mass / r).sqrt();
        Body::new(
            params.center + DVec2::from_angle(angle) * r,
            tangent(angle) * speed,
            params.planet_mass,
            PLANET_RADIUS,
        )
    });
    let bodies: Vec<Body> = std::iter::once(star).chain(planets).collect();

    log::debug!("generated solar system with {} planets", params.planets);
    Ok(bodies)
}
