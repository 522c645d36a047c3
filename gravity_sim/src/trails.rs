//! Orbit trails: recent positions of each body, drawn behind the bodies

use std::collections::VecDeque;

use gravity_core::{Body, DVec2};

pub const DEFAULT_TRAIL_LENGTH: usize = 200;

/// One path per body, indexed like the body collection.
pub struct Trails {
    paths: Vec<VecDeque<DVec2>>,
    max_length: usize,
    enabled: bool,
}

impl Trails {
    pub fn new(max_length: usize) -> Self {
        Self {
            paths: Vec::new(),
            max_length,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.enabled);
    }

    /// Forget every path; the body collection was replaced.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Append each body's current position to its path.
    pub fn record(&mut self, bodies: &[Body]) {
        if !self.enabled || self.max_length == 0 {
            return;
        }

        self.paths.resize_with(bodies.len(), VecDeque::new);
        for (path, body) in self.paths.iter_mut().zip(bodies) {
            if path.len() == self.max_length {
                path.pop_front();
            }
            path.push_back(body.position);
        }
    }

    pub fn point_count(&self) -> usize {
        self.paths.iter().map(VecDeque::len).sum()
    }

    /// Every stored point with its age: 0 for the oldest, 1 for the newest.
    pub fn points(&self) -> impl Iterator<Item = (DVec2, f32)> + '_ {
        self.paths.iter().flat_map(|path| {
            let last = path.len().saturating_sub(1).max(1) as f32;
            path.iter()
                .enumerate()
                .map(move |(i, &point)| (point, i as f32 / last))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(count: usize, x: f64) -> Vec<Body> {
        (0..count)
            .map(|i| Body::at_rest(DVec2::new(x, i as f64), 1.0))
            .collect()
    }

    #[test]
    fn disabled_trails_record_nothing() {
        let mut trails = Trails::new(10);
        trails.record(&line(3, 0.0));
        assert_eq!(trails.point_count(), 0);
    }

    #[test]
    fn paths_are_capped_and_keep_the_newest() {
        let mut trails = Trails::new(4);
        trails.set_enabled(true);
        for step in 0..10 {
            trails.record(&line(2, step as f64));
        }

        assert_eq!(trails.point_count(), 8);
        let newest: Vec<_> = trails.points().filter(|(_, age)| *age == 1.0).collect();
        assert_eq!(newest.len(), 2);
        assert!(newest.iter().all(|(p, _)| p.x == 9.0));
    }

    #[test]
    fn paths_follow_the_body_count() {
        let mut trails = Trails::new(5);
        trails.set_enabled(true);
        trails.record(&line(2, 0.0));
        trails.record(&line(3, 1.0));
        assert_eq!(trails.point_count(), 5);

        trails.record(&line(1, 2.0));
        assert_eq!(trails.point_count(), 3);
    }

    #[test]
    fn disabling_clears_paths() {
        let mut trails = Trails::new(5);
        trails.toggle();
        trails.record(&line(3, 0.0));
        trails.toggle();
        assert!(!trails.is_enabled());
        assert_eq!(trails.point_count(), 0);
    }
}
