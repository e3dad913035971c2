//! Procedural rock outlines
//!
//! Each vertex is drawn as an `(r, t)` pair: `r` becomes the radius and `t`
//! the fraction of a turn. Sorting by `t` makes the outline star-shaped
//! around the origin, so it never self-intersects. The first four samples are
//! pinned into one quarter turn each so the rock always surrounds the origin.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use super::rng::VecGen;
use crate::consts::MIN_ROCK_VERTICES;
use crate::polar_to_cartesian;

/// Shape parameters for generated rocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockGenerator {
    /// Mean vertex radius
    pub radius_base: f32,
    /// Radius varies by ± this much
    pub radius_jitter: f32,
    /// Fraction of a full turn the vertices spread over
    pub angular_span: f32,
}

impl Default for RockGenerator {
    fn default() -> Self {
        Self {
            radius_base: 0.7,
            radius_jitter: 0.3,
            // Slightly under one turn so the last vertex never lands on the first
            angular_span: 0.99,
        }
    }
}

impl RockGenerator {
    /// Clamp parameters so radii stay positive and the span stays within a turn
    pub fn sanitized(mut self) -> Self {
        self.radius_base = self.radius_base.max(0.0);
        self.radius_jitter = self.radius_jitter.clamp(0.0, self.radius_base);
        self.angular_span = self.angular_span.clamp(0.0, 1.0);
        self
    }

    /// Generate a rock outline with `vertex_count` vertices (at least 4)
    pub fn generate(&self, rng: &mut VecGen, vertex_count: usize) -> Polygon {
        let n = vertex_count.max(MIN_ROCK_VERTICES);

        // (r, t) with r in [-1, 1] and t remapped to [0, 1]
        let mut samples: Vec<(f32, f32)> = (0..n)
            .map(|_| {
                let v = rng.get();
                (v.x, (v.y + 1.0) * 0.5)
            })
            .collect();

        // One vertex per quarter turn
        for (i, sample) in samples.iter_mut().take(4).enumerate() {
            sample.1 = sample.1 * 0.25 + i as f32 * 0.25;
        }

        samples.sort_by(|a, b| a.1.total_cmp(&b.1));

        let vertices: Vec<Vec2> = samples
            .into_iter()
            .map(|(r, t)| {
                let radius = r * self.radius_jitter + self.radius_base;
                let angle = t * TAU * self.angular_span;
                polar_to_cartesian(radius, angle)
            })
            .collect();

        Polygon::from_vertices(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn angle_of(v: Vec2) -> f32 {
        let a = v.y.atan2(v.x);
        if a < 0.0 { a + TAU } else { a }
    }

    #[test]
    fn test_vertex_count_clamped() {
        let generator = RockGenerator::default();
        let mut rng = VecGen::new(3);
        assert_eq!(generator.generate(&mut rng, 0).len(), 4);
        assert_eq!(generator.generate(&mut rng, 3).len(), 4);
        assert_eq!(generator.generate(&mut rng, 10).len(), 10);
    }

    #[test]
    fn test_radii_within_bounds() {
        let generator = RockGenerator::default();
        let mut rng = VecGen::new(11);
        for _ in 0..50 {
            let rock = generator.generate(&mut rng, 10);
            for v in rock.vertices() {
                let r = v.length();
                assert!((0.4 - 1e-5..=1.0 + 1e-5).contains(&r), "radius {r}");
            }
        }
    }

    #[test]
    fn test_every_quarter_band_covered() {
        let generator = RockGenerator::default();
        let quarter = TAU * generator.angular_span / 4.0;
        let mut rng = VecGen::new(5);
        for _ in 0..50 {
            let rock = generator.generate(&mut rng, 4);
            let mut quadrants = [false; 4];
            for v in rock.vertices() {
                let q = ((angle_of(*v) / quarter) as usize).min(3);
                quadrants[q] = true;
            }
            assert!(quadrants.iter().all(|q| *q), "{:?}", rock.vertices());
        }
    }

    #[test]
    fn test_angles_increase() {
        let generator = RockGenerator::default();
        let mut rng = VecGen::new(9);
        let rock = generator.generate(&mut rng, 12);
        let angles: Vec<f32> = rock.vertices().iter().map(|v| angle_of(*v)).collect();
        for pair in angles.windows(2) {
            assert!(pair[0] <= pair[1] + 1e-5, "{angles:?}");
        }
    }

    #[test]
    fn test_sanitized() {
        let g = RockGenerator {
            radius_base: 0.5,
            radius_jitter: 2.0,
            angular_span: 3.0,
        }
        .sanitized();
        assert_eq!(g.radius_jitter, 0.5);
        assert_eq!(g.angular_span, 1.0);
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_rock(seed in any::<u64>(), n in 4usize..16) {
            let generator = RockGenerator::default();
            let a = generator.generate(&mut VecGen::new(seed), n);
            let b = generator.generate(&mut VecGen::new(seed), n);
            prop_assert_eq!(a.vertices(), b.vertices());
        }

        #[test]
        fn prop_generated_rocks_are_simple(seed in any::<u64>(), n in 4usize..12) {
            let rock = RockGenerator::default().generate(&mut VecGen::new(seed), n);
            prop_assert!(rock.is_simple(), "self-intersecting: {:?}", rock.vertices());
            prop_assert!(rock.area() > 0.0);
        }
    }
}
