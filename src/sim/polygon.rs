//! Model-space polygon outlines
//!
//! A polygon is an ordered, implicitly closed vertex list in local space.
//! It knows nothing about where its owner sits in the world; see
//! [`super::transform::Transform`] for that.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{closed_edges, segments_intersect};
use super::error::{SimError, SimResult};
use crate::consts::MIN_POLYGON_VERTICES;
use crate::polar_to_cartesian;

/// A closed outline in model space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Build a polygon from at least three vertices
    pub fn new(vertices: Vec<Vec2>) -> SimResult<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(SimError::InsufficientVertices {
                got: vertices.len(),
                required: MIN_POLYGON_VERTICES,
            });
        }
        Ok(Self { vertices })
    }

    /// Internal constructor for vertex lists known to be long enough
    pub(crate) fn from_vertices(vertices: Vec<Vec2>) -> Self {
        debug_assert!(vertices.len() >= MIN_POLYGON_VERTICES);
        Self { vertices }
    }

    /// Regular n-gon (n clamped to at least 3), first vertex on +x
    pub fn regular(sides: usize, radius: f32) -> Self {
        let sides = sides.max(MIN_POLYGON_VERTICES);
        let radius = radius.max(0.0);
        let step = std::f32::consts::TAU / sides as f32;
        Self::from_vertices(
            (0..sides)
                .map(|i| polar_to_cartesian(radius, i as f32 * step))
                .collect(),
        )
    }

    /// Ship hull: nose on +x
    pub fn ship() -> Self {
        Self::from_vertices(vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, -0.5),
            Vec2::new(-1.0, 0.5),
        ])
    }

    /// Projectile body: the [-1, 1]² square
    pub fn projectile() -> Self {
        Self::from_vertices(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive vertex pairs, closing last-to-first
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        closed_edges(&self.vertices)
    }

    /// Enclosed area (shoelace formula, always non-negative)
    pub fn area(&self) -> f32 {
        let twice: f32 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice.abs() / 2.0
    }

    /// True if no two non-adjacent edges cross.
    ///
    /// Uses the same crossing predicate as the narrow phase, so collinear
    /// touches are not counted.
    pub fn is_simple(&self) -> bool {
        let edges: Vec<_> = self.edges().collect();
        let n = edges.len();
        for i in 0..n {
            for j in (i + 2)..n {
                // First and last edges share vertex 0
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a1, a2) = edges[i];
                let (b1, b2) = edges[j];
                if segments_intersect(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }
}
