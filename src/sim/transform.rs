//! Scale-rotate-translate placement of model-space outlines
//!
//! `world = rotate(local) * scale + translation`. Ships and projectiles get a
//! fresh rotation from their heading each tick; rocks keep the identity.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::polygon::Polygon;
use crate::{direction_matrix, rotate};

/// Placement of a body in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World-space center
    pub position: Vec2,
    /// Per-axis scale applied after rotation
    pub scale: Vec2,
    pub rotation: Mat2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: Mat2::IDENTITY,
        }
    }
}

impl Transform {
    /// Unrotated transform with negative scale clamped to zero
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            scale: scale.max(Vec2::ZERO),
            rotation: Mat2::IDENTITY,
        }
    }

    /// Uniform scale shorthand
    pub fn uniform(position: Vec2, scale: f32) -> Self {
        Self::new(position, Vec2::splat(scale))
    }

    /// Point the body along `dir`
    pub fn face(&mut self, dir: Vec2) {
        self.rotation = direction_matrix(dir);
    }

    /// Rotate and scale a model-space point, without translating it
    #[inline]
    pub fn apply_local(&self, v: Vec2) -> Vec2 {
        rotate(v, self.rotation) * self.scale
    }

    /// Full SRT of a single point
    #[inline]
    pub fn apply(&self, v: Vec2) -> Vec2 {
        self.apply_local(v) + self.position
    }

    /// World-space outline of `polygon`
    pub fn apply_polygon(&self, polygon: &Polygon) -> Vec<Vec2> {
        polygon.vertices().iter().map(|v| self.apply(*v)).collect()
    }

    /// Symmetric box around the origin covering the rotated, scaled outline.
    ///
    /// Translate it by `position` to get the world box. It has to be rebuilt
    /// whenever scale or rotation changes.
    pub fn local_bounds(&self, polygon: &Polygon) -> Aabb {
        let extent = polygon
            .vertices()
            .iter()
            .map(|v| self.apply_local(*v).abs())
            .fold(Vec2::ZERO, Vec2::max);
        Aabb::symmetric(extent)
    }
}
