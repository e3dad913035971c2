//! Vertex types for 2D line rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    #[inline]
    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }
}

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    /// Ship during the grace period
    pub const SHIP_INVINCIBLE: [f32; 4] = [0.2, 0.8, 0.4, 0.4];
    pub const ROCK: [f32; 4] = [0.7, 0.7, 0.8, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BOUNDS: [f32; 4] = [1.0, 0.4, 0.2, 0.5];
}
