//! Rocksplit - a toroidal rock-splitting arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, rock generation, collisions, game state)
//! - `renderer`: Line vertices derived from the simulation for an external renderer
//! - `settings`: Data-driven tuning loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{SimError, SimResult};

use glam::{Mat2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (15 ms frames)
    pub const SIM_DT: f32 = 0.015;

    /// Play-field is the square [-WORLD_HALF_SIZE, WORLD_HALF_SIZE]²
    pub const WORLD_HALF_SIZE: f32 = 1.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 0.04;
    pub const SHIP_SPEED: f32 = 0.5;
    /// Turn rate in revolutions per second
    pub const SHIP_ROTATION_RPS: f32 = 0.8;
    pub const SHIP_FIRE_COOLDOWN: f32 = 0.25;
    /// Seconds of invincibility after spawn
    pub const GRACE_PERIOD: f32 = 3.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 1.5;
    pub const PROJECTILE_LIFE_TIME: f32 = 0.6;
    pub const PROJECTILE_SIZE: [f32; 2] = [0.012, 0.004];

    /// Rock defaults
    pub const INITIAL_ROCKS: usize = 6;
    pub const ROCK_VERTICES: usize = 10;
    pub const ROCK_MAX_SPEED: f32 = 0.15;
    /// Rocks never have fewer vertices than this
    pub const MIN_ROCK_VERTICES: usize = 4;
    /// Generic polygons never have fewer vertices than this
    pub const MIN_POLYGON_VERTICES: usize = 3;
}

/// Wrap a position toroidally around the play-field.
///
/// `half_extent` is the body's half size: the body is only moved once it is
/// entirely outside the field, and it reappears just outside the opposite edge.
#[inline]
pub fn wrap_around(position: Vec2, half_extent: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, half_extent.x),
        wrap_axis(position.y, half_extent.y),
    )
}

#[inline]
fn wrap_axis(p: f32, h: f32) -> f32 {
    use consts::WORLD_HALF_SIZE as W;
    let span = 2.0 * W + 2.0 * h;
    if p > W + h {
        p - span
    } else if p < -W - h {
        p + span
    } else {
        p
    }
}

/// Rotation matrix for a heading vector.
///
/// Holds `[cos a, -sin a, sin a, cos a]` with `a = -atan2(dir.y, dir.x)`,
/// laid out column-major, so model-space +x lands on `dir`.
/// A zero heading gives the identity.
#[inline]
pub fn direction_matrix(dir: Vec2) -> Mat2 {
    if dir == Vec2::ZERO {
        return Mat2::IDENTITY;
    }
    let angle = -dir.y.atan2(dir.x);
    let (s, c) = angle.sin_cos();
    Mat2::from_cols_array(&[c, -s, s, c])
}

/// Rotate a vector by a 2x2 matrix.
///
/// `m` is column-major (glam's layout), so the `[cos a, -sin a, sin a, cos a]`
/// built by [`direction_matrix`] is the transpose of a row-major reading.
/// The layout is intentional: a row-major reading mirrors the ship hull.
#[inline]
pub fn rotate(v: Vec2, m: Mat2) -> Vec2 {
    m * v
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
