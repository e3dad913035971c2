//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (rocks in insertion order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod error;
pub mod generator;
pub mod polygon;
pub mod rng;
pub mod state;
pub mod tick;
pub mod transform;

pub use aabb::Aabb;
pub use collision::{bodies_collide, polygons_intersect, segments_intersect};
pub use error::{SimError, SimResult};
pub use generator::RockGenerator;
pub use polygon::Polygon;
pub use rng::VecGen;
pub use state::{Body, GameEvent, GamePhase, GameState, Projectile, Rock, Ship, Split};
pub use tick::{TickInput, tick};
pub use transform::Transform;
