//! Frame geometry for an external renderer
//!
//! Turns the simulation into a flat line list. Nothing here touches a GPU
//! API; the bytes from [`as_bytes`] can be uploaded as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use crate::sim::state::GameState;

/// Line-list vertices for every live entity in the current tick
pub fn frame_vertices(state: &GameState, draw_bounds: bool) -> Vec<Vertex> {
    let bounds = draw_bounds.then_some(colors::BOUNDS);
    let mut vertices = Vec::new();

    for rock in &state.rocks {
        vertices.extend(shapes::body_lines(rock, colors::ROCK, bounds));
    }
    for projectile in &state.projectiles {
        vertices.extend(shapes::body_lines(projectile, colors::PROJECTILE, bounds));
    }

    let ship_color = if state.is_invincible() {
        colors::SHIP_INVINCIBLE
    } else {
        colors::SHIP
    };
    vertices.extend(shapes::body_lines(&state.ship, ship_color, bounds));

    vertices
}

/// Raw vertex bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
