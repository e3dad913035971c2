//! Line-list geometry for outlines and boxes
//!
//! Every pair of consecutive vertices in the output is one segment.

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::aabb::Aabb;
use crate::sim::collision::closed_edges;
use crate::sim::state::Body;

/// Closed outline as line-list segments
pub fn line_loop(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 2);
    if points.len() < 2 {
        return vertices;
    }
    for (a, b) in closed_edges(points) {
        vertices.push(Vertex::at(a, color));
        vertices.push(Vertex::at(b, color));
    }
    vertices
}

/// The four edges of a box
pub fn aabb_outline(aabb: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        aabb.min,
        Vec2::new(aabb.max.x, aabb.min.y),
        aabb.max,
        Vec2::new(aabb.min.x, aabb.max.y),
    ];
    line_loop(&corners, color)
}

/// A body's outline, repeated at every wrapped copy that shows on the field
pub fn body_lines<B: Body + ?Sized>(body: &B, color: [f32; 4], bounds: Option<[f32; 4]>) -> Vec<Vertex> {
    let outline = body.polygon_srt();
    let bbox = body.bounding_box();
    let mut vertices = Vec::new();

    for offset in bbox.seam_offsets() {
        let shifted: Vec<Vec2> = outline.iter().map(|v| *v + offset).collect();
        vertices.extend(line_loop(&shifted, color));
        if let Some(bounds_color) = bounds {
            vertices.extend(aabb_outline(&bbox.translate(offset), bounds_color));
        }
    }

    vertices
}
