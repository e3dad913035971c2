//! Collision detection between polygon outlines
//!
//! Narrow phase is a pairwise edge-crossing test over two closed outlines.
//! Collinear and touching edges do not count as crossing, and an outline
//! sitting entirely inside another has no crossing edges, so it is reported
//! as a miss. Both limitations are kept on purpose: changing them changes
//! which grazing shots hit.

use glam::Vec2;

use super::aabb::Aabb;
use super::state::Body;

/// Orientation predicate: true if `a`, `b`, `c` turn counter-clockwise
#[inline]
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// True if segment `a1-a2` properly crosses segment `b1-b2`
#[inline]
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    ccw(a1, b1, b2) != ccw(a2, b1, b2) && ccw(a1, a2, b1) != ccw(a1, a2, b2)
}

/// Edges of a closed outline, including the last-to-first closing edge
pub fn closed_edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Exact overlap test for two world-space outlines.
///
/// O(n·m) segment checks; outlines here have at most a dozen vertices.
pub fn polygons_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    closed_edges(a).any(|(a1, a2)| closed_edges(b).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2)))
}

/// Broad phase then narrow phase between two bodies.
///
/// With `seams` set, the bodies are also tested at every pairing of their
/// wrapped copies, so whichever one straddles an edge hits what is drawn on
/// the other side of the field. The result is the same for `(a, b)` and
/// `(b, a)`.
pub fn bodies_collide<A, B>(a: &A, b: &B, seams: bool) -> bool
where
    A: Body + ?Sized,
    B: Body + ?Sized,
{
    let a_box = a.bounding_box();
    let b_box = b.bounding_box();

    let offsets = if seams {
        relative_offsets(&a_box, &b_box)
    } else {
        vec![Vec2::ZERO]
    };

    // Only pay for the SRT transform once a box overlaps
    let mut outlines: Option<(Vec<Vec2>, Vec<Vec2>)> = None;

    for offset in offsets {
        if !a_box.intersects(&b_box.translate(offset)) {
            continue;
        }
        let (a_poly, b_poly) = outlines.get_or_insert_with(|| (a.polygon_srt(), b.polygon_srt()));
        let shifted: Vec<Vec2> = b_poly.iter().map(|v| *v + offset).collect();
        if polygons_intersect(a_poly, &shifted) {
            return true;
        }
    }

    false
}

/// Shifts to apply to `b` so it meets each wrapped copy of `a` and of itself
fn relative_offsets(a_box: &Aabb, b_box: &Aabb) -> Vec<Vec2> {
    let b_offsets = b_box.seam_offsets();
    let mut offsets: Vec<Vec2> = Vec::with_capacity(b_offsets.len() * 2);
    for a_offset in a_box.seam_offsets() {
        for b_offset in &b_offsets {
            let offset = *b_offset - a_offset;
            if !offsets.contains(&offset) {
                offsets.push(offset);
            }
        }
    }
    offsets
}
