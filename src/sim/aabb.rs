//! Axis-aligned bounding boxes for the broad phase
//!
//! A box is stored as min/max corners. It can be converted to and from the
//! center + half-extent form the renderer uses for drawing outlines.

use std::ops::Add;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_HALF_SIZE;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from two corners (swapped corners are normalized)
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build a box from its center and half extents
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box centered on the origin, `[-half, +half]`
    #[inline]
    pub fn symmetric(half: Vec2) -> Self {
        Self::from_center_half_extents(Vec2::ZERO, half)
    }

    /// Tightest box around a set of points (`None` when there are none)
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Center and half extents as a `(position, size)` pair
    #[inline]
    pub fn position_size(&self) -> (Vec2, Vec2) {
        (self.center(), self.half_extents())
    }

    /// The same box shifted by `offset`
    #[inline]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Overlap test with inclusive bounds on both axes
    #[inline]
    pub fn intersect(a: &Aabb, b: &Aabb) -> bool {
        a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        Self::intersect(self, other)
    }

    /// True if `other` lies entirely inside this box (inclusive)
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    /// Offsets at which a wrapped copy of this box overlaps the play-field.
    ///
    /// Always starts with `Vec2::ZERO`. A box poking out of the right edge also
    /// yields `(-2, 0)`, one poking out of the top yields `(0, -2)`, and a box
    /// poking out of both gets the diagonal copy as well.
    pub fn seam_offsets(&self) -> Vec<Vec2> {
        let span = 2.0 * WORLD_HALF_SIZE;
        let xs = axis_offsets(self.min.x, self.max.x, span);
        let ys = axis_offsets(self.min.y, self.max.y, span);

        let mut offsets = Vec::with_capacity(4);
        offsets.push(Vec2::ZERO);
        for &x in &xs {
            offsets.push(Vec2::new(x, 0.0));
        }
        for &y in &ys {
            offsets.push(Vec2::new(0.0, y));
            for &x in &xs {
                offsets.push(Vec2::new(x, y));
            }
        }
        offsets
    }
}

fn axis_offsets(min: f32, max: f32, span: f32) -> Vec<f32> {
    let mut out = Vec::new();
    if max > WORLD_HALF_SIZE {
        out.push(-span);
    }
    if min < -WORLD_HALF_SIZE {
        out.push(span);
    }
    out
}

impl Add<Vec2> for Aabb {
    type Output = Aabb;

    fn add(self, offset: Vec2) -> Aabb {
        self.translate(offset)
    }
}
