//! Axis-aligned rectangle geometry
//!
//! Everything in the play field collides as an AABB. Edges are inclusive:
//! two rectangles that merely touch are considered overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// The whole play field
pub const FIELD: Rect = Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    #[inline]
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether `self` fits inside `bounds` horizontally
    #[inline]
    pub fn within_x(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left() && self.right() <= bounds.right()
    }

    /// Whether `self` fits inside `bounds` vertically
    #[inline]
    pub fn within_y(&self, bounds: &Rect) -> bool {
        self.top() >= bounds.top() && self.bottom() <= bounds.bottom()
    }
}

/// True iff the rectangles intersect (touching edges count)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right()
        && b.left() <= a.right()
        && a.top() <= b.bottom()
        && b.top() <= a.bottom()
}

/// True iff `p` lies inside `r` or on its boundary
#[inline]
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
}

/// True iff `rect` overlaps any of `walls`
pub fn overlaps_any(rect: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| rects_overlap(rect, wall))
}
