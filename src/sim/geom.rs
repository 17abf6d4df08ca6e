//! Vector and geometry helpers
//!
//! Screen-space conventions: origin at the top-left, +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector from `from` toward `to`, or `None` if the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Box proximity test: both absolute coordinate deltas strictly below `reach`
#[inline]
pub fn within_reach(a: Vec2, b: Vec2, reach: Reach) -> bool {
    (a.x - b.x).abs() < reach.dx && (a.y - b.y).abs() < reach.dy
}

/// Half-extents of an axis-aligned proximity box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reach {
    pub dx: f32,
    pub dy: f32,
}

impl Reach {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal-only reach (any vertical separation counts)
    pub const fn horizontal(dx: f32) -> Self {
        Self { dx, dy: f32::INFINITY }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Point-in-rect test (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Closest point on (or in) the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }

    /// Distance from `p` to the nearer vertical edge and the nearer horizontal edge
    ///
    /// The smaller of the two tells which face a circle came through.
    pub fn edge_offsets(&self, p: Vec2) -> (f32, f32) {
        let off_x = (p.x - self.x).abs().min((p.x - self.right()).abs());
        let off_y = (p.y - self.y).abs().min((p.y - self.bottom()).abs());
        (off_x, off_y)
    }
}

/// Circle-vs-rectangle intersection (touching counts)
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    distance(center, rect.closest_point(center)) <= radius
}

/// Point-in-circle test (boundary inclusive)
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    (p - center).length_squared() <= radius * radius
}

/// Playfield bounds, passed explicitly to everything that needs walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies on or inside the playfield edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}
