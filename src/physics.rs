//! Overlap tests and tile collision.
//!
//! Moving entities resolve collisions one axis at a time: apply the x delta,
//! probe the grid, undo it if blocked, then the same for y. A body pushed
//! diagonally into a straight wall therefore keeps sliding along it.

use glam::Vec2;

use crate::entities::{Grid, TilePos};

/// Axis-aligned box. Edges are exclusive: boxes that merely touch do not
/// overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn square(center: Vec2, side: f32) -> Self {
        Self { center, half: Vec2::splat(side / 2.0) }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { center: min + size / 2.0, half: size / 2.0 }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a0, a1) = (self.min(), self.max());
        let (b0, b1) = (other.min(), other.max());
        a0.x < b1.x && b0.x < a1.x && a0.y < b1.y && b0.y < a1.y
    }

    /// Midpoints of the top, bottom, left and right edges.
    pub fn edge_midpoints(&self) -> [Vec2; 4] {
        let c = self.center;
        let h = self.half;
        [
            Vec2::new(c.x, c.y - h.y),
            Vec2::new(c.x, c.y + h.y),
            Vec2::new(c.x - h.x, c.y),
            Vec2::new(c.x + h.x, c.y),
        ]
    }
}

pub fn circle_overlaps_aabb(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let nearest = center.clamp(aabb.min(), aabb.max());
    center.distance_squared(nearest) < radius * radius
}

// ── Grid probes ───────────────────────────────────────────────────────────────

/// True if the point sits in a wall tile. Points outside the grid never block.
pub fn point_in_wall(grid: &Grid, p: Vec2) -> bool {
    grid.is_wall(TilePos::from_world(p))
}

/// Samples the four edge midpoints of `bounds` against the grid.
pub fn box_in_wall(grid: &Grid, bounds: &Aabb) -> bool {
    bounds.edge_midpoints().iter().any(|&p| point_in_wall(grid, p))
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Move `pos` by `delta`, one axis at a time, reverting any axis whose new
/// position `blocked` rejects.
pub fn slide<F>(grid: &Grid, pos: Vec2, delta: Vec2, blocked: F) -> Vec2
where
    F: Fn(&Grid, Vec2) -> bool,
{
    let mut next = pos;

    next.x += delta.x;
    if blocked(grid, next) {
        next.x -= delta.x;
    }

    next.y += delta.y;
    if blocked(grid, next) {
        next.y -= delta.y;
    }

    next
}

/// Slide a square body of side `size`, probing its edge midpoints.
pub fn slide_box(grid: &Grid, pos: Vec2, delta: Vec2, size: f32) -> Vec2 {
    slide(grid, pos, delta, |g, p| box_in_wall(g, &Aabb::square(p, size)))
}

/// Slide a body that only probes its centre point.
pub fn slide_point(grid: &Grid, pos: Vec2, delta: Vec2) -> Vec2 {
    slide(grid, pos, delta, point_in_wall)
}
