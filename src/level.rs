//! Random level generation.
//!
//! A level is a walled grid with a random start tile, the interior tile
//! farthest from it as the door, short random wall segments, and spawn
//! tiles sampled without replacement from whatever floor is left.
//!
//! Walls are placed without checking that the door stays reachable. Callers
//! that need that guarantee use [`generate_connected`], which retries until a
//! 4-neighbour path exists.

use std::collections::VecDeque;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::{CORES_NEEDED, GRID_HEIGHT, GRID_WIDTH, MAX_GENERATION_ATTEMPTS};
use crate::entities::{Cell, Grid, Level, TilePos};

// ── Scaling tables ────────────────────────────────────────────────────────────

pub fn wall_segments_for(level_index: u32) -> usize {
    15 + 2 * level_index as usize
}

pub fn enemies_for(level_index: u32) -> usize {
    2 + level_index as usize
}

pub fn crates_for(level_index: u32) -> usize {
    5 + 2 * level_index as usize
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Generate a standard-size level. `level_index` is 1-based.
pub fn generate(level_index: u32, rng: &mut impl Rng) -> Level {
    generate_sized(GRID_WIDTH, GRID_HEIGHT, level_index, rng)
}

/// Generate on an arbitrary grid. Dimensions are raised to at least 4×3 so
/// there are always two interior tiles for the start and the door.
pub fn generate_sized(width: usize, height: usize, level_index: u32, rng: &mut impl Rng) -> Level {
    let width = width.max(4);
    let height = height.max(3);
    let mut grid = Grid::bordered(width, height);

    let mut candidates: Vec<TilePos> = (1..height as i32 - 1)
        .flat_map(|y| (1..width as i32 - 1).map(move |x| TilePos::new(x, y)))
        .collect();

    let start = candidates.remove(rng.gen_range(0..candidates.len()));
    let door = farthest_from(start, &candidates)
        .unwrap_or(TilePos::new(width as i32 - 2, height as i32 - 2));
    candidates.retain(|&t| t != door);
    grid.set(start, Cell::Floor);
    grid.set(door, Cell::Floor);

    for _ in 0..wall_segments_for(level_index) {
        carve_segment(&mut grid, start, door, rng);
    }

    let mut pool: Vec<TilePos> = candidates.into_iter().filter(|&t| grid.is_floor(t)).collect();

    let enemy_spawns = sample_spawns(&mut pool, enemies_for(level_index), rng);
    let crate_spawns = sample_spawns(&mut pool, crates_for(level_index), rng);
    let core_spawns = sample_spawns(&mut pool, CORES_NEEDED as usize, rng);

    debug!(
        level_index,
        ?start,
        ?door,
        enemies = enemy_spawns.len(),
        crates = crate_spawns.len(),
        cores = core_spawns.len(),
        "generated level"
    );

    Level {
        grid,
        start,
        door,
        enemy_spawns,
        crate_spawns,
        core_spawns,
    }
}

/// Like [`generate`], but regenerates until the door is reachable from the
/// start. After `MAX_GENERATION_ATTEMPTS` the last attempt is kept anyway.
pub fn generate_connected(level_index: u32, rng: &mut impl Rng) -> Level {
    let mut level = generate(level_index, rng);
    for attempt in 1..MAX_GENERATION_ATTEMPTS {
        if is_reachable(&level.grid, level.start, level.door) {
            return level;
        }
        debug!(level_index, attempt, "door unreachable, regenerating");
        level = generate(level_index, rng);
    }
    if !is_reachable(&level.grid, level.start, level.door) {
        warn!(
            level_index,
            attempts = MAX_GENERATION_ATTEMPTS,
            "no connected layout found, keeping last attempt"
        );
    }
    level
}

/// Euclidean-farthest candidate; ties go to the first in scan order.
fn farthest_from(origin: TilePos, candidates: &[TilePos]) -> Option<TilePos> {
    let dist = |t: &TilePos| {
        let dx = (t.x - origin.x) as f32;
        let dy = (t.y - origin.y) as f32;
        dx.hypot(dy)
    };
    candidates
        .iter()
        .fold(None, |best: Option<TilePos>, t| match best {
            Some(b) if dist(&b) >= dist(t) => Some(b),
            _ => Some(*t),
        })
}

/// One straight wall run of 2–4 tiles from a random interior anchor.
fn carve_segment(grid: &mut Grid, start: TilePos, door: TilePos, rng: &mut impl Rng) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    // Anchors stay one tile clear of the border ring.
    if w - 3 < 2 || h - 3 < 2 {
        return;
    }
    let anchor = TilePos::new(rng.gen_range(2..=w - 3), rng.gen_range(2..=h - 3));
    if anchor == start || anchor == door {
        return;
    }

    let horizontal = rng.gen_bool(0.5);
    let len = rng.gen_range(2..=4);
    for step in 0..len {
        let t = if horizontal {
            TilePos::new(anchor.x + step, anchor.y)
        } else {
            TilePos::new(anchor.x, anchor.y + step)
        };
        if grid.is_border(t) || !grid.in_bounds(t) || t == start || t == door {
            continue;
        }
        grid.set(t, Cell::Wall);
    }
}

/// Draw up to `count` tiles from `pool` (removing them) as world-space centres.
fn sample_spawns(pool: &mut Vec<TilePos>, count: usize, rng: &mut impl Rng) -> Vec<Vec2> {
    let mut spawns = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&tile) = pool.choose(rng) else {
            debug!(wanted = count, got = spawns.len(), "spawn pool exhausted");
            break;
        };
        pool.retain(|&t| t != tile);
        spawns.push(tile.center());
    }
    spawns
}

// ── Connectivity ──────────────────────────────────────────────────────────────

/// Breadth-first search over 4-connected floor tiles.
pub fn is_reachable(grid: &Grid, from: TilePos, to: TilePos) -> bool {
    if !grid.is_floor(from) || !grid.is_floor(to) {
        return false;
    }
    let mut seen = vec![false; grid.width() * grid.height()];
    let idx = |t: TilePos| t.y as usize * grid.width() + t.x as usize;
    let mut queue = VecDeque::from([from]);
    seen[idx(from)] = true;

    while let Some(t) = queue.pop_front() {
        if t == to {
            return true;
        }
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let n = TilePos::new(t.x + dx, t.y + dy);
            if grid.is_floor(n) && !seen[idx(n)] {
                seen[idx(n)] = true;
                queue.push_back(n);
            }
        }
    }
    false
}
