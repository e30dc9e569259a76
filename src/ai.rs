//! Sentinel behaviour: walk straight at the player when close enough.
//! No pathfinding; walls simply block them.

use glam::Vec2;

use crate::constants::{AGGRO_RANGE, SENTINEL_SPEED};
use crate::entities::{Grid, Sentinel};
use crate::physics;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentinelState {
    Idle,
    Pursuing,
}

/// Recomputed from scratch each frame, no hysteresis.
pub fn sentinel_state(sentinel: Vec2, player: Vec2) -> SentinelState {
    if sentinel.distance(player) < AGGRO_RANGE {
        SentinelState::Pursuing
    } else {
        SentinelState::Idle
    }
}

pub fn advance_sentinel(sentinel: &mut Sentinel, player: Vec2, grid: &Grid) -> SentinelState {
    let state = sentinel_state(sentinel.pos, player);
    if state == SentinelState::Pursuing {
        let to_player = player - sentinel.pos;
        let angle = to_player.y.atan2(to_player.x);
        let step = Vec2::new(angle.cos(), angle.sin()) * SENTINEL_SPEED;
        sentinel.pos = physics::slide_point(grid, sentinel.pos, step);
    }
    state
}
