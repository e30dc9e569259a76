//! Fog of war.
//!
//! Floors light up anywhere inside `AGGRO_RANGE` of the player; walls only
//! show within `WALL_REVEAL_RANGE`, so the maze outline is discovered up
//! close while open floor is seen from afar.

use std::collections::HashSet;

use glam::Vec2;

use crate::constants::{AGGRO_RANGE, LIGHT_RADIUS, WALL_REVEAL_RANGE};
use crate::entities::{Cell, Grid, TilePos};

pub fn visible_tiles(center: Vec2, grid: &Grid) -> HashSet<TilePos> {
    grid.tiles()
        .filter(|&t| {
            let dist = t.center().distance(center);
            match grid.cell(t) {
                Some(Cell::Floor) => dist < AGGRO_RANGE,
                Some(Cell::Wall) => dist < WALL_REVEAL_RANGE,
                None => false,
            }
        })
        .collect()
}

/// Brightness rings around the light source, used for shading only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LightBand {
    Bright,
    Mid,
    Dim,
    Dark,
}

pub fn light_band(center: Vec2, p: Vec2) -> LightBand {
    let dist = center.distance(p);
    if dist < LIGHT_RADIUS * 0.3 {
        LightBand::Bright
    } else if dist < LIGHT_RADIUS * 0.7 {
        LightBand::Mid
    } else if dist < LIGHT_RADIUS {
        LightBand::Dim
    } else {
        LightBand::Dark
    }
}
