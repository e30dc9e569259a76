//! Decoded per-frame input. Device polling lives in the frontend.

use glam::Vec2;

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Aim point when no pointer is reported: the middle of the play field.
pub const AIM_POINT: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Primary trigger. With no movement key held it also walks toward
    /// `pointer`.
    pub fire: bool,
    /// Held activation for the swirl-shield.
    pub swirl: bool,
    /// Pointer in world coordinates.
    pub pointer: Vec2,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            fire: false,
            swirl: false,
            pointer: AIM_POINT,
        }
    }
}

impl FrameInput {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}
