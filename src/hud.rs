//! Values the HUD shows, read off a session.

use crate::constants::{CORES_NEEDED, FPS, TOTAL_LEVELS};
use crate::entities::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    /// Whole units only.
    pub ammo: u32,
    pub cores: u32,
    pub cores_needed: u32,
    pub level: u32,
    pub total_levels: u32,
    /// Whole seconds left, only while the buff is active.
    pub shield_secs: Option<u32>,
    pub multishot_secs: Option<u32>,
    pub swirling: bool,
}

pub fn hud(session: &Session) -> Hud {
    let p = &session.player;
    let fx = &p.effects;
    Hud {
        health: p.health,
        max_health: p.max_health,
        ammo: p.ammo.floor() as u32,
        cores: session.cores_collected,
        cores_needed: CORES_NEEDED,
        level: session.level_index,
        total_levels: TOTAL_LEVELS,
        shield_secs: fx.shield_active.then_some(fx.shield_timer / FPS),
        multishot_secs: fx.multishot_active.then_some(fx.multishot_timer / FPS),
        swirling: fx.swirling,
    }
}
