//! Audio collaborator.
//!
//! There is no sound device in the terminal build: cues are traced so a run
//! can be replayed from the log. The simulation never waits on this module
//! and nothing here can fail.

use cellular_scape::entities::{FrameEvent, KillCause};
use tracing::trace;

#[derive(Debug, Default)]
pub struct Audio {
    /// Whether the swirl loop is currently "playing".
    swirl_loop: bool,
}

impl Audio {
    /// Emit one cue per event, then start or stop the swirl loop so it
    /// follows the player's swirl flag.
    pub fn play(&mut self, events: &[FrameEvent], swirling: bool) {
        for event in events {
            trace!(cue = cue_for(event), "audio");
        }

        if swirling != self.swirl_loop {
            self.swirl_loop = swirling;
            let cue = if swirling { "swirl_loop_start" } else { "swirl_loop_stop" };
            trace!(cue, "audio");
        }
    }
}

fn cue_for(event: &FrameEvent) -> &'static str {
    match event {
        FrameEvent::Fired { .. } => "shoot",
        FrameEvent::SentinelDestroyed { cause: KillCause::Swirl, .. } => "swirl_kill",
        FrameEvent::SentinelDestroyed { .. } => "explosion",
        FrameEvent::PlayerHit { .. } => "player_hit",
        FrameEvent::CrateHit => "crate_hit",
        FrameEvent::CrateBroken { .. } => "crate_break",
        FrameEvent::PickupCollected(_) => "powerup",
        FrameEvent::CoreCollected { .. } => "core",
        FrameEvent::LevelAdvanced { .. } => "level_up",
        FrameEvent::GameOver => "game_over",
        FrameEvent::GameWon => "victory",
    }
}
