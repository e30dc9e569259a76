//! Game-state machine and the per-frame simulation pipeline.
//!
//! The public state transitions take an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and return a brand-new
//! `GameState`. Side effects are limited to the injected RNG and `tracing`
//! output. The helpers below `tick` work on a `&mut Session` owned by that
//! fresh copy.

use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::ai;
use crate::combat;
use crate::constants::{
    CORES_NEEDED, LEVEL_AMMO_BONUS, LEVEL_HEALTH_BONUS, MOVE_SPEED, PLAYER_SIZE,
    POINTER_DEAD_ZONE, TOTAL_LEVELS,
};
use crate::entities::{FrameEvent, GameState, GameStatus, Player, Session, StatusEffects};
use crate::fog;
use crate::input::FrameInput;
use crate::level;
use crate::loot;
use crate::particles::{self, GLOW};
use crate::physics;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh process state: the level-select menu with level 1 highlighted.
pub fn new_game(require_connected_levels: bool) -> GameState {
    GameState {
        status: GameStatus::Menu,
        selected_level: 1,
        session: None,
        require_connected_levels,
        events: Vec::new(),
    }
}

/// Generate level `level_index` and drop `player` on its start tile.
pub fn start_level(
    level_index: u32,
    player: Player,
    require_connected: bool,
    rng: &mut impl Rng,
) -> Session {
    let level = if require_connected {
        level::generate_connected(level_index, rng)
    } else {
        level::generate(level_index, rng)
    };
    let mut session = Session::new(level_index, level, player);
    session.visible_tiles = fog::visible_tiles(session.player.pos, session.grid());
    session
}

/// Health and ammo carry over with a bonus; buffs and swirl do not.
pub fn carry_over(player: &Player) -> Player {
    let mut next = Player {
        vel: Vec2::ZERO,
        cooldown: 0,
        effects: StatusEffects::default(),
        ..player.clone()
    };
    next.heal(LEVEL_HEALTH_BONUS);
    next.add_ammo(LEVEL_AMMO_BONUS);
    next
}

// ── Menu & lifecycle transitions (pure) ──────────────────────────────────────

pub fn menu_prev(state: &GameState) -> GameState {
    menu_select(state, state.selected_level.saturating_sub(1).max(1))
}

pub fn menu_next(state: &GameState) -> GameState {
    menu_select(state, (state.selected_level + 1).min(TOTAL_LEVELS))
}

/// Highlight `level` directly. Out-of-range picks and calls outside the menu
/// are ignored.
pub fn menu_select(state: &GameState, level: u32) -> GameState {
    if state.status != GameStatus::Menu || !(1..=TOTAL_LEVELS).contains(&level) {
        return state.clone();
    }
    GameState {
        selected_level: level,
        ..state.clone()
    }
}

/// Commit the highlighted level. Always a fresh player, whatever the level.
pub fn start_selected(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Menu {
        return state.clone();
    }
    let level_index = state.selected_level;
    let session = start_level(
        level_index,
        Player::new(Vec2::ZERO),
        state.require_connected_levels,
        rng,
    );
    info!(level = level_index, "run started");
    GameState {
        status: GameStatus::Playing,
        session: Some(session),
        events: Vec::new(),
        ..state.clone()
    }
}

/// Leave an end screen. The session is torn down and the menu resets.
pub fn acknowledge(state: &GameState) -> GameState {
    match state.status {
        GameStatus::GameOver | GameStatus::GameWin => GameState {
            status: GameStatus::Menu,
            selected_level: 1,
            session: None,
            events: Vec::new(),
            ..state.clone()
        },
        GameStatus::Menu | GameStatus::Playing => state.clone(),
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// How a frame of play ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    PlayerDied,
    /// Player stood in the door with enough cores.
    DoorReached,
}

/// Advance the simulation by one frame. Outside `Playing` this only clears
/// the previous frame's events.
pub fn tick(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let mut next = GameState {
        events: Vec::new(),
        ..state.clone()
    };
    if next.status != GameStatus::Playing {
        return next;
    }
    let Some(mut session) = next.session.take() else {
        return next;
    };

    let outcome = run_frame(&mut session, input, rng, &mut next.events);
    match outcome {
        FrameOutcome::Continue => {
            next.session = Some(session);
        }
        FrameOutcome::PlayerDied => {
            info!(
                level = session.level_index,
                frame = session.frame,
                "player destroyed"
            );
            next.events.push(FrameEvent::GameOver);
            next.status = GameStatus::GameOver;
            next.session = Some(session);
        }
        FrameOutcome::DoorReached if session.level_index >= TOTAL_LEVELS => {
            info!(frames = session.frame, "final door reached");
            next.events.push(FrameEvent::GameWon);
            next.status = GameStatus::GameWin;
            next.session = Some(session);
        }
        FrameOutcome::DoorReached => {
            let level_index = session.level_index + 1;
            let player = carry_over(&session.player);
            info!(
                level = level_index,
                frames = session.frame,
                health = player.health,
                ammo = player.ammo,
                "level advanced"
            );
            next.session = Some(start_level(
                level_index,
                player,
                next.require_connected_levels,
                rng,
            ));
            next.events.push(FrameEvent::LevelAdvanced { level: level_index });
        }
    }
    next
}

/// One frame of play in fixed order: input, swirl, targeting, firing,
/// movement, particles, contacts, projectile hits, cores, pickups, door,
/// visibility. A death stops the frame after the contact pass.
pub fn run_frame(
    session: &mut Session,
    input: &FrameInput,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) -> FrameOutcome {
    session.frame += 1;

    apply_input(&mut session.player, input);
    combat::set_swirl(&mut session.player, input.swirl);
    session.target = combat::nearest_target(session.player.pos, &session.sentinels);
    combat::try_fire(session, input.fire, rng, events);

    update_player(session, rng);
    let player_pos = session.player.pos;
    for sentinel in &mut session.sentinels {
        ai::advance_sentinel(sentinel, player_pos, &session.level.grid);
    }
    combat::advance_bullets(session, rng);
    particles::advance_all(&mut session.particles);

    if combat::resolve_player_contacts(session, rng, events) {
        return FrameOutcome::PlayerDied;
    }
    combat::resolve_projectile_hits(session, rng, events);
    loot::collect_cores(session, events);
    loot::collect_pickups(session, events);

    if door_open(session) && session.door.bounds().overlaps(&session.player.bounds()) {
        return FrameOutcome::DoorReached;
    }

    session.visible_tiles = fog::visible_tiles(session.player.pos, session.grid());
    FrameOutcome::Continue
}

pub fn door_open(session: &Session) -> bool {
    session.cores_collected >= CORES_NEEDED
}

// ── Player update helpers ────────────────────────────────────────────────────

/// Velocity, facing and gun angle from the frame's input. On each axis the
/// later key wins (right over left, down over up). With no key held, fire
/// walks toward the pointer unless it is inside the dead zone.
pub fn apply_input(player: &mut Player, input: &FrameInput) {
    let mut vel = Vec2::ZERO;
    if input.left {
        vel.x = -MOVE_SPEED;
    }
    if input.right {
        vel.x = MOVE_SPEED;
    }
    if input.up {
        vel.y = -MOVE_SPEED;
    }
    if input.down {
        vel.y = MOVE_SPEED;
    }

    let to_pointer = input.pointer - player.pos;
    if !input.any_direction() && input.fire && to_pointer.length() > POINTER_DEAD_ZONE {
        let angle = to_pointer.y.atan2(to_pointer.x);
        vel = Vec2::new(angle.cos(), angle.sin()) * MOVE_SPEED;
    }

    player.vel = vel;
    if vel != Vec2::ZERO {
        player.facing = vel.y.atan2(vel.x);
    }
    player.gun_angle = to_pointer.y.atan2(to_pointer.x);
}

/// Move with wall sliding, count down timers, run the swirl and leave a
/// glow trail.
pub fn update_player(session: &mut Session, rng: &mut impl Rng) {
    let player = &mut session.player;
    player.pos = physics::slide_box(&session.level.grid, player.pos, player.vel, PLAYER_SIZE);
    combat::tick_timers(player);
    combat::update_swirl(player);
    particles::maybe_emit(&mut session.particles, player.pos, GLOW, 0.2, rng);
}
