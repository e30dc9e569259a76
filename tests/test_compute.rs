use cellular_scape::compute::*;
use cellular_scape::constants::*;
use cellular_scape::entities::*;
use cellular_scape::input::FrameInput;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn open_level() -> Level {
    Level {
        grid: Grid::bordered(GRID_WIDTH, GRID_HEIGHT),
        start: TilePos::new(5, 5),
        door: TilePos::new(17, 12),
        enemy_spawns: Vec::new(),
        crate_spawns: Vec::new(),
        core_spawns: Vec::new(),
    }
}

/// A `Playing` state on an empty open level.
fn make_state(level_index: u32) -> GameState {
    GameState {
        status: GameStatus::Playing,
        selected_level: level_index,
        session: Some(Session::new(level_index, open_level(), Player::new(Vec2::ZERO))),
        require_connected_levels: false,
        events: Vec::new(),
    }
}

fn session(state: &GameState) -> &Session {
    state.session.as_ref().expect("state has a session")
}

fn session_mut(state: &mut GameState) -> &mut Session {
    state.session.as_mut().expect("state has a session")
}

/// Player parked in the door with every core collected.
fn make_state_at_open_door(level_index: u32) -> GameState {
    let mut s = make_state(level_index);
    let sess = session_mut(&mut s);
    sess.cores_collected = CORES_NEEDED;
    sess.player.pos = sess.door.tile.center();
    s
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn new_game_opens_menu_on_level_one() {
    let s = new_game(false);
    assert_eq!(s.status, GameStatus::Menu);
    assert_eq!(s.selected_level, 1);
    assert!(s.session.is_none());
    assert!(!s.require_connected_levels);
    assert!(new_game(true).require_connected_levels);
}

#[test]
fn menu_selection_clamps() {
    let s = new_game(false);
    assert_eq!(menu_prev(&s).selected_level, 1);

    let mut s = s;
    for _ in 0..15 {
        s = menu_next(&s);
    }
    assert_eq!(s.selected_level, TOTAL_LEVELS);
    assert_eq!(menu_prev(&s).selected_level, TOTAL_LEVELS - 1);
}

#[test]
fn menu_select_ignores_out_of_range() {
    let s = new_game(false);
    assert_eq!(menu_select(&s, 7).selected_level, 7);
    assert_eq!(menu_select(&s, 0).selected_level, 1);
    assert_eq!(menu_select(&s, TOTAL_LEVELS + 1).selected_level, 1);
}

#[test]
fn menu_select_only_in_menu() {
    let s = make_state(3);
    assert_eq!(menu_select(&s, 5).selected_level, 3);
}

#[test]
fn start_selected_builds_fresh_run() {
    let mut rng = seeded_rng();
    let s = menu_select(&new_game(false), 4);
    let s = start_selected(&s, &mut rng);

    assert_eq!(s.status, GameStatus::Playing);
    let sess = session(&s);
    assert_eq!(sess.level_index, 4);
    assert_eq!(sess.player.health, MAX_HEALTH);
    assert_eq!(sess.player.ammo, START_AMMO);
    assert_eq!(sess.player.pos, sess.level.start.center());
    assert_eq!(sess.sentinels.len(), cellular_scape::level::enemies_for(4));
    assert_eq!(sess.cores_collected, 0);
    assert!(!sess.visible_tiles.is_empty());
}

#[test]
fn start_selected_outside_menu_is_a_no_op() {
    let s = make_state(2);
    let next = start_selected(&s, &mut seeded_rng());
    assert_eq!(next.status, GameStatus::Playing);
    assert_eq!(session(&next).level.grid, open_level().grid);
}

#[test]
fn acknowledge_returns_to_menu_from_end_screens() {
    for status in [GameStatus::GameOver, GameStatus::GameWin] {
        let mut s = make_state(6);
        s.status = status;
        let next = acknowledge(&s);
        assert_eq!(next.status, GameStatus::Menu);
        assert_eq!(next.selected_level, 1);
        assert!(next.session.is_none());
    }
}

#[test]
fn acknowledge_while_playing_is_ignored() {
    let s = make_state(2);
    let next = acknowledge(&s);
    assert_eq!(next.status, GameStatus::Playing);
    assert!(next.session.is_some());
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn later_key_wins_on_each_axis() {
    let mut p = Player::new(Vec2::new(300.0, 300.0));
    let input = FrameInput { left: true, right: true, up: true, down: true, ..Default::default() };
    apply_input(&mut p, &input);
    assert_eq!(p.vel, Vec2::new(MOVE_SPEED, MOVE_SPEED));
}

#[test]
fn facing_follows_movement_and_sticks_when_still() {
    let mut p = Player::new(Vec2::new(300.0, 300.0));
    apply_input(&mut p, &FrameInput { up: true, ..Default::default() });
    assert_eq!(p.vel, Vec2::new(0.0, -MOVE_SPEED));
    let facing = p.facing;
    assert!((facing + std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    apply_input(&mut p, &FrameInput::default());
    assert_eq!(p.vel, Vec2::ZERO);
    assert_eq!(p.facing, facing);
}

#[test]
fn fire_without_keys_walks_to_pointer() {
    let mut p = Player::new(Vec2::new(300.0, 300.0));
    let input = FrameInput { fire: true, pointer: Vec2::new(300.0, 400.0), ..Default::default() };
    apply_input(&mut p, &input);
    assert!((p.vel - Vec2::new(0.0, MOVE_SPEED)).length() < 1e-5);
    assert!((p.gun_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn pointer_inside_dead_zone_does_not_move() {
    let mut p = Player::new(Vec2::new(300.0, 300.0));
    let input = FrameInput {
        fire: true,
        pointer: Vec2::new(300.0 + POINTER_DEAD_ZONE, 300.0),
        ..Default::default()
    };
    apply_input(&mut p, &input);
    assert_eq!(p.vel, Vec2::ZERO);
}

#[test]
fn keys_override_pointer_movement() {
    let mut p = Player::new(Vec2::new(300.0, 300.0));
    let input = FrameInput {
        left: true,
        fire: true,
        pointer: Vec2::new(900.0, 300.0),
        ..Default::default()
    };
    apply_input(&mut p, &input);
    assert_eq!(p.vel, Vec2::new(-MOVE_SPEED, 0.0));
}

// ── tick: idle states ─────────────────────────────────────────────────────────

#[test]
fn tick_outside_playing_only_clears_events() {
    let mut s = new_game(false);
    s.events.push(FrameEvent::GameOver);
    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.status, GameStatus::Menu);
    assert!(next.events.is_empty());
}

#[test]
fn tick_moves_player_and_advances_frame() {
    let s = make_state(1);
    let before = session(&s).player.pos;
    let input = FrameInput { right: true, ..Default::default() };
    let next = tick(&s, &input, &mut seeded_rng());
    let sess = session(&next);
    assert_eq!(sess.player.pos, before + Vec2::new(MOVE_SPEED, 0.0));
    assert_eq!(sess.frame, 1);
    assert!(sess.visible_tiles.contains(&TilePos::from_world(sess.player.pos)));
    // Original is untouched.
    assert_eq!(session(&s).player.pos, before);
}

#[test]
fn tick_fires_at_nearest_sentinel() {
    let mut s = make_state(1);
    let sess = session_mut(&mut s);
    let pos = sess.player.pos + Vec2::new(150.0, 0.0);
    sess.sentinels.push(Sentinel { id: SentinelId(0), pos });

    let input = FrameInput { fire: true, pointer: sess.player.pos, ..Default::default() };
    let next = tick(&s, &input, &mut seeded_rng());
    let sess = session(&next);
    assert_eq!(sess.target, Some(SentinelId(0)));
    assert_eq!(sess.bullets.len(), 1);
    assert_eq!(sess.player.cooldown, FIRE_COOLDOWN - 1);
    assert!(next.events.contains(&FrameEvent::Fired { shots: 1 }));
}

// ── tick: end-to-end scenarios ────────────────────────────────────────────────

#[test]
fn lethal_contact_ends_the_game() {
    let mut s = make_state(1);
    let sess = session_mut(&mut s);
    sess.player.health = 10;
    let pos = sess.player.pos + Vec2::new(5.0, 0.0);
    sess.sentinels.push(Sentinel { id: SentinelId(0), pos });

    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(session(&next).player.health, 0);
    assert_eq!(next.status, GameStatus::GameOver);
    assert!(next.events.contains(&FrameEvent::GameOver));
}

#[test]
fn game_over_skips_the_rest_of_the_frame() {
    let mut s = make_state(1);
    let sess = session_mut(&mut s);
    sess.player.health = 10;
    let here = sess.player.pos;
    sess.sentinels.push(Sentinel { id: SentinelId(0), pos: here });
    sess.cores.push(Core { pos: here });

    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.status, GameStatus::GameOver);
    assert_eq!(session(&next).cores.len(), 1, "core pass never ran");
}

#[test]
fn swirl_shreds_sentinel_without_damage() {
    let mut s = make_state(1);
    let sess = session_mut(&mut s);
    sess.player.effects.shield_active = true;
    sess.player.effects.shield_timer = SHIELD_DURATION;
    let pos = sess.player.pos + Vec2::new(5.0, 0.0);
    sess.sentinels.push(Sentinel { id: SentinelId(0), pos });

    let input = FrameInput { swirl: true, ..Default::default() };
    let next = tick(&s, &input, &mut seeded_rng());
    let sess = session(&next);
    assert_eq!(next.status, GameStatus::Playing);
    assert!(sess.sentinels.is_empty());
    assert_eq!(sess.player.health, MAX_HEALTH);
    assert!(sess.player.effects.shield_active, "swirl leaves the shield alone");
}

#[test]
fn swirl_turns_off_when_ammo_runs_out_while_held() {
    let mut s = make_state(1);
    session_mut(&mut s).player.ammo = 0.1;
    let input = FrameInput { swirl: true, ..Default::default() };
    let mut rng = seeded_rng();

    let s = tick(&s, &input, &mut rng);
    assert!(session(&s).player.effects.swirling);
    let s = tick(&s, &input, &mut rng);
    assert_eq!(session(&s).player.ammo, 0.0);
    assert!(!session(&s).player.effects.swirling);
    let s = tick(&s, &input, &mut rng);
    assert!(!session(&s).player.effects.swirling);
}

#[test]
fn door_needs_enough_cores() {
    let mut s = make_state_at_open_door(1);
    session_mut(&mut s).cores_collected = CORES_NEEDED - 1;
    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.status, GameStatus::Playing);
    assert_eq!(session(&next).level_index, 1);
}

#[test]
fn open_door_advances_to_fresh_level() {
    let mut s = make_state_at_open_door(1);
    {
        let p = &mut session_mut(&mut s).player;
        p.health = 50;
        p.effects.shield_active = true;
        p.effects.shield_timer = 100;
    }
    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());

    assert_eq!(next.status, GameStatus::Playing);
    let sess = session(&next);
    assert_eq!(sess.level_index, 2);
    assert_eq!(sess.cores_collected, 0);
    assert_eq!(sess.cores.len(), CORES_NEEDED as usize);
    assert_eq!(sess.sentinels.len(), cellular_scape::level::enemies_for(2));
    assert_ne!(sess.level.grid, open_level().grid, "a new level was generated");
    assert_eq!(sess.player.pos, sess.level.start.center());
    assert_eq!(sess.player.health, 50 + LEVEL_HEALTH_BONUS);
    assert_eq!(sess.player.ammo, START_AMMO + LEVEL_AMMO_BONUS);
    assert_eq!(sess.player.effects, StatusEffects::default());
    assert!(next.events.contains(&FrameEvent::LevelAdvanced { level: 2 }));
}

#[test]
fn connected_flag_survives_the_door() {
    for seed in 0..10 {
        let mut s = make_state_at_open_door(3);
        s.require_connected_levels = true;
        let next = tick(&s, &FrameInput::default(), &mut StdRng::seed_from_u64(seed));

        assert!(next.require_connected_levels);
        let sess = session(&next);
        assert_eq!(sess.level_index, 4);
        assert!(
            cellular_scape::level::is_reachable(&sess.level.grid, sess.level.start, sess.level.door),
            "seed {seed}: door unreachable"
        );
    }
}

#[test]
fn level_bonus_respects_caps() {
    let mut p = Player::new(Vec2::ZERO);
    p.health = 95;
    p.ammo = 990.0;
    p.effects.swirling = true;
    let next = carry_over(&p);
    assert_eq!(next.health, MAX_HEALTH);
    assert_eq!(next.ammo, AMMO_CAP);
    assert!(!next.effects.swirling);
}

#[test]
fn final_door_wins_the_game() {
    let s = make_state_at_open_door(TOTAL_LEVELS);
    let next = tick(&s, &FrameInput::default(), &mut seeded_rng());
    assert_eq!(next.status, GameStatus::GameWin);
    assert!(next.events.contains(&FrameEvent::GameWon));
    assert_eq!(session(&next).level_index, TOTAL_LEVELS);
}

#[test]
fn full_lifecycle_menu_to_game_over_and_back() {
    let mut rng = seeded_rng();
    let s = start_selected(&new_game(false), &mut rng);
    let mut s = s;
    {
        let sess = session_mut(&mut s);
        sess.player.health = 10;
        let here = sess.player.pos;
        sess.sentinels.push(Sentinel { id: SentinelId(1000), pos: here });
    }
    let s = tick(&s, &FrameInput::default(), &mut rng);
    assert_eq!(s.status, GameStatus::GameOver);
    let s = acknowledge(&s);
    assert_eq!(s.status, GameStatus::Menu);
    let s = start_selected(&s, &mut rng);
    assert_eq!(session(&s).player.health, MAX_HEALTH);
}
