use cellular_scape::constants::*;
use cellular_scape::entities::*;

use glam::Vec2;

fn open_level() -> Level {
    Level {
        grid: Grid::bordered(GRID_WIDTH, GRID_HEIGHT),
        start: TilePos::new(2, 2),
        door: TilePos::new(17, 12),
        enemy_spawns: vec![TilePos::new(5, 5).center(), TilePos::new(6, 5).center()],
        crate_spawns: vec![TilePos::new(8, 8).center()],
        core_spawns: vec![TilePos::new(9, 9).center()],
    }
}

// ── TilePos ───────────────────────────────────────────────────────────────────

#[test]
fn tile_center_and_origin() {
    let t = TilePos::new(3, 2);
    assert_eq!(t.origin(), Vec2::new(150.0, 100.0));
    assert_eq!(t.center(), Vec2::new(175.0, 125.0));
}

#[test]
fn tile_from_world_floors() {
    assert_eq!(TilePos::from_world(Vec2::new(0.0, 0.0)), TilePos::new(0, 0));
    assert_eq!(TilePos::from_world(Vec2::new(49.9, 50.0)), TilePos::new(0, 1));
    // Negative coordinates land outside the grid, not on tile 0.
    assert_eq!(TilePos::from_world(Vec2::new(-1.0, 10.0)), TilePos::new(-1, 0));
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn bordered_grid_has_wall_ring_and_floor_inside() {
    let g = Grid::bordered(6, 4);
    for t in g.tiles() {
        if g.is_border(t) {
            assert!(g.is_wall(t), "{t:?} should be wall");
        } else {
            assert!(g.is_floor(t), "{t:?} should be floor");
        }
    }
    assert_eq!(g.tiles().count(), 24);
}

#[test]
fn out_of_grid_is_neither_wall_nor_floor() {
    let g = Grid::bordered(6, 4);
    let outside = TilePos::new(6, 0);
    assert_eq!(g.cell(outside), None);
    assert!(!g.is_wall(outside));
    assert!(!g.is_floor(outside));
}

#[test]
fn set_ignores_out_of_bounds() {
    let mut g = Grid::bordered(4, 4);
    let before = g.clone();
    g.set(TilePos::new(-1, 2), Cell::Floor);
    g.set(TilePos::new(4, 4), Cell::Floor);
    assert_eq!(g, before);
}

// ── Player clamping ───────────────────────────────────────────────────────────

#[test]
fn ammo_is_capped() {
    let mut p = Player::new(Vec2::ZERO);
    p.ammo = 970.0;
    p.add_ammo(AMMO_PICKUP);
    assert_eq!(p.ammo, 999.0);
}

#[test]
fn health_is_capped_at_max() {
    let mut p = Player::new(Vec2::ZERO);
    p.health = 90;
    p.heal(HEALTH_PICKUP);
    assert_eq!(p.health, 100);
}

#[test]
fn damage_and_spending_floor_at_zero() {
    let mut p = Player::new(Vec2::ZERO);
    p.health = 5;
    p.take_damage(CONTACT_DAMAGE);
    assert_eq!(p.health, 0);
    assert!(p.is_dead());

    p.ammo = 0.5;
    p.spend_ammo(1.0);
    assert_eq!(p.ammo, 0.0);
}

#[test]
fn new_player_starts_full() {
    let p = Player::new(Vec2::new(10.0, 20.0));
    assert_eq!(p.health, MAX_HEALTH);
    assert_eq!(p.ammo, START_AMMO);
    assert_eq!(p.effects, StatusEffects::default());
    assert!(!p.effects.swirling);
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn session_populates_level() {
    let s = Session::new(4, open_level(), Player::new(Vec2::ZERO));
    assert_eq!(s.level_index, 4);
    assert_eq!(s.player.pos, TilePos::new(2, 2).center());
    assert_eq!(s.sentinels.len(), 2);
    assert_eq!(s.crates.len(), 1);
    assert_eq!(s.crates[0].health, CRATE_HEALTH);
    assert_eq!(s.cores.len(), 1);
    assert_eq!(s.door.tile, TilePos::new(17, 12));
    assert_eq!(s.cores_collected, 0);
    assert!(s.bullets.is_empty());
    assert!(s.pickups.is_empty());
}

#[test]
fn sentinel_ids_are_unique_and_resolvable() {
    let s = Session::new(1, open_level(), Player::new(Vec2::ZERO));
    let a = s.sentinels[0].id;
    let b = s.sentinels[1].id;
    assert_ne!(a, b);
    assert_eq!(s.sentinel(b).map(|x| x.pos), Some(TilePos::new(6, 5).center()));
    assert!(s.sentinel(SentinelId(99)).is_none());
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        status: GameStatus::Playing,
        selected_level: 1,
        session: Some(Session::new(1, open_level(), Player::new(Vec2::ZERO))),
        require_connected_levels: false,
        events: Vec::new(),
    };
    let mut cloned = original.clone();
    if let Some(s) = cloned.session.as_mut() {
        s.player.health = 1;
        s.sentinels.clear();
    }
    let orig = original.session.as_ref().map(|s| (s.player.health, s.sentinels.len()));
    assert_eq!(orig, Some((MAX_HEALTH, 2)));
}

#[test]
fn door_bounds_cover_whole_tile() {
    let d = Door { tile: TilePos::new(1, 1) };
    let b = d.bounds();
    assert_eq!(b.min(), Vec2::new(50.0, 50.0));
    assert_eq!(b.max(), Vec2::new(100.0, 100.0));
}
