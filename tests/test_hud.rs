use cellular_scape::constants::*;
use cellular_scape::entities::*;
use cellular_scape::hud::*;

use glam::Vec2;

fn make_session() -> Session {
    let level = Level {
        grid: Grid::bordered(GRID_WIDTH, GRID_HEIGHT),
        start: TilePos::new(2, 2),
        door: TilePos::new(17, 12),
        enemy_spawns: Vec::new(),
        crate_spawns: Vec::new(),
        core_spawns: Vec::new(),
    };
    Session::new(3, level, Player::new(Vec2::ZERO))
}

#[test]
fn hud_reports_core_values() {
    let mut s = make_session();
    s.player.health = 42;
    s.player.ammo = 99.9;
    s.cores_collected = 2;

    let h = hud(&s);
    assert_eq!(h.health, 42);
    assert_eq!(h.max_health, MAX_HEALTH);
    assert_eq!(h.ammo, 99);
    assert_eq!((h.cores, h.cores_needed), (2, CORES_NEEDED));
    assert_eq!((h.level, h.total_levels), (3, TOTAL_LEVELS));
    assert!(!h.swirling);
}

#[test]
fn buff_seconds_only_while_active() {
    let mut s = make_session();
    assert_eq!(hud(&s).shield_secs, None);
    assert_eq!(hud(&s).multishot_secs, None);

    s.player.effects.shield_active = true;
    s.player.effects.shield_timer = 299;
    s.player.effects.multishot_active = true;
    s.player.effects.multishot_timer = MULTISHOT_DURATION;
    s.player.effects.swirling = true;

    let h = hud(&s);
    assert_eq!(h.shield_secs, Some(4));
    assert_eq!(h.multishot_secs, Some(10));
    assert!(h.swirling);
}
