use cellular_scape::constants::*;
use cellular_scape::entities::*;
use cellular_scape::level::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn dist(a: TilePos, b: TilePos) -> f32 {
    ((a.x - b.x) as f32).hypot((a.y - b.y) as f32)
}

// ── Scaling ───────────────────────────────────────────────────────────────────

#[test]
fn scaling_formulas() {
    assert_eq!(wall_segments_for(1), 17);
    assert_eq!(enemies_for(1), 3);
    assert_eq!(crates_for(1), 7);
    assert_eq!(wall_segments_for(10), 35);
    assert_eq!(enemies_for(10), 12);
    assert_eq!(crates_for(10), 25);
}

// ── Structural invariants ─────────────────────────────────────────────────────

#[test]
fn border_is_always_wall() {
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        for idx in 1..=TOTAL_LEVELS {
            let level = generate(idx, &mut rng);
            let g = &level.grid;
            assert_eq!((g.width(), g.height()), (GRID_WIDTH, GRID_HEIGHT));
            for t in g.tiles().filter(|&t| g.is_border(t)) {
                assert!(g.is_wall(t), "seed {seed} level {idx}: border {t:?} open");
            }
        }
    }
}

#[test]
fn start_and_door_are_distinct_floor() {
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        for idx in 1..=TOTAL_LEVELS {
            let level = generate(idx, &mut rng);
            assert_ne!(level.start, level.door);
            assert!(level.grid.is_floor(level.start));
            assert!(level.grid.is_floor(level.door));
        }
    }
}

#[test]
fn door_is_farthest_interior_tile_from_start() {
    let mut rng = seeded_rng();
    let level = generate(3, &mut rng);
    let best = dist(level.start, level.door);
    for t in level.grid.tiles().filter(|&t| !level.grid.is_border(t)) {
        assert!(dist(level.start, t) <= best, "{t:?} is farther than the door");
    }
}

#[test]
fn spawn_counts_match_formulas() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        for idx in 1..=TOTAL_LEVELS {
            let level = generate(idx, &mut rng);
            assert_eq!(level.enemy_spawns.len(), enemies_for(idx));
            assert_eq!(level.crate_spawns.len(), crates_for(idx));
            assert_eq!(level.core_spawns.len(), CORES_NEEDED as usize);
        }
    }
}

#[test]
fn spawns_are_distinct_floor_tiles_away_from_start_and_door() {
    let mut rng = seeded_rng();
    let level = generate(10, &mut rng);
    let mut tiles: Vec<TilePos> = level
        .enemy_spawns
        .iter()
        .chain(&level.crate_spawns)
        .chain(&level.core_spawns)
        .map(|&p| TilePos::from_world(p))
        .collect();

    for &t in &tiles {
        assert!(level.grid.is_floor(t));
        assert_ne!(t, level.start);
        assert_ne!(t, level.door);
    }
    let total = tiles.len();
    tiles.sort();
    tiles.dedup();
    assert_eq!(tiles.len(), total, "a tile was sampled twice");
}

#[test]
fn spawns_are_tile_centres() {
    let mut rng = seeded_rng();
    let level = generate(2, &mut rng);
    for &p in &level.enemy_spawns {
        assert_eq!(TilePos::from_world(p).center(), p);
    }
}

// ── Degenerate inputs ─────────────────────────────────────────────────────────

#[test]
fn small_grid_yields_fewer_spawns_without_failing() {
    let mut rng = seeded_rng();
    // 2×2 interior: start and door take two, two remain.
    let level = generate_sized(4, 4, 5, &mut rng);
    let total = level.enemy_spawns.len() + level.crate_spawns.len() + level.core_spawns.len();
    assert_eq!(total, 2);
    assert_eq!(level.enemy_spawns.len(), 2);
    assert!(level.crate_spawns.is_empty());
    assert_ne!(level.start, level.door);
}

#[test]
fn tiny_dimensions_are_raised_to_two_interior_tiles() {
    let mut rng = seeded_rng();
    let level = generate_sized(1, 0, 1, &mut rng);
    assert_eq!((level.grid.width(), level.grid.height()), (4, 3));
    assert!(level.grid.is_floor(level.start));
    assert!(level.grid.is_floor(level.door));
    assert_ne!(level.start, level.door);
    assert!(level.enemy_spawns.is_empty());
}

#[test]
fn three_by_three_still_separates_start_and_door() {
    for seed in 0..10 {
        let level = generate_sized(3, 3, 1, &mut StdRng::seed_from_u64(seed));
        assert_ne!(level.start, level.door, "seed {seed}");
        assert!(level.grid.is_floor(level.start) && level.grid.is_floor(level.door));
    }
}

#[test]
fn same_seed_same_level() {
    let a = generate(6, &mut StdRng::seed_from_u64(7));
    let b = generate(6, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

// ── Connectivity ──────────────────────────────────────────────────────────────

#[test]
fn open_grid_is_reachable() {
    let g = Grid::bordered(8, 6);
    assert!(is_reachable(&g, TilePos::new(1, 1), TilePos::new(6, 4)));
}

#[test]
fn wall_column_cuts_the_grid() {
    let mut g = Grid::bordered(8, 6);
    for y in 0..6 {
        g.set(TilePos::new(3, y), Cell::Wall);
    }
    assert!(!is_reachable(&g, TilePos::new(1, 1), TilePos::new(6, 4)));
    assert!(!is_reachable(&g, TilePos::new(0, 0), TilePos::new(1, 1)), "wall endpoints");
}

#[test]
fn connected_generation_reaches_the_door() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let level = generate_connected(10, &mut rng);
        assert!(is_reachable(&level.grid, level.start, level.door), "seed {seed}");
    }
}
