//! Gameplay constants. All distances are world units (pixels of the
//! 1024×768 play field), all durations are frames at [`FPS`].

// ── Play field ────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;
pub const FPS: u32 = 60;

pub const TILE_SIZE: f32 = 50.0;
/// Whole tiles that fit the screen: 1024 / 50 and 768 / 50.
pub const GRID_WIDTH: usize = 20;
pub const GRID_HEIGHT: usize = 15;

// ── Progression ───────────────────────────────────────────────────────────────

pub const TOTAL_LEVELS: u32 = 10;
pub const CORES_NEEDED: u32 = 3;

/// Regeneration budget when connected levels are required.
pub const MAX_GENERATION_ATTEMPTS: u32 = 32;

// ── Movement ──────────────────────────────────────────────────────────────────

pub const MOVE_SPEED: f32 = 5.0;
/// Pointer-driven movement ignores pointers closer than this.
pub const POINTER_DEAD_ZONE: f32 = 10.0;
pub const SENTINEL_SPEED: f32 = 2.0;
pub const BULLET_SPEED: f32 = 10.0;

// ── Light & ranges ────────────────────────────────────────────────────────────

pub const LIGHT_RADIUS: f32 = 200.0;
/// Sentinels pursue inside this range; floors are visible inside it too.
pub const AGGRO_RANGE: f32 = LIGHT_RADIUS * 1.5;
/// Walls are only revealed this close.
pub const WALL_REVEAL_RANGE: f32 = TILE_SIZE * 1.5;
pub const TARGET_RANGE: f32 = 400.0;

// ── Weapon & effects ──────────────────────────────────────────────────────────

pub const FIRE_COOLDOWN: u32 = 15;
pub const MULTISHOT_JITTER: i32 = 10;
pub const SHIELD_DURATION: u32 = 300;
pub const MULTISHOT_DURATION: u32 = 600;

/// Ammo per second while the swirl-shield spins. Drained per frame as
/// `SWIRL_AMMO_COST / FPS`, so balance is tied to the tick rate.
pub const SWIRL_AMMO_COST: f32 = 5.0;
pub const SWIRL_DRAIN_PER_FRAME: f32 = SWIRL_AMMO_COST / FPS as f32;
pub const SWIRL_SPIN_STEP: f32 = 10.0;

// ── Player stats ──────────────────────────────────────────────────────────────

pub const MAX_HEALTH: i32 = 100;
pub const START_AMMO: f32 = 100.0;
pub const AMMO_CAP: f32 = 999.0;
pub const AMMO_PICKUP: f32 = 50.0;
pub const HEALTH_PICKUP: i32 = 25;
pub const CONTACT_DAMAGE: i32 = 10;
pub const LEVEL_HEALTH_BONUS: i32 = 20;
pub const LEVEL_AMMO_BONUS: f32 = 50.0;

pub const CRATE_HEALTH: i32 = 3;

// ── Entity sizes (box side length) ────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = TILE_SIZE * 0.6;
pub const SENTINEL_SIZE: f32 = TILE_SIZE * 0.5;
pub const CRATE_SIZE: f32 = TILE_SIZE * 0.7;
pub const CORE_SIZE: f32 = TILE_SIZE * 0.4;
pub const PICKUP_SIZE: f32 = TILE_SIZE * 0.5;
pub const BULLET_SIZE: f32 = 8.0;

// ── Crate loot table (cumulative upper bounds) ────────────────────────────────

pub const LOOT_POWER_UP_BELOW: f64 = 0.20;
pub const LOOT_AMMO_BELOW: f64 = 0.45;
pub const LOOT_HEALTH_BELOW: f64 = 0.65;
