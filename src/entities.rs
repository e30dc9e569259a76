//! All game entity types. Mostly plain data; the only behaviour here keeps
//! player stats inside their ranges and maps between tiles and world space.

use std::collections::HashSet;

use glam::Vec2;

use crate::constants::{
    AMMO_CAP, BULLET_SIZE, CORE_SIZE, CRATE_HEALTH, CRATE_SIZE, MAX_HEALTH, PICKUP_SIZE,
    PLAYER_SIZE, SENTINEL_SIZE, START_AMMO, TILE_SIZE,
};
use crate::physics::Aabb;

// ── Tiles & grid ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing a world-space point.
    pub fn from_world(p: Vec2) -> Self {
        Self {
            x: (p.x / TILE_SIZE).floor() as i32,
            y: (p.y / TILE_SIZE).floor() as i32,
        }
    }

    /// World-space centre of this tile.
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            self.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        )
    }

    /// Top-left corner in world space.
    pub fn origin(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Wall,
}

/// Row-major tile map. Fixed once a level starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All floor, surrounded by a ring of walls.
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Floor; width * height],
        };
        for x in 0..width as i32 {
            grid.set(TilePos::new(x, 0), Cell::Wall);
            grid.set(TilePos::new(x, height as i32 - 1), Cell::Wall);
        }
        for y in 0..height as i32 {
            grid.set(TilePos::new(0, y), Cell::Wall);
            grid.set(TilePos::new(width as i32 - 1, y), Cell::Wall);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, t: TilePos) -> bool {
        t.x >= 0 && t.y >= 0 && (t.x as usize) < self.width && (t.y as usize) < self.height
    }

    fn index(&self, t: TilePos) -> Option<usize> {
        self.in_bounds(t)
            .then(|| t.y as usize * self.width + t.x as usize)
    }

    pub fn cell(&self, t: TilePos) -> Option<Cell> {
        self.index(t).map(|i| self.cells[i])
    }

    /// Out-of-grid tiles are never walls.
    pub fn is_wall(&self, t: TilePos) -> bool {
        self.cell(t) == Some(Cell::Wall)
    }

    pub fn is_floor(&self, t: TilePos) -> bool {
        self.cell(t) == Some(Cell::Floor)
    }

    pub fn set(&mut self, t: TilePos, cell: Cell) {
        if let Some(i) = self.index(t) {
            self.cells[i] = cell;
        }
    }

    pub fn is_border(&self, t: TilePos) -> bool {
        t.x == 0 || t.y == 0 || t.x == self.width as i32 - 1 || t.y == self.height as i32 - 1
    }

    /// Every tile position, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| TilePos::new(x, y)))
    }
}

// ── Level ─────────────────────────────────────────────────────────────────────

/// Output of the level generator. Spawn lists are tile centres in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub grid: Grid,
    pub start: TilePos,
    pub door: TilePos,
    pub enemy_spawns: Vec<Vec2>,
    pub crate_spawns: Vec<Vec2>,
    pub core_spawns: Vec<Vec2>,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Timed buffs and the held swirl-shield mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffects {
    pub shield_active: bool,
    pub shield_timer: u32,
    pub multishot_active: bool,
    pub multishot_timer: u32,
    /// Source of truth for the swirl-shield; audio follows this flag.
    pub swirling: bool,
    /// Visual spin in degrees, `[0, 360)`.
    pub swirl_angle: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Box centre.
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, last non-zero movement direction.
    pub facing: f32,
    /// Radians, toward the pointer.
    pub gun_angle: f32,
    pub health: i32,
    pub max_health: i32,
    pub ammo: f32,
    /// Frames until the weapon may fire again.
    pub cooldown: u32,
    pub effects: StatusEffects,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: 0.0,
            gun_angle: 0.0,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            ammo: START_AMMO,
            cooldown: 0,
            effects: StatusEffects::default(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, PLAYER_SIZE)
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, self.max_health);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, self.max_health);
    }

    pub fn add_ammo(&mut self, amount: f32) {
        self.ammo = (self.ammo + amount).clamp(0.0, AMMO_CAP);
    }

    /// Removes up to `amount`; never goes below zero.
    pub fn spend_ammo(&mut self, amount: f32) {
        self.ammo = (self.ammo - amount).clamp(0.0, AMMO_CAP);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

// ── Sentinels & projectiles ───────────────────────────────────────────────────

/// Stable handle into the level's sentinel table. Ids are never reused
/// within a session, so a stale handle simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SentinelId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Sentinel {
    pub id: SentinelId,
    pub pos: Vec2,
}

impl Sentinel {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, SENTINEL_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Weak: resolved against the live sentinel table every frame.
    pub target: Option<SentinelId>,
}

impl Bullet {
    pub fn radius(&self) -> f32 {
        BULLET_SIZE / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, BULLET_SIZE)
    }
}

// ── Static objects & pickups ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Crate {
    pub pos: Vec2,
    pub health: i32,
}

impl Crate {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, health: CRATE_HEALTH }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, CRATE_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Core {
    pub pos: Vec2,
}

impl Core {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, CORE_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// One-hit shield for SHIELD_DURATION frames.
    Shield,
    /// Two extra projectiles per shot for MULTISHOT_DURATION frames.
    MultiShot,
    Ammo,
    Health,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, PICKUP_SIZE)
    }
}

/// Exit trigger covering the whole door tile. Never blocks movement.
#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub tile: TilePos,
}

impl Door {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.tile.center(), TILE_SIZE)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// What spawned a particle; the renderer picks the colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Glow,
    Tracer,
    Debris,
    Burst,
    Swirl,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: u8,
    pub kind: ParticleKind,
    /// 0–255, fades linearly with age.
    pub alpha: f32,
    pub life: u32,
    pub max_life: u32,
}

// ── Frame events ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillCause {
    Projectile,
    Swirl,
    Shield,
    Contact,
}

/// Things that happened during one tick, for audio and logging.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    Fired { shots: u32 },
    SentinelDestroyed { pos: Vec2, cause: KillCause },
    PlayerHit { health: i32 },
    CrateHit,
    CrateBroken { loot: Option<PickupKind> },
    PickupCollected(PickupKind),
    CoreCollected { total: u32 },
    LevelAdvanced { level: u32 },
    GameOver,
    GameWon,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    GameWin,
}

/// Everything that lives for one level. Replaced wholesale on transition.
#[derive(Clone, Debug)]
pub struct Session {
    /// 1-based.
    pub level_index: u32,
    pub level: Level,
    pub player: Player,
    pub sentinels: Vec<Sentinel>,
    pub bullets: Vec<Bullet>,
    pub crates: Vec<Crate>,
    pub cores: Vec<Core>,
    pub pickups: Vec<Pickup>,
    pub door: Door,
    pub particles: Vec<Particle>,
    pub cores_collected: u32,
    /// Nearest sentinel in range, refreshed every frame.
    pub target: Option<SentinelId>,
    pub visible_tiles: HashSet<TilePos>,
    pub frame: u64,
}

impl Session {
    /// Populate a freshly generated level around an existing player.
    pub fn new(level_index: u32, level: Level, mut player: Player) -> Self {
        player.pos = level.start.center();
        let sentinels = level
            .enemy_spawns
            .iter()
            .enumerate()
            .map(|(i, &pos)| Sentinel { id: SentinelId(i as u32), pos })
            .collect();
        let crates = level.crate_spawns.iter().map(|&pos| Crate::new(pos)).collect();
        let cores = level.core_spawns.iter().map(|&pos| Core { pos }).collect();
        let door = Door { tile: level.door };

        Self {
            level_index,
            level,
            player,
            sentinels,
            bullets: Vec::new(),
            crates,
            cores,
            pickups: Vec::new(),
            door,
            particles: Vec::new(),
            cores_collected: 0,
            target: None,
            visible_tiles: HashSet::new(),
            frame: 0,
        }
    }

    pub fn sentinel(&self, id: SentinelId) -> Option<&Sentinel> {
        self.sentinels.iter().find(|s| s.id == id)
    }

    pub fn grid(&self) -> &Grid {
        &self.level.grid
    }
}

/// The entire game state. Cloneable so update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    /// Level-select highlight, 1..=TOTAL_LEVELS.
    pub selected_level: u32,
    pub session: Option<Session>,
    pub require_connected_levels: bool,
    /// Events from the most recent tick only.
    pub events: Vec<FrameEvent>,
}
