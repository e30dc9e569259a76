//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands. One maze tile is two columns by one row.

use std::io::Write;

use cellular_scape::compute;
use cellular_scape::constants::{CRATE_HEALTH, GRID_HEIGHT, GRID_WIDTH, TILE_SIZE, TOTAL_LEVELS};
use cellular_scape::entities::{
    Cell, GameState, GameStatus, ParticleKind, PickupKind, Session, TilePos,
};
use cellular_scape::fog::{self, LightBand};
use cellular_scape::hud::{self, Hud};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;

// ── Layout ────────────────────────────────────────────────────────────────────

const MAP_LEFT: u16 = 1;
const MAP_TOP: u16 = 2;
const COLS_PER_TILE: u16 = 2;
const MAP_COLS: u16 = GRID_WIDTH as u16 * COLS_PER_TILE;
const MAP_ROWS: u16 = GRID_HEIGHT as u16;
/// Row of the level 1 entry in the menu list; later levels follow below.
const MENU_FIRST_ROW: u16 = 6;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD: Color = Color::White;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_AMMO: Color = Color::Yellow;
const C_HUD_CORES: Color = Color::Cyan;
const C_HUD_BUFF: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELD: Color = Color::Blue;
const C_PLAYER_SWIRL: Color = Color::Magenta;
const C_SENTINEL: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_CRATE: Color = Color::DarkYellow;
const C_CORE: Color = Color::Cyan;
const C_DOOR_OPEN: Color = Color::Green;
const C_DOOR_SHUT: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;
const C_SELECTED: Color = Color::Yellow;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Terminal cell for a world position.
fn world_to_cell(p: Vec2) -> Option<(u16, u16)> {
    let col = (p.x / (TILE_SIZE / COLS_PER_TILE as f32)).floor();
    let row = (p.y / TILE_SIZE).floor();
    if col < 0.0 || row < 0.0 || col >= MAP_COLS as f32 || row >= MAP_ROWS as f32 {
        return None;
    }
    Some((MAP_LEFT + col as u16, MAP_TOP + row as u16))
}

/// World position at the middle of a terminal cell, for the mouse pointer.
pub fn cell_to_world(column: u16, row: u16) -> Vec2 {
    let half_tile = TILE_SIZE / COLS_PER_TILE as f32;
    Vec2::new(
        (column as f32 - MAP_LEFT as f32 + 0.5) * half_tile,
        (row as f32 - MAP_TOP as f32 + 0.5) * TILE_SIZE,
    )
}

fn tile_cell(t: TilePos) -> (u16, u16) {
    (MAP_LEFT + t.x as u16 * COLS_PER_TILE, MAP_TOP + t.y as u16)
}

/// Level whose menu entry sits on `row`, if any.
pub fn menu_level_at(row: u16) -> Option<u32> {
    let level = u32::from(row.checked_sub(MENU_FIRST_ROW)?) + 1;
    (level <= TOTAL_LEVELS).then_some(level)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, fog_of_war: bool) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.status {
        GameStatus::Menu => draw_menu(out, state)?,
        GameStatus::Playing => {
            if let Some(session) = &state.session {
                draw_session(out, session, fog_of_war)?;
            }
        }
        GameStatus::GameOver | GameStatus::GameWin => {
            if let Some(session) = &state.session {
                draw_session(out, session, fog_of_war)?;
            }
            draw_end_screen(out, state.status)?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, MAP_TOP + MAP_ROWS + 1))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let cx = MAP_LEFT + MAP_COLS / 2;

    let title = "◆  CELLULAR  SCAPE  ◆";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.chars().count() as u16 / 2), 2))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(8), 4))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("Select level:"))?;

    for level in 1..=TOTAL_LEVELS {
        let row = MENU_FIRST_ROW + (level - 1) as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(8), row))?;
        if level == state.selected_level {
            out.queue(style::SetForegroundColor(C_SELECTED))?;
            out.queue(Print(format!("▶ Level {level:>2}")))?;
        } else {
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print(format!("  Level {level:>2}")))?;
        }
    }

    let hints = [
        "↑ ↓ / W S : choose   1-9, 0 : jump   ENTER : start",
        "In game: WASD/arrows move, F/J/click fire,",
        "SPACE hold swirl-shield, Q quit",
    ];
    for (i, hint) in hints.iter().enumerate() {
        out.queue(cursor::MoveTo(1, 17 + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*hint))?;
    }
    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_session<W: Write>(out: &mut W, session: &Session, fog_of_war: bool) -> std::io::Result<()> {
    let visible = |p: Vec2| !fog_of_war || session.visible_tiles.contains(&TilePos::from_world(p));

    draw_hud(out, &hud::hud(session))?;
    draw_tiles(out, session, fog_of_war)?;

    if visible(session.door.tile.center()) {
        let (col, row) = tile_cell(session.door.tile);
        let open = compute::door_open(session);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(if open { C_DOOR_OPEN } else { C_DOOR_SHUT }))?;
        out.queue(Print("▐▌"))?;
    }

    for c in session.crates.iter().filter(|c| visible(c.pos)) {
        let glyph = if c.health >= CRATE_HEALTH { "▣" } else { "▢" };
        draw_glyph(out, c.pos, glyph, C_CRATE)?;
    }
    for c in session.cores.iter().filter(|c| visible(c.pos)) {
        draw_glyph(out, c.pos, "◆", C_CORE)?;
    }
    for p in session.pickups.iter().filter(|p| visible(p.pos)) {
        let (glyph, color) = match p.kind {
            PickupKind::Shield => ("S", Color::Blue),
            PickupKind::MultiShot => ("M", Color::Magenta),
            PickupKind::Ammo => ("A", Color::Yellow),
            PickupKind::Health => ("+", Color::Green),
        };
        draw_glyph(out, p.pos, glyph, color)?;
    }
    for p in session.particles.iter().filter(|p| visible(p.pos) && p.alpha > 60.0) {
        let color = match p.kind {
            ParticleKind::Glow => Color::DarkCyan,
            ParticleKind::Tracer => Color::DarkYellow,
            ParticleKind::Debris => Color::DarkYellow,
            ParticleKind::Burst => Color::Red,
            ParticleKind::Swirl => Color::Magenta,
        };
        draw_glyph(out, p.pos, "·", color)?;
    }
    for s in session.sentinels.iter().filter(|s| visible(s.pos)) {
        let glyph = if session.target == Some(s.id) { "◎" } else { "●" };
        draw_glyph(out, s.pos, glyph, C_SENTINEL)?;
    }
    for b in session.bullets.iter().filter(|b| visible(b.pos)) {
        draw_glyph(out, b.pos, "•", C_BULLET)?;
    }

    let fx = &session.player.effects;
    let (glyph, color) = if fx.swirling {
        // Four-frame spinner driven by the swirl angle.
        let frames = ["✶", "✷", "✸", "✹"];
        (frames[(fx.swirl_angle / 90.0) as usize % 4], C_PLAYER_SWIRL)
    } else if fx.shield_active {
        ("◙", C_PLAYER_SHIELD)
    } else {
        ("@", C_PLAYER)
    };
    draw_glyph(out, session.player.pos, glyph, color)
}

fn draw_tiles<W: Write>(out: &mut W, session: &Session, fog_of_war: bool) -> std::io::Result<()> {
    let light = session.player.pos;
    for t in session.grid().tiles() {
        if fog_of_war && !session.visible_tiles.contains(&t) {
            continue;
        }
        let band = fog::light_band(light, t.center());
        let (glyph, color) = match session.grid().cell(t) {
            Some(Cell::Wall) => ("██", wall_shade(band)),
            Some(Cell::Floor) => ("··", floor_shade(band)),
            None => continue,
        };
        let (col, row) = tile_cell(t);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn wall_shade(band: LightBand) -> Color {
    match band {
        LightBand::Bright => Color::Grey,
        LightBand::Mid | LightBand::Dim | LightBand::Dark => Color::DarkGrey,
    }
}

fn floor_shade(band: LightBand) -> Color {
    match band {
        LightBand::Bright => Color::Grey,
        LightBand::Mid => Color::DarkGrey,
        LightBand::Dim => Color::DarkBlue,
        LightBand::Dark => Color::Black,
    }
}

fn draw_glyph<W: Write>(out: &mut W, pos: Vec2, glyph: &str, color: Color) -> std::io::Result<()> {
    let Some((col, row)) = world_to_cell(pos) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── HUD (rows 0 and below the map) ────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(MAP_LEFT, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("HP {:>3}/{:<3} ", hud.health, hud.max_health)))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(format!("Ammo {:>3} ", hud.ammo)))?;
    out.queue(style::SetForegroundColor(C_HUD_CORES))?;
    out.queue(Print(format!("Cores {}/{} ", hud.cores, hud.cores_needed)))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Level {}/{}", hud.level, hud.total_levels)))?;

    let mut buffs = Vec::new();
    if let Some(secs) = hud.shield_secs {
        buffs.push(format!("[SHIELD {secs}s]"));
    }
    if let Some(secs) = hud.multishot_secs {
        buffs.push(format!("[MULTI {secs}s]"));
    }
    if hud.swirling {
        buffs.push("[SWIRL]".to_string());
    }
    out.queue(cursor::MoveTo(MAP_LEFT, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_BUFF))?;
    out.queue(Print(buffs.join(" ")))?;

    out.queue(cursor::MoveTo(MAP_LEFT, MAP_TOP + MAP_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD move  F/J fire  SPACE swirl  Q quit"))?;
    Ok(())
}

// ── End screens ───────────────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(out: &mut W, status: GameStatus) -> std::io::Result<()> {
    let (banner, color) = match status {
        GameStatus::GameWin => ("║   ALL LEVELS CLEAR   ║", Color::Green),
        _ => ("║      GAME  OVER      ║", Color::Red),
    };
    let lines = [
        "╔══════════════════════╗",
        banner,
        "╚══════════════════════╝",
    ];

    let cx = MAP_LEFT + MAP_COLS / 2;
    let start_row = MAP_TOP + MAP_ROWS / 2 - 2;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*msg))?;
    }

    let hint = "SPACE / ENTER - Menu   Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
