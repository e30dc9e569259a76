mod audio;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cellular_scape::compute::{
    acknowledge, menu_next, menu_prev, menu_select, new_game, start_selected, tick,
};
use cellular_scape::config::GameConfig;
use cellular_scape::entities::{GameState, GameStatus};
use cellular_scape::input::{FrameInput, AIM_POINT};

use crate::audio::Audio;

/// ≈60 FPS, matching the simulation's fixed tick.
const FRAME: Duration = Duration::from_millis(16);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so at 60 FPS the window must span
/// roughly 70 ms to stay refreshed between repeats.
const HOLD_WINDOW: u64 = 4;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cellular_scape")]
#[command(about = "Top-down maze shooter: collect cores, reach the door, survive ten levels")]
struct Args {
    /// RON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Level highlighted when the menu opens (1-10)
    #[arg(short, long)]
    level: Option<u32>,

    /// Show the whole maze
    #[arg(long)]
    no_fog: bool,

    /// Regenerate levels until the door is reachable
    #[arg(long)]
    connected_levels: bool,

    /// Where tracing output goes (the terminal is taken)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(level) = self.level {
            config.start_level = level;
        }
        if self.no_fog {
            config.fog_of_war = false;
        }
        if self.connected_levels {
            config.require_connected_levels = true;
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        config.validate().context("invalid command line")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input model ───────────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

#[derive(Debug, Default)]
struct Mouse {
    /// World position of the last reported pointer.
    pos: Option<Vec2>,
    left_down: bool,
}

/// Snapshot the held keys and mouse into one frame of input.
fn frame_input(
    key_frame: &HashMap<KeyCode, u64>,
    mouse: &Mouse,
    player_pos: Vec2,
    frame: u64,
) -> FrameInput {
    use KeyCode::{Char, Down, Left, Right, Up};

    let key_fire = any_held(key_frame, &[Char('f'), Char('F'), Char('j'), Char('J')], frame);
    // Keyboard fire aims at the player itself so it never walks the player.
    let pointer = if mouse.left_down {
        mouse.pos.unwrap_or(AIM_POINT)
    } else if key_fire {
        player_pos
    } else {
        mouse.pos.unwrap_or(AIM_POINT)
    };

    FrameInput {
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        fire: key_fire || mouse.left_down,
        swirl: is_held(key_frame, &Char(' '), frame),
        pointer,
    }
}

/// One-shot key actions outside of play: menu navigation and end screens.
fn on_press(state: &GameState, code: KeyCode, rng: &mut impl Rng) -> GameState {
    match (state.status, code) {
        (GameStatus::Menu, KeyCode::Up | KeyCode::Left | KeyCode::Char('w' | 'a')) => {
            menu_prev(state)
        }
        (GameStatus::Menu, KeyCode::Down | KeyCode::Right | KeyCode::Char('s' | 'd')) => {
            menu_next(state)
        }
        (GameStatus::Menu, KeyCode::Char('0')) => menu_select(state, 10),
        (GameStatus::Menu, KeyCode::Char(c @ '1'..='9')) => {
            menu_select(state, c.to_digit(10).unwrap_or(1))
        }
        (GameStatus::Menu, KeyCode::Enter) => start_selected(state, rng),
        (GameStatus::GameOver | GameStatus::GameWin, KeyCode::Enter | KeyCode::Char(' ')) => {
            acknowledge(state)
        }
        _ => state.clone(),
    }
}

/// Clicking a level entry in the menu selects it and starts the run.
fn on_click(state: &GameState, row: u16, rng: &mut impl Rng) -> GameState {
    match state.status {
        GameStatus::Menu => match display::menu_level_at(row) {
            Some(level) => start_selected(&menu_select(state, level), rng),
            None => state.clone(),
        },
        GameStatus::GameOver | GameStatus::GameWin => acknowledge(state),
        GameStatus::Playing => state.clone(),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits. Menu, play and end screens share one loop;
/// the state machine decides what each frame means.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame reads which keys are
/// still "fresh". Terminals with keyboard enhancement also send releases,
/// which drop the key immediately.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut state = menu_select(&new_game(config.require_connected_levels), config.start_level);
    let mut audio = Audio::default();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse = Mouse::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => state = on_press(&state, code, rng),
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    mouse.pos = Some(display::cell_to_world(column, row));
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            mouse.left_down = true;
                            state = on_click(&state, row, rng);
                        }
                        MouseEventKind::Drag(MouseButton::Left) => mouse.left_down = true,
                        MouseEventKind::Up(MouseButton::Left) => mouse.left_down = false,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // ── Simulate one frame ────────────────────────────────────────────────
        let input = match (&state.status, &state.session) {
            (GameStatus::Playing, Some(session)) => {
                frame_input(&key_frame, &mouse, session.player.pos, frame)
            }
            _ => FrameInput::default(),
        };
        state = tick(&state, &input, rng);

        let swirling = state
            .session
            .as_ref()
            .is_some_and(|s| state.status == GameStatus::Playing && s.player.effects.swirling);
        audio.play(&state.events, swirling);

        display::render(out, &state, config.fog_of_war)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve()?;
    init_logging(&config.log_file)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, fog = config.fog_of_war, connected = config.require_connected_levels, "starting");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("keyboard enhancement unavailable, using hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped, program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result.context("terminal I/O failed")
}
