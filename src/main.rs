use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};

use maze_blaster::compute::{
    halt_player_x, halt_player_y, init_world, player_strike, push_player_x, push_player_y, tick,
};
use maze_blaster::config::{self, Settings};
use maze_blaster::debug::DebugLog;
use maze_blaster::display;
use maze_blaster::entities::{GameStatus, GameWorld};

const FRAME: Duration = Duration::from_millis(50); // 20 ticks/sec

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is well above 1/(4·50 ms), so a held key keeps
/// refreshing its window; expiry stands in for the missing release event.
const HOLD_WINDOW: u64 = 4;

// ── Input mapping ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Directional key → (axis, velocity sign).  Arrow keys with WASD aliases.
fn direction_of(code: &KeyCode) -> Option<(Axis, i32)> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some((Axis::Y, -1)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some((Axis::Y, 1)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some((Axis::X, -1)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some((Axis::X, 1)),
        _ => None,
    }
}

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate frame loop: drain input events, advance the world one tick,
/// render, sleep out the remainder of the frame.
///
/// Key-down on a directional key adds the player speed to that axis once per
/// physical press; key-up zeroes the axis outright.  The `key_frame` map
/// tracks held keys so that classic terminals — where OS key repeat arrives
/// as extra `Press` events and releases never arrive at all — neither
/// re-apply the velocity nor leave the player drifting: a key that stops
/// refreshing its hold window gets a synthesized release.
///
/// A quit event clears `run`; the current frame still completes and the
/// loop exits at the top of the next iteration.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut GameWorld,
    rx: &mpsc::Receiver<Event>,
    log: &mut DebugLog,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut run = true;

    while run {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                run = false;
                                log.message("Main", "Quit!");
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                run = false;
                                log.message("Main", "Quit!");
                            }
                            KeyCode::Char(' ') if world.status == GameStatus::Running => {
                                // OS repeat shows as extra presses; fire once
                                if !is_held(&key_frame, &code, frame) {
                                    *world = player_strike(world);
                                    log.message("Player", "Strike!");
                                }
                            }
                            _ => {
                                if world.status == GameStatus::Running {
                                    if let Some((axis, sign)) = direction_of(&code) {
                                        if !is_held(&key_frame, &code, frame) {
                                            let delta = sign * world.player_speed;
                                            *world = match axis {
                                                Axis::X => push_player_x(world, delta),
                                                Axis::Y => push_player_y(world, delta),
                                            };
                                            log.message("Controls", "KEYDOWN");
                                        }
                                    }
                                }
                            }
                        }
                        key_frame.insert(code, frame);
                    }
                    // Repeat: refresh timestamp so the key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: zero the axis (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                        if let Some((axis, _)) = direction_of(&code) {
                            *world = match axis {
                                Axis::X => halt_player_x(world),
                                Axis::Y => halt_player_y(world),
                            };
                            log.message("Controls", "KEYUP");
                        }
                    }
                },
                Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), .. }) => {
                    if world.status == GameStatus::Running {
                        *world = player_strike(world);
                        log.message("Player", "Strike!");
                    }
                }
                _ => {}
            }
        }

        // ── Synthesize releases for keys whose hold window expired ────────────
        let expired: Vec<KeyCode> = key_frame
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(code, _)| code.clone())
            .collect();
        for code in expired {
            key_frame.remove(&code);
            if let Some((axis, _)) = direction_of(&code) {
                *world = match axis {
                    Axis::X => halt_player_x(world),
                    Axis::Y => halt_player_y(world),
                };
                log.message("Controls", "KEYUP");
            }
        }

        // ── Advance the simulation ────────────────────────────────────────────
        if world.status == GameStatus::Running {
            *world = tick(world);
            match world.status {
                GameStatus::Won => log.message("Main", "Win!"),
                GameStatus::Lost => log.message("Main", "Lose!"),
                GameStatus::Running => {}
            }
        }

        display::render(out, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_PATH.to_string());
    let settings: Settings = config::load_settings(Path::new(&config_path))?;

    let mut log = DebugLog::new(&settings.title, settings.debug);
    log.message("Main", "Start!");
    if !settings.collision {
        log.message("Warning", "Collision is disabled!");
    }

    let mut world = init_world(&settings);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release events from the terminal.  Kitty-protocol
    // terminals support this; others fall back to the hold-window scheme.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut world, &rx, &mut log);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
