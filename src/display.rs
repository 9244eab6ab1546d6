/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world.  No game logic is performed; this module only scales field
/// coordinates onto the terminal cell grid and emits terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::entities::{GameStatus, GameWorld, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BARRIER: Color = Color::DarkBlue;
const C_BULLET: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_DAMAGED: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_GOAL: Color = Color::Yellow;
const C_BOSS: Color = Color::Red;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Field → terminal scaling ──────────────────────────────────────────────────

/// Terminal cell grid the 800×700 field is projected onto.  Row 0 is the
/// HUD and the last row the controls hint; everything between is play area.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn play_rows(&self) -> i32 {
        self.rows.saturating_sub(2) as i32
    }

    fn col_of(&self, x: i32) -> i32 {
        x * self.cols as i32 / FIELD_WIDTH
    }

    fn row_of(&self, y: i32) -> i32 {
        1 + y * self.play_rows() / FIELD_HEIGHT
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  Terminal states replace the field with a
/// full win/lose screen.
pub fn render<W: Write>(out: &mut W, world: &GameWorld) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match world.status {
        GameStatus::Running => draw_field(out, world, &view)?,
        GameStatus::Won => draw_end_screen(out, &view, "YOU  ESCAPED  THE  MAZE", Color::Green)?,
        GameStatus::Lost => draw_end_screen(out, &view, "CAUGHT  —  GAME  OVER", Color::Red)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// Back-to-front draw order: barriers, bullets, enemies, player, goal, boss.
fn draw_field<W: Write>(out: &mut W, world: &GameWorld, view: &Viewport) -> std::io::Result<()> {
    draw_hud(out, world, view)?;

    for barrier in &world.barriers {
        draw_world_rect(out, view, barrier, "█", C_BARRIER)?;
    }
    for bullet in &world.bullets {
        draw_world_rect(out, view, &bullet.rect, "»", C_BULLET)?;
    }
    for enemy in &world.enemies {
        let color = if enemy.damaged { C_ENEMY_DAMAGED } else { C_ENEMY };
        draw_world_rect(out, view, &enemy.rect, "▒", color)?;
    }
    draw_world_rect(out, view, &world.player.rect, "@", C_PLAYER)?;
    draw_world_rect(out, view, &world.goal, "◇", C_GOAL)?;
    draw_world_rect(out, view, &world.boss.rect, "▓", C_BOSS)?;

    draw_controls_hint(out, view)?;
    Ok(())
}

/// Fill the terminal cells covered by a field rect.  Rects partially off the
/// field (the maze's top wall starts above it) are clipped; fully off-screen
/// rects draw nothing.
fn draw_world_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    symbol: &str,
    color: Color,
) -> std::io::Result<()> {
    if rect.right() < 0 || rect.x > FIELD_WIDTH || rect.bottom() < 0 || rect.y > FIELD_HEIGHT {
        return Ok(());
    }
    let c0 = view.col_of(rect.x).max(0);
    let mut c1 = view.col_of(rect.right()).min(view.cols as i32);
    let r0 = view.row_of(rect.y).max(1);
    let mut r1 = view.row_of(rect.bottom()).min(1 + view.play_rows());
    if c1 <= c0 {
        c1 = c0 + 1; // a thin rect still shows as one cell
    }
    if r1 <= r0 {
        r1 = r0 + 1;
    }

    out.queue(style::SetForegroundColor(color))?;
    let width = (c1 - c0) as usize;
    for row in r0..r1 {
        if row < 1 || row > view.play_rows() {
            continue;
        }
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        out.queue(Print(symbol.repeat(width)))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &GameWorld, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Ammo: {:>3}", world.player.ammo)))?;

    let reloading = if !world.player.can_strike { "[RELOADING]" } else { "" };
    let rx = view.cols.saturating_sub(reloading.len() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(reloading))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / WASD : Move   SPACE / CLICK : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Win / lose screens ────────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    view: &Viewport,
    headline: &str,
    color: Color,
) -> std::io::Result<()> {
    let border = "═".repeat(headline.chars().count() + 4);
    let lines: &[(String, Color)] = &[
        (format!("╔{}╗", border), color),
        (format!("║  {}  ║", headline), color),
        (format!("╚{}╝", border), color),
        (String::from("Q - Quit"), Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, line_color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*line_color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}
