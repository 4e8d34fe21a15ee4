//! Terminal front-end for `FrameView` snapshots.
//!
//! Each function receives a mutable writer and an immutable `FrameView`.
//! No game logic is performed; this module only scales the pixel field onto
//! the terminal grid and translates sprites into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_blaster::entities::{GamePhase, PowerUpKind, Rgb};
use space_blaster::view::{FrameView, Hud, Shape, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_FLASH: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Field → grid mapping ──────────────────────────────────────────────────────

/// Maps field pixels onto the cells inside the border (rows 2 .. rows-3).
struct Grid {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Grid {
    fn new(view: &FrameView, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Self {
            cols,
            rows,
            sx: inner_w / view.field.w.max(1.0),
            sy: inner_h / view.field.h.max(1.0),
        }
    }

    /// Cell for a field point, or `None` when it falls outside the border.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = 1 + (x * self.sx).floor() as i32;
        let row = 2 + (y * self.sy).floor() as i32;
        let inside = col >= 1
            && col < self.cols as i32 - 1
            && row >= 2
            && row < self.rows as i32 - 2;
        inside.then_some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols`×`rows` terminal.
pub fn render<W: Write>(out: &mut W, view: &FrameView, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let grid = Grid::new(view, cols, rows);
    draw_border(out, &grid, view.hud.flash_ms.is_some())?;
    draw_hud(out, &view.hud, cols)?;

    if view.hud.phase != GamePhase::Menu {
        for sprite in &view.sprites {
            draw_sprite(out, &grid, sprite)?;
        }
    }

    draw_controls_hint(out, &view.hud, rows)?;

    match view.hud.phase {
        GamePhase::Menu => draw_menu(out, &view.hud, cols, rows)?,
        GamePhase::Paused => draw_banner(out, &[("PAUSED", Color::White), ("P - Resume", C_HINT)], cols, rows)?,
        GamePhase::GameOver => draw_game_over(out, &view.hud, cols, rows)?,
        GamePhase::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid, flash: bool) -> std::io::Result<()> {
    let w = grid.cols as usize;
    let h = grid.rows;

    // Rapid-fire pickup lights the frame up briefly
    out.queue(style::SetForegroundColor(if flash { C_BORDER_FLASH } else { C_BORDER }))?;

    // Top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, cols: u16) -> std::io::Result<()> {
    // Left: score, level, best
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Lvl:{:>3}  Best:{:>6}",
        hud.score, hud.level, hud.high_score
    )))?;

    // Right: hearts, then shield pips
    let hearts = "♥".repeat(hud.health as usize);
    let pips = "▪".repeat(hud.shield as usize);
    let width = hearts.chars().count() + pips.chars().count() + 1;
    let rx = cols.saturating_sub(width as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&hearts))?;
    out.queue(Print(" "))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(&pips))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, grid: &Grid, sprite: &Sprite) -> std::io::Result<()> {
    let (cx, cy) = sprite.rect.center();
    let Some((col, row)) = grid.cell(cx, cy) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(rgb(sprite.color)))?;

    match sprite.shape {
        Shape::Ship => {
            // Sprite (2 rows, 3 cols):
            //   ▲       ← row y      (tip)
            //  /█\      ← row y+1    (fuselage + wings)
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("▲"))?;
            if row + 1 < grid.rows.saturating_sub(2) {
                out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
                out.queue(Print("/█\\"))?;
            }
        }
        Shape::Diamond => {
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
            out.queue(Print("<◆>"))?;
        }
        Shape::Circle(SpriteKind::Projectile) => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("║"))?;
        }
        Shape::Circle(SpriteKind::PowerUp(kind)) => {
            let glyph = match kind {
                PowerUpKind::Heal => "♥",
                PowerUpKind::Shield => "◈",
                PowerUpKind::Rapid => "!",
            };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
        Shape::Dot => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, hud: &Hud, rows: u16) -> std::io::Result<()> {
    let hint = match hud.phase {
        GamePhase::Menu => "ENTER / SPACE : Start   Q : Quit",
        GamePhase::Playing => "←↑↓→ / WASD : Move   SPACE : Shoot   P : Pause   Q : Quit",
        GamePhase::Paused => "P : Resume   Q : Quit",
        GamePhase::GameOver => "R : Restart   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centered block of lines.
fn draw_banner<W: Write>(
    out: &mut W,
    lines: &[(&str, Color)],
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, hud: &Hud, cols: u16, rows: u16) -> std::io::Result<()> {
    let best = format!("Best Score: {}", hud.high_score);
    let lines: &[(&str, Color)] = &[
        ("★  SPACE  BLASTER  ★", Color::Cyan),
        (best.as_str(), Color::Yellow),
        ("", Color::Reset),
        ("Catch falling power-ups:", C_HINT),
        ("♥ heal   ◈ shield   ! rapid fire", Color::White),
        ("", Color::Reset),
        ("ENTER / SPACE : Start", Color::White),
    ];
    draw_banner(out, lines, cols, rows)
}

fn draw_game_over<W: Write>(out: &mut W, hud: &Hud, cols: u16, rows: u16) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", hud.score);
    let new_best = hud.score >= hud.high_score && hud.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.high_score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), best_color),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    draw_banner(out, lines, cols, rows)
}
