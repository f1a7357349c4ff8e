//! Rendering layer. All terminal I/O lives here.
//!
//! Each frame is composed onto a 64x32 monochrome pixel canvas first, then
//! pushed to the terminal with half-block glyphs, two pixel rows per
//! character cell, so the field keeps its aspect ratio on an ordinary
//! terminal. No game logic is performed; this module only translates the
//! world into pixels and the pixels into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Colors, Print, SetColors},
    terminal, QueueableCommand,
};

use pixel_invaders::entities::{GameWorld, Mode, Phase};
use pixel_invaders::tuning::{BOSS_MAX_HEALTH, DISPLAY_HEIGHT, DISPLAY_WIDTH};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PIXEL: Color = Color::Green;
const C_PIXEL_DIM: Color = Color::DarkGreen;
const C_BACKDROP: Color = Color::Black;
const C_HUD: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Character rows needed for the canvas (two pixel rows per cell).
const CHAR_ROWS: u16 = (DISPLAY_HEIGHT / 2) as u16;

// ── Sprites ───────────────────────────────────────────────────────────────────

const SHIP_SPRITE: [&str; 5] = [
    "..#..", //
    ".###.", //
    "#####", //
    ".###.", //
    "..#..", //
];

const ALIEN_SPRITE: [&str; 5] = [
    ".#.#.", //
    "#####", //
    "#.#.#", //
    "#####", //
    ".#.#.", //
];

/// The crab: an eye stalk over a broad shell. The drawn body is 16 rows
/// tall; the extra height of its hitbox covers the legs the shell implies.
const BOSS_SPRITE: [&str; 16] = [
    "............................",
    "............................",
    "..#.........................",
    ".###........................",
    ".########################...",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
    ".#########################..",
];

// ── Pixel canvas ──────────────────────────────────────────────────────────────

/// Brightness of a single canvas cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Off,
    Dim,
    Bright,
}

/// Off-screen pixel buffer the frame is composed into before any I/O.
pub struct PixelCanvas {
    cells: [[Shade; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize],
}

impl PixelCanvas {
    pub fn new() -> Self {
        PixelCanvas {
            cells: [[Shade::Off; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize],
        }
    }

    /// Paint one pixel; coordinates off the canvas are silently dropped.
    pub fn set(&mut self, x: i32, y: i32, shade: Shade) {
        if x >= 0 && x < DISPLAY_WIDTH as i32 && y >= 0 && y < DISPLAY_HEIGHT as i32 {
            self.cells[y as usize][x as usize] = shade;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Shade {
        if x >= 0 && x < DISPLAY_WIDTH as i32 && y >= 0 && y < DISPLAY_HEIGHT as i32 {
            self.cells[y as usize][x as usize]
        } else {
            Shade::Off
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, shade: Shade) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, shade);
            }
        }
    }

    /// Stamp a `#`-marked bitmap with its top-left corner at (x, y).
    pub fn blit(&mut self, sprite: &[&str], x: i32, y: i32) {
        for (row, line) in sprite.iter().enumerate() {
            for (col, byte) in line.bytes().enumerate() {
                if byte == b'#' {
                    self.set(x + col as i32, y + row as i32, Shade::Bright);
                }
            }
        }
    }

    /// Draw a line of 5x7 text at a 6-pixel letter pitch. Characters
    /// without a glyph (including space) just advance the pen.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let mut pen = x;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                self.blit(&rows, pen, y);
            }
            pen += 6;
        }
    }
}

/// Pixel width of a line of 5x7 text.
fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        n * 6 - 1
    }
}

// ── 5x7 glyphs ────────────────────────────────────────────────────────────────

fn glyph(ch: char) -> Option<[&'static str; 7]> {
    let rows = match ch {
        'A' => [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'C' => [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."],
        'E' => ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
        'G' => ["#####", "#....", "#....", "#.###", "#...#", "#...#", "#####"],
        'I' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "#####"],
        'L' => ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
        'M' => ["#...#", "##.##", "#.#.#", "#...#", "#...#", "#...#", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        'V' => ["#...#", "#...#", "#...#", "#...#", ".#.#.", ".#.#.", "..#.."],
        'Y' => ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."],
        '0' => [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
        '1' => ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", "#####"],
        '2' => [".###.", "#...#", "....#", "..##.", ".#...", "#....", "#####"],
        '3' => [".###.", "#...#", "....#", "..##.", "....#", "#...#", ".###."],
        '4' => ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
        '5' => ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
        '6' => [".###.", "#....", "#....", "####.", "#...#", "#...#", ".###."],
        '7' => ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
        '8' => [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
        '9' => [".###.", "#...#", "#...#", ".####", "....#", "....#", ".###."],
        _ => return None,
    };
    Some(rows)
}

// ── Frame composition ─────────────────────────────────────────────────────────

/// Paint the whole world onto the canvas. Banners take the field over
/// outright; entities are only drawn during active play.
pub fn compose(canvas: &mut PixelCanvas, world: &GameWorld) {
    match world.state.phase {
        Phase::GameOver { victory: false } => {
            canvas.draw_text("GAME", 17, 12);
            canvas.draw_text("OVER", 17, 21);
        }
        Phase::GameOver { victory: true } => {
            let text = "VICTORY";
            canvas.draw_text(text, (DISPLAY_WIDTH as i32 - text_width(text)) / 2, 12);
        }
        Phase::LevelTransition { .. } => {
            let text = format!("LEVEL {}", world.state.level);
            canvas.draw_text(&text, (DISPLAY_WIDTH as i32 - text_width(&text)) / 2, 12);
        }
        Phase::Playing => {
            draw_lives(canvas, world.state.lives);

            for bullet in &world.player_bullets {
                canvas.set(bullet.x as i32, bullet.y as i32, Shade::Bright);
            }
            for bullet in &world.alien_bullets {
                canvas.set(bullet.x as i32, bullet.y as i32, Shade::Bright);
            }

            match &world.mode {
                Mode::Formation { aliens } => {
                    for alien in aliens {
                        canvas.blit(&ALIEN_SPRITE, alien.x as i32, alien.y as i32);
                    }
                }
                Mode::Boss { boss } => {
                    draw_health_bar(canvas, boss.health);
                    canvas.blit(&BOSS_SPRITE, boss.x as i32, boss.y as i32);
                }
            }

            canvas.blit(&SHIP_SPRITE, world.ship.x as i32, world.ship.y as i32);
        }
    }
}

/// One left-anchored mini-ship per remaining life, lined up along the top.
fn draw_lives(canvas: &mut PixelCanvas, lives: u32) {
    for i in 0..lives as i32 {
        let x = 2 + i * 6;
        canvas.fill_rect(x, 2, 1, 1, Shade::Bright);
        canvas.fill_rect(x, 3, 3, 1, Shade::Bright);
        canvas.fill_rect(x, 4, 5, 1, Shade::Bright);
        canvas.fill_rect(x, 5, 3, 1, Shade::Bright);
        canvas.fill_rect(x, 6, 1, 1, Shade::Bright);
    }
}

/// Centred 30x2 bar: a dim track with the bright part scaled to the
/// boss's remaining health.
fn draw_health_bar(canvas: &mut PixelCanvas, health: u32) {
    let x = (DISPLAY_WIDTH as i32 - 30) / 2;
    canvas.fill_rect(x, 1, 30, 2, Shade::Dim);
    let filled = (health * 30 / BOSS_MAX_HEALTH) as i32;
    canvas.fill_rect(x, 1, filled, 2, Shade::Bright);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: HUD row, the canvas, then the controls hint.
pub fn render<W: Write>(out: &mut W, world: &GameWorld) -> std::io::Result<()> {
    let mut canvas = PixelCanvas::new();
    compose(&mut canvas, world);

    let (cols, rows) = terminal::size()?;
    let ox = cols.saturating_sub(DISPLAY_WIDTH as u16) / 2;
    let oy = rows.saturating_sub(CHAR_ROWS + 2) / 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_hud(out, world, ox, oy)?;
    draw_canvas(out, &canvas, ox, oy + 1)?;
    draw_hint(out, world, ox, oy + 1 + CHAR_ROWS)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row above the canvas) ────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &GameWorld, ox: u16, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(ox, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("SCORE {:>6}", world.state.score)))?;

    let level_str = format!("LEVEL {}", world.state.level);
    let lx = ox + DISPLAY_WIDTH as u16 - level_str.chars().count() as u16;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(level_str))?;
    Ok(())
}

// ── Canvas body ───────────────────────────────────────────────────────────────

fn shade_color(shade: Shade) -> Color {
    match shade {
        Shade::Off => C_BACKDROP,
        Shade::Dim => C_PIXEL_DIM,
        Shade::Bright => C_PIXEL,
    }
}

/// Push the canvas with `▀`: the glyph's ink carries the upper pixel of a
/// pair and the cell background the lower. Colour changes are only queued
/// when a pair differs from its neighbour, which keeps the byte stream
/// small at 60Hz.
fn draw_canvas<W: Write>(
    out: &mut W,
    canvas: &PixelCanvas,
    ox: u16,
    oy: u16,
) -> std::io::Result<()> {
    for char_row in 0..CHAR_ROWS {
        out.queue(cursor::MoveTo(ox, oy + char_row))?;
        let mut last: Option<Colors> = None;
        for x in 0..DISPLAY_WIDTH as i32 {
            let top = canvas.get(x, char_row as i32 * 2);
            let bottom = canvas.get(x, char_row as i32 * 2 + 1);
            let colors = Colors::new(shade_color(top), shade_color(bottom));
            if last != Some(colors) {
                out.queue(SetColors(colors))?;
                last = Some(colors);
            }
            out.queue(Print('▀'))?;
        }
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

// ── Controls hint (row below the canvas) ──────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W, world: &GameWorld, ox: u16, row: u16) -> std::io::Result<()> {
    let hint = if world.state.is_game_over() {
        "Press SPACE to restart   Q : Quit"
    } else {
        "← → / A D : Move   SPACE : Shoot   Q : Quit"
    };
    out.queue(cursor::MoveTo(ox, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
