//! Fixed progression table and playfield geometry.
//!
//! All lengths are in the 64x32 logical pixel space; mapping logical pixels
//! to terminal cells is the renderer's business. There is no difficulty
//! selection: the only knob the game turns is `level`.

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const DISPLAY_WIDTH: u32 = 64;
pub const DISPLAY_HEIGHT: u32 = 32;

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: u32 = 5;
pub const SHIP_HEIGHT: u32 = 5;
pub const SHIP_START_X: f32 = 32.0;
/// Fixed row: the ship sits flush with the bottom of the playfield.
pub const SHIP_Y: f32 = 27.0; // DISPLAY_HEIGHT - SHIP_HEIGHT
pub const SHIP_MAX_X: f32 = 59.0; // DISPLAY_WIDTH - SHIP_WIDTH

pub const START_LIVES: u32 = 5;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Rows a player bullet climbs per tick.
pub const PLAYER_BULLET_SPEED: f32 = 2.0;
/// Rows an enemy bullet falls per tick.
pub const ALIEN_BULLET_SPEED: f32 = 0.25;
/// Minimum wall-clock gap between player shots.
pub const SHOT_COOLDOWN_MS: u64 = 200;

// ── Formation aliens ──────────────────────────────────────────────────────────

pub const ALIEN_WIDTH: u32 = 5;
pub const ALIEN_HEIGHT: u32 = 5;
pub const ALIEN_MAX_X: f32 = 59.0; // DISPLAY_WIDTH - ALIEN_WIDTH
/// Horizontal pixels per advance at level 1.
pub const ALIEN_BASE_SPEED: f32 = 0.25;
/// The formation advances only every Nth tick, decoupling its visual speed
/// from the frame rate.
pub const ALIEN_MOVE_INTERVAL: u64 = 4;
/// Chance that the formation fires at all on a given advance tick.
pub const ALIEN_SHOT_CHANCE: f64 = 0.05;
/// Per-alien minimum re-fire interval.
pub const ALIEN_SHOT_COOLDOWN_MS: u64 = 2000;

pub const FORMATION_COLS: u32 = 5;
/// Aliens are spread evenly: column c sits at `(c + 1) * this`.
pub const FORMATION_SPACING_X: f32 = 64.0 / 6.0; // DISPLAY_WIDTH / (COLS + 1)
pub const FORMATION_START_Y: f32 = 2.0;
/// Sprite height plus one row of daylight.
pub const FORMATION_ROW_PITCH: f32 = 6.0;
pub const FORMATION_MAX_ROWS: u32 = 4;

/// Rows in the formation for a given level: 2 at level 1, one more per
/// level, capped so the lowest row still spawns clear of the ship.
pub fn formation_rows(level: u32) -> u32 {
    (1 + level).min(FORMATION_MAX_ROWS)
}

/// Horizontal speed of formation aliens at a given level: +25% per level
/// over the base.
pub fn alien_speed(level: u32) -> f32 {
    ALIEN_BASE_SPEED * (1.0 + (level - 1) as f32 * 0.25)
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// First level fought as a boss encounter instead of a formation.
pub const BOSS_LEVEL: u32 = 4;
pub const BOSS_WIDTH: u32 = 28;
pub const BOSS_HEIGHT: u32 = 20;
pub const BOSS_MAX_X: f32 = 36.0; // DISPLAY_WIDTH - BOSS_WIDTH
pub const BOSS_START_Y: f32 = 2.0;
pub const BOSS_SPEED: f32 = 0.5;
/// The boss fires on a fixed cooldown, never randomly.
pub const BOSS_SHOT_COOLDOWN_MS: u64 = 1000;
pub const BOSS_MAX_HEALTH: u32 = 50;

// ── Scoring and pacing ────────────────────────────────────────────────────────

pub const SCORE_PER_ALIEN: u32 = 10;
/// Gameplay stays suspended this long between levels.
pub const LEVEL_TRANSITION_MS: u64 = 2000;
