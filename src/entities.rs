//! All game entity types and the master state record. Pure data; every
//! rule that moves or removes these lives in `compute`.

use crate::tuning::BOSS_LEVEL;

// ── Level / mode control ──────────────────────────────────────────────────────

/// Where the level controller currently stands.
///
/// `GameOver` is terminal for the simulation: ticks stop, and only an
/// explicit restart builds a fresh world. The `victory` flag distinguishes
/// beating the boss from running out of lives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Playing,
    /// Gameplay suspended while the next level's banner shows.
    LevelTransition { started_ms: u64 },
    GameOver { victory: bool },
}

/// Which enemy set is on the field. The two variants never coexist and
/// only the level controller swaps them.
#[derive(Clone, Debug)]
pub enum Mode {
    Formation { aliens: Vec<Alien> },
    Boss { boss: Boss },
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A single pixel of ordnance. Player bullets climb, alien bullets fall;
/// which is which is decided by the store it sits in, not a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Ship {
    pub x: f32,
    /// Fixed; the ship only ever slides sideways.
    pub y: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    /// +1.0 marching right, -1.0 marching left.
    pub direction: f32,
    /// When this alien last fired; `None` until its first shot.
    pub last_shot_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub direction: f32,
    pub last_shot_ms: Option<u64>,
    pub health: u32,
}

// ── Scoreboard ────────────────────────────────────────────────────────────────

/// Level, lives, score and the controller phase. Mutated only by the
/// simulation; the renderer and audio adapter read it.
#[derive(Clone, Debug)]
pub struct GameState {
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    /// Horizontal formation speed for the current level.
    pub alien_speed: f32,
    pub phase: Phase,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn is_victory(&self) -> bool {
        matches!(self.phase, Phase::GameOver { victory: true })
    }

    pub fn in_transition(&self) -> bool {
        matches!(self.phase, Phase::LevelTransition { .. })
    }

    pub fn is_boss_level(&self) -> bool {
        self.level >= BOSS_LEVEL
    }
}

// ── Held-key view ─────────────────────────────────────────────────────────────

/// The slice of the key-state map the simulation reads each tick. Discrete
/// actions (shoot, restart, cheat) arrive as separate calls instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world. Cloneable so the pure update functions can return a
/// new copy without mutating the caller's; the frame driver owns the one
/// live instance and threads it through every subsystem explicitly.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub ship: Ship,
    pub player_bullets: Vec<Bullet>,
    pub alien_bullets: Vec<Bullet>,
    pub mode: Mode,
    pub state: GameState,
    /// When the player last fired; `None` until the first shot.
    pub last_shot_ms: Option<u64>,
    /// Ticks since the world was created. Gates formation advances.
    pub frame: u64,
}

impl GameWorld {
    /// Remaining boss health, if a boss is on the field.
    pub fn boss_health(&self) -> Option<u32> {
        match &self.mode {
            Mode::Boss { boss } => Some(boss.health),
            Mode::Formation { .. } => None,
        }
    }

    /// Living formation aliens; zero in boss mode.
    pub fn alien_count(&self) -> usize {
        match &self.mode {
            Mode::Formation { aliens } => aliens.len(),
            Mode::Boss { .. } => 0,
        }
    }
}
