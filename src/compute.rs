//! Pure game-logic functions.
//!
//! Every public operation takes an immutable reference to the current
//! `GameWorld` (plus the held-key view, the caller's clock in milliseconds,
//! and an RNG handle where randomness is involved) and returns a brand-new
//! world together with the events the step produced. Side effects are
//! limited to the injected RNG, so a seeded generator reproduces any run.
//!
//! A tick executes the subsystems in a fixed order: movement, then
//! collision, then the level controller. Keyboard edges (shoot, restart,
//! the boss shortcut) arrive between ticks as the separate calls below.

mod collision;
mod levels;
mod movement;

use rand::Rng;

use crate::entities::{Bullet, GameState, GameWorld, InputState, Mode, Phase, Ship};
use crate::events::GameEvent;
use crate::tuning::{alien_speed, BOSS_LEVEL, SHIP_START_X, SHIP_Y, SHOT_COOLDOWN_MS, START_LIVES};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: level 1, full lives, a fresh formation, the
/// ship centred on its fixed row.
pub fn init_state() -> GameWorld {
    GameWorld {
        ship: Ship {
            x: SHIP_START_X,
            y: SHIP_Y,
        },
        player_bullets: Vec::new(),
        alien_bullets: Vec::new(),
        mode: Mode::Formation {
            aliens: levels::spawn_formation(1),
        },
        state: GameState {
            level: 1,
            lives: START_LIVES,
            score: 0,
            alien_speed: alien_speed(1),
            phase: Phase::Playing,
        },
        last_shot_ms: None,
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// While a level banner is on screen only the controller runs (it is
/// counting down to the next spawn); movement and collision stay
/// suspended. After game over the tick is a no-op, though the driver
/// normally stops calling it altogether.
pub fn tick(
    world: &GameWorld,
    input: &InputState,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (GameWorld, Vec<GameEvent>) {
    let mut next = world.clone();
    let mut events = Vec::new();
    next.frame += 1;

    match next.state.phase {
        Phase::Playing => {
            movement::update(&mut next, input, now_ms, rng);
            collision::resolve(&mut next, &mut events);
            levels::advance(&mut next, now_ms, &mut events);
        }
        Phase::LevelTransition { .. } => {
            levels::advance(&mut next, now_ms, &mut events);
        }
        Phase::GameOver { .. } => {}
    }

    (next, events)
}

// ── Input-driven edge actions ────────────────────────────────────────────────

/// Fire a bullet from the ship's nose, rate-limited to one shot per
/// cooldown window. Ignored outside active play.
pub fn player_shoot(world: &GameWorld, now_ms: u64) -> (GameWorld, Vec<GameEvent>) {
    if world.state.phase != Phase::Playing {
        return (world.clone(), Vec::new());
    }
    if let Some(last) = world.last_shot_ms {
        if now_ms.saturating_sub(last) <= SHOT_COOLDOWN_MS {
            return (world.clone(), Vec::new());
        }
    }

    let mut next = world.clone();
    next.player_bullets.push(Bullet {
        x: next.ship.x + 2.0, // centre of the ship
        y: next.ship.y - 1.0, // just above it
    });
    next.last_shot_ms = Some(now_ms);
    (next, vec![GameEvent::ShotFired])
}

/// Throw away a finished game and start over at level 1. Only meaningful
/// on the game-over screen; everywhere else the world comes back unchanged.
pub fn restart(world: &GameWorld) -> GameWorld {
    if !world.state.is_game_over() {
        return world.clone();
    }
    init_state()
}

/// Debug shortcut straight to the boss encounter: clears the formation and
/// all bullets, then runs the usual level banner before a full-health boss
/// spawns. Available any time before game over.
pub fn jump_to_boss(world: &GameWorld, now_ms: u64) -> (GameWorld, Vec<GameEvent>) {
    if world.state.is_game_over() {
        return (world.clone(), Vec::new());
    }

    let mut next = world.clone();
    next.state.level = BOSS_LEVEL;
    next.state.alien_speed = alien_speed(BOSS_LEVEL);
    next.state.phase = Phase::LevelTransition { started_ms: now_ms };
    next.mode = Mode::Formation { aliens: Vec::new() };
    next.player_bullets.clear();
    next.alien_bullets.clear();
    (
        next,
        vec![GameEvent::LevelCleared {
            next_level: BOSS_LEVEL,
        }],
    )
}
