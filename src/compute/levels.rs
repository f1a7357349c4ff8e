//! Level controller: the one place that flips the phase and populates the
//! field. It inspects the aftermath each frame, starts the interlude when a
//! wave falls or a life runs out, and spawns the next wave (or the boss)
//! when the interlude's banner has run its course.

use crate::entities::{Alien, Boss, GameWorld, Mode, Phase};
use crate::events::GameEvent;
use crate::tuning::{
    alien_speed, formation_rows, BOSS_LEVEL, BOSS_MAX_HEALTH, BOSS_START_Y, FORMATION_COLS,
    FORMATION_ROW_PITCH, FORMATION_SPACING_X, FORMATION_START_Y, LEVEL_TRANSITION_MS,
};

pub(super) fn advance(world: &mut GameWorld, now_ms: u64, events: &mut Vec<GameEvent>) {
    match world.state.phase {
        Phase::Playing => {
            // Defeat is checked ahead of victory, so trading the last life
            // for the boss's last hit point still ends the run.
            if world.state.lives == 0 {
                world.state.phase = Phase::GameOver { victory: false };
                return;
            }
            match &world.mode {
                Mode::Boss { boss } if boss.health == 0 => {
                    world.state.phase = Phase::GameOver { victory: true };
                }
                Mode::Formation { aliens } if aliens.is_empty() => {
                    begin_interlude(world, now_ms, events);
                }
                _ => {}
            }
        }
        Phase::LevelTransition { started_ms } => {
            if now_ms.saturating_sub(started_ms) > LEVEL_TRANSITION_MS {
                populate(world, events);
                world.state.phase = Phase::Playing;
            }
        }
        Phase::GameOver { .. } => {}
    }
}

/// A cleared wave bumps the level, sweeps leftover bullets off the field
/// and starts the banner countdown. The new wave spawns when it ends.
fn begin_interlude(world: &mut GameWorld, now_ms: u64, events: &mut Vec<GameEvent>) {
    world.state.level += 1;
    world.state.alien_speed = alien_speed(world.state.level);
    world.player_bullets.clear();
    world.alien_bullets.clear();
    world.state.phase = Phase::LevelTransition { started_ms: now_ms };
    events.push(GameEvent::LevelCleared {
        next_level: world.state.level,
    });
}

fn populate(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    if world.state.level >= BOSS_LEVEL {
        world.mode = Mode::Boss { boss: spawn_boss() };
        events.push(GameEvent::BossModeEntered);
    } else {
        world.mode = Mode::Formation {
            aliens: spawn_formation(world.state.level),
        };
        events.push(GameEvent::LevelStarted {
            level: world.state.level,
        });
    }
}

/// Lay out the wave for a level: evenly spaced columns, rows stacked from
/// the top of the field, everyone marching right.
pub(super) fn spawn_formation(level: u32) -> Vec<Alien> {
    let rows = formation_rows(level);
    let mut aliens = Vec::with_capacity((rows * FORMATION_COLS) as usize);
    for row in 0..rows {
        for col in 0..FORMATION_COLS {
            aliens.push(Alien {
                x: FORMATION_SPACING_X * (col + 1) as f32,
                y: FORMATION_START_Y + row as f32 * FORMATION_ROW_PITCH,
                direction: 1.0,
                last_shot_ms: None,
            });
        }
    }
    aliens
}

fn spawn_boss() -> Boss {
    Boss {
        x: 0.0,
        y: BOSS_START_Y,
        direction: 1.0,
        last_shot_ms: None,
        health: BOSS_MAX_HEALTH,
    }
}
