//! Collision pass: finds every overlap, removes what was destroyed and
//! tallies score, lives and boss health. Anything the outside world might
//! want to react to is reported as a `GameEvent`; this pass never changes
//! the phase itself, the level controller reads the aftermath and decides.

use crate::entities::{GameWorld, Mode};
use crate::events::GameEvent;
use crate::tuning::{
    ALIEN_HEIGHT, ALIEN_WIDTH, BOSS_HEIGHT, BOSS_WIDTH, SCORE_PER_ALIEN, SHIP_HEIGHT, SHIP_WIDTH,
};

/// Bullets are points; sprites are boxes anchored at their top-left corner.
fn inside(bullet_x: f32, bullet_y: f32, x: f32, y: f32, w: u32, h: u32) -> bool {
    bullet_x >= x && bullet_x < x + w as f32 && bullet_y >= y && bullet_y < y + h as f32
}

pub(super) fn resolve(world: &mut GameWorld, events: &mut Vec<GameEvent>) {
    let ship = world.ship;
    let mut breached = false;

    match &mut world.mode {
        Mode::Formation { aliens } => {
            // ── Player bullets vs aliens ─────────────────────────────────
            let mut dead_aliens: Vec<usize> = Vec::new();
            let mut spent_bullets: Vec<usize> = Vec::new();

            for (bi, bullet) in world.player_bullets.iter().enumerate() {
                for (ai, alien) in aliens.iter().enumerate() {
                    // A bullet takes out at most one alien: the first in
                    // formation order whose box it sits in.
                    if inside(bullet.x, bullet.y, alien.x, alien.y, ALIEN_WIDTH, ALIEN_HEIGHT)
                        && !dead_aliens.contains(&ai)
                    {
                        dead_aliens.push(ai);
                        spent_bullets.push(bi);
                        break;
                    }
                }
            }

            for _ in &dead_aliens {
                world.state.score += SCORE_PER_ALIEN;
                events.push(GameEvent::AlienHit);
            }

            *aliens = aliens
                .iter()
                .enumerate()
                .filter(|(i, _)| !dead_aliens.contains(i))
                .map(|(_, a)| *a)
                .collect();
            world.player_bullets = world
                .player_bullets
                .iter()
                .enumerate()
                .filter(|(i, _)| !spent_bullets.contains(i))
                .map(|(_, b)| *b)
                .collect();

            // An alien that has marched down to the ship's row has broken
            // through; the toll is one life per frame until it is dealt with.
            breached = aliens.iter().any(|alien| alien.y >= ship.y);
        }
        Mode::Boss { boss } => {
            // ── Player bullets vs the boss ───────────────────────────────
            let mut spent_bullets: Vec<usize> = Vec::new();

            for (bi, bullet) in world.player_bullets.iter().enumerate() {
                if inside(bullet.x, bullet.y, boss.x, boss.y, BOSS_WIDTH, BOSS_HEIGHT) {
                    spent_bullets.push(bi);
                    if boss.health > 0 {
                        boss.health -= 1;
                        events.push(GameEvent::BossHit);
                        if boss.health == 0 {
                            events.push(GameEvent::BossDefeated);
                        }
                    }
                }
            }

            world.player_bullets = world
                .player_bullets
                .iter()
                .enumerate()
                .filter(|(i, _)| !spent_bullets.contains(i))
                .map(|(_, b)| *b)
                .collect();
        }
    }

    // ── Enemy bullets vs the ship ────────────────────────────────────────────
    let mut hits: Vec<usize> = Vec::new();
    for (bi, bullet) in world.alien_bullets.iter().enumerate() {
        if inside(bullet.x, bullet.y, ship.x, ship.y, SHIP_WIDTH, SHIP_HEIGHT) {
            hits.push(bi);
        }
    }
    if !hits.is_empty() {
        world.alien_bullets = world
            .alien_bullets
            .iter()
            .enumerate()
            .filter(|(i, _)| !hits.contains(i))
            .map(|(_, b)| *b)
            .collect();
    }

    for _ in &hits {
        lose_life(world, events, |left| GameEvent::ShipHit { lives_left: left });
    }
    if breached {
        lose_life(world, events, |left| GameEvent::FormationBreached {
            lives_left: left,
        });
    }
}

/// Deduct one life and report it; the fatal loss also announces the ship's
/// destruction. Further losses on the same frame are swallowed so the
/// destruction fires once.
fn lose_life(
    world: &mut GameWorld,
    events: &mut Vec<GameEvent>,
    event_for: impl Fn(u32) -> GameEvent,
) {
    if world.state.lives == 0 {
        return;
    }
    world.state.lives -= 1;
    events.push(event_for(world.state.lives));
    if world.state.lives == 0 {
        events.push(GameEvent::ShipDestroyed);
    }
}
