//! Movement pass: ship steering, bullet travel, the formation march and
//! the boss's horizontal sweep, plus the enemy fire that rides on each.

use rand::Rng;

use crate::entities::{Alien, Boss, Bullet, GameWorld, InputState, Mode};
use crate::tuning::{
    ALIEN_BULLET_SPEED, ALIEN_MAX_X, ALIEN_MOVE_INTERVAL, ALIEN_SHOT_CHANCE,
    ALIEN_SHOT_COOLDOWN_MS, BOSS_MAX_X, BOSS_SHOT_COOLDOWN_MS, BOSS_SPEED, DISPLAY_HEIGHT,
    PLAYER_BULLET_SPEED, SHIP_MAX_X,
};

pub(super) fn update(world: &mut GameWorld, input: &InputState, now_ms: u64, rng: &mut impl Rng) {
    steer_ship(world, input);
    advance_bullets(world);

    let speed = world.state.alien_speed;
    let frame = world.frame;
    match &mut world.mode {
        Mode::Formation { aliens } => {
            march_formation(aliens, frame, speed, &mut world.alien_bullets, now_ms, rng);
        }
        Mode::Boss { boss } => {
            sweep_boss(boss, &mut world.alien_bullets, now_ms);
        }
    }
}

// ── Ship and bullets ─────────────────────────────────────────────────────────

/// Left and right are independent held keys; holding both cancels out.
fn steer_ship(world: &mut GameWorld, input: &InputState) {
    if input.left && world.ship.x > 0.0 {
        world.ship.x -= 1.0;
    }
    if input.right && world.ship.x < SHIP_MAX_X {
        world.ship.x += 1.0;
    }
}

/// Player bullets race up, enemy bullets drift down, and either kind is
/// dropped the moment it leaves the 64x32 field.
fn advance_bullets(world: &mut GameWorld) {
    world.player_bullets.retain_mut(|bullet| {
        bullet.y -= PLAYER_BULLET_SPEED;
        bullet.y > 0.0
    });
    world.alien_bullets.retain_mut(|bullet| {
        bullet.y += ALIEN_BULLET_SPEED;
        bullet.y < DISPLAY_HEIGHT as f32
    });
}

// ── Formation ────────────────────────────────────────────────────────────────

/// The formation only advances every `ALIEN_MOVE_INTERVAL`th frame, which
/// gives the classic stepped march at 60Hz.
fn march_formation(
    aliens: &mut [Alien],
    frame: u64,
    speed: f32,
    alien_bullets: &mut Vec<Bullet>,
    now_ms: u64,
    rng: &mut impl Rng,
) {
    if frame % ALIEN_MOVE_INTERVAL != 0 {
        return;
    }

    for alien in aliens.iter_mut() {
        // The edge test runs before the step: an alien sitting on a bound
        // turns and drops a row on the same advance, and the clamp keeps
        // the sprite inside the field no matter the speed.
        if alien.x <= 0.0 {
            alien.direction = 1.0;
            alien.y += 1.0;
        } else if alien.x >= ALIEN_MAX_X {
            alien.direction = -1.0;
            alien.y += 1.0;
        }
        alien.x = (alien.x + speed * alien.direction).clamp(0.0, ALIEN_MAX_X);
    }

    // One firing roll per advance. A single alien is drawn at random, and
    // it only actually fires if its own re-fire interval has passed.
    if !aliens.is_empty() && rng.gen_bool(ALIEN_SHOT_CHANCE) {
        let shooter = &mut aliens[rng.gen_range(0..aliens.len())];
        let ready = shooter
            .last_shot_ms
            .map_or(true, |t| now_ms.saturating_sub(t) > ALIEN_SHOT_COOLDOWN_MS);
        if ready {
            alien_bullets.push(Bullet {
                x: shooter.x + 2.0, // centre of the alien
                y: shooter.y + 5.0, // just below it
            });
            shooter.last_shot_ms = Some(now_ms);
        }
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

/// The boss sweeps every frame (no march interval) and never descends; its
/// pressure comes from a metronomic cannon instead.
fn sweep_boss(boss: &mut Boss, alien_bullets: &mut Vec<Bullet>, now_ms: u64) {
    if boss.x <= 0.0 {
        boss.direction = 1.0;
    } else if boss.x >= BOSS_MAX_X {
        boss.direction = -1.0;
    }
    boss.x = (boss.x + BOSS_SPEED * boss.direction).clamp(0.0, BOSS_MAX_X);

    let ready = boss
        .last_shot_ms
        .map_or(true, |t| now_ms.saturating_sub(t) > BOSS_SHOT_COOLDOWN_MS);
    if ready {
        alien_bullets.push(Bullet {
            x: boss.x + 14.0, // mouth of the sprite
            y: boss.y + 20.0,
        });
        boss.last_shot_ms = Some(now_ms);
    }
}
