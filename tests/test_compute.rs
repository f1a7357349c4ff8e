use pixel_invaders::compute::*;
use pixel_invaders::entities::*;
use pixel_invaders::events::GameEvent;
use pixel_invaders::tuning;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn no_input() -> InputState {
    InputState::default()
}

/// World already in the boss encounter, boss parked at the left wall.
fn make_boss_world() -> GameWorld {
    let mut world = init_state();
    world.state.level = tuning::BOSS_LEVEL;
    world.state.alien_speed = tuning::alien_speed(tuning::BOSS_LEVEL);
    world.mode = Mode::Boss {
        boss: Boss {
            x: 0.0,
            y: 2.0,
            direction: 1.0,
            last_shot_ms: None,
            health: tuning::BOSS_MAX_HEALTH,
        },
    };
    world
}

fn the_boss(world: &GameWorld) -> &Boss {
    match &world.mode {
        Mode::Boss { boss } => boss,
        Mode::Formation { .. } => panic!("expected boss mode"),
    }
}

fn the_aliens(world: &GameWorld) -> &[Alien] {
    match &world.mode {
        Mode::Formation { aliens } => aliens,
        Mode::Boss { .. } => panic!("expected formation mode"),
    }
}

fn count(events: &[GameEvent], needle: &GameEvent) -> usize {
    events.iter().filter(|&e| e == needle).count()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_starts_at_level_one_with_full_lives() {
    let world = init_state();
    assert_eq!(world.state.level, 1);
    assert_eq!(world.state.lives, 5);
    assert_eq!(world.state.score, 0);
    assert!((world.state.alien_speed - 0.25).abs() < 1e-6);
    assert_eq!(world.state.phase, Phase::Playing);
    assert_eq!(world.frame, 0);
    assert_eq!(world.ship.x, 32.0);
    assert_eq!(world.ship.y, 27.0);
    assert_eq!(world.last_shot_ms, None);
    assert!(world.player_bullets.is_empty());
    assert!(world.alien_bullets.is_empty());
}

#[test]
fn init_formation_is_two_rows_of_five() {
    let world = init_state();
    let aliens = the_aliens(&world);
    assert_eq!(aliens.len(), 10);

    // Columns sit at even fractions of the field width, rows six apart.
    assert!((aliens[0].x - 64.0 / 6.0).abs() < 1e-4);
    assert_eq!(aliens[0].y, 2.0);
    assert!((aliens[6].x - 2.0 * 64.0 / 6.0).abs() < 1e-4);
    assert_eq!(aliens[6].y, 8.0);
    assert!(aliens.iter().all(|a| a.direction == 1.0));
    assert!(aliens.iter().all(|a| a.last_shot_ms.is_none()));
}

// ── Ship steering ─────────────────────────────────────────────────────────────

#[test]
fn held_directions_steer_the_ship() {
    let world = init_state();
    let left = InputState { left: true, right: false };
    let right = InputState { left: false, right: true };

    let (moved, _) = tick(&world, &left, 16, &mut seeded_rng());
    assert_eq!(moved.ship.x, 31.0);

    let (moved, _) = tick(&world, &right, 16, &mut seeded_rng());
    assert_eq!(moved.ship.x, 33.0);
}

#[test]
fn ship_clamps_at_the_field_edges() {
    let mut world = init_state();
    world.ship.x = 0.0;
    let (next, _) = tick(&world, &InputState { left: true, right: false }, 16, &mut seeded_rng());
    assert_eq!(next.ship.x, 0.0);

    world.ship.x = 59.0;
    let (next, _) = tick(&world, &InputState { left: false, right: true }, 16, &mut seeded_rng());
    assert_eq!(next.ship.x, 59.0);
}

#[test]
fn holding_both_directions_cancels_out() {
    let world = init_state();
    let both = InputState { left: true, right: true };
    let (next, _) = tick(&world, &both, 16, &mut seeded_rng());
    assert_eq!(next.ship.x, 32.0);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shot_spawns_centred_above_the_ship() {
    let world = init_state();
    let (next, events) = player_shoot(&world, 1000);
    assert_eq!(next.player_bullets.len(), 1);
    assert_eq!(next.player_bullets[0], Bullet { x: 34.0, y: 26.0 });
    assert_eq!(next.last_shot_ms, Some(1000));
    assert_eq!(events, vec![GameEvent::ShotFired]);
}

#[test]
fn first_shot_needs_no_warmup() {
    let world = init_state();
    let (next, _) = player_shoot(&world, 0);
    assert_eq!(next.player_bullets.len(), 1);
}

#[test]
fn shot_cooldown_blocks_rapid_fire() {
    let world = init_state();
    let (world, _) = player_shoot(&world, 1000);

    // Within the 200ms window nothing happens, even right on the line.
    let (world, events) = player_shoot(&world, 1150);
    assert_eq!(world.player_bullets.len(), 1);
    assert!(events.is_empty());
    let (world, _) = player_shoot(&world, 1200);
    assert_eq!(world.player_bullets.len(), 1);

    // Once more than 200ms have passed the next shot goes out.
    let (world, events) = player_shoot(&world, 1201);
    assert_eq!(world.player_bullets.len(), 2);
    assert_eq!(count(&events, &GameEvent::ShotFired), 1);
}

#[test]
fn shots_are_ignored_outside_active_play() {
    let mut world = init_state();
    world.state.phase = Phase::LevelTransition { started_ms: 0 };
    let (next, events) = player_shoot(&world, 500);
    assert!(next.player_bullets.is_empty());
    assert!(events.is_empty());

    world.state.phase = Phase::GameOver { victory: false };
    let (next, events) = player_shoot(&world, 500);
    assert!(next.player_bullets.is_empty());
    assert!(events.is_empty());
}

// ── Bullet travel ─────────────────────────────────────────────────────────────

#[test]
fn player_bullets_climb_and_despawn_at_the_top() {
    let mut world = init_state();
    world.player_bullets.push(Bullet { x: 50.0, y: 3.0 });

    let (world, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.player_bullets.len(), 1);
    assert_eq!(world.player_bullets[0].y, 1.0);

    // The next step carries it past the top edge and off the field.
    let (world, _) = tick(&world, &no_input(), 32, &mut seeded_rng());
    assert!(world.player_bullets.is_empty());
}

#[test]
fn alien_bullets_sink_and_despawn_at_the_bottom() {
    let mut world = init_state();
    world.alien_bullets.push(Bullet { x: 0.0, y: 31.5 });

    let (world, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.alien_bullets.len(), 1);
    assert_eq!(world.alien_bullets[0].y, 31.75);

    // 32.0 is already off the field; the bullet is dropped, not drawn.
    let (world, _) = tick(&world, &no_input(), 32, &mut seeded_rng());
    assert!(world.alien_bullets.is_empty());
}

// ── Formation march ───────────────────────────────────────────────────────────

#[test]
fn formation_advances_every_fourth_frame() {
    let mut world = init_state();
    let start_x = the_aliens(&world)[0].x;
    let mut rng = seeded_rng();

    // Frames 1-3: holding pattern.
    for frame in 1..=3u64 {
        let (next, _) = tick(&world, &no_input(), frame * 16, &mut rng);
        world = next;
        assert_eq!(the_aliens(&world)[0].x, start_x);
    }

    // Frame 4: one step right at the level-1 speed.
    let (world, _) = tick(&world, &no_input(), 64, &mut rng);
    assert!((the_aliens(&world)[0].x - (start_x + 0.25)).abs() < 1e-4);
}

#[test]
fn march_reverses_and_drops_at_the_walls() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 59.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    world.frame = 3; // next tick is an advance

    let (world, _) = tick(&world, &no_input(), 64, &mut seeded_rng());
    let alien = &the_aliens(&world)[0];
    assert_eq!(alien.direction, -1.0);
    assert_eq!(alien.y, 6.0);
    assert!((alien.x - 58.75).abs() < 1e-4);
}

#[test]
fn march_reverses_at_the_left_wall_too() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 0.0,
            y: 5.0,
            direction: -1.0,
            last_shot_ms: Some(0),
        }],
    };
    world.frame = 3;

    let (world, _) = tick(&world, &no_input(), 64, &mut seeded_rng());
    let alien = &the_aliens(&world)[0];
    assert_eq!(alien.direction, 1.0);
    assert_eq!(alien.y, 6.0);
    assert!((alien.x - 0.25).abs() < 1e-4);
}

#[test]
fn march_clamps_short_of_the_wall_then_turns() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 58.9,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    world.frame = 3;

    // 58.9 + 0.25 overshoots; the step lands exactly on the wall.
    let (world, _) = tick(&world, &no_input(), 64, &mut seeded_rng());
    assert_eq!(the_aliens(&world)[0].x, 59.0);
    assert_eq!(the_aliens(&world)[0].direction, 1.0);

    // Sitting on the wall, the next advance turns and drops.
    let mut world = world;
    world.frame = 7;
    let (world, _) = tick(&world, &no_input(), 128, &mut seeded_rng());
    assert_eq!(the_aliens(&world)[0].direction, -1.0);
    assert_eq!(the_aliens(&world)[0].y, 6.0);
}

#[test]
fn formation_stays_inside_the_field() {
    let mut world = init_state();
    let mut rng = seeded_rng();
    for frame in 1..=2000u64 {
        let (next, _) = tick(&world, &no_input(), frame * 16, &mut rng);
        world = next;
        if world.state.is_game_over() {
            break;
        }
        for alien in the_aliens(&world) {
            assert!(alien.x >= 0.0 && alien.x <= 59.0, "alien left the field");
        }
    }
}

// ── Alien fire ────────────────────────────────────────────────────────────────

#[test]
fn alien_fire_respects_its_own_cooldown() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 30.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    let mut rng = seeded_rng();

    // The clock stays inside the 2000ms re-fire window the whole run, so
    // no matter how the firing roll lands, nothing may launch.
    for _ in 0..40 {
        let (next, _) = tick(&world, &no_input(), 500, &mut rng);
        world = next;
        assert!(world.alien_bullets.is_empty());
    }
}

#[test]
fn alien_fire_launches_from_the_shooter() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 30.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: None,
        }],
    };
    let mut rng = seeded_rng();
    let mut fired: Option<(GameWorld, u64)> = None;

    for frame in 1..=4000u64 {
        let now = frame * 16;
        let before = world.alien_bullets.len();
        let (next, _) = tick(&world, &no_input(), now, &mut rng);
        // At most one launch per frame, ever.
        assert!(next.alien_bullets.len() <= before + 1);
        if next.alien_bullets.len() > before {
            fired = Some((next.clone(), now));
            break;
        }
        world = next;
    }

    let (world, now) = fired.expect("the lone alien never fired");
    let alien = &the_aliens(&world)[0];
    let bullet = &world.alien_bullets[0];
    assert_eq!(bullet.x, alien.x + 2.0);
    assert_eq!(bullet.y, alien.y + 5.0);
    assert_eq!(alien.last_shot_ms, Some(now));
}

// ── Collision: player bullets vs aliens ───────────────────────────────────────

#[test]
fn bullet_takes_out_an_alien_and_scores() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 20.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    // The bullet climbs two rows before collision runs, so aim two below.
    world.player_bullets.push(Bullet { x: 22.0, y: 9.0 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.score, 10);
    assert!(world.player_bullets.is_empty());
    assert_eq!(count(&events, &GameEvent::AlienHit), 1);
    // The wave is now clear, so the same tick starts the interlude.
    assert!(world.state.in_transition());
}

#[test]
fn bullet_takes_the_first_alien_in_formation_order() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![
            Alien { x: 10.0, y: 5.0, direction: 1.0, last_shot_ms: Some(0) },
            Alien { x: 12.0, y: 5.0, direction: 1.0, last_shot_ms: Some(0) },
        ],
    };
    // (13, 6) lies inside both overlapping boxes after the climb.
    world.player_bullets.push(Bullet { x: 13.0, y: 8.0 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    let aliens = the_aliens(&world);
    assert_eq!(aliens.len(), 1);
    assert_eq!(aliens[0].x, 12.0);
    assert_eq!(world.state.score, 10);
    assert_eq!(count(&events, &GameEvent::AlienHit), 1);
}

#[test]
fn bullet_sails_past_a_near_miss() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 20.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    // One pixel left of the box.
    world.player_bullets.push(Bullet { x: 19.9, y: 9.0 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(the_aliens(&world).len(), 1);
    assert_eq!(world.player_bullets.len(), 1);
    assert_eq!(world.state.score, 0);
    assert_eq!(count(&events, &GameEvent::AlienHit), 0);
}

// ── Collision: enemy bullets vs the ship ──────────────────────────────────────

#[test]
fn enemy_bullet_strikes_the_ship() {
    let mut world = init_state();
    world.alien_bullets.push(Bullet { x: 34.0, y: 26.9 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.lives, 4);
    assert!(world.alien_bullets.is_empty());
    assert_eq!(count(&events, &GameEvent::ShipHit { lives_left: 4 }), 1);
    assert_eq!(count(&events, &GameEvent::ShipDestroyed), 0);
}

#[test]
fn enemy_bullet_misses_just_wide() {
    let mut world = init_state();
    world.alien_bullets.push(Bullet { x: 31.0, y: 26.9 });

    let (world, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.lives, 5);
    assert_eq!(world.alien_bullets.len(), 1);
}

#[test]
fn losing_the_last_life_ends_the_game() {
    let mut world = init_state();
    world.state.lives = 1;
    world.alien_bullets.push(Bullet { x: 34.0, y: 26.9 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.lives, 0);
    assert_eq!(world.state.phase, Phase::GameOver { victory: false });
    assert_eq!(count(&events, &GameEvent::ShipHit { lives_left: 0 }), 1);
    assert_eq!(count(&events, &GameEvent::ShipDestroyed), 1);
}

// ── Formation breach ──────────────────────────────────────────────────────────

#[test]
fn breach_costs_a_life_every_frame() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 5.0,
            y: 27.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.lives, 4);
    assert_eq!(count(&events, &GameEvent::FormationBreached { lives_left: 4 }), 1);

    let (world, events) = tick(&world, &no_input(), 32, &mut seeded_rng());
    assert_eq!(world.state.lives, 3);
    assert_eq!(count(&events, &GameEvent::FormationBreached { lives_left: 3 }), 1);
}

#[test]
fn breach_drains_through_to_defeat() {
    let mut world = init_state();
    world.state.lives = 1;
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 5.0,
            y: 27.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.phase, Phase::GameOver { victory: false });
    assert_eq!(count(&events, &GameEvent::ShipDestroyed), 1);
}

// ── Level transitions ─────────────────────────────────────────────────────────

#[test]
fn clearing_the_wave_starts_the_interlude() {
    let mut world = init_state();
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 20.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    world.player_bullets.push(Bullet { x: 22.0, y: 9.0 }); // the kill shot
    world.player_bullets.push(Bullet { x: 5.0, y: 15.0 }); // a leftover
    world.alien_bullets.push(Bullet { x: 50.0, y: 20.0 });

    let (world, events) = tick(&world, &no_input(), 4000, &mut seeded_rng());
    assert_eq!(world.state.level, 2);
    assert!((world.state.alien_speed - 0.3125).abs() < 1e-6);
    assert_eq!(world.state.phase, Phase::LevelTransition { started_ms: 4000 });
    assert!(world.player_bullets.is_empty());
    assert!(world.alien_bullets.is_empty());
    assert_eq!(count(&events, &GameEvent::AlienHit), 1);
    assert_eq!(count(&events, &GameEvent::LevelCleared { next_level: 2 }), 1);

    // Another frame mid-banner must not bump the level again.
    let (world, events) = tick(&world, &no_input(), 4016, &mut seeded_rng());
    assert_eq!(world.state.level, 2);
    assert!(events.is_empty());
}

#[test]
fn interlude_suspends_movement_and_combat() {
    let mut world = init_state();
    world.state.phase = Phase::LevelTransition { started_ms: 1000 };
    world.player_bullets.push(Bullet { x: 10.0, y: 10.0 });

    let held = InputState { left: true, right: false };
    let (world, events) = tick(&world, &held, 1500, &mut seeded_rng());
    assert_eq!(world.ship.x, 32.0);
    assert_eq!(world.player_bullets[0].y, 10.0);
    assert!(events.is_empty());
}

#[test]
fn interlude_ends_with_a_deeper_wave() {
    let mut world = init_state();
    world.state.level = 2;
    world.state.alien_speed = tuning::alien_speed(2);
    world.state.phase = Phase::LevelTransition { started_ms: 4000 };
    world.mode = Mode::Formation { aliens: Vec::new() };

    // 1999ms in: the banner is still up.
    let (world, events) = tick(&world, &no_input(), 5999, &mut seeded_rng());
    assert!(world.state.in_transition());
    assert!(events.is_empty());

    // Just past 2000ms: level 2 spawns with three rows of five.
    let (world, events) = tick(&world, &no_input(), 6001, &mut seeded_rng());
    assert_eq!(world.state.phase, Phase::Playing);
    let aliens = the_aliens(&world);
    assert_eq!(aliens.len(), 15);
    assert_eq!(aliens[0].y, 2.0);
    assert_eq!(aliens[14].y, 14.0);
    assert!(aliens.iter().all(|a| a.direction == 1.0));
    assert_eq!(count(&events, &GameEvent::LevelStarted { level: 2 }), 1);
}

#[test]
fn the_final_wave_gives_way_to_the_boss() {
    let mut world = init_state();
    world.state.level = 3;
    world.state.alien_speed = tuning::alien_speed(3);
    world.mode = Mode::Formation {
        aliens: vec![Alien {
            x: 20.0,
            y: 5.0,
            direction: 1.0,
            last_shot_ms: Some(0),
        }],
    };
    world.player_bullets.push(Bullet { x: 22.0, y: 9.0 });

    let (world, events) = tick(&world, &no_input(), 8000, &mut seeded_rng());
    assert_eq!(world.state.level, 4);
    assert!(world.state.in_transition());
    assert_eq!(count(&events, &GameEvent::LevelCleared { next_level: 4 }), 1);

    let (world, events) = tick(&world, &no_input(), 10_001, &mut seeded_rng());
    assert_eq!(world.state.phase, Phase::Playing);
    let boss = the_boss(&world);
    assert_eq!(boss.x, 0.0);
    assert_eq!(boss.y, 2.0);
    assert_eq!(boss.direction, 1.0);
    assert_eq!(boss.health, 50);
    assert_eq!(count(&events, &GameEvent::BossModeEntered), 1);
}

// ── Boss encounter ────────────────────────────────────────────────────────────

#[test]
fn boss_sweeps_and_reverses_at_the_walls() {
    let mut world = make_boss_world();
    let (next, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(the_boss(&next).x, 0.5);

    match &mut world.mode {
        Mode::Boss { boss } => {
            boss.x = tuning::BOSS_MAX_X;
            boss.direction = 1.0;
        }
        Mode::Formation { .. } => unreachable!(),
    }
    let (next, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(the_boss(&next).direction, -1.0);
    assert_eq!(the_boss(&next).x, 35.5);
}

#[test]
fn boss_never_leaves_the_field() {
    let mut world = make_boss_world();
    let mut rng = seeded_rng();
    for frame in 1..=300u64 {
        let (next, _) = tick(&world, &no_input(), frame * 16, &mut rng);
        world = next;
        if world.state.is_game_over() {
            break;
        }
        let boss = the_boss(&world);
        assert!(boss.x >= 0.0 && boss.x <= tuning::BOSS_MAX_X);
    }
}

#[test]
fn boss_fires_on_a_fixed_cadence() {
    let mut world = make_boss_world();
    let mut rng = seeded_rng();
    let mut fire_times: Vec<u64> = Vec::new();

    for frame in 1..=126u64 {
        let now = frame * 16;
        let before = the_boss(&world).last_shot_ms;
        let (next, _) = tick(&world, &no_input(), now, &mut rng);
        if the_boss(&next).last_shot_ms != before {
            fire_times.push(now);
        }
        world = next;
    }

    // First shot comes out immediately; the second only after the full
    // 1000ms cooldown has elapsed.
    assert_eq!(fire_times, vec![16, 1024]);
}

#[test]
fn boss_cannon_fires_from_its_mouth() {
    let world = make_boss_world();
    let (world, _) = tick(&world, &no_input(), 16, &mut seeded_rng());
    // The boss steps to x=0.5 first, then fires from (x+14, y+20).
    assert_eq!(world.alien_bullets.len(), 1);
    assert_eq!(world.alien_bullets[0], Bullet { x: 14.5, y: 22.0 });
}

#[test]
fn boss_bullets_hit_the_ship_like_any_other() {
    let mut world = make_boss_world();
    world.alien_bullets.push(Bullet { x: 34.0, y: 26.9 });

    let (world, events) = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.state.lives, 4);
    assert_eq!(count(&events, &GameEvent::ShipHit { lives_left: 4 }), 1);
}

#[test]
fn fifty_hits_fell_the_boss() {
    let mut world = make_boss_world();
    let mut rng = seeded_rng();

    // Feed the boss one sure hit per frame for 49 frames.
    for frame in 1..=49u64 {
        let mut armed = world.clone();
        let (bx, by) = {
            let boss = the_boss(&armed);
            (boss.x, boss.y)
        };
        armed.player_bullets.push(Bullet { x: bx + 5.0, y: by + 7.0 });
        let (next, events) = tick(&armed, &no_input(), frame * 16, &mut rng);
        assert_eq!(count(&events, &GameEvent::BossHit), 1);
        world = next;
    }
    assert_eq!(world.boss_health(), Some(1));
    assert_eq!(world.state.phase, Phase::Playing);

    // The fiftieth lands, the boss falls, and the run is won on the spot.
    let mut armed = world.clone();
    let (bx, by) = {
        let boss = the_boss(&armed);
        (boss.x, boss.y)
    };
    armed.player_bullets.push(Bullet { x: bx + 5.0, y: by + 7.0 });
    let (world, events) = tick(&armed, &no_input(), 800, &mut rng);
    assert_eq!(world.boss_health(), Some(0));
    assert_eq!(world.state.phase, Phase::GameOver { victory: true });
    assert!(world.state.is_victory());
    assert_eq!(count(&events, &GameEvent::BossDefeated), 1);
    // Boss hits never touch the score.
    assert_eq!(world.state.score, 0);
}

// ── Boss shortcut ─────────────────────────────────────────────────────────────

#[test]
fn shortcut_jumps_straight_to_the_boss_banner() {
    let mut world = init_state();
    world.player_bullets.push(Bullet { x: 10.0, y: 10.0 });
    world.alien_bullets.push(Bullet { x: 50.0, y: 20.0 });

    let (world, events) = jump_to_boss(&world, 5000);
    assert_eq!(world.state.level, 4);
    assert_eq!(world.state.phase, Phase::LevelTransition { started_ms: 5000 });
    assert!(world.player_bullets.is_empty());
    assert!(world.alien_bullets.is_empty());
    assert_eq!(count(&events, &GameEvent::LevelCleared { next_level: 4 }), 1);

    let (world, events) = tick(&world, &no_input(), 7001, &mut seeded_rng());
    assert_eq!(world.boss_health(), Some(50));
    assert_eq!(count(&events, &GameEvent::BossModeEntered), 1);
}

#[test]
fn shortcut_resets_a_wounded_boss() {
    let mut world = make_boss_world();
    match &mut world.mode {
        Mode::Boss { boss } => boss.health = 7,
        Mode::Formation { .. } => unreachable!(),
    }

    let (world, _) = jump_to_boss(&world, 9000);
    let (world, _) = tick(&world, &no_input(), 11_001, &mut seeded_rng());
    assert_eq!(world.boss_health(), Some(50));
}

#[test]
fn shortcut_is_dead_after_game_over() {
    let mut world = init_state();
    world.state.phase = Phase::GameOver { victory: false };

    let (next, events) = jump_to_boss(&world, 5000);
    assert_eq!(next.state.level, 1);
    assert_eq!(next.state.phase, Phase::GameOver { victory: false });
    assert!(events.is_empty());
}

// ── Restart and end states ────────────────────────────────────────────────────

#[test]
fn restart_resets_the_whole_run() {
    let mut world = init_state();
    world.state.level = 3;
    world.state.score = 990;
    world.state.lives = 0;
    world.state.phase = Phase::GameOver { victory: false };
    world.last_shot_ms = Some(123_456);

    let fresh = restart(&world);
    assert_eq!(fresh.state.level, 1);
    assert_eq!(fresh.state.lives, 5);
    assert_eq!(fresh.state.score, 0);
    assert_eq!(fresh.state.phase, Phase::Playing);
    assert_eq!(fresh.last_shot_ms, None);
    assert_eq!(the_aliens(&fresh).len(), 10);
    assert_eq!(fresh.ship.x, 32.0);
}

#[test]
fn restart_does_nothing_mid_game() {
    let mut world = init_state();
    world.state.score = 120;
    world.state.level = 2;

    let same = restart(&world);
    assert_eq!(same.state.score, 120);
    assert_eq!(same.state.level, 2);
}

#[test]
fn tick_is_inert_after_game_over() {
    let mut world = init_state();
    world.state.score = 340;
    world.state.lives = 0;
    world.state.phase = Phase::GameOver { victory: false };
    world.player_bullets.push(Bullet { x: 10.0, y: 10.0 });

    let (next, events) = tick(&world, &no_input(), 99_999, &mut seeded_rng());
    assert_eq!(next.state.score, 340);
    assert_eq!(next.state.phase, Phase::GameOver { victory: false });
    assert_eq!(next.player_bullets, world.player_bullets);
    assert!(events.is_empty());
}

#[test]
fn tick_does_not_mutate_the_input_world() {
    let mut world = init_state();
    world.player_bullets.push(Bullet { x: 10.0, y: 10.0 });

    let _ = tick(&world, &no_input(), 16, &mut seeded_rng());
    assert_eq!(world.frame, 0);
    assert_eq!(world.player_bullets[0].y, 10.0);
    assert_eq!(the_aliens(&world).len(), 10);
}
