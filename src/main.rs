mod audio;
mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::thread_rng;

use crate::audio::{AudioOutput, Sound};
use pixel_invaders::compute::{init_state, jump_to_boss, player_shoot, restart, tick};
use pixel_invaders::entities::InputState;
use pixel_invaders::events::GameEvent;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Event-to-sound wiring ─────────────────────────────────────────────────────

/// Give each simulation event its audible (and logged) consequence.
fn react(events: &[GameEvent], audio: &AudioOutput) {
    for event in events {
        match event {
            GameEvent::ShotFired => audio.play(Sound::Shoot),
            GameEvent::AlienHit | GameEvent::BossHit => audio.play(Sound::AlienHit),
            // A survivable hit is silent; the panic pulse starting on the
            // last life is all the feedback the player gets.
            GameEvent::ShipHit { lives_left } | GameEvent::FormationBreached { lives_left } => {
                if *lives_left == 1 {
                    audio.start_loop(Sound::Heartbeat);
                }
            }
            GameEvent::ShipDestroyed => {
                info!("ship destroyed, game over");
                audio.stop_all_loops();
                audio.play(Sound::Explosion);
            }
            GameEvent::BossDefeated => {
                info!("boss defeated, game won");
                audio.stop_all_loops();
                audio.play(Sound::Explosion);
                audio.play(Sound::Victory);
            }
            GameEvent::BossModeEntered => {
                info!("boss encounter begins");
                audio.start_loop(Sound::Crab);
            }
            GameEvent::LevelCleared { next_level } => {
                info!("wave cleared, heading for level {next_level}");
            }
            GameEvent::LevelStarted { level } => info!("level {level} begins"),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and feed the steering keys to the tick as
/// one `InputState`, so Space and a direction can be held together with no
/// interference. Shooting goes through the engine every frame while Space is
/// live; its own cooldown keeps the rate honest.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events → keys drop out on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    audio: &mut AudioOutput,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut world = init_state();
    let epoch = Instant::now();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now_ms = epoch.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') if world.state.is_game_over() => {
                            info!("restarting at level 1");
                            audio.stop_all_loops();
                            world = restart(&world);
                        }
                        // Shortcut straight to the boss encounter
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            let (next, events) = jump_to_boss(&world, now_ms);
                            world = next;
                            react(&events, audio);
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            audio.set_volume(audio.volume() + 0.1);
                        }
                        KeyCode::Char('-') => {
                            audio.set_volume(audio.volume() - 0.1);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held keys and advance the simulation ────────────────────────
        let input = InputState {
            left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
        };
        let shooting = is_held(&key_frame, &KeyCode::Char(' '), frame);

        if !world.state.is_game_over() {
            if shooting {
                let (next, events) = player_shoot(&world, now_ms);
                world = next;
                react(&events, audio);
            }
            let (next, events) = tick(&world, &input, now_ms, &mut rng);
            world = next;
            react(&events, audio);
        }

        display::render(out, &world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; redirect it somewhere useful when debugging,
    // e.g. RUST_LOG=info cargo run 2>game.log
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Open the audio device before the terminal is taken over so any
    // warnings land on a readable screen.
    let mut audio = AudioOutput::new();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &mut audio);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}
