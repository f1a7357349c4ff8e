//! Sound playback built on rodio.
//!
//! The bank holds six effects. Each one prefers a file under
//! `assets/sounds/` and falls back to a clip synthesized from a classic
//! oscillator-and-envelope recipe, so the game sounds right with nothing
//! on disk. One-shots ride detached sinks; the two ambient effects (the
//! crab drone and the low-lives heartbeat) live on persistent paused
//! sinks that loop until told to stop.
//!
//! When no output device can be opened the whole module degrades to
//! no-ops, keeping the game playable on a headless box.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use rodio::buffer::SamplesBuffer;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, Sink, Source};

const SAMPLE_RATE: u32 = 44_100;

// ── Sound bank ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    AlienHit,
    Explosion,
    Heartbeat,
    Crab,
    Victory,
}

impl Sound {
    pub const ALL: [Sound; 6] = [
        Sound::Shoot,
        Sound::AlienHit,
        Sound::Explosion,
        Sound::Heartbeat,
        Sound::Crab,
        Sound::Victory,
    ];

    /// File stem looked up under `assets/sounds/`.
    fn name(self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::AlienHit => "alien_hit",
            Sound::Explosion => "explosion",
            Sound::Heartbeat => "heartbeat",
            Sound::Crab => "crab",
            Sound::Victory => "victory",
        }
    }
}

/// Decoded samples ready to be replayed any number of times.
#[derive(Clone)]
struct Clip {
    channels: u16,
    sample_rate: u32,
    samples: Arc<Vec<f32>>,
}

impl Clip {
    fn mono(samples: Vec<f32>) -> Clip {
        Clip {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            samples: Arc::new(samples),
        }
    }

    fn source(&self) -> SamplesBuffer {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.as_ref().clone())
    }
}

// ── Output handle ────────────────────────────────────────────────────────────

pub struct AudioOutput {
    backend: Option<Backend>,
    volume: f32,
}

struct Backend {
    // The stream closes when dropped; it must outlive the sinks.
    _stream: OutputStream,
    mixer: Mixer,
    clips: HashMap<Sound, Clip>,
    crab_sink: Sink,
    heartbeat_sink: Sink,
}

impl Backend {
    fn open() -> Result<Backend, rodio::StreamError> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()?;
        let mixer = stream.mixer().clone();
        let clips = load_clips();

        let crab_sink = Sink::connect_new(&mixer);
        if let Some(clip) = clips.get(&Sound::Crab) {
            crab_sink.append(clip.source().repeat_infinite());
        }
        crab_sink.pause();

        let heartbeat_sink = Sink::connect_new(&mixer);
        if let Some(clip) = clips.get(&Sound::Heartbeat) {
            heartbeat_sink.append(clip.source().repeat_infinite());
        }
        heartbeat_sink.pause();

        Ok(Backend {
            _stream: stream,
            mixer,
            clips,
            crab_sink,
            heartbeat_sink,
        })
    }
}

impl AudioOutput {
    /// Open the default output device and build the sound bank. A machine
    /// with no usable device gets a silent but fully functional handle.
    pub fn new() -> AudioOutput {
        let backend = match Backend::open() {
            Ok(backend) => Some(backend),
            Err(err) => {
                warn!("audio disabled: {err}");
                None
            }
        };
        AudioOutput {
            backend,
            volume: 1.0,
        }
    }

    /// Fire-and-forget playback of one effect.
    pub fn play(&self, sound: Sound) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Some(clip) = backend.clips.get(&sound) {
            let sink = Sink::connect_new(&backend.mixer);
            sink.set_volume(self.volume);
            sink.append(clip.source());
            sink.detach();
        }
    }

    /// Unpause a looping effect. Only the ambient sounds loop; the call is
    /// ignored for anything else.
    pub fn start_loop(&self, sound: Sound) {
        if let Some(sink) = self.loop_sink(sound) {
            sink.play();
        }
    }

    pub fn stop_loop(&self, sound: Sound) {
        if let Some(sink) = self.loop_sink(sound) {
            sink.pause();
        }
    }

    pub fn stop_all_loops(&self) {
        self.stop_loop(Sound::Crab);
        self.stop_loop(Sound::Heartbeat);
    }

    /// Master volume, clamped to `0.0..=1.0`. Applies to everything played
    /// from now on and to the running loops immediately.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(backend) = &self.backend {
            backend.crab_sink.set_volume(self.volume);
            backend.heartbeat_sink.set_volume(self.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn loop_sink(&self, sound: Sound) -> Option<&Sink> {
        let backend = self.backend.as_ref()?;
        match sound {
            Sound::Crab => Some(&backend.crab_sink),
            Sound::Heartbeat => Some(&backend.heartbeat_sink),
            _ => None,
        }
    }
}

// ── Clip loading ─────────────────────────────────────────────────────────────

fn load_clips() -> HashMap<Sound, Clip> {
    let mut clips = HashMap::new();
    for sound in Sound::ALL {
        let clip = match load_file_clip(sound) {
            Some(clip) => clip,
            None => {
                debug!("synthesizing {}", sound.name());
                synthesize(sound)
            }
        };
        clips.insert(sound, clip);
    }
    clips
}

/// Try `assets/sounds/<name>.wav` then `.mp3`, decoding the whole file up
/// front so playback never touches the disk.
fn load_file_clip(sound: Sound) -> Option<Clip> {
    for ext in ["wav", "mp3"] {
        let path = Path::new("assets/sounds").join(format!("{}.{ext}", sound.name()));
        if !path.exists() {
            continue;
        }
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                warn!("could not open {}: {err}", path.display());
                continue;
            }
        };
        match Decoder::try_from(file) {
            Ok(source) => {
                let channels = source.channels();
                let sample_rate = source.sample_rate();
                let samples: Vec<f32> = source.collect();
                debug!("loaded {} from {}", sound.name(), path.display());
                return Some(Clip {
                    channels,
                    sample_rate,
                    samples: Arc::new(samples),
                });
            }
            Err(err) => warn!("could not decode {}: {err}", path.display()),
        }
    }
    None
}

// ── Synthesis ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Waveform {
    Sine,
    Sawtooth,
    Triangle,
}

/// Evaluate one waveform at a phase measured in cycles.
fn oscillate(wave: Waveform, phase: f32) -> f32 {
    let cycle = phase.fract();
    match wave {
        Waveform::Sine => (cycle * std::f32::consts::TAU).sin(),
        Waveform::Sawtooth => 2.0 * cycle - 1.0,
        Waveform::Triangle => 4.0 * (cycle - 0.5).abs() - 1.0,
    }
}

/// Exponential ramp from `from` to `to` across `duration` seconds, held at
/// the target afterwards. Matches the pitch-drop curve of old arcade
/// hardware better than a linear slide.
fn exp_ramp(from: f32, to: f32, t: f32, duration: f32) -> f32 {
    from * (to / from).powf((t / duration).clamp(0.0, 1.0))
}

fn lin_ramp(from: f32, to: f32, t: f32, duration: f32) -> f32 {
    from + (to - from) * (t / duration).clamp(0.0, 1.0)
}

/// Render `total` seconds of a single oscillator whose frequency and gain
/// are functions of time. Phase accumulates across the frequency sweep so
/// the waveform never jumps.
fn render<F, G>(wave: Waveform, total: f32, freq_at: F, gain_at: G) -> Vec<f32>
where
    F: Fn(f32) -> f32,
    G: Fn(f32) -> f32,
{
    let count = (total * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(count);
    let mut phase = 0.0f32;
    for i in 0..count {
        let t = i as f32 / SAMPLE_RATE as f32;
        phase = (phase + freq_at(t) / SAMPLE_RATE as f32).fract();
        samples.push(oscillate(wave, phase) * gain_at(t));
    }
    samples
}

fn synthesize(sound: Sound) -> Clip {
    match sound {
        Sound::Shoot => Clip::mono(render(
            Waveform::Sawtooth,
            0.3,
            |t| exp_ramp(880.0, 110.0, t, 0.2),
            |t| exp_ramp(0.3, 0.001, t, 0.2),
        )),
        Sound::AlienHit => Clip::mono(render(
            Waveform::Sawtooth,
            0.3,
            |t| exp_ramp(220.0, 55.0, t, 0.2),
            |t| {
                if t < 0.05 {
                    lin_ramp(0.3, 0.2, t, 0.05)
                } else {
                    exp_ramp(0.2, 0.001, t - 0.05, 0.15)
                }
            },
        )),
        Sound::Explosion => Clip::mono(synth_explosion()),
        Sound::Heartbeat => Clip::mono(synth_heartbeat()),
        Sound::Crab => Clip::mono(synth_crab()),
        Sound::Victory => Clip::mono(render(Waveform::Sine, 0.3, |_| 880.0, |_| 0.1)),
    }
}

/// Three sawtooth partials an octave apart, each dying away on its own
/// schedule. Mixed down they read as a crunchy blast.
fn synth_explosion() -> Vec<f32> {
    let partials: [(f32, f32); 3] = [(110.0, 0.3), (220.0, 0.2), (440.0, 0.1)];
    let count = (0.3 * SAMPLE_RATE as f32) as usize;
    let mut mix = vec![0.0f32; count];
    for (freq, duration) in partials {
        let layer = render(
            Waveform::Sawtooth,
            duration,
            move |t| exp_ramp(freq, freq * 0.5, t, duration),
            move |t| {
                if t < 0.05 {
                    lin_ramp(0.0, 0.1, t, 0.05)
                } else {
                    exp_ramp(0.1, 0.01, t - 0.05, duration - 0.05)
                }
            },
        );
        for (acc, sample) in mix.iter_mut().zip(layer) {
            *acc += sample;
        }
    }
    mix
}

/// Two soft sine thumps and a rest. Looped, it reads as a pulse.
fn synth_heartbeat() -> Vec<f32> {
    render(Waveform::Sine, 0.8, |_| 110.0, |t| {
        if t < 0.05 {
            lin_ramp(0.0, 0.2, t, 0.05)
        } else if t < 0.1 {
            lin_ramp(0.2, 0.0, t - 0.05, 0.05)
        } else if t < 0.15 {
            0.0
        } else if t < 0.2 {
            lin_ramp(0.0, 0.15, t - 0.15, 0.05)
        } else if t < 0.25 {
            lin_ramp(0.15, 0.0, t - 0.2, 0.05)
        } else {
            0.0
        }
    })
}

/// Low triangle drone. The clip spans a whole number of cycles so an
/// infinite repeat splices without a click.
fn synth_crab() -> Vec<f32> {
    render(Waveform::Triangle, 16.0 / 55.0, |_| 55.0, |_| 0.1)
}
