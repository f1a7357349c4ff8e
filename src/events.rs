//! Events emitted by the simulation for the audio and logging adapters.
//!
//! The engine never touches a speaker or the terminal; collisions and level
//! changes are reported as values and the binary decides what each one
//! sounds like. Tests assert on these directly.

/// One noteworthy thing that happened during a tick (or an edge action).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player fired a bullet.
    ShotFired,
    /// A player bullet destroyed a formation alien.
    AlienHit,
    /// A player bullet connected with the boss.
    BossHit,
    /// An enemy bullet struck the ship.
    ShipHit { lives_left: u32 },
    /// A formation alien reached the ship's row.
    FormationBreached { lives_left: u32 },
    /// The last life was lost; the defeat screen follows.
    ShipDestroyed,
    /// Boss health reached zero; the victory screen follows.
    BossDefeated,
    /// The formation was wiped out and a transition to `next_level` began.
    LevelCleared { next_level: u32 },
    /// A transition finished and a fresh formation was populated.
    LevelStarted { level: u32 },
    /// A transition finished by spawning the boss.
    BossModeEntered,
}
