//! Simulation engine for a 64x32 pixel-grid space shooter.
//!
//! The library holds everything that can be exercised without a terminal or
//! an audio device: the entity records, the per-tick simulation, and the
//! event stream it emits. Rendering, sound, and input capture live with the
//! binary and only ever consume what these modules produce.

pub mod compute;
pub mod entities;
pub mod events;
pub mod tuning;
