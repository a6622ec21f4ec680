//! Terminal fireworks.
//!
//! - `show`: rockets, particles and the per-tick driver
//! - `surface`: the raster everything is drawn on, presented as half-blocks
//! - `audio`: optional launch/explosion cues
//! - `constants`: tuning

pub mod audio;
pub mod color;
pub mod constants;
pub mod show;
pub mod surface;

pub use show::{Firework, Particle, Show, Spawner, Stage};
pub use surface::Surface;
