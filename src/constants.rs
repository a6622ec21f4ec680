//! Tuning constants for the display.
//!
//! Distances and speeds are in world units, velocities are per tick. One tick is
//! one fixed simulation step of [`FIXED_DT`] seconds.

use std::time::Duration;

use crate::color::Rgb;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Length of one tick in seconds.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Wall-clock gap between two launches.
pub const LAUNCH_INTERVAL: Duration = Duration::from_millis(800);

// ── Surface ───────────────────────────────────────────────────────────────────

/// World units covered by one half-block pixel.
///
/// A half-block pixel is about as wide as eight screen pixels, so the motion
/// constants below keep their proportions on a terminal.
pub const UNITS_PER_PIXEL: f32 = 8.0;

/// Side of the square drawn for fireworks and particles.
pub const DOT_SIZE: f32 = 3.0;

/// Overlay painted at the start of every tick. Leaves fading trails behind
/// everything that moves.
pub const TRAIL_COLOR: Rgb = (0, 0, 0);
pub const TRAIL_ALPHA: f32 = 0.2;

// ── Fireworks ─────────────────────────────────────────────────────────────────

pub const RISE_SPEED: f32 = 3.0;

/// Ticks a firework may hang at its apex before it fizzles out.
pub const APEX_DWELL_LIMIT: u32 = 60;

pub const FIREWORK_SATURATION: f32 = 1.0;
pub const FIREWORK_LIGHTNESS: f32 = 0.7;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const BURST_SIZE: usize = 50;
pub const PARTICLE_LIFE: i32 = 100;
pub const PARTICLE_MIN_SPEED: f32 = 1.0;
pub const PARTICLE_SPEED_SPREAD: f32 = 5.0;

/// Added to a particle's vertical velocity every tick.
pub const GRAVITY: f32 = 0.05;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Fireworks closer than this to the pointer go off.
pub const DETONATION_RADIUS: f32 = 30.0;
