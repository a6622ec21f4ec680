use std::f32::consts::TAU;

use crate::color::Rgb;
use crate::constants::{DOT_SIZE, GRAVITY, PARTICLE_LIFE, PARTICLE_MIN_SPEED, PARTICLE_SPEED_SPREAD};
use crate::surface::Surface;

/// One fragment of a burst.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: i32,
    pub color: Rgb,
}

impl Particle {
    /// Particle flying off from (x, y) in a random direction.
    pub fn new(x: f32, y: f32, color: Rgb, rng: &mut fastrand::Rng) -> Self {
        let angle = rng.f32() * TAU;
        let speed = rng.f32() * PARTICLE_SPEED_SPREAD + PARTICLE_MIN_SPEED;

        Self {
            x,
            y,
            dx: angle.cos() * speed,
            dy: angle.sin() * speed,
            life: PARTICLE_LIFE,
            color,
        }
    }

    pub fn update(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.dy += GRAVITY;
        self.life -= 1;
    }

    pub fn alpha(&self) -> f32 {
        (self.life as f32 / PARTICLE_LIFE as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    pub fn draw(&self, surface: &mut Surface) {
        surface.set_global_alpha(self.alpha());
        surface.set_fill_style(self.color, 1.0);
        surface.fill_rect(self.x, self.y, DOT_SIZE, DOT_SIZE);
        surface.set_global_alpha(1.0);
    }
}
