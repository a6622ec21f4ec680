//! The fireworks display: rockets, particles and the tick that drives them.

use crossterm::event::{Event, MouseEvent, MouseEventKind};
use std::io::{self, Write};

use crate::audio::Audio;
use crate::constants::{DETONATION_RADIUS, TRAIL_ALPHA, TRAIL_COLOR};
use crate::surface::Surface;

pub mod firework;
pub mod particle;
pub mod spawner;

pub use firework::{Firework, Stage};
pub use particle::Particle;
pub use spawner::Spawner;

pub struct Show<A> {
    surface: Surface,
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
    audio: A,
    rng: fastrand::Rng,
}

impl<A: Audio> Show<A> {
    pub fn new(surface: Surface, audio: A, rng: fastrand::Rng) -> Self {
        Self {
            surface,
            fireworks: Vec::new(),
            particles: Vec::with_capacity(512),
            audio,
            rng,
        }
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// One animation step: fade, then rockets, then particles.
    pub fn tick(&mut self) {
        let surface = &mut self.surface;

        surface.set_fill_style(TRAIL_COLOR, TRAIL_ALPHA);
        surface.fill_rect(0.0, 0.0, surface.world_width(), surface.world_height());

        self.fireworks.retain_mut(|firework| {
            firework.update();
            firework.draw(surface);
            !firework.is_exploded()
        });

        self.particles.retain_mut(|particle| {
            particle.update();
            particle.draw(surface);
            !particle.is_dead()
        });
    }

    /// Launches a rocket from a random spot on the ground towards the upper half.
    pub fn launch(&mut self) {
        let x = self.rng.f32() * self.surface.world_width();
        let target_y = self.rng.f32() * self.surface.world_height() / 2.0;
        self.launch_at(x, target_y);
    }

    pub fn launch_at(&mut self, x: f32, target_y: f32) {
        let floor_y = self.surface.world_height();
        let firework = Firework::launch(x, target_y, floor_y, &mut self.rng, &mut self.audio);
        log::debug!("launched at x={x:.0} towards y={target_y:.0}");
        self.fireworks.push(firework);
    }

    /// Sets off every live rocket within [`DETONATION_RADIUS`] of (x, y).
    /// Returns how many went off.
    pub fn detonate_near(&mut self, x: f32, y: f32) -> usize {
        let mut detonated = 0;
        for firework in &mut self.fireworks {
            if !firework.is_exploded() && firework.distance_to(x, y) < DETONATION_RADIUS {
                firework.explode(&mut self.particles, &mut self.rng, &mut self.audio);
                detonated += 1;
            }
        }
        if detonated > 0 {
            log::debug!("pointer at ({x:.0}, {y:.0}) set off {detonated} firework(s)");
        }
        detonated
    }

    /// Pointer moves, drags and clicks all detonate nearby rockets. A tap on
    /// a touch screen reaches us as a click.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Mouse(MouseEvent { kind, column, row, .. }) = event {
            if matches!(
                kind,
                MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
            ) {
                let (x, y) = self.surface.cell_center(*column, *row);
                self.detonate_near(x, y);
            }
        }
    }

    pub fn present<W: Write>(&mut self, out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
        self.surface.present(out, cols as usize, rows as usize)
    }
}
