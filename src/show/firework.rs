use crate::audio::{Audio, Cue, play_best_effort};
use crate::color::{self, Rgb};
use crate::constants::{
    APEX_DWELL_LIMIT, BURST_SIZE, DOT_SIZE, FIREWORK_LIGHTNESS, FIREWORK_SATURATION, RISE_SPEED,
};
use crate::surface::Surface;

use super::particle::Particle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rising,
    /// Hanging at the target height, counting ticks until it fizzles
    AtApex { dwell: u32 },
    /// Burst into particles
    Exploded,
    /// Timed out at the apex without a burst
    Fizzled,
}

/// A rocket climbing towards its target height.
#[derive(Debug, Clone)]
pub struct Firework {
    pub x: f32,
    pub y: f32,
    pub target_y: f32,
    pub color: Rgb,
    stage: Stage,
}

impl Firework {
    pub fn new(x: f32, target_y: f32, floor_y: f32, color: Rgb) -> Self {
        Self {
            x,
            y: floor_y,
            target_y,
            color,
            stage: Stage::Rising,
        }
    }

    /// Fires a rocket with a random hue from the bottom of the surface.
    pub fn launch(
        x: f32,
        target_y: f32,
        floor_y: f32,
        rng: &mut fastrand::Rng,
        audio: &mut impl Audio,
    ) -> Self {
        let hue = rng.f32() * 360.0;
        let color = color::hsl(hue, FIREWORK_SATURATION, FIREWORK_LIGHTNESS);
        play_best_effort(audio, Cue::Launch);
        Self::new(x, target_y, floor_y, color)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// True once the rocket has burst or fizzled.
    pub fn is_exploded(&self) -> bool {
        matches!(self.stage, Stage::Exploded | Stage::Fizzled)
    }

    pub fn reached_apex(&self) -> bool {
        !matches!(self.stage, Stage::Rising)
    }

    pub fn update(&mut self) {
        match self.stage {
            Stage::Rising => {
                self.y -= RISE_SPEED;
                if self.y <= self.target_y {
                    self.y = self.target_y;
                    self.stage = Stage::AtApex { dwell: 0 };
                }
            }
            Stage::AtApex { dwell } => {
                let dwell = dwell + 1;
                self.stage = if dwell > APEX_DWELL_LIMIT {
                    log::debug!("firework at ({:.0}, {:.0}) fizzled", self.x, self.y);
                    Stage::Fizzled
                } else {
                    Stage::AtApex { dwell }
                };
            }
            Stage::Exploded | Stage::Fizzled => {}
        }
    }

    /// Bursts into particles at the current position. Does nothing once spent.
    pub fn explode(
        &mut self,
        particles: &mut Vec<Particle>,
        rng: &mut fastrand::Rng,
        audio: &mut impl Audio,
    ) {
        if self.is_exploded() {
            return;
        }

        particles.extend((0..BURST_SIZE).map(|_| Particle::new(self.x, self.y, self.color, rng)));
        play_best_effort(audio, Cue::Explosion);
        self.stage = Stage::Exploded;
    }

    pub fn draw(&self, surface: &mut Surface) {
        if self.is_exploded() {
            return;
        }
        surface.set_fill_style(self.color, 1.0);
        surface.fill_rect(self.x, self.y, DOT_SIZE, DOT_SIZE);
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::Recorder;
    use proptest::prelude::*;

    const WHITE: Rgb = (255, 255, 255);

    #[test]
    fn test_reaches_apex_in_one_tick() {
        let mut fw = Firework::new(100.0, 50.0, 53.0, WHITE);
        assert!(!fw.reached_apex());

        fw.update();

        assert_eq!(fw.y, 50.0);
        assert!(fw.reached_apex());
        assert_eq!(fw.stage(), Stage::AtApex { dwell: 0 });
    }

    #[test]
    fn test_rise_is_clamped_to_target() {
        let mut fw = Firework::new(100.0, 50.0, 52.0, WHITE);
        fw.update();
        assert_eq!(fw.y, 50.0);
        assert!(fw.reached_apex());
    }

    #[test]
    fn test_apex_flag_on_first_tick_at_or_below_target() {
        let mut fw = Firework::new(100.0, 50.0, 60.0, WHITE);
        fw.update();
        fw.update();
        assert_eq!(fw.y, 54.0);
        assert!(!fw.reached_apex());
        fw.update();
        assert_eq!(fw.y, 51.0);
        assert!(!fw.reached_apex());
        fw.update();
        assert_eq!(fw.y, 50.0);
        assert!(fw.reached_apex());
    }

    #[test]
    fn test_fizzles_on_61st_dwell_tick() {
        let mut fw = Firework::new(100.0, 50.0, 53.0, WHITE);
        fw.update();

        for dwell in 1..=APEX_DWELL_LIMIT {
            fw.update();
            assert_eq!(fw.stage(), Stage::AtApex { dwell });
        }

        fw.update();
        assert_eq!(fw.stage(), Stage::Fizzled);
        assert!(fw.is_exploded());
    }

    #[test]
    fn test_explode_emits_one_burst() {
        let mut fw = Firework::new(100.0, 50.0, 200.0, (10, 20, 30));
        let mut particles = Vec::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let mut audio = Recorder::default();

        fw.explode(&mut particles, &mut rng, &mut audio);
        fw.explode(&mut particles, &mut rng, &mut audio);

        assert_eq!(particles.len(), BURST_SIZE);
        assert_eq!(audio.count(Cue::Explosion), 1);
        assert_eq!(fw.stage(), Stage::Exploded);
        assert!(particles.iter().all(|p| p.x == 100.0 && p.y == 200.0 && p.color == (10, 20, 30)));
    }

    #[test]
    fn test_fizzled_firework_does_not_burst() {
        let mut fw = Firework::new(100.0, 50.0, 50.0, WHITE);
        for _ in 0..=APEX_DWELL_LIMIT + 1 {
            fw.update();
        }
        assert_eq!(fw.stage(), Stage::Fizzled);

        let mut particles = Vec::new();
        let mut audio = Recorder::default();
        fw.explode(&mut particles, &mut fastrand::Rng::with_seed(1), &mut audio);

        assert!(particles.is_empty());
        assert!(audio.cues.is_empty());
    }

    #[test]
    fn test_launch_plays_cue_and_starts_at_floor() {
        let mut audio = Recorder::failing();
        let fw = Firework::launch(10.0, 20.0, 300.0, &mut fastrand::Rng::with_seed(3), &mut audio);

        assert_eq!(fw.y, 300.0);
        assert_eq!(fw.stage(), Stage::Rising);
        assert_eq!(audio.count(Cue::Launch), 1);
    }

    #[test]
    fn test_draw_only_while_live() {
        let mut surface = Surface::new(10, 10, 8.0);
        let mut fw = Firework::new(16.0, 0.0, 16.0, WHITE);
        fw.draw(&mut surface);
        assert_eq!(surface.pixel(2, 2), Some(WHITE));

        let mut surface = Surface::new(10, 10, 8.0);
        fw.explode(&mut Vec::new(), &mut fastrand::Rng::with_seed(1), &mut Recorder::default());
        fw.draw(&mut surface);
        assert_eq!(surface.pixel(2, 2), Some((0, 0, 0)));
    }

    proptest! {
        #[test]
        fn prop_height_stays_between_target_and_floor(
            target in 0.0f32..400.0,
            climb in 0.0f32..800.0,
            ticks in 0usize..400,
        ) {
            let floor = target + climb;
            let mut fw = Firework::new(0.0, target, floor, WHITE);
            let mut last_y = fw.y;
            for _ in 0..ticks {
                fw.update();
                if fw.is_exploded() {
                    break;
                }
                prop_assert!(fw.y >= target && fw.y <= floor);
                if !fw.reached_apex() {
                    prop_assert!(fw.y < last_y);
                }
                last_y = fw.y;
            }
        }
    }
}
