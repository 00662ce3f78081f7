//! Explosion-style particle effect on its own overlay canvas
//!
//! The simulation is stepped explicitly, once per frame, by whoever owns it.
//! While running, the app keeps requesting repaints; once stopped nothing
//! schedules further frames.

use std::f32::consts::TAU;

use egui::{Color32, Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::canvas::{Blend, Canvas};

/// Tunables of the simulation, in pixels and per-frame units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworkParams {
    /// Chance per frame that a new burst is spawned
    pub spawn_chance: f64,
    pub burst_size: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub gravity: f32,
    pub alpha_decay: f32,
    /// Share of the previous frame erased before drawing
    pub trail_fade: f32,
    pub particle_radius: f32,
}

impl Default for FireworkParams {
    fn default() -> Self {
        Self {
            spawn_chance: 0.05,
            burst_size: 200,
            min_speed: 2.0,
            max_speed: 7.0,
            gravity: 0.05,
            alpha_decay: 0.01,
            trail_fade: 0.1,
            particle_radius: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub vel: Vec2,
    /// Opaque burst color
    pub color: Color32,
    pub alpha: f32,
}

impl Particle {
    fn draw_color(&self) -> Color32 {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    Stopped,
    Running,
}

pub struct Fireworks<R = StdRng> {
    canvas: Canvas,
    particles: Vec<Particle>,
    state: EffectState,
    params: FireworkParams,
    rng: R,
}

impl Fireworks<StdRng> {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, FireworkParams::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> Fireworks<R> {
    pub fn with_rng(width: f32, height: f32, params: FireworkParams, rng: R) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            particles: Vec::new(),
            state: EffectState::Stopped,
            params,
            rng,
        }
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EffectState::Running
    }

    pub fn start(&mut self) {
        self.state = EffectState::Running;
    }

    /// Halt at once, dropping every live particle (no fade-out)
    pub fn stop(&mut self) {
        self.state = EffectState::Stopped;
        self.particles.clear();
    }

    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
    }

    /// Track a resized viewport without restarting
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.canvas.resize(width, height);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one frame. Returns whether another frame should be scheduled.
    pub fn step(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.canvas.fade(self.params.trail_fade);

        if self.rng.gen_bool(self.params.spawn_chance.clamp(0.0, 1.0)) {
            let origin = self.random_origin();
            self.explode(origin);
        }

        let gravity = self.params.gravity;
        let decay = self.params.alpha_decay;
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.vel.y += gravity;
            p.alpha -= decay;
            p.alpha > 0.0
        });

        for particle in &self.particles {
            self.canvas.circle_blended(
                particle.pos,
                self.params.particle_radius,
                particle.draw_color(),
                Blend::Additive,
            );
        }

        true
    }

    /// Spawn one burst at `origin`, all particles sharing a random color
    pub fn explode(&mut self, origin: Pos2) {
        let color = Color32::from_rgb(self.rng.gen(), self.rng.gen(), self.rng.gen());
        let FireworkParams {
            burst_size,
            min_speed,
            max_speed,
            ..
        } = self.params;

        self.particles.reserve(burst_size);
        for _ in 0..burst_size {
            let angle = self.rng.gen_range(0.0..TAU);
            let speed = if max_speed > min_speed {
                self.rng.gen_range(min_speed..max_speed)
            } else {
                min_speed
            };
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::angled(angle) * speed,
                color,
                alpha: 1.0,
            });
        }
    }

    /// Anywhere across, within the band 10%..70% from the top
    fn random_origin(&mut self) -> Pos2 {
        let size = self.canvas.size();
        Pos2::new(
            self.rng.gen::<f32>() * size.x,
            self.rng.gen::<f32>() * size.y * 0.6 + size.y * 0.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::Mark;

    fn quiet() -> Fireworks<StdRng> {
        let params = FireworkParams {
            spawn_chance: 0.0,
            ..FireworkParams::default()
        };
        Fireworks::with_rng(800.0, 600.0, params, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_stopped_does_not_step() {
        let mut fx = quiet();
        fx.explode(Pos2::new(100.0, 100.0));
        assert!(!fx.step());
        assert_eq!(fx.particles()[0].pos, Pos2::new(100.0, 100.0));
        assert!(fx.canvas().is_blank());
    }

    #[test]
    fn test_burst_shares_color_and_speed_range() {
        let mut fx = quiet();
        fx.explode(Pos2::new(400.0, 200.0));

        let particles = fx.particles();
        assert_eq!(particles.len(), 200);
        let color = particles[0].color;
        for p in particles {
            assert_eq!(p.color, color);
            assert_eq!(p.alpha, 1.0);
            let speed = p.vel.length();
            assert!((1.99..=7.01).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn test_alpha_strictly_decreases_and_count_never_grows() {
        let mut fx = quiet();
        fx.start();
        fx.explode(Pos2::new(400.0, 200.0));

        let mut previous = fx.particles().to_vec();
        while !previous.is_empty() {
            assert!(fx.step());
            let current = fx.particles();
            assert!(current.len() <= previous.len());
            for (before, after) in previous.iter().zip(current) {
                assert!(after.alpha < before.alpha);
            }
            previous = current.to_vec();
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut fx = quiet();
        fx.start();
        fx.explode(Pos2::new(400.0, 200.0));

        for _ in 0..98 {
            fx.step();
        }
        assert_eq!(fx.particles().len(), 200);
        for _ in 0..4 {
            fx.step();
        }
        assert!(fx.particles().is_empty());
    }

    #[test]
    fn test_motion_and_gravity() {
        let mut fx = quiet();
        fx.start();
        fx.explode(Pos2::new(400.0, 200.0));
        let before = fx.particles()[0];

        fx.step();
        let after = fx.particles()[0];
        assert_eq!(after.pos, before.pos + before.vel);
        assert!((after.vel.y - (before.vel.y + 0.05)).abs() < 1e-6);
        assert_eq!(after.vel.x, before.vel.x);
    }

    #[test]
    fn test_stop_discards_particles_immediately() {
        let mut fx = quiet();
        fx.start();
        fx.explode(Pos2::new(10.0, 10.0));
        fx.step();

        fx.stop();
        assert_eq!(fx.state(), EffectState::Stopped);
        assert!(fx.particles().is_empty());
        assert!(!fx.step());

        fx.clear_canvas();
        assert!(fx.canvas().is_blank());
    }

    #[test]
    fn test_particles_drawn_additively_with_trails() {
        let mut fx = quiet();
        fx.start();
        fx.explode(Pos2::new(400.0, 200.0));
        fx.step();

        let marks = fx.canvas().marks();
        assert_eq!(marks.len(), 200);
        assert!(marks
            .iter()
            .all(|m| matches!(m, Mark::Circle { blend: Blend::Additive, .. })));

        // Previous frame's dots survive faded underneath the new ones
        fx.step();
        assert_eq!(fx.canvas().marks().len(), 400);
    }

    #[test]
    fn test_spawn_origin_in_upper_band() {
        let params = FireworkParams {
            spawn_chance: 1.0,
            min_speed: 0.0,
            max_speed: 0.0,
            gravity: 0.0,
            ..FireworkParams::default()
        };
        let mut fx = Fireworks::with_rng(800.0, 600.0, params, StdRng::seed_from_u64(42));
        fx.start();

        for _ in 0..20 {
            fx.step();
        }
        assert_eq!(fx.particles().len(), 20 * 200);
        for p in fx.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 60.0 && p.pos.y <= 420.0);
        }
    }

    #[test]
    fn test_viewport_resize_keeps_running() {
        let mut fx = quiet();
        fx.start();
        fx.set_viewport(1024.0, 768.0);
        assert!(fx.is_running());
        assert_eq!(fx.canvas().size(), Vec2::new(1024.0, 768.0));
        assert!(fx.step());
    }
}
