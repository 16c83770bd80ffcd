//! Fountain particle emitter
//!
//! Particles live in world pixel space and advance once per frame. They are
//! render-only state: nothing in the simulation reads them back.

use glam::Vec2;
use rand::Rng;

/// A single water droplet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life
    pub life: f32,
    /// Life at spawn
    pub max_life: f32,
}

impl Particle {
    /// Opacity follows remaining life
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Short-lived particles sprayed from a point with downward acceleration
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    /// Probability of spawning one droplet per frame
    pub spawn_chance: f32,
    /// Downward acceleration in pixels per frame squared
    pub gravity: f32,
    /// Life lost per frame
    pub decay: f32,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            spawn_chance: 0.7,
            gravity: 0.12,
            decay: 0.016,
        }
    }
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maybe spawn a droplet at `origin` (pixels)
    pub fn emit(&mut self, origin: Vec2, rng: &mut impl Rng) {
        if rng.gen::<f32>() >= self.spawn_chance {
            return;
        }
        self.particles.push(Particle {
            position: origin,
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 1.5,
                -rng.gen::<f32>() * 2.5 - 1.0,
            ),
            life: 1.0,
            max_life: 1.0,
        });
    }

    /// Advance every particle one frame and drop the expired ones
    pub fn update(&mut self) {
        let gravity = self.gravity;
        let decay = self.decay;
        self.particles.retain_mut(|p| {
            p.life -= decay;
            p.velocity.y += gravity;
            p.position += p.velocity;
            p.life > 0.0
        });
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
