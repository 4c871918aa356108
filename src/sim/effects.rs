//! Cosmetic effects: explosion particles, engine exhaust, starfield.
//!
//! Nothing here feeds back into scoring or collision. Effects draw from the
//! cosmetic RNG so they never shift the gameplay random sequence.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Explosion debris
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel *= 0.95;
        self.life -= 0.02;
        self.size *= 0.95;
    }
}

/// Push a burst of particles, respecting the pool cap
pub fn spawn_explosion<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: u32,
) {
    for _ in 0..EXPLOSION_PARTICLES {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 10.0,
            (rng.random::<f32>() - 0.5) * 10.0,
        );
        let size = rng.random::<f32>() * 5.0 + 2.0;
        particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            size,
            color,
        });
    }
}

/// Engine exhaust puff left behind a moving ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhaustPuff {
    pub pos: Vec2,
    pub life: f32,
    pub size: f32,
}

impl ExhaustPuff {
    pub fn advance(&mut self) {
        self.pos.y += 2.0;
        self.life -= 0.05;
        self.size *= 0.95;
    }
}

/// Background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
}

/// Parallax starfield drifting down the arena
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
                size: rng.random::<f32>() * 1.5,
                speed: rng.random::<f32>() * 0.5 + 0.2,
                brightness: rng.random::<f32>() * 0.5 + 0.5,
            })
            .collect();
        Self { stars }
    }

    /// Drift speed is tuned for a 16 ms frame
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, dt_ms: f32, width: f32, height: f32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * (dt_ms / 16.0);
            if star.pos.y > height {
                star.pos.y = 0.0;
                star.pos.x = rng.random::<f32>() * width;
            }
        }
    }
}
