//! The player's ship

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::ExhaustPuff;
use super::projectile::{Owner, Projectile};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Loadout;

/// The user-controlled ship. Persists across lives within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the ship
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pixels per tick on each held axis
    pub speed: f32,
    pub max_health: f32,
    /// May dip below zero on a lethal hit until the engine consumes a life
    pub health: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub damage: f32,
    /// Time until the next shot is allowed (ms)
    pub fire_cooldown_ms: f32,
    pub bullets: Vec<Projectile>,
    pub invulnerable: bool,
    pub invulnerable_ms: f32,
    /// Engine exhaust (cosmetic)
    pub exhaust: Vec<ExhaustPuff>,
}

impl Player {
    pub fn new(pos: Vec2, loadout: Loadout) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: loadout.speed,
            max_health: loadout.max_health,
            health: loadout.max_health,
            fire_rate: loadout.fire_rate,
            damage: loadout.damage,
            fire_cooldown_ms: 0.0,
            bullets: Vec::new(),
            invulnerable: false,
            invulnerable_ms: 0.0,
            exhaust: Vec::new(),
        }
    }

    /// Spawn point near the bottom-center of the arena
    pub fn spawn(arena: &Rect, loadout: Loadout) -> Self {
        let pos = Vec2::new(
            arena.x + arena.width / 2.0,
            arena.bottom() - PLAYER_SPAWN_OFFSET,
        );
        Self::new(pos, loadout)
    }

    #[inline]
    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Advance one tick from the current input snapshot.
    ///
    /// Diagonal input moves at full speed on both axes.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        input: &TickInput,
        dt_ms: f32,
        arena: &Rect,
        fx_rng: &mut R,
    ) {
        let mut vel = Vec2::ZERO;
        if input.left {
            vel.x = -self.speed;
        }
        if input.right {
            vel.x = self.speed;
        }
        if input.up {
            vel.y = -self.speed;
        }
        if input.down {
            vel.y = self.speed;
        }
        self.vel = vel;
        self.pos += vel;

        let half = Self::size() / 2.0;
        self.pos.x = self.pos.x.clamp(arena.x + half.x, arena.right() - half.x);
        self.pos.y = self.pos.y.clamp(arena.y + half.y, arena.bottom() - half.y);

        if vel != Vec2::ZERO {
            self.exhaust.push(ExhaustPuff {
                pos: Vec2::new(self.pos.x, self.pos.y + half.y),
                life: 1.0,
                size: fx_rng.random::<f32>() * 5.0 + 3.0,
            });
        }
        for puff in &mut self.exhaust {
            puff.advance();
        }
        self.exhaust.retain(|p| p.life > 0.0);

        self.fire_cooldown_ms = (self.fire_cooldown_ms - dt_ms).max(0.0);
        if input.fire && self.fire_cooldown_ms <= 0.0 {
            self.fire();
        }

        for bullet in &mut self.bullets {
            bullet.advance(arena);
        }
        self.bullets.retain(|b| b.active);

        if self.invulnerable {
            self.invulnerable_ms -= dt_ms;
            if self.invulnerable_ms <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_ms = 0.0;
            }
        }
    }

    /// Fire one projectile straight up from the nose and restart the cooldown
    pub fn fire(&mut self) {
        let nose = Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2.0);
        self.bullets.push(Projectile::new(
            nose,
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            self.damage,
            Owner::Player,
        ));
        self.fire_cooldown_ms = 1000.0 / self.fire_rate;
    }

    /// Apply damage unless invulnerable. Returns true if the hit was lethal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invulnerable {
            return false;
        }
        self.health -= amount;
        self.grant_invulnerability(INVULNERABLE_MS);
        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Restore full health after a life is consumed
    pub fn refill(&mut self) {
        self.health = self.max_health;
    }

    pub fn grant_invulnerability(&mut self, ms: f32) {
        self.invulnerable = true;
        self.invulnerable_ms = ms;
    }

    /// Health for display (never negative)
    pub fn display_health(&self) -> f32 {
        self.health.max(0.0)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Self::size())
    }
}
