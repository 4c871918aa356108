//! Power-ups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::player::Player;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Health,
    Speed,
    Damage,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Damage,
        PowerUpKind::Shield,
    ];

    /// Uniform draw over all kinds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Health => 0xff4444,
            PowerUpKind::Speed => 0x4444ff,
            PowerUpKind::Damage => 0xffaa00,
            PowerUpKind::Shield => 0x44ff44,
        }
    }

    /// Apply this power-up's effect to the player
    pub fn apply(self, player: &mut Player) {
        match self {
            PowerUpKind::Health => player.heal(POWERUP_HEAL),
            PowerUpKind::Speed => {
                player.speed = (player.speed + POWERUP_SPEED_BONUS).min(POWERUP_SPEED_CAP);
            }
            PowerUpKind::Damage => player.damage += POWERUP_DAMAGE_BONUS,
            PowerUpKind::Shield => player.grant_invulnerability(SHIELD_MS),
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, kind }
    }

    pub fn advance(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    /// Still above the cull line below the arena
    pub fn on_screen(&self, arena_height: f32) -> bool {
        self.pos.y < arena_height + ENEMY_ESCAPE_MARGIN
    }
}
