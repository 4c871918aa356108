//! Projectiles fired by the player and by enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, point_in_box};
use crate::consts::*;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Fading trail sample left behind a projectile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 1.0 when recorded, dropped at 0
    pub life: f32,
}

/// A moving, expiring projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub owner: Owner,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: f32, owner: Owner) -> Self {
        Self {
            pos,
            vel,
            damage,
            owner,
            trail: Vec::new(),
            active: true,
        }
    }

    /// Move one tick, age the trail, and deactivate once outside `arena`
    pub fn advance(&mut self, arena: &Rect) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            life: 1.0,
        });
        self.pos += self.vel;

        for point in &mut self.trail {
            point.life -= PROJECTILE_TRAIL_DECAY;
        }
        self.trail.retain(|p| p.life > 0.0);

        if !point_in_box(self.pos, arena) {
            self.active = false;
        }
    }

    /// Hit box centered on the projectile
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }
}
