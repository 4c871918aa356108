//! Enemy archetypes and their shared update routine
//!
//! Archetypes differ only in their stat table; a single update path reads the
//! table, so adding a kind is a data change.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::projectile::{Owner, Projectile};
use crate::consts::*;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Shooter,
    Boss,
}

/// Base stats for an archetype at difficulty 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub health: f32,
    /// Pixels per tick downward
    pub speed: f32,
    pub score: u32,
    /// Shots per second (0 = never shoots)
    pub fire_rate: f32,
    pub color: u32,
}

const BASIC: ArchetypeStats = ArchetypeStats {
    health: 20.0,
    speed: 2.0,
    score: 10,
    fire_rate: 0.0,
    color: 0xff6b6b,
};
const FAST: ArchetypeStats = ArchetypeStats {
    health: 10.0,
    speed: 5.0,
    score: 20,
    fire_rate: 0.0,
    color: 0xffd93d,
};
const TANK: ArchetypeStats = ArchetypeStats {
    health: 60.0,
    speed: 1.0,
    score: 50,
    fire_rate: 0.5,
    color: 0x6bcf7f,
};
const SHOOTER: ArchetypeStats = ArchetypeStats {
    health: 30.0,
    speed: 1.5,
    score: 30,
    fire_rate: 1.5,
    color: 0xff0055,
};
const BOSS: ArchetypeStats = ArchetypeStats {
    health: 200.0,
    speed: 0.8,
    score: 500,
    fire_rate: 2.0,
    color: 0x9d4edd,
};

/// Kinds unlocked at levels 1..=5; level 5 and above use the last entry
const UNLOCK_SCHEDULE: [&[EnemyKind]; 5] = [
    &[EnemyKind::Basic],
    &[EnemyKind::Basic, EnemyKind::Fast],
    &[EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank],
    &[
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Shooter,
    ],
    &[
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Shooter,
        EnemyKind::Boss,
    ],
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Shooter,
        EnemyKind::Boss,
    ];

    pub fn stats(self) -> &'static ArchetypeStats {
        match self {
            EnemyKind::Basic => &BASIC,
            EnemyKind::Fast => &FAST,
            EnemyKind::Tank => &TANK,
            EnemyKind::Shooter => &SHOOTER,
            EnemyKind::Boss => &BOSS,
        }
    }

    /// Kinds the spawner may draw from at `level`
    pub fn unlocked_at(level: u32) -> &'static [EnemyKind] {
        let idx = (level.max(1) as usize - 1).min(UNLOCK_SCHEDULE.len() - 1);
        UNLOCK_SCHEDULE[idx]
    }
}

/// Horizontal movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Oscillates horizontally while descending
    Sine,
    Straight,
}

/// An AI-controlled enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Center of the enemy
    pub pos: Vec2,
    pub max_health: f32,
    pub health: f32,
    pub speed: f32,
    /// Score awarded on destruction, already scaled by difficulty
    pub score_value: u64,
    pub pattern: MovementPattern,
    pub pattern_phase: f32,
    pub fire_rate: f32,
    /// Time until the next shot (ms)
    pub fire_cooldown_ms: f32,
    pub bullets: Vec<Projectile>,
    pub active: bool,
}

impl Enemy {
    /// Build an enemy with stats scaled by `difficulty`, at a random x above
    /// the arena.
    ///
    /// Consumes three gameplay draws in order: x, pattern, pattern phase.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: EnemyKind,
        difficulty: f32,
        scale_speed: bool,
        arena: &Rect,
        rng: &mut R,
    ) -> Self {
        let span = (arena.width - ENEMY_SPAWN_MARGIN * 2.0).max(0.0);
        let x = arena.x + rng.random::<f32>() * span + ENEMY_SPAWN_MARGIN;
        let pattern = if rng.random::<f32>() > 0.5 {
            MovementPattern::Sine
        } else {
            MovementPattern::Straight
        };
        let pattern_phase = rng.random::<f32>() * std::f32::consts::TAU;

        let pos = Vec2::new(x, arena.y + ENEMY_SPAWN_Y);
        let mut enemy = Self::new(id, kind, difficulty, scale_speed, pos);
        enemy.pattern = pattern;
        enemy.pattern_phase = pattern_phase;
        enemy
    }

    /// Enemy at a fixed position with a straight pattern
    pub fn new(id: u32, kind: EnemyKind, difficulty: f32, scale_speed: bool, pos: Vec2) -> Self {
        let stats = kind.stats();
        let max_health = stats.health * difficulty;
        let speed = if scale_speed {
            stats.speed * difficulty
        } else {
            stats.speed
        };
        Self {
            id,
            kind,
            pos,
            max_health,
            health: max_health,
            speed,
            score_value: (stats.score as f32 * difficulty).round() as u64,
            pattern: MovementPattern::Straight,
            pattern_phase: 0.0,
            fire_rate: stats.fire_rate,
            fire_cooldown_ms: 0.0,
            bullets: Vec::new(),
            active: true,
        }
    }

    #[inline]
    pub fn size() -> Vec2 {
        Vec2::splat(ENEMY_SIZE)
    }

    pub fn color(&self) -> u32 {
        self.kind.stats().color
    }

    /// Advance one tick: move, maybe shoot, update own projectiles, and
    /// deactivate once below the arena.
    ///
    /// Shots ignore `_player_x` and head for the arena center.
    pub fn advance(&mut self, _player_x: f32, dt_ms: f32, arena: &Rect) {
        if self.pattern == MovementPattern::Sine {
            self.pos.x += self.pattern_phase.sin() * SINE_AMPLITUDE;
            self.pattern_phase += SINE_PHASE_STEP;
        }
        self.pos.y += self.speed;

        if self.fire_rate > 0.0 {
            self.fire_cooldown_ms -= dt_ms;
            if self.fire_cooldown_ms <= 0.0 {
                self.fire(arena);
            }
        }

        for bullet in &mut self.bullets {
            bullet.advance(arena);
        }
        self.bullets.retain(|b| b.active);

        if self.pos.y > arena.bottom() + ENEMY_ESCAPE_MARGIN {
            self.active = false;
        }
    }

    /// Shoot toward the arena center.
    ///
    /// Aims at a fixed point rather than the live player position.
    pub fn fire(&mut self, arena: &Rect) {
        let muzzle = Vec2::new(self.pos.x, self.pos.y + ENEMY_SIZE / 2.0);
        let target = arena.center();
        let angle = (target.y - self.pos.y).atan2(target.x - self.pos.x);
        let vel = Vec2::new(angle.cos(), angle.sin()) * ENEMY_BULLET_SPEED;
        self.bullets
            .push(Projectile::new(muzzle, vel, ENEMY_BULLET_DAMAGE, Owner::Enemy));
        self.fire_cooldown_ms = 1000.0 / self.fire_rate;
    }

    /// Apply damage. Returns true if this hit destroyed the enemy.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        if self.health <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Self::size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Rect {
        Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }

    #[test]
    fn test_unlock_schedule() {
        assert_eq!(EnemyKind::unlocked_at(1), &[EnemyKind::Basic]);
        assert_eq!(EnemyKind::unlocked_at(2), &[EnemyKind::Basic, EnemyKind::Fast]);
        assert_eq!(EnemyKind::unlocked_at(3).len(), 3);
        assert!(!EnemyKind::unlocked_at(4).contains(&EnemyKind::Boss));
        assert!(EnemyKind::unlocked_at(4).contains(&EnemyKind::Shooter));
        assert_eq!(EnemyKind::unlocked_at(5), &EnemyKind::ALL);
        assert_eq!(EnemyKind::unlocked_at(40), &EnemyKind::ALL);
        // Level 0 never happens, but should not panic
        assert_eq!(EnemyKind::unlocked_at(0), &[EnemyKind::Basic]);
    }

    #[test]
    fn test_difficulty_scales_health_and_score_not_speed() {
        let e = Enemy::new(1, EnemyKind::Tank, 1.4, false, Vec2::ZERO);
        assert!((e.max_health - 84.0).abs() < 1e-4);
        assert_eq!(e.score_value, 70);
        assert_eq!(e.speed, 1.0);

        let scaled = Enemy::new(1, EnemyKind::Tank, 1.4, true, Vec2::ZERO);
        assert!((scaled.speed - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_above_arena_within_margins() {
        let mut rng = Pcg32::seed_from_u64(11);
        for id in 0..200 {
            let e = Enemy::spawn(id, EnemyKind::Basic, 1.0, false, &arena(), &mut rng);
            assert_eq!(e.pos.y, ENEMY_SPAWN_Y);
            assert!(e.pos.x >= ENEMY_SPAWN_MARGIN && e.pos.x <= ARENA_WIDTH - ENEMY_SPAWN_MARGIN);
            assert!(e.active);
        }
    }

    #[test]
    fn test_straight_descends() {
        let mut e = Enemy::new(1, EnemyKind::Fast, 1.0, false, Vec2::new(100.0, 0.0));
        e.advance(400.0, 16.0, &arena());
        assert_eq!(e.pos, Vec2::new(100.0, 5.0));
        assert!(e.bullets.is_empty());
    }

    #[test]
    fn test_sine_oscillates() {
        let mut e = Enemy::new(1, EnemyKind::Basic, 1.0, false, Vec2::new(100.0, 0.0));
        e.pattern = MovementPattern::Sine;
        e.pattern_phase = std::f32::consts::FRAC_PI_2;
        e.advance(400.0, 16.0, &arena());
        assert!((e.pos.x - 102.0).abs() < 1e-4);
        assert!((e.pattern_phase - (std::f32::consts::FRAC_PI_2 + SINE_PHASE_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_shooter_fires_toward_center() {
        let mut e = Enemy::new(1, EnemyKind::Shooter, 1.0, false, Vec2::new(100.0, 100.0));
        e.advance(400.0, 16.0, &arena());
        assert_eq!(e.bullets.len(), 1);
        let b = &e.bullets[0];
        assert_eq!(b.owner, Owner::Enemy);
        assert!(b.vel.x > 0.0 && b.vel.y > 0.0);
        assert!((b.vel.length() - ENEMY_BULLET_SPEED).abs() < 1e-4);

        // 1.5 shots/s -> no second shot within the next 600 ms
        for _ in 0..20 {
            e.advance(400.0, 30.0, &arena());
        }
        assert_eq!(e.bullets.len(), 1);
    }

    #[test]
    fn test_escape_deactivates() {
        let mut e = Enemy::new(1, EnemyKind::Basic, 1.0, false, Vec2::new(100.0, 649.0));
        e.advance(400.0, 16.0, &arena());
        assert!(!e.active);
    }

    #[test]
    fn test_basic_takes_two_hits() {
        let mut e = Enemy::new(1, EnemyKind::Basic, 1.0, false, Vec2::new(100.0, 100.0));
        assert!(!e.take_damage(10.0));
        assert!(e.active);
        assert!(e.take_damage(10.0));
        assert!(!e.active);
    }
}
