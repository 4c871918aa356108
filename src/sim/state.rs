//! Session state and core simulation types
//!
//! Everything a running session owns lives here. External code reads it but
//! only the tick and the engine lifecycle mutate it.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::{Particle, Starfield};
use super::enemy::{Enemy, EnemyKind};
use super::event::SessionSummary;
use super::player::Player;
use super::powerup::PowerUp;
use crate::consts::*;
use crate::tuning::{Loadout, Tuning};
use crate::difficulty_for_level;

/// Lifecycle phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Simulation advances every tick
    Running,
    /// Simulation frozen
    Paused,
    /// Session ended; score and level are final
    GameOver,
}

/// Seed and stream for one session's RNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    /// Gameplay RNG: spawn draws and power-up rolls
    pub fn gameplay(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream.wrapping_mul(2))
    }

    /// Cosmetic RNG: particles, stars, exhaust
    pub fn cosmetic(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream.wrapping_mul(2).wrapping_add(1))
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Always `score / 500 + 1` after a tick
    pub level: u32,
    pub difficulty: f32,
    /// Current time between spawns (ms)
    pub spawn_interval_ms: f32,
    /// Time since the last spawn (ms)
    pub spawn_elapsed_ms: f32,
    /// Simulated time (ms)
    pub time_ms: f64,
    /// Simulated tick counter
    pub frame: u64,
    pub arena: Rect,
    pub tuning: Tuning,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub starfield: Starfield,
    pub rng: Pcg32,
    pub fx_rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh session, already running
    pub fn new(tuning: &Tuning, loadout: Loadout, rng_state: RngState) -> Self {
        let arena = Rect::new(0.0, 0.0, tuning.arena_width, tuning.arena_height);
        let mut fx_rng = rng_state.cosmetic();
        let starfield = Starfield::generate(&mut fx_rng, arena.width, arena.height);

        Self {
            rng_state,
            phase: GamePhase::Running,
            score: 0,
            lives: INITIAL_LIVES,
            level: 1,
            difficulty: difficulty_for_level(1),
            spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            spawn_elapsed_ms: 0.0,
            time_ms: 0.0,
            frame: 0,
            arena,
            tuning: tuning.clone(),
            player: Player::spawn(&arena, loadout),
            enemies: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            starfield,
            rng: rng_state.gameplay(),
            fx_rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Enemy kinds the spawner draws from at the current level
    pub fn enemy_kinds(&self) -> &'static [EnemyKind] {
        EnemyKind::unlocked_at(self.level)
    }

    /// Spawn one enemy of a kind drawn uniformly from the unlocked set.
    ///
    /// The kind draw is the first gameplay draw of a spawn.
    pub fn spawn_enemy(&mut self) -> &Enemy {
        let kinds = self.enemy_kinds();
        let kind = kinds[self.rng.random_range(0..kinds.len())];
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(
            id,
            kind,
            self.difficulty,
            self.tuning.scale_enemy_speed,
            &self.arena,
            &mut self.rng,
        );
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, enemy.pos.x);
        self.enemies.push(enemy);
        &self.enemies[self.enemies.len() - 1]
    }

    /// Add points. Level is recomputed at the end of the next tick.
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            level: self.level,
            difficulty: self.difficulty,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
