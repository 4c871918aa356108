//! Per-frame simulation tick
//!
//! Advances a session by one frame. Within a tick the order is fixed:
//! background, player, spawner, enemies (each resolving player bullets, then
//! contact, then enemy bullets), particles, power-ups, level, score event.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::intersects;
use super::effects::spawn_explosion;
use super::enemy::Enemy;
use super::event::{GameEvent, GameListener};
use super::powerup::{PowerUp, PowerUpKind};
use super::state::{GamePhase, GameState};
use crate::{difficulty_for_level, level_for_score, spawn_interval_for_score};

/// Explosion color when an enemy rams the player
const CONTACT_EXPLOSION_COLOR: u32 = 0xff0000;

/// Logical controls held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the session by one frame of `dt_ms` milliseconds.
///
/// Does nothing unless the session is running.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32, listener: &mut dyn GameListener) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;
    state.time_ms += dt_ms as f64;
    let arena = state.arena;

    state
        .starfield
        .advance(&mut state.fx_rng, dt_ms, arena.width, arena.height);

    state.player.advance(input, dt_ms, &arena, &mut state.fx_rng);

    update_spawner(state, dt_ms);
    update_enemies(state, dt_ms, listener);

    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| p.life > 0.0);

    update_power_ups(state, listener);
    update_level(state, listener);

    listener.on_event(&GameEvent::ScoreChanged { score: state.score });
}

fn update_spawner(state: &mut GameState, dt_ms: f32) {
    state.spawn_elapsed_ms += dt_ms;
    if state.spawn_elapsed_ms > state.spawn_interval_ms {
        state.spawn_enemy();
        state.spawn_elapsed_ms = 0.0;
        state.spawn_interval_ms = spawn_interval_for_score(state.score);
    }
}

fn update_enemies(state: &mut GameState, dt_ms: f32, listener: &mut dyn GameListener) {
    // Taken out so collision handling can borrow the rest of the state
    let mut enemies = std::mem::take(&mut state.enemies);

    for enemy in &mut enemies {
        enemy.advance(state.player.pos.x, dt_ms, &state.arena);

        // Player bullets
        let mut destroyed = false;
        for bullet in state.player.bullets.iter_mut().filter(|b| b.active) {
            if !intersects(&bullet.bounds(), &enemy.bounds()) {
                continue;
            }
            bullet.active = false;
            if enemy.take_damage(bullet.damage) {
                destroyed = true;
                break;
            }
        }
        if destroyed {
            on_enemy_destroyed(state, enemy, listener);
        }

        // Contact with the player
        if enemy.active
            && !state.player.invulnerable
            && intersects(&state.player.bounds(), &enemy.bounds())
        {
            if state.player.take_damage(state.tuning.contact_damage) {
                lose_life(state, listener);
            }
            enemy.active = false;
            spawn_explosion(
                &mut state.particles,
                &mut state.fx_rng,
                enemy.pos,
                CONTACT_EXPLOSION_COLOR,
            );
        }

        // Enemy bullets
        for bullet in enemy.bullets.iter_mut().filter(|b| b.active) {
            if state.player.invulnerable {
                break;
            }
            if !intersects(&bullet.bounds(), &state.player.bounds()) {
                continue;
            }
            bullet.active = false;
            if state.player.take_damage(bullet.damage) {
                lose_life(state, listener);
            }
        }
        enemy.bullets.retain(|b| b.active);
    }

    enemies.retain(|e| e.active);
    state.enemies = enemies;
    state.player.bullets.retain(|b| b.active);
}

/// Score, explode, notify, then roll for a power-up drop
fn on_enemy_destroyed(state: &mut GameState, enemy: &Enemy, listener: &mut dyn GameListener) {
    state.add_score(enemy.score_value);
    spawn_explosion(
        &mut state.particles,
        &mut state.fx_rng,
        enemy.pos,
        enemy.color(),
    );
    log::debug!(
        "Destroyed {:?} #{} (+{}, score {})",
        enemy.kind,
        enemy.id,
        enemy.score_value,
        state.score
    );
    listener.on_event(&GameEvent::EnemyKilled(enemy.into()));

    if state.rng.random::<f32>() < state.tuning.powerup_drop_chance {
        let kind = PowerUpKind::random(&mut state.rng);
        state.power_ups.push(PowerUp::new(enemy.pos, kind));
    }
}

/// Consume a life after a lethal hit
fn lose_life(state: &mut GameState, listener: &mut dyn GameListener) {
    if state.is_over() {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    log::debug!("Life lost, {} remaining", state.lives);
    listener.on_event(&GameEvent::LivesChanged { lives: state.lives });

    if state.lives == 0 {
        game_over(state, listener);
    } else {
        state.player.refill();
    }
}

fn game_over(state: &mut GameState, listener: &mut dyn GameListener) {
    state.phase = GamePhase::GameOver;
    let summary = state.summary();
    log::info!(
        "Game over: score {} level {} difficulty {:.1}",
        summary.score,
        summary.level,
        summary.difficulty
    );
    listener.on_event(&GameEvent::GameOver(summary));
}

fn update_power_ups(state: &mut GameState, listener: &mut dyn GameListener) {
    let player_bounds = state.player.bounds();
    let arena_height = state.arena.height;
    let mut collected = Vec::new();

    state.power_ups.retain_mut(|p| {
        p.advance();
        if intersects(&player_bounds, &p.bounds()) {
            collected.push(p.kind);
            return false;
        }
        p.on_screen(arena_height)
    });

    for kind in collected {
        log::debug!("Collected {:?}", kind);
        listener.on_event(&GameEvent::PowerUpCollected { kind });
        kind.apply(&mut state.player);
    }
}

fn update_level(state: &mut GameState, listener: &mut dyn GameListener) {
    let level = level_for_score(state.score);
    if level > state.level {
        state.level = level;
        state.difficulty = difficulty_for_level(level);
        log::info!(
            "Level {} (difficulty {:.1}, kinds {:?})",
            level,
            state.difficulty,
            state.enemy_kinds()
        );
        listener.on_event(&GameEvent::LevelChanged { level });
    }
}
