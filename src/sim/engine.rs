//! Session lifecycle and the frame clock
//!
//! The engine owns at most one session. It turns host timestamps into clamped
//! frame deltas and forwards them to [`tick`](super::tick::tick).

use super::event::GameListener;
use super::state::{GamePhase, GameState, RngState};
use super::tick::{TickInput, tick};
use crate::error::ConfigError;
use crate::tuning::{ShipStats, Tuning};

/// Drives sessions: start, pause, restart, stop, and per-frame ticks
#[derive(Debug)]
pub struct Engine {
    tuning: Tuning,
    seed: u64,
    /// Sessions started so far; each gets its own RNG stream
    sessions: u64,
    session: Option<GameState>,
    last_ship: Option<ShipStats>,
    /// Host timestamp of the previous tick (ms)
    last_frame_ms: Option<f64>,
    ticking: bool,
}

impl Engine {
    /// Engine with validated tuning and no session
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        if let Err(e) = tuning.validate() {
            log::warn!("Rejected tuning: {}", e);
            return Err(e);
        }
        Ok(Self {
            tuning,
            seed,
            sessions: 0,
            session: None,
            last_ship: None,
            last_frame_ms: None,
            ticking: false,
        })
    }

    /// Start a fresh session, replacing any current one.
    ///
    /// Invalid ship stats are rejected and leave the current session alone.
    pub fn start(&mut self, ship: Option<ShipStats>) -> Result<(), ConfigError> {
        let ship = ship.unwrap_or_default();
        if let Err(e) = ship.validate() {
            log::warn!("Rejected ship stats: {}", e);
            return Err(e);
        }

        let rng_state = RngState::new(self.seed, self.sessions);
        self.sessions += 1;
        self.session = Some(GameState::new(&self.tuning, ship.loadout(), rng_state));
        self.last_ship = Some(ship);
        self.last_frame_ms = None;
        self.ticking = true;

        log::info!(
            "Session {} started (seed {}, stream {})",
            self.sessions,
            rng_state.seed,
            rng_state.stream
        );
        Ok(())
    }

    /// New session with the last ship stats used
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.start(self.last_ship)
    }

    /// Running <-> Paused. No effect in any other phase.
    pub fn toggle_pause(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => {
                // Time spent paused is not simulated
                self.last_frame_ms = None;
                GamePhase::Running
            }
            other => other,
        };
        log::debug!("Phase now {:?}", state.phase);
    }

    /// Halt ticking. The last session stays readable.
    pub fn stop(&mut self) {
        self.ticking = false;
        self.last_frame_ms = None;
    }

    /// Advance the session to host time `now_ms`.
    ///
    /// The first tick after start or resume simulates zero time. Deltas are
    /// clamped to `[0, max_frame_dt_ms]`.
    pub fn tick(&mut self, now_ms: f64, input: &TickInput, listener: &mut dyn GameListener) {
        if !self.ticking {
            return;
        }
        let Some(state) = self.session.as_mut() else {
            return;
        };

        let dt_ms = match self.last_frame_ms {
            Some(prev) => frame_delta(prev, now_ms, self.tuning.max_frame_dt_ms),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        tick(state, input, dt_ms, listener);
    }

    /// Current phase; `Idle` before the first start
    pub fn phase(&self) -> GamePhase {
        self.session
            .as_ref()
            .map_or(GamePhase::Idle, |state| state.phase)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Clamped delta between two host timestamps. NaN collapses to zero.
fn frame_delta(prev_ms: f64, now_ms: f64, max_ms: f32) -> f32 {
    let dt = (now_ms - prev_ms) as f32;
    dt.max(0.0).min(max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::event::GameEvent;

    fn engine() -> Engine {
        Engine::new(Tuning::default(), 2024).unwrap()
    }

    #[test]
    fn test_idle_until_started() {
        let mut e = engine();
        assert_eq!(e.phase(), GamePhase::Idle);
        assert!(e.state().is_none());
        e.tick(16.0, &TickInput::default(), &mut ());
        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_runs_with_defaults() {
        let mut e = engine();
        e.start(None).unwrap();
        assert_eq!(e.phase(), GamePhase::Running);
        assert!(e.is_ticking());
        let state = e.state().unwrap();
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.player.max_health, PLAYER_HEALTH);
    }

    #[test]
    fn test_invalid_ship_keeps_session() {
        let mut e = engine();
        e.start(None).unwrap();
        e.tick(0.0, &TickInput::default(), &mut ());
        e.tick(16.0, &TickInput::default(), &mut ());

        let bad = ShipStats {
            speed: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(e.start(Some(bad)), Err(ConfigError::InvalidShipStat { .. })));
        assert_eq!(e.state().unwrap().frame, 2);
    }

    #[test]
    fn test_overflowing_ship_keeps_session() {
        let mut e = engine();
        e.start(None).unwrap();
        let huge = ShipStats {
            health: Some(f32::MAX),
            ..Default::default()
        };
        assert!(e.start(Some(huge)).is_err());
        assert_eq!(e.state().unwrap().player.max_health, PLAYER_HEALTH);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            arena_width: 0.0,
            ..Default::default()
        };
        assert!(Engine::new(tuning, 1).is_err());

        // Narrower than the ship
        let tuning = Tuning {
            arena_width: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(tuning, 1),
            Err(ConfigError::InvalidArena { .. })
        ));
    }

    #[test]
    fn test_smallest_arena_ticks() {
        let tuning = Tuning {
            arena_width: PLAYER_WIDTH,
            arena_height: PLAYER_HEIGHT,
            ..Default::default()
        };
        let mut e = Engine::new(tuning, 1).unwrap();
        e.start(None).unwrap();
        let input = TickInput {
            left: true,
            up: true,
            fire: true,
            ..Default::default()
        };
        for i in 0..200 {
            e.tick(i as f64 * 16.0, &input, &mut ());
        }
        assert!(e.state().unwrap().frame > 0);
    }

    #[test]
    fn test_first_tick_simulates_zero_time() {
        let mut e = engine();
        e.start(None).unwrap();
        e.tick(5000.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().time_ms, 0.0);
        e.tick(5016.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().time_ms, 16.0);
    }

    #[test]
    fn test_frame_delta_clamped() {
        let mut e = engine();
        e.start(None).unwrap();
        e.tick(0.0, &TickInput::default(), &mut ());
        e.tick(1000.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().time_ms, MAX_FRAME_DT_MS as f64);
        // Clock going backwards
        e.tick(900.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().time_ms, MAX_FRAME_DT_MS as f64);

        assert_eq!(frame_delta(0.0, f64::NAN, 32.0), 0.0);
        assert_eq!(frame_delta(10.0, 20.0, 32.0), 10.0);
    }

    #[test]
    fn test_pause_freezes_and_resumes_without_jump() {
        let mut e = engine();
        e.start(None).unwrap();
        e.tick(0.0, &TickInput::default(), &mut ());
        e.tick(16.0, &TickInput::default(), &mut ());
        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::Paused);

        e.tick(32.0, &TickInput::default(), &mut ());
        e.tick(48.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().frame, 2);

        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::Running);
        e.tick(10_000.0, &TickInput::default(), &mut ());
        let state = e.state().unwrap();
        assert_eq!(state.frame, 3);
        assert_eq!(state.time_ms, 16.0);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut e = engine();
        e.start(None).unwrap();
        if let Some(state) = e.session.as_mut() {
            state.phase = GamePhase::GameOver;
        }
        e.toggle_pause();
        assert_eq!(e.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_stop_keeps_state_readable() {
        let mut e = engine();
        e.start(None).unwrap();
        e.tick(0.0, &TickInput::default(), &mut ());
        e.tick(16.0, &TickInput::default(), &mut ());
        e.stop();
        assert!(!e.is_ticking());
        e.tick(32.0, &TickInput::default(), &mut ());
        assert_eq!(e.state().unwrap().frame, 2);
    }

    #[test]
    fn test_restart_reuses_ship_on_new_stream() {
        let mut e = engine();
        let ship = ShipStats {
            health: Some(5.0),
            ..Default::default()
        };
        e.start(Some(ship)).unwrap();
        let first_stream = e.state().unwrap().rng_state.stream;

        e.restart().unwrap();
        let state = e.state().unwrap();
        assert_eq!(state.player.max_health, 50.0);
        assert_eq!(state.score, 0);
        assert_ne!(state.rng_state.stream, first_stream);
    }

    #[test]
    fn test_same_seed_same_session() {
        let run = || {
            let mut e = engine();
            e.start(None).unwrap();
            let mut events: Vec<GameEvent> = Vec::new();
            let input = TickInput {
                fire: true,
                left: true,
                ..Default::default()
            };
            for i in 0..600 {
                e.tick(i as f64 * 16.0, &input, &mut events);
            }
            (e.state().unwrap().score, e.state().unwrap().enemies.len(), events)
        };
        assert_eq!(run(), run());
    }
}
