//! Space Shooter entry point
//!
//! Native builds run a headless autopilot session and print its summary.
//! Web builds drive the engine from `requestAnimationFrame` and mirror the
//! session into DOM HUD elements.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use space_shooter::Tuning;
    use space_shooter::platform::{KeyCommand, Keyboard};
    use space_shooter::sim::{Engine, GameEvent};

    /// Everything the browser callbacks share
    struct Game {
        engine: Engine,
        keyboard: Keyboard,
        events: Vec<GameEvent>,
    }

    impl Game {
        fn handle_command(&mut self, command: KeyCommand) {
            if !command.allowed_in(self.engine.phase()) {
                return;
            }
            match command {
                KeyCommand::TogglePause => self.engine.toggle_pause(),
                KeyCommand::NewGame => {
                    if let Err(e) = self.engine.restart() {
                        log::warn!("Restart failed: {}", e);
                    }
                    self.keyboard.clear();
                }
            }
        }

        fn frame(&mut self, time: f64) {
            let input = self.keyboard.snapshot();
            self.engine.tick(time, &input, &mut self.events);
            self.update_hud();
            self.events.clear();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };

            for event in &self.events {
                match event {
                    GameEvent::ScoreChanged { score } => {
                        set("#hud-score .hud-value", &score.to_string())
                    }
                    GameEvent::LivesChanged { lives } => {
                        set("#hud-lives .hud-value", &lives.to_string())
                    }
                    GameEvent::LevelChanged { level } => {
                        set("#hud-level .hud-value", &level.to_string())
                    }
                    GameEvent::GameOver(summary) => {
                        set("#final-score", &summary.score.to_string());
                        if let Some(el) = document.get_element_by_id("game-over") {
                            let _ = el.set_attribute("class", "visible");
                        }
                    }
                    _ => {}
                }
            }

            if let Some(state) = self.engine.state() {
                set(
                    "#hud-health .hud-value",
                    &format!("{:.0}", state.player.display_health()),
                );
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Space Shooter starting...");

        let seed = js_sys::Date::now() as u64;
        let mut engine =
            Engine::new(Tuning::default(), seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        engine
            .start(None)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            engine,
            keyboard: Keyboard::new(),
            events: Vec::new(),
        }));

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(command) = g.keyboard.key_down(&event.key()) {
                    g.handle_command(command);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keyboard.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Shooter (native) starting...");

    let tuning = match std::env::var("SHOOTER_TUNING") {
        Ok(path) => {
            log::info!("Loading tuning from {}", path);
            space_shooter::Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        Err(_) => space_shooter::Tuning::default(),
    };
    let seed = std::env::var("SHOOTER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);

    let summary = autopilot::run(tuning, seed)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Headless session with a sweeping, always-firing pilot
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use space_shooter::platform::Keyboard;
    use space_shooter::sim::{Engine, GamePhase, GameEvent, SessionSummary};
    use space_shooter::{ConfigError, Tuning};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 16.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 37_500;

    pub fn run(tuning: Tuning, seed: u64) -> Result<SessionSummary, ConfigError> {
        let mut engine = Engine::new(tuning, seed)?;
        engine.start(None)?;

        let mut keyboard = Keyboard::new();
        keyboard.key_down(" ");
        keyboard.key_down("ArrowLeft");
        let mut heading_left = true;
        let mut events: Vec<GameEvent> = Vec::new();

        for frame in 0..MAX_FRAMES {
            engine.tick(frame as f64 * FRAME_MS, &keyboard.snapshot(), &mut events);
            for event in events.drain(..) {
                if let GameEvent::LevelChanged { level } = event {
                    log::info!("Autopilot reached level {}", level);
                }
            }
            if engine.phase() == GamePhase::GameOver {
                break;
            }

            let Some(state) = engine.state() else {
                break;
            };
            let x = state.player.pos.x;
            let turn = if heading_left {
                x <= state.arena.x + state.arena.width * 0.1
            } else {
                x >= state.arena.right() - state.arena.width * 0.1
            };
            if turn {
                let (from, to) = if heading_left {
                    ("ArrowLeft", "ArrowRight")
                } else {
                    ("ArrowRight", "ArrowLeft")
                };
                keyboard.key_up(from);
                keyboard.key_down(to);
                heading_left = !heading_left;
            }
        }

        let summary = engine
            .state()
            .map(|state| state.summary())
            .unwrap_or(SessionSummary {
                score: 0,
                level: 1,
                difficulty: 1.0,
            });
        log::info!(
            "Autopilot finished in phase {:?} with score {}",
            engine.phase(),
            summary.score
        );
        Ok(summary)
    }
}
