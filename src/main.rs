//! Lane Runner entry point
//!
//! Browser builds wire keyboard and buttons to the game and drive it from
//! `requestAnimationFrame`. The page provides `#score`, `#coin-counter` and
//! `#feedback` elements plus `startButton`/`pauseButton`.
//!
//! Native builds run a headless autopilot session, which is handy for balance
//! checks: `lane-runner [seed] [tuning.json]`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use lane_runner::persistence::LocalStorageStore;
    use lane_runner::sim::GamePhase;
    use lane_runner::{Game, Intent, RenderSink, Snapshot, Tuning};

    type WebGame = Game<LocalStorageStore>;

    /// DOM text HUD: score and coin counters plus the latest feedback line
    struct HudSink {
        document: Document,
    }

    impl HudSink {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn notify(&self, text: &str) {
            self.set_text("feedback", text);
        }
    }

    impl RenderSink for HudSink {
        fn present(&mut self, snapshot: &Snapshot<'_>) {
            self.set_text("score", &snapshot.score.to_string());
            self.set_text("coin-counter", &snapshot.coin_balance.to_string());
        }
    }

    pub fn run() {
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }
        console_error_panic_hook::set_once();

        log::info!("Lane Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available, giving up");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(LocalStorageStore::new(), Tuning::default(), seed) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Bad tuning: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&document, game.clone());
        setup_buttons(&document, game.clone());

        let sink = Rc::new(RefCell::new(HudSink { document }));
        request_animation_frame(game, sink);

        log::info!("Lane Runner running!");
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<WebGame>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let intent = match event.key().as_str() {
                "ArrowUp" => Intent::Jump,
                "ArrowDown" => Intent::Slide,
                "ArrowLeft" => Intent::LaneUp,
                "ArrowRight" => Intent::LaneDown,
                _ => return,
            };
            event.prevent_default();
            game.borrow_mut().intent(intent);
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<WebGame>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let label_target = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.toggle_pause();
                let label = if g.phase() == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                };
                label_target.set_text_content(Some(label));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>, sink: Rc<RefCell<HudSink>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game, sink);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, sink: Rc<RefCell<HudSink>>) {
        {
            let mut g = game.borrow_mut();
            let mut hud = sink.borrow_mut();
            g.tick();
            g.render(&mut *hud);

            for event in g.drain_events() {
                log::debug!("{:?}", event);
                if let Some(text) = event.feedback_text() {
                    hud.notify(&text);
                }
            }
        }

        request_animation_frame(game, sink);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_runner::consts::*;
    use lane_runner::sim::{GameEvent, GamePhase, ObstacleKind, Stance};
    use lane_runner::{Game, Intent, MemoryStore, RenderSink, Snapshot, Tuning};

    /// Hard stop for a session that never dies (two minutes of play)
    const MAX_TICKS: u32 = 120 * TICKS_PER_SECOND;
    /// How far ahead the autopilot reacts to an obstacle
    const LOOKAHEAD: f32 = 60.0;

    /// Logs a progress line every ten seconds of play
    struct LogSink {
        frames: u32,
    }

    impl RenderSink for LogSink {
        fn present(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            if self.frames % (10 * TICKS_PER_SECOND) == 0 {
                log::info!(
                    "t={}s score={} coins={} obstacles={} pursuer_gap={:.0}",
                    self.frames / TICKS_PER_SECOND,
                    snapshot.score,
                    snapshot.coin_balance,
                    snapshot.obstacles.len(),
                    snapshot.pursuer.distance
                );
            }
        }
    }

    /// Pick an intent for the nearest obstacle ahead in the player's lane
    fn autopilot(snapshot: &Snapshot<'_>) -> Option<Intent> {
        let player = snapshot.player;
        if player.stance != Stance::Running {
            return None;
        }
        let ahead = snapshot
            .obstacles
            .iter()
            .filter(|o| o.lane == player.lane)
            .filter(|o| o.pos.x >= player.pos.x && o.pos.x - player.pos.x < LOOKAHEAD)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;

        Some(match ahead.kind {
            ObstacleKind::RequiresJump => Intent::Jump,
            ObstacleKind::RequiresSlide => Intent::Slide,
        })
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Couldn't use {} ({}), falling back to defaults", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args
            .first()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        let tuning = load_tuning(args.get(1).map(String::as_str));

        let mut game = match Game::new(MemoryStore::new(), tuning, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Bad tuning: {}", e);
                return;
            }
        };
        let mut sink = LogSink { frames: 0 };
        game.start();

        let mut pickups = 0;
        for _ in 0..MAX_TICKS {
            let intent = autopilot(&game.snapshot());
            if let Some(intent) = intent {
                game.intent(intent);
            }
            game.tick();
            game.render(&mut sink);

            for event in game.drain_events() {
                match event {
                    GameEvent::PowerUpCollected { label, .. } => {
                        pickups += 1;
                        log::debug!("+{}", label);
                    }
                    GameEvent::GameOver { cause, score } => {
                        log::info!("Game over ({:?}) with score {}", cause, score);
                    }
                    other => log::trace!("{:?}", other),
                }
            }

            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Session finished: score={} coins={} power-ups={} ticks={}",
            game.score(),
            game.coins(),
            pickups,
            game.state().time_ticks
        );
        match serde_json::to_string(&game.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Couldn't serialize final snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
