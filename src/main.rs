//! Tiltball entry point
//!
//! Handles platform-specific initialization and runs the host loop. The
//! renderer is an external collaborator; this binary only wires input events
//! into the core and mirrors core state out to the HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceOrientationEvent, KeyboardEvent, PointerEvent};

    use tiltball::highscores::LocalStorageHighScore;
    use tiltball::input::{InputMode, TiltInput};
    use tiltball::sim::{GameEvent, GamePhase};
    use tiltball::{GameWorld, Tuning};

    // iOS requires an explicit permission request, triggered from a user
    // gesture; elsewhere this resolves to granted immediately.
    #[wasm_bindgen(inline_js = "
        export function request_orientation_permission() {
            const D = window.DeviceOrientationEvent;
            if (D && typeof D.requestPermission === 'function') {
                return D.requestPermission()
                    .then((s) => s === 'granted')
                    .catch(() => false);
            }
            return Promise.resolve(true);
        }
    ")]
    extern "C" {
        fn request_orientation_permission() -> js_sys::Promise;
    }

    /// Game instance holding all state
    struct Game {
        world: GameWorld,
        input: TiltInput,
        last_time: f64,
        permission_requested: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            let world = GameWorld::new(seed, Box::new(LocalStorageHighScore), tuning);
            let input = TiltInput::new(InputMode::Orientation, tuning.drag_sensitivity);
            Self {
                world,
                input,
                last_time: 0.0,
                permission_requested: false,
            }
        }

        /// Advance one frame and surface the events to the page
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            for event in self.world.advance(dt) {
                match event {
                    GameEvent::PhaseChanged(phase) => log::info!("phase: {phase:?}"),
                    GameEvent::GoalCollected { points, .. } => {
                        log::info!("goal collected, +{points}")
                    }
                    GameEvent::NewHighScore(score) => log::info!("new high score: {score}"),
                }
            }
        }

        /// Mirror core state into the HUD text nodes
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let fields = [
                ("hud-score", self.world.score().to_string()),
                ("hud-time", format!("{:.0}", self.world.time_remaining().ceil())),
                (
                    "hud-goals",
                    format!(
                        "{}/{}",
                        self.world.goals_collected(),
                        tiltball::consts::GOALS_TO_WIN
                    ),
                ),
                ("hud-best", self.world.high_score().to_string()),
            ];
            for (id, text) in fields {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }

            // Phase-dependent overlays
            let overlays = [
                ("start-prompt", GamePhase::Ready),
                ("win-screen", GamePhase::Win),
                ("game-over", GamePhase::GameOver),
            ];
            for (id, phase) in overlays {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if self.world.phase() == phase { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
        }

        fn handle_primary_action(&mut self) {
            match self.world.phase() {
                GamePhase::Ready | GamePhase::Win | GamePhase::GameOver => {
                    self.world.start();
                }
                _ => {}
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Tiltball starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Tuning::default())));
        log::info!("seed: {seed}");

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Tiltball running");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Device orientation → tilt sample (missing axes dropped in TiltInput)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let mut g = game.borrow_mut();
                if let Some((beta, gamma)) = g.input.orientation_sample(event.beta(), event.gamma())
                {
                    g.world.tilt(beta, gamma);
                }
            });
            let _ = window.add_event_listener_with_callback(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Pointer down: start the run on menus, anchor a drag otherwise
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if !g.permission_requested {
                    g.permission_requested = true;
                    drop(g);
                    resolve_orientation_permission(game.clone());
                    g = game.borrow_mut();
                }
                g.handle_primary_action();
                g.input
                    .pointer_down(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move: drag-derived pseudo-tilt
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some((beta, gamma)) = g
                    .input
                    .pointer_move(event.client_x() as f32, event.client_y() as f32)
                {
                    g.world.tilt(beta, gamma);
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up: level out
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if let Some((beta, gamma)) = g.input.pointer_up() {
                    g.world.tilt(beta, gamma);
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space/enter start, R resets
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => g.handle_primary_action(),
                    "r" | "R" => {
                        g.world.reset();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Ask for orientation access; on rejection the input collaborator falls
    /// back to drag mode and the game keeps running.
    fn resolve_orientation_permission(game: Rc<RefCell<Game>>) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |granted: JsValue| {
            if granted.as_bool() != Some(true) {
                game.borrow_mut().input.permission_denied();
            }
        });
        let _ = request_orientation_permission().then(&callback);
        callback.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native: headless demo run. A proportional controller tilts toward the
/// current goal, which exercises the whole core without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tiltball::consts::{MAX_TILT_DEG, SIM_DT};
    use tiltball::sim::GamePhase;
    use tiltball::{GameWorld, MemoryHighScore, Tuning};

    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut world = GameWorld::new(seed, Box::new(MemoryHighScore::default()), Tuning::default());

    log::info!("Tiltball headless demo, seed {seed}");
    world.start();

    let mut frames = 0u32;
    while world.phase() == GamePhase::Playing && frames < 120 * 60 {
        let hero = world.hero_position();
        let goal = world.goals()[0].position;
        let to_goal = goal - hero;

        // Tilt toward the goal, saturating at full tilt
        let gamma = (to_goal.x * 12.0).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        let beta = (-to_goal.z * 12.0).clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        world.tilt(beta, gamma);

        for event in world.advance(SIM_DT) {
            log::info!("{event:?}");
        }
        frames += 1;
    }

    println!(
        "demo finished after {:.1}s: {:?}, score {}, goals {}",
        frames as f32 * SIM_DT,
        world.phase(),
        world.score(),
        world.goals_collected(),
    );
}
