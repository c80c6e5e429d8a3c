//! Rail Cat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent};

    use rail_cat::assets::{AssetStore, SpriteMetrics};
    use rail_cat::audio::{AudioManager, SoundEffect};
    use rail_cat::consts::*;
    use rail_cat::render::{CanvasRenderer, build_frame};
    use rail_cat::settings::Settings;
    use rail_cat::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        /// None until every sprite sheet has decoded
        state: Option<GameState>,
        metrics: Option<SpriteMetrics>,
        assets: AssetStore,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        canvas_size: (f32, f32),
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(assets: AssetStore, renderer: CanvasRenderer, canvas_size: (f32, f32)) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: None,
                metrics: None,
                assets,
                renderer,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                canvas_size,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Once the art has decoded, derive the world geometry and start
        fn try_start(&mut self) {
            if self.state.is_some() || !self.assets.all_ready() {
                return;
            }
            let layout = self.assets.layout(self.canvas_size.0, self.canvas_size.1);
            let seed = js_sys::Date::now() as u64;
            self.metrics = Some(self.assets.metrics());
            self.state = Some(GameState::new(seed, layout));
            log::info!("Assets ready, game initialized with seed: {seed}");

            // Hide loading indicator
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(loading) = document.get_element_by_id("loading") {
                    let _ = loading.set_attribute("class", "hidden");
                }
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            if let Some(state) = &mut self.state {
                let dt = dt.min(0.1);
                self.accumulator += dt;

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    let input = self.input;
                    tick(state, &input);
                    self.accumulator -= SIM_DT;
                    substeps += 1;

                    // Clear one-shot inputs after processing
                    self.input.jump = None;
                }

                for event in state.drain_events() {
                    self.audio.play(SoundEffect::for_event(event));
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let (Some(state), Some(metrics)) = (&self.state, &self.metrics) else {
                return;
            };
            let cmds = build_frame(state, metrics, self.settings.reduced_motion);
            if let Err(e) = self.renderer.render(&cmds, &self.assets) {
                log::warn!("Render error: {e:?}");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(state) = &self.state else { return };
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("pigeons-caught") {
                el.set_text_content(Some(&state.pigeons_caught.to_string()));
            }
            if let Some(el) = document.get_element_by_id("eagles-dodged") {
                el.set_text_content(Some(&state.eagles_dodged.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            // Show/hide the restart button with the game-over screen
            if let Some(el) = document.get_element_by_id("game-over") {
                if state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rail Cat starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(ctx, width as f64, height as f64);

        let assets = AssetStore::load()?;
        let game = Rc::new(RefCell::new(Game::new(assets, renderer, (width, height))));

        setup_input_handlers(&canvas, game.clone());
        setup_touch_buttons(game.clone());
        setup_restart_button();
        setup_blur_mute(game.clone());

        request_animation_frame(game);

        log::info!("Rail Cat running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        // Auto-repeat must not re-trigger the jump chain
                        if !event.repeat() {
                            g.input.jump = Some(js_sys::Date::now());
                            g.audio.resume();
                        }
                        event.prevent_default();
                    }
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "ArrowDown" | "s" | "S" => g.input.crouch = true,
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                        log::info!("FPS counter: {}", g.settings.show_fps);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    "ArrowDown" | "s" | "S" => g.input.crouch = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch anywhere on the canvas jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.jump = Some(js_sys::Date::now());
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire an on-screen touch button to a held-flag setter
    fn setup_hold_button(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        set: fn(&mut TickInput, bool),
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                set(&mut game.borrow_mut().input, true);
            });
            let _ = btn
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                set(&mut game.borrow_mut().input, false);
            });
            let _ =
                btn.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        setup_hold_button(&document, "btn-left", game.clone(), |i, v| i.left = v);
        setup_hold_button(&document, "btn-right", game.clone(), |i, v| i.right = v);
        setup_hold_button(&document, "btn-crouch", game.clone(), |i, v| i.crouch = v);

        // Jump is an edge event, stamped like the keyboard path
        if let Some(btn) = document.get_element_by_id("btn-jump") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.jump = Some(js_sys::Date::now());
                g.audio.resume();
            });
            let _ = btn
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // A fresh page load restarts with a new seed
        if let Some(btn) = document.get_element_by_id("btn-restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.try_start();
            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rail Cat (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a short scripted session to exercise the sim
    run_demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo_session() {
    use rail_cat::sim::{GamePhase, GameState, TickInput, WorldLayout, tick};

    let mut state = GameState::new(0xC47, WorldLayout::default());
    for frame in 0u64..3600 {
        // Hop periodically so the demo covers jumps and landings
        let input = TickInput {
            jump: (frame % 90 == 0).then(|| frame as f64 * 1000.0 / 60.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        for event in state.drain_events() {
            log::debug!("frame {frame}: {event:?}");
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    println!(
        "demo session: score {} after {} frames ({} pigeons, {} eagles dodged)",
        state.score, state.time_frames, state.pigeons_caught, state.eagles_dodged
    );
}
