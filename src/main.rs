//! Canvas Shooter entry point
//!
//! Browser: wires DOM input and UI to the simulation and runs the frame loop.
//! Native: plays a headless autopilot run and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use canvas_shooter::Settings;
    use canvas_shooter::renderer::{CommandList, RenderState};
    use canvas_shooter::sim::{GameEvent, GameState, Spawner, auto_fire, frame};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        spawner: Spawner,
        settings: Settings,
        render_state: Option<RenderState>,
        commands: CommandList,
        /// Attract mode: fire automatically
        autopilot: bool,
        /// An animation frame is scheduled
        looping: bool,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64, settings: Settings) -> Self {
            let mut state = GameState::new(width, height, seed);
            settings.apply_to(&mut state);
            Self {
                state,
                spawner: Spawner::default(),
                settings,
                render_state: None,
                commands: CommandList::new(),
                autopilot: false,
                looping: false,
            }
        }

        /// Reset the world and restart the spawn cadence
        fn start(&mut self, now: f64) {
            self.settings.apply_to(&mut self.state);
            self.state.reset();
            self.spawner.start(now);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.clear();
            }
            set_text("bigScoreEl", "0");
            set_modal_visible(false);
        }

        /// Apply edited preferences to the running game and persist them
        fn settings_changed(&mut self) {
            self.settings.apply_to(&mut self.state);
            self.settings.save();
        }

        /// Follow a window resize: CSS pixels for the game, device pixels
        /// for the surface
        fn resize(&mut self, css_w: f32, css_h: f32, width: u32, height: u32) {
            self.state.resize(css_w, css_h);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }

        /// Spawn, simulate and draw one frame
        fn update(&mut self, time: f64) {
            for _ in 0..self.spawner.poll(time) {
                self.state.spawn_enemy();
            }
            if self.autopilot {
                auto_fire(&mut self.state);
            }

            self.commands.clear();
            frame(&mut self.state, &mut self.commands);

            if !self.state.is_running() {
                self.spawner.cancel();
            }
        }

        /// Render the recorded frame
        fn render(&mut self) {
            let size = (self.state.width, self.state.height);
            let segments = self.settings.quality.circle_segments();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.commands.commands(), size, segments) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push pending game events to the DOM
        fn update_ui(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => set_text("scoreEl", &score.to_string()),
                    GameEvent::GameOver { score } => {
                        set_text("bigScoreEl", &score.to_string());
                        set_text("startGameBtn", "Restart Game");
                        set_modal_visible(true);
                    }
                }
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_modal_visible(visible: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("modalEl"))
        {
            let style = if visible { "display: flex" } else { "display: none" };
            let _ = el.set_attribute("style", style);
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| js_err("logger init failed", e))?;

        log::info!("Canvas Shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Canvas fills the window; the simulation works in CSS pixels
        let css_w = window.inner_width()?.as_f64().unwrap_or(800.0);
        let css_h = window.inner_height()?.as_f64().unwrap_or(600.0);
        let dpr = window.device_pixel_ratio();
        let width = (css_w * dpr) as u32;
        let height = (css_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(
            css_w as f32,
            css_h as f32,
            seed,
            settings,
        )));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| js_err("failed to create device", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas.clone(), game.clone());
        setup_start_button(game);

        log::info!("Canvas Shooter ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click - fire toward the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().state.fire_at(target);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    "t" | "T" => {
                        g.settings.trails = !g.settings.trails;
                        log::info!("Trails: {}", g.settings.trails);
                        g.settings_changed();
                    }
                    "m" | "M" => {
                        g.settings.reduced_motion = !g.settings.reduced_motion;
                        log::info!("Reduced motion: {}", g.settings.reduced_motion);
                        g.settings_changed();
                    }
                    "q" | "Q" => {
                        g.settings.quality = g.settings.quality.next();
                        log::info!("Quality: {}", g.settings.quality.as_str());
                        g.settings_changed();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let css_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let css_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            let dpr = window.device_pixel_ratio();
            let width = (css_w * dpr) as u32;
            let height = (css_h * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut()
                .resize(css_w as f32, css_h as f32, width, height);
            log::debug!("Resized to {}x{} ({}x{} px)", css_w, css_h, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("startGameBtn"))
        else {
            log::error!("Start button missing");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let start_loop = {
                let mut g = game.borrow_mut();
                g.start(now());
                g.update_ui();
                let idle = !g.looping;
                g.looping = true;
                idle
            };
            // Never run two frame loops at once
            if start_loop {
                request_animation_frame(game.clone());
            }
            log::info!("Game started");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
        let keep_running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_ui();
            g.looping = g.state.is_running();
            g.looping
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_shooter::Settings;
    use canvas_shooter::renderer::CommandList;
    use canvas_shooter::sim::{GameState, Spawner, auto_fire, frame};

    env_logger::init();

    // canvas-shooter [seed] [frames]
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    log::info!("Canvas Shooter (native) starting...");
    log::info!("Headless autopilot run, seed {} for up to {} frames", seed, max_frames);

    let settings = Settings::load();
    let mut state = GameState::new(800.0, 600.0, seed);
    settings.apply_to(&mut state);
    state.reset();

    let mut spawner = Spawner::default();
    spawner.start(0.0);

    // Simulated 60 Hz display
    let frame_ms = 1000.0 / 60.0;
    let mut commands = CommandList::new();
    let (mut shots, mut kills, mut shrinks) = (0u64, 0u64, 0u64);

    for n in 0..max_frames {
        let now = n as f64 * frame_ms;
        for _ in 0..spawner.poll(now) {
            state.spawn_enemy();
        }
        if auto_fire(&mut state) {
            shots += 1;
        }

        commands.clear();
        let report = frame(&mut state, &mut commands);
        kills += report.kills as u64;
        shrinks += report.shrinks as u64;
        state.drain_events();

        if !state.is_running() {
            spawner.cancel();
            break;
        }
    }

    println!(
        "frames={} score={} shots={} kills={} shrinks={} enemies_left={} phase={:?}",
        state.frame,
        state.score,
        shots,
        kills,
        shrinks,
        state.enemies.len(),
        state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
