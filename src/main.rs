//! Avoidance Snake entry point
//!
//! Handles platform-specific initialization and wires the browser page to the
//! tick engine and the evasive button.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Event, HtmlCanvasElement, HtmlElement, HtmlSelectElement, KeyboardEvent,
        MouseEvent,
    };

    use avoidance_snake::evasion::{ClickOutcome, EvasiveTarget, Pose};
    use avoidance_snake::input::{self, InputEvent, TOUCH_CONTROL_IDS};
    use avoidance_snake::renderer::CanvasRenderer;
    use avoidance_snake::sim::{GameEvent, GameSession, SessionState};
    use avoidance_snake::{Capabilities, Settings, SpeedPreset, TickEngine, TimerHandle};

    /// Game instance holding all state
    struct Game {
        engine: TickEngine<CanvasRenderer>,
        caps: Capabilities,
        settings: Settings,
        /// Browser interval id backing the engine's timer
        interval_id: Option<i32>,
        tick_closure: Option<Closure<dyn FnMut()>>,
        /// Attached only while a run exists
        keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    }

    impl Game {
        fn new(engine: TickEngine<CanvasRenderer>, caps: Capabilities, settings: Settings) -> Self {
            Self {
                engine,
                caps,
                settings,
                interval_id: None,
                tick_closure: None,
                keydown: None,
            }
        }

        /// Clear the browser interval; safe to call when none is set
        fn clear_interval(&mut self) {
            if let Some(id) = self.interval_id.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                }
            }
            self.tick_closure = None;
        }

        /// Remove the keyboard listener; safe to call when detached
        fn detach_keyboard(&mut self) {
            if let Some(closure) = self.keydown.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "keydown",
                        closure.as_ref().unchecked_ref(),
                    );
                }
            }
        }

        fn report(&self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::AppleEaten { score } => log::debug!("Apple eaten, score {}", score),
                    GameEvent::GameOver(reason) => log::info!(
                        "Game over ({:?}), final score {}",
                        reason,
                        self.engine.session().score()
                    ),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.engine.session();

            set_text(&document, "snake-score", &session.score().to_string());
            set_text(
                &document,
                "snake-speed",
                &format!("{}/10", session.speed_display()),
            );

            let overlay = match session.state() {
                SessionState::Idle => "",
                SessionState::Running => "",
                SessionState::Paused => "PAUSED",
                SessionState::Over if session.board_full() => "Board full. Nothing left to avoid.",
                SessionState::Over => "Game Over",
            };
            set_text(&document, "snake-overlay", overlay);

            set_visible(&document, "snake-menu-panel", session.state() == SessionState::Idle);
            set_visible(&document, "snake-over-panel", session.state() == SessionState::Over);
            set_visible(
                &document,
                "touch-controls",
                input::show_touch_controls(&self.caps, session.state()),
            );
            set_visible(&document, "keyboard-legend", input::show_keyboard_legend(&self.caps));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Avoidance Snake starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to attach to");
            return;
        };

        let settings = Settings::load();
        let caps = Capabilities::detect();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let Some(canvas) = document
            .get_element_by_id("snake-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #snake-canvas element");
            return;
        };
        let Some(renderer) = CanvasRenderer::new(canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };
        renderer.clear();

        let session = GameSession::new(settings.grid_size(), settings.tick_interval_ms(), seed);
        let engine = TickEngine::new(session, renderer);
        let game = Rc::new(RefCell::new(Game::new(engine, caps, settings)));
        log::info!(
            "Game initialized with seed: {}",
            game.borrow().engine.session().seed()
        );

        setup_command_buttons(&document, &game);
        setup_speed_select(&document, &game);
        setup_touch_controls(&document, &game);
        setup_evasive_button(&document, seed.wrapping_add(1));

        game.borrow().update_hud();
        log::info!("Avoidance Snake running!");
    }

    /// Schedule the engine's timer, replacing any previous interval
    fn schedule(game: &Rc<RefCell<Game>>, handle: TimerHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak: Weak<RefCell<Game>> = Rc::downgrade(game);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = weak.upgrade() {
                let mut g = game.borrow_mut();
                let events = g.engine.on_timer(handle);
                g.report(&events);
                g.update_hud();
            }
        });

        let mut g = game.borrow_mut();
        g.clear_interval();
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            handle.interval_ms as i32,
        ) {
            Ok(id) => {
                g.interval_id = Some(id);
                g.tick_closure = Some(closure);
            }
            Err(e) => log::warn!("setInterval failed: {:?}", e),
        }
    }

    /// Attach the keyboard listener for the current run
    fn attach_keyboard(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = Rc::downgrade(game);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            // Arrow keys and space would scroll the page
            if input::is_scroll_key(&key) {
                event.prevent_default();
            }
            if let (Some(input), Some(game)) = (InputEvent::from_key(&key), weak.upgrade()) {
                let mut g = game.borrow_mut();
                g.engine.handle_input(input);
                g.update_hud();
            }
        });

        let mut g = game.borrow_mut();
        g.detach_keyboard();
        if window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            g.keydown = Some(closure);
        } else {
            log::warn!("Failed to attach keyboard listener");
        }
    }

    /// Start/retry (arm timer + listeners) or back to menu (tear both down)
    fn run_command(game: &Rc<RefCell<Game>>, command: &str) {
        let armed = {
            let mut g = game.borrow_mut();
            match command {
                "snake-start" => g.engine.start(),
                "snake-retry" => g.engine.retry(),
                "snake-pause" => {
                    g.engine.toggle_pause();
                    None
                }
                "snake-menu" => {
                    if let Some(handle) = g.engine.return_to_menu() {
                        log::debug!("Cancelling timer {}", handle.id);
                    }
                    g.clear_interval();
                    g.detach_keyboard();
                    g.engine.renderer().clear();
                    None
                }
                _ => None,
            }
        };

        if let Some(handle) = armed {
            schedule(game, handle);
            attach_keyboard(game);
        }
        game.borrow().update_hud();
    }

    fn setup_command_buttons(document: &Document, game: &Rc<RefCell<Game>>) {
        for id in ["snake-start", "snake-retry", "snake-pause", "snake-menu"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                run_command(&game, id);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Speed picker on the menu; the choice is saved and used by the next run
    fn setup_speed_select(document: &Document, game: &Rc<RefCell<Game>>) {
        let Some(select) = document
            .get_element_by_id("snake-speed-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            log::warn!("Missing #snake-speed-select");
            return;
        };
        select.set_value(game.borrow().settings.speed.as_str());

        let weak = Rc::downgrade(game);
        let picker = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let Some(game) = weak.upgrade() else {
                return;
            };
            let mut g = game.borrow_mut();
            let Some(preset) = SpeedPreset::from_str(&picker.value()) else {
                log::warn!("Unknown speed {:?}", picker.value());
                return;
            };
            if g.engine.set_speed(preset.interval_ms()) {
                g.settings.speed = preset;
                g.settings.save();
            } else {
                picker.set_value(g.settings.speed.as_str());
            }
            g.update_hud();
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch_controls(document: &Document, game: &Rc<RefCell<Game>>) {
        for id in TOUCH_CONTROL_IDS {
            let (Some(btn), Some(input)) =
                (document.get_element_by_id(id), InputEvent::from_touch_control(id))
            else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.engine.handle_input(input);
                g.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn apply_pose(button: &HtmlElement, pose: &Pose) {
        let style = button.style();
        let _ = style.set_property("transform", &pose.css_transform());
        let _ = style.set_property("background-color", pose.affordance.background());
        button.set_text_content(Some(pose.label));
    }

    fn setup_evasive_button(document: &Document, seed: u64) {
        let Some(button) = document
            .get_element_by_id("unclickable")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("Missing #unclickable button");
            return;
        };
        let target = Rc::new(RefCell::new(EvasiveTarget::new(seed)));
        apply_pose(&button, target.borrow().pose());

        // Pointer move: dodge away from the pointer
        {
            let target = target.clone();
            let btn = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = btn.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let mut t = target.borrow_mut();
                let pose = *t.on_pointer_move(pointer, center);
                apply_pose(&btn, &pose);
            });
            let _ = button
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: jump, or give up and arm the one-shot revert timer
        {
            let btn = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let now = js_sys::Date::now();
                let outcome = target.borrow_mut().on_click(now);
                apply_pose(&btn, target.borrow().pose());

                if let ClickOutcome::Surrendered { revert_at_ms } = outcome {
                    let target = target.clone();
                    let btn = btn.clone();
                    let revert = Closure::once_into_js(move || {
                        let mut t = target.borrow_mut();
                        if t.poll(revert_at_ms) {
                            apply_pose(&btn, t.pose());
                        }
                    });
                    let delay = (revert_at_ms - now).max(0.0) as i32;
                    let armed = web_sys::window().map(|w| {
                        w.set_timeout_with_callback_and_timeout_and_arguments_0(
                            revert.unchecked_ref(),
                            delay,
                        )
                    });
                    if !matches!(armed, Some(Ok(_))) {
                        log::warn!("Failed to arm revert timer");
                    }
                }
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Avoidance Snake (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 for the web version");

    demo::run_snake();
    demo::run_button();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a greedy autopilot plays one seeded run
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use avoidance_snake::evasion::{ClickOutcome, EvasiveTarget};
    use avoidance_snake::renderer::TextRenderer;
    use avoidance_snake::sim::{Direction, GameEvent, GameSession, SessionState};
    use avoidance_snake::{Capabilities, InputEvent, Settings, TickEngine};

    /// Stop the demo after this many ticks even if the autopilot survives
    const MAX_DEMO_TICKS: u32 = 5000;

    pub fn run_snake() {
        let settings = Settings::load();
        let caps = Capabilities::detect();
        let seed = settings.seed.unwrap_or(0x5EED);
        log::info!(
            "Speed {} ({} ms), compact input: {}",
            settings.speed.as_str(),
            settings.tick_interval_ms(),
            caps.compact_input_mode
        );

        let session = GameSession::new(settings.grid_size(), settings.tick_interval_ms(), seed);
        let mut engine = TickEngine::new(session, TextRenderer::new());
        log::info!("Session seed {}", engine.session().seed());
        let Some(timer) = engine.start() else {
            log::error!("Session refused to start");
            return;
        };

        for _ in 0..MAX_DEMO_TICKS {
            if let Some(input) = autopilot(engine.session()) {
                engine.handle_input(input);
            }
            for event in engine.on_timer(timer) {
                match event {
                    GameEvent::AppleEaten { score } => log::debug!("Apple! score {}", score),
                    GameEvent::GameOver(reason) => log::info!("Autopilot crashed: {:?}", reason),
                }
            }
            if engine.session().state() != SessionState::Running {
                break;
            }
        }

        let session = engine.session();
        println!("{}", engine.renderer().frame());
        println!(
            "Final score: {} after {} ticks (speed {}/10)",
            session.score(),
            session.time_ticks(),
            session.speed_display()
        );
        engine.return_to_menu();
    }

    /// Head toward the apple, avoiding walls, the body and reversals
    fn autopilot(session: &GameSession) -> Option<InputEvent> {
        let snake = session.snake()?;
        let apple = session.apple()?;
        let head = snake.head();
        let current = session.velocity();

        let mut options: Vec<(i32, InputEvent)> = [
            (Direction::Up, InputEvent::Up),
            (Direction::Down, InputEvent::Down),
            (Direction::Left, InputEvent::Left),
            (Direction::Right, InputEvent::Right),
        ]
        .into_iter()
        .filter_map(|(dir, input)| {
            let vel = dir.velocity();
            let next = head.offset(vel);
            let safe = !vel.is_reverse_of(current)
                && session.grid().contains(next)
                && !snake.would_collide(next);
            safe.then(|| ((next.x - apple.x).abs() + (next.y - apple.y).abs(), input))
        })
        .collect();

        options.sort_by_key(|(distance, _)| *distance);
        options.first().map(|(_, input)| *input)
    }

    pub fn run_button() {
        let mut target = EvasiveTarget::new(7);
        let center = Vec2::new(200.0, 100.0);
        for pointer in [Vec2::new(260.0, 100.0), Vec2::new(200.0, 40.0), Vec2::new(140.0, 160.0)] {
            let pose = target.on_pointer_move(pointer, center);
            println!("Pointer at {:?}: \"{}\" ({})", pointer, pose.label, pose.css_transform());
        }

        let mut now = 0.0;
        loop {
            match target.on_click(now) {
                ClickOutcome::Dodged => println!("Click: \"{}\"", target.pose().label),
                ClickOutcome::Surrendered { revert_at_ms } => {
                    println!("Click: \"{}\"", target.pose().label);
                    now = revert_at_ms;
                    break;
                }
                ClickOutcome::Ignored => break,
            }
            now += 250.0;
        }

        target.poll(now);
        println!("Later: \"{}\" ({:?})", target.pose().label, target.state());
    }
}
