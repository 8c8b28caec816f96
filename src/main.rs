//! Yule Escape entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
    };

    use yule_escape::consts::*;
    use yule_escape::platform::button_for_key;
    use yule_escape::renderer::{
        AssetProvider, DrawRect, HazardSprite, RenderSink, SpriteTable, render_frame,
    };
    use yule_escape::session::end_text;
    use yule_escape::sim::{Facing, Outcome, SpriteKey};
    use yule_escape::{Page, Session, SessionController, Tuning};

    const GIFT_COLORS: [&str; 4] = ["darkred", "royalblue", "forestgreen", "purple"];

    /// Paints draw calls onto the 2D canvas
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
        sprites: SpriteTable<HtmlImageElement>,
    }

    impl CanvasSink {
        fn draw_sprite(&self, key: &SpriteKey, rect: DrawRect) {
            if let Some(img) = self.sprites.sprite(key) {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
        }

        fn fill(&self, rect: DrawRect, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }
    }

    impl RenderSink for CanvasSink {
        fn clear(&mut self) {
            self.ctx
                .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
        }

        fn draw_player(&mut self, sprite: SpriteKey, rect: DrawRect) {
            self.draw_sprite(&sprite, rect);
        }

        fn draw_platform(&mut self, rect: DrawRect) {
            self.fill(rect, "darkgreen");
        }

        fn draw_hazard(&mut self, rect: DrawRect, sprite: HazardSprite) {
            match sprite {
                HazardSprite::Ghost { sprite, opacity } => {
                    self.ctx.set_global_alpha(opacity as f64);
                    self.draw_sprite(&sprite, rect);
                    self.ctx.set_global_alpha(1.0);
                }
                HazardSprite::Gift { variant, frame } => {
                    self.fill(rect, GIFT_COLORS[variant as usize % GIFT_COLORS.len()]);
                    // Sparkle: a ribbon band that slides down the box
                    let band = rect.size.y / 4.0;
                    let ribbon = DrawRect {
                        pos: rect.pos + glam::Vec2::new(0.0, band * (frame % 4) as f32),
                        size: glam::Vec2::new(rect.size.x, band / 2.0),
                    };
                    self.fill(ribbon, "gold");
                }
                HazardSprite::Sled { facing } => {
                    self.fill(rect, "darkred");
                    // Runner tip on the leading edge
                    let tip = rect.size.x / 8.0;
                    let x = match facing {
                        Facing::Left => rect.pos.x,
                        Facing::Right => rect.pos.x + rect.size.x - tip,
                    };
                    let runner = DrawRect {
                        pos: glam::Vec2::new(x, rect.pos.y + rect.size.y - tip),
                        size: glam::Vec2::new(tip, tip),
                    };
                    self.fill(runner, "silver");
                }
            }
        }
    }

    /// Toggles the page containers and fills in the end screen
    struct DomController {
        document: Document,
    }

    impl SessionController for DomController {
        fn show_page(&mut self, page: Page) {
            for p in [Page::Home, Page::Game, Page::End] {
                if let Some(el) = self.document.get_element_by_id(p.id()) {
                    let class = if p == page { "page" } else { "page hidden" };
                    let _ = el.set_attribute("class", class);
                }
            }
        }

        fn end_game(&mut self, outcome: Outcome) {
            let (title, text) = end_text(outcome);
            if let Some(title) = title {
                if let Some(el) = self.document.get_element_by_id("end-title") {
                    el.set_text_content(Some(title));
                }
            }
            if let Some(el) = self.document.get_element_by_id("end-text") {
                el.set_text_content(Some(&text));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<DomController>,
        sink: CanvasSink,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Yule Escape starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let sprites = SpriteTable::load(|_, path| {
            let img = HtmlImageElement::new()?;
            img.set_src(path);
            Ok::<_, JsValue>(img)
        });

        let seed = js_sys::Date::now() as u64;
        let controller = DomController {
            document: document.clone(),
        };
        let session = match Session::new(Tuning::default(), seed, controller) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to start session: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game {
            session,
            sink: CanvasSink { ctx, sprites },
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(&document, game.clone());

        game.borrow_mut().session.start_game(js_sys::Date::now());

        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(button) = button_for_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().session.press(button);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(button) = button_for_key(&event.key()) {
                    game.borrow_mut().session.release(button);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let seed = js_sys::Date::now() as u64;
                let restarted = game
                    .borrow_mut()
                    .session
                    .restart(seed, js_sys::Date::now());
                match restarted {
                    Ok(()) => log::info!("Game restarted with seed: {}", seed),
                    Err(e) => log::error!("Restart failed: {}", e),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let Game { session, sink } = &mut *g;
            session.tick(js_sys::Date::now());
            if session.page() == Page::Game {
                render_frame(session.state(), sink);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Yule Escape (native) starting...");
    log::info!("Native mode runs a headless scripted session - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => yule_escape::Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => yule_escape::Tuning::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => 1,
    };

    headless::run(tuning, seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use yule_escape::renderer::{DrawCommand, render_frame};
    use yule_escape::session::end_text;
    use yule_escape::sim::{Button, Outcome};
    use yule_escape::{GameError, Page, Session, SessionController, Tuning};

    struct LogController;

    impl SessionController for LogController {
        fn show_page(&mut self, page: Page) {
            log::debug!("Page: {}", page.id());
        }

        fn end_game(&mut self, outcome: Outcome) {
            let (title, text) = end_text(outcome);
            log::info!("{} {}", title.unwrap_or("Game over."), text);
        }
    }

    /// Zig-zag between the walls, hopping every second
    fn script(session: &mut Session<LogController>, frame: u64) {
        let leg = (frame / 180) % 2;
        if frame % 180 == 0 {
            let (hold, other) = if leg == 0 {
                (Button::Right, Button::Left)
            } else {
                (Button::Left, Button::Right)
            };
            session.release(other);
            session.press(hold);
        }
        match frame % 60 {
            0 => session.press(Button::Jump),
            10 => session.release(Button::Jump),
            _ => {}
        }
    }

    pub fn run(tuning: Tuning, seed: u64) -> Result<(), GameError> {
        let frame_ms = tuning.frame_ms();
        let total_ms: u64 = tuning.phase_durations.iter().sum();
        let max_frames = (total_ms as f64 / frame_ms) as u64 + 60;

        let mut session = Session::new(tuning, seed, LogController)?;
        let mut frame_buf: Vec<DrawCommand> = Vec::new();
        session.start_game(0.0);

        for frame in 0..max_frames {
            script(&mut session, frame);
            let now = frame as f64 * frame_ms;
            if let Some(outcome) = session.tick(now) {
                log::info!("Session ended after {:.1}s: {:?}", now / 1000.0, outcome);
                return Ok(());
            }
            render_frame(session.state(), &mut frame_buf);
        }
        log::info!(
            "Stopped after {} frames ({} draw calls in the last one)",
            max_frames,
            frame_buf.len()
        );
        Ok(())
    }
}
