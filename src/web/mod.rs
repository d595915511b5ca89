//! Browser shell: canvas, resources, listeners and the frame loop.
//!
//! The session lives in a thread-local so `requestAnimationFrame` and DOM
//! callbacks can reach it; every access goes through [`with_app`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::config::Configuration;
use crate::error::{FieldError, FieldResult};
use crate::field::WordField;

mod canvas;
mod dom;
mod events;
mod fetch;
pub mod logger;

pub use canvas::CanvasPainter;
pub use fetch::fetch_text;

pub(crate) struct App {
    pub field: WordField,
    pub painter: CanvasPainter,
    pub doc: Document,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    // Set on the first `start`; the session is installed asynchronously later.
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` on the live session; `None` before startup has finished.
pub(crate) fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window() -> FieldResult<Window> {
    web_sys::window().ok_or_else(|| FieldError::Js("no window".into()))
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Find the canvas, then load resources and start drawing. Resource failures
/// fall back to defaults; only a missing page skeleton is an error. Returns
/// `false` without doing anything when a session was already started.
pub fn start() -> FieldResult<bool> {
    if STARTED.with(Cell::get) {
        log::warn!("start_field called again; ignoring");
        return Ok(false);
    }
    let win = window()?;
    let doc = win
        .document()
        .ok_or_else(|| FieldError::Js("no document".into()))?;
    let canvas: HtmlCanvasElement = dom::by_id(&doc, dom::CANVAS_ID)?
        .dyn_into()
        .map_err(|_| FieldError::Js(format!("#{} is not a canvas", dom::CANVAS_ID)))?;
    let mut painter = CanvasPainter::new(canvas.clone())?;
    STARTED.with(|s| s.set(true));

    spawn_local(async move {
        let overrides = fetch::load_overrides().await;
        let source = fetch::load_words().await;
        let colors = fetch::load_colors().await;
        let config = Configuration::resolve(overrides.as_ref());

        let viewport = match painter.fit_to_window(&win) {
            Ok(v) => v,
            Err(e) => {
                log::error!("canvas setup failed: {e}");
                return;
            }
        };
        let mut field = WordField::new(
            config,
            source,
            colors,
            viewport,
            &painter,
            SmallRng::from_entropy(),
            performance_now(),
        );
        field.set_prompt_default(dom::default_rating(&doc));
        let starts_light = doc
            .body()
            .is_some_and(|b| b.class_list().contains("light"));
        if starts_light {
            field.toggle_theme();
        }
        dom::sync_panel(&doc, field.config(), field.base_lightness());
        if let Err(e) = dom::set_background_vars(&doc, field.config()) {
            log::warn!("{e}");
        }

        APP.with(|cell| {
            *cell.borrow_mut() = Some(App {
                field,
                painter,
                doc: doc.clone(),
            })
        });
        if let Err(e) = events::attach(&win, &doc, &canvas) {
            log::error!("listener setup failed: {e}");
        }
        start_frame_loop();
    });
    Ok(true)
}

/// Re-fit the canvas to the window and relayout.
pub(crate) fn refit() {
    let Ok(win) = window() else { return };
    with_app(|app| match app.painter.fit_to_window(&win) {
        Ok(viewport) => app.field.resize(viewport, &app.painter),
        Err(e) => log::warn!("resize failed: {e}"),
    });
}

/// Apply the settings panel: new configuration, fresh word and color
/// resources, relayout. Frames keep drawing the old layout meanwhile.
pub(crate) fn reload_settings() {
    let Some((overrides, lightness)) = with_app(|app| {
        (
            dom::read_panel(&app.doc),
            dom::input_number(&app.doc, dom::LIGHTNESS_SLIDER_ID),
        )
    }) else {
        return;
    };
    spawn_local(async move {
        let source = fetch::load_words().await;
        let colors = fetch::load_colors().await;
        with_app(|app| {
            if let Some(l) = lightness {
                app.field.set_base_lightness(l);
            }
            app.field
                .apply_settings(&overrides, source, colors, &app.painter);
            dom::sync_panel(&app.doc, app.field.config(), app.field.base_lightness());
            log::info!("settings applied");
        });
    });
}

/// Rating log as JSON; `[]` until startup has finished.
pub fn ratings_json() -> FieldResult<String> {
    with_app(|app| app.field.ratings_json()).unwrap_or_else(|| Ok("[]".to_string()))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web_sys::window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| app.field.frame(&mut app.painter, ts));
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
