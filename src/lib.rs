//! Floating words core crate.
//!
//! An animated field of words drawn on a 2D canvas. Words drift around a
//! jittered grid, glow slowly, and can be tapped or clicked to rate them 1-5;
//! rated words grow, brighten and gain a row of dots. The pure modules below
//! compile and test natively; `web` binds them to the browser and is started
//! from `start_field()`.

use wasm_bindgen::prelude::*;

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod interaction;
pub mod layout;
pub mod ratings;
pub mod render;
pub mod resources;
pub mod web;
pub mod words;

pub use camera::Camera;
pub use color::{ColorSpec, ColorTable};
pub use config::{ConfigOverrides, Configuration, Theme};
pub use error::{FieldError, FieldResult};
pub use field::WordField;
pub use interaction::{InputEvent, InteractionController, Outcome, RatingPrompt};
pub use layout::{Layout, TextMeasure, Viewport, WordSlot};
pub use ratings::{Rating, RatingEvent, RatingStore};
pub use render::Painter;
pub use words::WordSource;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::logger::init(log::LevelFilter::Debug);
}

/// Load resources, attach listeners and start the frame loop.
#[wasm_bindgen]
pub fn start_field() -> Result<(), JsValue> {
    web::start().map(|_| ()).map_err(Into::into)
}

/// The rating event log as a JSON array.
#[wasm_bindgen]
pub fn ratings_json() -> Result<String, JsValue> {
    web::ratings_json().map_err(Into::into)
}
