//! 2D canvas backend for [`Painter`] and [`TextMeasure`].

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::camera::Camera;
use crate::error::{FieldError, FieldResult};
use crate::layout::{self, ApproxMeasure, TextMeasure, Viewport};
use crate::render::Painter;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> FieldResult<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| FieldError::Js("2d context unavailable".into()))?
            .dyn_into()
            .map_err(|_| FieldError::Js("context is not 2d".into()))?;
        Ok(Self {
            canvas,
            ctx,
            dpr: 1.0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Size the backing store to the window at device pixel ratio and return
    /// the viewport in CSS pixels.
    pub fn fit_to_window(&mut self, win: &Window) -> FieldResult<Viewport> {
        self.dpr = win.device_pixel_ratio().max(1.0);
        let width = win.inner_width()?.as_f64().unwrap_or(0.0);
        let height = win.inner_height()?.as_f64().unwrap_or(0.0);
        self.canvas.set_width((width * self.dpr).floor() as u32);
        self.canvas.set_height((height * self.dpr).floor() as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;
        Ok(Viewport { width, height })
    }
}

impl Painter for CanvasPainter {
    fn begin_frame(&mut self, camera: &Camera) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        let [a, b, c, d, e, f] = camera.transform(self.dpr);
        let _ = self.ctx.set_transform(a, b, c, d, e, f);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: &str) {
        self.ctx.set_font(&layout::font_css(font_px));
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

impl TextMeasure for CanvasPainter {
    fn text_width(&self, text: &str, font_px: f64) -> f64 {
        self.ctx.set_font(&layout::font_css(font_px));
        match self.ctx.measure_text(text) {
            Ok(m) => m.width(),
            Err(_) => ApproxMeasure.text_width(text, font_px),
        }
    }
}
