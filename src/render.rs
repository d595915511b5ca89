//! Per-frame animation and drawing.
//!
//! Position is a closed-form function of elapsed time (simple harmonic motion
//! around the slot's base), so frames can be skipped or the clock restarted
//! without integration state. Color lightness follows a slower glow wave and
//! the slot's rating; rated words are also drawn larger with a row of dots.

use crate::camera::Camera;
use crate::color;
use crate::config::Configuration;
use crate::layout::{Extents, Rect, WordSlot};
use crate::ratings::Rating;

const DOT_RADIUS: f64 = 3.0;
const DOT_SPACING: f64 = 8.0;
const DOT_GAP: f64 = 8.0;

/// Monotonic animation clock; times are in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    start_ms: f64,
}

impl AnimationClock {
    pub fn new(now: f64) -> Self {
        Self { start_ms: now }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_ms
    }
}

/// Drawing surface seam (a 2D canvas context in the browser).
pub trait Painter {
    /// Clear the surface and install the camera transform.
    fn begin_frame(&mut self, camera: &Camera);
    /// Draw `text` centered on `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: &str);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
}

/// Everything needed to draw one slot this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotFrame {
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
    pub color: String,
    pub bounds: Rect,
}

/// 1 when unrated, else interpolated over the configured range.
pub fn size_multiplier(config: &Configuration, rating: Option<Rating>) -> f64 {
    rating.map_or(1.0, |r| config.size_multiplier.at(r.get()))
}

pub fn glow_offset(config: &Configuration, glow_phase: f64, now: f64) -> f64 {
    (config.glow_frequency * now + glow_phase).sin() * config.glow_amplitude
}

/// Base lightness plus glow, clamped to [0, 1], then raised by the rating boost.
pub fn effective_lightness(
    config: &Configuration,
    base: f64,
    glow: f64,
    rating: Option<Rating>,
) -> f64 {
    let l = (base + glow).clamp(0.0, 1.0);
    match rating {
        Some(r) => (l + config.lightness_boost.at(r.get())).min(1.0),
        None => l,
    }
}

pub fn position(config: &Configuration, slot: &WordSlot, elapsed: f64) -> (f64, f64) {
    (
        slot.base.x + config.amplitude.x * (config.frequency.x * elapsed + slot.phase.x).sin(),
        slot.base.y + config.amplitude.y * (config.frequency.y * elapsed + slot.phase.y).sin(),
    )
}

/// Per-frame inputs shared by every slot.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub config: &'a Configuration,
    pub base_lightness: f64,
    pub base_font_px: f64,
    /// Milliseconds since the animation clock started; drives motion.
    pub elapsed: f64,
    /// Absolute frame timestamp in milliseconds; drives the glow.
    pub now: f64,
}

impl FrameContext<'_> {
    /// Frame state for `slot`.
    pub fn slot_frame(&self, slot: &WordSlot) -> SlotFrame {
        let config = self.config;
        let (x, y) = position(config, slot, self.elapsed);
        let glow = glow_offset(config, slot.glow_phase, self.now);
        let lightness = effective_lightness(config, self.base_lightness, glow, slot.rating);
        let scale = size_multiplier(config, slot.rating);
        let extents = Extents {
            width: slot.extents.width * scale,
            height: slot.extents.height * scale,
        };
        SlotFrame {
            x,
            y,
            font_px: self.base_font_px * scale,
            color: color::resolve(slot.color.as_ref(), lightness),
            bounds: Rect::centered(x, y, extents),
        }
    }
}

/// Draw every slot inside the camera transform and record its box for
/// hit-testing on the next input event.
pub fn draw_frame(
    painter: &mut dyn Painter,
    slots: &mut [WordSlot],
    camera: &Camera,
    ctx: &FrameContext<'_>,
) {
    painter.begin_frame(camera);
    for slot in slots.iter_mut() {
        let frame = ctx.slot_frame(slot);
        painter.fill_text(&slot.text, frame.x, frame.y, frame.font_px, &frame.color);
        if let Some(r) = slot.rating {
            draw_rating_dots(painter, &frame, r, ctx.base_font_px);
        }
        slot.last_drawn = Some(frame.bounds);
    }
}

fn draw_rating_dots(painter: &mut dyn Painter, frame: &SlotFrame, rating: Rating, base_font_px: f64) {
    let scale = if base_font_px > 0.0 {
        frame.font_px / base_font_px
    } else {
        1.0
    };
    let radius = DOT_RADIUS * scale;
    let spacing = DOT_SPACING * scale;
    let start_x = frame.bounds.x;
    let cy = frame.bounds.y + frame.bounds.height + DOT_GAP * scale;
    for i in 0..rating.get() {
        painter.fill_circle(start_x + f64::from(i) * spacing, cy, radius, &frame.color);
    }
}
