//! Layout generator: word slots on a jittered grid.
//!
//! The viewport (minus [`MARGIN`]) is split into `cols × rows` tiles; slot `i`
//! sits at the center of tile `(i mod cols, i div cols)` plus a random offset
//! bounded by the jitter fraction of the tile's half-extent. Every call samples
//! fresh randomness; ratings are not carried here (see `ratings::carry_over`).

use std::f64::consts::TAU;

use rand::Rng;

use crate::color::{ColorSpec, ColorTable};
use crate::config::{Axes, Configuration};
use crate::ratings::Rating;
use crate::words::WordSource;

/// Gap kept between the tiled area and the viewport edge, in px.
pub const MARGIN: f64 = 18.0;

/// Size used when measuring candidate words for automatic font sizing.
const TRIAL_FONT_PX: f64 = 100.0;
/// Fraction of the effective tile the longest word may occupy.
const FIT_WIDTH: f64 = 0.8;
const FIT_HEIGHT: f64 = 0.6;

pub fn font_css(px: f64) -> String {
    format!("{px}px system-ui,Segoe UI,Roboto,Arial")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extents {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(cx: f64, cy: f64, extents: Extents) -> Self {
        Self {
            x: cx - extents.width / 2.0,
            y: cy - extents.height / 2.0,
            width: extents.width,
            height: extents.height,
        }
    }

    /// Inclusive on all edges.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Coarse device bucket driving the grid shape and the font clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Compact,
    Regular,
}

impl DeviceClass {
    pub fn of(viewport: Viewport) -> Self {
        if viewport.width < 600.0 {
            DeviceClass::Compact
        } else {
            DeviceClass::Regular
        }
    }

    /// Allowed `[min, max]` base font size in px.
    pub fn font_range(self) -> (f64, f64) {
        match self {
            DeviceClass::Compact => (10.0, 20.0),
            DeviceClass::Regular => (12.0, 28.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    /// Near-square grid holding `n` cells.
    pub fn square(n: usize) -> Self {
        let cols = ((n.max(1) as f64).sqrt().ceil() as usize).max(1);
        Self {
            cols,
            rows: n.max(1).div_ceil(cols),
        }
    }

    /// Square grid, or a tall narrow grid for compact portrait viewports.
    pub fn for_viewport(n: usize, viewport: Viewport) -> Self {
        let square = Self::square(n);
        if DeviceClass::of(viewport) == DeviceClass::Compact && viewport.height > viewport.width {
            let cols = square.cols.div_ceil(2).max(1);
            Self {
                cols,
                rows: n.max(1).div_ceil(cols),
            }
        } else {
            square
        }
    }
}

/// Text measurement seam (canvas `measureText` in the browser).
pub trait TextMeasure {
    /// Advance width of `text` rendered at `font_px`.
    fn text_width(&self, text: &str, font_px: f64) -> f64;

    fn extents(&self, text: &str, font_px: f64) -> Extents {
        Extents {
            width: self.text_width(text, font_px),
            height: font_px,
        }
    }
}

/// Character-count estimate, used where no canvas is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn text_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * 0.55
    }
}

/// One animated word instance.
#[derive(Clone, Debug, PartialEq)]
pub struct WordSlot {
    pub text: String,
    pub base: Point,
    pub phase: Point,
    pub glow_phase: f64,
    pub color: Option<ColorSpec>,
    /// Measured at the base font size.
    pub extents: Extents,
    /// World-space box from the latest draw; `None` until first drawn.
    pub last_drawn: Option<Rect>,
    pub rating: Option<Rating>,
}

impl WordSlot {
    pub fn remeasure(&mut self, measure: &dyn TextMeasure, font_px: f64) {
        self.extents = measure.extents(&self.text, font_px);
    }
}

#[derive(Clone, Debug)]
pub struct Layout {
    pub slots: Vec<WordSlot>,
    pub grid: Grid,
    pub tile: Extents,
    pub font_size: f64,
}

/// Center of tile `(col, row)`.
pub fn tile_center(col: usize, row: usize, tile: Extents) -> Point {
    Point {
        x: MARGIN + (col as f64 + 0.5) * tile.width,
        y: MARGIN + (row as f64 + 0.5) * tile.height,
    }
}

fn clamp_to_viewport(v: f64, dim: f64) -> f64 {
    let hi = (dim - MARGIN).max(MARGIN);
    v.clamp(MARGIN, hi)
}

/// Largest font at which the widest candidate fits the jitter-shrunk tile,
/// clamped to the device range.
pub fn auto_font_size(
    candidates: &[String],
    tile: Extents,
    jitter: Axes,
    class: DeviceClass,
    measure: &dyn TextMeasure,
) -> f64 {
    let (lo, hi) = class.font_range();
    let widest = candidates
        .iter()
        .map(|w| measure.text_width(w, TRIAL_FONT_PX))
        .fold(0.0_f64, f64::max);
    let eff_w = tile.width / (1.0 + jitter.x);
    let eff_h = tile.height / (1.0 + jitter.y);
    let by_width = if widest > 0.0 {
        FIT_WIDTH * eff_w / widest * TRIAL_FONT_PX
    } else {
        hi
    };
    let by_height = FIT_HEIGHT * eff_h;
    by_width.min(by_height).clamp(lo, hi).round()
}

/// Build `config.word_count` slots covering `viewport`.
pub fn generate<R: Rng + ?Sized>(
    config: &Configuration,
    source: &WordSource,
    colors: &ColorTable,
    viewport: Viewport,
    measure: &dyn TextMeasure,
    rng: &mut R,
) -> Layout {
    let n = config.word_count;
    let grid = Grid::for_viewport(n, viewport);
    let tile = Extents {
        width: (viewport.width - MARGIN * 2.0).max(0.0) / grid.cols as f64,
        height: (viewport.height - MARGIN * 2.0).max(0.0) / grid.rows as f64,
    };
    let texts = source.take(n);
    let font_size = config.font_size.unwrap_or_else(|| {
        auto_font_size(
            &texts,
            tile,
            config.jitter,
            DeviceClass::of(viewport),
            measure,
        )
    });

    let max_dx = tile.width / 2.0 * config.jitter.x;
    let max_dy = tile.height / 2.0 * config.jitter.y;
    let slots = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let center = tile_center(i % grid.cols, i / grid.cols, tile);
            let dx = offset(rng, max_dx);
            let dy = offset(rng, max_dy);
            let base = Point {
                x: clamp_to_viewport(center.x + dx, viewport.width),
                y: clamp_to_viewport(center.y + dy, viewport.height),
            };
            let phase = Point {
                x: rng.gen_range(0.0..TAU),
                y: rng.gen_range(0.0..TAU),
            };
            let glow_phase = rng.gen_range(0.0..TAU);
            let extents = measure.extents(&text, font_size);
            WordSlot {
                color: colors.get(&text).cloned(),
                text,
                base,
                phase,
                glow_phase,
                extents,
                last_drawn: None,
                rating: None,
            }
        })
        .collect();

    Layout {
        slots,
        grid,
        tile,
        font_size,
    }
}

fn offset<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max > 0.0 {
        rng.gen_range(-max..=max)
    } else {
        0.0
    }
}
