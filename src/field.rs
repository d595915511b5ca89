//! The word field session.
//!
//! [`WordField`] owns everything one page view needs: the resolved
//! configuration, word source and color table, the current layout, camera,
//! rating store, pointer controller and rating prompt. It never touches the
//! browser; the `web` module feeds it input and a [`Painter`].

use rand::rngs::SmallRng;

use crate::camera::Camera;
use crate::color::ColorTable;
use crate::config::{ConfigOverrides, Configuration, Theme};
use crate::error::FieldResult;
use crate::interaction::{InputEvent, InteractionController, Outcome, RatingPrompt};
use crate::layout::{self, Layout, TextMeasure, Viewport, WordSlot};
use crate::ratings::{self, Rating, RatingEvent, RatingStore};
use crate::render::{self, AnimationClock, FrameContext, Painter};
use crate::words::WordSource;

pub struct WordField {
    config: Configuration,
    theme: Theme,
    source: WordSource,
    colors: ColorTable,
    viewport: Viewport,
    layout: Layout,
    camera: Camera,
    store: RatingStore,
    controller: InteractionController,
    prompt: RatingPrompt,
    prompt_default: Option<Rating>,
    clock: AnimationClock,
    rng: SmallRng,
}

impl WordField {
    /// Build the session and its first layout. `now` starts the animation clock.
    pub fn new(
        config: Configuration,
        source: WordSource,
        colors: ColorTable,
        viewport: Viewport,
        measure: &dyn TextMeasure,
        mut rng: SmallRng,
        now: f64,
    ) -> Self {
        let layout = layout::generate(&config, &source, &colors, viewport, measure, &mut rng);
        log::info!(
            "layout: {} words on a {}x{} grid at {}px",
            layout.slots.len(),
            layout.grid.cols,
            layout.grid.rows,
            layout.font_size
        );
        Self {
            config,
            theme: Theme::default(),
            source,
            colors,
            viewport,
            layout,
            camera: Camera::default(),
            store: RatingStore::new(),
            controller: InteractionController::new(),
            prompt: RatingPrompt::new(),
            prompt_default: None,
            clock: AnimationClock::new(now),
            rng,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn slots(&self) -> &[WordSlot] {
        &self.layout.slots
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn prompt(&self) -> &RatingPrompt {
        &self.prompt
    }

    /// Replace the slot array with a freshly sampled one, keeping ratings by text.
    pub fn relayout(&mut self, measure: &dyn TextMeasure) {
        let mut next = layout::generate(
            &self.config,
            &self.source,
            &self.colors,
            self.viewport,
            measure,
            &mut self.rng,
        );
        ratings::carry_over(&self.layout.slots, &mut next.slots);
        log::debug!(
            "relayout: {} words, font {}px",
            next.slots.len(),
            next.font_size
        );
        self.layout = next;
    }

    /// New configuration plus freshly loaded word and color resources, then relayout.
    pub fn apply_settings(
        &mut self,
        overrides: &ConfigOverrides,
        source: WordSource,
        colors: ColorTable,
        measure: &dyn TextMeasure,
    ) {
        self.config = self.config.with_overrides(overrides);
        self.source = source;
        self.colors = colors;
        self.relayout(measure);
    }

    /// Set the base lightness of the current theme.
    pub fn set_base_lightness(&mut self, lightness: f64) {
        if !lightness.is_finite() {
            return;
        }
        let o = match self.theme {
            Theme::Dark => ConfigOverrides {
                lightness_dark: Some(lightness),
                ..Default::default()
            },
            Theme::Light => ConfigOverrides {
                lightness_light: Some(lightness),
                ..Default::default()
            },
        };
        self.config = self.config.with_overrides(&o);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn base_lightness(&self) -> f64 {
        self.config.base_lightness(self.theme)
    }

    /// Viewport change: re-measure and relayout. Degenerate sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport, measure: &dyn TextMeasure) {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return;
        }
        self.viewport = viewport;
        self.relayout(measure);
    }

    /// Draw one frame at timestamp `now` (ms).
    pub fn frame(&mut self, painter: &mut dyn Painter, now: f64) {
        let ctx = FrameContext {
            config: &self.config,
            base_lightness: self.config.base_lightness(self.theme),
            base_font_px: self.layout.font_size,
            elapsed: self.clock.elapsed(now),
            now,
        };
        render::draw_frame(painter, &mut self.layout.slots, &self.camera, &ctx);
    }

    /// Preselection used each time the prompt opens.
    pub fn set_prompt_default(&mut self, rating: Option<Rating>) {
        self.prompt_default = rating;
    }

    /// Route pointer input. Canvas input is dropped while the prompt is open.
    pub fn handle_input(&mut self, event: InputEvent) -> Outcome {
        if self.prompt.is_open() {
            return Outcome::None;
        }
        let outcome = self
            .controller
            .handle(event, &mut self.camera, &self.layout.slots);
        if let Outcome::Activate(i) = outcome {
            if let Some(slot) = self.layout.slots.get(i) {
                self.prompt.open(&slot.text, self.prompt_default);
            }
        }
        outcome
    }

    pub fn select_rating(&mut self, value: u8) -> FieldResult<Rating> {
        let rating = Rating::new(value)?;
        self.prompt.select(rating);
        Ok(rating)
    }

    /// Commit the selection at time `ts` (ms since epoch). `None` when nothing
    /// is selected; the prompt then stays open.
    pub fn confirm_rating(&mut self, ts: f64) -> Option<RatingEvent> {
        let (word, rating) = self.prompt.confirm()?;
        Some(
            self.store
                .submit(&mut self.layout.slots, &word, rating, ts)
                .clone(),
        )
    }

    /// Remove the prompt word's rating and close; returns the cleared word.
    pub fn clear_rating(&mut self) -> Option<String> {
        let word = self.prompt.clear()?;
        self.store.clear(&mut self.layout.slots, &word);
        log::debug!("rating cleared: {word}");
        Some(word)
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt.cancel();
    }

    pub fn ratings_json(&self) -> FieldResult<String> {
        self.store.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ApproxMeasure;
    use rand::SeedableRng;

    struct NullPainter;

    impl Painter for NullPainter {
        fn begin_frame(&mut self, _camera: &Camera) {}
        fn fill_text(&mut self, _: &str, _: f64, _: f64, _: f64, _: &str) {}
        fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: &str) {}
    }

    fn field(words: &str, n: f64) -> WordField {
        let o = ConfigOverrides {
            word_count: Some(n),
            amplitude_x: Some(0.0),
            amplitude_y: Some(0.0),
            x_randomness: Some(0.0),
            y_randomness: Some(0.0),
            ..Default::default()
        };
        WordField::new(
            Configuration::resolve(Some(&o)),
            WordSource::from_body(words),
            ColorTable::default(),
            Viewport {
                width: 1024.0,
                height: 768.0,
            },
            &ApproxMeasure,
            SmallRng::seed_from_u64(7),
            0.0,
        )
    }

    fn tap_slot(f: &mut WordField, i: usize) -> Outcome {
        let c = f.slots()[i].last_drawn.unwrap().center();
        let s = f.camera().world_to_screen(c.x, c.y);
        f.handle_input(InputEvent::TouchStart {
            touches: vec![s],
            t: 0.0,
        });
        f.handle_input(InputEvent::TouchEnd {
            touches: vec![],
            t: 50.0,
        })
    }

    #[test]
    fn tap_rate_and_clear() {
        let mut f = field("táo,chuối,xoài", 3.0);
        f.frame(&mut NullPainter, 16.0);
        assert_eq!(tap_slot(&mut f, 0), Outcome::Activate(0));
        assert_eq!(f.prompt().word(), Some("Táo"));

        // Canvas input is ignored while the prompt is up.
        assert_eq!(tap_slot(&mut f, 1), Outcome::None);

        assert!(f.confirm_rating(1.0).is_none());
        f.select_rating(3).unwrap();
        let ev = f.confirm_rating(42.0).expect("a rating");
        assert_eq!((ev.word.as_str(), ev.rating.get(), ev.ts), ("Táo", 3, 42.0));
        assert_eq!(f.slots()[0].rating.map(Rating::get), Some(3));

        tap_slot(&mut f, 0);
        assert_eq!(f.clear_rating().as_deref(), Some("Táo"));
        assert_eq!(f.slots()[0].rating, None);
        assert_eq!(f.store().events().len(), 1);
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let mut f = field("a", 1.0);
        assert!(f.select_rating(0).is_err());
        assert!(f.select_rating(9).is_err());
    }

    #[test]
    fn prompt_default_preselects() {
        let mut f = field("a", 1.0);
        f.set_prompt_default(Rating::new(4).ok());
        f.frame(&mut NullPainter, 0.0);
        tap_slot(&mut f, 0);
        assert_eq!(f.prompt().selected(), Rating::new(4).ok());
        f.cancel_prompt();
        assert!(!f.prompt().is_open());
        assert!(f.store().events().is_empty());
    }

    #[test]
    fn relayout_carries_ratings_by_text() {
        let mut f = field("táo,chuối", 4.0);
        f.frame(&mut NullPainter, 0.0);
        tap_slot(&mut f, 1);
        f.select_rating(5).unwrap();
        f.confirm_rating(1.0);
        assert_eq!(f.slots()[3].rating.map(Rating::get), Some(5));

        f.resize(
            Viewport {
                width: 800.0,
                height: 600.0,
            },
            &ApproxMeasure,
        );
        let rated: Vec<_> = f
            .slots()
            .iter()
            .map(|s| s.rating.map(Rating::get))
            .collect();
        assert_eq!(rated, vec![None, Some(5), None, Some(5)]);
        assert!(f.slots().iter().all(|s| s.last_drawn.is_none()));
    }

    #[test]
    fn apply_settings_swaps_words_and_keeps_matching_ratings() {
        let mut f = field("táo,chuối", 2.0);
        f.frame(&mut NullPainter, 0.0);
        tap_slot(&mut f, 0);
        f.select_rating(2).unwrap();
        f.confirm_rating(1.0);

        let o = ConfigOverrides {
            word_count: Some(3.0),
            ..Default::default()
        };
        f.apply_settings(
            &o,
            WordSource::from_body("xoài,táo"),
            ColorTable::default(),
            &ApproxMeasure,
        );
        let texts: Vec<_> = f.slots().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["Xoài", "Táo", "Xoài"]);
        assert_eq!(f.slots()[1].rating.map(Rating::get), Some(2));
        assert_eq!(f.config().word_count, 3);
        assert_eq!(f.config().amplitude.x, 0.0);
    }

    #[test]
    fn theme_switches_lightness_target() {
        let mut f = field("a", 1.0);
        assert_eq!(f.base_lightness(), 0.8);
        f.set_base_lightness(0.6);
        assert_eq!(f.config().lightness_dark, 0.6);
        assert_eq!(f.toggle_theme(), Theme::Light);
        assert_eq!(f.base_lightness(), 0.2);
        f.set_base_lightness(0.3);
        assert_eq!(f.config().lightness_light, 0.3);
        assert_eq!(f.config().lightness_dark, 0.6);
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut f = field("a", 1.0);
        let before = f.viewport();
        f.resize(
            Viewport {
                width: 0.0,
                height: 10.0,
            },
            &ApproxMeasure,
        );
        assert_eq!(f.viewport(), before);
        assert!(f.layout().tile.width > 0.0);
    }
}
