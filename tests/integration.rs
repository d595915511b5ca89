// Integration tests (native) for the `floating-words` crate.
// These exercise the public API end to end without touching browser APIs,
// so they run under `cargo test` on the host.

use floating_words::layout::{ApproxMeasure, Point};
use floating_words::resources;
use floating_words::{
    Camera, ColorTable, ConfigOverrides, Configuration, FieldError, InputEvent, Outcome, Painter,
    Rating, Viewport, WordField, WordSource,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

struct Sink;

impl Painter for Sink {
    fn begin_frame(&mut self, _camera: &Camera) {}
    fn fill_text(&mut self, _: &str, _: f64, _: f64, _: f64, _: &str) {}
    fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: &str) {}
}

fn session(words: &str, n: f64) -> WordField {
    let o = ConfigOverrides {
        word_count: Some(n),
        x_randomness: Some(0.0),
        y_randomness: Some(0.0),
        ..Default::default()
    };
    WordField::new(
        Configuration::resolve(Some(&o)),
        WordSource::from_body(words),
        ColorTable::parse("táo: hsl(10, 80%, 50%)\nchuối: #ffcc00"),
        Viewport {
            width: 1200.0,
            height: 900.0,
        },
        &ApproxMeasure,
        SmallRng::seed_from_u64(1),
        0.0,
    )
}

fn click(field: &mut WordField, i: usize) -> Outcome {
    let c = field.slots()[i].last_drawn.expect("drawn").center();
    let s = field.camera().world_to_screen(c.x, c.y);
    let button = floating_words::interaction::MouseButton::Primary;
    field.handle_input(InputEvent::MouseDown {
        x: s.x,
        y: s.y,
        button,
    });
    field.handle_input(InputEvent::MouseUp {
        x: s.x,
        y: s.y,
        button,
    })
}

#[test]
fn word_list_cycles_and_capitalizes() {
    let field = session("táo,chuối,xoài", 6.0);
    let texts: Vec<_> = field.slots().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Táo", "Chuối", "Xoài", "Táo", "Chuối", "Xoài"]);
}

#[test]
fn colors_are_matched_case_insensitively() {
    let field = session("táo,chuối,xoài", 3.0);
    assert!(field.slots()[0].color.is_some());
    assert!(field.slots()[1].color.is_some());
    assert!(field.slots()[2].color.is_none());
}

#[test]
fn rating_is_logged_and_clear_keeps_history() {
    let mut field = session("táo,chuối,xoài", 6.0);
    field.frame(&mut Sink, 16.0);

    assert_eq!(click(&mut field, 0), Outcome::Activate(0));
    field.select_rating(3).unwrap();
    field.confirm_rating(1_700_000_000_000.0).unwrap();

    let events = field.store().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].word, "Táo");
    assert_eq!(events[0].rating, Rating::new(3).unwrap());
    assert_eq!(field.slots()[0].rating, Rating::new(3).ok());
    assert_eq!(field.slots()[3].rating, Rating::new(3).ok());

    field.frame(&mut Sink, 32.0);
    assert_eq!(click(&mut field, 0), Outcome::Activate(0));
    field.clear_rating().unwrap();
    assert_eq!(field.slots()[0].rating, None);
    assert_eq!(field.store().events().len(), 1);

    let json = field.ratings_json().unwrap();
    assert!(json.starts_with(r#"[{"word":"Táo","rating":3,"ts":"#), "{json}");
}

#[test]
fn cancel_leaves_prior_rating() {
    let mut field = session("táo", 1.0);
    field.frame(&mut Sink, 0.0);
    click(&mut field, 0);
    field.select_rating(4).unwrap();
    field.confirm_rating(1.0);

    field.frame(&mut Sink, 16.0);
    click(&mut field, 0);
    field.select_rating(1).unwrap();
    field.cancel_prompt();
    assert_eq!(field.slots()[0].rating, Rating::new(4).ok());
    assert_eq!(field.store().events().len(), 1);
}

#[test]
fn word_is_hit_after_zoom_and_pan() {
    let mut field = session("táo,chuối", 4.0);
    field.frame(&mut Sink, 0.0);
    let target = field.slots()[2].last_drawn.unwrap().center();

    // Pinch to 2x about the origin, then pan by (50, 50).
    let pair = |d: f64| vec![Point { x: -d, y: 0.0 }, Point { x: d, y: 0.0 }];
    field.handle_input(InputEvent::TouchStart {
        touches: pair(50.0),
        t: 0.0,
    });
    field.handle_input(InputEvent::TouchMove {
        touches: pair(100.0),
        t: 16.0,
    });
    field.handle_input(InputEvent::TouchEnd {
        touches: vec![],
        t: 32.0,
    });
    assert_eq!(field.camera().zoom, 2.0);
    let button = floating_words::interaction::MouseButton::Secondary;
    field.handle_input(InputEvent::MouseDown {
        x: 0.0,
        y: 0.0,
        button,
    });
    field.handle_input(InputEvent::MouseMove { x: 50.0, y: 50.0 });
    field.handle_input(InputEvent::MouseUp {
        x: 50.0,
        y: 50.0,
        button,
    });
    assert_eq!(field.camera().x, 50.0);

    field.frame(&mut Sink, 0.0);
    let s = field.camera().world_to_screen(target.x, target.y);
    let hit = floating_words::interaction::hit_test(field.camera(), field.slots(), s.x, s.y);
    assert_eq!(hit, Some(2));
}

#[test]
fn unreachable_resources_fall_back_to_defaults() {
    let missing = |url: &str| -> floating_words::FieldResult<String> {
        Err(FieldError::Http {
            url: url.into(),
            status: 404,
        })
    };
    let overrides = resources::overrides_or_default(missing(resources::CONFIG_URL));
    let source = resources::words_or_fallback(missing(resources::WORDS_URL));
    let colors = resources::colors_or_default(missing(resources::COLORS_URL));
    assert!(overrides.is_none());

    let config = Configuration::resolve(overrides.as_ref());
    assert_eq!(config, Configuration::default());

    // The session still comes up on the built-in words and default color.
    let mut field = WordField::new(
        config,
        source,
        colors,
        Viewport {
            width: 1200.0,
            height: 800.0,
        },
        &ApproxMeasure,
        SmallRng::seed_from_u64(3),
        0.0,
    );
    field.frame(&mut Sink, 16.0);
    assert_eq!(field.slots().len(), 100);
    assert_eq!(field.slots()[0].text, "Time");
}

#[test]
fn empty_word_list_uses_builtin_words() {
    let source = WordSource::from_body(" , ,, ");
    assert_eq!(source.words().len(), floating_words::words::FALLBACK_WORDS.len());
    assert_eq!(source.display(0), "Time");
}
