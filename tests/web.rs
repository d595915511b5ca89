// Browser tests: run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use floating_words::layout::TextMeasure;
use floating_words::web::CanvasPainter;
use floating_words::{Camera, Painter};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn painter() -> CanvasPainter {
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    doc.body().unwrap().append_child(&canvas).unwrap();
    CanvasPainter::new(canvas).unwrap()
}

#[wasm_bindgen_test]
fn canvas_measure_grows_with_text_and_font() {
    let p = painter();
    let short = p.text_width("Táo", 20.0);
    let long = p.text_width("Táo Chuối Xoài", 20.0);
    assert!(short > 0.0);
    assert!(long > short);
    assert!(p.text_width("Táo", 40.0) > short);
    assert_eq!(p.extents("Táo", 20.0).height, 20.0);
}

#[wasm_bindgen_test]
fn fit_to_window_matches_css_size() {
    let mut p = painter();
    let win = web_sys::window().unwrap();
    let vp = p.fit_to_window(&win).unwrap();
    assert!(vp.width > 0.0 && vp.height > 0.0);
    assert_eq!(
        p.canvas().width(),
        (vp.width * p.dpr()).floor() as u32
    );
}

#[wasm_bindgen_test]
fn painting_does_not_throw() {
    let mut p = painter();
    p.begin_frame(&Camera {
        x: 10.0,
        y: 5.0,
        zoom: 2.0,
    });
    p.fill_text("Xoài", 50.0, 50.0, 18.0, "hsl(10,80%,60%)");
    p.fill_circle(50.0, 70.0, 3.0, "#ffffff");
}

#[wasm_bindgen_test]
fn ratings_export_is_empty_before_start() {
    assert_eq!(floating_words::ratings_json().unwrap(), "[]");
}
