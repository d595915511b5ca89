//! DOM listeners. Each handler translates the browser event and forwards it
//! to the session under [`with_app`].

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList, WheelEvent, Window,
};

use super::{dom, refit, reload_settings, with_app};
use crate::error::FieldResult;
use crate::interaction::{InputEvent, MouseButton, Outcome};
use crate::layout::Point;

fn listen<E, F>(
    target: &EventTarget,
    kind: &str,
    passive: Option<bool>,
    mut handler: F,
) -> FieldResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |evt: Event| {
        if let Ok(e) = evt.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    match passive {
        Some(passive) => {
            let opts = AddEventListenerOptions::new();
            opts.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )?;
        }
        None => {
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        }
    }
    closure.forget();
    Ok(())
}

fn report(result: FieldResult<()>) {
    if let Err(e) = result {
        log::warn!("{e}");
    }
}

/// Feed one pointer event to the session and reflect the outcome in the page.
fn dispatch(event: InputEvent) {
    with_app(|app| match app.field.handle_input(event) {
        Outcome::Activate(_) => {
            let prompt = app.field.prompt();
            if let Some(word) = prompt.word() {
                report(dom::show_prompt(&app.doc, word, prompt.selected()));
            }
            dom::set_cursor(app.painter.canvas(), false);
        }
        Outcome::Hover(over) => dom::set_cursor(app.painter.canvas(), over),
        Outcome::CameraMoved | Outcome::None => {}
    });
}

fn touch_points(canvas: &HtmlCanvasElement, list: &TouchList) -> Vec<Point> {
    let rect = canvas.get_bounding_client_rect();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point {
            x: f64::from(t.client_x()) - rect.left(),
            y: f64::from(t.client_y()) - rect.top(),
        })
        .collect()
}

fn mouse_at(evt: &MouseEvent) -> (f64, f64) {
    (f64::from(evt.offset_x()), f64::from(evt.offset_y()))
}

fn close_prompt(doc: &Document) {
    report(dom::hide_prompt(doc));
}

fn attach_canvas(canvas: &HtmlCanvasElement) -> FieldResult<()> {
    listen(canvas, "mousedown", None, |evt: MouseEvent| {
        let (x, y) = mouse_at(&evt);
        dispatch(InputEvent::MouseDown {
            x,
            y,
            button: MouseButton::from_dom(evt.button()),
        });
    })?;
    listen(canvas, "mousemove", None, |evt: MouseEvent| {
        let (x, y) = mouse_at(&evt);
        dispatch(InputEvent::MouseMove { x, y });
    })?;
    listen(canvas, "mouseup", None, |evt: MouseEvent| {
        let (x, y) = mouse_at(&evt);
        dispatch(InputEvent::MouseUp {
            x,
            y,
            button: MouseButton::from_dom(evt.button()),
        });
    })?;
    listen(canvas, "mouseleave", None, |_: MouseEvent| {
        dispatch(InputEvent::MouseLeave);
    })?;
    // Right-drag pans instead of opening the menu.
    listen(canvas, "contextmenu", None, |evt: MouseEvent| {
        evt.prevent_default();
    })?;
    listen(canvas, "wheel", Some(false), |evt: WheelEvent| {
        evt.prevent_default();
        let (x, y) = mouse_at(&evt);
        dispatch(InputEvent::Wheel {
            x,
            y,
            delta_y: evt.delta_y(),
        });
    })?;

    // Touch handlers cancel the default action, which also stops the
    // browser from synthesizing mouse events for the same gesture.
    for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
        let target = canvas.clone();
        listen(canvas, kind, Some(false), move |evt: TouchEvent| {
            evt.prevent_default();
            let touches = touch_points(&target, &evt.touches());
            let t = evt.time_stamp();
            dispatch(match evt.type_().as_str() {
                "touchstart" => InputEvent::TouchStart { touches, t },
                "touchmove" => InputEvent::TouchMove { touches, t },
                "touchend" => InputEvent::TouchEnd { touches, t },
                _ => InputEvent::TouchCancel,
            });
        })?;
    }
    Ok(())
}

fn attach_prompt(doc: &Document) -> FieldResult<()> {
    let form = dom::by_id(doc, dom::RATING_FORM_ID)?;

    // Rating buttons only select; the form submit commits.
    listen(&form, "click", None, |evt: MouseEvent| {
        let Some(btn) = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".rating-btn").ok().flatten())
        else {
            return;
        };
        let Some(rating) = dom::rating_of(&btn) else {
            return;
        };
        evt.prevent_default();
        with_app(|app| {
            if app.field.select_rating(rating.get()).is_ok() {
                report(dom::mark_selected(&app.doc, Some(rating)));
            }
        });
    })?;

    listen(&form, "submit", None, |evt: Event| {
        evt.prevent_default();
        with_app(|app| {
            if let Some(ev) = app.field.confirm_rating(js_sys::Date::now()) {
                log::info!("rating saved: {} = {}", ev.word, ev.rating.get());
                close_prompt(&app.doc);
            }
        });
    })?;

    if let Some(clear) = doc.get_element_by_id(dom::CLEAR_ID) {
        listen(&clear, "click", None, |evt: MouseEvent| {
            evt.prevent_default();
            with_app(|app| {
                if app.field.clear_rating().is_some() {
                    close_prompt(&app.doc);
                }
            });
        })?;
    }

    let cancel = dom::by_id(doc, dom::CANCEL_ID)?;
    listen(&cancel, "click", None, |evt: MouseEvent| {
        evt.prevent_default();
        cancel_prompt();
    })?;

    let modal = dom::by_id(doc, dom::MODAL_ID)?;
    listen(&modal, "click", None, |evt: MouseEvent| {
        let on_overlay = evt
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.id() == dom::MODAL_ID);
        if on_overlay {
            cancel_prompt();
        }
    })?;

    listen(doc, "keydown", None, |evt: KeyboardEvent| {
        if evt.key() == "Escape" {
            cancel_prompt();
        }
    })?;
    Ok(())
}

fn cancel_prompt() {
    with_app(|app| {
        if app.field.prompt().is_open() {
            app.field.cancel_prompt();
            close_prompt(&app.doc);
        }
    });
}

fn attach_controls(doc: &Document) -> FieldResult<()> {
    if let Some(btn) = doc.get_element_by_id(dom::THEME_TOGGLE_ID) {
        listen(&btn, "click", None, |_: MouseEvent| {
            with_app(|app| {
                let theme = app.field.toggle_theme();
                report(dom::apply_theme(&app.doc, theme));
                dom::sync_lightness(&app.doc, app.field.base_lightness());
                log::debug!("theme: {theme:?}");
            });
        })?;
    }

    if let Some(slider) = doc.get_element_by_id(dom::LIGHTNESS_SLIDER_ID) {
        listen(&slider, "input", None, |evt: Event| {
            let value = evt
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|i| i.value().parse::<f64>().ok());
            if let Some(v) = value {
                with_app(|app| dom::show_lightness_label(&app.doc, v));
            }
        })?;
    }

    if let Some(btn) = doc.get_element_by_id(dom::APPLY_ID) {
        listen(&btn, "click", None, |evt: MouseEvent| {
            evt.prevent_default();
            reload_settings();
        })?;
    }

    if let Some(btn) = doc.get_element_by_id(dom::PANEL_TOGGLE_ID) {
        listen(&btn, "click", None, |_: MouseEvent| {
            with_app(|app| report(dom::toggle_panel(&app.doc)));
        })?;
    }
    Ok(())
}

/// Install every listener. Called once the session exists.
pub fn attach(win: &Window, doc: &Document, canvas: &HtmlCanvasElement) -> FieldResult<()> {
    attach_canvas(canvas)?;
    attach_prompt(doc)?;
    attach_controls(doc)?;
    listen(win, "resize", Some(true), |_: Event| refit())?;
    listen(win, "orientationchange", None, |_: Event| refit())?;
    Ok(())
}
