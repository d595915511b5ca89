//! Page elements around the canvas: rating modal, settings panel, theme.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::config::{ConfigOverrides, Configuration, Theme};
use crate::error::{FieldError, FieldResult};
use crate::interaction;
use crate::ratings::Rating;

pub const CANVAS_ID: &str = "stage";
pub const MODAL_ID: &str = "modal";
pub const MODAL_WORD_ID: &str = "modal-word";
pub const RATING_FORM_ID: &str = "rating-form";
pub const CANCEL_ID: &str = "cancel";
pub const CLEAR_ID: &str = "clear-rating";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const PANEL_ID: &str = "control-panel";
pub const PANEL_TOGGLE_ID: &str = "panelToggle";
pub const APPLY_ID: &str = "applyBtn";
pub const LIGHTNESS_SLIDER_ID: &str = "lSlider";
pub const LIGHTNESS_LABEL_ID: &str = "lVal";

const HIDDEN: &str = "hidden";
const SELECTED: &str = "selected";

pub fn by_id(doc: &Document, id: &'static str) -> FieldResult<Element> {
    doc.get_element_by_id(id)
        .ok_or(FieldError::MissingElement(id))
}

fn input(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

/// Numeric value of input `id`; missing elements and non-numbers are `None`.
pub fn input_number(doc: &Document, id: &str) -> Option<f64> {
    let v: f64 = input(doc, id)?.value().trim().parse().ok()?;
    v.is_finite().then_some(v)
}

fn set_input_number(doc: &Document, id: &str, value: f64) {
    if let Some(el) = input(doc, id) {
        el.set_value(&value.to_string());
    }
}

/// Settings panel contents as overrides. The lightness slider is handled
/// separately since it targets the current theme.
pub fn read_panel(doc: &Document) -> ConfigOverrides {
    ConfigOverrides {
        amplitude_x: input_number(doc, "ampXInput"),
        amplitude_y: input_number(doc, "ampYInput"),
        frequency_x: input_number(doc, "freqXInput"),
        frequency_y: input_number(doc, "freqYInput"),
        x_randomness: input_number(doc, "xInput"),
        y_randomness: input_number(doc, "yInput"),
        glow_freq: input_number(doc, "glowFreqInput"),
        glow_amp: input_number(doc, "glowAmpInput"),
        ..Default::default()
    }
}

pub fn sync_panel(doc: &Document, config: &Configuration, lightness: f64) {
    set_input_number(doc, "ampXInput", config.amplitude.x);
    set_input_number(doc, "ampYInput", config.amplitude.y);
    set_input_number(doc, "freqXInput", config.frequency.x);
    set_input_number(doc, "freqYInput", config.frequency.y);
    set_input_number(doc, "xInput", config.jitter.x);
    set_input_number(doc, "yInput", config.jitter.y);
    set_input_number(doc, "glowFreqInput", config.glow_frequency);
    set_input_number(doc, "glowAmpInput", config.glow_amplitude);
    sync_lightness(doc, lightness);
}

pub fn sync_lightness(doc: &Document, lightness: f64) {
    set_input_number(doc, LIGHTNESS_SLIDER_ID, lightness);
    show_lightness_label(doc, lightness);
}

pub fn show_lightness_label(doc: &Document, lightness: f64) {
    if let Some(label) = doc.get_element_by_id(LIGHTNESS_LABEL_ID) {
        label.set_text_content(Some(&format!("{lightness:.2}")));
    }
}

/// Collapse or expand the settings panel.
pub fn toggle_panel(doc: &Document) -> FieldResult<()> {
    let panel = by_id(doc, PANEL_ID)?;
    let minimized = panel.class_list().toggle("minimized")?;
    if let Some(btn) = doc.get_element_by_id(PANEL_TOGGLE_ID) {
        btn.set_attribute("aria-expanded", if minimized { "false" } else { "true" })?;
    }
    Ok(())
}

pub fn apply_theme(doc: &Document, theme: Theme) -> FieldResult<()> {
    if let Some(body) = doc.body() {
        body.class_list().toggle_with_force("light", theme.is_light())?;
    }
    Ok(())
}

/// Publish both theme backgrounds as CSS custom properties.
pub fn set_background_vars(doc: &Document, config: &Configuration) -> FieldResult<()> {
    let Some(root) = doc
        .document_element()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };
    let style = root.style();
    style.set_property("--bg-dark", &config.dark_background)?;
    style.set_property("--bg-light", &config.light_background)?;
    Ok(())
}

pub fn set_cursor(canvas: &HtmlElement, over_word: bool) {
    let _ = canvas
        .style()
        .set_property("cursor", if over_word { "pointer" } else { "default" });
}

/// The form's preselected rating (`.rating-btn[data-default]`), if any.
pub fn default_rating(doc: &Document) -> Option<Rating> {
    let form = doc.get_element_by_id(RATING_FORM_ID)?;
    let btn = form.query_selector(".rating-btn[data-default]").ok()??;
    rating_of(&btn)
}

/// Rating carried by a `.rating-btn` element.
pub fn rating_of(btn: &Element) -> Option<Rating> {
    let v: u8 = btn.get_attribute("data-value")?.trim().parse().ok()?;
    Rating::new(v).ok()
}

/// Highlight the button for `selected`, un-highlighting the rest.
pub fn mark_selected(doc: &Document, selected: Option<Rating>) -> FieldResult<()> {
    let form = by_id(doc, RATING_FORM_ID)?;
    let buttons = form.query_selector_all(".rating-btn")?;
    for i in 0..buttons.length() {
        let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let on = selected.is_some() && rating_of(&btn) == selected;
        btn.class_list().toggle_with_force(SELECTED, on)?;
    }
    Ok(())
}

pub fn show_prompt(doc: &Document, word: &str, selected: Option<Rating>) -> FieldResult<()> {
    by_id(doc, MODAL_WORD_ID)?.set_text_content(Some(&interaction::prompt_text(word)));
    let modal = by_id(doc, MODAL_ID)?;
    modal.class_list().remove_1(HIDDEN)?;
    modal.set_scroll_top(0);
    mark_selected(doc, selected)
}

pub fn hide_prompt(doc: &Document) -> FieldResult<()> {
    by_id(doc, MODAL_ID)?.class_list().add_1(HIDDEN)?;
    mark_selected(doc, None)
}
