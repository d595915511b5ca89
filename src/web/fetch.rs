//! Fetching the startup resources.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::color::ColorTable;
use crate::config::ConfigOverrides;
use crate::error::{FieldError, FieldResult};
use crate::resources::{self, COLORS_URL, CONFIG_URL, WORDS_URL};
use crate::words::WordSource;

/// GET `url` and return the body; non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> FieldResult<String> {
    let win = web_sys::window().ok_or_else(|| FieldError::Js("no window".into()))?;
    let resp: Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(FieldError::Http {
            url: url.to_owned(),
            status: resp.status(),
        });
    }
    JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| FieldError::Js(format!("{url}: body is not text")))
}

pub async fn load_overrides() -> Option<ConfigOverrides> {
    resources::overrides_or_default(fetch_text(CONFIG_URL).await)
}

pub async fn load_words() -> WordSource {
    resources::words_or_fallback(fetch_text(WORDS_URL).await)
}

pub async fn load_colors() -> ColorTable {
    resources::colors_or_default(fetch_text(COLORS_URL).await)
}
