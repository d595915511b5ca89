use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("JS Error: {0}")]
    Js(String),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rating out of range: {0} (expected 1..=5)")]
    InvalidRating(u8),

    #[error("Missing DOM element: #{0}")]
    MissingElement(&'static str),
}

impl From<wasm_bindgen::JsValue> for FieldError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FieldError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<FieldError> for wasm_bindgen::JsValue {
    fn from(err: FieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

pub type FieldResult<T> = Result<T, FieldError>;
