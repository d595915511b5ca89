//! Startup resources and their fallbacks.
//!
//! The browser layer fetches the three files; what a fetch result turns into
//! is decided here so a failed or garbled resource never stops startup.

use crate::color::ColorTable;
use crate::config::ConfigOverrides;
use crate::error::FieldResult;
use crate::words::{WordSource, parse_word_list};

pub const CONFIG_URL: &str = "config.json";
pub const WORDS_URL: &str = "vietnamese_words.txt";
pub const COLORS_URL: &str = "word_colors.txt";

/// Overrides from a `config.json` fetch; `None` (all defaults) on any failure.
pub fn overrides_or_default(fetched: FieldResult<String>) -> Option<ConfigOverrides> {
    match fetched.and_then(|t| ConfigOverrides::from_json(&t)) {
        Ok(o) => {
            log::info!("loaded {CONFIG_URL}");
            Some(o)
        }
        Err(e) => {
            log::warn!("{CONFIG_URL} unavailable, using defaults: {e}");
            None
        }
    }
}

/// Word source from a word-list fetch; the built-in list when the fetch
/// failed or the list is empty.
pub fn words_or_fallback(fetched: FieldResult<String>) -> WordSource {
    match fetched {
        Ok(body) => {
            let words = parse_word_list(&body);
            if words.is_empty() {
                log::warn!("{WORDS_URL} is empty, using built-in words");
            } else {
                log::info!("loaded {} words", words.len());
            }
            WordSource::new(words)
        }
        Err(e) => {
            log::warn!("{WORDS_URL} unavailable, using built-in words: {e}");
            WordSource::fallback()
        }
    }
}

/// Color table from a color-file fetch; empty (every word default-colored)
/// on failure.
pub fn colors_or_default(fetched: FieldResult<String>) -> ColorTable {
    match fetched {
        Ok(body) => {
            let table = ColorTable::parse(&body);
            log::info!("loaded {} word colors", table.len());
            table
        }
        Err(e) => {
            log::warn!("{COLORS_URL} unavailable, using default color: {e}");
            ColorTable::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::words::FALLBACK_WORDS;

    fn not_found(url: &str) -> FieldResult<String> {
        Err(FieldError::Http {
            url: url.into(),
            status: 404,
        })
    }

    #[test]
    fn config_failures_yield_defaults() {
        assert!(overrides_or_default(not_found(CONFIG_URL)).is_none());
        assert!(overrides_or_default(Ok("<!doctype html><h1>Not Found</h1>".into())).is_none());
        assert!(overrides_or_default(Ok(String::new())).is_none());
    }

    #[test]
    fn config_body_is_parsed() {
        let o = overrides_or_default(Ok(r#"{"wordCount": 12}"#.into())).unwrap();
        assert_eq!(o.word_count, Some(12.0));
    }

    #[test]
    fn word_failures_use_builtin_list() {
        let fallback = FALLBACK_WORDS.len();
        assert_eq!(words_or_fallback(not_found(WORDS_URL)).words().len(), fallback);
        assert_eq!(words_or_fallback(Ok(String::new())).words().len(), fallback);
        assert_eq!(words_or_fallback(Ok(" , ,".into())).words().len(), fallback);
        assert_eq!(words_or_fallback(Ok("táo, chuối".into())).words().len(), 2);
    }

    #[test]
    fn color_failures_leave_table_empty() {
        assert!(colors_or_default(not_found(COLORS_URL)).is_empty());
        assert!(colors_or_default(Ok(String::new())).is_empty());
        let table = colors_or_default(Ok("Táo: hsl(10, 50%, 50%)\n".into()));
        assert_eq!(table.len(), 1);
    }
}
