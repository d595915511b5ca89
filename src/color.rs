//! Per-word colors and the lightness remap.
//!
//! The color table resource is a newline-delimited list of `word: value` pairs.
//! Values of the form `hsl(h, s%, l%)` become [`ColorSpec::Hsl`]; anything else
//! is kept verbatim as [`ColorSpec::Raw`].

use std::collections::HashMap;

/// Color used for words that have no table entry.
pub const DEFAULT_COLOR: &str = "#e6eef8";

#[derive(Clone, Debug, PartialEq)]
pub enum ColorSpec {
    Hsl { h: f64, s: f64, l: f64 },
    Raw(String),
}

impl ColorSpec {
    pub fn parse(value: &str) -> Self {
        match parse_hsl(value) {
            Some((h, s, l)) => ColorSpec::Hsl { h, s, l },
            None => ColorSpec::Raw(value.to_owned()),
        }
    }
}

/// Remap the stored lightness `base` (percent) by the effective lightness `s`
/// in [0, 1]: 0.5 keeps `base`, 1 reaches white (100), 0 reaches black (0),
/// linear on either side.
pub fn remap_lightness(base: f64, s: f64) -> f64 {
    let l = if s.is_nan() || s == 0.5 {
        base
    } else if s > 0.5 {
        base + (100.0 - base) * ((s - 0.5) / 0.5)
    } else {
        base * (s / 0.5)
    };
    l.clamp(0.0, 100.0)
}

/// CSS color string for `spec` at effective lightness `s`.
pub fn resolve(spec: Option<&ColorSpec>, s: f64) -> String {
    match spec {
        Some(ColorSpec::Hsl { h, s: sat, l }) => {
            format!("hsl({h},{sat}%,{}%)", remap_lightness(*l, s))
        }
        // Raw colors can't be remapped; only the extremes snap.
        Some(ColorSpec::Raw(raw)) => {
            if s == 1.0 {
                "#ffffff".to_string()
            } else if s == 0.0 {
                "#000000".to_string()
            } else {
                raw.clone()
            }
        }
        None => DEFAULT_COLOR.to_string(),
    }
}

/// Lowercased word → color lookup.
#[derive(Clone, Debug, Default)]
pub struct ColorTable {
    entries: HashMap<String, ColorSpec>,
}

impl ColorTable {
    /// Parse the `key: value` resource. Lines without a separator, or with the
    /// separator in first position, are skipped.
    pub fn parse(body: &str) -> Self {
        let mut entries = HashMap::new();
        for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let Some(idx) = line.find(':') else { continue };
            if idx == 0 {
                continue;
            }
            let key = line[..idx].trim().to_lowercase();
            let value = line[idx + 1..].trim();
            entries.insert(key, ColorSpec::parse(value));
        }
        Self { entries }
    }

    /// Entry for a display text, matched case-insensitively.
    pub fn get(&self, text: &str) -> Option<&ColorSpec> {
        self.entries.get(&text.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find the first `hsl(<n>, <n>%, <n>%)` in `value` (case-insensitive).
fn parse_hsl(value: &str) -> Option<(f64, f64, f64)> {
    let lower = value.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find("hsl(") {
        let start = from + pos + 4;
        if let Some(triple) = HslCursor::new(&lower[start..]).triple() {
            return Some(triple);
        }
        from = start;
    }
    None
}

struct HslCursor<'a> {
    rest: &'a str,
}

impl<'a> HslCursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn triple(mut self) -> Option<(f64, f64, f64)> {
        let h = self.number()?;
        self.punct(',')?;
        let s = self.number()?;
        self.punct('%')?;
        self.punct(',')?;
        let l = self.number()?;
        self.punct('%')?;
        self.punct(')')?;
        Some((h, s, l))
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn punct(&mut self, c: char) -> Option<()> {
        self.skip_ws();
        self.rest = self.rest.strip_prefix(c)?;
        Some(())
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let n = self.rest[..end].parse().ok()?;
        self.rest = &self.rest[end..];
        Some(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_keeps_stored_lightness() {
        for base in [0.0, 12.5, 50.0, 73.0, 100.0] {
            assert_eq!(remap_lightness(base, 0.5), base);
            assert_eq!(remap_lightness(base, f64::NAN), base);
        }
    }

    #[test]
    fn extremes_reach_white_and_black() {
        assert_eq!(remap_lightness(40.0, 1.0), 100.0);
        assert_eq!(remap_lightness(40.0, 0.0), 0.0);
        assert_eq!(remap_lightness(40.0, 0.75), 70.0);
        assert_eq!(remap_lightness(40.0, 0.25), 20.0);
    }

    #[test]
    fn remap_is_monotonic() {
        for base in [0.0, 30.0, 65.0, 100.0] {
            let mut prev = -1.0;
            for i in 0..=100 {
                let l = remap_lightness(base, f64::from(i) / 100.0);
                assert!(l >= prev, "base {base}: {l} < {prev} at {i}");
                prev = l;
            }
        }
    }

    #[test]
    fn resolve_formats_hsl_and_snaps_raw() {
        let hsl = ColorSpec::Hsl { h: 210.0, s: 60.0, l: 40.0 };
        assert_eq!(resolve(Some(&hsl), 0.5), "hsl(210,60%,40%)");
        assert_eq!(resolve(Some(&hsl), 1.0), "hsl(210,60%,100%)");

        let raw = ColorSpec::Raw("tomato".into());
        assert_eq!(resolve(Some(&raw), 1.0), "#ffffff");
        assert_eq!(resolve(Some(&raw), 0.0), "#000000");
        assert_eq!(resolve(Some(&raw), 0.7), "tomato");
        assert_eq!(resolve(None, 0.7), DEFAULT_COLOR);
    }

    #[test]
    fn table_parses_hsl_raw_and_skips_malformed_lines() {
        let table = ColorTable::parse(
            "Táo: hsl(10, 80%, 45%)\r\n\
             :orphan\n\
             no separator here\n\
             \n\
             chuối : #ffcc00\n\
             xoài: HSL( 120 , 50.5% , 30% )\n\
             bad: hsl(1.2.3, 4%, 5%)\n",
        );
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.get("TÁO"),
            Some(&ColorSpec::Hsl { h: 10.0, s: 80.0, l: 45.0 })
        );
        assert_eq!(table.get("Chuối"), Some(&ColorSpec::Raw("#ffcc00".into())));
        assert_eq!(
            table.get("xoài"),
            Some(&ColorSpec::Hsl { h: 120.0, s: 50.5, l: 30.0 })
        );
        assert_eq!(
            table.get("bad"),
            Some(&ColorSpec::Raw("hsl(1.2.3, 4%, 5%)".into()))
        );
        assert_eq!(table.get("orphan"), None);
    }
}
