// Font-backed text widths. Faces are resolved once per family string through
// fontdb and their horizontal advances read with ttf-parser; when no face can
// be found the width falls back to an average-character estimate so label
// measurement is always defined.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Width of one character, as a fraction of the font size, when no font is available.
pub const FALLBACK_CHAR_WIDTH: f64 = 0.56;

static FONT_CATALOG: Lazy<Mutex<FontCatalog>> = Lazy::new(|| Mutex::new(FontCatalog::new()));

/// Width of `text` in the first available face of `font_family`, if any.
pub fn measure_text_width(text: &str, font_size: f64, font_family: &str) -> Option<f64> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut catalog = FONT_CATALOG.lock().ok()?;
    catalog.measure(text, font_size, font_family)
}

pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    let chars = text.chars().filter(|ch| *ch != '\n').count();
    chars as f64 * font_size.max(0.0) * FALLBACK_CHAR_WIDTH
}

pub fn text_width(text: &str, font_size: f64, font_family: &str) -> f64 {
    measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| estimate_text_width(text, font_size))
}

struct FontCatalog {
    db: Database,
    system_fonts_loaded: bool,
    faces: HashMap<String, Option<FaceAdvances>>,
}

impl FontCatalog {
    fn new() -> Self {
        Self {
            db: Database::new(),
            system_fonts_loaded: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f64, font_family: &str) -> Option<f64> {
        let key = family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load(font_family);
            if face.is_none() {
                tracing::debug!(family = %key, "no font face found, using estimated widths");
            }
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key)?.as_ref()?;
        Some(face.width(text, font_size))
    }

    fn load(&mut self, font_family: &str) -> Option<FaceAdvances> {
        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| generic_family(name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.system_fonts_loaded {
            self.db.load_system_fonts();
            self.system_fonts_loaded = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FaceAdvances::parse(data, index))
            .flatten()
    }
}

fn generic_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

/// Advances of the characters a label is likely to use, in font units.
struct FaceAdvances {
    units_per_em: f64,
    ascii: [u16; 128],
    other: HashMap<char, u16>,
}

impl FaceAdvances {
    fn parse(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let advance = |ch: char| {
            face.glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .unwrap_or(0)
        };
        let mut ascii = [0u16; 128];
        for (byte, slot) in ascii.iter_mut().enumerate() {
            *slot = advance(byte as u8 as char);
        }
        // Latin-1 and common typographic symbols cover most chart labels.
        let mut other = HashMap::new();
        for ch in ('\u{a0}'..='\u{ff}').chain(['\u{2013}', '\u{2014}', '\u{2026}', '\u{20ac}']) {
            let value = advance(ch);
            if value > 0 {
                other.insert(ch, value);
            }
        }
        Some(Self {
            units_per_em: f64::from(face.units_per_em().max(1)),
            ascii,
            other,
        })
    }

    fn width(&self, text: &str, font_size: f64) -> f64 {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * FALLBACK_CHAR_WIDTH;
        let normalized = text.replace('\t', "    ");
        let mut width = 0.0;
        for ch in normalized.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                self.ascii[ch as usize]
            } else {
                self.other.get(&ch).copied().unwrap_or(0)
            };
            width += if advance == 0 {
                fallback
            } else {
                f64::from(advance) * scale
            };
        }
        width.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(measure_text_width("", 12.0, "sans-serif"), Some(0.0));
        assert_eq!(text_width("", 12.0, "sans-serif"), 0.0);
    }

    #[test]
    fn estimate_scales_with_length_and_size() {
        assert_eq!(estimate_text_width("abcd", 10.0), 4.0 * 10.0 * FALLBACK_CHAR_WIDTH);
        assert_eq!(estimate_text_width("a\nb", 10.0), 2.0 * 10.0 * FALLBACK_CHAR_WIDTH);
        assert_eq!(estimate_text_width("abc", -1.0), 0.0);
    }

    #[test]
    fn widths_are_positive_and_monotonic() {
        let short = text_width("Dogs", 12.0, "sans-serif");
        let long = text_width("Dogs and cats", 12.0, "sans-serif");
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn family_keys_ignore_case_and_blank_names() {
        assert_eq!(family_key("  Arial "), "arial");
        assert_eq!(family_key(""), "sans-serif");
    }
}
