//! Accent color handling.
//!
//! The accent is the single style parameter every renderer honors. It
//! arrives as a `#RRGGBB` hex string; a malformed value falls back to the
//! template's registry default (logged, never an error).
//!
//! Tints are derived from the accent, never hardcoded: the preview backend
//! emits hex8 CSS (`#RRGGBBAA`), the export backend blends toward white
//! since PDF content streams have no alpha at this level.

use tracing::warn;

use crate::templates::{template_config, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Strict `#RRGGBB` parse.
    pub fn parse(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Rgb {
            r: u8::from_str_radix(&digits[0..2], 16).ok()?,
            g: u8::from_str_radix(&digits[2..4], 16).ok()?,
            b: u8::from_str_radix(&digits[4..6], 16).ok()?,
        })
    }

    /// Lowercase `#rrggbb` form used in preview markup.
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hex8 tint (`#rrggbbAA`) — the alpha suffix is two hex digits, e.g.
    /// `"40"` for the 25% rules and `"10"` for badge backgrounds.
    pub fn css_tint(&self, alpha_hex: &str) -> String {
        format!("{}{}", self.css(), alpha_hex)
    }

    /// Unit-interval components for PDF `rg` operators.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Blends toward white; `keep` is the fraction of the accent retained
    /// (0.25 approximates the hex8 `"40"` tint over a white page).
    pub fn tint(&self, keep: f32) -> Rgb {
        let mix = |c: u8| -> u8 {
            let v = f32::from(c) * keep + 255.0 * (1.0 - keep);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }
}

pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Resolves the effective accent for a render call: the supplied color if
/// present and well-formed, otherwise the template's registry default.
pub fn resolve_accent(id: TemplateId, supplied: Option<&str>) -> Rgb {
    let fallback = || {
        Rgb::parse(template_config(id).accent_color)
            .expect("registry accent colors are well-formed")
    };
    match supplied {
        None => fallback(),
        Some(hex) => Rgb::parse(hex).unwrap_or_else(|| {
            warn!(accent = hex, template = %id, "malformed accent color, using template default");
            fallback()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_hex() {
        assert_eq!(
            Rgb::parse("#2563eb"),
            Some(Rgb {
                r: 0x25,
                g: 0x63,
                b: 0xeb
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Rgb::parse("2563eb"), None);
        assert_eq!(Rgb::parse("#25e"), None);
        assert_eq!(Rgb::parse("#25g3eb"), None);
        assert_eq!(Rgb::parse("#2563eb00"), None);
    }

    #[test]
    fn test_css_normalizes_to_lowercase() {
        assert_eq!(Rgb::parse("#DC2626").unwrap().css(), "#dc2626");
    }

    #[test]
    fn test_css_tint_appends_alpha_suffix() {
        assert_eq!(Rgb::parse("#2563eb").unwrap().css_tint("40"), "#2563eb40");
    }

    #[test]
    fn test_tint_blends_toward_white() {
        let tinted = Rgb { r: 0, g: 0, b: 0 }.tint(0.25);
        assert_eq!(tinted, Rgb { r: 191, g: 191, b: 191 });
        assert_eq!(WHITE.tint(0.25), WHITE);
    }

    #[test]
    fn test_resolve_accent_prefers_supplied_color() {
        let accent = resolve_accent(TemplateId::Modern, Some("#dc2626"));
        assert_eq!(accent.css(), "#dc2626");
    }

    #[test]
    fn test_resolve_accent_falls_back_on_malformed_or_missing() {
        assert_eq!(
            resolve_accent(TemplateId::Modern, Some("blue")).css(),
            "#2563eb"
        );
        assert_eq!(resolve_accent(TemplateId::Bold, None).css(), "#dc2626");
    }
}
