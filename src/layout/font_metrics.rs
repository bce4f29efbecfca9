//! Font metrics for the built-in PDF faces.
//!
//! Both renderer backends measure text against the same static width
//! tables, so a line that wraps in the preview wraps at the same word in
//! the export. Widths are the standard AFM values for the base-14 faces,
//! expressed in ems (multiply by the size in points).
//!
//! # Measurement rules
//! - Characters outside the printable ASCII range fall back to the face's
//!   average width; measurement never fails.
//! - Bold runs are approximated as a fixed factor over the regular face
//!   rather than carrying a second table per family.
//! - Wrapping is greedy by word; a single word wider than the column is
//!   placed alone on its own line, never hyphenated.

/// The two typeface families the templates draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    TimesRoman,
}

/// Width multiplier applied to bold runs.
pub const BOLD_FACTOR: f32 = 1.04;

/// Per-face widths in ems, indexed by `char as usize - 0x20` for the 95
/// printable ASCII characters.
pub struct FontMetricTable {
    widths: [f32; 95],
    average_char_width: f32,
}

// Helvetica AFM widths, 0x20..=0x7E.
const HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, // ' ' ! " # $ % & '
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278, // ( ) * + , - . /
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, // 0-7
        0.556, 0.556, 0.278, 0.278, 0.584, 0.584, 0.584, 0.556, // 8 9 : ; < = > ?
        1.015, 0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, // @ A-G
        0.722, 0.278, 0.500, 0.667, 0.556, 0.833, 0.722, 0.778, // H-O
        0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, // P-W
        0.667, 0.667, 0.611, 0.278, 0.278, 0.278, 0.469, 0.556, // X Y Z [ \ ] ^ _
        0.333, 0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, // ` a-g
        0.556, 0.222, 0.222, 0.500, 0.222, 0.833, 0.556, 0.556, // h-o
        0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, // p-w
        0.500, 0.500, 0.500, 0.334, 0.260, 0.334, 0.584, // x y z { | } ~
    ],
    average_char_width: 0.52,
};

// Times-Roman AFM widths, 0x20..=0x7E.
const TIMES_ROMAN: FontMetricTable = FontMetricTable {
    widths: [
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, // ' ' ! " # $ % & '
        0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278, // ( ) * + , - . /
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, // 0-7
        0.500, 0.500, 0.278, 0.278, 0.564, 0.564, 0.564, 0.444, // 8 9 : ; < = > ?
        0.921, 0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, // @ A-G
        0.722, 0.333, 0.389, 0.722, 0.611, 0.889, 0.722, 0.722, // H-O
        0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, // P-W
        0.722, 0.722, 0.611, 0.333, 0.278, 0.333, 0.469, 0.500, // X Y Z [ \ ] ^ _
        0.333, 0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, // ` a-g
        0.500, 0.278, 0.278, 0.500, 0.278, 0.778, 0.500, 0.500, // h-o
        0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, // p-w
        0.500, 0.500, 0.444, 0.480, 0.200, 0.480, 0.541, // x y z { | } ~
    ],
    average_char_width: 0.48,
};

impl FontFamily {
    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            FontFamily::Helvetica => &HELVETICA,
            FontFamily::TimesRoman => &TIMES_ROMAN,
        }
    }
}

impl FontMetricTable {
    /// Width of one character in ems.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (0x20..=0x7E).contains(&code) {
            self.widths[code - 0x20]
        } else {
            self.average_char_width
        }
    }

    /// Width of a string in points at the given size.
    pub fn measure_str(&self, text: &str, size_pt: f32, bold: bool) -> f32 {
        let ems: f32 = text.chars().map(|c| self.char_width(c)).sum();
        let factor = if bold { BOLD_FACTOR } else { 1.0 };
        ems * size_pt * factor
    }

    /// Greedy word wrap against a column width. Empty input yields no
    /// lines; whitespace runs collapse to single spaces.
    pub fn wrap_text(
        &self,
        text: &str,
        size_pt: f32,
        bold: bool,
        max_width_pt: f32,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if self.measure_str(&candidate, size_pt, bold) <= max_width_pt || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Physical page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    Letter,
    A4,
}

impl PaperSize {
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::A4 => (595.276, 841.89),
        }
    }
}

/// Page parameters for a layout run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub paper: PaperSize,
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup {
            paper: PaperSize::Letter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lengths_cover_printable_ascii() {
        assert!((HELVETICA.char_width(' ') - 0.278).abs() < 1e-6);
        assert!((HELVETICA.char_width('~') - 0.584).abs() < 1e-6);
        assert!((TIMES_ROMAN.char_width(' ') - 0.250).abs() < 1e-6);
        assert!((TIMES_ROMAN.char_width('~') - 0.541).abs() < 1e-6);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let m = FontFamily::Helvetica.metrics();
        assert!((m.char_width('é') - 0.52).abs() < 1e-6);
        assert!((m.char_width('•') - 0.52).abs() < 1e-6);
    }

    #[test]
    fn test_measure_scales_with_size_and_bold() {
        let m = FontFamily::Helvetica.metrics();
        let regular = m.measure_str("Hello", 10.0, false);
        assert!((m.measure_str("Hello", 20.0, false) - regular * 2.0).abs() < 1e-3);
        assert!((m.measure_str("Hello", 10.0, true) - regular * BOLD_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_breaks_at_word_boundaries() {
        let m = FontFamily::Helvetica.metrics();
        let text = "alpha beta gamma delta";
        let lines = m.wrap_text(text, 10.0, false, 80.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines {
            assert!(m.measure_str(line, 10.0, false) <= 80.0);
        }
    }

    #[test]
    fn test_wrap_places_oversized_word_alone() {
        let m = FontFamily::Helvetica.metrics();
        let lines = m.wrap_text("tiny incomprehensibilities end", 10.0, false, 40.0);
        assert!(lines.contains(&"incomprehensibilities".to_string()));
    }

    #[test]
    fn test_wrap_empty_input_yields_no_lines() {
        let m = FontFamily::TimesRoman.metrics();
        assert!(m.wrap_text("", 10.0, false, 100.0).is_empty());
        assert!(m.wrap_text("   ", 10.0, false, 100.0).is_empty());
    }

    #[test]
    fn test_paper_dimensions() {
        assert_eq!(PaperSize::Letter.dimensions(), (612.0, 792.0));
        assert_eq!(PageSetup::default().paper, PaperSize::Letter);
    }
}
