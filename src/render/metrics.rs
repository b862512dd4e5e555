//! Glyph widths of the standard Helvetica fonts, taken from their Adobe font metrics.

/// The built-in pdf fonts used on the invoice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

// widths in 1/1000 em of the printable ascii range, starting at ' '
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

impl Font {
    fn glyph_width(self, c: char) -> u16 {
        let widths = match self {
            Self::Helvetica => &HELVETICA,
            Self::HelveticaBold => &HELVETICA_BOLD,
        };

        (c as usize)
            .checked_sub(' ' as usize)
            .and_then(|index| widths.get(index))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }
}

/// Width of `text` in points when set in `font` at `size` points.
#[must_use]
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(font.glyph_width(c))).sum();
    units as f32 * size / 1000.0
}

/// Breaks `text` into lines that are at most `max_width` points wide.
///
/// Lines are only broken at whitespace. A single word that is wider than `max_width`
/// gets a line of its own and overflows. The result has at least one (possibly empty) line.
#[must_use]
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        current = word.to_string();
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_width() {
        // digits are 556 units wide in both fonts
        assert!((text_width("12.00", Font::Helvetica, 10.0) - 25.02).abs() < 1e-4);
        assert!(
            text_width("Total", Font::HelveticaBold, 10.0)
                > text_width("Total", Font::Helvetica, 10.0)
        );
        assert_eq!(text_width("", Font::Helvetica, 10.0), 0.0);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", Font::Helvetica, 10.0, 50.0), vec![String::new()]);
        assert_eq!(wrap_text("short", Font::Helvetica, 10.0, 50.0), vec!["short"]);
        assert_eq!(
            wrap_text("fixed the login form", Font::Helvetica, 10.0, 50.0),
            vec!["fixed the", "login form"]
        );
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        assert_eq!(
            wrap_text("2024-01-02", Font::Helvetica, 10.0, 48.0),
            vec!["2024-01-02"]
        );
        assert_eq!(
            wrap_text("see 0123456789 later", Font::Helvetica, 10.0, 20.0),
            vec!["see", "0123456789", "later"]
        );
    }
}
