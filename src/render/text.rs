//! Text metrics.
//!
//! Labels and overlay boxes need their extent before a font is ever loaded
//! (bounding boxes decide the trimmed viewBox), so widths are estimated from
//! a proportional character table instead of real glyph advances.

use super::config::LINE_HEIGHT;

/// Proportional character widths for printable ASCII, in hundredths of an em-ish unit.
#[rustfmt::skip]
const CHAR_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of one unit of the table relative to the font size.
const WIDTH_PER_FONT: f64 = 0.08 / 0.14;

/// Sum of the table widths for `text`; characters outside ASCII count as 100.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                CHAR_WIDTHS[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// Estimated width of a single line, in points.
pub fn line_width_pt(text: &str, font_pt: f64, bold: bool) -> f64 {
    let width = text_length(text) as f64 * 0.01 * WIDTH_PER_FONT * font_pt;
    if bold { width * 1.1 } else { width }
}

/// Estimated (width, height) of a block of lines, in points.
pub fn block_size_pt(lines: &[String], font_pt: f64, bold: bool) -> (f64, f64) {
    let width = lines
        .iter()
        .map(|line| line_width_pt(line, font_pt, bold))
        .fold(0.0, f64::max);
    let height = lines.len() as f64 * font_pt * LINE_HEIGHT;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_uses_table() {
        assert_eq!(text_length("A"), 102);
        assert_eq!(text_length("Bed"), 105 + 85 + 92);
    }

    #[test]
    fn non_ascii_counts_as_hundred() {
        assert_eq!(text_length("×"), 100);
    }

    #[test]
    fn bold_is_wider() {
        assert!(line_width_pt("Desk", 9.0, true) > line_width_pt("Desk", 9.0, false));
    }

    #[test]
    fn block_uses_widest_line() {
        let lines = vec!["a".to_string(), "wider line".to_string()];
        let (w, h) = block_size_pt(&lines, 10.0, false);
        assert_eq!(w, line_width_pt("wider line", 10.0, false));
        assert_eq!(h, 25.0);
    }
}
