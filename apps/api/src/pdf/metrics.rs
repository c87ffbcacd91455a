//! Static Helvetica width table used to word-wrap text before it is placed on
//! the page.
//!
//! Widths are in em units (1/1000 of the AFM advance widths). The table covers
//! ASCII 0x20..=0x7E; index = (char as usize) - 32. Bold text is approximated by
//! scaling the regular widths.

/// Helvetica-Bold runs roughly this much wider than Helvetica.
const BOLD_FACTOR: f32 = 1.06;

/// Fallback width for characters outside the table.
const AVERAGE_CHAR_WIDTH: f32 = 0.556;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 0.352_778;

#[rustfmt::skip]
static HELVETICA_WIDTHS: [f32; 95] = [
    // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0     1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :     ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A     B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N     O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [     \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a     b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n     o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {     |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

/// Rendered width of `s` in em units.
pub fn measure_str(s: &str, bold: bool) -> f32 {
    let width: f32 = s
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[code - 32]
            } else {
                AVERAGE_CHAR_WIDTH
            }
        })
        .sum();
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Greedy word-wrap of `text` into lines no wider than `max_width_mm` at
/// `size_pt`. A single word wider than the line is placed on its own line.
/// Explicit newlines start a new line.
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32, bold: bool) -> Vec<String> {
    let max_width_em = max_width_mm / (size_pt * MM_PER_PT);
    let space_width = measure_str(" ", bold);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = measure_str(word, bold);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        assert!((measure_str("i", false) - 0.222).abs() < f32::EPSILON);
        assert!((measure_str("MW", false) - (0.833 + 0.944)).abs() < 1e-6);
        assert!(measure_str("abc", true) > measure_str("abc", false));
    }

    #[test]
    fn test_non_ascii_uses_average() {
        assert!((measure_str("é", false) - AVERAGE_CHAR_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_text("Hello world", 10.0, 170.0, false), vec!["Hello world"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "word ".repeat(200);
        let lines = wrap_text(&text, 10.0, 100.0, false);
        assert!(lines.len() > 1);
        let max_em = 100.0 / (10.0 * MM_PER_PT);
        for line in &lines {
            assert!(measure_str(line, false) <= max_em + 1e-3);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined.len(), 200);
    }

    #[test]
    fn test_newlines_split_paragraphs() {
        assert_eq!(wrap_text("one\n\ntwo", 10.0, 170.0, false), vec!["one", "two"]);
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let long = "x".repeat(500);
        let lines = wrap_text(&format!("a {long} b"), 10.0, 50.0, false);
        assert_eq!(lines, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_text("   ", 10.0, 170.0, false).is_empty());
    }
}
