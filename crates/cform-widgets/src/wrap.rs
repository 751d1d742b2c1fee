#![forbid(unsafe_code)]

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::text_width;

/// Split `text` on `\n` and break each line into chunks of at most `width`
/// cells. Empty lines are kept; a grapheme wider than `width` gets a line
/// of its own.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        if width == 0 || text_width(line) <= width {
            out.push(line.to_string());
            continue;
        }
        let mut current = String::new();
        let mut current_width = 0;
        for g in line.graphemes(true) {
            let w = UnicodeWidthStr::width(g);
            if current_width + w > width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(g);
            current_width += w;
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_empty_lines() {
        assert_eq!(wrap_lines("a\n\nb", 5), vec!["a", "", "b"]);
    }

    #[test]
    fn breaks_at_width() {
        assert_eq!(wrap_lines("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn wide_chars_stay_whole() {
        assert_eq!(wrap_lines("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn zero_width_leaves_lines_unbroken() {
        assert_eq!(wrap_lines("abc\nd", 0), vec!["abc", "d"]);
    }
}
