use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Greedy word wrap into lines of at most `width` cells. Source line
/// breaks are kept; a single word wider than `width` gets a line of its own.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for source_line in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;
        for word in source_line.split_whitespace() {
            let word_width = display_width(word);
            if !line.is_empty() && line_width + 1 + word_width > width {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_accented() {
        assert_eq!(display_width("Caipirinha de limão"), 19);
        // combining accent takes no cell
        assert_eq!(display_width("cafe\u{0301}"), 4);
    }

    #[test]
    fn display_width_cjk() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
    }

    #[test]
    fn truncate_cjk_boundary() {
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
    }

    #[test]
    fn truncate_tiny_widths() {
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        assert_eq!(
            wrap_to_width("Muddle the lime with the sugar", 12),
            vec!["Muddle the", "lime with", "the sugar"]
        );
    }

    #[test]
    fn wrap_keeps_line_breaks_and_long_words() {
        assert_eq!(
            wrap_to_width("Stir.\nStrain into a coupe", 6),
            vec!["Stir.", "Strain", "into a", "coupe"]
        );
        assert_eq!(wrap_to_width("grapefruit", 4), vec!["grapefruit"]);
        assert!(wrap_to_width("", 10).is_empty());
    }
}
