//! Text utilities for TUI rendering.
//!
//! Width math uses display columns, so wide characters (CJK, emoji) wrap
//! and truncate where the terminal actually draws them.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with `…` if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Word-wraps `text` to `width` columns.
///
/// Explicit newlines are kept. Words wider than a full line are split by
/// character. Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if word_width > width {
                // Flush, then hard-split the long word.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if current_width + ch_width > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
                continue;
            }

            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

/// Replaces control characters so pasted or backend text cannot move the cursor.
pub fn sanitize_for_display(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\t' => ' ',
            '\n' => '\n',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(
            wrap_text("a\n\nb", 10),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn test_wrap_splits_long_word() {
        assert_eq!(
            wrap_text("abcdefgh", 3),
            vec!["abc".to_string(), "def".to_string(), "gh".to_string()]
        );
    }

    #[test]
    fn test_wrap_empty_is_one_line() {
        assert_eq!(wrap_text("", 5), vec![String::new()]);
    }

    #[test]
    fn test_sanitize_strips_escape() {
        assert_eq!(sanitize_for_display("a\x1b[2Jb\tc"), "a [2Jb c");
    }
}
