//! Small text helpers shared by the display layer.

/// First `lines` lines of `text`, with `"..."` appended when truncated.
pub fn preview(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let short = all[..all.len().min(lines)].join("\n");
    if all.len() > lines {
        format!("{short}...")
    } else {
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_untouched() {
        assert_eq!(preview("one line", 2), "one line");
        assert_eq!(preview("a\nb", 2), "a\nb");
    }

    #[test]
    fn long_text_truncated_with_ellipsis() {
        assert_eq!(preview("a\nb\nc\nd", 2), "a\nb...");
    }

    #[test]
    fn empty_text() {
        assert_eq!(preview("", 2), "");
    }
}
