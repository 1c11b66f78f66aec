//! Character sanitization for free-text URI fields.
//!
//! Third-party scanner apps disagree on which characters they accept inside
//! `pn` and `tn`. The safe common denominator is ASCII letters, digits,
//! whitespace, `.` and `-`; everything else is dropped.
//!
//! # Algorithm
//!
//! 1. NFKD-decompose so accented letters keep their base letter (`é` -> `e`)
//! 2. Drop every character outside the allowed set
//! 3. Collapse whitespace runs to a single ASCII space and trim the edges
//! 4. Truncate to the character limit, trimming any space left at the cut
//!
//! The output of [`sanitize_text`] is a fixed point: sanitizing it again with
//! the same limit returns it unchanged.
//!
//! ```rust
//! use uri::sanitize_text;
//!
//! assert_eq!(sanitize_text("  Café   Noir!! ", 50), "Cafe Noir");
//! assert_eq!(sanitize_text("Cafe Noir", 50), "Cafe Noir");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Collapses whitespace runs into single spaces and trims both edges.
///
/// All Unicode whitespace counts as a delimiter, including tabs, newlines
/// and non-breaking spaces.
///
/// ```rust
/// use uri::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \t\n world  "), "hello world");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == '.' || c == '-'
}

/// Applies the full sanitization pipeline with a character limit.
pub fn sanitize_text(raw: &str, max_chars: usize) -> String {
    let filtered: String = raw.nfkd().filter(|c| is_allowed(*c)).collect();
    let collapsed = collapse_whitespace(&filtered);
    truncate_chars(&collapsed, max_chars)
}

/// Sanitizes a payee name. An empty result means the name is effectively missing.
pub fn sanitize_name(raw: &str, max_chars: usize) -> String {
    sanitize_text(raw, max_chars)
}

/// Sanitizes a note, returning `None` when nothing survives.
pub fn sanitize_note(raw: &str, max_chars: usize) -> Option<String> {
    let note = sanitize_text(raw, max_chars);
    (!note.is_empty()).then_some(note)
}

/// Cuts at a character boundary and drops whitespace exposed by the cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_decoration_characters() {
        assert_eq!(sanitize_text("Shop Name!!", 50), "Shop Name");
        assert_eq!(sanitize_text("A&B <Traders> #1", 50), "AB Traders 1");
        assert_eq!(sanitize_text("Mr. O'Neil-Smith", 50), "Mr. ONeil-Smith");
    }

    #[test]
    fn folds_accents_to_base_letters() {
        assert_eq!(sanitize_text("José Müller", 50), "Jose Muller");
        assert_eq!(sanitize_text("ﬁne", 50), "fine");
    }

    #[test]
    fn collapses_whitespace_from_removed_characters() {
        assert_eq!(sanitize_text("Tea  @  Coffee\t\tHouse", 50), "Tea Coffee House");
    }

    #[test]
    fn truncates_without_leaving_trailing_space() {
        let out = sanitize_text("abcd efgh", 5);
        assert_eq!(out, "abcd");
        assert_eq!(sanitize_text("abcdefgh", 5), "abcde");
    }

    #[test]
    fn sanitization_is_idempotent() {
        let samples = [
            "  Shop   Name!! ",
            "José's Café & Bar -- est. 1999",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z 0 1 2 3 4 5 6 7 8 9",
            "\u{00A0}leading nbsp",
            "!!!",
        ];
        for limit in [5usize, 10, 50, 100] {
            for raw in samples {
                let once = sanitize_text(raw, limit);
                let twice = sanitize_text(&once, limit);
                assert_eq!(once, twice, "not idempotent for {raw:?} at {limit}");
                assert!(once.chars().count() <= limit);
            }
        }
    }

    #[test]
    fn note_without_surviving_characters_is_absent() {
        assert_eq!(sanitize_note("!!! ???", 100), None);
        assert_eq!(sanitize_note("", 100), None);
        assert_eq!(sanitize_note(" thanks! ", 100), Some("thanks".into()));
    }

    #[test]
    fn collapse_whitespace_edge_cases() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("hello\r\nworld"), "hello world");
        assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
    }
}
