//! Case-insensitive literal substring search and match highlighting.
//!
//! Search terms are never interpreted as patterns. Characters such as `.` or
//! `(` only ever match themselves.

use std::ops::Range;

use serde::Serialize;

use crate::domain::Category;

/// Returns `true` if the category name, any element, or any control measure
/// contains `search_term`, ignoring case.
///
/// An empty term matches every category.
#[must_use]
pub fn matches_search(category: &Category, search_term: &str) -> bool {
    Needle::new(search_term).matches_category(category)
}

/// Returns the items containing `search_term`, ignoring case, in their
/// original order.
///
/// An empty term returns every item.
#[must_use]
pub fn filter_items<'a>(items: &'a [String], search_term: &str) -> Vec<&'a str> {
    Needle::new(search_term).filter(items)
}

/// Splits `text` into matched and unmatched runs of `search_term`.
///
/// Concatenating the segment texts reproduces `text` exactly.
#[must_use]
pub fn highlight<'a>(text: &'a str, search_term: &str) -> Vec<Segment<'a>> {
    Needle::new(search_term).highlight(text)
}

/// A contiguous run of text tagged as matched or unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    /// The text of the run, in its original casing.
    pub text: &'a str,
    /// Whether this run is an occurrence of the search term.
    pub matched: bool,
}

impl<'a> Segment<'a> {
    /// A run that is an occurrence of the search term.
    #[must_use]
    pub const fn matched(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }

    /// A run between occurrences of the search term.
    #[must_use]
    pub const fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

/// A prepared search term.
///
/// The term is case-folded once so it can be matched against many strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    folded: Vec<char>,
}

impl Needle {
    /// Prepares `search_term` for matching.
    #[must_use]
    pub fn new(search_term: &str) -> Self {
        Self {
            folded: search_term.chars().flat_map(char::to_lowercase).collect(),
        }
    }

    /// Whether the term is empty (and so matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Whether `haystack` contains the term.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.is_empty() || self.find_iter(haystack).next().is_some()
    }

    /// See [`matches_search`].
    #[must_use]
    pub fn matches_category(&self, category: &Category) -> bool {
        self.is_empty()
            || self.is_match(category.name())
            || category.elements().iter().any(|e| self.is_match(e))
            || category.control_measures().iter().any(|m| self.is_match(m))
    }

    /// See [`filter_items`].
    #[must_use]
    pub fn filter<'a>(&self, items: &'a [String]) -> Vec<&'a str> {
        items
            .iter()
            .map(String::as_str)
            .filter(|item| self.is_match(item))
            .collect()
    }

    /// See [`highlight`].
    #[must_use]
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for range in self.find_iter(text) {
            if range.start > cursor {
                segments.push(Segment::plain(&text[cursor..range.start]));
            }
            cursor = range.end;
            segments.push(Segment::matched(&text[range]));
        }

        if cursor < text.len() || segments.is_empty() {
            segments.push(Segment::plain(&text[cursor..]));
        }

        segments
    }

    /// Byte ranges of every non-overlapping occurrence of the term, scanning
    /// left to right.
    ///
    /// Yields nothing for an empty term.
    pub fn find_iter<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = Range<usize>> + 'h {
        let mut position = 0;
        std::iter::from_fn(move || {
            if self.is_empty() {
                return None;
            }
            while position < haystack.len() {
                let start = position;
                let rest = &haystack[start..];
                if let Some(len) = self.prefix_len(rest) {
                    position = start + len;
                    return Some(start..position);
                }
                position += rest.chars().next().map_or(1, char::len_utf8);
            }
            None
        })
    }

    /// Length in bytes of the occurrence of the term at the very start of
    /// `haystack`, if there is one.
    ///
    /// A match must end on a character boundary: a term that stops halfway
    /// through the lowercase expansion of a character does not match.
    fn prefix_len(&self, haystack: &str) -> Option<usize> {
        let mut expected = self.folded.iter().peekable();

        for (offset, ch) in haystack.char_indices() {
            if expected.peek().is_none() {
                return Some(offset);
            }
            for lower in ch.to_lowercase() {
                if expected.next() != Some(&lower) {
                    return None;
                }
            }
        }

        expected.peek().is_none().then_some(haystack.len())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn ppe() -> Category {
        Category::new("PPE", ["Gloves", "Boots"], ["Daily check"])
    }

    fn joined(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|segment| segment.text).collect()
    }

    #[test_case("", true; "empty term matches")]
    #[test_case("ppe", true; "name")]
    #[test_case("BOOT", true; "element")]
    #[test_case("daily", true; "control measure")]
    #[test_case("harness", false; "absent")]
    #[test_case(".", false; "metacharacter is literal")]
    #[test_case("g.oves", false; "dot does not match any character")]
    fn category_matching(term: &str, expected: bool) {
        assert_eq!(matches_search(&ppe(), term), expected);
    }

    #[test]
    fn filter_items_keeps_order() {
        let items = vec![
            "Check ladder".to_string(),
            "Gloves".to_string(),
            "Ladder storage".to_string(),
        ];

        assert_eq!(
            filter_items(&items, "LADDER"),
            ["Check ladder", "Ladder storage"]
        );
    }

    #[test]
    fn filter_items_with_empty_term_is_identity() {
        let items = vec!["b".to_string(), "a".to_string(), "b".to_string()];

        assert_eq!(filter_items(&items, ""), ["b", "a", "b"]);
    }

    #[test]
    fn filter_items_treats_metacharacters_literally() {
        let items = vec![
            "Gloves".to_string(),
            "Rule 1.2".to_string(),
            "a*b".to_string(),
        ];

        assert_eq!(filter_items(&items, "."), ["Rule 1.2"]);
        assert_eq!(filter_items(&items, "*"), ["a*b"]);
        assert!(filter_items(&items, "(").is_empty());
    }

    #[test]
    fn highlight_prefix_match() {
        assert_eq!(
            highlight("Gloves", "glov"),
            [Segment::matched("Glov"), Segment::plain("es")]
        );
    }

    #[test]
    fn highlight_empty_term_is_single_plain_segment() {
        assert_eq!(highlight("Gloves", ""), [Segment::plain("Gloves")]);
    }

    #[test]
    fn highlight_empty_text() {
        assert_eq!(highlight("", "x"), [Segment::plain("")]);
    }

    #[test]
    fn highlight_every_occurrence_preserving_case() {
        assert_eq!(
            highlight("Fire exit, FIRE alarm, fire", "fire"),
            [
                Segment::matched("Fire"),
                Segment::plain(" exit, "),
                Segment::matched("FIRE"),
                Segment::plain(" alarm, "),
                Segment::matched("fire"),
            ]
        );
    }

    #[test]
    fn highlight_overlapping_candidates_scan_left_to_right() {
        assert_eq!(
            highlight("aaa", "aa"),
            [Segment::matched("aa"), Segment::plain("a")]
        );
    }

    #[test]
    fn highlight_does_not_interpret_pattern_syntax() {
        assert_eq!(
            highlight("Use (a) or (b)", "(a)"),
            [
                Segment::plain("Use "),
                Segment::matched("(a)"),
                Segment::plain(" or (b)"),
            ]
        );
        assert_eq!(highlight("Gloves", "."), [Segment::plain("Gloves")]);
        assert_eq!(
            highlight("a|b", "|"),
            [
                Segment::plain("a"),
                Segment::matched("|"),
                Segment::plain("b"),
            ]
        );
    }

    #[test]
    fn highlight_non_ascii_keeps_boundaries() {
        let text = "Überprüfung der Schutzausrüstung";
        let segments = highlight(text, "ÜBER");

        assert_eq!(segments[0], Segment::matched("Über"));
        assert_eq!(joined(&segments), text);
    }

    #[test]
    fn partial_lowercase_expansion_is_not_a_match() {
        // 'İ' lowercases to "i\u{307}"; a term of just "i" stops mid-expansion.
        let needle = Needle::new("i");
        assert!(!needle.is_match("İ"));
        assert!(Needle::new("i\u{307}").is_match("İ"));
    }

    #[test_case("Gloves and gloves", "gloves")]
    #[test_case("No match here", "zzz")]
    #[test_case("ends with term", "term")]
    #[test_case("ÄäÄ", "ä")]
    #[test_case("....", "..")]
    fn highlight_round_trips(text: &str, term: &str) {
        let segments = highlight(text, term);

        assert_eq!(joined(&segments), text);
        for segment in segments.iter().filter(|segment| segment.matched) {
            assert_eq!(segment.text.to_lowercase(), term.to_lowercase());
        }
        assert!(segments.iter().all(|segment| !segment.text.is_empty()));
    }

    #[test]
    fn filtered_items_always_highlight() {
        let items = vec!["Daily check".to_string(), "Weekly CHECK".to_string()];
        let needle = Needle::new("check");

        for item in needle.filter(&items) {
            assert!(needle.highlight(item).iter().any(|segment| segment.matched));
        }
    }
}
