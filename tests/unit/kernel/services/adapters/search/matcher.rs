use super::*;
use crate::kernel::services::ports::search::Point;

fn literal(text: &str) -> SearchPattern {
    SearchPattern::literal(text, false)
}

fn find(matcher: &LineMatcher, line: &str) -> Vec<Match> {
    let mut out = Vec::new();
    matcher.find_in_line(line, 7, &mut out);
    out
}

#[test]
fn test_finds_all_occurrences_left_to_right() {
    let matcher = LineMatcher::new(&literal("foo"), false).unwrap();
    let matches = find(&matcher, "foo bar foo");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].range.start, Point::new(7, 0));
    assert_eq!(matches[0].range.end, Point::new(7, 3));
    assert_eq!(matches[1].range.start, Point::new(7, 8));
    assert_eq!(matches[1].range.end, Point::new(7, 11));
    assert!(matches.iter().all(|m| m.line_text == "foo bar foo"));
    assert!(matches.iter().all(|m| m.line_text_offset == 0));
}

#[test]
fn test_case_insensitive() {
    let matcher = LineMatcher::new(&SearchPattern::literal("foo", true), false).unwrap();
    let matches = find(&matcher, "FOO Foo");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[1].match_text, "Foo");

    let strict = LineMatcher::new(&literal("foo"), false).unwrap();
    assert!(find(&strict, "FOO Foo").is_empty());
}

#[test]
fn test_whole_word() {
    let matcher = LineMatcher::new(&literal("foo"), true).unwrap();
    let matches = find(&matcher, "food foo foo_bar (foo)");
    let cols: Vec<usize> = matches.iter().map(|m| m.range.start.column).collect();
    assert_eq!(cols, vec![5, 18]);
}

#[test]
fn test_columns_count_chars_not_bytes() {
    let matcher = LineMatcher::new(&literal("bé"), false).unwrap();
    let matches = find(&matcher, "héllo bé, bé");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].range.start.column, 6);
    assert_eq!(matches[1].range.start.column, 10);
    for m in &matches {
        assert_eq!(
            m.range.end.column - m.range.start.column,
            m.match_text.chars().count()
        );
    }
}

#[test]
fn test_zero_width_pattern_terminates_without_matches() {
    let matcher = LineMatcher::new(&SearchPattern::new("x*", false), false).unwrap();
    let matches = find(&matcher, "abc");
    assert!(matches.is_empty());

    let matches = find(&matcher, "axxb x");
    let texts: Vec<&str> = matches.iter().map(|m| m.match_text.as_str()).collect();
    assert_eq!(texts, vec!["xx", "x"]);
}

#[test]
fn test_invalid_regex_is_error() {
    assert!(LineMatcher::new(&SearchPattern::new("(unclosed", false), false).is_err());
}

#[test]
fn test_returns_number_of_appended_matches() {
    let matcher = LineMatcher::new(&literal("a"), false).unwrap();
    let mut out = Vec::new();
    assert_eq!(matcher.find_in_line("a a a", 0, &mut out), 3);
    assert_eq!(matcher.find_in_line("bbb", 1, &mut out), 0);
    assert_eq!(out.len(), 3);
}
