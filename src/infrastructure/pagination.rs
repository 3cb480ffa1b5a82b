//! Pagination codec for the catalog's `link` response header.
//!
//! The catalog paginates its primary feed with an opaque `since` cursor
//! advertised through a header of the form:
//!
//! ```text
//! <https://api.github.com/repositories?since=369>; rel="next", <https://api.github.com/repositories{?since}>; rel="first"
//! ```
//!
//! Parsing is deliberately lenient. Segments that do not match
//! `<URL>; rel="REL"` are skipped, an absent header is an empty mapping, and a
//! URL without a numeric `since` parameter yields no cursor. None of these
//! functions can fail.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RELATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>;\s*rel="([^"]+)""#).expect("relation pattern is valid"));

static SINCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"since=(\d+)").expect("since pattern is valid"));

/// Relation name → URL mapping parsed from a `link` header.
///
/// Later segments with the same relation name overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRelations(BTreeMap<String, String>);

impl LinkRelations {
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&str> {
        self.0.get(relation).map(String::as_str)
    }

    /// URL of the `next` relation, the only one the catalog workflow consumes.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Parses a `link` header into its named relations.
///
/// # Examples
///
/// ```
/// use repolens::infrastructure::pagination::parse_link_relations;
///
/// let relations = parse_link_relations(Some(
///     r#"<https://api.github.com/repositories?since=200>; rel="next", garbage"#,
/// ));
/// assert_eq!(relations.next(), Some("https://api.github.com/repositories?since=200"));
/// assert_eq!(relations.len(), 1);
/// assert!(parse_link_relations(None).is_empty());
/// ```
#[must_use]
pub fn parse_link_relations(header: Option<&str>) -> LinkRelations {
    let Some(header) = header.filter(|h| !h.is_empty()) else {
        return LinkRelations::default();
    };

    let relations = header
        .split(',')
        .filter_map(|segment| {
            let captures = RELATION_PATTERN.captures(segment)?;
            Some((captures[2].to_string(), captures[1].to_string()))
        })
        .collect();

    LinkRelations(relations)
}

/// Extracts the numeric `since` cursor from a URL.
///
/// Digits that do not fit in a `u64` are treated the same as a missing
/// parameter.
///
/// # Examples
///
/// ```
/// use repolens::infrastructure::pagination::extract_cursor;
///
/// assert_eq!(extract_cursor(Some("https://x/repositories?since=369")), Some(369));
/// assert_eq!(extract_cursor(Some("https://x/repositories?since=abc")), None);
/// assert_eq!(extract_cursor(None), None);
/// ```
#[must_use]
pub fn extract_cursor(url: Option<&str>) -> Option<u64> {
    let captures = SINCE_PATTERN.captures(url?)?;
    captures[1].parse().ok()
}

/// Returns `true` iff the relations advertise a `next` page.
#[must_use]
pub fn has_more(relations: &LinkRelations) -> bool {
    relations.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB_LINK: &str = r#"<https://api.github.com/repositories?since=369>; rel="next", <https://api.github.com/repositories{?since}>; rel="first""#;

    #[test]
    fn parses_all_well_formed_relations() {
        let relations = parse_link_relations(Some(GITHUB_LINK));
        assert_eq!(relations.len(), 2);
        assert_eq!(relations.next(), Some("https://api.github.com/repositories?since=369"));
        assert_eq!(relations.get("first"), Some("https://api.github.com/repositories{?since}"));
        assert!(has_more(&relations));
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let relations = parse_link_relations(Some(
            r#"not a link, <https://x/a?since=5>; rel=next, <https://x/b?since=9>;rel="prev""#,
        ));
        assert_eq!(relations.len(), 1);
        assert_eq!(relations.get("prev"), Some("https://x/b?since=9"));
        assert!(!has_more(&relations));
    }

    #[test]
    fn empty_or_missing_header_yields_no_cursor() {
        for header in [None, Some(""), Some(",,,"), Some("<>; rel=\"\"")] {
            let relations = parse_link_relations(header);
            assert_eq!(extract_cursor(relations.next()), None);
            assert!(!has_more(&relations));
        }
    }

    #[test]
    fn cursor_requires_since_parameter() {
        assert_eq!(extract_cursor(Some("https://x/repositories?page=2")), None);
        assert_eq!(extract_cursor(Some("https://x/repositories?per_page=5&since=0")), Some(0));
    }

    #[test]
    fn overflowing_cursor_is_treated_as_absent() {
        assert_eq!(extract_cursor(Some("https://x/r?since=99999999999999999999999")), None);
    }

    #[test]
    fn arbitrary_headers_never_panic() {
        let inputs = [
            "<", ">", "<a>;", "<a>; rel=\"", ";;;", "<a;b>; rel=\"x\",<c>; rel=\"y\"",
            "\u{1F600}<\u{1F600}>; rel=\"next\"",
        ];
        for input in inputs {
            let relations = parse_link_relations(Some(input));
            let _ = extract_cursor(relations.next());
        }
    }
}
