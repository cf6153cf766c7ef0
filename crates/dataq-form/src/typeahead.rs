//! Typeahead suggestion and completion policies.
//!
//! The suggestion widget itself belongs to the page; this module owns the
//! two policies the explorer plugs into it. Field values are comma-separated
//! lists whose members may be wrapped in aggregation calls like
//! `sum(revenue)`, so both policies operate on the portion of the input
//! after the last comma and see through a call wrapper.

use dataq_core::config::TypeaheadConfig;

/// Result of applying a completion: the new field text and, when the text
/// still contains an empty call, the cursor position inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The replacement field text.
    pub text: String,
    /// Cursor position to move to, when an empty call remains.
    pub cursor: Option<usize>,
}

/// Extract the term to match against: the input after its last comma,
/// lowercased, with a leading call wrapper and a closing paren removed.
#[must_use]
pub fn search_term(input: &str) -> String {
    let tail = input.rsplit(',').next().unwrap_or("");
    let mut term = strip_call_wrapper(&tail.to_lowercase());
    term = term.replacen(')', "", 1);
    term.trim().to_string()
}

/// Returns true when the candidate matches the input's search term.
///
/// An empty term matches nothing; otherwise matching is case-insensitive
/// substring containment.
#[must_use]
pub fn matches(candidate: &str, input: &str) -> bool {
    let term = search_term(input);
    if term.is_empty() {
        return false;
    }
    candidate.to_lowercase().contains(&term)
}

/// Offer suggestions for the current input.
#[must_use]
pub fn suggest(candidates: &[String], input: &str, config: &TypeaheadConfig) -> Vec<String> {
    if input.chars().count() < config.min_length {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|candidate| matches(candidate, input))
        .take(config.max_items)
        .cloned()
        .collect()
}

/// Apply a chosen suggestion to the current field text.
///
/// When the post-comma tail ends in a parenthesized term (`name(term)`),
/// the chosen item replaces the term inside the call; otherwise the item is
/// appended after the last comma, space-separated. When the resulting text
/// still contains an empty call past the start, the cursor is placed inside
/// it so the user can keep typing there.
#[must_use]
pub fn complete(current: &str, item: &str) -> Completion {
    let item = item.trim();
    let tail = current.rsplit(',').next().unwrap_or("");

    let text = if tail_ends_with_call(tail) {
        let keep = tail.find('(').map_or(tail.len(), |i| i + 1);
        let rewritten = format!("{}{item})", &tail[..keep]);
        current.replacen(tail, &rewritten, 1)
    } else {
        let keep = current.rfind(',').map_or(0, |i| i + 1);
        format!("{} {item}", &current[..keep]).trim().to_string()
    };

    let cursor = match text.rfind("()") {
        Some(index) if index > 0 => Some(index + 1),
        _ => None,
    };

    Completion { text, cursor }
}

/// Remove the first `name(` call wrapper from a term, when present.
fn strip_call_wrapper(term: &str) -> String {
    let bytes = term.as_bytes();
    for (index, &byte) in bytes.iter().enumerate() {
        if byte != b'(' {
            continue;
        }
        let mut start = index;
        while start > 0 && bytes[start - 1].is_ascii_alphabetic() {
            start -= 1;
        }
        if start < index {
            return format!("{}{}", &term[..start], &term[index + 1..]);
        }
    }
    term.to_string()
}

/// Returns true when the tail ends with a parenthesized term: an opening
/// paren, one or more lowercase letters, and the closing paren last.
fn tail_ends_with_call(tail: &str) -> bool {
    let bytes = tail.as_bytes();
    if bytes.len() < 3 || bytes[bytes.len() - 1] != b')' {
        return false;
    }
    let mut letters = 0usize;
    for &byte in bytes[..bytes.len() - 1].iter().rev() {
        if byte.is_ascii_lowercase() {
            letters += 1;
        } else if byte == b'(' {
            return letters >= 1;
        } else {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn search_term_uses_portion_after_last_comma() {
        assert_eq!(search_term("region, rev"), "rev");
        assert_eq!(search_term("rev"), "rev");
    }

    #[test]
    fn search_term_lowercases() {
        assert_eq!(search_term("REV"), "rev");
    }

    #[test]
    fn search_term_strips_call_wrapper() {
        assert_eq!(search_term("sum(rev"), "rev");
        assert_eq!(search_term("region, sum(rev)"), "rev");
        assert_eq!(search_term("AVG(price"), "price");
    }

    #[test]
    fn search_term_trims_whitespace() {
        assert_eq!(search_term("region,  rev "), "rev");
    }

    #[test]
    fn search_term_empty_tail() {
        assert_eq!(search_term(""), "");
        assert_eq!(search_term("region,"), "");
        assert_eq!(search_term("sum("), "");
    }

    #[test]
    fn matcher_sees_through_call_wrapper() {
        // Tail "sum(rev" strips to the term "rev", which matches "revenue".
        assert!(matches("revenue", "sum(rev"));
    }

    #[test]
    fn matcher_is_case_insensitive() {
        assert!(matches("Revenue", "REV"));
        assert!(matches("revenue", "Rev"));
    }

    #[test]
    fn matcher_empty_term_matches_nothing() {
        assert!(!matches("revenue", ""));
        assert!(!matches("revenue", "region,"));
        assert!(!matches("revenue", "   "));
    }

    #[test]
    fn matcher_requires_substring() {
        assert!(!matches("revenue", "cost"));
        assert!(matches("gross_revenue", "revenue"));
    }

    #[test]
    fn suggest_respects_max_items() {
        let config = TypeaheadConfig::new().with_max_items(2);
        let all = candidates(&["aa", "ab", "ac", "ad"]);
        assert_eq!(suggest(&all, "a", &config), candidates(&["aa", "ab"]));
    }

    #[test]
    fn suggest_respects_min_length() {
        let config = TypeaheadConfig::new().with_min_length(2);
        let all = candidates(&["revenue"]);
        assert!(suggest(&all, "r", &config).is_empty());
        assert_eq!(suggest(&all, "re", &config), candidates(&["revenue"]));
    }

    #[test]
    fn suggest_sees_through_call_wrapper() {
        let config = TypeaheadConfig::default();
        let all = candidates(&["revenue", "region", "cost"]);
        assert_eq!(
            suggest(&all, "region, sum(re", &config),
            candidates(&["revenue", "region"])
        );
    }

    #[test]
    fn complete_rewrites_parenthesized_tail_in_place() {
        let completion = complete("sum(rev)", "revenue");
        assert_eq!(completion.text, "sum(revenue)");
        assert_eq!(completion.cursor, None);
    }

    #[test]
    fn complete_rewrites_only_the_tail_call() {
        let completion = complete("region, avg(pri)", "price");
        assert_eq!(completion.text, "region, avg(price)");
    }

    #[test]
    fn complete_appends_after_last_comma() {
        let completion = complete("region,", "revenue");
        assert_eq!(completion.text, "region, revenue");
    }

    #[test]
    fn complete_replaces_partial_tail() {
        let completion = complete("region, rev", "revenue");
        assert_eq!(completion.text, "region, revenue");
    }

    #[test]
    fn complete_on_empty_input_is_the_item() {
        let completion = complete("", "revenue");
        assert_eq!(completion.text, "revenue");
        assert_eq!(completion.cursor, None);
    }

    #[test]
    fn complete_trims_the_item() {
        let completion = complete("region,", "  revenue  ");
        assert_eq!(completion.text, "region, revenue");
    }

    #[test]
    fn complete_places_cursor_inside_remaining_empty_call() {
        let completion = complete("region,", "sum()");
        assert_eq!(completion.text, "region, sum()");
        // Cursor lands between the parens.
        assert_eq!(completion.cursor, Some(completion.text.len() - 1));
    }

    #[test]
    fn complete_ignores_empty_call_at_the_start() {
        let completion = complete("", "()");
        assert_eq!(completion.text, "()");
        assert_eq!(completion.cursor, None);
    }
}
