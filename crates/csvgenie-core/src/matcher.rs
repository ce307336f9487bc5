//! Multi-strategy catalog matching.
//!
//! Five independent strategies decide whether a catalog entry is a
//! candidate for a description. They all run unconditionally and their
//! results are unioned: an entry qualifies by satisfying any one, and
//! the scorer receives the full list of strategies that fired. All
//! comparisons are case-insensitive over Unicode-lowercased text.
//!
//! # Strategies
//!
//! | Strategy | Fires when |
//! |----------|------------|
//! | Substring | the whole description is a substring of the entry name or code, or vice versa |
//! | All-words | every description word appears somewhere in the name, code, or category |
//! | Prefix | some description word is a prefix of some entry-name word |
//! | Acronym | some description word appears in the entry-name acronym |
//! | Fuzzy | some description word has character-overlap similarity ≥ the threshold against a name word |
//!
//! All-words matching is word-order independent by construction: the
//! candidate set for `"red apple"` equals the candidate set for
//! `"apple red"`.
//!
//! The fuzzy metric is a cheap overlap heuristic, not edit distance:
//! `similarity(a, b)` counts how many characters of the shorter string
//! occur anywhere in the longer, divided by the longer's length. It
//! tolerates single-character typos and plural variants but not
//! transpositions. Kept as-is for compatibility; a bounded
//! edit-distance metric is the obvious replacement candidate.

use crate::catalog::CatalogIndex;
use crate::models::MatchStrategy;

/// A description lowercased and tokenized once, shared by the matcher
/// and the scorer.
#[derive(Debug, Clone)]
pub struct Query {
    pub lower: String,
    pub words: Vec<String>,
}

impl Query {
    pub fn new(description: &str) -> Self {
        let lower = description.trim().to_lowercase();
        let words = lower.split_whitespace().map(str::to_string).collect();
        Query { lower, words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A catalog entry that satisfied at least one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyMatch {
    /// Position of the entry in catalog load order.
    pub entry_index: usize,
    /// Strategies that fired, in strategy order, deduplicated.
    pub strategies: Vec<MatchStrategy>,
}

/// Collect every catalog entry that satisfies at least one strategy.
///
/// Results are deduplicated by entry and returned in catalog load
/// order. An empty description matches nothing.
pub fn match_description(
    index: &CatalogIndex,
    query: &Query,
    fuzzy_threshold: f64,
) -> Vec<StrategyMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for entry_index in 0..index.len() {
        let norm = index.norm(entry_index);
        let mut strategies = Vec::new();

        if substring_matches(query, &norm.name, &norm.code) {
            strategies.push(MatchStrategy::Substring);
        }
        if all_words_match(query, &norm.name, &norm.code, &norm.category) {
            strategies.push(MatchStrategy::AllWords);
        }
        if prefix_matches(query, &norm.name_words) {
            strategies.push(MatchStrategy::Prefix);
        }
        if acronym_matches(query, &norm.acronym) {
            strategies.push(MatchStrategy::Acronym);
        }
        if fuzzy_matches(query, &norm.name_words, fuzzy_threshold) {
            strategies.push(MatchStrategy::Fuzzy);
        }

        if !strategies.is_empty() {
            matches.push(StrategyMatch {
                entry_index,
                strategies,
            });
        }
    }
    matches
}

/// Whole description against whole name/code, both directions.
fn substring_matches(query: &Query, name: &str, code: &str) -> bool {
    let q = query.lower.as_str();
    if !name.is_empty() && (name.contains(q) || q.contains(name)) {
        return true;
    }
    !code.is_empty() && (code.contains(q) || q.contains(code))
}

/// Every description word appears somewhere in name, code, or category.
fn all_words_match(query: &Query, name: &str, code: &str, category: &str) -> bool {
    query.words.iter().all(|w| {
        let w = w.as_str();
        name.contains(w) || code.contains(w) || category.contains(w)
    })
}

/// Some description word is a prefix of some entry-name word.
fn prefix_matches(query: &Query, name_words: &[String]) -> bool {
    query
        .words
        .iter()
        .any(|w| name_words.iter().any(|nw| nw.starts_with(w.as_str())))
}

/// Some description word appears inside the entry-name acronym.
fn acronym_matches(query: &Query, acronym: &str) -> bool {
    if acronym.is_empty() {
        return false;
    }
    query.words.iter().any(|w| acronym.contains(w.as_str()))
}

/// Some description word clears the character-overlap threshold against
/// some entry-name word.
fn fuzzy_matches(query: &Query, name_words: &[String], threshold: f64) -> bool {
    query
        .words
        .iter()
        .any(|w| name_words.iter().any(|nw| char_overlap(w, nw) >= threshold))
}

/// Character-overlap similarity between two words.
///
/// Counts the characters of the shorter word found anywhere in the
/// longer one, divided by the longer word's character length. The
/// longer word is always the denominator, which keeps the measure
/// symmetric. Occurrences are not consumed: repeated characters in the
/// shorter word each count if the longer contains that character at all.
pub fn char_overlap(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let longer_len = longer.chars().count();
    if longer_len == 0 {
        return 0.0;
    }
    let found = shorter.chars().filter(|&c| longer.contains(c)).count();
    found as f64 / longer_len as f64
}

/// Best overlap similarity of `word` against any of `name_words`.
pub(crate) fn best_overlap(word: &str, name_words: &[String]) -> f64 {
    name_words
        .iter()
        .map(|nw| char_overlap(word, nw))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    fn index(entries: &[(&str, &str, &str)]) -> CatalogIndex {
        CatalogIndex::build(
            entries
                .iter()
                .map(|(code, name, category)| CatalogEntry {
                    code: code.to_string(),
                    name: name.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        )
        .unwrap()
    }

    fn strategies_for(idx: &CatalogIndex, description: &str, entry: usize) -> Vec<MatchStrategy> {
        match_description(idx, &Query::new(description), 0.7)
            .into_iter()
            .find(|m| m.entry_index == entry)
            .map(|m| m.strategies)
            .unwrap_or_default()
    }

    #[test]
    fn test_substring_description_in_name() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(strategies_for(&idx, "red app", 0).contains(&MatchStrategy::Substring));
    }

    #[test]
    fn test_substring_name_in_description() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(strategies_for(&idx, "fresh red apple please", 0).contains(&MatchStrategy::Substring));
    }

    #[test]
    fn test_substring_against_code() {
        let idx = index(&[("MILK01", "Whole Milk", "Dairy")]);
        assert!(strategies_for(&idx, "milk01", 0).contains(&MatchStrategy::Substring));
    }

    #[test]
    fn test_substring_soundness_over_whole_catalog() {
        let idx = index(&[
            ("A1", "Red Apple", "Produce"),
            ("B2", "Whole Milk", "Dairy"),
            ("C3", "Apple Juice Concentrate", "Beverages"),
        ]);
        // Whenever the lowercase description is a substring of an entry
        // name, that entry must be in the candidate set.
        let description = "apple";
        let matched: Vec<usize> = match_description(&idx, &Query::new(description), 0.7)
            .into_iter()
            .map(|m| m.entry_index)
            .collect();
        for (i, e) in idx.all_entries().iter().enumerate() {
            if e.name.to_lowercase().contains(description) {
                assert!(matched.contains(&i), "entry {} missing", e.code);
            }
        }
    }

    #[test]
    fn test_all_words_any_order() {
        let idx = index(&[
            ("A1", "Organic Red Apple", "Produce"),
            ("B2", "Whole Milk", "Dairy"),
        ]);
        // Same word set, either order: same matched entries. Strategy
        // lists may differ (substring sees the raw phrase).
        let entries = |d: &str| -> Vec<usize> {
            match_description(&idx, &Query::new(d), 0.7)
                .into_iter()
                .map(|m| m.entry_index)
                .collect()
        };
        assert_eq!(entries("red apple"), entries("apple red"));
        assert_eq!(entries("red apple"), vec![0]);
    }

    #[test]
    fn test_all_words_spans_fields() {
        // "a1" only matches the code, "produce" only the category.
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(strategies_for(&idx, "a1 produce", 0).contains(&MatchStrategy::AllWords));
    }

    #[test]
    fn test_all_words_requires_every_word() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(!strategies_for(&idx, "red dragonfruit", 0).contains(&MatchStrategy::AllWords));
    }

    #[test]
    fn test_prefix_on_name_word() {
        let idx = index(&[("B2", "Bananas", "Produce")]);
        assert!(strategies_for(&idx, "ban", 0).contains(&MatchStrategy::Prefix));
    }

    #[test]
    fn test_acronym() {
        let idx = index(&[("P1", "Peanut Butter Jar", "Pantry")]);
        assert!(strategies_for(&idx, "pbj", 0).contains(&MatchStrategy::Acronym));
        assert!(strategies_for(&idx, "pb", 0).contains(&MatchStrategy::Acronym));
    }

    #[test]
    fn test_fuzzy_tolerates_plural() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(strategies_for(&idx, "apples", 0).contains(&MatchStrategy::Fuzzy));
    }

    #[test]
    fn test_fuzzy_tolerates_single_typo() {
        let idx = index(&[("B2", "Whole Milk", "Dairy")]);
        // "milkk" vs "milk": all 4 chars of "milk" occur in "milkk", 4/5 = 0.8
        assert!(strategies_for(&idx, "milkk", 0).contains(&MatchStrategy::Fuzzy));
    }

    #[test]
    fn test_no_match_is_empty() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(match_description(&idx, &Query::new("xyzzy"), 0.7).is_empty());
    }

    #[test]
    fn test_empty_description_matches_nothing() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        assert!(match_description(&idx, &Query::new("   "), 0.7).is_empty());
    }

    #[test]
    fn test_dedup_by_entry_with_union_of_strategies() {
        let idx = index(&[("A1", "Red Apple", "Produce")]);
        let matches = match_description(&idx, &Query::new("red apple"), 0.7);
        assert_eq!(matches.len(), 1);
        let strategies = &matches[0].strategies;
        assert!(strategies.contains(&MatchStrategy::Substring));
        assert!(strategies.contains(&MatchStrategy::AllWords));
        assert!(strategies.contains(&MatchStrategy::Prefix));
    }

    #[test]
    fn test_char_overlap_denominator_is_longer() {
        // shorter "apple" against longer "apples": 5 of 6 chars covered.
        assert!((char_overlap("apple", "apples") - 5.0 / 6.0).abs() < 1e-9);
        // symmetric
        assert_eq!(char_overlap("apple", "apples"), char_overlap("apples", "apple"));
    }

    #[test]
    fn test_char_overlap_no_shared_chars() {
        assert_eq!(char_overlap("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_char_overlap_unicode_chars() {
        // counted in characters, not bytes
        assert!((char_overlap("über", "uber") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_candidates_in_load_order() {
        let idx = index(&[
            ("Z9", "Apple Strudel", "Bakery"),
            ("A1", "Red Apple", "Produce"),
        ]);
        let matched: Vec<usize> = match_description(&idx, &Query::new("apple"), 0.7)
            .into_iter()
            .map(|m| m.entry_index)
            .collect();
        assert_eq!(matched, vec![0, 1]);
    }
}
