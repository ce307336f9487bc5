//! Relevance scoring and candidate ranking.
//!
//! The score is a pure, deterministic, additive function of the
//! description, the entry, and the strategies that fired. Raw scores
//! are used for ranking; for threshold decisions each raw score is
//! normalized to `[0, 1]` against the description's *reference score*,
//! the raw score an ideal exact-match entry would earn. Normalizing
//! against a fixed reference (rather than min–max over the candidate
//! set) keeps the below-floor outcome reachable even when only one
//! candidate exists.
//!
//! # Composition
//!
//! - full description is a substring of the entry name: `full_name`;
//!   of the code: `full_code`.
//! - per description word: `word_name` / `word_code` / `word_category`
//!   for a substring hit on that field, plus `word_prefix` when the
//!   word is a prefix of a name word. A word with no exact name hit
//!   contributes `word_name × overlap` when its best character-overlap
//!   similarity clears the fuzzy threshold, so fuzzy-only candidates
//!   still rank above noise.
//! - `acronym` once if the acronym strategy fired.
//! - a length bonus `max(0, length_bonus_max − name_chars/length_penalty_divisor)`
//!   favoring shorter, more specific names when other signals tie.
//!
//! Ties in the final ranking are broken by catalog load order.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogIndex, EntryNorm};
use crate::matcher::{self, best_overlap, Query};
use crate::models::{MatchCandidate, MatchStrategy};

/// Strategy weights and the fuzzy threshold, as one named, tunable
/// configuration passed into the scorer instead of embedded literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Full description substring-matches the entry name.
    pub full_name: f64,
    /// Full description substring-matches the entry code.
    pub full_code: f64,
    /// One description word substring-matches the name.
    pub word_name: f64,
    /// One description word substring-matches the code.
    pub word_code: f64,
    /// One description word substring-matches the category.
    pub word_category: f64,
    /// One description word is a prefix of a name word.
    pub word_prefix: f64,
    /// The acronym strategy fired.
    pub acronym: f64,
    /// Ceiling of the short-name bonus.
    pub length_bonus_max: f64,
    /// Name characters per point deducted from the length bonus.
    pub length_penalty_divisor: f64,
    /// Minimum character-overlap similarity for a fuzzy word hit.
    pub fuzzy_threshold: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            full_name: 100.0,
            full_code: 90.0,
            word_name: 50.0,
            word_code: 45.0,
            word_category: 30.0,
            word_prefix: 20.0,
            acronym: 40.0,
            length_bonus_max: 20.0,
            length_penalty_divisor: 10.0,
            fuzzy_threshold: 0.7,
        }
    }
}

/// Raw additive relevance of `entry` for the query.
///
/// Pure: identical inputs always produce the identical score, with no
/// dependency on call order or prior calls.
pub(crate) fn score_entry(
    query: &Query,
    norm: &EntryNorm,
    strategies: &[MatchStrategy],
    weights: &ScoreWeights,
) -> f64 {
    let mut score = 0.0;

    if !query.lower.is_empty() {
        if norm.name.contains(&query.lower) {
            score += weights.full_name;
        }
        if !norm.code.is_empty() && norm.code.contains(&query.lower) {
            score += weights.full_code;
        }
    }

    for word in &query.words {
        let word = word.as_str();
        let name_hit = norm.name.contains(word);
        if name_hit {
            score += weights.word_name;
        }
        if !norm.code.is_empty() && norm.code.contains(word) {
            score += weights.word_code;
        }
        if !norm.category.is_empty() && norm.category.contains(word) {
            score += weights.word_category;
        }
        if norm.name_words.iter().any(|nw| nw.starts_with(word)) {
            score += weights.word_prefix;
        }
        if !name_hit {
            let overlap = best_overlap(word, &norm.name_words);
            if overlap >= weights.fuzzy_threshold {
                score += weights.word_name * overlap;
            }
        }
    }

    if strategies.contains(&MatchStrategy::Acronym) {
        score += weights.acronym;
    }

    score + length_bonus(norm.name.chars().count(), weights)
}

/// Short-name bonus: `max(0, length_bonus_max − name_chars/divisor)`.
fn length_bonus(name_chars: usize, weights: &ScoreWeights) -> f64 {
    if weights.length_penalty_divisor <= 0.0 {
        return 0.0;
    }
    (weights.length_bonus_max - name_chars as f64 / weights.length_penalty_divisor).max(0.0)
}

/// The raw score an ideal exact-match entry would earn for this query:
/// every word hits the name and prefixes a name word, plus the maximum
/// length bonus. Denominator for score normalization.
pub(crate) fn reference_score(query: &Query, weights: &ScoreWeights) -> f64 {
    let words = query.words.len().max(1) as f64;
    words * (weights.word_name + weights.word_prefix) + weights.length_bonus_max
}

/// Normalize a raw score to `[0, 1]` against the query's reference
/// score. Monotonic in `raw` for a fixed query.
pub(crate) fn normalize(raw: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    (raw / reference).clamp(0.0, 1.0)
}

/// Match, score, and rank every candidate for a description.
///
/// Returns candidates sorted by raw score descending; equal scores keep
/// catalog load order (stable tie-break of last resort).
pub fn rank(index: &CatalogIndex, description: &str, weights: &ScoreWeights) -> Vec<MatchCandidate> {
    let query = Query::new(description);
    let reference = reference_score(&query, weights);

    let mut candidates: Vec<MatchCandidate> =
        matcher::match_description(index, &query, weights.fuzzy_threshold)
            .into_iter()
            .map(|m| {
                let raw = score_entry(&query, index.norm(m.entry_index), &m.strategies, weights);
                MatchCandidate {
                    entry: index.all_entries()[m.entry_index].clone(),
                    raw_score: raw,
                    similarity: normalize(raw, reference),
                    strategies: m.strategies,
                    ordinal: m.entry_index,
                }
            })
            .collect();

    candidates.sort_by(|a, b| {
        b.raw_score
            .partial_cmp(&a.raw_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.ordinal.cmp(&b.ordinal))
    });

    candidates
}
