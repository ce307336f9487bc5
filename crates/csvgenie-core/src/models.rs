//! Core data models used throughout Csvgenie.
//!
//! These types represent the catalog entries, order lines, match
//! candidates, and classified items that flow through the matching
//! pipeline.

use serde::{Deserialize, Serialize};

/// One sellable product definition from the catalog.
///
/// Entries are immutable after catalog load; `code` is unique within a
/// catalog (enforced by [`CatalogIndex::build`](crate::catalog::CatalogIndex::build)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique item identifier (e.g. `"A1"`, `"10000000000001"`).
    pub code: String,
    /// Human-readable product name.
    pub name: String,
    /// Product category; `"General"` when the source provides none.
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "General".to_string()
}

/// One raw line of order text, numbered for traceability.
///
/// Line numbers are 1-based positions in the original input, assigned
/// before blank lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub raw_text: String,
    pub line_number: usize,
}

/// The result of quantity extraction on one [`OrderLine`].
///
/// `quantity` is always `> 0`; a missing or unusable leading token is a
/// normal case and defaults to `1.0`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub quantity: f64,
    pub description: String,
}

/// A matching strategy that fired for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Whole description is a substring of the entry name/code, or vice versa.
    Substring,
    /// Every description word appears in the entry name, code, or category.
    AllWords,
    /// Some description word is a prefix of an entry-name word.
    Prefix,
    /// Some description word appears in the entry-name acronym.
    Acronym,
    /// Some description word has character-overlap similarity with a name word.
    Fuzzy,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Substring => "substring",
            MatchStrategy::AllWords => "all_words",
            MatchStrategy::Prefix => "prefix",
            MatchStrategy::Acronym => "acronym",
            MatchStrategy::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored candidate produced for one description.
///
/// Transient: consumed immediately by the classifier or shown as a
/// ranked suggestion list; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub entry: CatalogEntry,
    /// Raw additive relevance score (unbounded; used for ranking).
    pub raw_score: f64,
    /// Score normalized to `[0.0, 1.0]` (used for threshold decisions).
    pub similarity: f64,
    /// Strategies that fired, in strategy order.
    pub strategies: Vec<MatchStrategy>,
    /// Catalog load-order position; tie-break of last resort.
    #[serde(skip)]
    pub(crate) ordinal: usize,
}

/// Coarse certainty bucket attached to every mapped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// Entered or promoted by a human; bypassed matching entirely.
    Manual,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Manual => "manual",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a line could not be mapped to a catalog entry.
///
/// These are first-class outcomes, not errors: every unmapped item is
/// recoverable by human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmappedReason {
    NoCandidate,
    BelowThreshold,
    Ambiguous,
}

impl UnmappedReason {
    /// Human-readable explanation for review screens.
    pub fn message(&self) -> &'static str {
        match self {
            UnmappedReason::NoCandidate => "no catalog entry matched",
            UnmappedReason::BelowThreshold => "best match scored below the acceptance floor",
            UnmappedReason::Ambiguous => "two or more entries matched equally well",
        }
    }
}

impl std::fmt::Display for UnmappedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnmappedReason::NoCandidate => f.write_str("NO_CANDIDATE"),
            UnmappedReason::BelowThreshold => f.write_str("BELOW_THRESHOLD"),
            UnmappedReason::Ambiguous => f.write_str("AMBIGUOUS"),
        }
    }
}

/// A successfully classified order line, ready for export.
///
/// Created once by the classifier (or by [`MappedItem::manual`]); the
/// engine never mutates it afterwards. A human reviewer may edit it
/// before export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedItem {
    pub original_text: String,
    pub item_code: String,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub confidence: Confidence,
    /// Normalized similarity in `[0.0, 1.0]`; `1.0` for manual items.
    pub similarity_score: f64,
}

impl MappedItem {
    /// Build a manually entered item, bypassing the matcher and scorer.
    pub fn manual(original_text: &str, entry: &CatalogEntry, quantity: f64) -> Self {
        MappedItem {
            original_text: original_text.to_string(),
            item_code: entry.code.clone(),
            item_name: entry.name.clone(),
            category: entry.category.clone(),
            quantity,
            confidence: Confidence::Manual,
            similarity_score: 1.0,
        }
    }
}

/// An order line the classifier declined to map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmappedItem {
    pub original_text: String,
    /// 1-based line number in the original order text.
    pub original_line: usize,
    pub quantity: Option<f64>,
    pub reason: UnmappedReason,
}

impl UnmappedItem {
    /// Promote this item to a [`MappedItem`] after a human picked
    /// `entry` from a fresh candidate search.
    ///
    /// This is the only path from unmapped to mapped; the engine never
    /// reclassifies on its own. The result carries
    /// [`Confidence::Manual`] and a similarity of `1.0`.
    pub fn promote(&self, entry: &CatalogEntry) -> MappedItem {
        MappedItem {
            original_text: self.original_text.clone(),
            item_code: entry.code.clone(),
            item_name: entry.name.clone(),
            category: entry.category.clone(),
            quantity: self.quantity.unwrap_or(1.0),
            confidence: Confidence::Manual,
            similarity_score: 1.0,
        }
    }
}

/// The result of processing one whole order.
///
/// Both item sequences preserve original line order. Owned by the order
/// processor while it runs, then handed off whole to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    pub mapped: Vec<MappedItem>,
    pub unmapped: Vec<UnmappedItem>,
    /// Non-blank lines processed.
    pub total_lines: usize,
    pub mapped_count: usize,
    pub unmapped_count: usize,
    pub processing_time_ms: f64,
}
