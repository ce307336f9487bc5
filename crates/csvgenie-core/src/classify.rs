//! Mapped/unmapped classification policy.
//!
//! Takes the ranked candidates for one parsed line and decides the
//! terminal outcome: a [`MappedItem`] carrying the winning entry and a
//! confidence tier, or an [`UnmappedItem`] carrying the reason. The
//! thresholds live in [`ClassifyPolicy`]; they are domain-tunable, not
//! hard-coded.
//!
//! The classifier never guesses between near-equal candidates: when the
//! top two scores sit within `ambiguity_epsilon` of each other and both
//! clear the floor, the line is surfaced for human resolution instead.

use serde::{Deserialize, Serialize};

use crate::models::{
    Confidence, MappedItem, MatchCandidate, OrderLine, ParsedLine, UnmappedItem, UnmappedReason,
};

/// Confidence thresholds and the ambiguity margin.
///
/// Invariant expected by [`classify`]: `0 ≤ floor ≤ medium ≤ high ≤ 1`
/// and `ambiguity_epsilon ≥ 0`. The application validates user-supplied
/// values before building a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyPolicy {
    /// Minimum normalized similarity to accept a match at all.
    pub floor: f64,
    /// Similarity at or above this is MEDIUM confidence.
    pub medium: f64,
    /// Similarity at or above this is HIGH confidence.
    pub high: f64,
    /// Top-two similarity gap below which the line is ambiguous.
    pub ambiguity_epsilon: f64,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        ClassifyPolicy {
            floor: 0.25,
            medium: 0.5,
            high: 0.85,
            ambiguity_epsilon: 0.05,
        }
    }
}

impl ClassifyPolicy {
    /// Confidence tier for a normalized similarity at or above the floor.
    pub fn tier(&self, similarity: f64) -> Confidence {
        if similarity >= self.high {
            Confidence::High
        } else if similarity >= self.medium {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// The terminal classification of one order line.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Mapped(MappedItem),
    Unmapped(UnmappedItem),
}

/// Apply the confidence policy to ranked candidates.
///
/// `candidates` must be sorted by score descending (as produced by
/// [`rank`](crate::score::rank)). Every outcome here is a normal
/// result, never an error.
pub fn classify(
    line: &OrderLine,
    parsed: &ParsedLine,
    candidates: &[MatchCandidate],
    policy: &ClassifyPolicy,
) -> Classified {
    let top = match candidates.first() {
        Some(top) => top,
        None => return unmapped(line, parsed, UnmappedReason::NoCandidate),
    };

    if top.similarity < policy.floor {
        return unmapped(line, parsed, UnmappedReason::BelowThreshold);
    }

    if let Some(second) = candidates.get(1) {
        let within_epsilon = top.similarity - second.similarity < policy.ambiguity_epsilon;
        if within_epsilon && second.similarity >= policy.floor {
            return unmapped(line, parsed, UnmappedReason::Ambiguous);
        }
    }

    Classified::Mapped(MappedItem {
        original_text: line.raw_text.clone(),
        item_code: top.entry.code.clone(),
        item_name: top.entry.name.clone(),
        category: top.entry.category.clone(),
        quantity: parsed.quantity,
        confidence: policy.tier(top.similarity),
        similarity_score: top.similarity,
    })
}

fn unmapped(line: &OrderLine, parsed: &ParsedLine, reason: UnmappedReason) -> Classified {
    Classified::Unmapped(UnmappedItem {
        original_text: line.raw_text.clone(),
        original_line: line.line_number,
        quantity: Some(parsed.quantity),
        reason,
    })
}
