//! Order processing orchestration.
//!
//! Runs the full pipeline (split, parse, match, score, classify) over
//! every line of an order and assembles the [`OrderReport`]. A single
//! line never aborts the batch: anything that cannot be mapped becomes
//! an [`UnmappedItem`](crate::models::UnmappedItem). Only catalog
//! unavailability fails the whole operation.
//!
//! The processor holds an `Arc` snapshot of the catalog index, so a
//! concurrent reload elsewhere never changes the catalog mid-batch:
//! one `process` call sees exactly one index.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::CatalogIndex;
use crate::classify::{classify, Classified, ClassifyPolicy};
use crate::error::ProcessError;
use crate::models::{MatchCandidate, OrderReport};
use crate::parse::{parse_line, split_order_lines};
use crate::score::{rank, ScoreWeights};

/// All matching and classification tuning in one place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchConfig {
    pub weights: ScoreWeights,
    pub policy: ClassifyPolicy,
}

/// Processes whole orders against one catalog snapshot.
pub struct OrderProcessor {
    index: Arc<CatalogIndex>,
    config: MatchConfig,
}

impl OrderProcessor {
    pub fn new(index: Arc<CatalogIndex>, config: MatchConfig) -> Self {
        OrderProcessor { index, config }
    }

    /// Process raw order text into a report.
    ///
    /// Fails only with [`ProcessError::CatalogUnavailable`] when the
    /// catalog snapshot is empty; refusing beats silently matching
    /// against nothing. Both report sequences preserve original line
    /// order.
    pub fn process(&self, raw_text: &str) -> Result<OrderReport, ProcessError> {
        if self.index.is_empty() {
            return Err(ProcessError::CatalogUnavailable);
        }

        let started = Instant::now();
        let lines = split_order_lines(raw_text);
        let total_lines = lines.len();

        let mut mapped = Vec::new();
        let mut unmapped = Vec::new();

        for line in &lines {
            let parsed = parse_line(&line.raw_text);
            let candidates = rank(&self.index, &parsed.description, &self.config.weights);
            match classify(line, &parsed, &candidates, &self.config.policy) {
                Classified::Mapped(item) => {
                    tracing::debug!(
                        line = line.line_number,
                        code = %item.item_code,
                        confidence = %item.confidence,
                        similarity = item.similarity_score,
                        "line mapped"
                    );
                    mapped.push(item);
                }
                Classified::Unmapped(item) => {
                    tracing::debug!(
                        line = line.line_number,
                        reason = %item.reason,
                        "line unmapped"
                    );
                    unmapped.push(item);
                }
            }
        }

        let report = OrderReport {
            mapped_count: mapped.len(),
            unmapped_count: unmapped.len(),
            mapped,
            unmapped,
            total_lines,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        tracing::info!(
            lines = report.total_lines,
            mapped = report.mapped_count,
            unmapped = report.unmapped_count,
            "order processed"
        );
        Ok(report)
    }

    /// Ranked candidates for an ad-hoc query, capped at `limit`.
    ///
    /// Backs user-driven catalog search: manual entry and the explicit
    /// promotion of an unmapped item after a human picks a candidate.
    pub fn search(&self, query: &str, limit: usize) -> Vec<MatchCandidate> {
        search(&self.index, query, &self.config.weights, limit)
    }
}

/// Free-standing candidate search against any index snapshot.
pub fn search(
    index: &CatalogIndex,
    query: &str,
    weights: &ScoreWeights,
    limit: usize,
) -> Vec<MatchCandidate> {
    let mut candidates = rank(index, query, weights);
    candidates.truncate(limit);
    candidates
}
