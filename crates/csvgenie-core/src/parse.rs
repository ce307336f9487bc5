//! Order-line splitting and leading-quantity extraction.
//!
//! Raw order text arrives as free-form lines ("2 apples", "1.5 lb
//! flour", "bananas"). [`split_order_lines`] numbers the lines and
//! drops blanks; [`parse_line`] pulls a leading numeric token off the
//! front of each surviving line.
//!
//! A missing quantity is a normal case, not an error: the quantity
//! defaults to `1.0` and the line text becomes the description
//! unchanged. Unit words ("lb", "bottles") are kept in the description
//! rather than discarded; they carry matching signal.

use crate::models::{OrderLine, ParsedLine};

/// Split raw order text into numbered lines, dropping blank ones.
///
/// Line numbers are 1-based positions in the original text, assigned
/// before blanks are removed, so an unmapped item can always be traced
/// back to the exact input line.
pub fn split_order_lines(text: &str) -> Vec<OrderLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(OrderLine {
                    raw_text: trimmed.to_string(),
                    line_number: i + 1,
                })
            }
        })
        .collect()
}

/// Extract a candidate quantity and residual description from one line.
///
/// If the first whitespace-delimited token parses as a finite number
/// greater than zero, it becomes the quantity and the remainder the
/// description. Otherwise, including non-positive or non-numeric
/// tokens, the quantity is `1.0` and the trimmed text is the
/// description unchanged. A line that is only a number also falls back
/// to quantity `1.0` so the description is never empty.
pub fn parse_line(raw_text: &str) -> ParsedLine {
    let trimmed = raw_text.trim();

    if let Some((first, rest)) = split_first_token(trimmed) {
        if let Ok(quantity) = first.parse::<f64>() {
            if quantity.is_finite() && quantity > 0.0 && !rest.is_empty() {
                return ParsedLine {
                    quantity,
                    description: rest.to_string(),
                };
            }
        }
    }

    ParsedLine {
        quantity: 1.0,
        description: trimmed.to_string(),
    }
}

/// Split off the first whitespace-delimited token; the remainder is
/// trimmed of leading whitespace.
fn split_first_token(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next()?;
    if first.is_empty() {
        return None;
    }
    Some((first, parts.next().unwrap_or("").trim_start()))
}
