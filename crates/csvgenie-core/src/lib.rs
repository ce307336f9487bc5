//! # Csvgenie Core
//!
//! The catalog matching and ranking engine behind Csvgenie: data models,
//! the catalog index, order-line parsing, multi-strategy matching,
//! relevance scoring, and the mapped/unmapped classifier.
//!
//! This crate contains no file I/O, no configuration parsing, and no
//! terminal output. All inputs (order text, catalog entries, tuning
//! parameters) are supplied as plain values by the calling application,
//! and every pipeline stage after catalog construction is a pure
//! function of its inputs.
//!
//! # Pipeline
//!
//! 1. [`parse::split_order_lines`] turns raw order text into numbered
//!    [`models::OrderLine`]s, dropping blanks.
//! 2. [`parse::parse_line`] extracts a leading quantity and the residual
//!    description from each line.
//! 3. [`matcher::match_description`] collects every catalog entry that
//!    satisfies at least one matching strategy.
//! 4. [`score::rank`] scores and ranks the candidates, attaching a
//!    normalized similarity in `[0, 1]`.
//! 5. [`classify::classify`] applies the confidence policy and produces
//!    a [`models::MappedItem`] or [`models::UnmappedItem`].
//! 6. [`process::OrderProcessor`] runs stages 1–5 over a whole order and
//!    assembles the [`models::OrderReport`].

pub mod catalog;
pub mod classify;
pub mod error;
pub mod matcher;
pub mod models;
pub mod parse;
pub mod process;
pub mod score;
