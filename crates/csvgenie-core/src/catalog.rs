//! Catalog index: the only shared, long-lived state in the engine.
//!
//! [`CatalogIndex::build`] takes the catalog entries exactly once,
//! rejects duplicate codes, and precomputes the lowercased text and
//! per-word token lists every matching strategy reads. After `build`
//! the index exposes no mutation API, so it is safe to share across
//! any number of concurrent matcher invocations without locking.
//!
//! [`SharedCatalog`] adds the reload lifecycle: a fresh index is built
//! off-lock and swapped in atomically, while readers in flight keep the
//! snapshot they loaded. A half-built index is never observable.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::CatalogError;
use crate::models::CatalogEntry;

/// Lowercased text and token lists derived from one [`CatalogEntry`],
/// built once at index construction.
#[derive(Debug, Clone)]
pub(crate) struct EntryNorm {
    pub name: String,
    pub code: String,
    pub category: String,
    pub name_words: Vec<String>,
    /// First character of each name word, concatenated.
    pub acronym: String,
}

impl EntryNorm {
    fn new(entry: &CatalogEntry) -> Self {
        let name = entry.name.to_lowercase();
        let name_words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        let acronym: String = name_words
            .iter()
            .filter_map(|w| w.chars().next())
            .collect();
        EntryNorm {
            name,
            code: entry.code.to_lowercase(),
            category: entry.category.to_lowercase(),
            name_words,
            acronym,
        }
    }
}

/// Read-only, queryable view of a loaded catalog.
///
/// Iteration order of [`all_entries`](CatalogIndex::all_entries) is the
/// load order, which also serves as the ranking tie-break of last
/// resort.
#[derive(Debug)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    norms: Vec<EntryNorm>,
    by_code: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Build an index from catalog entries, preserving their order.
    ///
    /// Fails with [`CatalogError::DuplicateCode`] if two entries share a
    /// code; nothing is partially built on failure.
    pub fn build(entries: Vec<CatalogEntry>) -> Result<CatalogIndex, CatalogError> {
        let mut by_code = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if by_code.insert(entry.code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCode {
                    code: entry.code.clone(),
                });
            }
        }
        let norms = entries.iter().map(EntryNorm::new).collect();
        Ok(CatalogIndex {
            entries,
            norms,
            by_code,
        })
    }

    /// Look up a single entry by its exact code.
    pub fn lookup_by_code(&self, code: &str) -> Option<&CatalogEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    /// All entries in load order.
    pub fn all_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn norm(&self, index: usize) -> &EntryNorm {
        &self.norms[index]
    }
}

/// Shared handle over the current [`CatalogIndex`] with an atomic
/// reload lifecycle.
///
/// `load` hands out an `Arc` snapshot; `reload` builds a replacement
/// index outside the lock and swaps the reference. Readers that loaded
/// the previous snapshot finish against it unchanged. A failed reload
/// (duplicate code) leaves the current index in place.
pub struct SharedCatalog {
    current: RwLock<Arc<CatalogIndex>>,
}

impl SharedCatalog {
    pub fn new(index: CatalogIndex) -> Self {
        SharedCatalog {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// Snapshot the current index. The returned `Arc` stays valid and
    /// internally consistent across any concurrent reload.
    pub fn load(&self) -> Arc<CatalogIndex> {
        self.current.read().unwrap().clone()
    }

    /// Replace the index with one built from `entries`.
    pub fn reload(&self, entries: Vec<CatalogEntry>) -> Result<(), CatalogError> {
        let next = Arc::new(CatalogIndex::build(entries)?);
        tracing::info!(entries = next.len(), "catalog reloaded");
        *self.current.write().unwrap() = next;
        Ok(())
    }
}
