//! Matrix selection
//!
//! Walks the configured data types in order, searches the catalog index
//! for each, filters out non-square and denylisted entries, and optionally
//! truncates the accumulated set to a reproducible sample.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::config::{RunConfig, MAX_CANDIDATES};
use crate::index::CatalogIndex;
use crate::types::{CatalogEntry, Dtype};

/// Per-dtype selection report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtypeReport {
    /// Data type this report covers
    pub dtype: Dtype,

    /// Number of raw candidates the search returned
    pub candidates: usize,

    /// Number of candidates rejected (non-square or denylisted)
    pub removed: usize,
}

/// Result of one selection run
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Accepted entries, in acceptance order
    pub entries: Vec<CatalogEntry>,

    /// One report per configured dtype, in configuration order
    pub reports: Vec<DtypeReport>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Select matrices from the index according to the run configuration.
///
/// Zero matches is not an error; the empty selection is reported as such.
pub fn select_matrices(index: &CatalogIndex, config: &RunConfig) -> Selection {
    // One generator for the whole run, so every dtype's shuffle draws from
    // the same seeded sequence and the combined selection is reproducible.
    let mut rng = config.sample.map(|s| StdRng::seed_from_u64(s.seed));
    let target = config.sample.map(|s| s.size);

    let mut selection = Selection::default();
    let mut seen_ids: HashSet<u32> = HashSet::new();

    for &dtype in &config.dtypes {
        let nnz_bounds = config.max_nnz.map(|hi| (0, hi));
        let mut candidates = index.search(dtype, nnz_bounds, MAX_CANDIDATES);
        info!("{} matrices: {}", dtype, candidates.len());

        if let Some(rng) = rng.as_mut() {
            candidates.shuffle(rng);
        }

        let mut removed = 0usize;
        let total = candidates.len();

        for entry in candidates {
            // The cap is cumulative across dtypes, first match wins
            if let Some(target) = target {
                if selection.entries.len() == target {
                    break;
                }
            }

            if !entry.is_square() || entry.is_denylisted() {
                removed += 1;
            } else if seen_ids.insert(entry.id) {
                selection.entries.push(entry);
            }
        }

        info!("\tRemoved {} non-square {} matrices", removed, dtype);
        selection.reports.push(DtypeReport {
            dtype,
            candidates: total,
            removed,
        });
    }

    info!("Total matrices in the set: {}", selection.len());
    selection
}
