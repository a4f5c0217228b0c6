//! Run configuration
//!
//! All selection knobs live in one immutable value built at startup,
//! replacing the module-level constants of the original download scripts.

use std::path::PathBuf;

use crate::types::Dtype;

/// Fixed maximum candidate count per catalog search.
pub const MAX_CANDIDATES: usize = 10_000;

/// Reproducible sampling parameters.
///
/// A seed is mandatory whenever sampling is requested, so two runs with
/// the same seed and the same index always select the same subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpec {
    /// Cap on the number of entries selected across all dtypes combined.
    pub size: usize,

    /// Pseudo-random generator seed for the candidate shuffle.
    pub seed: u64,
}

/// Process-wide constants fixed at start; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Data types to query, in order. Must be non-empty.
    pub dtypes: Vec<Dtype>,

    /// Optional inclusive upper bound on non-zero count. Absent = unbounded.
    pub max_nnz: Option<u64>,

    /// Optional reproducible sampling of the candidate set.
    pub sample: Option<SampleSpec>,

    /// Directory the fetched archives are extracted into.
    pub outdir: PathBuf,
}

impl RunConfig {
    /// Configuration matching the original "square set" run: every real
    /// and binary square matrix in the collection, no sampling.
    pub fn square_set(outdir: PathBuf) -> Self {
        Self {
            dtypes: vec![Dtype::Real, Dtype::Binary],
            max_nnz: None,
            sample: None,
            outdir,
        }
    }

    /// Configuration matching the original "small set" run: 100 real square
    /// matrices with at most 100k non-zeros, sampled with seed 0.
    pub fn small_set(outdir: PathBuf) -> Self {
        Self {
            dtypes: vec![Dtype::Real],
            max_nnz: Some(100_000),
            sample: Some(SampleSpec { size: 100, seed: 0 }),
            outdir,
        }
    }
}
