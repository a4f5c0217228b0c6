//! Catalog types - entries, data types, errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog ids excluded regardless of other filters.
///
/// Matrices 230 and 231 are skew-symmetric and unusable for the
/// square-real-matrix workloads this tool feeds.
pub const DENYLIST: [u32; 2] = [230, 231];

/// Root URL of the SuiteSparse collection.
pub const SS_ROOT_URL: &str = "https://sparse.tamu.edu";

/// ssget error types
#[derive(Debug, Error)]
pub enum SsgetError {
    #[error("Catalog query failed: {0}")]
    CatalogQuery(String),

    #[error("Index parse failed: {0}")]
    IndexParse(String),

    #[error("Archive fetch failed: {0}")]
    Fetch(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),
}

impl From<reqwest::Error> for SsgetError {
    fn from(err: reqwest::Error) -> Self {
        SsgetError::CatalogQuery(err.to_string())
    }
}

pub type SsgetResult<T> = Result<T, SsgetError>;

/// Numeric data type of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Real,
    Binary,
    Complex,
}

impl Dtype {
    /// Classify from the index's `isReal`/`isBinary` flags.
    ///
    /// Binary wins over real: binary matrices also carry `isReal = 1`
    /// in the index.
    pub fn from_flags(is_real: bool, is_binary: bool) -> Self {
        if is_binary {
            Dtype::Binary
        } else if is_real {
            Dtype::Real
        } else {
            Dtype::Complex
        }
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dtype::Real => write!(f, "real"),
            Dtype::Binary => write!(f, "binary"),
            Dtype::Complex => write!(f, "complex"),
        }
    }
}

/// One dataset record from the catalog index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog id (1-based position in the index, stable across queries)
    pub id: u32,

    /// Group (collection subdirectory, e.g. "HB")
    pub group: String,

    /// Matrix name (e.g. "bcsstk01")
    pub name: String,

    /// Row count
    pub rows: u64,

    /// Column count
    pub cols: u64,

    /// Non-zero count
    pub nonzeros: u64,

    /// Numeric data type
    pub dtype: Dtype,
}

impl CatalogEntry {
    /// Whether the entry has square dimensions.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the entry's id is in the fixed denylist.
    pub fn is_denylisted(&self) -> bool {
        DENYLIST.contains(&self.id)
    }

    /// Canonical archive location (Matrix Market format tarball).
    pub fn archive_url(&self) -> String {
        format!("{}/MM/{}/{}.tar.gz", SS_ROOT_URL, self.group, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, rows: u64, cols: u64) -> CatalogEntry {
        CatalogEntry {
            id,
            group: "HB".to_string(),
            name: "bcsstk01".to_string(),
            rows,
            cols,
            nonzeros: 224,
            dtype: Dtype::Real,
        }
    }

    #[test]
    fn test_dtype_from_flags() {
        assert_eq!(Dtype::from_flags(true, false), Dtype::Real);
        assert_eq!(Dtype::from_flags(true, true), Dtype::Binary);
        assert_eq!(Dtype::from_flags(false, true), Dtype::Binary);
        assert_eq!(Dtype::from_flags(false, false), Dtype::Complex);
    }

    #[test]
    fn test_is_square() {
        assert!(entry(1, 48, 48).is_square());
        assert!(!entry(1, 5, 7).is_square());
    }

    #[test]
    fn test_denylist() {
        assert!(entry(230, 10, 10).is_denylisted());
        assert!(entry(231, 10, 10).is_denylisted());
        assert!(!entry(229, 10, 10).is_denylisted());
        assert!(!entry(232, 10, 10).is_denylisted());
    }

    #[test]
    fn test_archive_url() {
        assert_eq!(
            entry(1, 48, 48).archive_url(),
            "https://sparse.tamu.edu/MM/HB/bcsstk01.tar.gz"
        );
    }
}
