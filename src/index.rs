//! Catalog index client
//!
//! Downloads the SuiteSparse collection statistics index (ssstats.csv)
//! and parses it into a searchable in-memory catalog. The index is a
//! headerless CSV with two preamble lines (declared matrix count and
//! last-updated date) followed by one record per matrix:
//!
//! `group,name,rows,cols,nnz,isReal,isBinary,isND,posdef,psym,nsym,kind`
//!
//! An entry's catalog id is its 1-based position in the file.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::types::{CatalogEntry, Dtype, SsgetError, SsgetResult};

/// Default index URL
pub const DEFAULT_INDEX_URL: &str = "https://sparse.tamu.edu/files/ssstats.csv";

/// Catalog index API client
pub struct CatalogClient {
    http_client: reqwest::Client,
    index_url: String,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(index_url: String) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("ssget/0.1")
                .build()
                .expect("Failed to create HTTP client"),
            index_url,
        }
    }

    /// Download and parse the catalog index
    pub async fn fetch_index(&self) -> SsgetResult<CatalogIndex> {
        debug!("Fetching catalog index: {}", self.index_url);

        let response = self
            .http_client
            .get(&self.index_url)
            .send()
            .await
            .map_err(|e| SsgetError::CatalogQuery(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SsgetError::CatalogQuery(format!(
                "Index download returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SsgetError::CatalogQuery(format!("Failed to read index body: {}", e)))?;

        let index = CatalogIndex::parse(&body)?;
        info!(
            "Catalog index loaded: {} entries (last updated {})",
            index.entries.len(),
            index.last_updated
        );
        Ok(index)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL.to_string())
    }
}

/// Parsed catalog index, searchable in memory
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    /// Matrix count declared in the index preamble
    pub declared_count: usize,

    /// Last-updated date from the index preamble (verbatim)
    pub last_updated: String,

    /// All catalog entries, in id order
    pub entries: Vec<CatalogEntry>,
}

impl CatalogIndex {
    /// Parse the raw ssstats.csv payload
    pub fn parse(data: &str) -> SsgetResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());

        let mut declared_count = 0usize;
        let mut last_updated = String::new();
        let mut entries = Vec::new();

        for (line, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| SsgetError::IndexParse(format!("Bad record at line {}: {}", line + 1, e)))?;

            // Two preamble lines precede the matrix records
            if line == 0 {
                declared_count = field(&record, 0, line)?
                    .parse()
                    .map_err(|e| SsgetError::IndexParse(format!("Bad matrix count: {}", e)))?;
                continue;
            }
            if line == 1 {
                last_updated = field(&record, 0, line)?.to_string();
                continue;
            }

            let raw: IndexRecord = record.deserialize(None).map_err(|e| {
                SsgetError::IndexParse(format!("Bad record at line {}: {}", line + 1, e))
            })?;
            // Preamble occupies lines 0-1, so the first matrix record
            // (line 2) gets id 1.
            entries.push(raw.into_entry((line - 1) as u32));
        }

        if declared_count != entries.len() {
            warn!(
                "Index declares {} matrices but {} records were parsed",
                declared_count,
                entries.len()
            );
        }

        Ok(Self {
            declared_count,
            last_updated,
            entries,
        })
    }

    /// Search the index for entries of the given dtype.
    ///
    /// Returns entries in id order whose non-zero count lies within the
    /// optional inclusive bounds, truncated at `limit`.
    pub fn search(
        &self,
        dtype: Dtype,
        nnz_bounds: Option<(u64, u64)>,
        limit: usize,
    ) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.dtype == dtype)
            .filter(|e| match nnz_bounds {
                Some((lo, hi)) => e.nonzeros >= lo && e.nonzeros <= hi,
                None => true,
            })
            .take(limit)
            .cloned()
            .collect()
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, line: usize) -> SsgetResult<&'a str> {
    record.get(idx).map(str::trim).ok_or_else(|| {
        SsgetError::IndexParse(format!("Missing field {} at line {}", idx, line + 1))
    })
}

/// One raw index row, in file column order
#[derive(Debug, Deserialize)]
struct IndexRecord {
    group: String,
    name: String,
    rows: u64,
    cols: u64,
    nonzeros: u64,
    is_real: u8,
    is_binary: u8,
    #[allow(dead_code)]
    is_nd: u8,
    #[allow(dead_code)]
    posdef: u8,
    #[allow(dead_code)]
    psym: f64,
    #[allow(dead_code)]
    nsym: f64,
    #[allow(dead_code)]
    kind: String,
}

impl IndexRecord {
    fn into_entry(self, id: u32) -> CatalogEntry {
        CatalogEntry {
            id,
            group: self.group,
            name: self.name,
            rows: self.rows,
            cols: self.cols,
            nonzeros: self.nonzeros,
            dtype: Dtype::from_flags(self.is_real != 0, self.is_binary != 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_INDEX: &str = "\
4
31-Oct-2023
HB,bcsstk01,48,48,224,1,0,0,1,1,1,structural problem
HB,ash219,219,85,438,0,1,0,0,0,0,least squares problem
HB,young1c,841,841,4089,0,0,0,0,1,0,acoustics problem
HB,bcsstk02,66,66,2211,1,0,0,1,1,1,structural problem
";

    #[test]
    fn test_parse_index() {
        let index = CatalogIndex::parse(SAMPLE_INDEX).unwrap();
        assert_eq!(index.declared_count, 4);
        assert_eq!(index.last_updated, "31-Oct-2023");
        assert_eq!(index.entries.len(), 4);

        let first = &index.entries[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.group, "HB");
        assert_eq!(first.name, "bcsstk01");
        assert_eq!(first.rows, 48);
        assert_eq!(first.cols, 48);
        assert_eq!(first.nonzeros, 224);
        assert_eq!(first.dtype, Dtype::Real);

        assert_eq!(index.entries[1].dtype, Dtype::Binary);
        assert_eq!(index.entries[2].dtype, Dtype::Complex);
        assert_eq!(index.entries[3].id, 4);
    }

    #[test]
    fn test_parse_rejects_bad_numeric_field() {
        let data = "1\n31-Oct-2023\nHB,bad,48,forty-eight,224,1,0,0,1,1,1,test\n";
        let err = CatalogIndex::parse(data).unwrap_err();
        assert!(matches!(err, SsgetError::IndexParse(_)));
    }

    #[test]
    fn test_search_by_dtype() {
        let index = CatalogIndex::parse(SAMPLE_INDEX).unwrap();

        let real = index.search(Dtype::Real, None, 10_000);
        assert_eq!(real.len(), 2);
        assert!(real.iter().all(|e| e.dtype == Dtype::Real));

        let binary = index.search(Dtype::Binary, None, 10_000);
        assert_eq!(binary.len(), 1);
        assert_eq!(binary[0].name, "ash219");
    }

    #[test]
    fn test_search_nnz_bounds_inclusive() {
        let index = CatalogIndex::parse(SAMPLE_INDEX).unwrap();

        let bounded = index.search(Dtype::Real, Some((0, 224)), 10_000);
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].name, "bcsstk01");

        // Upper bound equal to an entry's nnz keeps that entry
        let at_bound = index.search(Dtype::Real, Some((0, 2211)), 10_000);
        assert_eq!(at_bound.len(), 2);
    }

    #[test]
    fn test_search_limit_truncates_in_id_order() {
        let index = CatalogIndex::parse(SAMPLE_INDEX).unwrap();
        let limited = index.search(Dtype::Real, None, 1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].name, "bcsstk01");
    }

    #[test]
    fn test_declared_count_mismatch_is_tolerated() {
        let data = "7\n31-Oct-2023\nHB,bcsstk01,48,48,224,1,0,0,1,1,1,test\n";
        let index = CatalogIndex::parse(data).unwrap();
        assert_eq!(index.declared_count, 7);
        assert_eq!(index.entries.len(), 1);
    }

    #[test]
    fn test_default_urls() {
        assert!(DEFAULT_INDEX_URL.starts_with(crate::types::SS_ROOT_URL));
    }
}
