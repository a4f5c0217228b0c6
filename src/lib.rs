//! ssget - catalog selector and downloader for the SuiteSparse matrix collection
//!
//! Queries the collection's statistics index, filters entries by simple
//! numeric predicates (square dimensions, non-zero bound, a fixed denylist),
//! optionally samples a reproducible subset via a seeded shuffle, and
//! downloads and extracts the selected Matrix Market archives.

pub mod config;
pub mod fetch;
pub mod index;
pub mod selector;
pub mod types;

pub use config::{RunConfig, SampleSpec, MAX_CANDIDATES};
pub use fetch::MatrixFetcher;
pub use index::{CatalogClient, CatalogIndex, DEFAULT_INDEX_URL};
pub use selector::{select_matrices, DtypeReport, Selection};
pub use types::{CatalogEntry, Dtype, SsgetError, SsgetResult, DENYLIST};
