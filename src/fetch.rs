//! Archive fetch and extraction
//!
//! Downloads the Matrix Market tarball for each selected entry and unpacks
//! it into the destination directory. Follows the guardrail-source tarball
//! path: buffer the response body, then stream it through a gzip decoder
//! into a tar archive reader.

use std::path::Path;
use std::time::Duration;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, info};

use crate::types::{CatalogEntry, SsgetError, SsgetResult};

/// Per-archive download timeout. Collection tarballs range from a few KB
/// to several hundred MB.
const DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Fetches and extracts matrix archives
pub struct MatrixFetcher {
    http_client: reqwest::Client,
}

impl MatrixFetcher {
    /// Create a new fetcher
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
                .user_agent("ssget/0.1")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Download every entry's archive and extract it into `dest_dir`.
    ///
    /// The destination directory is created up front; a directory that
    /// cannot be created fails the run before any network call. Entries
    /// are fetched sequentially in order; the first failure aborts the
    /// batch and surfaces the underlying error.
    pub async fn fetch_and_extract(
        &self,
        entries: &[CatalogEntry],
        dest_dir: &Path,
    ) -> SsgetResult<()> {
        std::fs::create_dir_all(dest_dir).map_err(|e| {
            SsgetError::Filesystem(format!(
                "Failed to create destination directory '{}': {}",
                dest_dir.display(),
                e
            ))
        })?;

        info!(
            "Downloading {} matrices into {}",
            entries.len(),
            dest_dir.display()
        );

        for (idx, entry) in entries.iter().enumerate() {
            debug!(
                "[{}/{}] {}/{} (id {})",
                idx + 1,
                entries.len(),
                entry.group,
                entry.name,
                entry.id
            );
            self.fetch_one(entry, dest_dir).await?;
        }

        info!("Downloaded {} matrices", entries.len());
        Ok(())
    }

    /// Download and unpack a single entry's tarball.
    async fn fetch_one(&self, entry: &CatalogEntry, dest_dir: &Path) -> SsgetResult<()> {
        let url = entry.archive_url();

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SsgetError::Fetch(format!("Download of '{}' failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(SsgetError::Fetch(format!(
                "Download of '{}' returned HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            SsgetError::Fetch(format!("Failed to read archive body for '{}': {}", url, e))
        })?;

        // Archives hold {name}/{name}.mtx; unpack resolves entries relative
        // to dest_dir and rejects paths escaping it.
        let gz = GzDecoder::new(&bytes[..]);
        let mut archive = Archive::new(gz);
        archive.unpack(dest_dir).map_err(|e| {
            SsgetError::Fetch(format!("Failed to extract '{}': {}", entry.name, e))
        })?;

        debug!("Extracted {} ({} bytes)", entry.name, bytes.len());
        Ok(())
    }
}

impl Default for MatrixFetcher {
    fn default() -> Self {
        Self::new()
    }
}
