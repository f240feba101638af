//! HTTP downloads
//!
//! Archives are streamed to disk chunk by chunk with a byte progress bar. A failed
//! transfer removes the partial file so a later run never mistakes it for a
//! complete archive.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::constants::{HTTP_CONNECT_TIMEOUT, USER_AGENT};
use crate::core::BootstrapError;
use crate::utils::ProgressBar;

/// HTTP client for dependency archives.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Build a client with the given overall request timeout.
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download `url` to `destination`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::DownloadFailed`] on connection or transfer errors
    /// - [`BootstrapError::HttpStatus`] when the server answers with a non-2xx status
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        tracing::debug!("GET {} -> {}", url, destination.display());

        let response = self.client.get(url).send().await.map_err(|e| BootstrapError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BootstrapError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let result = self.stream_to_file(url, response, destination).await;
        if result.is_err() && destination.exists() {
            if let Err(e) = fs::remove_file(destination).await {
                tracing::warn!("Failed to remove partial download {}: {}", destination.display(), e);
            }
        }
        result
    }

    async fn stream_to_file(
        &self,
        url: &str,
        mut response: reqwest::Response,
        destination: &Path,
    ) -> Result<u64> {
        let progress = match response.content_length() {
            Some(len) => ProgressBar::new_download(len),
            None => ProgressBar::new_spinner(),
        };
        let file_name = destination
            .file_name()
            .map_or_else(|| url.to_string(), |n| n.to_string_lossy().into_owned());
        progress.set_message(format!("Downloading {file_name}"));

        let mut file = fs::File::create(destination)
            .await
            .with_context(|| format!("Failed to create {}", destination.display()))?;

        let mut written = 0u64;
        loop {
            let chunk = response.chunk().await.map_err(|e| BootstrapError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            let Some(chunk) = chunk else {
                break;
            };
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write {}", destination.display()))?;
            written += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }

        file.flush().await.with_context(|| format!("Failed to flush {}", destination.display()))?;
        progress.finish_and_clear();

        tracing::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}
