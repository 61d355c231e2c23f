//! Remote store abstraction: HEAD probes and full GET transfers.
//!
//! Providers only talk to the network through [`RemoteStore`], so tests can
//! swap in a fake that serves canned objects and counts requests.

use crate::error::SceneError;
use crate::types::{DownloadConfig, ProbeResult};
use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::ProgressBar;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Network operations needed by the providers.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Issues a HEAD request and reports status and content length.
    ///
    /// A non-success status is `Ok` with `exists == false`; only transport
    /// failures are errors.
    async fn probe(&self, url: &str) -> Result<ProbeResult, SceneError>;

    /// Downloads `url` into `destination`, truncating any existing file.
    ///
    /// Returns the number of bytes written.
    async fn download_to(
        &self,
        url: &str,
        destination: &Path,
        progress: &ProgressBar,
    ) -> Result<u64, SceneError>;
}

/// Production store backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
}

impl HttpRemote {
    /// Builds a client honouring the configured request timeout.
    pub fn new(config: &DownloadConfig) -> Result<Self, SceneError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn probe(&self, url: &str) -> Result<ProbeResult, SceneError> {
        let response = self.client.head(url).send().await?;

        // Read the header directly: HEAD responses carry no body to size.
        let remote_size = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        debug!("HEAD {} -> {}", url, response.status());
        Ok(ProbeResult {
            exists: response.status().is_success(),
            remote_size,
        })
    }

    async fn download_to(
        &self,
        url: &str,
        destination: &Path,
        progress: &ProgressBar,
    ) -> Result<u64, SceneError> {
        let download_response = self.client.get(url).send().await?.error_for_status()?;
        if let Some(len) = download_response.content_length() {
            progress.set_length(len);
        }

        let mut file = BufWriter::new(tokio::fs::File::create(destination).await?);
        let mut byte_stream = download_response.bytes_stream();
        let mut written = 0u64;

        while let Some(piece) = byte_stream.next().await {
            let chunk = piece?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }
        file.flush().await?;

        Ok(written)
    }
}
