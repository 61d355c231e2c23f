//! SceneSync - resolve Landsat scenes to a storage provider and download them
//!
//! This library finds which remote provider hosts a Landsat scene and fetches
//! its bands, skipping files that are already complete on disk.
//!
//! # Features
//!
//! - **Provider Resolution**: Amazon and Google are probed in a configurable order
//! - **Skip-if-complete**: Local files whose size matches the remote are not re-downloaded
//! - **Archive Handling**: Google's per-scene tarballs are unpacked and removed
//! - **Eager Validation**: Bad band requests fail before any network traffic
//!
//! # Example
//!
//! ```no_run
//! use scenesync::{download_scene, ArtifactSpec, DownloadConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DownloadConfig::default();
//! let bands = vec![ArtifactSpec::Band(4), ArtifactSpec::Band(5), ArtifactSpec::quality()];
//!
//! download_scene(&config, "LC80030172015001LGN00", &bands, None, true).await?;
//! # Ok(())
//! # }
//! ```

mod artifact;
mod backend;
mod error;
mod extract;
mod fetch;
mod remote;
mod resolver;
mod scene;
mod session;
mod types;

pub use artifact::{validate_artifacts, ArtifactSpec, MAX_BAND, METADATA_CODE, QUALITY_CODE};
pub use backend::{AmazonBackend, Backend, GoogleBackend};
pub use error::{Rejection, SceneError};
pub use remote::{HttpRemote, RemoteStore};
pub use resolver::{resolve, resolve_with_priority};
pub use scene::SceneIdentifier;
pub use session::Session;
pub use types::{default_download_dir, DownloadConfig, FetchResult, ProbeResult, Provider};

use std::path::Path;
use std::sync::Arc;

/// Parses `raw` and resolves it over HTTP using `config`.
pub async fn resolve_scene(raw: &str, config: &DownloadConfig) -> Result<Session, SceneError> {
    let scene = SceneIdentifier::parse(raw)?;
    let remote = Arc::new(HttpRemote::new(config)?);
    resolve(&scene, config, remote).await
}

/// Resolves a scene and downloads the requested artifacts in one call.
///
/// # Arguments
///
/// * `config` - Download configuration
/// * `raw_scene` - Scene identifier, e.g. `LC80030172015001LGN00`
/// * `artifacts` - Bands to fetch; ignored by archive providers
/// * `destination` - Parent directory; defaults to `config.download_dir`
/// * `include_metadata` - Also fetch the `_MTL.txt` file
///
/// # Returns
///
/// The files now present locally, or the first error encountered.
pub async fn download_scene(
    config: &DownloadConfig,
    raw_scene: &str,
    artifacts: &[ArtifactSpec],
    destination: Option<&Path>,
    include_metadata: bool,
) -> Result<Vec<FetchResult>, SceneError> {
    let session = resolve_scene(raw_scene, config).await?;
    session
        .download(artifacts, destination, include_metadata)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_identifier_fails_before_any_request() {
        let config = DownloadConfig {
            amazon_base_url: "http://127.0.0.1:9".to_string(),
            google_base_url: "http://127.0.0.1:9".to_string(),
            ..DownloadConfig::default()
        };

        let err = download_scene(&config, "LC80030172015001LGN0", &[], None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidIdentifier(_)));
    }
}
