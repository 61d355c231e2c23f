//! Storage providers hosting scene data.
//!
//! Each provider knows its URL layout, which sensor prefixes it serves and
//! how to turn a list of artifacts into local files. [`Backend`] binds one
//! scene to one provider after the existence probe has succeeded.

mod amazon;
mod google;

pub use amazon::AmazonBackend;
pub use google::GoogleBackend;

use crate::artifact::{validate_artifacts, ArtifactSpec};
use crate::error::{Rejection, SceneError};
use crate::remote::RemoteStore;
use crate::scene::SceneIdentifier;
use crate::types::{DownloadConfig, FetchResult, Provider};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::debug;

/// A provider bound to a scene known to exist there.
#[derive(Debug, Clone)]
pub enum Backend {
    Amazon(AmazonBackend),
    Google(GoogleBackend),
}

impl Backend {
    /// Whether `provider` serves scenes with this sensor prefix.
    pub fn accepts(provider: Provider, scene: &SceneIdentifier) -> bool {
        match provider {
            Provider::Amazon => AmazonBackend::accepts(scene),
            Provider::Google => GoogleBackend::accepts(scene),
        }
    }

    /// Binds `scene` to `provider`, probing the remote for existence.
    pub async fn connect(
        provider: Provider,
        scene: &SceneIdentifier,
        config: &DownloadConfig,
        remote: &dyn RemoteStore,
    ) -> Result<Self, Rejection> {
        match provider {
            Provider::Amazon => AmazonBackend::connect(scene, config, remote)
                .await
                .map(Backend::Amazon),
            Provider::Google => GoogleBackend::connect(scene, config, remote)
                .await
                .map(Backend::Google),
        }
    }

    /// The provider this scene was bound to.
    pub fn provider(&self) -> Provider {
        match self {
            Backend::Amazon(_) => Provider::Amazon,
            Backend::Google(_) => Provider::Google,
        }
    }

    /// The bound scene.
    pub fn scene(&self) -> &SceneIdentifier {
        match self {
            Backend::Amazon(b) => b.scene(),
            Backend::Google(b) => b.scene(),
        }
    }

    /// Downloads `artifacts` into `destination_dir/{scene}/`.
    ///
    /// Every artifact is validated before any network request is made.
    /// The first failing artifact aborts the batch.
    pub(crate) async fn download(
        &self,
        remote: &dyn RemoteStore,
        artifacts: &[ArtifactSpec],
        destination_dir: &Path,
        include_metadata: bool,
        progress: &ProgressBar,
    ) -> Result<Vec<FetchResult>, SceneError> {
        validate_artifacts(artifacts)?;

        let scene_dir = destination_dir.join(self.scene().name());
        tokio::fs::create_dir_all(&scene_dir).await?;

        match self {
            Backend::Amazon(b) => {
                b.download(remote, artifacts, &scene_dir, include_metadata, progress)
                    .await
            }
            Backend::Google(b) => b.download(remote, &scene_dir, progress).await,
        }
    }
}

/// HEADs `url` and turns anything but a success into [`Rejection::RemoteNotFound`].
async fn probe_exists(
    provider: Provider,
    scene: &SceneIdentifier,
    url: &str,
    remote: &dyn RemoteStore,
) -> Result<(), Rejection> {
    let not_found = |reason: String| Rejection::RemoteNotFound {
        provider,
        scene: scene.name().to_string(),
        url: url.to_string(),
        reason,
    };

    match remote.probe(url).await {
        Ok(probe) if probe.exists => {
            debug!("{} found on {} at {}", scene, provider, url);
            Ok(())
        }
        Ok(_) => Err(not_found("HEAD request did not succeed".to_string())),
        Err(e) => Err(not_found(e.to_string())),
    }
}

/// Joins a configured base URL with a relative path.
fn join_url(base: &str, rest: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), rest)
}
