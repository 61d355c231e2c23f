//! Landsat on AWS: one object per band under a per-scene prefix.

use super::{join_url, probe_exists};
use crate::artifact::ArtifactSpec;
use crate::error::{Rejection, SceneError};
use crate::fetch::fetch_artifact;
use crate::remote::RemoteStore;
use crate::scene::SceneIdentifier;
use crate::types::{DownloadConfig, FetchResult, Provider};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::info;

/// Sensor prefixes mirrored on AWS.
const PREFIXES: [&str; 2] = ["LC8", "LO8"];

/// Amazon binding for one scene.
#[derive(Debug, Clone)]
pub struct AmazonBackend {
    scene: SceneIdentifier,
    /// `{base}/L8/{path}/{row}/{scene}`
    base_url: String,
}

impl AmazonBackend {
    /// Whether AWS mirrors this sensor prefix.
    pub fn accepts(scene: &SceneIdentifier) -> bool {
        PREFIXES.contains(&scene.prefix())
    }

    /// Checks the prefix, then HEADs the scene's `index.html`.
    pub async fn connect(
        scene: &SceneIdentifier,
        config: &DownloadConfig,
        remote: &dyn RemoteStore,
    ) -> Result<Self, Rejection> {
        if !Self::accepts(scene) {
            return Err(Rejection::WrongIdentifier {
                provider: Provider::Amazon,
                prefix: scene.prefix().to_string(),
            });
        }

        let base_url = join_url(
            &config.amazon_base_url,
            &format!("L8/{}/{}/{}", scene.path(), scene.row(), scene.name()),
        );
        let index = format!("{}/index.html", base_url);
        probe_exists(Provider::Amazon, scene, &index, remote).await?;

        Ok(Self {
            scene: scene.clone(),
            base_url,
        })
    }

    /// The bound scene.
    pub fn scene(&self) -> &SceneIdentifier {
        &self.scene
    }

    /// Remote location of one artifact.
    pub fn artifact_url(&self, artifact: &ArtifactSpec) -> String {
        format!("{}/{}", self.base_url, artifact.file_name(self.scene.name()))
    }

    /// Fetches each artifact in order, then the metadata file if asked for.
    pub(super) async fn download(
        &self,
        remote: &dyn RemoteStore,
        artifacts: &[ArtifactSpec],
        scene_dir: &Path,
        include_metadata: bool,
        progress: &ProgressBar,
    ) -> Result<Vec<FetchResult>, SceneError> {
        let mut requested = artifacts.to_vec();
        if include_metadata && !requested.contains(&ArtifactSpec::Metadata) {
            requested.push(ArtifactSpec::Metadata);
        }

        let mut downloaded = Vec::with_capacity(requested.len());
        for artifact in &requested {
            let filename = artifact.file_name(self.scene.name());
            let url = self.artifact_url(artifact);
            downloaded.push(fetch_artifact(remote, &url, scene_dir, &filename, progress).await?);
        }

        info!(
            "{} artifact(s) of {} ready in {}",
            downloaded.len(),
            self.scene,
            scene_dir.display()
        );
        Ok(downloaded)
    }
}
