//! Google Earth Engine public bucket: one packed archive per scene.

use super::{join_url, probe_exists};
use crate::error::{Rejection, SceneError};
use crate::extract::extract_archive;
use crate::fetch::fetch_artifact;
use crate::remote::RemoteStore;
use crate::scene::SceneIdentifier;
use crate::types::{DownloadConfig, FetchResult, Provider};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{info, warn};

/// Maps a sensor prefix to the satellite directory used in the bucket.
fn satellite_code(prefix: &str) -> Option<&'static str> {
    match prefix {
        "LT5" => Some("L5"),
        "LE7" => Some("L7"),
        "LC8" => Some("L8"),
        _ => None,
    }
}

/// Google binding for one scene.
#[derive(Debug, Clone)]
pub struct GoogleBackend {
    scene: SceneIdentifier,
    archive_url: String,
    archive_name: String,
}

impl GoogleBackend {
    /// Whether the bucket has a satellite directory for this sensor prefix.
    pub fn accepts(scene: &SceneIdentifier) -> bool {
        satellite_code(scene.prefix()).is_some()
    }

    /// Checks the prefix, then HEADs the scene archive.
    pub async fn connect(
        scene: &SceneIdentifier,
        config: &DownloadConfig,
        remote: &dyn RemoteStore,
    ) -> Result<Self, Rejection> {
        let Some(code) = satellite_code(scene.prefix()) else {
            return Err(Rejection::WrongIdentifier {
                provider: Provider::Google,
                prefix: scene.prefix().to_string(),
            });
        };

        let archive_name = format!(
            "{}.{}",
            scene.name(),
            config.google_archive_extension.trim_start_matches('.')
        );
        let archive_url = join_url(
            &config.google_base_url,
            &format!(
                "landsat/{}/{}/{}/{}",
                code,
                scene.path(),
                scene.row(),
                archive_name
            ),
        );
        probe_exists(Provider::Google, scene, &archive_url, remote).await?;

        Ok(Self {
            scene: scene.clone(),
            archive_url,
            archive_name,
        })
    }

    /// The bound scene.
    pub fn scene(&self) -> &SceneIdentifier {
        &self.scene
    }

    /// Full URL of the per-scene archive, extension included.
    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    /// Fetches the scene archive, unpacks it into `scene_dir` and removes it.
    ///
    /// The archive is removed even when extraction fails; whatever was
    /// unpacked before the failure stays in `scene_dir`. Since the archive
    /// never survives, every call transfers it again.
    pub(super) async fn download(
        &self,
        remote: &dyn RemoteStore,
        scene_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<Vec<FetchResult>, SceneError> {
        let archive = fetch_artifact(
            remote,
            &self.archive_url,
            scene_dir,
            &self.archive_name,
            progress,
        )
        .await?;

        let extract_pb = if progress.is_hidden() {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            spinner
        };
        extract_pb.set_message(format!("📂 Extracting {}...", self.archive_name));

        let archive_path = archive.local_path.clone();
        let target_dir = scene_dir.to_path_buf();
        let extract_pb_task = extract_pb.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            extract_archive(&archive_path, &target_dir, &extract_pb_task)
        })
        .await
        .map_err(|e| std::io::Error::other(format!("Task join error: {}", e)))
        .and_then(|result| result);

        let removed = tokio::fs::remove_file(&archive.local_path).await;

        match (extracted, removed) {
            (Ok(files), Ok(())) => {
                info!(
                    "Extracted {} files from {} and removed the archive",
                    files.len(),
                    self.archive_name
                );
                Ok(files)
            }
            (Ok(_), Err(e)) => Err(SceneError::IoError(e)),
            (Err(source), removed) => {
                extract_pb.abandon_with_message("❌ Extraction failed!");
                if let Err(e) = removed {
                    warn!(
                        "Failed to remove {}: {}",
                        archive.local_path.display(),
                        e
                    );
                }
                Err(SceneError::Extraction {
                    archive: archive.local_path,
                    source,
                })
            }
        }
    }
}
