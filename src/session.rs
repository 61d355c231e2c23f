//! A scene bound to the provider that will serve it.

use crate::artifact::ArtifactSpec;
use crate::backend::Backend;
use crate::error::SceneError;
use crate::remote::RemoteStore;
use crate::scene::SceneIdentifier;
use crate::types::{DownloadConfig, FetchResult, Provider};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Download session for one resolved scene.
///
/// Created by [`crate::resolve`]; owned by a single caller.
pub struct Session {
    backend: Backend,
    config: DownloadConfig,
    remote: Arc<dyn RemoteStore>,
}

impl Session {
    pub(crate) fn new(backend: Backend, config: DownloadConfig, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            backend,
            config,
            remote,
        }
    }

    /// The provider chosen by the resolver.
    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    /// The scene this session downloads.
    pub fn scene(&self) -> &SceneIdentifier {
        self.backend.scene()
    }

    /// The provider binding, for callers needing its URLs.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Downloads artifacts of the scene into `{destination}/{scene}/`.
    ///
    /// # Arguments
    ///
    /// * `artifacts` - Bands or codes to fetch, in order. Ignored by archive providers.
    /// * `destination` - Parent directory; defaults to `config.download_dir`
    /// * `include_metadata` - Also fetch the `_MTL.txt` file
    ///
    /// # Returns
    ///
    /// One [`FetchResult`] per file now present locally, or the first error.
    ///
    /// Per-band providers skip files that are already complete, so a repeated
    /// call transfers nothing. Archive providers delete the archive after
    /// unpacking it, so every call on a Google session downloads it again;
    /// the returned results are the same either way.
    pub async fn download(
        &self,
        artifacts: &[ArtifactSpec],
        destination: Option<&Path>,
        include_metadata: bool,
    ) -> Result<Vec<FetchResult>, SceneError> {
        let destination = destination.unwrap_or(self.config.download_dir.as_path());
        info!(
            "Downloading {} from {} into {}",
            self.scene(),
            self.provider(),
            destination.display()
        );

        let pb = if self.config.show_progress {
            let progress_bar = indicatif::ProgressBar::new(0);
            progress_bar.set_style(
                indicatif::ProgressStyle::default_bar()
                    .template("{spinner:.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg} | ETA {eta}")
                    .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                    .progress_chars("█▓▒░ "),
            );
            progress_bar
        } else {
            indicatif::ProgressBar::hidden()
        };

        let result = self
            .backend
            .download(
                self.remote.as_ref(),
                artifacts,
                destination,
                include_metadata,
                &pb,
            )
            .await;

        match &result {
            Ok(files) => pb.finish_with_message(format!("✅ {} file(s) ready", files.len())),
            Err(_) => pb.abandon_with_message("❌ Download failed!"),
        }
        result
    }
}
