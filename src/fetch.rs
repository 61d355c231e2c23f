//! Download-with-skip-if-complete, shared by every provider.

use crate::error::SceneError;
use crate::remote::RemoteStore;
use crate::types::FetchResult;
use indicatif::ProgressBar;
use std::path::Path;
use tracing::info;

/// Fetches `url` into `destination_dir/filename` unless an identical-size copy is present.
///
/// The steps are:
/// 1. HEAD the remote to learn its size
/// 2. Compare with the local file, if any, and skip on equality
/// 3. Otherwise download the whole file, overwriting partial data
///
/// # Arguments
///
/// * `remote` - Store used for the probe and the transfer
/// * `url` - Remote location of the artifact
/// * `destination_dir` - Existing directory to write into
/// * `filename` - Local file name
/// * `progress` - Progress bar updated with transferred bytes
///
/// # Returns
///
/// The local path and the probed remote size. The size is not re-measured
/// after the transfer.
pub(crate) async fn fetch_artifact(
    remote: &dyn RemoteStore,
    url: &str,
    destination_dir: &Path,
    filename: &str,
    progress: &ProgressBar,
) -> Result<FetchResult, SceneError> {
    let local_path = destination_dir.join(filename);
    info!("Downloading: {}", filename);

    let probe = remote
        .probe(url)
        .await
        .map_err(|e| SceneError::RemoteUnavailable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    if !probe.exists {
        return Err(SceneError::RemoteUnavailable {
            url: url.to_string(),
            reason: "HEAD request did not succeed".to_string(),
        });
    }
    let remote_size = probe
        .remote_size
        .ok_or_else(|| SceneError::RemoteUnavailable {
            url: url.to_string(),
            reason: "no content length reported".to_string(),
        })?;

    if let Ok(metadata) = tokio::fs::metadata(&local_path).await {
        if metadata.is_file() && metadata.len() == remote_size {
            info!("{} already exists on your system", filename);
            return Ok(FetchResult {
                local_path,
                size: remote_size,
            });
        }
        info!(
            "Size mismatch for {}: local={} bytes, remote={} bytes",
            filename,
            metadata.len(),
            remote_size
        );
    }

    progress.reset();
    progress.set_length(remote_size);
    progress.set_message(filename.to_string());
    remote.download_to(url, &local_path, progress).await?;
    info!("{} stored at {}", filename, destination_dir.display());

    Ok(FetchResult {
        local_path,
        size: remote_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::FakeRemote;

    const URL: &str = "https://example.com/scene/scene_B4.TIF";

    #[tokio::test]
    async fn test_fetches_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FakeRemote::new().with_object(URL, b"band four".to_vec());

        let result = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(result.local_path, dir.path().join("scene_B4.TIF"));
        assert_eq!(result.size, 9);
        assert_eq!(std::fs::read(&result.local_path).unwrap(), b"band four");
        assert_eq!(remote.get_count(), 1);
    }

    #[tokio::test]
    async fn test_skips_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scene_B4.TIF"), b"local ok!").unwrap();
        let remote = FakeRemote::new().with_object(URL, b"band four".to_vec());

        let result = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap();

        // Same size, so the local content is trusted as-is.
        assert_eq!(result.size, 9);
        assert_eq!(std::fs::read(&result.local_path).unwrap(), b"local ok!");
        assert_eq!(remote.get_count(), 0);
    }

    #[tokio::test]
    async fn test_overwrites_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scene_B4.TIF"), b"band").unwrap();
        let remote = FakeRemote::new().with_object(URL, b"band four".to_vec());

        let result = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&result.local_path).unwrap(), b"band four");
        assert_eq!(remote.get_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_remote_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FakeRemote::new();

        let err = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, SceneError::RemoteUnavailable { ref url, .. } if url == URL));
        assert_eq!(remote.get_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_length_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FakeRemote::new().with_unsized_object(URL, b"band four".to_vec());

        let err = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, SceneError::RemoteUnavailable { .. }));
        assert!(!dir.path().join("scene_B4.TIF").exists());
    }

    #[tokio::test]
    async fn test_connection_failure_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FakeRemote::new()
            .with_object(URL, b"band four".to_vec())
            .with_failing(URL);

        let err = fetch_artifact(&remote, URL, dir.path(), "scene_B4.TIF", &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SceneError::RemoteUnavailable { ref url, ref reason }
                if url == URL && reason.contains("connection refused")
        ));
        assert_eq!(remote.get_count(), 0);
        assert!(!dir.path().join("scene_B4.TIF").exists());
    }
}
