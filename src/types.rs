//! Data structures shared across providers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::SceneError;

/// A remote storage service that may host a scene.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Landsat on AWS: one object per band.
    Amazon,
    /// Google Earth Engine public bucket: one packed archive per scene.
    Google,
}

impl Provider {
    /// Every provider, in the default priority order.
    pub const ALL: [Provider; 2] = [Provider::Amazon, Provider::Google];
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Amazon => f.write_str("amazon"),
            Provider::Google => f.write_str("google"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "amazon" | "aws" => Ok(Provider::Amazon),
            "google" | "gcs" => Ok(Provider::Google),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Configuration for resolving and downloading scenes.
///
/// # Example
///
/// ```
/// use scenesync::{DownloadConfig, Provider};
///
/// let config = DownloadConfig {
///     download_dir: "/data/landsat".into(),
///     priority: vec![Provider::Google],
///     ..DownloadConfig::default()
/// };
/// assert_eq!(config.google_archive_extension, "tar.bz");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DownloadConfig {
    /// Base URL of the Amazon bucket (e.g., `<https://landsat-pds.s3.amazonaws.com>`)
    pub amazon_base_url: String,
    /// Base URL of the Google bucket (e.g., `<https://storage.googleapis.com/earthengine-public>`)
    pub google_base_url: String,
    /// Extension of the per-scene archive on Google, without the leading dot.
    pub google_archive_extension: String,
    /// Directory used when a download call names no destination.
    pub download_dir: PathBuf,
    /// Providers to try, first match wins.
    pub priority: Vec<Provider>,
    /// Per-request timeout, written as a humantime string (`"30s"`, `"1500ms"`)
    /// in JSON. `None` leaves the client default.
    #[serde(
        serialize_with = "serialize_timeout",
        deserialize_with = "deserialize_timeout"
    )]
    pub request_timeout: Option<Duration>,
    /// Draw progress bars on stderr.
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            amazon_base_url: "https://landsat-pds.s3.amazonaws.com".to_string(),
            google_base_url: "https://storage.googleapis.com/earthengine-public".to_string(),
            google_archive_extension: "tar.bz".to_string(),
            download_dir: default_download_dir(),
            priority: Provider::ALL.to_vec(),
            request_timeout: None,
            show_progress: true,
        }
    }
}

impl DownloadConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn serialize_timeout<S: Serializer>(
    timeout: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    timeout
        .map(|t| humantime::format_duration(t).to_string())
        .serialize(serializer)
}

fn deserialize_timeout<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| humantime::parse_duration(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// `~/landsat`, or `./landsat` when no home directory is known.
pub fn default_download_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("landsat")
}

/// Outcome of a HEAD probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// The server answered with a success status.
    pub exists: bool,
    /// Content length, when the server reported one.
    pub remote_size: Option<u64>,
}

/// One fetched file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Where the file lives on disk.
    pub local_path: PathBuf,
    /// Size reported by the remote at probe time.
    ///
    /// This is not re-measured after the transfer; callers wanting strict
    /// verification should stat `local_path` themselves.
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("amazon".parse::<Provider>(), Ok(Provider::Amazon));
        assert_eq!("GCS".parse::<Provider>(), Ok(Provider::Google));
        assert!("azure".parse::<Provider>().is_err());
    }

    #[test]
    fn test_default_priority_is_amazon_first() {
        let config = DownloadConfig::default();
        assert_eq!(config.priority, vec![Provider::Amazon, Provider::Google]);
        assert!(config.download_dir.ends_with("landsat"));
    }

    #[test]
    fn test_partial_json_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "priority": ["google"], "google_archive_extension": "tar.gz" }"#,
        )
        .unwrap();

        let config = DownloadConfig::from_json_file(&path).unwrap();
        assert_eq!(config.priority, vec![Provider::Google]);
        assert_eq!(config.google_archive_extension, "tar.gz");
        assert_eq!(
            config.amazon_base_url,
            DownloadConfig::default().amazon_base_url
        );
    }

    #[test]
    fn test_json_timeout_keeps_sub_second_precision() {
        let config: DownloadConfig =
            serde_json::from_str(r#"{ "request_timeout": "1500ms" }"#).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));

        let written = serde_json::to_string(&config).unwrap();
        let reread: DownloadConfig = serde_json::from_str(&written).unwrap();
        assert_eq!(reread.request_timeout, Some(Duration::from_millis(1500)));

        let unset: DownloadConfig = serde_json::from_str(r#"{ "request_timeout": null }"#).unwrap();
        assert_eq!(unset.request_timeout, None);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        assert!(serde_json::from_str::<DownloadConfig>(r#"{ "request_timeout": "soon" }"#).is_err());
    }

    #[test]
    fn test_malformed_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            DownloadConfig::from_json_file(&path),
            Err(SceneError::SerdeJsonError(_))
        ));
    }
}
