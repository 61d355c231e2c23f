//! Error types for scene resolution and download operations.

use crate::types::Provider;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or downloading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// I/O error during file operations.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// HTTP request error during download.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// The scene string is not a well-formed identifier.
    #[error("Invalid scene identifier '{0}': expected 21 characters (or a 16-character legacy name)")]
    InvalidIdentifier(String),

    /// Every configured provider rejected the scene.
    #[error("No provider can serve scene {}: {}", .scene, format_causes(.causes))]
    NoBackendAvailable {
        scene: String,
        causes: Vec<Rejection>,
    },

    /// A requested band or code is outside the valid set.
    #[error("{0} is not a valid band")]
    InvalidArtifact(String),

    /// The size probe for an artifact failed after a provider was accepted.
    #[error("Remote file {url} is unavailable: {reason}")]
    RemoteUnavailable { url: String, reason: String },

    /// The downloaded archive could not be unpacked.
    #[error("Failed to extract {}: {}", .archive.display(), .source)]
    Extraction {
        archive: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single provider refused to bind a scene.
///
/// These never escape on their own; the resolver collects them into
/// [`SceneError::NoBackendAvailable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The provider does not host this sensor prefix.
    #[error("{provider} does not serve scenes with prefix {prefix}")]
    WrongIdentifier { provider: Provider, prefix: String },

    /// The existence probe did not find the scene.
    #[error("{scene} is not available on {provider} ({url}: {reason})")]
    RemoteNotFound {
        provider: Provider,
        scene: String,
        url: String,
        reason: String,
    },
}

impl Rejection {
    /// The provider that produced this rejection.
    pub fn provider(&self) -> Provider {
        match self {
            Rejection::WrongIdentifier { provider, .. }
            | Rejection::RemoteNotFound { provider, .. } => *provider,
        }
    }
}

fn format_causes(causes: &[Rejection]) -> String {
    if causes.is_empty() {
        return "no providers configured".to_string();
    }
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_backend_message_lists_every_cause() {
        let err = SceneError::NoBackendAvailable {
            scene: "LT50030172015001LGN00".to_string(),
            causes: vec![
                Rejection::WrongIdentifier {
                    provider: Provider::Amazon,
                    prefix: "LT5".to_string(),
                },
                Rejection::RemoteNotFound {
                    provider: Provider::Google,
                    scene: "LT50030172015001LGN00".to_string(),
                    url: "https://example.com/a.tar.bz".to_string(),
                    reason: "HTTP 404".to_string(),
                },
            ],
        };

        let message = err.to_string();
        assert!(message.contains("amazon does not serve scenes with prefix LT5"));
        assert!(message.contains("not available on google"));
    }

    #[test]
    fn test_empty_causes() {
        let err = SceneError::NoBackendAvailable {
            scene: "x".to_string(),
            causes: vec![],
        };
        assert!(err.to_string().ends_with("no providers configured"));
    }
}
