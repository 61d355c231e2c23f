//! Picks the first provider able to serve a scene.

use crate::backend::Backend;
use crate::error::{Rejection, SceneError};
use crate::remote::RemoteStore;
use crate::scene::SceneIdentifier;
use crate::session::Session;
use crate::types::{DownloadConfig, Provider};
use std::sync::Arc;
use tracing::{info, warn};

/// Resolves `scene` using the provider order in `config.priority`.
pub async fn resolve(
    scene: &SceneIdentifier,
    config: &DownloadConfig,
    remote: Arc<dyn RemoteStore>,
) -> Result<Session, SceneError> {
    resolve_with_priority(scene, &config.priority, config, remote).await
}

/// Tries each provider in `priority` order; the first that binds wins.
///
/// Providers after the winner are never contacted. When none binds, the
/// error carries one [`Rejection`] per provider, in the order tried.
pub async fn resolve_with_priority(
    scene: &SceneIdentifier,
    priority: &[Provider],
    config: &DownloadConfig,
    remote: Arc<dyn RemoteStore>,
) -> Result<Session, SceneError> {
    let mut causes: Vec<Rejection> = Vec::with_capacity(priority.len());

    for &provider in priority {
        info!("Trying {} for {}", provider, scene);
        match Backend::connect(provider, scene, config, remote.as_ref()).await {
            Ok(backend) => {
                info!("✅ {} is served by {}", scene, provider);
                return Ok(Session::new(backend, config.clone(), remote));
            }
            Err(rejection) => {
                warn!("{}", rejection);
                causes.push(rejection);
            }
        }
    }

    Err(SceneError::NoBackendAvailable {
        scene: scene.name().to_string(),
        causes,
    })
}
