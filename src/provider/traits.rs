// ABOUTME: Capabilities the wait loops need from the outside world.
// ABOUTME: Listing and fetching deploys, and probing a public URL.

use super::types::Deploy;
use crate::error::Result;
use crate::types::{DeployId, SiteId};
use async_trait::async_trait;

/// Read access to a site's deploys.
#[async_trait]
pub trait DeployProvider: Send + Sync {
    /// List the site's deploys in provider order.
    ///
    /// Returns `Ok(None)` when the provider answered without a deploy list.
    async fn list_deploys(&self, site_id: &SiteId) -> Result<Option<Vec<Deploy>>>;

    /// Fetch a single deploy's current record.
    async fn get_deploy(&self, site_id: &SiteId, deploy_id: &DeployId) -> Result<Deploy>;
}

/// Lightweight existence check against a public URL.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn probe(&self, url: &str) -> std::result::Result<(), ProbeError>;
}

/// Why a single URL probe failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),
}
