// ABOUTME: reqwest-backed Netlify API client and public URL probe.
// ABOUTME: Bearer-authenticated deploy reads; unauthenticated HEAD checks.

use super::traits::{DeployProvider, ProbeError, UrlProbe};
use super::types::Deploy;
use crate::error::{Error, Result};
use crate::types::{DeployId, SiteId};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.netlify.com/api/v1";
pub const DEFAULT_PREVIEW_DOMAIN: &str = "netlify.app";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for the deploy endpoints of the Netlify REST API.
pub struct NetlifyClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl NetlifyClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// `{api}/sites/{site_id}/deploys`
    pub fn deploys_endpoint(&self, site_id: &SiteId) -> String {
        format!("{}/sites/{}/deploys", self.api_url, site_id.path_segment())
    }

    /// `{api}/sites/{site_id}/deploys/{deploy_id}`
    pub fn deploy_endpoint(&self, site_id: &SiteId, deploy_id: &DeployId) -> String {
        format!(
            "{}/{}",
            self.deploys_endpoint(site_id),
            deploy_id.path_segment()
        )
    }

    /// GET an endpoint and return the body, failing on non-2xx statuses.
    async fn get_body(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("GET {url} returned {status}")));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl std::fmt::Debug for NetlifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlifyClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl DeployProvider for NetlifyClient {
    async fn list_deploys(&self, site_id: &SiteId) -> Result<Option<Vec<Deploy>>> {
        let body = self.get_body(&self.deploys_endpoint(site_id)).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_deploy(&self, site_id: &SiteId, deploy_id: &DeployId) -> Result<Deploy> {
        let body = self
            .get_body(&self.deploy_endpoint(site_id, deploy_id))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Unauthenticated `HEAD` probe. Redirects are followed; only a final 2xx
/// counts as available.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn probe(&self, url: &str) -> std::result::Result<(), ProbeError> {
        let response = self
            .http
            .head(url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}
