//! Minimal GitHub REST client for release management.
//!
//! Covers exactly the endpoints the release pipeline needs: release lookup
//! by tag, release creation, and asset list/delete/upload.

mod release_manager;

pub use release_manager::ReleasePublisher;

use crate::error::{PublishError, Result};
use crate::git::RemoteRepo;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.github.com";
const UPLOAD_BASE: &str = "https://uploads.github.com";
const USER_AGENT: &str = concat!("clipmd-release/", env!("CARGO_PKG_VERSION"));

/// A release object on the hosting platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Tag the release points at
    pub tag_name: String,
    /// Web URL of the release
    pub html_url: String,
    /// Assets already attached to the release
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A named binary asset attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset ID
    pub id: u64,
    /// Asset filename
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Download URL
    #[serde(default)]
    pub browser_download_url: String,
}

#[derive(Debug, Serialize)]
struct CreateReleaseBody<'a> {
    tag_name: &'a str,
    name: &'a str,
    target_commitish: &'a str,
}

/// Thin authenticated wrapper around the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
}

impl GitHubClient {
    /// Create a client authenticated with the given token.
    pub fn with_token(token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(PublishError::from)?;
        Ok(Self { http, token })
    }

    fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.decorate(self.http.get(url))
    }

    fn decorate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
    }

    /// Look up a release by tag. `Ok(None)` means no release with that tag.
    pub async fn get_release_by_tag(
        &self,
        repo: &RemoteRepo,
        tag: &str,
    ) -> Result<Option<Release>> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/tags/{tag}",
            repo.owner, repo.repo
        );
        let response = self.get(url).send().await.map_err(PublishError::from)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, "get release by tag").await?;
        Ok(Some(response.json().await.map_err(PublishError::from)?))
    }

    /// Create a release for `tag` targeting `target_commitish`.
    pub async fn create_release(
        &self,
        repo: &RemoteRepo,
        tag: &str,
        name: &str,
        target_commitish: &str,
    ) -> Result<Release> {
        let url = format!("{API_BASE}/repos/{}/{}/releases", repo.owner, repo.repo);
        let body = CreateReleaseBody {
            tag_name: tag,
            name,
            target_commitish,
        };
        let response = self
            .decorate(self.http.post(url))
            .json(&body)
            .send()
            .await
            .map_err(PublishError::from)?;
        let response = check_status(response, "create release").await?;
        Ok(response.json().await.map_err(PublishError::from)?)
    }

    /// List the assets attached to a release.
    pub async fn list_assets(
        &self,
        repo: &RemoteRepo,
        release_id: u64,
    ) -> Result<Vec<ReleaseAsset>> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/{release_id}/assets",
            repo.owner, repo.repo
        );
        let response = self.get(url).send().await.map_err(PublishError::from)?;
        let response = check_status(response, "list release assets").await?;
        Ok(response.json().await.map_err(PublishError::from)?)
    }

    /// Delete a release asset by ID.
    pub async fn delete_asset(&self, repo: &RemoteRepo, asset_id: u64) -> Result<()> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/releases/assets/{asset_id}",
            repo.owner, repo.repo
        );
        let response = self
            .decorate(self.http.delete(url))
            .send()
            .await
            .map_err(PublishError::from)?;
        check_status(response, "delete release asset").await?;
        Ok(())
    }

    /// Upload `content` as a named asset on a release.
    pub async fn upload_asset(
        &self,
        repo: &RemoteRepo,
        release_id: u64,
        name: &str,
        content: Bytes,
    ) -> Result<ReleaseAsset> {
        let url = format!(
            "{UPLOAD_BASE}/repos/{}/{}/releases/{release_id}/assets",
            repo.owner, repo.repo
        );
        let response = self
            .decorate(self.http.post(url))
            .query(&[("name", name), ("label", name)])
            .header("Content-Type", "application/octet-stream")
            .body(content)
            .send()
            .await
            .map_err(PublishError::from)?;
        let response = check_status(response, "upload release asset").await?;
        Ok(response.json().await.map_err(PublishError::from)?)
    }
}

async fn check_status(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PublishError::UnexpectedStatus {
        operation,
        status: status.as_u16(),
        body,
    }
    .into())
}
