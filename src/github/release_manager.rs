//! Release publication: find-or-create a tagged release and attach the
//! build artifacts, replacing any same-named assets already present.

use crate::error::Result;
use crate::git::RemoteRepo;
use crate::github::{GitHubClient, Release, ReleaseAsset};
use bytes::Bytes;
use semver::Version;
use std::path::PathBuf;

/// Publishes build artifacts onto a GitHub release.
pub struct ReleasePublisher {
    client: GitHubClient,
    repo: RemoteRepo,
    target_commitish: String,
}

impl ReleasePublisher {
    /// Create a publisher for the given repository.
    pub fn new(token: String, repo: RemoteRepo, target_commitish: String) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::with_token(token)?,
            repo,
            target_commitish,
        })
    }

    /// Publish `artifacts` onto the release tagged `v<version>`.
    ///
    /// Artifacts that do not exist locally are ignored. With zero artifacts
    /// the whole step is a no-op (no release is created). Same-named remote
    /// assets are deleted before upload, so re-running a release replaces
    /// its assets instead of accumulating duplicates.
    ///
    /// Returns the download URLs of the uploaded assets.
    pub async fn publish(&self, version: &Version, artifacts: &[PathBuf]) -> Result<Vec<String>> {
        let artifacts: Vec<&PathBuf> = artifacts.iter().filter(|p| p.is_file()).collect();
        if artifacts.is_empty() {
            log::debug!("no local artifacts, skipping release publication");
            return Ok(Vec::new());
        }

        let tag = format!("v{version}");
        let release = self.find_or_create_release(version, &tag).await?;
        let existing = self.client.list_assets(&self.repo, release.id).await?;

        let mut uploaded = Vec::new();
        for artifact in artifacts {
            let name = match artifact.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };

            if let Some(asset_id) = stale_asset_id(&existing, name) {
                log::debug!("deleting existing asset '{name}' (id {asset_id})");
                self.client.delete_asset(&self.repo, asset_id).await?;
            }

            let content = tokio::fs::read(artifact).await.map_err(|e| {
                crate::error::PublishError::ArtifactUnreadable {
                    path: artifact.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            let asset = self
                .client
                .upload_asset(&self.repo, release.id, name, Bytes::from(content))
                .await?;
            log::info!("uploaded {} ({} bytes)", asset.name, asset.size);
            uploaded.push(asset.browser_download_url);
        }

        Ok(uploaded)
    }

    async fn find_or_create_release(&self, version: &Version, tag: &str) -> Result<Release> {
        if let Some(release) = self.client.get_release_by_tag(&self.repo, tag).await? {
            return Ok(release);
        }
        let name = format!("ClipMD v{version}");
        self.client
            .create_release(&self.repo, tag, &name, &self.target_commitish)
            .await
    }
}

/// ID of an already-uploaded asset with the given name, if any.
///
/// A hit means the asset must be deleted before re-upload; the release API
/// rejects duplicate names rather than overwriting.
fn stale_asset_id(existing: &[ReleaseAsset], name: &str) -> Option<u64> {
    existing
        .iter()
        .find(|asset| asset.name == name)
        .map(|asset| asset.id)
}
