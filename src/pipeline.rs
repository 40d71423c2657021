//! The linear release pipeline.
//!
//! One invocation runs: read version, bump, rewrite manifest, stage, zip,
//! signed package (best-effort), version.txt, publish (best-effort). Core
//! steps abort the run on failure and leave prior side effects in place;
//! there is no rollback. Auxiliary steps downgrade to a logged skip.

use crate::bundle;
use crate::cli::OutputManager;
use crate::crx;
use crate::error::Result;
use crate::git;
use crate::github::ReleasePublisher;
use crate::version::{self, VersionBump};
use semver::Version;
use std::path::{Path, PathBuf};

/// Name of the staging directory, the archive stem, and the asset names.
const DIST_NAME: &str = "clipmd";

/// Configuration for a single pipeline run.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Extension project root containing manifest.json
    pub root: PathBuf,
    /// Which version component to bump
    pub bump: VersionBump,
    /// Signing key location; defaults to `<root>/signing-key.pem`
    pub key_path: Option<PathBuf>,
    /// Explicit browser binary, bypassing PATH probing
    pub browser_override: Option<String>,
    /// Base reference for newly created releases
    pub target_commitish: String,
    /// API token; publishing is skipped entirely when absent
    pub github_token: Option<String>,
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// The new, persisted version
    pub version: Version,
    /// Path of the zip archive
    pub zip: PathBuf,
    /// Path of the signed package, when one was produced
    pub crx: Option<PathBuf>,
    /// Download URLs of uploaded release assets
    pub uploaded: Vec<String>,
    /// Whether the publish step ran to completion (false means skipped
    /// or absorbed as best-effort)
    pub published: bool,
}

/// Executes the release steps in fixed order.
pub struct ReleasePipeline {
    config: ReleaseConfig,
    output: OutputManager,
}

impl ReleasePipeline {
    /// Create a pipeline from configuration.
    pub fn new(config: ReleaseConfig, output: OutputManager) -> Self {
        Self { config, output }
    }

    /// Run the pipeline once.
    pub async fn run(&self) -> Result<ReleaseOutcome> {
        let root = &self.config.root;
        let manifest_path = root.join("manifest.json");
        let dist = root.join("dist");
        tokio::fs::create_dir_all(&dist).await?;

        let current = version::read_manifest_version(&manifest_path)?;
        let next = self.config.bump.apply(&current);
        version::persist_version(&manifest_path, &next)?;
        self.output.info(&format!(
            "Version {current} -> {next} ({} bump)",
            self.config.bump
        ));

        let staged = dist.join(DIST_NAME);
        bundle::stage(root, &staged).await?;
        let zip = bundle::archive(&staged)?;
        self.output.success(&format!("Archived {}", zip.display()));

        let crx = self.signed_package(&staged).await;

        tokio::fs::write(dist.join("version.txt"), next.to_string()).await?;

        let (uploaded, published) = self.publish(&next, &zip, crx.as_deref()).await;

        Ok(ReleaseOutcome {
            version: next,
            zip,
            crx,
            uploaded,
            published,
        })
    }

    /// Best-effort signed-package step. Never fails the run.
    async fn signed_package(&self, staged: &Path) -> Option<PathBuf> {
        let browser = match crx::locate_browser(self.config.browser_override.as_deref()) {
            Some(browser) => browser,
            None => {
                log::debug!("no Chrome/Chromium on PATH, skipping signed package");
                return None;
            }
        };
        let key_path = self
            .config
            .key_path
            .clone()
            .unwrap_or_else(|| self.config.root.join("signing-key.pem"));

        match crx::signed_package(staged, &key_path, &browser).await {
            Ok(Some(path)) => {
                self.output.success(&format!("Signed {}", path.display()));
                Some(path)
            }
            Ok(None) => {
                log::debug!("browser pack run produced no artifact");
                None
            }
            Err(e) => {
                log::warn!("signed package skipped: {e}");
                None
            }
        }
    }

    /// Best-effort publish step. Never fails the run.
    async fn publish(
        &self,
        version: &Version,
        zip: &Path,
        crx: Option<&Path>,
    ) -> (Vec<String>, bool) {
        let token = match self.config.github_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                log::debug!("no GitHub token, skipping publish");
                return (Vec::new(), false);
            }
        };

        match self.try_publish(token, version, zip, crx).await {
            Ok(uploaded) => {
                for url in &uploaded {
                    self.output.indent(url);
                }
                (uploaded, true)
            }
            Err(e) => {
                log::warn!("publish skipped: {e}");
                (Vec::new(), false)
            }
        }
    }

    async fn try_publish(
        &self,
        token: String,
        version: &Version,
        zip: &Path,
        crx: Option<&Path>,
    ) -> Result<Vec<String>> {
        let repo = git::origin_remote(&self.config.root).await?;
        let publisher =
            ReleasePublisher::new(token, repo, self.config.target_commitish.clone())?;

        let mut artifacts = vec![zip.to_path_buf()];
        if let Some(crx) = crx {
            artifacts.push(crx.to_path_buf());
        }
        publisher.publish(version, &artifacts).await
    }
}
