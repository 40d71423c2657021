//! Origin-remote discovery for release publishing.
//!
//! Publishing targets the repository the project is cloned from, derived
//! from `remote.origin.url`. Both scp-like SSH remotes
//! (`git@github.com:owner/repo.git`) and HTTPS remotes
//! (`https://github.com/owner/repo.git`) are supported.

use crate::error::{PublishError, Result};
use std::path::Path;
use tokio::process::Command;
use url::Url;

/// Owner/repository identity parsed from a git remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RemoteRepo {
    /// Parse owner/repo from a remote URL.
    pub fn parse(remote_url: &str) -> Result<Self> {
        let trimmed = remote_url.trim();
        let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let path = if let Some(rest) = without_suffix.strip_prefix("git@") {
            // scp-like form: git@host:owner/repo
            rest.split_once(':')
                .map(|(_, path)| path)
                .ok_or_else(|| PublishError::RemoteParseFailed {
                    url: remote_url.to_string(),
                })?
                .to_string()
        } else {
            // URL form: scheme://host/owner/repo
            let parsed = Url::parse(without_suffix).map_err(|_| {
                PublishError::RemoteParseFailed {
                    url: remote_url.to_string(),
                }
            })?;
            parsed.path().trim_start_matches('/').to_string()
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(PublishError::RemoteParseFailed {
                url: remote_url.to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Display for RemoteRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Read `remote.origin.url` from the repository at `root` and parse it.
pub async fn origin_remote(root: &Path) -> Result<RemoteRepo> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .current_dir(root)
        .output()
        .await
        .map_err(|e| PublishError::RemoteUnavailable {
            reason: format!("failed to run git: {e}"),
        })?;

    if !output.status.success() {
        return Err(PublishError::RemoteUnavailable {
            reason: format!("git config exited with {}", output.status),
        }
        .into());
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    RemoteRepo::parse(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_remote() {
        let repo = RemoteRepo::parse("git@github.com:clipmd/clipmd.git").unwrap();
        assert_eq!(repo.owner, "clipmd");
        assert_eq!(repo.repo, "clipmd");
    }

    #[test]
    fn test_parse_https_remote() {
        let repo = RemoteRepo::parse("https://github.com/clipmd/clipmd.git").unwrap();
        assert_eq!(repo.owner, "clipmd");
        assert_eq!(repo.repo, "clipmd");
    }

    #[test]
    fn test_parse_without_git_suffix() {
        let repo = RemoteRepo::parse("https://github.com/clipmd/clipmd").unwrap();
        assert_eq!(repo.to_string(), "clipmd/clipmd");
    }

    #[test]
    fn test_parse_rejects_pathless_remote() {
        assert!(RemoteRepo::parse("https://github.com/").is_err());
        assert!(RemoteRepo::parse("git@github.com").is_err());
        assert!(RemoteRepo::parse("not a url").is_err());
    }
}
