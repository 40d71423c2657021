//! Error types for clipmd_release operations.
//!
//! Two-tier policy: core pipeline steps (version parsing, manifest rewrite,
//! staging, archiving) propagate these errors and abort the run; auxiliary
//! steps (browser discovery, signing, publishing) surface them to the
//! pipeline, which logs and continues.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for clipmd_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all clipmd_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Staging and archiving errors
    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    /// Signed-package errors
    #[error("Sign error: {0}")]
    Sign(#[from] SignError),

    /// Publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Version management errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Invalid version format
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion {
        /// Version string
        version: String,
        /// Reason for the error
        reason: String,
    },

    /// Manifest has no usable version field
    #[error("Manifest at {path} has no string 'version' field")]
    MissingVersionField {
        /// Path to the manifest
        path: PathBuf,
    },

    /// Manifest is not a JSON object
    #[error("Manifest at {path} is not a JSON object")]
    NotAnObject {
        /// Path to the manifest
        path: PathBuf,
    },

    /// Failed to rewrite the manifest
    #[error("Failed to update manifest at {path}: {reason}")]
    ManifestUpdateFailed {
        /// Path to the manifest
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Staging and archiving errors
#[derive(Error, Debug)]
pub enum StageError {
    /// Source entry exists but could not be copied
    #[error("Failed to copy '{entry}': {reason}")]
    CopyFailed {
        /// Entry from the fixed file list
        entry: String,
        /// Reason for the error
        reason: String,
    },

    /// Staging directory has no parent or name to derive outputs from
    #[error("Invalid staging directory path: {path}")]
    InvalidStagingDir {
        /// Offending path
        path: PathBuf,
    },

    /// Directory walk failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Zip archive errors
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Signed-package (crx) errors. Always absorbed by the pipeline.
#[derive(Error, Debug)]
pub enum SignError {
    /// Key generation via openssl failed
    #[error("Failed to generate signing key at {path}: {reason}")]
    KeyGenerationFailed {
        /// Key file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// The browser could not be spawned at all
    #[error("Failed to run browser '{browser}': {reason}")]
    BrowserSpawnFailed {
        /// Browser binary path
        browser: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// The packed artifact could not be moved to its output path
    #[error("Failed to relocate packed extension to {path}: {reason}")]
    RelocateFailed {
        /// Intended output path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Publishing errors. Always absorbed by the pipeline.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The origin remote URL could not be read from git
    #[error("Could not read remote.origin.url: {reason}")]
    RemoteUnavailable {
        /// Reason for the error
        reason: String,
    },

    /// The remote URL has a shape we cannot derive owner/repo from
    #[error("Could not parse owner/repo from remote URL '{url}'")]
    RemoteParseFailed {
        /// Remote URL as configured
        url: String,
    },

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The GitHub API returned an unexpected status
    #[error("GitHub API {operation} failed with status {status}: {body}")]
    UnexpectedStatus {
        /// Operation that failed
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Artifact file could not be read for upload
    #[error("Failed to read artifact {path}: {reason}")]
    ArtifactUnreadable {
        /// Artifact path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Version(VersionError::MissingVersionField { path }) => vec![
                format!(
                    "Ensure {} contains a string \"version\" field",
                    path.display()
                ),
                "Run from the extension project root, or pass --root".to_string(),
            ],
            ReleaseError::Version(VersionError::InvalidVersion { .. }) => vec![
                "Version must be 1-3 dot-separated non-negative integers, e.g. 1.2.3".to_string(),
            ],
            ReleaseError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => vec![
                "Check that manifest.json exists in the project root".to_string(),
                "Pass --root to point at the extension source tree".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
