//! In-place rewriting of the extension manifest.
//!
//! The manifest is a plain JSON object with at least a string `version`
//! field. Rewrites preserve key order (serde_json with `preserve_order`),
//! use 2-space indentation, and end with a trailing newline. No backup is
//! kept.

use crate::error::{Result, VersionError};
use semver::Version;
use serde_json::Value;
use std::path::Path;

/// Read and leniently parse the `version` field from a manifest file.
pub fn read_manifest_version(path: &Path) -> Result<Version> {
    let doc = read_manifest(path)?;
    let version = doc
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| VersionError::MissingVersionField {
            path: path.to_path_buf(),
        })?;
    super::parse_lenient(version)
}

/// Rewrite the manifest's `version` field in place.
///
/// All other fields are untouched and keep their order, so applying this
/// twice with the same version produces byte-identical output.
pub fn persist_version(path: &Path, version: &Version) -> Result<()> {
    let mut doc = read_manifest(path)?;
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| VersionError::NotAnObject {
            path: path.to_path_buf(),
        })?;
    obj.insert(
        "version".to_string(),
        Value::String(version.to_string()),
    );

    let mut content = serde_json::to_string_pretty(&doc)?;
    content.push('\n');

    std::fs::write(path, content).map_err(|e| {
        VersionError::ManifestUpdateFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to write file: {e}"),
        }
        .into()
    })
}

fn read_manifest(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
