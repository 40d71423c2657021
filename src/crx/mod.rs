//! Signed-package production via Chrome's extension packing mode.
//!
//! Everything in this module is best-effort from the pipeline's point of
//! view: a missing browser skips packing entirely, and a failing pack run
//! leaves the release with just the zip artifact. Errors are still returned
//! as errors so callers (and tests) can tell a skip from a failure.

use crate::error::{Result, SignError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;

/// Well-known browser executable names, probed in order on PATH.
pub const BROWSER_CANDIDATES: [&str; 4] = [
    "google-chrome-stable",
    "google-chrome",
    "chromium",
    "chromium-browser",
];

/// Locate a Chrome/Chromium binary.
///
/// An explicit override is returned as-is without existence checks;
/// otherwise the first candidate found on PATH wins. `None` means the
/// signed-package step is skipped entirely.
pub fn locate_browser(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    BROWSER_CANDIDATES
        .iter()
        .find_map(|candidate| which::which(candidate).ok())
}

/// Produce a signed `.crx` package from the staged directory.
///
/// Generates the RSA signing key first if `key_path` does not exist. The
/// browser's exit status is ignored (Chrome's pack mode is noisy and its
/// failures are non-fatal here); we only look for the artifact it leaves
/// behind. Returns `Ok(None)` when no artifact appeared.
pub async fn signed_package(
    staged_dir: &Path,
    key_path: &Path,
    browser: &Path,
) -> Result<Option<PathBuf>> {
    ensure_signing_key(key_path).await?;

    let status = Command::new(browser)
        .arg(format!("--pack-extension={}", staged_dir.display()))
        .arg(format!("--pack-extension-key={}", key_path.display()))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) => {
            if !status.success() {
                log::debug!("browser pack run exited with {status}");
            }
        }
        Err(e) => {
            return Err(SignError::BrowserSpawnFailed {
                browser: browser.to_path_buf(),
                reason: e.to_string(),
            }
            .into());
        }
    }

    collect_artifact(staged_dir).await
}

/// Move whatever the browser produced to the fixed output path
/// `<dist>/<name>.crx`. Chrome writes the package either as a sibling of the
/// staged directory or inside it, depending on version.
async fn collect_artifact(staged_dir: &Path) -> Result<Option<PathBuf>> {
    let name = match staged_dir.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return Ok(None),
    };
    let target = staged_dir.with_extension("crx");

    let candidates = [
        staged_dir.with_extension("crx"),
        staged_dir.join(format!("{name}.crx")),
    ];
    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        if candidate != target {
            fs::rename(&candidate, &target)
                .await
                .map_err(|e| SignError::RelocateFailed {
                    path: target.clone(),
                    reason: e.to_string(),
                })?;
        }
        return Ok(Some(target));
    }
    Ok(None)
}

/// Generate a 2048-bit RSA private key at `key_path` if it does not exist.
async fn ensure_signing_key(key_path: &Path) -> Result<()> {
    if key_path.exists() {
        return Ok(());
    }
    if let Some(parent) = key_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let output = Command::new("openssl")
        .args(["genrsa", "-out"])
        .arg(key_path)
        .arg("2048")
        .output()
        .await
        .map_err(|e| SignError::KeyGenerationFailed {
            path: key_path.to_path_buf(),
            reason: format!("failed to run openssl: {e}"),
        })?;

    if !output.status.success() {
        return Err(SignError::KeyGenerationFailed {
            path: key_path.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }
    Ok(())
}
