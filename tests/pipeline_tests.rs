//! End-to-end pipeline tests against a scratch extension project.
//!
//! These run the whole pipeline without a GitHub token, so the publish step
//! skips and no network traffic happens. The browser override points at a
//! binary that does not exist, which keeps the signed-package step
//! deterministic: it degrades to a skip on every machine.

use clipmd_release::cli::OutputManager;
use clipmd_release::pipeline::{ReleaseConfig, ReleasePipeline};
use clipmd_release::version::VersionBump;
use semver::Version;
use std::path::Path;

fn fixture_project(dir: &Path, version: &str) {
    std::fs::write(
        dir.join("manifest.json"),
        format!(
            "{{\n  \"manifest_version\": 3,\n  \"name\": \"ClipMD\",\n  \"version\": \"{version}\"\n}}\n"
        ),
    )
    .unwrap();
    std::fs::write(dir.join("background.js"), "// background").unwrap();
    std::fs::write(dir.join("turndown.js"), "// vendored turndown").unwrap();
    std::fs::write(dir.join("README.md"), "# ClipMD").unwrap();
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    std::fs::write(dir.join("icons/128.png"), "png bytes").unwrap();
}

fn config(root: &Path, bump: VersionBump) -> ReleaseConfig {
    ReleaseConfig {
        root: root.to_path_buf(),
        bump,
        key_path: Some(root.join("signing-key.pem")),
        browser_override: Some("/nonexistent/chrome-for-tests".to_string()),
        target_commitish: "main".to_string(),
        github_token: None,
    }
}

fn pipeline(root: &Path, bump: VersionBump) -> ReleasePipeline {
    ReleasePipeline::new(config(root, bump), OutputManager::new(true))
}

#[tokio::test]
async fn test_patch_release_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fixture_project(dir.path(), "1.2.3");

    let outcome = pipeline(dir.path(), VersionBump::Patch).run().await.unwrap();

    assert_eq!(outcome.version, Version::new(1, 2, 4));
    assert!(!outcome.published);
    assert!(outcome.uploaded.is_empty());

    // Manifest rewritten in place
    let manifest = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.2.4\""));

    // version.txt contains exactly the version string
    let version_txt = std::fs::read_to_string(dir.path().join("dist/version.txt")).unwrap();
    assert_eq!(version_txt, "1.2.4");

    // Zip artifact present even though signing and publishing were skipped
    assert!(outcome.zip.is_file());
    assert_eq!(outcome.zip, dir.path().join("dist/clipmd.zip"));
}

#[tokio::test]
async fn test_minor_release() {
    let dir = tempfile::tempdir().unwrap();
    fixture_project(dir.path(), "1.2.3");

    let outcome = pipeline(dir.path(), VersionBump::Minor).run().await.unwrap();
    assert_eq!(outcome.version, Version::new(1, 3, 0));
}

#[tokio::test]
async fn test_major_release() {
    let dir = tempfile::tempdir().unwrap();
    fixture_project(dir.path(), "0.9.9");

    let outcome = pipeline(dir.path(), VersionBump::Major).run().await.unwrap();
    assert_eq!(outcome.version, Version::new(1, 0, 0));
}

#[tokio::test]
async fn test_archive_mirrors_fixed_file_list() {
    let dir = tempfile::tempdir().unwrap();
    fixture_project(dir.path(), "1.0.0");
    // Not in the fixed list, must not be staged or archived
    std::fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

    let outcome = pipeline(dir.path(), VersionBump::Patch).run().await.unwrap();

    let reader = std::fs::File::open(&outcome.zip).unwrap();
    let mut zip = zip::ZipArchive::new(reader).unwrap();
    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();

    assert!(names.contains(&"clipmd/manifest.json".to_string()));
    assert!(names.contains(&"clipmd/background.js".to_string()));
    assert!(names.contains(&"clipmd/icons/128.png".to_string()));
    assert!(!names.iter().any(|n| n.contains("notes.txt")));
    // Missing entries from the fixed list are skipped, not errors
    assert!(!names.iter().any(|n| n.contains("offscreen")));
}

#[tokio::test]
async fn test_rerun_removes_stale_staged_files_and_advances_again() {
    let dir = tempfile::tempdir().unwrap();
    fixture_project(dir.path(), "1.2.3");

    pipeline(dir.path(), VersionBump::Patch).run().await.unwrap();
    let staged = dir.path().join("dist/clipmd");
    std::fs::write(staged.join("stale.txt"), "left over").unwrap();

    let outcome = pipeline(dir.path(), VersionBump::Patch).run().await.unwrap();

    assert_eq!(outcome.version, Version::new(1, 2, 5));
    assert!(!staged.join("stale.txt").exists());
    let version_txt = std::fs::read_to_string(dir.path().join("dist/version.txt")).unwrap();
    assert_eq!(version_txt, "1.2.5");
}

#[tokio::test]
async fn test_missing_manifest_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // No manifest.json written

    let result = pipeline(dir.path(), VersionBump::Patch).run().await;
    assert!(result.is_err());
}
