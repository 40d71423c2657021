//! Zip archive creation for the staged file set.
//!
//! The archive is named after the staging directory and placed alongside it,
//! with every entry rooted at the staging directory's name (unpacking yields
//! a single `clipmd/` directory). Entries are written in sorted order so the
//! archive layout is deterministic for identical staged contents.

use crate::error::{Result, StageError};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Compress `staged_dir` into `<staged_dir>.zip` next to it.
///
/// Returns the path of the written archive.
pub fn archive(staged_dir: &Path) -> Result<PathBuf> {
    let dist = staged_dir
        .parent()
        .ok_or_else(|| StageError::InvalidStagingDir {
            path: staged_dir.to_path_buf(),
        })?;
    let name = staged_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StageError::InvalidStagingDir {
            path: staged_dir.to_path_buf(),
        })?;
    let zip_path = dist.join(format!("{name}.zip"));

    let file = std::fs::File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer
        .add_directory(format!("{name}/"), options)
        .map_err(StageError::from)?;

    for entry in walkdir::WalkDir::new(staged_dir)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(StageError::from)?;
        let rel = entry
            .path()
            .strip_prefix(staged_dir)
            .map_err(|_| StageError::InvalidStagingDir {
                path: entry.path().to_path_buf(),
            })?;
        // Zip entry names always use forward slashes
        let entry_name: String = std::iter::once(name)
            .chain(rel.components().map(|c| {
                c.as_os_str().to_str().unwrap_or_default()
            }))
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{entry_name}/"), options)
                .map_err(StageError::from)?;
        } else {
            writer
                .start_file(entry_name, options)
                .map_err(StageError::from)?;
            let mut src = std::fs::File::open(entry.path())?;
            io::copy(&mut src, &mut writer)?;
        }
    }

    writer.finish().map_err(StageError::from)?;
    log::debug!("wrote archive {}", zip_path.display());
    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_named_after_staged_dir() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("clipmd");
        std::fs::create_dir_all(staged.join("icons")).unwrap();
        std::fs::write(staged.join("manifest.json"), "{}").unwrap();
        std::fs::write(staged.join("icons/128.png"), "png").unwrap();

        let zip_path = archive(&staged).unwrap();
        assert_eq!(zip_path, dir.path().join("clipmd.zip"));

        let reader = std::fs::File::open(&zip_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"clipmd/manifest.json".to_string()));
        assert!(names.contains(&"clipmd/icons/128.png".to_string()));
    }

    #[test]
    fn test_archive_is_deterministic_for_identical_contents() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("clipmd");
        std::fs::create_dir_all(&staged).unwrap();
        std::fs::write(staged.join("b.js"), "b").unwrap();
        std::fs::write(staged.join("a.js"), "a").unwrap();

        let zip_path = archive(&staged).unwrap();
        let reader = std::fs::File::open(&zip_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        // sorted entry order
        assert_eq!(
            names,
            vec![
                "clipmd/".to_string(),
                "clipmd/a.js".to_string(),
                "clipmd/b.js".to_string()
            ]
        );
    }
}
