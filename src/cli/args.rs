//! Command line argument parsing.
//!
//! Every option is optional with an environment fallback, so a bare
//! `clipmd_release` in the project root does a patch release.

use crate::pipeline::ReleaseConfig;
use crate::version::VersionBump;
use clap::Parser;
use std::path::PathBuf;

/// Release tool for the ClipMD browser extension
#[derive(Parser, Debug)]
#[command(
    name = "clipmd_release",
    version,
    about = "Release tool for the ClipMD browser extension",
    long_about = "Bump the manifest version, stage and zip the extension, optionally \
produce a signed crx, and publish both as GitHub release assets.

Usage:
  clipmd_release                 # patch release from the current directory
  BUMP=minor clipmd_release      # minor release
  clipmd_release --bump major --root /path/to/clipmd"
)]
pub struct Args {
    /// Version component to bump: major, minor, or patch (anything else
    /// means patch)
    #[arg(long, env = "BUMP", default_value = "patch", value_name = "KIND")]
    pub bump: String,

    /// Extension project root containing manifest.json
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// RSA signing key location; generated when the file is absent
    /// [default: <root>/signing-key.pem]
    #[arg(long, env = "KEY_PATH", value_name = "FILE")]
    pub key_path: Option<PathBuf>,

    /// Chrome/Chromium binary override; PATH is probed when unset
    #[arg(long, env = "CHROME_BIN", value_name = "BIN")]
    pub chrome: Option<String>,

    /// Base reference for newly created releases
    #[arg(
        long,
        env = "TARGET_COMMITISH",
        default_value = "main",
        value_name = "REF"
    )]
    pub target_commitish: String,

    /// GitHub API token; publishing is skipped when absent
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Convert parsed arguments into pipeline configuration.
    pub fn into_config(self) -> ReleaseConfig {
        ReleaseConfig {
            bump: VersionBump::parse_lenient(&self.bump),
            root: self.root,
            key_path: self.key_path,
            browser_override: self.chrome,
            target_commitish: self.target_commitish,
            // GH_TOKEN is accepted as a fallback alongside GITHUB_TOKEN
            github_token: self
                .github_token
                .or_else(|| std::env::var("GH_TOKEN").ok())
                .filter(|t| !t.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["clipmd_release"]).unwrap();
        assert_eq!(args.bump, "patch");
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.target_commitish, "main");
    }

    #[test]
    fn test_unrecognized_bump_kind_degrades_to_patch() {
        let args = Args::try_parse_from(["clipmd_release", "--bump", "whatever"]).unwrap();
        let config = args.into_config();
        assert_eq!(config.bump, VersionBump::Patch);
    }

    #[test]
    fn test_bump_kinds_map_through() {
        for (raw, expected) in [
            ("major", VersionBump::Major),
            ("minor", VersionBump::Minor),
            ("patch", VersionBump::Patch),
        ] {
            let args = Args::try_parse_from(["clipmd_release", "--bump", raw]).unwrap();
            assert_eq!(args.into_config().bump, expected);
        }
    }
}
