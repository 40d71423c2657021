//! Version management for extension releases.
//!
//! Provides lenient semantic version parsing (the manifest may carry a
//! shortened form like `"1.2"`) and single-component bumping.

mod manifest;

pub use manifest::{persist_version, read_manifest_version};

use crate::error::{Result, VersionError};
use semver::Version;

/// Which version component to increment.
///
/// Parsing is infallible: anything that is not `major` or `minor`
/// (case-insensitive) is treated as `patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionBump {
    /// Increment major, zero minor and patch
    Major,
    /// Increment minor, zero patch
    Minor,
    /// Increment patch
    #[default]
    Patch,
}

impl VersionBump {
    /// Parse a bump kind leniently. Unrecognized or empty input means patch.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => VersionBump::Major,
            "minor" => VersionBump::Minor,
            _ => VersionBump::Patch,
        }
    }

    /// Apply this bump to a version, returning the next version.
    ///
    /// Exactly one component is incremented; all lower-order components are
    /// reset to zero.
    pub fn apply(&self, current: &Version) -> Version {
        match self {
            VersionBump::Major => Version::new(current.major + 1, 0, 0),
            VersionBump::Minor => Version::new(current.major, current.minor + 1, 0),
            VersionBump::Patch => Version::new(current.major, current.minor, current.patch + 1),
        }
    }
}

impl std::fmt::Display for VersionBump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// Parse a version string leniently.
///
/// Accepts 1-3 dot-separated non-negative integers; missing components
/// default to zero and components past the third are ignored. A component
/// that is not an integer is a fatal parse error.
pub fn parse_lenient(s: &str) -> Result<Version> {
    let mut components = [0u64; 3];
    for (i, part) in s.trim().split('.').take(3).enumerate() {
        components[i] = part.parse::<u64>().map_err(|e| VersionError::InvalidVersion {
            version: s.to_string(),
            reason: format!("component '{part}' is not an integer: {e}"),
        })?;
    }
    Ok(Version::new(components[0], components[1], components[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_full() {
        assert_eq!(parse_lenient("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_lenient_missing_components_default_to_zero() {
        assert_eq!(parse_lenient("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_lenient("7").unwrap(), Version::new(7, 0, 0));
    }

    #[test]
    fn test_parse_lenient_extra_components_ignored() {
        assert_eq!(parse_lenient("1.2.3.4").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_lenient_rejects_non_integers() {
        assert!(parse_lenient("1.x.3").is_err());
        assert!(parse_lenient("").is_err());
        assert!(parse_lenient("1.2.3-beta").is_err());
    }

    #[test]
    fn test_bump_patch() {
        let next = VersionBump::Patch.apply(&Version::new(1, 2, 3));
        assert_eq!(next, Version::new(1, 2, 4));
    }

    #[test]
    fn test_bump_minor_zeroes_patch() {
        let next = VersionBump::Minor.apply(&Version::new(1, 2, 3));
        assert_eq!(next, Version::new(1, 3, 0));
    }

    #[test]
    fn test_bump_major_zeroes_lower_components() {
        let next = VersionBump::Major.apply(&Version::new(0, 9, 9));
        assert_eq!(next, Version::new(1, 0, 0));
    }

    #[test]
    fn test_bump_is_strictly_advancing() {
        let current = Version::new(2, 5, 9);
        for bump in [VersionBump::Major, VersionBump::Minor, VersionBump::Patch] {
            assert!(bump.apply(&current) > current);
        }
    }

    #[test]
    fn test_bump_kind_parse_lenient() {
        assert_eq!(VersionBump::parse_lenient("major"), VersionBump::Major);
        assert_eq!(VersionBump::parse_lenient("MINOR"), VersionBump::Minor);
        assert_eq!(VersionBump::parse_lenient("patch"), VersionBump::Patch);
        assert_eq!(VersionBump::parse_lenient("banana"), VersionBump::Patch);
        assert_eq!(VersionBump::parse_lenient(""), VersionBump::Patch);
    }
}
