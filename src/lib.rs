//! # clipmd_release
//!
//! Release automation for the ClipMD browser extension.
//!
//! One invocation runs a linear pipeline: bump the semantic version in
//! `manifest.json`, stage the fixed distributable file set into
//! `dist/clipmd/`, zip it, optionally produce a signed `clipmd.crx` with a
//! locally installed Chrome/Chromium, and optionally publish both artifacts
//! as assets on a GitHub release tagged `v<version>`.
//!
//! Core steps (version, staging, archive) abort the run on failure.
//! Auxiliary steps (signing, publishing) are best-effort and downgrade to a
//! logged skip, so local builds work without a browser, a token, or network
//! access.
//!
//! ## Usage
//!
//! ```bash
//! clipmd_release                 # patch release
//! BUMP=minor clipmd_release      # minor release
//! clipmd_release --bump major    # major release
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod bundle;
pub mod cli;
pub mod crx;
pub mod error;
pub mod git;
pub mod github;
pub mod pipeline;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use git::RemoteRepo;
pub use github::ReleasePublisher;
pub use pipeline::{ReleaseConfig, ReleaseOutcome, ReleasePipeline};
pub use version::VersionBump;
