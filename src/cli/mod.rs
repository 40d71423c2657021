//! Command line interface for clipmd_release.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::error::Result;
use crate::pipeline::ReleasePipeline;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(false);

    let pipeline = ReleasePipeline::new(args.into_config(), output);
    let outcome = pipeline.run().await?;

    // The bare version string is the machine-readable output
    println!("{}", outcome.version);
    Ok(0)
}
