//! Staging and archiving of the distributable file set.

mod archive;
mod stage;

pub use archive::archive;
pub use stage::{STAGED_FILES, stage};
