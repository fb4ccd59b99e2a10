use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole license resolution.
///
/// Per-dependency problems never show up here; they degrade to placeholder
/// content instead.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Cannot find directory {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error(transparent)]
    Metadata(#[from] anyhow::Error),
}
