use std::path::PathBuf;

use anyhow::Result;

use crate::models::ProjectSnapshot;

pub mod node;

/// What to collect when walking a project's dependency tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Project root to start traversal from.
    pub start: PathBuf,
    /// Leave development-only dependencies out.
    pub production: bool,
    /// Package names (`name` or `name@version`) to omit from the snapshot.
    pub exclude: Vec<String>,
}

pub trait Analyzer {
    fn analyze(&self, options: &ScanOptions) -> Result<ProjectSnapshot>;
}
