//! Resolves each production dependency's license content and groups
//! dependencies that share it.
//!
//! Per-dependency lookups run concurrently; grouping happens once all of them
//! have settled, in the snapshot's original order.

use std::collections::HashMap;
use std::path::Path;

use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::analyzer::{Analyzer, ScanOptions};
use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::models::{DependencyRecord, LicenseGroup, UNKNOWN_LICENSE};

pub struct LicenseResolver<A, F> {
    analyzer: A,
    fs: F,
    exclude: Vec<String>,
}

impl<A: Analyzer, F: FileSystem> LicenseResolver<A, F> {
    pub fn new(analyzer: A, fs: F) -> Self {
        Self {
            analyzer,
            fs,
            exclude: Vec::new(),
        }
    }

    /// Packages to leave out of the scan, by `name` or `name@version`.
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Group the production dependencies of `project_path` by license content.
    ///
    /// Fails only when `project_path` is not a directory or the dependency
    /// metadata cannot be collected. Dependencies without usable license
    /// information end up in the [`UNKNOWN_LICENSE`] group.
    pub async fn resolve_project_licenses(
        &self,
        project_path: &Path,
    ) -> Result<Vec<LicenseGroup>, ResolveError> {
        if !self.fs.does_folder_exist(project_path).await {
            error!("Cannot find directory {}", project_path.display());
            return Err(ResolveError::DirectoryNotFound(project_path.to_path_buf()));
        }

        let options = ScanOptions {
            start: project_path.to_path_buf(),
            production: true,
            exclude: self.exclude.clone(),
        };
        let snapshot = self.analyzer.analyze(&options)?;
        if snapshot.is_empty() {
            debug!("No production dependencies found in {}", project_path.display());
        } else {
            debug!("Resolving licenses for {} dependencies", snapshot.len());
        }

        let contents = join_all(snapshot.iter().map(|record| self.resolve_content(record))).await;

        Ok(group_by_content(
            snapshot.iter().map(|record| record.name.as_str()).zip(contents),
        ))
    }

    async fn resolve_content(&self, record: &DependencyRecord) -> String {
        if let Some(path) = &record.license_file {
            if self.fs.does_file_exist(path).await {
                match self.fs.read_file(path).await {
                    Ok(content) => return content,
                    Err(err) => warn!(
                        "Unable to read license file {} for {}: {}",
                        path.display(),
                        record.name,
                        err
                    ),
                }
            }
        }

        if let Some(license) = record.licenses.as_ref().and_then(|l| l.first()) {
            return format!("({})", license);
        }

        warn!("No license found for {}!", record.name);
        UNKNOWN_LICENSE.to_string()
    }
}

/// Group names by exact content, keeping first-seen order for both groups and names.
fn group_by_content<'a>(resolved: impl IntoIterator<Item = (&'a str, String)>) -> Vec<LicenseGroup> {
    let mut groups: Vec<LicenseGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (name, content) in resolved {
        match index.get(&content) {
            Some(&i) => groups[i].dependencies.push(name.to_string()),
            None => {
                index.insert(content.clone(), groups.len());
                groups.push(LicenseGroup {
                    content,
                    dependencies: vec![name.to_string()],
                });
            }
        }
    }

    groups
}
