use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Placeholder content for dependencies with neither a license file nor a license type.
pub const UNKNOWN_LICENSE: &str = "Unknown license!";

/// License metadata for one resolved package.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyRecord {
    pub name: String,
    pub license_file: Option<PathBuf>,
    pub licenses: Option<Licenses>,
}

impl DependencyRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            license_file: None,
            licenses: None,
        }
    }

    pub fn with_license_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.license_file = Some(path.into());
        self
    }

    pub fn with_licenses(mut self, licenses: Licenses) -> Self {
        self.licenses = Some(licenses);
        self
    }
}

/// One license identifier, or several in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Licenses {
    Single(String),
    Multiple(Vec<String>),
}

impl Licenses {
    /// The authoritative license type: the only one, or the first of several.
    /// Empty strings and empty lists count as no license type at all.
    pub fn first(&self) -> Option<&str> {
        let first = match self {
            Licenses::Single(id) => Some(id.as_str()),
            Licenses::Multiple(ids) => ids.first().map(String::as_str),
        };
        first.filter(|id| !id.is_empty())
    }
}

/// Dependencies of one project, keyed by name, in the order the analyzer produced them.
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    records: Vec<DependencyRecord>,
    index: HashMap<String, usize>,
}

impl ProjectSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns `false` and keeps the existing entry when the
    /// name is already present.
    pub fn insert(&mut self, record: DependencyRecord) -> bool {
        if self.index.contains_key(&record.name) {
            return false;
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, name: &str) -> Option<&DependencyRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DependencyRecord> for ProjectSnapshot {
    fn from_iter<I: IntoIterator<Item = DependencyRecord>>(iter: I) -> Self {
        let mut snapshot = ProjectSnapshot::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

/// Dependencies sharing byte-identical license content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseGroup {
    pub content: String,
    pub dependencies: Vec<String>,
}

impl LicenseGroup {
    pub fn is_unknown(&self) -> bool {
        self.content == UNKNOWN_LICENSE
    }

    /// First non-blank line of the content, for one-line summaries.
    pub fn headline(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}
