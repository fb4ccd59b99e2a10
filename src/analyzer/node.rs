use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ScanOptions;
use crate::models::{DependencyRecord, Licenses, ProjectSnapshot};

/// File name prefixes that mark a license file, highest priority first.
const LICENSE_FILE_PATTERNS: [&str; 3] = [r"(?i)^licen[cs]e", r"(?i)^copying", r"(?i)^notice"];

const SEE_LICENSE_IN: &str = "SEE LICENSE IN ";

/// Walks an installed `node_modules` tree starting from the project's `package.json`.
pub struct NodeAnalyzer;

impl NodeAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
    license: Option<LicenseValue>,
    licenses: Option<LicenseValue>,
}

/// `license` / `licenses` as found in the wild: a string, a `{ "type": ... }`
/// object, or a list of either. Anything else carries no license type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseValue {
    Id(String),
    Object {
        #[serde(rename = "type")]
        kind: String,
    },
    List(Vec<LicenseValue>),
    Other(serde_json::Value),
}

impl LicenseValue {
    fn collect_ids(&self, out: &mut Vec<String>) {
        match self {
            LicenseValue::Id(id) => out.push(id.clone()),
            LicenseValue::Object { kind } => out.push(kind.clone()),
            LicenseValue::List(items) => items.iter().for_each(|item| item.collect_ids(out)),
            LicenseValue::Other(_) => {}
        }
    }
}

/// A dependency edge waiting to be resolved.
struct Pending {
    name: String,
    range: String,
    from: PathBuf,
    optional: bool,
}

impl super::Analyzer for NodeAnalyzer {
    fn analyze(&self, options: &ScanOptions) -> Result<ProjectSnapshot> {
        // Canonical paths so symlinked layouts (pnpm) resolve from the real location.
        let root = std::fs::canonicalize(&options.start).unwrap_or_else(|_| options.start.clone());
        let root = root.as_path();
        let manifest_path = root.join("package.json");
        if !manifest_path.is_file() {
            debug!("No package.json in {}, nothing to scan", root.display());
            return Ok(ProjectSnapshot::new());
        }

        let manifest = read_package_json(&manifest_path)?;
        let patterns = LICENSE_FILE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut queue = edges(&manifest, root, !options.production);
        let mut visited: HashSet<PathBuf> = HashSet::new();
        // Keyed by record name so the snapshot comes out sorted.
        let mut records: BTreeMap<String, DependencyRecord> = BTreeMap::new();

        while let Some(edge) = queue.pop() {
            let Some(dir) = locate_package(&edge.from, root, &edge.name) else {
                if edge.optional {
                    debug!("Optional dependency {} is not installed", edge.name);
                } else {
                    debug!("Dependency {}@{} is not installed", edge.name, edge.range);
                    if !is_excluded(&options.exclude, &edge.name, &edge.name) {
                        records
                            .entry(edge.name.clone())
                            .or_insert_with(|| DependencyRecord::new(edge.name.clone()));
                    }
                }
                continue;
            };

            let dir = std::fs::canonicalize(&dir).unwrap_or(dir);
            if !visited.insert(dir.clone()) {
                continue;
            }

            let package = match read_package_json(&dir.join("package.json")) {
                Ok(package) => package,
                Err(err) => {
                    warn!("Skipping license metadata of {}: {:#}", edge.name, err);
                    if !is_excluded(&options.exclude, &edge.name, &edge.name) {
                        let mut record = DependencyRecord::new(edge.name.clone());
                        if let Some(path) = find_license_file(&dir, &patterns) {
                            record = record.with_license_file(path);
                        }
                        records.entry(edge.name.clone()).or_insert(record);
                    }
                    continue;
                }
            };
            let name = package.name.clone().unwrap_or_else(|| edge.name.clone());
            let key = match &package.version {
                Some(version) => format!("{}@{}", name, version),
                None => name.clone(),
            };

            if !is_excluded(&options.exclude, &name, &key) {
                let record = build_record(&key, &package, &dir, &patterns);
                records.entry(key).or_insert(record);
            }

            queue.extend(edges(&package, &dir, false));
        }

        debug!("Collected {} dependencies from {}", records.len(), root.display());
        Ok(records.into_values().collect())
    }
}

fn read_package_json(path: &Path) -> Result<PackageJson> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn edges(package: &PackageJson, from: &Path, include_dev: bool) -> Vec<Pending> {
    let pending = |(name, range): (&String, &String), optional: bool| Pending {
        name: name.clone(),
        range: range.clone(),
        from: from.to_path_buf(),
        optional,
    };

    let mut out: Vec<Pending> = package
        .dependencies
        .iter()
        .map(|dep| pending(dep, false))
        .collect();
    out.extend(package.optional_dependencies.iter().map(|dep| pending(dep, true)));
    if include_dev {
        out.extend(package.dev_dependencies.iter().map(|dep| pending(dep, false)));
    }
    out
}

/// Node's module lookup: `<dir>/node_modules/<name>`, walking up to `root`.
fn locate_package(from: &Path, root: &Path, name: &str) -> Option<PathBuf> {
    let mut dir = Some(from);
    while let Some(current) = dir {
        let candidate = current.join("node_modules").join(name);
        if candidate.join("package.json").is_file() {
            return Some(candidate);
        }
        if current == root {
            break;
        }
        dir = current.parent();
    }
    None
}

fn is_excluded(exclude: &[String], name: &str, key: &str) -> bool {
    exclude.iter().any(|e| e == name || e == key)
}

fn build_record(
    key: &str,
    package: &PackageJson,
    dir: &Path,
    patterns: &[Regex],
) -> DependencyRecord {
    let declared = [package.license.as_ref(), package.licenses.as_ref()]
        .into_iter()
        .flatten()
        .find(|value| !matches!(value, LicenseValue::Other(_)));
    let mut ids = Vec::new();
    if let Some(value) = declared {
        value.collect_ids(&mut ids);
    }

    // "SEE LICENSE IN <file>" names the license file rather than a license type.
    let mut license_file = None;
    ids.retain(|id| match id.strip_prefix(SEE_LICENSE_IN) {
        Some(file) => {
            let file = Path::new(file.trim());
            if is_contained(file) {
                license_file.get_or_insert_with(|| dir.join(file));
            } else {
                warn!("Ignoring license file {} outside {}", file.display(), dir.display());
            }
            false
        }
        None => true,
    });

    let single = !matches!(declared, Some(LicenseValue::List(_)));
    let licenses = match ids.len() {
        0 => None,
        1 if single => ids.pop().map(Licenses::Single),
        _ => Some(Licenses::Multiple(ids)),
    };

    let mut record = DependencyRecord::new(key);
    if let Some(path) = license_file.or_else(|| find_license_file(dir, patterns)) {
        record = record.with_license_file(path);
    }
    if let Some(licenses) = licenses {
        record = record.with_licenses(licenses);
    }
    record
}

/// Relative path that cannot leave the directory it is joined onto.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn find_license_file(dir: &Path, patterns: &[Regex]) -> Option<PathBuf> {
    let mut files: Vec<(usize, String)> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let rank = patterns.iter().position(|re| re.is_match(&file_name))?;
            Some((rank, file_name))
        })
        .collect();

    files.sort();
    files.into_iter().next().map(|(_, file_name)| dir.join(file_name))
}
