//! ABI file scanner - discovers and parses ABI files into interface catalogs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use alloy_json_abi::{AbiItem, EventParam, Param};
use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::abi::{
    ConstructorEntry, EventEntry, FunctionEntry, InterfaceCatalog, InterfaceEntry, ParamSpec,
};

/// Catalogs found by a scan
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    pub catalogs: Vec<InterfaceCatalog>,
    /// Number of files scanned
    pub scanned_files: usize,
    /// Scan errors
    pub errors: Vec<String>,
    /// Scan duration in milliseconds
    pub scan_ms: u128,
}

impl ScanReport {
    /// First catalog with the given name (artifact file stem)
    pub fn catalog(&self, name: &str) -> Option<&InterfaceCatalog> {
        self.catalogs.iter().find(|catalog| catalog.name == name)
    }

    fn merge(&mut self, other: Self) {
        self.scanned_files = self.scanned_files.saturating_add(other.scanned_files);
        self.errors.extend(other.errors);
        self.catalogs.extend(other.catalogs);
    }
}

/// ABI file scanner
#[derive(Debug)]
pub struct AbiScanner;

impl AbiScanner {
    /// Scan a single root directory for ABI files
    pub fn scan(root: impl AsRef<Path>) -> ScanReport {
        let started = Instant::now();
        let root = root.as_ref();
        let mut report = ScanReport::default();

        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    report.errors.push(err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            // Only process JSON files in out/ or artifacts/ directories
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if !Self::path_contains_any(path, &["out", "artifacts"]) {
                continue;
            }

            // Skip files larger than 5MB
            let metadata = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    report.errors.push(format!("{}: {}", path.display(), err));
                    continue;
                }
            };
            if metadata.len() > 5 * 1024 * 1024 {
                continue;
            }

            entries.push(path.to_path_buf());
        }

        for path in entries {
            report.scanned_files += 1;
            match Self::load_file(&path) {
                Ok(Some(catalog)) => report.catalogs.push(catalog),
                Ok(None) => {}
                Err(err) => {
                    warn!("skipping {}: {:#}", path.display(), err);
                    report.errors.push(format!("{}: {:#}", path.display(), err));
                }
            }
        }

        report.scan_ms = started.elapsed().as_millis();
        debug!(
            "scanned {} files under {}, {} catalogs",
            report.scanned_files,
            root.display(),
            report.catalogs.len()
        );

        report
    }

    /// Scan multiple root directories
    pub fn scan_roots(roots: &[PathBuf]) -> ScanReport {
        let started = Instant::now();
        let mut report = ScanReport::default();

        for root in roots {
            report.merge(Self::scan(root));
        }

        report.scan_ms = started.elapsed().as_millis();
        report
    }

    /// Load a single ABI file; the catalog is named after the file stem.
    ///
    /// Returns `Ok(None)` for JSON that carries no ABI.
    pub fn load_file(path: &Path) -> Result<Option<InterfaceCatalog>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::parse_catalog(name, &content)
    }

    /// Parse ABI JSON - either a raw array or an artifact with an "abi" field
    pub fn parse_catalog(name: &str, content: &str) -> Result<Option<InterfaceCatalog>> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        let abi_value = if value.is_array() {
            value
        } else if let Some(abi) = value.get("abi") {
            abi.clone()
        } else {
            return Ok(None); // No ABI found, skip silently
        };

        let items: Vec<AbiItem<'static>> =
            serde_json::from_value(abi_value).context("parse ABI items")?;

        let entries = items
            .into_iter()
            .filter_map(|item| match item {
                AbiItem::Function(function) => Some(InterfaceEntry::Function(FunctionEntry::new(
                    function.name.clone(),
                    Self::params(&function.inputs),
                ))),
                AbiItem::Event(event) => Some(InterfaceEntry::Event(EventEntry {
                    name: event.name.clone(),
                    inputs: Self::event_params(&event.inputs),
                    anonymous: event.anonymous,
                })),
                AbiItem::Constructor(constructor) => {
                    Some(InterfaceEntry::Constructor(ConstructorEntry {
                        inputs: Self::params(&constructor.inputs),
                    }))
                }
                _ => None,
            })
            .collect();

        Ok(Some(InterfaceCatalog::new(name, entries)))
    }

    fn params(inputs: &[Param]) -> Vec<ParamSpec> {
        inputs
            .iter()
            .map(|input| ParamSpec::new(input.name.clone(), input.selector_type()))
            .collect()
    }

    fn event_params(inputs: &[EventParam]) -> Vec<ParamSpec> {
        inputs
            .iter()
            .map(|input| ParamSpec::new(input.name.clone(), input.selector_type()))
            .collect()
    }

    /// Check if a path should be ignored
    fn is_ignored_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| {
                matches!(
                    name,
                    ".git" | "target" | "node_modules" | ".next" | "dist" | "build"
                )
            })
            .unwrap_or(false)
    }

    /// Check if path contains any of the given names
    fn path_contains_any(path: &Path, names: &[&str]) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(value) = component {
                if let Some(value) = value.to_str() {
                    return names.iter().any(|name| *name == value);
                }
            }
            false
        })
    }
}
