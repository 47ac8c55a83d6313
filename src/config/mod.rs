use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::abi::{ContractDirectory, InterfaceCatalog};
use crate::infrastructure::abi::{AbiScanner, ScanReport};

/// A deployed contract and where its ABI comes from
#[derive(Debug, Clone, Deserialize)]
pub struct ContractSpec {
    pub name: String,
    pub address: String,
    /// Path to an ABI/artifact JSON file, or the name of a scanned artifact
    pub abi: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub abi_paths: Vec<String>,

    /// ABIs checked before the target contract's own, in order
    #[serde(default)]
    pub priority_abis: Vec<String>,

    #[serde(default)]
    pub contracts: Vec<ContractSpec>,

    /// Rows per page in pool listings
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl ContractSpec {
    pub fn parsed_address(&self) -> Result<Address> {
        self.address
            .trim()
            .parse::<Address>()
            .with_context(|| format!("contract {}: invalid address {}", self.name, self.address))
    }
}

/// Load the config file; a missing file yields the defaults
pub fn load() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        debug!("no config at {}", path.display());
        return Ok(Config::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("parse config {}", path.display()))?;
    info!(
        "loaded config {} ({} contracts, {} priority ABIs)",
        path.display(),
        config.contracts.len(),
        config.priority_abis.len()
    );
    Ok(config)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("GOVLENS_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("govlens").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("govlens").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "govlens", "govlens")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Roots scanned for ABI artifacts; the working directory when none are set
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = self
            .abi_paths
            .iter()
            .filter_map(|raw| expand_path(raw))
            .collect();
        if roots.is_empty() {
            roots.push(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        }
        roots
    }

    /// Build the contract directory the decoder searches.
    ///
    /// ABI references naming an existing file are loaded directly; anything
    /// else is looked up among the artifacts found under [`Config::scan_roots`].
    pub fn directory(&self) -> Result<ContractDirectory> {
        let mut resolver = CatalogResolver::new(self.scan_roots());
        let mut directory = ContractDirectory::new();

        for reference in &self.priority_abis {
            let catalog = resolver
                .resolve(reference)
                .with_context(|| format!("priority ABI {}", reference))?;
            directory = directory.with_priority(catalog);
        }

        for contract in &self.contracts {
            let address = contract.parsed_address()?;
            let catalog = resolver
                .resolve(&contract.abi)
                .with_context(|| format!("ABI for contract {}", contract.name))?;
            directory.insert(contract.name.clone(), address, catalog);
        }

        debug!(
            "directory: {} priority catalogs, {} contracts",
            directory.priority_catalogs().len(),
            directory.len()
        );
        Ok(directory)
    }
}

/// Resolves ABI references, scanning the roots at most once
struct CatalogResolver {
    roots: Vec<PathBuf>,
    report: Option<ScanReport>,
}

impl CatalogResolver {
    fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            report: None,
        }
    }

    fn resolve(&mut self, reference: &str) -> Result<InterfaceCatalog> {
        if let Some(path) = expand_path(reference).filter(|path| path.is_file()) {
            return AbiScanner::load_file(&path)?
                .ok_or_else(|| anyhow!("no ABI in {}", path.display()));
        }

        let roots = &self.roots;
        let report = self
            .report
            .get_or_insert_with(|| AbiScanner::scan_roots(roots));
        report.catalog(reference.trim()).cloned().ok_or_else(|| {
            anyhow!(
                "{} is neither a file nor a scanned artifact ({} files scanned)",
                reference,
                report.scanned_files
            )
        })
    }
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}
