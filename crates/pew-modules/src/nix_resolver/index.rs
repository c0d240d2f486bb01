//! Package lookup through the `nix` command line.

use super::error::IndexError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// An exact match found in the package index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Attribute name, e.g. `ripgrep`.
    pub attr: String,
    pub pname: String,
    pub version: String,
    pub description: String,
}

pub trait PackageIndex {
    /// Find the package whose attribute name is exactly `name`.
    ///
    /// `tool` is the located index binary.
    fn search_exact(&self, tool: &Path, name: &str) -> Result<Option<Package>, IndexError>;
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    pname: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
}

/// `nix search <flake> '^name$' --json`.
#[derive(Debug, Clone)]
pub struct NixCli {
    flake: String,
    experimental_features: String,
}

impl NixCli {
    pub fn new(flake: impl Into<String>, experimental_features: impl Into<String>) -> Self {
        Self {
            flake: flake.into(),
            experimental_features: experimental_features.into(),
        }
    }

    fn search_args(&self, name: &str) -> Vec<String> {
        vec![
            "--extra-experimental-features".to_string(),
            self.experimental_features.clone(),
            "search".to_string(),
            self.flake.clone(),
            format!("^{}$", regex::escape(name)),
            "--json".to_string(),
        ]
    }
}

/// Pick the hit whose attribute path ends in `name`.
///
/// Attribute paths look like `legacyPackages.x86_64-linux.ripgrep`.
pub(crate) fn exact_match(stdout: &str, name: &str) -> Result<Option<Package>, IndexError> {
    if stdout.trim().is_empty() {
        return Ok(None);
    }
    let hits: BTreeMap<String, SearchHit> = serde_json::from_str(stdout)?;
    Ok(hits.into_iter().find_map(|(path, hit)| {
        let attr = path.rsplit('.').next().unwrap_or(&path);
        (attr == name).then(|| Package {
            attr: attr.to_string(),
            pname: hit.pname,
            version: hit.version,
            description: hit.description,
        })
    }))
}

impl PackageIndex for NixCli {
    fn search_exact(&self, tool: &Path, name: &str) -> Result<Option<Package>, IndexError> {
        let args = self.search_args(name);
        debug!(tool = %tool.display(), ?args, "searching package index");

        let output = Command::new(tool)
            .args(&args)
            .output()
            .map_err(|source| IndexError::Spawn {
                tool: tool.to_path_buf(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            // nix search fails outright when nothing matches
            if stderr.contains("no results") {
                return Ok(None);
            }
            return Err(IndexError::Query {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        exact_match(&String::from_utf8_lossy(&output.stdout), name)
    }
}
