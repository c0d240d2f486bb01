//! `config.toml` loading.

use crate::registry::ModuleKind;
use anyhow::{Context, Result};
use pew_modules::NixSettings;
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

pub const CONFIG_ENV: &str = "PEW_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Module order. Overridden by `--modules`.
    pub modules: Option<Vec<ModuleKind>>,
    pub nix: NixSettings,
    pub fetch: FetchConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub proxies: Vec<String>,
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    /// Named by the user; it has to exist.
    Explicit(PathBuf),
    /// The per-user default; absence means defaults.
    Default(PathBuf),
}

/// `--config`, then `$PEW_CONFIG`, then `<config dir>/pew/config.toml`.
pub fn locate(
    flag: Option<PathBuf>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<ConfigPath> {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .map(ConfigPath::Explicit)
        .or_else(|| config_dir.map(|d| ConfigPath::Default(d.join("pew").join("config.toml"))))
}

pub fn parse(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

pub fn load(path: Option<&ConfigPath>) -> Result<Config> {
    let (path, required) = match path {
        Some(ConfigPath::Explicit(p)) => (p, true),
        Some(ConfigPath::Default(p)) => (p, false),
        None => return Ok(Config::default()),
    };

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "no configuration file");
            return Ok(Config::default());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    parse(&text).with_context(|| format!("Invalid configuration in {}", path.display()))
}
