//! The modules pew knows about and the order they run in.

use crate::config::Config;
use clap::ValueEnum;
use pew_core::{Module, Pipeline};
use pew_fetch::ClientSetting;
use pew_modules::nix_resolver::HttpFetch;
use pew_modules::{NixResolver, SameDirExecutable};
use serde::Deserialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// Run `./foo` for `foo` when it sits in the working directory
    SameDir,
    /// Offer packages from nixpkgs for missing commands
    Nix,
}

pub const DEFAULT_ORDER: [ModuleKind; 2] = [ModuleKind::SameDir, ModuleKind::Nix];

impl ModuleKind {
    fn instantiate(self, config: &Config) -> Box<dyn Module> {
        match self {
            ModuleKind::SameDir => Box::new(SameDirExecutable),
            ModuleKind::Nix => {
                let setting = ClientSetting {
                    proxies: config.fetch.proxies.clone(),
                    ..ClientSetting::default()
                };
                Box::new(NixResolver::from_settings(config.nix.clone(), HttpFetch::new(setting)))
            }
        }
    }
}

/// Build the pipeline in `kinds` order. Repeated kinds run once.
pub fn build(kinds: &[ModuleKind], config: &Config) -> Pipeline {
    let mut seen = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if seen.contains(kind) {
            debug!(?kind, "module listed twice");
            continue;
        }
        seen.push(*kind);
    }
    Pipeline::from_modules(seen.into_iter().map(|k| k.instantiate(config)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let pipeline = build(&DEFAULT_ORDER, &Config::default());
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["SameDirExecutable", "NixResolver"]);
    }

    #[test]
    fn test_order_follows_request() {
        let kinds = [ModuleKind::Nix, ModuleKind::SameDir, ModuleKind::Nix];
        let pipeline = build(&kinds, &Config::default());
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["NixResolver", "SameDirExecutable"]);
    }

    #[test]
    fn test_empty_pipeline() {
        assert!(build(&[], &Config::default()).is_empty());
    }
}
