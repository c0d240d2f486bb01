//! Resolve missing commands through nixpkgs.
//!
//! # Flow
//!
//! 1. `nix` not on `PATH`: offer to install it when the user asked for
//!    `nix` itself, otherwise print a hint. The command is left alone.
//! 2. The command is `nix`: leave it alone.
//! 3. Look the program up in the package index. Failures are reported
//!    and the command is left alone.
//! 4. On an exact match, offer to run it with `nix run`.

pub use error::{IndexError, InstallError};
pub use index::{NixCli, Package, PackageIndex};
pub use install::{Fetch, HttpFetch, InstallDir, Installation, Installer, validate_install_dir};
pub use release::Arch;

mod error;
mod index;
mod install;
pub mod release;

use pew_core::{Command, Context, Module, ModuleError, Outcome};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, warn};

pub(crate) const MODULE_NAME: &str = "NixResolver";

/// Invocation name of the index tool.
pub const TOOL_NAME: &str = "nix";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NixSettings {
    pub flake: String,
    pub experimental_features: String,
    pub install_dir: String,
    pub release_url: String,
}

impl Default for NixSettings {
    fn default() -> Self {
        Self {
            flake: "nixpkgs".to_string(),
            experimental_features: "nix-command flakes".to_string(),
            install_dir: "~/.local/bin".to_string(),
            release_url: release::DEFAULT_RELEASE_URL.to_string(),
        }
    }
}

pub struct NixResolver {
    settings: NixSettings,
    index: Box<dyn PackageIndex>,
    installer: Installer,
    search_path: Option<OsString>,
}

impl NixResolver {
    pub fn new(settings: NixSettings, index: Box<dyn PackageIndex>, installer: Installer) -> Self {
        Self {
            settings,
            index,
            installer,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// The production wiring: `nix` on the command line, downloads over HTTP.
    pub fn from_settings(settings: NixSettings, fetch: HttpFetch) -> Self {
        let index = NixCli::new(&settings.flake, &settings.experimental_features);
        let installer = Installer::new(&settings, Box::new(fetch));
        Self::new(settings, Box::new(index), installer)
    }

    /// Search these directories instead of `PATH`.
    pub fn with_search_path(mut self, path: Option<OsString>) -> Self {
        self.search_path = path;
        self
    }

    fn locate(&self, program: &str, cx: &Context<'_>) -> Option<PathBuf> {
        which::which_in(program, self.search_path.as_ref(), cx.cwd()).ok()
    }

    /// `nix run <flake>#<name> -- <args>`
    pub fn run_form(&self, command: &Command) -> Command {
        let mut argv = vec![
            TOOL_NAME.to_string(),
            "--extra-experimental-features".to_string(),
            self.settings.experimental_features.clone(),
            "run".to_string(),
            format!("{}#{}", self.settings.flake, command.program()),
            "--".to_string(),
        ];
        argv.extend_from_slice(command.args());
        // argv starts with the tool name, never empty
        Command::new(argv).unwrap_or_else(|_| command.clone())
    }

    fn offer_install(&self, cx: &Context<'_>) -> Result<Outcome, ModuleError> {
        let question = "nix is not installed. Download nix-portable now?";
        if !cx.prompter().confirm(question, true)? {
            return Ok(Outcome::Unchanged);
        }
        match self.installer.run(cx)? {
            Installation::Installed(path) => debug!(path = %path.display(), "nix installed"),
            Installation::Abandoned => debug!("nix installation abandoned"),
        }
        Ok(Outcome::Unchanged)
    }
}

impl Module for NixResolver {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Only commands that are not already installed, or `nix` itself.
    fn matches(&self, command: &Command, cx: &Context<'_>) -> bool {
        let program = command.program();
        if program.contains('/') || program.contains(std::path::MAIN_SEPARATOR) {
            return false;
        }
        program == TOOL_NAME || self.locate(program, cx).is_none()
    }

    fn hook(&self, command: &Command, cx: &Context<'_>) -> Result<Outcome, ModuleError> {
        let program = command.program();

        let Some(tool) = self.locate(TOOL_NAME, cx) else {
            if program == TOOL_NAME {
                return self.offer_install(cx);
            }
            let hint = format!(
                "{program} is not installed. Run `pew nix` to install nix and run it from {}",
                self.settings.flake
            );
            cx.note(self, &hint);
            return Ok(Outcome::Unchanged);
        };

        if program == TOOL_NAME {
            return Ok(Outcome::Unchanged);
        }

        let package = match self.index.search_exact(&tool, program) {
            Ok(Some(package)) => package,
            Ok(None) => {
                debug!(program, "no exact package");
                return Ok(Outcome::Unchanged);
            }
            Err(e) => {
                warn!(program, error = %e, "package lookup failed");
                cx.note(self, &format!("lookup failed: {e}"));
                return Ok(Outcome::Unchanged);
            }
        };

        let version = if package.version.is_empty() {
            String::new()
        } else {
            format!(" {}", package.version)
        };
        if !package.description.is_empty() {
            cx.note(self, &format!("{}: {}", package.attr, package.description));
        }
        let question = format!(
            "Run {}{version} from {}#{}?",
            package.pname, self.settings.flake, package.attr
        );
        if !cx.prompter().confirm(&question, true)? {
            return Ok(Outcome::Unchanged);
        }
        Ok(Outcome::Replaced(self.run_form(command)))
    }
}
