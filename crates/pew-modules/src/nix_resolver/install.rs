//! Interactive installation of nix-portable.
//!
//! The user picks a directory, confirms creating it when it does not exist
//! yet, and the binary is streamed into it. Nothing the user already has
//! (a `nix` link, a `nix.conf`) is overwritten.

use super::error::InstallError;
use super::release::{self, Arch, BINARY_NAME};
use super::{MODULE_NAME, NixSettings, TOOL_NAME};
use crate::access::is_writable_dir;

use pew_core::{Context, dir};
use pew_fetch::{ClientSetting, Download, DownloadError, ProgressTrackerBuilder};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_NIX_CONF: &str = "experimental-features = nix-command flakes\n";

const MAX_ATTEMPTS: usize = 5;

/// Moves a release asset onto disk.
pub trait Fetch {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}

/// Streams over HTTP with a progress bar.
#[derive(Debug, Clone, Default)]
pub struct HttpFetch {
    setting: ClientSetting,
}

impl HttpFetch {
    pub fn new(setting: ClientSetting) -> Self {
        Self { setting }
    }
}

impl Fetch for HttpFetch {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let tracker = ProgressTrackerBuilder::default().with_prefix(BINARY_NAME);
        Download::new(url, dest)
            .with_setting(self.setting.clone())
            .fetch(Some(tracker))
    }
}

/// A validated installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDir {
    path: PathBuf,
    existing_ancestor: PathBuf,
}

impl InstallDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Nearest ancestor (or the directory itself) that already exists.
    pub fn existing_ancestor(&self) -> &Path {
        &self.existing_ancestor
    }

    pub fn exists(&self) -> bool {
        self.path == self.existing_ancestor
    }

    /// The part of the path that still has to be created.
    pub fn missing_suffix(&self) -> &Path {
        self.path
            .strip_prefix(&self.existing_ancestor)
            .unwrap_or(&self.path)
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Check that `input` names a directory the current user can install into.
///
/// The reason for a rejection is returned as a message for the user.
pub fn validate_install_dir(
    input: &str,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<InstallDir, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("please enter a directory".to_string());
    }

    let path = normalize(&cwd.join(dir::expand_tilde(input, home)));
    let existing_ancestor = path
        .ancestors()
        .find(|p| p.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("no part of {} exists", path.display()))?;

    if !existing_ancestor.is_dir() {
        return Err(format!("{} is not a directory", existing_ancestor.display()));
    }
    if !is_writable_dir(&existing_ancestor) {
        return Err(format!("no write permission for {}", existing_ancestor.display()));
    }

    Ok(InstallDir {
        path,
        existing_ancestor,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installation {
    Installed(PathBuf),
    /// The user declined; nothing was touched.
    Abandoned,
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), InstallError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(InstallError::io("reading", path))?
        .permissions();
    perms.set_mode(perms.mode() | 0o100);
    fs::set_permissions(path, perms).map_err(InstallError::io("marking executable", path))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), InstallError> {
    Ok(())
}

/// `<dir>/nix -> nix-portable`, unless something named `nix` is already there.
fn link_tool(dir: &Path) -> Result<Option<PathBuf>, InstallError> {
    let link = dir.join(TOOL_NAME);
    if link.symlink_metadata().is_ok() {
        return Ok(None);
    }

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(BINARY_NAME, &link).map_err(InstallError::io("linking", &link))?;
        Ok(Some(link))
    }

    #[cfg(not(unix))]
    {
        Ok(None)
    }
}

fn write_default_config(config_dir: &Path) -> Result<Option<PathBuf>, InstallError> {
    let path = config_dir.join("nix.conf");
    if path.exists() {
        return Ok(None);
    }
    fs::create_dir_all(config_dir).map_err(InstallError::io("creating", config_dir))?;

    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_NIX_CONF.as_bytes())
                .map_err(InstallError::io("writing", &path))?;
            Ok(Some(path))
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(InstallError::io("writing", &path)(e)),
    }
}

pub struct Installer {
    default_dir: String,
    release_url: String,
    fetch: Box<dyn Fetch>,
    home: Option<PathBuf>,
    nix_config_dir: Option<PathBuf>,
    search_path: Option<OsString>,
    arch: Option<Arch>,
}

impl Installer {
    pub fn new(settings: &NixSettings, fetch: Box<dyn Fetch>) -> Self {
        Self {
            default_dir: settings.install_dir.clone(),
            release_url: settings.release_url.clone(),
            fetch,
            home: dir::user_home(),
            nix_config_dir: dir::user_config().map(|c| c.join("nix")),
            search_path: std::env::var_os("PATH"),
            arch: Arch::detect(),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_nix_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.nix_config_dir = Some(dir.into());
        self
    }

    pub fn with_search_path(mut self, path: Option<OsString>) -> Self {
        self.search_path = path;
        self
    }

    pub fn with_arch(mut self, arch: Option<Arch>) -> Self {
        self.arch = arch;
        self
    }

    /// Ask until the user names an acceptable directory, giving up after
    /// `MAX_ATTEMPTS` rejections.
    fn choose_dir(&self, cx: &Context<'_>) -> Result<Option<InstallDir>, InstallError> {
        for _ in 0..MAX_ATTEMPTS {
            let input = cx.prompter().input("Install nix-portable into", &self.default_dir)?;
            match validate_install_dir(&input, cx.cwd(), self.home.as_deref()) {
                Ok(dir) => return Ok(Some(dir)),
                Err(reason) => cx.reporter().note(MODULE_NAME, &reason),
            }
        }
        Ok(None)
    }

    fn on_search_path(&self, dir: &Path) -> bool {
        self.search_path
            .as_ref()
            .is_some_and(|paths| std::env::split_paths(paths).any(|p| p == dir))
    }

    pub fn run(&self, cx: &Context<'_>) -> Result<Installation, InstallError> {
        let reporter = cx.reporter();
        let Some(target) = self.choose_dir(cx)? else {
            reporter.note(MODULE_NAME, "no usable directory, installation abandoned");
            return Ok(Installation::Abandoned);
        };

        if !target.exists() {
            let question = format!(
                "{} exists. Create {} inside it?",
                target.existing_ancestor().display(),
                target.missing_suffix().display()
            );
            if !cx.prompter().confirm(&question, true)? {
                reporter.note(MODULE_NAME, "installation abandoned");
                return Ok(Installation::Abandoned);
            }
        }

        let arch = self
            .arch
            .ok_or_else(|| InstallError::UnsupportedArch(std::env::consts::ARCH.to_string()))?;

        let dir = target.path();
        fs::create_dir_all(dir).map_err(InstallError::io("creating", dir))?;

        let binary = dir.join(BINARY_NAME);
        let url = release::asset_url(&self.release_url, arch);
        reporter.note(MODULE_NAME, &format!("downloading {url}"));
        let size = self.fetch.fetch(&url, &binary)?;
        debug!(size, binary = %binary.display(), "download complete");

        mark_executable(&binary)?;

        if let Some(link) = link_tool(dir)? {
            info!(link = %link.display(), "linked nix");
        }
        let conf = match self.nix_config_dir.as_deref() {
            Some(dir) => write_default_config(dir)?,
            None => None,
        };
        if let Some(conf) = conf {
            let message = format!("wrote default configuration to {}", conf.display());
            reporter.note(MODULE_NAME, &message);
        }

        reporter.note(MODULE_NAME, &format!("installed {}", binary.display()));
        if !self.on_search_path(dir) {
            reporter.note(
                MODULE_NAME,
                &format!("{} is not on PATH; add it to run nix directly", dir.display()),
            );
        }
        Ok(Installation::Installed(binary))
    }
}
