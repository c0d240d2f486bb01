//! Built-in pew modules.
//!
//! - [`SameDirExecutable`] makes `foo` run `./foo` when that is what the
//!   user meant.
//! - [`NixResolver`] offers to run commands that are not installed through
//!   `nix run`, and to install nix itself.

pub use nix_resolver::{NixCli, NixResolver, NixSettings, Package, PackageIndex};
pub use same_dir::SameDirExecutable;

mod access;
pub mod nix_resolver;
mod same_dir;
