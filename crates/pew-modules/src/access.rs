//! Permission checks for the current user.

use std::path::Path;

/// Regular file the current user may execute.
pub(crate) fn is_executable_file(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use nix::unistd::{AccessFlags, access};
        access(path, AccessFlags::X_OK).is_ok()
    }

    #[cfg(not(unix))]
    {
        true
    }
}

/// Directory the current user may create entries in.
pub(crate) fn is_writable_dir(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_dir() {
        return false;
    }

    #[cfg(unix)]
    {
        use nix::unistd::{AccessFlags, access};
        access(path, AccessFlags::W_OK | AccessFlags::X_OK).is_ok()
    }

    #[cfg(not(unix))]
    {
        !meta.permissions().readonly()
    }
}
