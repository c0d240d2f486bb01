//! User directory lookup.

use std::env;
use std::path::{Path, PathBuf};

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| user_home().map(|p| p.join(".config")))
    }
}

/// Expand a leading `~` against `home`. Other inputs are returned as-is.
pub fn expand_tilde(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with(['/', std::path::MAIN_SEPARATOR]) => {
            home.join(rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]))
        }
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_alone() {
        assert_eq!(expand_tilde("~", Some(Path::new("/home/u"))), PathBuf::from("/home/u"));
    }

    #[test]
    fn test_expand_tilde_prefix() {
        assert_eq!(
            expand_tilde("~/.local/bin", Some(Path::new("/home/u"))),
            PathBuf::from("/home/u/.local/bin")
        );
    }

    #[test]
    fn test_expand_tilde_other_user_untouched() {
        assert_eq!(expand_tilde("~bob/bin", Some(Path::new("/home/u"))), PathBuf::from("~bob/bin"));
    }

    #[test]
    fn test_expand_tilde_without_home() {
        assert_eq!(expand_tilde("~/bin", None), PathBuf::from("~/bin"));
    }

    #[test]
    fn test_plain_path_untouched() {
        assert_eq!(expand_tilde("/opt/bin", Some(Path::new("/home/u"))), PathBuf::from("/opt/bin"));
    }

    #[test]
    fn test_user_config_not_empty() {
        if let Some(config) = user_config() {
            assert!(!config.as_os_str().is_empty());
        }
    }
}
