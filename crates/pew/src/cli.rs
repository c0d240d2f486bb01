use crate::registry::ModuleKind;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "pew",
    version = env!("CARGO_PKG_VERSION"),
    about = "The program execution wrapper",
    long_about = None
)]
pub struct Cli {
    /// Modules to run, in order
    #[arg(long, short = 'm', value_delimiter = ',', value_name = "MODULE")]
    pub modules: Option<Vec<ModuleKind>>,

    #[arg(long, value_name = "PATH", help = "Configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "SHELL", help = "Print a completion script and exit")]
    pub completions: Option<Shell>,

    /// The command to resolve and run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_command_flags_belong_to_command() {
        let cli = Cli::parse_from(["pew", "-m", "nix", "ls", "-la", "--color", "dir"]);
        assert_eq!(cli.modules, Some(vec![ModuleKind::Nix]));
        assert_eq!(cli.command, ["ls", "-la", "--color", "dir"]);
    }

    #[test]
    fn test_modules_split_on_comma() {
        let cli = Cli::parse_from(["pew", "--modules", "nix,same-dir", "foo"]);
        assert_eq!(cli.modules, Some(vec![ModuleKind::Nix, ModuleKind::SameDir]));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["pew"]);
        assert!(cli.command.is_empty());
        assert_eq!(cli.modules, None);
    }

    #[test]
    fn test_unknown_module_rejected() {
        assert!(Cli::try_parse_from(["pew", "--modules", "apt", "foo"]).is_err());
    }
}
