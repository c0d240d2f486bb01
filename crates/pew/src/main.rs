mod cli;
mod config;
mod launch;
mod logging;
mod registry;
mod render;

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use pew_core::{
    Command, Context, PipelineError, Prompter, Resolution, ScriptedPrompter, TermPrompter, dir,
    exit,
};
use render::ConsoleReporter;
use std::env;
use tracing::debug;

fn banner() -> String {
    format!(
        "pew - the program execution wrapper\nversion {}\n\nusage: pew [OPTIONS] <COMMAND>...",
        env!("CARGO_PKG_VERSION")
    )
}

fn run(cli: Cli) -> Result<i32> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "pew", &mut std::io::stdout());
        return Ok(exit::SUCCESS);
    }

    let Ok(command) = Command::new(cli.command) else {
        println!("{}", banner());
        return Ok(exit::SUCCESS);
    };

    let path = config::locate(cli.config, env::var_os(config::CONFIG_ENV), dir::user_config());
    debug!(?path, "configuration");
    let config = config::load(path.as_ref())?;

    let kinds = cli
        .modules
        .or_else(|| config.modules.clone())
        .unwrap_or_else(|| registry::DEFAULT_ORDER.to_vec());
    let pipeline = registry::build(&kinds, &config);

    let cwd = env::current_dir().context("Failed to read the working directory")?;
    let reporter = ConsoleReporter::new();
    // without a terminal every question is declined
    let prompter: Box<dyn Prompter> = if console::user_attended_stderr() {
        Box::new(TermPrompter::new())
    } else {
        Box::new(ScriptedPrompter::default())
    };
    let cx = Context::new(cwd, prompter.as_ref(), &reporter);

    match pipeline.run(command, &cx) {
        Ok(Resolution::Run(command)) => {
            let err = launch::launch(&command);
            eprintln!("pew: {err}");
            Ok(err.exit_code())
        }
        Ok(Resolution::Exit(code)) => Ok(code),
        Err(err @ PipelineError::Interrupted { .. }) => {
            eprintln!("pew: {err}");
            Ok(exit::INTERRUPTED)
        }
        Err(err @ PipelineError::Module { .. }) => {
            eprintln!("pew: error: {:#}", anyhow::Error::new(err));
            Ok(exit::FAILURE)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let code = run(cli).unwrap_or_else(|err| {
        eprintln!("pew: error: {err:#}");
        exit::FAILURE
    });
    std::process::exit(code);
}
