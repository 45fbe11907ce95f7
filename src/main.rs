use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use confglob::cli::{Cli, Commands};
use confglob::output::{self, Verbosity};
use confglob::{ConfglobContext, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let ctx = ConfglobContext::new(cli.settings.clone())?;
    init_logging(cli.verbose, &ctx.settings.log.level);

    match cli.command {
        Commands::Check { file } => commands::check::execute(&ctx, &file)?,
        Commands::Resolve { pattern } => commands::resolve::execute(&ctx, &pattern)?,
        Commands::Dump { file } => commands::dump::execute(&ctx, &file)?,
        Commands::Completion { .. } => {}
    }

    Ok(())
}

/// `RUST_LOG` wins, then `--verbose`, then `log.level` from settings.
fn init_logging(verbose: bool, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { level })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
