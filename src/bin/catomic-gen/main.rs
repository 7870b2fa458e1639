//! catomic-gen CLI - build-file generation for catomic

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use catomic_gen::util::config::load_config;
use catomic_gen::util::diagnostic::{emit, Diagnostic};
use catomic_gen::GraphError;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<GraphError>() {
            Some(graph_err) => emit(&Diagnostic::from_graph_error(graph_err), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("catomic_gen=debug")
    } else {
        EnvFilter::new("catomic_gen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    // Execute command
    match cli.command {
        None => commands::generate::execute(Default::default(), &config, &cwd),
        Some(Commands::Generate(args)) => commands::generate::execute(args, &config, &cwd),
        Some(Commands::Tree(args)) => commands::tree::execute(args, &config),
        Some(Commands::List(args)) => commands::list::execute(args, &config),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
    }
}
