//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// catomic-gen - generate build files for the catomic C++ library
#[derive(Parser)]
#[command(name = "catomic-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file as well
    #[arg(long, global = true, env = "CATOMIC_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `generate`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate build files for a package
    Generate(GenerateArgs),

    /// Display the package or target dependency tree
    Tree(TreeArgs),

    /// List registered packages
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Package to generate (defaults to catomic)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Output format: cmake or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Directory package repository paths are resolved against
    #[arg(long)]
    pub workspace_root: Option<PathBuf>,

    /// Do not link unit tests against the entry-point shim
    #[arg(long)]
    pub no_entry: bool,

    /// Additional directory of package manifests
    #[arg(long)]
    pub manifests: Vec<PathBuf>,

    /// Show what would be written without writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Package to show the tree for (defaults to catomic)
    pub package: Option<String>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Show target dependencies instead of packages
    #[arg(long)]
    pub targets: bool,

    /// Do not link unit tests against the entry-point shim
    #[arg(long)]
    pub no_entry: bool,

    /// Additional directory of package manifests
    #[arg(long)]
    pub manifests: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Additional directory of package manifests
    #[arg(long)]
    pub manifests: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
