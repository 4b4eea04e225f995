//! Revue CLI: compiles single-file components ahead of time and manages the
//! persistent compile cache.
//!
//! `revue compile` runs one component through the same hook a module loader
//! uses, `revue cache` inspects or empties the cache directory, and
//! `revue config` prints the effective configuration.

#![warn(missing_docs)]

mod cache;
mod compile;
mod config;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Revue: compiles single-file components into loadable modules.
#[derive(Parser, Debug)]
#[command(name = "revue", version, about = "Revue component compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `revue.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one component file and print the module.
    Compile(CompileArgs),
    /// Inspect or empty the persistent cache.
    Cache {
        /// What to do with the cache.
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Print the effective configuration.
    Config,
}

/// Arguments for the `revue compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// The component file to compile.
    pub file: PathBuf,

    /// Write the module here instead of standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Actions of the `revue cache` subcommand.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// List cached components and whether each is still fresh.
    Status,
    /// Remove every cached module and the metadata.
    Clean,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Cache { action } => cache::run(action, &global),
        Command::Config => config::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
