//! Griddy compiler CLI
//!
//! Turns parsed Griddy trees into C programs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod build;
mod check;

#[derive(Parser)]
#[command(name = "griddyc")]
#[command(about = "Griddy board game compiler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a C program from a parsed tree
    Build {
        /// Parsed tree as a JSON document
        input: PathBuf,

        /// Where to write the program (defaults to the input with a `.c` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (defaults to `griddy.toml` next to the input)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a parsed tree for errors without writing anything
    Check {
        /// Parsed tree as a JSON document
        input: PathBuf,

        /// Settings file (defaults to `griddy.toml` next to the input)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, config } => {
            build::build(&input, output.as_deref(), config.as_deref())?;
        }
        Commands::Check { input, config } => {
            check::check(&input, config.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_arguments() {
        let cli = Cli::parse_from(["griddyc", "build", "game.json", "-o", "out.c", "--config", "g.toml"]);
        let Commands::Build { input, output, config } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(input, PathBuf::from("game.json"));
        assert_eq!(output, Some(PathBuf::from("out.c")));
        assert_eq!(config, Some(PathBuf::from("g.toml")));
    }

    #[test]
    fn test_check_arguments() {
        let cli = Cli::parse_from(["griddyc", "check", "game.json"]);
        assert!(matches!(cli.command, Commands::Check { config: None, .. }));
    }
}
