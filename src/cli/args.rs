//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Build and inspect forests from plain-text hierarchy files
#[derive(Parser, Debug)]
#[command(name = "forrest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory searched for a local .forrest.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every tree of the hierarchy
    Tree {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show root count, node count and depth
    Stats {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List values in traversal order, one per line
    Flatten {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// breadth-first (bfs) or depth-first (dfs); defaults to the configured mode
        #[arg(short, long)]
        mode: Option<String>,

        /// Only traverse the subtree rooted at this value
        #[arg(long)]
        from: Option<String>,
    },

    /// Show level, subtree depth and subtree size of a value
    Level {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        value: String,
    },

    /// List the ancestors of a value, nearest first, excluding the root
    Ancestors {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        value: String,
    },

    /// List all leaves in breadth-first order
    Leaves {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Remove a value and render the resulting forest
    Remove {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        value: String,

        /// Drop the whole subtree instead of promoting the children
        #[arg(long)]
        descendants: bool,
    },

    /// Re-parent a value and render the resulting forest
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        value: String,
        new_parent: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}
