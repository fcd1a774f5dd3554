use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build JSON markup trees into HTML, or read HTML back into markup trees.
#[derive(Debug, Parser)]
#[command(name = "daoml", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Config file (defaults to ./daoml.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Materialize a JSON markup tree against JSON data and print HTML
    Build {
        /// JSON file holding the markup tree `[tag, {attrs}, ...children]`
        template: PathBuf,
        /// JSON data the tree is built against
        #[arg(long, short = 'd')]
        data: Option<PathBuf>,
    },
    /// Reverse-parse an HTML file into a JSON markup tree
    Parse {
        /// HTML file to read
        input: PathBuf,
        #[command(flatten)]
        flags: FlagArgs,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

/// Reverse-parse flags; each one set here overrides the config file.
#[derive(Debug, Default, Args)]
pub struct FlagArgs {
    /// Drop whitespace-only text nodes
    #[arg(long)]
    pub strip_whitespace: bool,
    /// Trim surrounding whitespace from text nodes
    #[arg(long)]
    pub trim: bool,
}
