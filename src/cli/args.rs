// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// AnkiConnect endpoint (default: http://127.0.0.1:8765)
    #[arg(short, long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Per-call timeout in seconds
    #[arg(short, long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Path to config file (default: platform config dir)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List deck names
    Decks,

    /// List note type names
    Models,

    /// List the fields of a note type
    Fields {
        #[arg(value_name = "MODEL")]
        model: String,
    },

    /// Show the sections a markdown file would turn into, without contacting Anki
    Sections {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload level 4+ headings of a markdown file as notes
    Convert {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Target deck
        #[arg(short, long)]
        deck: Option<String>,

        /// Note type
        #[arg(short, long)]
        model: Option<String>,

        /// Field receiving the heading text
        #[arg(long)]
        front: Option<String>,

        /// Field receiving the section body
        #[arg(long)]
        back: Option<String>,

        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
