use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "notes",
    about = "Serve a directory of plain-text notes over HTTP",
    version,
    disable_help_flag = true,
)]
pub struct Cli {
    /// Address to bind
    #[arg(short = 'h', long)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long)]
    pub port: u16,

    /// Directory holding the notes (must already exist)
    #[arg(short, long)]
    pub cache: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
