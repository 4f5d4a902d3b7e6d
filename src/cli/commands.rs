use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "auditdeck", version, about = "Smart-contract scan dashboard service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Upload a contract source file as a new scan
    Upload(UploadArgs),
    /// List scans with their current derived status
    List(ListArgs),
    /// Show one scan's derived view and metrics
    Show(ShowArgs),
    /// Follow a scan's progress live until it completes
    Watch(WatchArgs),
    /// Delete a scan record and its stored source
    Delete(DeleteArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Data directory (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct UploadArgs {
    /// Contract source file to upload
    pub file: PathBuf,

    /// Project label (defaults to the file name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Owner identifier
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Data directory
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Owner identifier
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Data directory
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Scan identifier
    pub id: String,

    /// Owner identifier
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Data directory
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Also print the stored contract source
    #[arg(long)]
    pub source: bool,
}

#[derive(Args, Clone)]
pub struct WatchArgs {
    /// Scan identifier
    pub id: String,

    /// Owner identifier
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Data directory
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Seconds between re-evaluations (1-2)
    #[arg(long, default_value_t = 1)]
    pub tick_interval: u64,
}

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Scan identifier
    pub id: String,

    /// Owner identifier
    #[arg(long, default_value = "local")]
    pub owner: String,

    /// Data directory
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,
}
