use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "slink",
    about = "slink: sharded blob storage with a hierarchical link index",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level, overriding RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (`.toml`, or host-style `.json`)
    #[arg(short, long, global = true, default_value = "slink.toml")]
    pub config: PathBuf,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a file as a new blob
    Put(PutArgs),
    /// Read a blob, whole or from an offset
    Get(GetArgs),
    /// Remove a blob (links to it are left in place)
    Rm(RmArgs),
    /// Link a stored blob under a grouping key
    Link(LinkArgs),
    /// Show the resolved configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct PutArgs {
    pub file: PathBuf,
    /// Blob identifier (defaults to a fresh UUID)
    #[arg(long)]
    pub id: Option<String>,
    /// DICOM JSON metadata used to link the blob after storing it
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
    #[arg(long, default_value = "0")]
    pub offset: u64,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: String,
}

#[derive(Args)]
pub struct LinkArgs {
    pub id: String,
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub leaf: String,
}

#[derive(Args)]
pub struct ConfigArgs {}
