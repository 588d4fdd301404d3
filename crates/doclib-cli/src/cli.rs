use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "doclib",
    about = "doclib: a small PDF document library",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List documents grouped by category
    List(ListArgs),
    /// Upload a PDF into the library
    Upload(UploadArgs),
    /// Rename a document
    Rename(RenameArgs),
    /// Remove a document and its file
    Remove(RemoveArgs),
    /// Cross-check the record file against the upload directory
    Check(CheckArgs),
}

/// Where the library lives. Flags override the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct StorageArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Upload directory
    #[arg(long)]
    pub uploads: Option<PathBuf>,
    /// JSON record file
    #[arg(long)]
    pub registry: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
    #[arg(long)]
    pub bind: Option<String>,
    /// Static front-end directory served at /
    #[arg(long)]
    pub public: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct UploadArgs {
    pub path: PathBuf,
    #[arg(short, long)]
    pub name: String,
    #[arg(short = 'C', long)]
    pub category: String,
    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct RenameArgs {
    pub reference: String,
    pub new_name: String,
    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub reference: String,
    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}
