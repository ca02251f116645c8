use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "approvals",
    about = "Review and accept approval test artifacts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Artifact directory (overrides config and LIB_APPROVALS_DIR)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List received artifacts and whether they match their baseline
    Status(StatusArgs),
    /// Promote received artifacts to approved
    Accept(AcceptArgs),
    /// Open the diff program on one test case
    Diff(DiffArgs),
    /// Delete received artifacts that match their baseline
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct StatusArgs {
    /// Show only artifacts that need attention
    #[arg(long)]
    pub pending: bool,
}

#[derive(Args)]
pub struct AcceptArgs {
    pub ids: Vec<String>,
    /// Accept every pending or unapproved artifact
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub id: String,
    /// Diff program (overrides LIB_APPROVALS_DIFF)
    #[arg(long)]
    pub tool: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    #[arg(long)]
    pub dry_run: bool,
}
