use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use approvals::{
    ApprovalStore, ApprovalsConfig, DiffLauncher, ExternalDiffLauncher, FileApprovalStore,
    TestCaseId,
};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::*;

/// How a received artifact relates to its baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactState {
    /// Received equals approved.
    Approved,
    /// Received differs from a non-empty baseline.
    Pending,
    /// Baseline is missing or still the empty seed.
    Unapproved,
}

impl ArtifactState {
    fn classify(approved: Option<&str>, received: &str) -> Self {
        match approved {
            Some(approved) if approved == received => Self::Approved,
            Some(approved) if !approved.is_empty() => Self::Pending,
            _ => Self::Unapproved,
        }
    }

    fn needs_attention(self) -> bool {
        !matches!(self, Self::Approved)
    }

    fn label(self) -> colored::ColoredString {
        match self {
            Self::Approved => "approved".green(),
            Self::Pending => "pending".yellow().bold(),
            Self::Unapproved => "unapproved".red(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusEntry {
    pub id: String,
    pub state: ArtifactState,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.dir.clone())?;
    let store = FileApprovalStore::new(&config.directory);
    debug!(directory = %store.root().display(), "using artifact directory");

    match cli.command {
        Command::Status(args) => cmd_status(&store, args, &cli.format),
        Command::Accept(args) => cmd_accept(&store, args, &cli.format),
        Command::Diff(args) => cmd_diff(&store, &config, args),
        Command::Clean(args) => cmd_clean(&store, args, &cli.format),
    }
}

/// Config file (if any), then the environment, then `--dir`.
fn load_config(path: Option<&Path>, dir: Option<PathBuf>) -> anyhow::Result<ApprovalsConfig> {
    let mut config = match path {
        Some(path) => ApprovalsConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .with_overrides(|key| std::env::var_os(key)),
        None => ApprovalsConfig::from_env(),
    };
    if let Some(dir) = dir {
        config.directory = dir;
    }
    Ok(config)
}

/// Every test case with a received artifact, sorted by id.
pub fn status_entries(store: &dyn ApprovalStore) -> anyhow::Result<Vec<StatusEntry>> {
    let mut entries = Vec::new();
    for id in store.list()? {
        let Some(received) = store.read_received(&id)? else {
            continue;
        };
        let approved = store.read_approved(&id)?;
        entries.push(StatusEntry {
            state: ArtifactState::classify(approved.as_deref(), &received),
            id: id.to_string(),
        });
    }
    Ok(entries)
}

/// Promote each id; with `ids` empty, everything that needs attention.
pub fn accept_ids(store: &dyn ApprovalStore, ids: &[String]) -> anyhow::Result<Vec<String>> {
    let ids: Vec<String> = if ids.is_empty() {
        status_entries(store)?
            .into_iter()
            .filter(|e| e.state.needs_attention())
            .map(|e| e.id)
            .collect()
    } else {
        ids.to_vec()
    };

    for raw in &ids {
        let id = TestCaseId::new(raw.as_str())?;
        store
            .accept(&id)
            .with_context(|| format!("accepting {id}"))?;
        info!(%id, "accepted");
    }
    Ok(ids)
}

/// Remove received artifacts identical to their baseline.
pub fn clean_matching(store: &dyn ApprovalStore, dry_run: bool) -> anyhow::Result<Vec<String>> {
    let mut removed = Vec::new();
    for entry in status_entries(store)? {
        if entry.state != ArtifactState::Approved {
            continue;
        }
        if !dry_run {
            store.remove_received(&TestCaseId::new(entry.id.as_str())?)?;
        }
        removed.push(entry.id);
    }
    Ok(removed)
}

fn cmd_status(store: &FileApprovalStore, args: StatusArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let entries: Vec<StatusEntry> = status_entries(store)?
        .into_iter()
        .filter(|e| !args.pending || e.state.needs_attention())
        .collect();

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No received artifacts in {}.", store.root().display());
        return Ok(());
    }
    for entry in &entries {
        println!("  {:<10} {}", entry.state.label(), entry.id);
    }
    let attention = entries.iter().filter(|e| e.state.needs_attention()).count();
    if attention == 0 {
        println!("\n{} All {} artifact(s) approved.", "✓".green().bold(), entries.len());
    } else {
        println!(
            "\n{} of {} artifact(s) need review. Run {} to promote them.",
            attention.to_string().yellow().bold(),
            entries.len(),
            "approvals accept --all".bold()
        );
    }
    Ok(())
}

fn cmd_accept(store: &FileApprovalStore, args: AcceptArgs, format: &OutputFormat) -> anyhow::Result<()> {
    if args.ids.is_empty() && !args.all {
        bail!("no test case given; pass ids or --all");
    }
    let accepted = accept_ids(store, &args.ids)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::json!({ "accepted": accepted }));
        return Ok(());
    }
    if accepted.is_empty() {
        println!("Nothing to accept.");
    }
    for id in &accepted {
        println!("{} Accepted {}", "✓".green().bold(), id.yellow());
    }
    Ok(())
}

fn cmd_diff(store: &FileApprovalStore, config: &ApprovalsConfig, args: DiffArgs) -> anyhow::Result<()> {
    let id = TestCaseId::new(args.id)?;
    let paths = store.paths(&id);
    if store.read_received(&id)?.is_none() {
        bail!("no received artifact for {id} at {}", paths.received.display());
    }
    store.seed_approved(&id)?;

    let mut launcher = ExternalDiffLauncher::new(config.diff_tool());
    if let Some(tool) = args.tool {
        launcher.set_program(tool);
    }
    launcher
        .launch(&paths.received, &paths.approved)
        .with_context(|| format!("showing diff for {id}"))?;
    Ok(())
}

fn cmd_clean(store: &FileApprovalStore, args: CleanArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let removed = clean_matching(store, args.dry_run)?;

    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::json!({ "removed": removed, "dry_run": args.dry_run })
        );
        return Ok(());
    }
    let verb = if args.dry_run { "Would remove" } else { "Removed" };
    for id in &removed {
        println!("  {} {}", verb.dimmed(), id);
    }
    println!("{} {} received artifact(s).", verb, removed.len().to_string().bold());
    Ok(())
}
