use std::net::SocketAddr;

use anyhow::Context;
use colored::Colorize;
use doclib_server::{AppState, DocLibServer, ServerConfig};
use doclib_types::{Category, FileReference};
use doclib_view::{DocumentListView, ViewCapabilities};
use serde::Serialize;

use crate::check::{IntegrityReport, check};
use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::List(args) => cmd_list(args, &format),
        Command::Upload(args) => cmd_upload(args, &format),
        Command::Rename(args) => cmd_rename(args, &format),
        Command::Remove(args) => cmd_remove(args, &format),
        Command::Check(args) => cmd_check(args, &format),
    }
}

/// Config file first, then any storage flags on top.
fn resolve_config(storage: &StorageArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &storage.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(uploads) = &storage.uploads {
        config.uploads_dir = uploads.clone();
    }
    if let Some(registry) = &storage.registry {
        config.registry_path = registry.clone();
    }
    Ok(config)
}

fn open_state(storage: &StorageArgs) -> anyhow::Result<AppState> {
    let config = resolve_config(storage)?;
    Ok(DocLibServer::new(config).open_state()?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(&args.storage)?;
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address: {bind}"))?;
    }
    if let Some(public) = args.public {
        config.public_dir = Some(public);
    }
    config.validate()?;

    println!(
        "doclib server on {} (uploads: {}, records: {})",
        config.bind_addr.to_string().bold(),
        config.uploads_dir.display(),
        config.registry_path.display()
    );
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(DocLibServer::new(config).serve())?;
    Ok(())
}

fn cmd_list(args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let state = open_state(&args.storage)?;
    let records = state.registry.list()?;
    let mut view = DocumentListView::new();
    view.load(&records);
    let sections = view.render(ViewCapabilities::viewer());

    if matches!(format, OutputFormat::Json) {
        return print_json(&sections);
    }
    for section in &sections {
        println!("{} ({})", section.title.bold(), section.items.len());
        if section.items.is_empty() {
            println!("  {}", "no documents".dimmed());
        }
        for item in &section.items {
            println!("  {}  {}", item.label, item.file_reference.to_string().dimmed());
        }
    }
    Ok(())
}

fn cmd_upload(args: UploadArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let category: Category = args.category.parse()?;
    let file_name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("no file name in {}", args.path.display()))?
        .to_string();
    let content = std::fs::read(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    if let Some(reason) = doclib_store::pdf_mismatch(None, &content) {
        tracing::warn!(file = %args.path.display(), %reason, "upload does not look like a PDF");
    }

    let state = open_state(&args.storage)?;
    let record = state.upload_document(&content, &file_name, &args.name, category)?;

    if matches!(format, OutputFormat::Json) {
        return print_json(&record);
    }
    println!(
        "{} Uploaded {} to {}",
        "✓".green().bold(),
        record.name.yellow(),
        record.category.title()
    );
    println!("  File: {}", record.file_reference.to_string().cyan());
    Ok(())
}

fn cmd_rename(args: RenameArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reference = FileReference::parse(&args.reference)?;
    let state = open_state(&args.storage)?;
    let record = state.registry.rename(&reference, &args.new_name)?;

    if matches!(format, OutputFormat::Json) {
        return print_json(&record);
    }
    println!("{} Renamed {} to {}", "✓".green().bold(), reference.to_string().cyan(), record.name.yellow());
    Ok(())
}

fn cmd_remove(args: RemoveArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reference = FileReference::parse(&args.reference)?;
    let state = open_state(&args.storage)?;
    let record = state
        .remove_document(&reference)?
        .with_context(|| format!("document not found: {reference}"))?;

    if matches!(format, OutputFormat::Json) {
        return print_json(&record);
    }
    println!("{} Removed {} ({})", "✓".green().bold(), record.name.yellow(), reference.to_string().cyan());
    Ok(())
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let state = open_state(&args.storage)?;
    let report = check(state.registry.as_ref(), state.blobs.as_ref())?;

    if matches!(format, OutputFormat::Json) {
        print_json(&report)?;
    } else {
        print_report(&report);
    }
    if !report.is_clean() {
        anyhow::bail!("integrity check found {} problem(s)", report.problem_count());
    }
    Ok(())
}

fn print_report(report: &IntegrityReport) {
    println!("Records: {}, files: {}", report.records.to_string().bold(), report.blobs.to_string().bold());
    if report.is_clean() {
        println!("{} Record file and uploads agree", "✓".green().bold());
        return;
    }
    for reference in &report.duplicate_references {
        println!("  {} {}", "duplicate:".yellow(), reference);
    }
    for reference in &report.missing_blobs {
        println!("  {} {}", "missing file:".red(), reference);
    }
    for reference in &report.orphan_blobs {
        println!("  {} {}", "orphan file:".yellow(), reference);
    }
}
