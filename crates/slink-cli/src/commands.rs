use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use slink_sdk::{BlobId, DicomJsonResolver, GroupingKey, LinkStatus, SlinkConfig, StorageArea};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = SlinkConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    tracing::debug!(path = ?cli.config, ?config, "configuration loaded");
    let open = || StorageArea::open(&config);
    match cli.command {
        Command::Put(args) => cmd_put(&open()?, args, &cli.format),
        Command::Get(args) => cmd_get(&open()?, args),
        Command::Rm(args) => cmd_rm(&open()?, args, &cli.format),
        Command::Link(args) => cmd_link(&open()?, args, &cli.format),
        Command::Config(_) => cmd_config(&config, &cli.format),
    }
}

fn parse_id(raw: &str) -> anyhow::Result<BlobId> {
    BlobId::parse(raw).with_context(|| format!("invalid blob id {raw:?}"))
}

fn cmd_put(area: &StorageArea, args: PutArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = match args.id {
        Some(raw) => parse_id(&raw)?,
        None => BlobId::parse(uuid::Uuid::now_v7().to_string())?,
    };
    let content = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    area.create(&id, &content)?;

    let link = match args.metadata {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let doc: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?;
            let resolver = DicomJsonResolver::new();
            resolver.insert(id.as_str(), id.clone(), doc);
            Some(area.on_stored(id.as_str(), &resolver).link)
        }
        None => None,
    };

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({ "id": id, "size": content.len(), "link": link })
            );
        }
        OutputFormat::Text => {
            println!("{} Stored {} ({} bytes)", "✓".green().bold(), id.to_string().yellow(), content.len());
            println!("  Path: {}", area.store().blob_path(&id).display());
            if let Some(status) = &link {
                print_link_status(status);
            }
        }
    }
    Ok(())
}

fn cmd_get(area: &StorageArea, args: GetArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let data = if args.offset == 0 {
        area.read_whole(&id)?
    } else {
        area.read_range(&id, args.offset)?
    };

    match args.out {
        Some(path) => std::fs::write(&path, &data)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_rm(area: &StorageArea, args: RmArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    area.remove(&id)?;
    match format {
        OutputFormat::Json => println!("{}", json!({ "id": id, "removed": true })),
        OutputFormat::Text => println!("Removed {}", id.to_string().yellow()),
    }
    Ok(())
}

fn cmd_link(area: &StorageArea, args: LinkArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let key = GroupingKey::new(args.level1, args.level2, args.level3, args.leaf);
    let status = area.link(&id, &key);

    match format {
        OutputFormat::Json => println!("{}", json!({ "id": id, "key": key, "link": status })),
        OutputFormat::Text => print_link_status(&status),
    }
    Ok(())
}

fn cmd_config(config: &SlinkConfig, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            println!("Storage root: {}", config.storage_root.display().to_string().bold());
            println!("Link root:    {}", config.link_root.display().to_string().bold());
        }
    }
    Ok(())
}

fn print_link_status(status: &LinkStatus) {
    match status {
        LinkStatus::Created => println!("  Link: {}", "created".green()),
        LinkStatus::AlreadyPresent => println!("  Link: {}", "already present".green()),
        LinkStatus::Skipped { missing } => {
            println!("  Link: {} (missing {})", "skipped".yellow(), missing.join(", "))
        }
        LinkStatus::Failed { reason } => println!("  Link: {} ({})", "failed".red(), reason),
    }
}
