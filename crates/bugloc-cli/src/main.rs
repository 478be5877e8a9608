//! bugloc command-line entry point.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use bugloc_core::config::BuglocConfig;
use bugloc_core::tracing::init_tracing;
use bugloc_core::types::BugId;
use bugloc_fusion::FusionScheduler;
use bugloc_storage::SqliteStore;
use clap::Parser;

use cli::{Cli, Command, FuseArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = BuglocConfig::load(&cli.root, Some(&cli.overrides()))
        .with_context(|| format!("loading configuration from {}", cli.root.display()))?;

    match &cli.command {
        Command::Fuse(args) => fuse(&config, args),
        Command::Top {
            bug_id,
            limit,
            json,
        } => top(&config, bug_id, *limit, *json),
    }
}

fn open_store(config: &BuglocConfig) -> Result<SqliteStore> {
    let path = config.storage.effective_db_path();
    SqliteStore::open(Path::new(path), config.storage.effective_read_pool_size())
        .with_context(|| format!("opening signal store {path}"))
}

fn fuse(config: &BuglocConfig, args: &FuseArgs) -> Result<()> {
    let settings = config.resolve().context("invalid fusion configuration")?;
    let store = open_store(config)?;

    let report = FusionScheduler::new(&store, settings)
        .run_product(&store)
        .context("fusion run failed")?;

    if let Err(e) = store.db().checkpoint() {
        tracing::warn!(error = %e, "WAL checkpoint failed");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary_line());
    }
    Ok(())
}

fn top(config: &BuglocConfig, bug_id: &str, limit: usize, json: bool) -> Result<()> {
    let store = open_store(config)?;
    let bug_id = BugId::new(bug_id);
    let ranked = store
        .ranked_candidates(&bug_id, limit)
        .with_context(|| format!("ranking candidates of bug {bug_id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("bug {bug_id}: no fused candidates");
        return Ok(());
    }
    println!("{:>4}  {:>12}  {:>10}", "rank", "candidate", "score");
    for r in &ranked {
        println!("{:>4}  {:>12}  {:>10.6}", r.rank, r.candidate_id.inner(), r.fused_final);
    }
    Ok(())
}
