use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use exitlist_cli::config::SyncConfig;
use exitlist_cli::fetch::PageFetcher;
use exitlist_core::{
    ApiResponse, InvocationResult, QueryRequest, SourceDocuments, handle_query, handle_sync,
};
use exitlist_store::{JsonFileTable, MemoryTable};

use crate::cli::{SyncArgs, TableArgs};

/// Builds the effective configuration for one invocation.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    SyncConfig::load_or_default(path)?.apply_env()
}

/// Flags win over file and environment values.
pub fn apply_table_args(mut config: SyncConfig, args: &TableArgs) -> SyncConfig {
    if let Some(store) = &args.store {
        config.store_path = Some(store.clone());
    }
    if let Some(table) = &args.table {
        config.table_name.clone_from(table);
    }
    config
}

pub fn apply_sync_args(config: SyncConfig, args: &SyncArgs) -> SyncConfig {
    let mut config = apply_table_args(config, &args.table);
    if let Some(path) = &args.structured {
        config.structured_path.clone_from(path);
    }
    if let Some(url) = &args.url {
        config.source_url.clone_from(url);
    }
    config
}

/// Runs a sync; input and store failures become a failed result.
pub fn run_sync(config: &SyncConfig, args: &SyncArgs) -> InvocationResult {
    match try_run_sync(config, args) {
        Ok(result) => result,
        Err(err) => {
            error!(error = %format!("{err:#}"), "sync could not start");
            InvocationResult::failure(&format!("{err:#}"))
        }
    }
}

fn try_run_sync(config: &SyncConfig, args: &SyncArgs) -> Result<InvocationResult> {
    let structured = fs::read(&config.structured_path).with_context(|| {
        format!(
            "read structured export {}",
            config.structured_path.display()
        )
    })?;
    let scraped = match &args.html_file {
        Some(path) => {
            fs::read(path).with_context(|| format!("read page {}", path.display()))?
        }
        None => PageFetcher::new(config.request_timeout())?.fetch(&config.source_url)?,
    };
    let documents = SourceDocuments {
        structured: &structured,
        scraped: &scraped,
    };
    let options = config.scrape_options();

    if args.dry_run {
        info!(table = %config.table_name, "dry run; writing to memory only");
        let mut table = MemoryTable::new(config.table_name.clone());
        return Ok(handle_sync(&documents, &options, &mut table));
    }
    let mut table = open_table(config)?;
    Ok(handle_sync(&documents, &options, &mut table))
}

pub fn run_query(config: &SyncConfig, request: &QueryRequest) -> Result<ApiResponse> {
    let table = open_table(config)?;
    Ok(handle_query(request, &table))
}

fn open_table(config: &SyncConfig) -> Result<JsonFileTable> {
    let path = config.store_path();
    JsonFileTable::open(&path, &config.table_name, &config.region)
        .with_context(|| format!("open table {}", path.display()))
}
