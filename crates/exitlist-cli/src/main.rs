//! Company exit list CLI.

use clap::{ColorChoice, Parser};
use exitlist_cli::logging::{LogConfig, LogFormat, init_logging};
use exitlist_core::{ApiResponse, QueryRequest};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{apply_sync_args, apply_table_args, load_config, run_query, run_sync};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Sync(args) => {
            let config = apply_sync_args(config, &args);
            let result = run_sync(&config, &args);
            if args.json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{json}"),
                    Err(error) => eprintln!("error: {error}"),
                }
            } else {
                print_summary(&result);
            }
            if result.is_complete() { 0 } else { 1 }
        }
        Command::Get(args) => {
            let config = apply_table_args(config, &args.table);
            query(run_query(&config, &QueryRequest::get_company(args.slug)))
        }
        Command::List(args) => {
            let config = apply_table_args(config, &args);
            query(run_query(&config, &QueryRequest::list_companies()))
        }
    };
    std::process::exit(exit_code);
}

fn query(response: anyhow::Result<ApiResponse>) -> i32 {
    match response {
        Ok(response) => {
            println!("{}", response.body);
            if response.status_code == exitlist_core::STATUS_OK {
                0
            } else {
                1
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config = config
        .with_format(format)
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_log_file(cli.log_file.clone());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
