//! Taskdeck - A terminal editor for prioritized task lists.
//!
//! # Usage
//!
//! ```bash
//! taskdeck
//! taskdeck tasks.json
//! taskdeck --api-base http://localhost:8000/api/tasks --strategy high_impact
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use taskdeck::analysis::{DEFAULT_API_BASE, DEFAULT_STRATEGY};
use taskdeck::app::{App, sample_text};
use taskdeck::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use taskdeck::perf;

/// A terminal editor for task lists scored by a prioritization service
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about, long_about = None)]
struct Cli {
    /// JSON file to start from (never written back); sample tasks if omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Base URL of the prioritization service
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Strategy sent with requests
    #[arg(long, value_name = "NAME")]
    strategy: Option<String>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write message, request and frame events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

fn initial_text(file: Option<&Path>) -> Result<String> {
    file.map_or_else(
        || Ok(sample_text()),
        |path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read tasks file {}", path.display()))
        },
    )
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_timings(effective.perf);
    let debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os(perf::DEBUG_LOG_ENV).map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = %debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            error = %err,
            "failed to open debug log"
        );
    }

    let text = initial_text(cli.file.as_deref())?;

    let mut app = App::new(text)
        .with_api_base(
            effective
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        )
        .with_strategy(
            effective
                .strategy
                .unwrap_or_else(|| DEFAULT_STRATEGY.to_string()),
        )
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
