//! # CLI Layer
//!
//! The only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Picks the real or simulated backends
//! - Initializes logging
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, detect privileges, build the API
//! 3. **Dispatch**: Route each subcommand to its API method
//! 4. **Output**: Hand the `CmdResult` to `render`

use super::render::print_result;
use super::setup::{Cli, Commands, TargetArgs};
use anyhow::Result;
use clap::Parser;
use fontliftapp::api::FontliftApi;
use fontliftapp::commands::cleanup::CleanupMode;
use fontliftapp::commands::list::ListOptions;
use fontliftapp::commands::CmdResult;
use fontliftapp::config::FontliftConfig;
use fontliftapp::context::RunContext;
use fontliftapp::registry::sim_backend::SimBackend;
use fontliftapp::registry::{native_backend, FontBackend};
use fontliftapp::shell::{DryRunShell, Shell, SystemShell};

type AppApi = FontliftApi<Box<dyn FontBackend>, Box<dyn Shell>>;

/// Returns `Ok(false)` when the command finished but reported errors, which
/// have already been printed. Usage errors count as such; `--help` and
/// `--version` do not.
pub fn run() -> Result<bool> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let usage_error = e.use_stderr();
            e.print()?;
            return Ok(!usage_error);
        }
    };
    init_logging(cli.verbose);

    let api = create_api(&cli)?;
    let result = dispatch(&api, cli.command)?;
    print_result(&result);
    Ok(!result.has_errors())
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .format_timestamp(None)
        .init();
}

fn create_api(cli: &Cli) -> Result<AppApi> {
    let config = FontliftConfig::load(FontliftConfig::default_dir().as_deref())?;
    let simulate = cli.simulate.clone().or_else(|| config.simulate.clone());
    let ctx = RunContext::from_config(&config, simulate.is_some());
    log::debug!("run context: {:?}", ctx);

    let (backend, shell): (Box<dyn FontBackend>, Box<dyn Shell>) = match simulate {
        Some(registry) => {
            log::info!("simulating the font service with {}", registry.display());
            (
                Box::new(SimBackend::new(registry)),
                Box::new(DryRunShell::new()),
            )
        }
        None => (native_backend()?, Box::new(SystemShell)),
    };

    Ok(FontliftApi::new(backend, shell, ctx))
}

fn dispatch(api: &AppApi, command: Commands) -> Result<CmdResult> {
    let result = match command {
        Commands::List { path, name, sorted } => api.list(ListOptions {
            show_path: path,
            show_name: name,
            sorted,
        })?,
        Commands::Install { paths, admin } => api.install(&paths, admin)?,
        Commands::Uninstall(TargetArgs { name, path, admin }) => {
            api.uninstall(name, path, admin)?
        }
        Commands::Remove(TargetArgs { name, path, admin }) => api.remove(name, path, admin)?,
        Commands::Cleanup {
            admin,
            prune_only,
            cache_only,
        } => {
            let mode = if prune_only {
                CleanupMode::PruneOnly
            } else if cache_only {
                CleanupMode::CacheOnly
            } else {
                CleanupMode::All
            };
            api.cleanup(mode, admin)?
        }
    };
    Ok(result)
}
