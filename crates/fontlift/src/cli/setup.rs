use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fontlift",
    bin_name = "fontlift",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Install, list and remove fonts on macOS", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use a JSON registry file instead of the system font service
    #[arg(long, value_name = "REGISTRY", global = true, hide = true)]
    pub simulate: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed fonts
    #[command(visible_alias = "l")]
    List {
        /// Show font file paths (the default)
        #[arg(short, long)]
        path: bool,

        /// Show font names
        #[arg(short, long)]
        name: bool,

        /// Sort and deduplicate names as well as paths
        #[arg(short, long)]
        sorted: bool,
    },

    /// Install fonts from file paths
    #[command(visible_alias = "i")]
    Install {
        /// Font files to install
        #[arg(required = true, num_args = 1.., value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Install for all users (requires sudo)
        #[arg(short, long)]
        admin: bool,
    },

    /// Uninstall fonts (keeping files)
    #[command(visible_alias = "u")]
    Uninstall(TargetArgs),

    /// Remove fonts (uninstall and delete files)
    #[command(visible_alias = "rm")]
    Remove(TargetArgs),

    /// Prune stale registrations and clear font caches
    #[command(visible_alias = "c")]
    Cleanup {
        /// Include system-wide registrations and caches (requires sudo)
        #[arg(short, long)]
        admin: bool,

        /// Only prune stale registrations
        #[arg(long, conflicts_with = "cache_only")]
        prune_only: bool,

        /// Only clear font caches
        #[arg(long)]
        cache_only: bool,
    },
}

/// A font picked by name or by file path. Exactly one is required; the API
/// layer checks that so the message is the same for every client.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Font name (PostScript name, or display name when it has none)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Font file path
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Also act on system-wide registrations (requires sudo)
    #[arg(short, long)]
    pub admin: bool,
}
