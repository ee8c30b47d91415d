//! # CLI Behavior
//!
//! This is **one possible UI client** for fontlift, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ## Output Contract
//!
//! - `list` prints bare lines on stdout: no headers, no colors, so the output
//!   can be piped into other tools.
//! - Every other command prints leveled messages. Errors go to stderr as
//!   `Error: <message>`.
//!
//! ## Simulation
//!
//! The hidden `--simulate <REGISTRY.json>` flag (or `FONTLIFT_SIMULATE`) swaps
//! the platform font service for a JSON registry and the shell for a dry-run
//! recorder. `--admin` is accepted without privileges in that mode.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap, help text
//! - `commands`: Context wiring and dispatch to the API
//! - `render`: Output formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
