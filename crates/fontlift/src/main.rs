//! # Fontlift CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/fontliftapp/`: library with the UI-agnostic font management logic
//! - `crates/fontlift/`: this CLI tool, depends on `fontliftapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/fontlift/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Backend selection + dispatch (commands.rs)               │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/fontliftapp/src/api.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//!
//! 0 on success and for `--help`/`--version`. 1 when a command fails outright
//! (printed as `Error: <message>`), when the arguments do not parse (clap's
//! usage message), or when a multi-file command reported per-file errors,
//! which render.rs has already printed.
//!
//! ## Testing Approach
//!
//! Logic is tested in the library. `tests/cli_e2e.rs` drives this binary
//! end to end against a simulated registry (`--simulate`).

mod cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
