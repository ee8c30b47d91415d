//! # Fontlift Architecture
//!
//! Fontlift is a **font-management library** with a thin CLI on top. It installs,
//! lists, uninstalls and removes fonts through the platform font-registration
//! service, and keeps that service's state honest: stale registrations get pruned,
//! font caches get cleared.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/fontlift)                                │
//! │  - Parses arguments, renders output, picks the exit code    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (name vs path targets, absolute paths) │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Name resolution, protection gate, conflict handling      │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Registry (registry/) and Shell (shell.rs)                  │
//! │  - FontBackend: CoreText, simulated JSON, in-memory         │
//! │  - Shell: system processes or a dry-run recorder            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Safety Rules
//!
//! - Files under `/System/Library/Fonts/` and `/Library/Fonts/` are never
//!   unregistered or deleted, and an install that would shadow one is refused.
//! - A name that matches more than one file is never guessed at: the caller gets
//!   every candidate with a ready-to-run command line.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Diagnostics go through the `log` facade.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`registry`]: Font service abstraction and implementations
//! - [`shell`]: External process abstraction
//! - [`cache`]: Font cache planning and clearing
//! - [`model`]: Core data types (`FontRecord`, `Scope`, `FontTarget`)
//! - [`context`]: Per-invocation facts (privileges, home directory)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod registry;
pub mod shell;

#[cfg(test)]
pub mod test_utils;
