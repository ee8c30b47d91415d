use crate::commands::CmdResult;
use crate::error::Result;
use crate::registry::FontBackend;
use std::collections::BTreeSet;

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub show_path: bool,
    pub show_name: bool,
    /// Deduplicate name and combined output as well.
    pub sorted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMode {
    Path,
    Name,
    Combined,
}

impl ListOptions {
    fn mode(&self) -> ListMode {
        match (self.show_path, self.show_name) {
            (_, false) => ListMode::Path,
            (false, true) => ListMode::Name,
            (true, true) => ListMode::Combined,
        }
    }
}

pub fn run<B: FontBackend + ?Sized>(backend: &B, options: ListOptions) -> Result<CmdResult> {
    let records = backend.enumerate()?;
    log::debug!("listing {} font records", records.len());

    let lines: Vec<String> = match options.mode() {
        // One line per file, whatever `sorted` says.
        ListMode::Path => records
            .iter()
            .map(|r| r.path.display().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        ListMode::Name => finish(
            records
                .iter()
                .filter_map(|r| r.resolved_name().map(str::to_string))
                .collect(),
            options.sorted,
        ),
        ListMode::Combined => finish(
            records
                .iter()
                .map(|r| {
                    format!(
                        "{};{}",
                        r.path.display(),
                        r.resolved_name().unwrap_or(UNKNOWN_NAME)
                    )
                })
                .collect(),
            options.sorted,
        ),
    };

    Ok(CmdResult::default().with_lines(lines))
}

fn finish(mut lines: Vec<String>, dedup: bool) -> Vec<String> {
    lines.sort();
    if dedup {
        lines.dedup();
    }
    lines
}
