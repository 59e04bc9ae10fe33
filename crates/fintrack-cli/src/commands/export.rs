//! Export command

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fintrack_core::{export_history, filter_history, ExportFormat, HistoryStore, KeyValueStore};

use crate::cli::FilterArgs;

pub fn cmd_export<S: KeyValueStore>(
    store: &HistoryStore<S>,
    output: &Path,
    format: &str,
    filter: &FilterArgs,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    let history = store.load().context("Failed to load history")?;
    let entries = filter_history(
        &history,
        filter.month.as_deref(),
        filter.year.as_deref(),
    );

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    export_history(&entries, format, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✅ Exported {} entries ({}) to {}",
        entries.len(),
        format,
        output.display()
    );
    Ok(())
}
