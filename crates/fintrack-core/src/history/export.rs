//! CSV and JSON export of history entries

use std::io::Write;

use crate::error::Result;
use crate::models::Snapshot;

/// Output format for `export_history`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write `entries` to `writer` in `format`
///
/// CSV output has the header `id,date,income,expenses,savings`; JSON output
/// is a pretty-printed array in the persisted record shape.
pub fn export_history<W: Write>(entries: &[Snapshot], format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            wtr.write_record(["id", "date", "income", "expenses", "savings"])?;
            for entry in entries {
                wtr.write_record([
                    entry.id.to_string(),
                    entry.date.clone(),
                    entry.income.to_string(),
                    entry.expenses.to_string(),
                    entry.savings.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    Ok(())
}
