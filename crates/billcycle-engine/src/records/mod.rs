pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use crate::EngineResult;
use crate::billing::types::BillingRecord;

pub(crate) const REQUIRED_RECORD_FIELDS: [&str; 2] = ["amount", "reference_month"];
pub(crate) const OPTIONAL_RECORD_FIELDS: [&str; 4] = ["card_id", "status", "due_on", "description"];

/// A validated record and its 1-based position in the source.
#[derive(Debug, Clone)]
pub(crate) struct SourcedRecord {
    pub(crate) row: usize,
    pub(crate) record: BillingRecord,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedRecords {
    pub(crate) source: String,
    pub(crate) rows: Vec<SourcedRecord>,
}

impl LoadedRecords {
    pub(crate) fn records(&self) -> Vec<BillingRecord> {
        self.rows.iter().map(|row| row.record.clone()).collect()
    }
}

pub(crate) fn load_records(path: &str, stdin_override: Option<String>) -> EngineResult<LoadedRecords> {
    let source = input::resolve_source(path, stdin_override)?;
    let parsed = parse::parse_source(&source.content)?;
    let rows = validate::validate_rows(parsed)?;
    tracing::debug!(source = %source.label, rows = rows.len(), "loaded billing records");
    Ok(LoadedRecords {
        source: source.label,
        rows,
    })
}
