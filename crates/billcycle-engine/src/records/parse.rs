use std::collections::HashMap;

use serde_json::Value;

use crate::records::{OPTIONAL_RECORD_FIELDS, REQUIRED_RECORD_FIELDS};
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRow {
    pub(crate) row: usize,
    pub(crate) amount: Option<String>,
    pub(crate) reference_month: Option<String>,
    pub(crate) card_id: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) due_on: Option<String>,
    pub(crate) description: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_record_format(
            "Record source is empty.",
            "empty",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(EngineError::invalid_record_format(
            "JSON input must be a top-level array of record objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(EngineError::invalid_record_format(
        "Unsupported record format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        EngineError::invalid_record_format("Invalid JSON input. Provide a valid JSON array.", "json")
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(EngineError::invalid_record_format(
            "JSON input must be a top-level array of record objects.",
            "json_non_array",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(EngineError::invalid_record_format(
                "JSON array entries must all be objects with record fields.",
                "json_array",
            ));
        };

        rows.push(ParsedRow {
            row: index + 1,
            amount: read_optional_string(object.get("amount")),
            reference_month: read_optional_string(object.get("reference_month")),
            card_id: read_optional_string(object.get("card_id")),
            status: read_optional_string(object.get("status")),
            due_on: read_optional_string(object.get("due_on")),
            description: read_optional_string(object.get("description")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            EngineError::invalid_record_format("CSV header row is missing or unreadable.", "csv")
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(EngineError::record_schema_mismatch(
            to_strings(&REQUIRED_RECORD_FIELDS),
            to_strings(&OPTIONAL_RECORD_FIELDS),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|_| {
            EngineError::invalid_record_format("CSV rows are malformed or not UTF-8.", "csv")
        })?;

        rows.push(ParsedRow {
            row: row_index + 1,
            amount: value_for(&record, &index_by_name, "amount"),
            reference_month: value_for(&record, &index_by_name, "reference_month"),
            card_id: value_for(&record, &index_by_name, "card_id"),
            status: value_for(&record, &index_by_name, "status"),
            due_on: value_for(&record, &index_by_name, "due_on"),
            description: value_for(&record, &index_by_name, "description"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    let has_required = REQUIRED_RECORD_FIELDS
        .iter()
        .all(|required| actual_headers.iter().any(|value| value == required));
    let all_known = actual_headers.iter().all(|header| {
        REQUIRED_RECORD_FIELDS.contains(&header.as_str())
            || OPTIONAL_RECORD_FIELDS.contains(&header.as_str())
    });
    has_required && all_known
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
