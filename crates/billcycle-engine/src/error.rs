use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::RecordIssue;

pub(crate) const RECORDS_HELP_COMMAND: &str = "billcycle invoice --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `billcycle {cmd} --help` for usage."),
            None => "Run `billcycle --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_installment_count(value: &str, max_count: u32) -> Self {
        Self::new(
            "invalid_installment_count",
            &format!("Installment count `{value}` is invalid: use a whole number from 1 to {max_count}."),
            vec![
                "Pass 1 for a single-payment purchase.".to_string(),
                format!("Split larger purchases into at most {max_count} installments."),
            ],
        )
        .with_data(json!({
            "received": value,
            "min": 1,
            "max": max_count,
        }))
    }

    pub fn invalid_card_day(field_name: &str, value: &str) -> Self {
        Self::new(
            "invalid_card_day",
            &format!("`{field_name}` must be a calendar day from 1 to 31, got `{value}`."),
            vec![
                "Use the day printed on your card statement.".to_string(),
                "Days 29-31 are accepted; due dates clamp to the last day of short months."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "field": field_name,
            "received": value,
        }))
    }

    pub fn invalid_amount(value: &str, detail: &str) -> Self {
        Self::new(
            "invalid_amount",
            &format!("Amount `{value}` is invalid: {detail}"),
            vec![
                "Use a non-negative number with at most 2 decimal places.".to_string(),
                "Example: `1299.90`".to_string(),
            ],
        )
        .with_data(json!({
            "received": value,
        }))
    }

    pub fn amount_overflow(running_total: &str, amount: &str) -> Self {
        Self::new(
            "amount_overflow",
            &format!(
                "Adding `{amount}` to a running total of `{running_total}` exceeds the supported decimal range."
            ),
            vec![
                "Check the record file for mistyped or duplicated amounts.".to_string(),
                "Split the records into smaller files and total them separately.".to_string(),
            ],
        )
        .with_data(json!({
            "running_total": running_total,
            "amount": amount,
        }))
    }

    pub fn invalid_reference_month(value: &str) -> Self {
        Self::new(
            "invalid_reference_month",
            &format!(
                "Reference month `{value}` must use YYYY-MM format with a month from 01 to 12 and a year from 0001 to 9999."
            ),
            vec!["Example: `2026-03`".to_string()],
        )
        .with_data(json!({
            "received": value,
        }))
    }

    pub fn invalid_date(field_name: &str, value: &str, detail: &str) -> Self {
        Self::new(
            "invalid_date",
            &format!("`{field_name}` value `{value}` is invalid: {detail}"),
            vec!["Use YYYY-MM-DD with a real calendar date, e.g. `2026-01-15`.".to_string()],
        )
        .with_data(json!({
            "field": field_name,
            "received": value,
        }))
    }

    pub fn invalid_record_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_record_format",
            message,
            vec![
                "Provide a JSON array of record objects or a CSV file with a header row."
                    .to_string(),
                format!("Run `{RECORDS_HELP_COMMAND}` to review record fields."),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn record_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "record_schema_mismatch",
            "CSV headers do not satisfy the billing record schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                format!("Run `{RECORDS_HELP_COMMAND}` to review required and optional fields."),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn record_validation_failed(rows_read: usize, issues: Vec<RecordIssue>) -> Self {
        let mut invalid_rows = issues.iter().map(|issue| issue.row).collect::<Vec<usize>>();
        invalid_rows.dedup();
        let invalid_count = invalid_rows.len();
        Self::new(
            "record_validation_failed",
            &format!(
                "Billing records failed validation: {invalid_count} of {rows_read} rows need fixes."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun the same command once every row validates.".to_string(),
            ],
        )
        .with_data(json!({
            "rows_read": rows_read,
            "rows_invalid": invalid_count,
            "issues": issues,
        }))
    }

    pub fn card_not_found(card_id: &str, known_cards: Vec<String>, profiles_path: &Path) -> Self {
        let location = profiles_path.display().to_string();
        Self::new(
            "card_not_found",
            &format!("Card `{card_id}` is not configured in `{location}`."),
            vec![
                "Run `billcycle card list` to see configured cards.".to_string(),
                "Or pass --closing-day and --due-day explicitly.".to_string(),
            ],
        )
        .with_data(json!({
            "card_id": card_id,
            "known_cards": known_cards,
            "profiles_path": location,
        }))
    }

    pub fn card_profiles_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "card_profiles_invalid",
            &format!("Card profiles at `{location}` are invalid: {detail}"),
            vec![
                "Expected shape: {\"cards\": [{\"card_id\": \"visa\", \"closing_day\": 5, \"due_day\": 20}]}."
                    .to_string(),
                "Set `BILLCYCLE_HOME` to use a different profile directory.".to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_io(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "internal_io_error",
            &format!("Could not access `{location}`: {detail}"),
            vec![format!("Verify `{location}` exists and is readable.")],
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
