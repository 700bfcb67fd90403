use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::billing::date::{ReferenceMonth, parse_iso_date_strict};
use crate::billing::policy::{BILLING_POLICY_V1, BillingPolicy};
use crate::billing::types::{BillingRecord, PaymentStatus, parse_status};
use crate::contracts::types::RecordIssue;
use crate::records::SourcedRecord;
use crate::records::parse::ParsedRow;
use crate::{EngineError, EngineResult};

/// Validates every row, reporting all issues at once rather than the first.
pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> EngineResult<Vec<SourcedRecord>> {
    let rows_read = parsed_rows.len();
    let mut rows = Vec::with_capacity(rows_read);
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();
        let amount = validate_amount(raw.row, raw.amount, BILLING_POLICY_V1, &mut row_issues);
        let reference_month =
            validate_reference_month(raw.row, raw.reference_month, &mut row_issues);
        let status = validate_status(raw.row, raw.status, &mut row_issues);
        let due_on = validate_due_on(raw.row, raw.due_on, &mut row_issues);

        match (amount, reference_month, status, row_issues.is_empty()) {
            (Some(amount), Some(reference_month), Some(status), true) => {
                let mut record = BillingRecord::new(
                    amount,
                    reference_month,
                    raw.card_id.as_deref(),
                    status,
                    due_on,
                );
                if let Some(description) = normalize_optional(raw.description) {
                    record = record.with_description(&description);
                }
                rows.push(SourcedRecord {
                    row: raw.row,
                    record,
                });
            }
            _ => issues.extend(row_issues),
        }
    }

    if !issues.is_empty() {
        tracing::warn!(rows_read, issue_count = issues.len(), "billing records failed validation");
        return Err(EngineError::record_validation_failed(rows_read, issues));
    }

    Ok(rows)
}

fn validate_amount(
    row: usize,
    value: Option<String>,
    policy: BillingPolicy,
    issues: &mut Vec<RecordIssue>,
) -> Option<Decimal> {
    let Some(raw) = normalize_optional(value) else {
        issues.push(RecordIssue::new(
            row,
            "amount",
            "missing_required_field",
            "amount must be present.",
        ));
        return None;
    };

    let Ok(amount) = Decimal::from_str(&raw) else {
        issues.push(RecordIssue::new(
            row,
            "amount",
            "invalid_amount",
            &format!("amount `{raw}` is not a decimal number."),
        ));
        return None;
    };

    if !policy.has_minor_unit_precision(amount) {
        issues.push(RecordIssue::new(
            row,
            "amount",
            "invalid_amount",
            &format!(
                "amount `{raw}` has more than {} decimal places.",
                policy.minor_unit_scale
            ),
        ));
        return None;
    }

    if !policy.accepts_amount_magnitude(amount) {
        issues.push(RecordIssue::new(
            row,
            "amount",
            "invalid_amount",
            &format!(
                "amount `{raw}` exceeds the largest supported amount ({}).",
                policy.max_amount()
            ),
        ));
        return None;
    }

    Some(policy.to_minor_units(amount))
}

fn validate_reference_month(
    row: usize,
    value: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<ReferenceMonth> {
    let Some(raw) = normalize_optional(value) else {
        issues.push(RecordIssue::new(
            row,
            "reference_month",
            "missing_required_field",
            "reference_month must be present.",
        ));
        return None;
    };

    match raw.parse::<ReferenceMonth>() {
        Ok(month) => Some(month),
        Err(error) => {
            issues.push(RecordIssue::new(row, "reference_month", &error.code, &error.message));
            None
        }
    }
}

fn validate_status(
    row: usize,
    value: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<PaymentStatus> {
    match parse_status(value.as_deref()) {
        Ok(status) => Some(status),
        Err(error) => {
            issues.push(RecordIssue::new(row, "status", "invalid_status", &error.message));
            None
        }
    }
}

fn validate_due_on(
    row: usize,
    value: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<NaiveDate> {
    let raw = normalize_optional(value)?;
    match parse_iso_date_strict(&raw, "due_on") {
        Ok(date) => Some(date),
        Err(error) => {
            issues.push(RecordIssue::new(row, "due_on", &error.code, &error.message));
            None
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}
