use chrono::NaiveDateTime;

use crate::EngineResult;
use crate::billing::date::{format_evaluation_instant, format_iso_date, parse_evaluation_instant};
use crate::billing::status::{StatusBucket, classify, days_until_due};
use crate::billing::types::PaymentStatus;
use crate::commands::common::{format_amount, log_rejection, parse_date};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{StatusCheckData, StatusCounts, StatusListData, StatusRow};
use crate::records::load_records;

const CHECK_COMMAND: &str = "status check";
const LIST_COMMAND: &str = "status list";

/// `now` is the caller's clock reading; `at` overrides it when present.
#[derive(Debug)]
pub struct StatusCheckOptions {
    pub status: String,
    pub due_on: Option<String>,
    pub at: Option<String>,
    pub now: NaiveDateTime,
}

#[derive(Debug)]
pub struct StatusListOptions {
    pub path: String,
    pub at: Option<String>,
    pub now: NaiveDateTime,
    pub stdin_override: Option<String>,
}

pub fn check(status: &str, due_on: Option<&str>, now: NaiveDateTime) -> EngineResult<SuccessEnvelope> {
    check_with_options(StatusCheckOptions {
        status: status.to_string(),
        due_on: due_on.map(std::string::ToString::to_string),
        at: None,
        now,
    })
}

#[doc(hidden)]
pub fn check_with_options(options: StatusCheckOptions) -> EngineResult<SuccessEnvelope> {
    status_check(&options).inspect_err(|error| log_rejection(CHECK_COMMAND, error))
}

pub fn list(path: &str, now: NaiveDateTime) -> EngineResult<SuccessEnvelope> {
    list_with_options(StatusListOptions {
        path: path.to_string(),
        at: None,
        now,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: StatusListOptions) -> EngineResult<SuccessEnvelope> {
    status_list(options).inspect_err(|error| log_rejection(LIST_COMMAND, error))
}

fn status_check(options: &StatusCheckOptions) -> EngineResult<SuccessEnvelope> {
    let status = options.status.parse::<PaymentStatus>()?;
    let due_on = options
        .due_on
        .as_deref()
        .map(|value| parse_date(value, "due_on"))
        .transpose()?;
    let now = evaluation_instant(options.at.as_deref(), options.now)?;

    let data = StatusCheckData {
        status: status.as_str().to_string(),
        due_on: due_on.as_ref().map(format_iso_date),
        evaluated_at: format_evaluation_instant(&now),
        days_until_due: due_on.map(|date| days_until_due(date, now)),
        bucket: classify(status, due_on, now).as_str().to_string(),
    };

    success(CHECK_COMMAND, data)
}

fn status_list(options: StatusListOptions) -> EngineResult<SuccessEnvelope> {
    let now = evaluation_instant(options.at.as_deref(), options.now)?;
    let loaded = load_records(&options.path, options.stdin_override)?;

    let mut counts = StatusCounts::default();
    let rows = loaded
        .rows
        .iter()
        .map(|sourced| {
            let record = &sourced.record;
            let bucket = classify(record.status, record.due_on, now);
            match bucket {
                StatusBucket::Paid => counts.paid += 1,
                StatusBucket::Overdue => counts.overdue += 1,
                StatusBucket::DueSoon => counts.due_soon += 1,
                StatusBucket::Normal => counts.normal += 1,
            }
            StatusRow {
                row: sourced.row,
                card_id: record.card_id().map(std::string::ToString::to_string),
                reference_month: record.reference_month.to_string(),
                amount: format_amount(record.amount),
                status: record.status.as_str().to_string(),
                due_on: record.due_on.as_ref().map(format_iso_date),
                days_until_due: record.due_on.map(|date| days_until_due(date, now)),
                bucket: bucket.as_str().to_string(),
                description: record.description.clone(),
            }
        })
        .collect::<Vec<StatusRow>>();

    let data = StatusListData {
        source: loaded.source,
        evaluated_at: format_evaluation_instant(&now),
        records_read: loaded.rows.len(),
        counts,
        rows,
    };

    success(LIST_COMMAND, data)
}

fn evaluation_instant(at: Option<&str>, now: NaiveDateTime) -> EngineResult<NaiveDateTime> {
    match at {
        Some(value) => parse_evaluation_instant(value, "at"),
        None => Ok(now),
    }
}
