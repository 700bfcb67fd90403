use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::billing::policy::{BILLING_POLICY_V1, BillingPolicy};
use crate::billing::types::{BillingRecord, PaymentStatus};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display urgency derived from a status and due date at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusBucket {
    Paid,
    Overdue,
    DueSoon,
    Normal,
}

impl StatusBucket {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::DueSoon => "due_soon",
            Self::Normal => "normal",
        }
    }
}

/// Whole days left until the start of `due_on`, rounded up.
///
/// Negative once the due date has passed.
pub fn days_until_due(due_on: NaiveDate, now: NaiveDateTime) -> i64 {
    let remaining = (due_on.and_time(NaiveTime::MIN) - now).num_milliseconds();
    let whole_days = remaining.div_euclid(MILLIS_PER_DAY);
    if remaining.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole_days + 1
    } else {
        whole_days
    }
}

pub fn classify(status: PaymentStatus, due_on: Option<NaiveDate>, now: NaiveDateTime) -> StatusBucket {
    classify_with_policy(status, due_on, now, BILLING_POLICY_V1)
}

/// Classifies every record against the same instant.
pub fn classify_batch(records: &[BillingRecord], now: NaiveDateTime) -> Vec<StatusBucket> {
    records
        .iter()
        .map(|record| classify(record.status, record.due_on, now))
        .collect()
}

fn classify_with_policy(
    status: PaymentStatus,
    due_on: Option<NaiveDate>,
    now: NaiveDateTime,
    policy: BillingPolicy,
) -> StatusBucket {
    match status {
        PaymentStatus::Settled => StatusBucket::Paid,
        PaymentStatus::Overdue | PaymentStatus::Cancelled => StatusBucket::Overdue,
        PaymentStatus::Pending => match due_on {
            Some(date) if policy.is_due_soon(days_until_due(date, now)) => StatusBucket::DueSoon,
            _ => StatusBucket::Normal,
        },
    }
}
