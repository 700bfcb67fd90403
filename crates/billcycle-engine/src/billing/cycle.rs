use chrono::{Datelike, NaiveDate};

use crate::billing::date::ReferenceMonth;
use crate::billing::policy::{BILLING_POLICY_V1, BillingPolicy};
use crate::{EngineError, EngineResult};

/// Billing geometry of one card: the day its window closes and the day its
/// invoice is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardConfig {
    closing_day: u32,
    due_day: u32,
}

impl CardConfig {
    pub fn new(closing_day: u32, due_day: u32) -> EngineResult<Self> {
        ensure_card_day(BILLING_POLICY_V1, "closing_day", closing_day)?;
        ensure_card_day(BILLING_POLICY_V1, "due_day", due_day)?;
        Ok(Self {
            closing_day,
            due_day,
        })
    }

    pub const fn closing_day(self) -> u32 {
        self.closing_day
    }

    pub const fn due_day(self) -> u32 {
        self.due_day
    }
}

/// Resolves the invoice a purchase lands on.
///
/// A purchase on or before the closing day is billed on the next month's
/// invoice; one made after it misses this cycle and is billed two months
/// ahead.
pub fn resolve_reference_month(
    purchased_on: NaiveDate,
    closing_day: u32,
) -> EngineResult<ReferenceMonth> {
    ensure_card_day(BILLING_POLICY_V1, "closing_day", closing_day)?;
    let months_ahead = if purchased_on.day() > closing_day { 2 } else { 1 };
    ReferenceMonth::of(purchased_on)?.advance(months_ahead)
}

pub(crate) fn ensure_card_day(policy: BillingPolicy, field_name: &str, day: u32) -> EngineResult<()> {
    if policy.accepts_card_day(day) {
        return Ok(());
    }
    Err(EngineError::invalid_card_day(field_name, &day.to_string()))
}
