use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::EngineResult;
use crate::billing::cycle::{CardConfig, resolve_reference_month};
use crate::billing::date::ReferenceMonth;
use crate::billing::policy::{BILLING_POLICY_V1, BillingPolicy};
use crate::billing::split::split_amount_with_policy;
use crate::billing::types::{BillingRecord, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub sequence: u32,
    pub amount: Decimal,
    pub purchased_on: NaiveDate,
    pub reference_month: ReferenceMonth,
    pub due_on: NaiveDate,
}

/// Installments of one purchase together with the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPlan {
    pub total: Decimal,
    pub count: u32,
    pub purchased_on: NaiveDate,
    pub card: CardConfig,
    pub installments: Vec<Installment>,
}

impl InstallmentPlan {
    pub fn first_reference_month(&self) -> Option<ReferenceMonth> {
        self.installments.first().map(|row| row.reference_month)
    }

    pub fn last_due_on(&self) -> Option<NaiveDate> {
        self.installments.last().map(|row| row.due_on)
    }

    pub fn scheduled_total(&self) -> Decimal {
        self.installments.iter().map(|row| row.amount).sum()
    }

    /// Pending ledger records for every installment, charged to `card_id`.
    pub fn to_records(&self, card_id: &str) -> Vec<BillingRecord> {
        self.installments
            .iter()
            .map(|row| {
                BillingRecord::new(
                    row.amount,
                    row.reference_month,
                    Some(card_id),
                    PaymentStatus::Pending,
                    Some(row.due_on),
                )
                .with_description(&format!("installment {}/{}", row.sequence, self.count))
            })
            .collect()
    }
}

pub fn build_plan(
    total: Decimal,
    count: u32,
    purchased_on: NaiveDate,
    card: &CardConfig,
) -> EngineResult<InstallmentPlan> {
    build_plan_with_policy(total, count, purchased_on, card, BILLING_POLICY_V1)
}

fn build_plan_with_policy(
    total: Decimal,
    count: u32,
    purchased_on: NaiveDate,
    card: &CardConfig,
    policy: BillingPolicy,
) -> EngineResult<InstallmentPlan> {
    let amounts = split_amount_with_policy(total, count, policy)?;
    let first_month = resolve_reference_month(purchased_on, card.closing_day())?;

    let mut installments = Vec::with_capacity(amounts.len());
    for (offset, amount) in (0u32..).zip(amounts) {
        let reference_month = first_month.advance(offset)?;
        installments.push(Installment {
            sequence: offset + 1,
            amount,
            purchased_on,
            reference_month,
            due_on: reference_month.day_clamped(card.due_day())?,
        });
    }

    tracing::debug!(
        %total,
        count,
        %purchased_on,
        closing_day = card.closing_day(),
        due_day = card.due_day(),
        first_month = %first_month,
        "built installment plan"
    );

    Ok(InstallmentPlan {
        total: policy.to_minor_units(total),
        count,
        purchased_on,
        card: *card,
        installments,
    })
}
