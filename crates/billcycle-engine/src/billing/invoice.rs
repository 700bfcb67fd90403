use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::billing::date::ReferenceMonth;
use crate::billing::policy::BILLING_POLICY_V1;
use crate::billing::types::BillingRecord;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSummary {
    pub card_id: String,
    pub reference_month: ReferenceMonth,
    pub total: Decimal,
    pub record_count: usize,
}

/// Sums the records billed to `card_id` under `month`.
///
/// Records without a card never count toward an invoice, even when their
/// reference month matches.
pub fn total_for_invoice(
    records: &[BillingRecord],
    card_id: &str,
    month: ReferenceMonth,
) -> EngineResult<Decimal> {
    let total = checked_sum(
        records
            .iter()
            .filter(|record| record.belongs_to_invoice(card_id, month))
            .map(|record| record.amount),
    )?;
    Ok(BILLING_POLICY_V1.to_minor_units(total))
}

/// Every invoice present in `records`, ordered by card and then month.
pub fn summarize_invoices(records: &[BillingRecord]) -> EngineResult<Vec<InvoiceSummary>> {
    let mut groups: BTreeMap<(String, ReferenceMonth), InvoiceSummary> = BTreeMap::new();
    for record in records {
        let Some(card_id) = record.card_id() else {
            continue;
        };
        let entry = groups
            .entry((card_id.to_string(), record.reference_month))
            .or_insert_with(|| InvoiceSummary {
                card_id: card_id.to_string(),
                reference_month: record.reference_month,
                total: Decimal::ZERO,
                record_count: 0,
            });
        entry.total = checked_add(entry.total, record.amount)?;
        entry.record_count += 1;
    }

    Ok(groups
        .into_values()
        .map(|mut summary| {
            summary.total = BILLING_POLICY_V1.to_minor_units(summary.total);
            summary
        })
        .collect())
}

/// Sums amounts, failing instead of panicking past `Decimal`'s range.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> EngineResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, checked_add)
}

fn checked_add(running_total: Decimal, amount: Decimal) -> EngineResult<Decimal> {
    running_total.checked_add(amount).ok_or_else(|| {
        EngineError::amount_overflow(&running_total.to_string(), &amount.to_string())
    })
}
