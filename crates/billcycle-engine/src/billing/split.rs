use rust_decimal::{Decimal, RoundingStrategy};

use crate::billing::policy::{BILLING_POLICY_V1, BillingPolicy};
use crate::{EngineError, EngineResult};

/// Splits `total` into `count` minor-unit amounts that sum exactly to it.
///
/// Every installment gets the per-installment share floored to the minor
/// unit; the last one also absorbs whatever the flooring left over.
pub fn split_amount(total: Decimal, count: u32) -> EngineResult<Vec<Decimal>> {
    split_amount_with_policy(total, count, BILLING_POLICY_V1)
}

pub(crate) fn split_amount_with_policy(
    total: Decimal,
    count: u32,
    policy: BillingPolicy,
) -> EngineResult<Vec<Decimal>> {
    ensure_installment_count(policy, count)?;
    ensure_splittable_total(policy, total)?;

    let divisor = Decimal::from(count);
    let base = (total / divisor)
        .round_dp_with_strategy(policy.minor_unit_scale, RoundingStrategy::ToNegativeInfinity);
    let remainder = (total - base * divisor).round_dp_with_strategy(
        policy.minor_unit_scale,
        RoundingStrategy::MidpointAwayFromZero,
    );

    let mut amounts = vec![policy.to_minor_units(base); count as usize];
    if let Some(last) = amounts.last_mut() {
        *last = policy.to_minor_units(*last + remainder);
    }
    Ok(amounts)
}

pub(crate) fn ensure_installment_count(policy: BillingPolicy, count: u32) -> EngineResult<()> {
    if policy.accepts_installment_count(count) {
        return Ok(());
    }
    Err(EngineError::invalid_installment_count(
        &count.to_string(),
        policy.max_installment_count,
    ))
}

pub(crate) fn ensure_splittable_total(policy: BillingPolicy, total: Decimal) -> EngineResult<()> {
    if total.is_sign_negative() && !total.is_zero() {
        return Err(EngineError::invalid_amount(
            &total.to_string(),
            "purchase totals cannot be negative.",
        ));
    }
    if !policy.accepts_amount_magnitude(total) {
        return Err(EngineError::invalid_amount(
            &total.to_string(),
            &format!("purchase totals cannot exceed {}.", policy.max_amount()),
        ));
    }
    if !policy.has_minor_unit_precision(total) {
        return Err(EngineError::invalid_amount(
            &total.to_string(),
            &format!(
                "use at most {} decimal places.",
                policy.minor_unit_scale
            ),
        ));
    }
    Ok(())
}
