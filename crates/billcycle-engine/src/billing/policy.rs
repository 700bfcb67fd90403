use rust_decimal::Decimal;

/// Billing policy identifier.
///
/// Emitted with every computed result so a change to any threshold below is
/// visible in stored plans and command output.
pub const BILLING_POLICY_VERSION: &str = "billing/v1";

/// v1 billing policy.
///
/// Notes:
/// - Amounts are kept at `minor_unit_scale` decimal places; rounding happens
///   only inside the splitter.
/// - A due day that does not exist in the target month clamps to that
///   month's last day. It never rolls into the following month.
/// - `due_soon_window_days` is inclusive.
/// - Amounts are bounded by `max_amount` in magnitude so every value keeps
///   room for `minor_unit_scale` places inside `Decimal`'s 96-bit mantissa.
#[derive(Debug, Clone, Copy)]
pub struct BillingPolicy {
    pub minor_unit_scale: u32,
    pub max_installment_count: u32,
    pub max_amount_minor_units: i64,
    pub due_soon_window_days: i64,
}

impl BillingPolicy {
    pub fn accepts_installment_count(self, count: u32) -> bool {
        (1..=self.max_installment_count).contains(&count)
    }

    pub fn accepts_card_day(self, day: u32) -> bool {
        (1..=31).contains(&day)
    }

    pub fn has_minor_unit_precision(self, amount: Decimal) -> bool {
        amount.normalize().scale() <= self.minor_unit_scale
    }

    pub fn max_amount(self) -> Decimal {
        Decimal::new(self.max_amount_minor_units, self.minor_unit_scale)
    }

    pub fn accepts_amount_magnitude(self, amount: Decimal) -> bool {
        amount.abs() <= self.max_amount()
    }

    pub fn is_due_soon(self, days_until_due: i64) -> bool {
        days_until_due <= self.due_soon_window_days
    }

    /// Rescales to exactly `minor_unit_scale` places so `100` prints as `100.00`.
    ///
    /// Only amounts within `max_amount` are guaranteed to reach that scale.
    pub fn to_minor_units(self, amount: Decimal) -> Decimal {
        let mut scaled = amount;
        scaled.rescale(self.minor_unit_scale);
        scaled
    }
}

pub const BILLING_POLICY_V1: BillingPolicy = BillingPolicy {
    minor_unit_scale: 2,
    max_installment_count: 120,
    max_amount_minor_units: 99_999_999_999_999,
    due_soon_window_days: 5,
};
