use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::billing::date::ReferenceMonth;
use crate::{EngineError, EngineResult};

/// Payment status of a transaction or installment.
///
/// Wire tokens are the ledger's Portuguese labels; English aliases are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentStatus {
    Settled,
    Pending,
    Cancelled,
    Overdue,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settled => "efetivada",
            Self::Pending => "pendente",
            Self::Cancelled => "cancelada",
            Self::Overdue => "vencido",
        }
    }

    pub fn accepted_tokens() -> Vec<&'static str> {
        vec![
            "efetivada",
            "pendente",
            "cancelada",
            "vencido",
            "settled",
            "paid",
            "pending",
            "cancelled",
            "canceled",
            "overdue",
        ]
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "efetivada" | "settled" | "paid" => Ok(Self::Settled),
            "pendente" | "pending" => Ok(Self::Pending),
            "cancelada" | "cancelled" | "canceled" => Ok(Self::Cancelled),
            "vencido" | "overdue" => Ok(Self::Overdue),
            _ => Err(EngineError::invalid_argument_with_recovery(
                &format!("Unknown payment status `{value}`."),
                vec![format!(
                    "Use one of: {}.",
                    PaymentStatus::accepted_tokens().join(", ")
                )],
            )),
        }
    }
}

/// One transaction or installment as the ledger hands it to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingRecord {
    pub amount: Decimal,
    pub reference_month: ReferenceMonth,
    card_id: Option<String>,
    pub status: PaymentStatus,
    pub due_on: Option<NaiveDate>,
    pub description: Option<String>,
}

impl BillingRecord {
    pub fn new(
        amount: Decimal,
        reference_month: ReferenceMonth,
        card_id: Option<&str>,
        status: PaymentStatus,
        due_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            amount,
            reference_month,
            card_id: normalize_card_id(card_id),
            status,
            due_on,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Card this record is charged to; `None` for cash/account records.
    pub fn card_id(&self) -> Option<&str> {
        self.card_id.as_deref()
    }

    pub fn belongs_to_invoice(&self, card_id: &str, month: ReferenceMonth) -> bool {
        self.reference_month == month && self.card_id().is_some_and(|value| value == card_id)
    }
}

pub(crate) fn normalize_card_id(card_id: Option<&str>) -> Option<String> {
    let trimmed = card_id?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

pub(crate) fn parse_status(value: Option<&str>) -> EngineResult<PaymentStatus> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw.parse::<PaymentStatus>(),
        _ => Ok(PaymentStatus::Pending),
    }
}
