pub mod cycle;
pub mod date;
pub mod invoice;
pub mod plan;
pub mod policy;
pub mod split;
pub mod status;
pub mod types;

pub use cycle::{CardConfig, resolve_reference_month};
pub use date::ReferenceMonth;
pub use invoice::{InvoiceSummary, checked_sum, summarize_invoices, total_for_invoice};
pub use plan::{Installment, InstallmentPlan, build_plan};
pub use split::split_amount;
pub use status::{StatusBucket, classify, classify_batch, days_until_due};
pub use types::{BillingRecord, PaymentStatus};
