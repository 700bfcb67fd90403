use crate::billing::date::ReferenceMonth;
use crate::billing::invoice::{checked_sum, summarize_invoices, total_for_invoice};
use crate::commands::common::{format_amount, log_rejection};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{InvoiceListData, InvoiceRow, InvoiceTotalData};
use crate::records::load_records;
use crate::{EngineError, EngineResult};

const TOTAL_COMMAND: &str = "invoice total";
const LIST_COMMAND: &str = "invoice list";

#[derive(Debug, Default)]
pub struct InvoiceTotalOptions {
    pub path: String,
    pub card_id: String,
    pub month: String,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct InvoiceListOptions {
    pub path: String,
    pub stdin_override: Option<String>,
}

pub fn total(path: &str, card_id: &str, month: &str) -> EngineResult<SuccessEnvelope> {
    total_with_options(InvoiceTotalOptions {
        path: path.to_string(),
        card_id: card_id.to_string(),
        month: month.to_string(),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn total_with_options(options: InvoiceTotalOptions) -> EngineResult<SuccessEnvelope> {
    invoice_total(options).inspect_err(|error| log_rejection(TOTAL_COMMAND, error))
}

pub fn list(path: &str) -> EngineResult<SuccessEnvelope> {
    list_with_options(InvoiceListOptions {
        path: path.to_string(),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: InvoiceListOptions) -> EngineResult<SuccessEnvelope> {
    invoice_list(options).inspect_err(|error| log_rejection(LIST_COMMAND, error))
}

fn invoice_total(options: InvoiceTotalOptions) -> EngineResult<SuccessEnvelope> {
    let card_id = options.card_id.trim();
    if card_id.is_empty() {
        return Err(EngineError::invalid_argument_for_command(
            "`--card` must name a card; card-less records never form an invoice.",
            Some(TOTAL_COMMAND),
        ));
    }
    let month = options.month.trim().parse::<ReferenceMonth>()?;
    let loaded = load_records(&options.path, options.stdin_override)?;
    let records = loaded.records();

    let record_count = records
        .iter()
        .filter(|record| record.belongs_to_invoice(card_id, month))
        .count();

    let data = InvoiceTotalData {
        source: loaded.source,
        card_id: card_id.to_string(),
        reference_month: month.to_string(),
        total: format_amount(total_for_invoice(&records, card_id, month)?),
        record_count,
        records_read: records.len(),
    };

    success(TOTAL_COMMAND, data)
}

fn invoice_list(options: InvoiceListOptions) -> EngineResult<SuccessEnvelope> {
    let loaded = load_records(&options.path, options.stdin_override)?;
    let records = loaded.records();

    let unassigned = records
        .iter()
        .filter(|record| record.card_id().is_none())
        .collect::<Vec<_>>();
    let unassigned_total = checked_sum(unassigned.iter().map(|record| record.amount))?;

    let rows = summarize_invoices(&records)?
        .into_iter()
        .map(|summary| InvoiceRow {
            card_id: summary.card_id,
            reference_month: summary.reference_month.to_string(),
            total: format_amount(summary.total),
            record_count: summary.record_count,
        })
        .collect::<Vec<InvoiceRow>>();

    let data = InvoiceListData {
        source: loaded.source,
        records_read: records.len(),
        unassigned_count: unassigned.len(),
        unassigned_total: format_amount(unassigned_total),
        rows,
    };

    success(LIST_COMMAND, data)
}
