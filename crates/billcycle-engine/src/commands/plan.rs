use std::path::Path;

use crate::EngineResult;
use crate::billing::date::format_iso_date;
use crate::billing::plan::build_plan;
use crate::commands::common::{
    CardArgs, format_amount, log_rejection, parse_date, parse_installment_count, parse_total,
    select_card,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{InstallmentRow, PlanData};

const COMMAND: &str = "plan";

#[derive(Debug, Default)]
pub struct PlanRunOptions<'a> {
    pub total: String,
    pub count: String,
    pub purchased_on: String,
    pub card: CardArgs,
    pub home_override: Option<&'a Path>,
}

pub fn run(
    total: &str,
    count: &str,
    purchased_on: &str,
    card: CardArgs,
) -> EngineResult<SuccessEnvelope> {
    run_with_options(PlanRunOptions {
        total: total.to_string(),
        count: count.to_string(),
        purchased_on: purchased_on.to_string(),
        card,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: PlanRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    plan(&options).inspect_err(|error| log_rejection(COMMAND, error))
}

fn plan(options: &PlanRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let total = parse_total(&options.total)?;
    let count = parse_installment_count(&options.count)?;
    let purchased_on = parse_date(&options.purchased_on, "purchased_on")?;
    let card = select_card(&options.card, options.home_override, COMMAND)?;
    let plan = build_plan(total, count, purchased_on, &card.config(COMMAND)?)?;

    let installments = plan
        .installments
        .iter()
        .map(|row| InstallmentRow {
            sequence: row.sequence,
            amount: format_amount(row.amount),
            reference_month: row.reference_month.to_string(),
            due_on: format_iso_date(&row.due_on),
        })
        .collect::<Vec<InstallmentRow>>();

    let data = PlanData {
        total: format_amount(plan.total),
        count: plan.count,
        purchased_on: format_iso_date(&plan.purchased_on),
        card: card.to_card_data(),
        first_reference_month: plan.first_reference_month().map(|month| month.to_string()),
        last_due_on: plan.last_due_on().as_ref().map(format_iso_date),
        installments,
    };

    success(COMMAND, data)
}
