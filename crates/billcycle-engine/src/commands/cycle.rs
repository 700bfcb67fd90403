use std::path::Path;

use crate::EngineResult;
use crate::billing::cycle::resolve_reference_month;
use crate::billing::date::{ReferenceMonth, format_iso_date};
use crate::commands::common::{CardArgs, log_rejection, parse_date, select_card};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CycleData;

const COMMAND: &str = "cycle";

#[derive(Debug, Default)]
pub struct CycleRunOptions<'a> {
    pub purchased_on: String,
    pub card: CardArgs,
    pub home_override: Option<&'a Path>,
}

pub fn run(purchased_on: &str, card: CardArgs) -> EngineResult<SuccessEnvelope> {
    run_with_options(CycleRunOptions {
        purchased_on: purchased_on.to_string(),
        card,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CycleRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    resolve(&options).inspect_err(|error| log_rejection(COMMAND, error))
}

fn resolve(options: &CycleRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let purchased_on = parse_date(&options.purchased_on, "purchased_on")?;
    let card = select_card(&options.card, options.home_override, COMMAND)?;
    let reference_month = resolve_reference_month(purchased_on, card.closing_day)?;
    let months_ahead = reference_month.months_since(ReferenceMonth::of(purchased_on)?);

    let data = CycleData {
        purchased_on: format_iso_date(&purchased_on),
        card: card.to_card_data(),
        reference_month: reference_month.to_string(),
        months_ahead: u32::try_from(months_ahead).unwrap_or_default(),
    };

    success(COMMAND, data)
}
