use crate::EngineResult;
use crate::billing::split::split_amount;
use crate::commands::common::{format_amount, log_rejection, parse_installment_count, parse_total};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SplitData;

const COMMAND: &str = "split";

#[derive(Debug, Default)]
pub struct SplitRunOptions {
    pub total: String,
    pub count: String,
}

pub fn run(total: &str, count: &str) -> EngineResult<SuccessEnvelope> {
    run_with_options(SplitRunOptions {
        total: total.to_string(),
        count: count.to_string(),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SplitRunOptions) -> EngineResult<SuccessEnvelope> {
    split(&options).inspect_err(|error| log_rejection(COMMAND, error))
}

fn split(options: &SplitRunOptions) -> EngineResult<SuccessEnvelope> {
    let total = parse_total(&options.total)?;
    let count = parse_installment_count(&options.count)?;
    let amounts = split_amount(total, count)?;

    let base_amount = amounts.first().copied().unwrap_or_default();
    let final_amount = amounts.last().copied().unwrap_or_default();

    let data = SplitData {
        total: format_amount(total),
        count,
        base_amount: format_amount(base_amount),
        final_amount: format_amount(final_amount),
        final_adjustment: format_amount(final_amount - base_amount),
        amounts: amounts.into_iter().map(format_amount).collect(),
    };

    success(COMMAND, data)
}
