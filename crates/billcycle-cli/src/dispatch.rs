use billcycle_engine::commands::{self, CardArgs};
use billcycle_engine::commands::status::{StatusCheckOptions, StatusListOptions};
use billcycle_engine::{EngineResult, SuccessEnvelope};
use chrono::NaiveDateTime;

use crate::cli::{CardCommand, Cli, Commands, InvoiceCommand, StatusCommand};

/// Runs the parsed command. `now` is the single clock reading for this
/// invocation; only status commands consume it.
pub fn dispatch(cli: &Cli, now: NaiveDateTime) -> EngineResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Cycle {
            purchased_on,
            closing_day,
            card,
            ..
        } => commands::cycle::run(purchased_on, card_args(card, closing_day, &None)),
        Commands::Split { total, count, .. } => commands::split::run(total, count),
        Commands::Plan {
            total,
            count,
            purchased_on,
            closing_day,
            due_day,
            card,
            ..
        } => commands::plan::run(
            total,
            count,
            purchased_on,
            card_args(card, closing_day, due_day),
        ),
        Commands::Invoice { command } => match command {
            InvoiceCommand::Total {
                path, card, month, ..
            } => commands::invoice::total(path, card, month),
            InvoiceCommand::List { path, .. } => commands::invoice::list(path),
        },
        Commands::Status { command } => match command {
            StatusCommand::Check {
                status, due_on, at, ..
            } => commands::status::check_with_options(StatusCheckOptions {
                status: status.clone(),
                due_on: due_on.clone(),
                at: at.clone(),
                now,
            }),
            StatusCommand::List { path, at, .. } => {
                commands::status::list_with_options(StatusListOptions {
                    path: path.clone(),
                    at: at.clone(),
                    now,
                    stdin_override: None,
                })
            }
        },
        Commands::Card { command } => match command {
            CardCommand::List { .. } => commands::cards::list(),
        },
    }
}

fn card_args(
    card: &Option<String>,
    closing_day: &Option<String>,
    due_day: &Option<String>,
) -> CardArgs {
    CardArgs {
        card_id: card.clone(),
        closing_day: closing_day.clone(),
        due_day: due_day.clone(),
    }
}
