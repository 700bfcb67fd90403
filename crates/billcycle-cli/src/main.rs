mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use billcycle_engine::EngineError;
use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "billcycle - credit card billing cycles and installment plans

Usage:
  billcycle <command>

Start here:
  billcycle split 1299.90 10
  billcycle plan --help
  billcycle card list
";

const TOP_LEVEL_HELP: &str = "billcycle - credit card billing cycles and installment plans

USAGE: billcycle <command>

Plan a purchase:
  billcycle cycle --purchased-on <date> --card <id>       Which invoice a purchase lands on
  billcycle split <total> <count>                         Installment amounts that sum to the total
  billcycle plan <total> <count> --purchased-on <date> --card <id>
                                                          Full schedule with invoice months and due dates

Read a record file (JSON or CSV, `-` for stdin):
  billcycle invoice total <path> --card <id> --month <YYYY-MM>
                                                          Sum one card's invoice
  billcycle invoice list <path>                           Every card invoice in the file
  billcycle status list <path>                            Payment urgency for each record

Other commands:
  billcycle status check --status <status> --due-on <date>
                                                          Classify one payment
  billcycle card list                                     Cards configured in cards.json

Cards live in $BILLCYCLE_HOME/cards.json (default ~/.billcycle/cards.json).
Pass --closing-day and --due-day instead of --card to skip profiles.
Add --json to any command for machine-readable output.
Set BILLCYCLE_LOG=debug to trace decisions on stderr.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    logging::setup_logging();

    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                parse_error_with_command_hint(&clean_message, command_hint.as_deref());
            let mode = output::infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let now = chrono::Local::now().naive_local();
    tracing::debug!(%now, "dispatching");
    match dispatch::dispatch(&cli, now) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing Usage line and "For more information" hint so
/// the "What to do next" section is the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Subcommand path for help hints, e.g. "invoice total".
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["cycle", ..] => Some("cycle"),
        ["split", ..] => Some("split"),
        ["plan", ..] => Some("plan"),
        ["invoice", "total", ..] => Some("invoice total"),
        ["invoice", "list", ..] => Some("invoice list"),
        ["invoice", ..] => Some("invoice"),
        ["status", "check", ..] => Some("status check"),
        ["status", "list", ..] => Some("status list"),
        ["status", ..] => Some("status"),
        ["card", "list", ..] => Some("card list"),
        ["card", ..] => Some("card"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn parse_error_with_command_hint(clean_message: &str, command_hint: Option<&str>) -> EngineError {
    if matches!(command_hint, Some("cycle" | "plan"))
        && clean_message.contains("--purchased-on")
    {
        return EngineError::invalid_argument_with_recovery(
            clean_message,
            vec![
                "Pass the purchase date as `--purchased-on YYYY-MM-DD`.".to_string(),
                format!(
                    "Run `billcycle {} --help` for command usage.",
                    command_hint.unwrap_or("plan")
                ),
            ],
        );
    }

    EngineError::invalid_argument_for_command(clean_message, command_hint)
}

fn exit_code_for_error(error: &EngineError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
