mod billing_text;
mod error_text;
mod format;
mod json;
mod mode;

use std::io;

use billcycle_engine::{EngineError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, infer_requested_output_mode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &EngineError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "cycle" => billing_text::render_cycle(&success.data),
        "split" => billing_text::render_split(&success.data),
        "plan" => billing_text::render_plan(&success.data),
        "invoice total" => billing_text::render_invoice_total(&success.data),
        "invoice list" => billing_text::render_invoice_list(&success.data),
        "status check" => billing_text::render_status_check(&success.data),
        "status list" => billing_text::render_status_list(&success.data),
        "card list" => billing_text::render_card_list(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
