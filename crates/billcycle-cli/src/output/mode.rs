use crate::cli::{CardCommand, Commands, InvoiceCommand, StatusCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Cycle { json, .. } | Commands::Split { json, .. } | Commands::Plan { json, .. } => {
            *json
        }
        Commands::Invoice { command } => match command {
            InvoiceCommand::Total { json, .. } | InvoiceCommand::List { json, .. } => *json,
        },
        Commands::Status { command } => match command {
            StatusCommand::Check { json, .. } | StatusCommand::List { json, .. } => *json,
        },
        Commands::Card { command } => match command {
            CardCommand::List { json } => *json,
        },
    };
    OutputMode::from_flag(json)
}

/// Best-effort mode for failures that happen before clap finishes parsing.
pub fn infer_requested_output_mode(raw_args: &[String]) -> OutputMode {
    OutputMode::from_flag(raw_args.iter().skip(1).any(|value| value == "--json"))
}
