use clap::{Parser, Subcommand};

/// Extended help shown after `billcycle invoice --help` and the record
/// subcommands that read files.
pub const RECORDS_AFTER_HELP: &str = "\
Record files:
  Accepted formats:
    JSON - one top-level array of record objects
    CSV  - one header row with record field names

  <path> is a local file path. Use `-` to read stdin.
  Example: cat ledger.csv | billcycle invoice list -

Record fields:
  amount (required):
    Decimal with at most 2 decimal places. Negative values are credits.
  reference_month (required):
    Invoice month, exactly `YYYY-MM`.
  card_id (optional):
    Card the record is charged to. Blank means no card; such records
    never count toward any invoice.
  status (optional, default `pendente`):
    efetivada | pendente | cancelada | vencido
    (aliases: settled, paid, pending, cancelled, canceled, overdue)
  due_on (optional):
    Due date, exactly `YYYY-MM-DD`.
  description (optional):
    Free text.

  CSV example:
  card_id,reference_month,amount,status,due_on,description
  visa,2026-03,100.00,pendente,2026-03-20,installment 1/3
";

#[derive(Debug, Parser)]
#[command(
    name = "billcycle",
    version,
    about = "credit card billing cycles and installment plans",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the invoice month a purchase is billed under
    Cycle {
        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        purchased_on: String,
        /// Day the card's billing window closes (1-31)
        #[arg(long)]
        closing_day: Option<String>,
        /// Configured card id from cards.json
        #[arg(long)]
        card: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Split a total into installment amounts that sum exactly to it
    Split {
        /// Purchase total, e.g. 1299.90
        #[arg(allow_negative_numbers = true)]
        total: String,
        /// Number of installments
        #[arg(allow_negative_numbers = true)]
        count: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Build the full installment schedule for a purchase
    Plan {
        /// Purchase total, e.g. 1299.90
        #[arg(allow_negative_numbers = true)]
        total: String,
        /// Number of installments
        #[arg(allow_negative_numbers = true)]
        count: String,
        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        purchased_on: String,
        /// Day the card's billing window closes (1-31)
        #[arg(long)]
        closing_day: Option<String>,
        /// Day the card's invoice is due (1-31)
        #[arg(long)]
        due_day: Option<String>,
        /// Configured card id from cards.json
        #[arg(long)]
        card: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Total and list invoices from a record file
    #[command(arg_required_else_help = true, after_long_help = RECORDS_AFTER_HELP)]
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommand,
    },
    /// Classify payment urgency
    #[command(arg_required_else_help = true)]
    Status {
        #[command(subcommand)]
        command: StatusCommand,
    },
    /// Inspect configured card profiles
    #[command(arg_required_else_help = true)]
    Card {
        #[command(subcommand)]
        command: CardCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum InvoiceCommand {
    /// Sum one card's invoice for one reference month
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Total {
        /// Path to a JSON or CSV record file (use `-` for stdin)
        path: String,
        /// Card id the invoice belongs to
        #[arg(long)]
        card: String,
        /// Reference month (YYYY-MM)
        #[arg(long)]
        month: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List every card invoice present in a record file
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    List {
        /// Path to a JSON or CSV record file (use `-` for stdin)
        path: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StatusCommand {
    /// Classify one status and optional due date
    Check {
        /// Payment status token (e.g. pendente, efetivada)
        #[arg(long)]
        status: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_on: Option<String>,
        /// Evaluate at this instant instead of now (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        at: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Classify every record in a file against one instant
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    List {
        /// Path to a JSON or CSV record file (use `-` for stdin)
        path: String,
        /// Evaluate at this instant instead of now (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        at: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CardCommand {
    /// Show cards configured in cards.json
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
