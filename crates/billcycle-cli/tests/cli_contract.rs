use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

struct CliRun {
    code: Option<i32>,
    stdout: String,
}

fn run_cli_in_home_with_input(home: &Path, args: &[&str], input: Option<&str>) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_billcycle"));
    command.args(args);
    command.env("BILLCYCLE_HOME", home);
    command.env("COLUMNS", "120");
    command.env_remove("BILLCYCLE_LOG");
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input {
            if let Some(mut pipe) = child.stdin.take() {
                assert!(pipe.write_all(body.as_bytes()).is_ok());
            }
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            let stdout = String::from_utf8(result.stdout);
            assert!(stdout.is_ok());
            if let Ok(stdout_text) = stdout {
                return CliRun {
                    code: result.status.code(),
                    stdout: stdout_text,
                };
            }
        }
    }

    CliRun {
        code: None,
        stdout: String::new(),
    }
}

fn with_home(test: impl FnOnce(&Path)) {
    let temp = tempfile::tempdir();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        test(dir.path());
    }
}

fn write_home_file(home: &Path, name: &str, body: &str) -> String {
    let path = home.join(name);
    assert!(fs::write(&path, body).is_ok());
    path.display().to_string()
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

const CARDS: &str = r#"{"cards": [
  {"card_id": "visa", "closing_day": 5, "due_day": 20},
  {"card_id": "amex", "closing_day": 28, "due_day": 31}
]}"#;

const LEDGER_CSV: &str = "\
card_id,reference_month,amount,status,due_on,description
visa,2026-03,100.00,pendente,2026-03-20,installment 1/3
visa,2026-03,10.50,efetivada,2026-03-20,coffee
amex,2026-03,40.00,vencido,2026-03-01,
,2026-03,5.00,pendente,,cash
";

#[test]
fn root_command_prints_short_help() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &[], None);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("billcycle - credit card billing cycles"));
        assert!(run.stdout.contains("Start here:"));
    });
}

#[test]
fn top_level_help_lists_every_command_group() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["--help"], None);
        assert_eq!(run.code, Some(0));
        for needle in [
            "billcycle cycle",
            "billcycle split",
            "billcycle plan",
            "billcycle invoice total",
            "billcycle invoice list",
            "billcycle status check",
            "billcycle status list",
            "billcycle card list",
        ] {
            assert!(run.stdout.contains(needle), "missing {needle}");
        }
    });
}

#[test]
fn invoice_help_documents_record_fields() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["invoice", "total", "--help"], None);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.contains("reference_month (required)"));
        assert!(run.stdout.contains("Use `-` to read stdin."));
    });
}

#[test]
fn split_json_uses_success_envelope() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["split", "100.00", "3", "--json"], None);
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["ok"], true);
        assert_eq!(payload["command"], "split");
        assert_eq!(payload["policy_version"], "billing/v1");
        assert_eq!(
            payload["data"]["amounts"],
            serde_json::json!(["33.33", "33.33", "33.34"])
        );
    });
}

#[test]
fn plan_text_shows_schedule_from_profile() {
    with_home(|home| {
        write_home_file(home, "cards.json", CARDS);
        let run = run_cli_in_home_with_input(
            home,
            &["plan", "300", "3", "--purchased-on", "2026-01-15", "--card", "visa"],
            None,
        );
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("Installment plan: 300.00 in 3 installments"));
        assert!(run.stdout.contains("2026-03-20"));
        assert!(run.stdout.contains("2026-05-20"));
    });
}

#[test]
fn plan_json_clamps_due_day_to_month_end() {
    with_home(|home| {
        write_home_file(home, "cards.json", CARDS);
        let run = run_cli_in_home_with_input(
            home,
            &["plan", "90", "2", "--purchased-on", "2026-12-01", "--card", "amex", "--json"],
            None,
        );
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        let installments = &payload["data"]["installments"];
        assert_eq!(installments[0]["reference_month"], "2027-01");
        assert_eq!(installments[0]["due_on"], "2027-01-31");
        assert_eq!(installments[1]["due_on"], "2027-02-28");
    });
}

#[test]
fn unknown_card_is_text_error_with_exit_one() {
    with_home(|home| {
        write_home_file(home, "cards.json", CARDS);
        let run = run_cli_in_home_with_input(
            home,
            &["cycle", "--purchased-on", "2026-01-15", "--card", "elo"],
            None,
        );
        assert_eq!(run.code, Some(1));
        assert_text_error_contract(&run.stdout, "card_not_found");
    });
}

#[test]
fn engine_errors_are_json_when_requested() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["split", "100.00", "0", "--json"], None);
        assert_eq!(run.code, Some(1));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["error"]["code"], "invalid_installment_count");
        assert!(payload["error"]["recovery_steps"].is_array());
        assert!(payload.get("ok").is_none());
    });
}

#[test]
fn parse_errors_are_json_when_requested() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(
            home,
            &["invoice", "total", "ledger.csv", "--month", "2026-03", "--json"],
            None,
        );
        assert_eq!(run.code, Some(1));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["error"]["code"], "invalid_argument");
        assert_eq!(payload["error"]["data"]["command_hint"], "invoice total");
    });
}

#[test]
fn invoice_total_reads_csv_file() {
    with_home(|home| {
        let ledger = write_home_file(home, "ledger.csv", LEDGER_CSV);
        let run = run_cli_in_home_with_input(
            home,
            &["invoice", "total", &ledger, "--card", "visa", "--month", "2026-03", "--json"],
            None,
        );
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["data"]["total"], "110.50");
        assert_eq!(payload["data"]["record_count"], 2);
        assert_eq!(payload["data"]["records_read"], 4);
    });
}

#[test]
fn invoice_list_reads_stdin() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["invoice", "list", "-"], Some(LEDGER_CSV));
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("2 invoices found."));
        assert!(run.stdout.contains("110.50"));
        assert!(run.stdout.contains("Without a card:"));
    });
}

#[test]
fn status_list_honors_at_override() {
    with_home(|home| {
        let ledger = write_home_file(home, "ledger.csv", LEDGER_CSV);
        let run = run_cli_in_home_with_input(
            home,
            &["status", "list", &ledger, "--at", "2026-03-15", "--json"],
            None,
        );
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        let counts = &payload["data"]["counts"];
        assert_eq!(counts["paid"], 1);
        assert_eq!(counts["overdue"], 1);
        assert_eq!(counts["due_soon"], 1);
        assert_eq!(counts["normal"], 1);
        assert_eq!(payload["data"]["evaluated_at"], "2026-03-15T00:00:00");
    });
}

#[test]
fn card_list_without_profiles_explains_setup() {
    with_home(|home| {
        let run = run_cli_in_home_with_input(home, &["card", "list"], None);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.starts_with("No card profiles file at "));
        assert!(run.stdout.contains("cards.json"));
    });
}

#[test]
fn card_list_json_keeps_file_order() {
    with_home(|home| {
        write_home_file(home, "cards.json", CARDS);
        let run = run_cli_in_home_with_input(home, &["card", "list", "--json"], None);
        assert_eq!(run.code, Some(0));
        let payload = parse_json(&run.stdout);
        assert_eq!(payload["data"]["profiles_found"], true);
        assert_eq!(payload["data"]["cards"][0]["card_id"], "visa");
        assert_eq!(payload["data"]["cards"][1]["card_id"], "amex");
    });
}

#[test]
fn oversized_amounts_are_rejected_without_crashing() {
    with_home(|home| {
        let ledger = write_home_file(
            home,
            "huge.csv",
            "amount,reference_month,card_id\n\
             50000000000000000000000000000,2026-03,visa\n\
             50000000000000000000000000000,2026-03,visa\n",
        );
        for args in [
            vec!["invoice", "total", ledger.as_str(), "--card", "visa", "--month", "2026-03", "--json"],
            vec!["invoice", "list", ledger.as_str(), "--json"],
        ] {
            let run = run_cli_in_home_with_input(home, &args, None);
            assert_eq!(run.code, Some(1), "{args:?}");
            let payload = parse_json(&run.stdout);
            assert_eq!(payload["error"]["code"], "record_validation_failed");
            assert_eq!(payload["error"]["data"]["issues"][0]["code"], "invalid_amount");
        }
    });
}
