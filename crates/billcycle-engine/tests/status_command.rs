mod support;

use billcycle_engine::commands::status::{self, StatusCheckOptions, StatusListOptions};
use support::billing_testkit::{
    error_code, instant, payload, record, string_column, temp_home_in_tmp, write_fixture_json,
};

fn check_at(status: &str, due_on: Option<&str>, at: &str) -> serde_json::Value {
    payload(status::check_with_options(StatusCheckOptions {
        status: status.to_string(),
        due_on: due_on.map(std::string::ToString::to_string),
        at: Some(at.to_string()),
        now: instant("1999-01-01T00:00:00"),
    }))
}

#[test]
fn pending_crosses_into_due_soon_at_five_days() {
    let five = check_at("pendente", Some("2026-03-15"), "2026-03-10");
    assert_eq!(five["data"]["days_until_due"], 5);
    assert_eq!(five["data"]["bucket"], "due_soon");
    assert_eq!(five["data"]["evaluated_at"], "2026-03-10T00:00:00");

    let six = check_at("pendente", Some("2026-03-16"), "2026-03-10");
    assert_eq!(six["data"]["days_until_due"], 6);
    assert_eq!(six["data"]["bucket"], "normal");
}

#[test]
fn partial_days_round_up_toward_the_due_date() {
    let value = check_at("pending", Some("2026-03-16"), "2026-03-10T18:45:00");
    assert_eq!(value["data"]["status"], "pendente");
    assert_eq!(value["data"]["days_until_due"], 6);
    assert_eq!(value["data"]["bucket"], "normal");
}

#[test]
fn terminal_statuses_ignore_due_dates() {
    assert_eq!(
        check_at("efetivada", Some("2026-03-11"), "2026-03-10")["data"]["bucket"],
        "paid"
    );
    assert_eq!(check_at("cancelada", None, "2026-03-10")["data"]["bucket"], "overdue");
    assert_eq!(
        check_at("vencido", Some("2026-12-01"), "2026-03-10")["data"]["bucket"],
        "overdue"
    );
}

#[test]
fn injected_now_is_used_without_at() {
    let value = payload(status::check(
        "pendente",
        Some("2026-03-15"),
        instant("2026-03-14T12:00:00"),
    ));
    assert_eq!(value["data"]["evaluated_at"], "2026-03-14T12:00:00");
    assert_eq!(value["data"]["days_until_due"], 1);
    assert_eq!(value["data"]["bucket"], "due_soon");
}

#[test]
fn invalid_status_and_instant_are_rejected() {
    let bad_status = status::check("estornada", None, instant("2026-03-10T00:00:00"));
    assert_eq!(error_code(bad_status), "invalid_argument");

    let bad_at = status::check_with_options(StatusCheckOptions {
        status: "pendente".to_string(),
        due_on: None,
        at: Some("2026-03-10 08:00".to_string()),
        now: instant("2026-03-10T00:00:00"),
    });
    assert_eq!(error_code(bad_at), "invalid_date");
}

#[test]
fn status_list_classifies_every_row_against_one_instant() {
    let temp = temp_home_in_tmp("billcycle-status-list");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let rows = vec![
            record("100.00", "2026-03", Some("visa"), "pendente", Some("2026-03-15")),
            record("100.00", "2026-04", Some("visa"), "pendente", Some("2026-04-15")),
            record("50.00", "2026-03", Some("visa"), "efetivada", Some("2026-03-15")),
            record("25.00", "2026-03", None, "cancelada", None),
            record("10.00", "2026-02", Some("visa"), "pendente", Some("2026-02-15")),
        ];
        let fixture = write_fixture_json(dir.path(), "ledger.json", &rows);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let value = payload(status::list_with_options(StatusListOptions {
                path: path.display().to_string(),
                at: Some("2026-03-10".to_string()),
                now: instant("1999-01-01T00:00:00"),
                stdin_override: None,
            }));
            let data = &value["data"];
            assert_eq!(data["records_read"], 5);
            assert_eq!(
                string_column(&data["rows"], "bucket"),
                vec!["due_soon", "normal", "paid", "overdue", "due_soon"]
            );
            assert_eq!(data["counts"]["due_soon"], 2);
            assert_eq!(data["counts"]["normal"], 1);
            assert_eq!(data["counts"]["paid"], 1);
            assert_eq!(data["counts"]["overdue"], 1);
            assert_eq!(data["rows"][4]["days_until_due"], -23);
            assert_eq!(data["rows"][3]["card_id"], serde_json::Value::Null);
        }
    }
}
