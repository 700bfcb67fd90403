mod support;

use billcycle_engine::commands::CardArgs;
use billcycle_engine::commands::invoice::{self, InvoiceTotalOptions};
use billcycle_engine::commands::plan::{self, PlanRunOptions};
use serde_json::{Value, json};
use support::billing_testkit::{
    card, error_code, payload, string_column, temp_home_in_tmp, write_cards, write_fixture_json,
};

fn plan_options<'a>(
    total: &str,
    count: &str,
    purchased_on: &str,
    card: CardArgs,
    home: Option<&'a std::path::Path>,
) -> PlanRunOptions<'a> {
    PlanRunOptions {
        total: total.to_string(),
        count: count.to_string(),
        purchased_on: purchased_on.to_string(),
        card,
        home_override: home,
    }
}

#[test]
fn purchase_after_closing_splits_into_three_invoices_from_two_months_ahead() {
    let value = payload(plan::run(
        "300.00",
        "3",
        "2026-01-15",
        CardArgs::days("5", Some("20")),
    ));
    assert_eq!(value["ok"], true);
    assert_eq!(value["command"], "plan");
    assert_eq!(value["policy_version"], "billing/v1");

    let data = &value["data"];
    assert_eq!(data["total"], "300.00");
    assert_eq!(data["count"], 3);
    assert_eq!(data["card"]["source"], "flags");
    assert_eq!(data["first_reference_month"], "2026-03");
    assert_eq!(data["last_due_on"], "2026-05-20");
    assert_eq!(
        string_column(&data["installments"], "amount"),
        vec!["100.00", "100.00", "100.00"]
    );
    assert_eq!(
        string_column(&data["installments"], "reference_month"),
        vec!["2026-03", "2026-04", "2026-05"]
    );
    assert_eq!(
        string_column(&data["installments"], "due_on"),
        vec!["2026-03-20", "2026-04-20", "2026-05-20"]
    );
}

#[test]
fn remainder_cents_land_on_the_final_installment() {
    let value = payload(plan::run(
        "100.00",
        "3",
        "2026-01-05",
        CardArgs::days("5", Some("10")),
    ));
    assert_eq!(
        string_column(&value["data"]["installments"], "amount"),
        vec!["33.33", "33.33", "33.34"]
    );
    assert_eq!(value["data"]["first_reference_month"], "2026-02");
}

#[test]
fn due_day_thirty_one_clamps_inside_short_months() {
    let value = payload(plan::run(
        "90.00",
        "3",
        "2026-12-01",
        CardArgs::days("10", Some("31")),
    ));
    assert_eq!(
        string_column(&value["data"]["installments"], "due_on"),
        vec!["2027-01-31", "2027-02-28", "2027-03-31"]
    );
}

#[test]
fn card_profiles_supply_geometry() {
    let temp = temp_home_in_tmp("billcycle-plan-profile");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        assert!(write_cards(&home, &[card("visa", 5, 20)]));
        let value = payload(plan::run_with_options(plan_options(
            "300.00",
            "3",
            "2026-01-15",
            CardArgs::profile("visa"),
            Some(&home),
        )));
        assert_eq!(value["data"]["card"]["card_id"], "visa");
        assert_eq!(value["data"]["card"]["source"], "profile");
        assert_eq!(value["data"]["card"]["due_day"], 20);
        assert_eq!(value["data"]["first_reference_month"], "2026-03");
    }
}

#[test]
fn unknown_card_is_not_found() {
    let temp = temp_home_in_tmp("billcycle-plan-unknown");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = plan::run_with_options(plan_options(
            "300.00",
            "3",
            "2026-01-15",
            CardArgs::profile("elo"),
            Some(&home),
        ));
        assert_eq!(error_code(result), "card_not_found");
    }
}

#[test]
fn invalid_counts_are_rejected() {
    for count in ["0", "-3", "121", "2.5"] {
        let result = plan::run("300.00", count, "2026-01-15", CardArgs::days("5", Some("20")));
        assert_eq!(error_code(result), "invalid_installment_count", "count {count}");
    }
}

#[test]
fn invalid_inputs_map_to_stable_codes() {
    let cases = [
        ("1.005", "2026-01-15", "5", Some("20"), "invalid_amount"),
        ("-10.00", "2026-01-15", "5", Some("20"), "invalid_amount"),
        ("300.00", "2026-02-30", "5", Some("20"), "invalid_date"),
        ("300.00", "2026-01-15", "0", Some("20"), "invalid_card_day"),
        ("300.00", "2026-01-15", "5", Some("32"), "invalid_card_day"),
        ("300.00", "2026-01-15", "5", None, "invalid_argument"),
    ];
    for (total, purchased_on, closing, due, expected) in cases {
        let result = plan::run(total, "3", purchased_on, CardArgs::days(closing, due));
        assert_eq!(error_code(result), expected);
    }
}

#[test]
fn planned_installments_feed_invoice_totals() {
    let temp = temp_home_in_tmp("billcycle-plan-flow");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let value = payload(plan::run(
            "300.00",
            "3",
            "2026-01-15",
            CardArgs::days("5", Some("20")),
        ));
        let mut rows = value["data"]["installments"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                json!({
                    "amount": row["amount"],
                    "reference_month": row["reference_month"],
                    "card_id": "visa",
                    "due_on": row["due_on"],
                })
            })
            .collect::<Vec<Value>>();
        rows.push(json!({"amount": "45.10", "reference_month": "2026-03", "card_id": "visa"}));
        rows.push(json!({"amount": "999.00", "reference_month": "2026-03"}));

        let fixture = write_fixture_json(dir.path(), "planned.json", &rows);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let total = payload(invoice::total_with_options(InvoiceTotalOptions {
                path: path.display().to_string(),
                card_id: "visa".to_string(),
                month: "2026-03".to_string(),
                stdin_override: None,
            }));
            assert_eq!(total["data"]["total"], "145.10");
            assert_eq!(total["data"]["record_count"], 2);
            assert_eq!(total["data"]["records_read"], 5);
        }
    }
}
