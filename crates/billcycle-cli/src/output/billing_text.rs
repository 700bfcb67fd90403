use std::io;

use serde_json::Value;

use super::format::{self, Column};

pub fn render_cycle(data: &Value) -> io::Result<String> {
    let card = data
        .get("card")
        .ok_or_else(|| io::Error::other("cycle output requires card"))?;

    let mut lines = vec![
        format!(
            "A purchase on {} is billed on the {} invoice.",
            text(data, "purchased_on"),
            text(data, "reference_month")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Card:", card_label(card)),
            ("Closing day:", text(card, "closing_day")),
            ("Months ahead:", text(data, "months_ahead")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_split(data: &Value) -> io::Result<String> {
    let amounts = rows(data, "amounts", "split")?;

    let mut lines = vec![
        format!(
            "Split {} into {} installments.",
            text(data, "total"),
            text(data, "count")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Base amount:", text(data, "base_amount")),
            ("Final amount:", text(data, "final_amount")),
            ("Final adjustment:", text(data, "final_adjustment")),
        ],
        2,
    ));

    let table_rows = amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| vec![(index + 1).to_string(), scalar(amount)])
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.extend(format::render_table_or_blocks(
        &[Column::right("#"), Column::right("Amount")],
        &table_rows,
        format::terminal_width(),
        "Installment",
    ));
    Ok(lines.join("\n"))
}

pub fn render_plan(data: &Value) -> io::Result<String> {
    let installments = rows(data, "installments", "plan")?;
    let card = data
        .get("card")
        .ok_or_else(|| io::Error::other("plan output requires card"))?;

    let mut lines = vec![
        format!(
            "Installment plan: {} in {} installments, purchased on {}.",
            text(data, "total"),
            text(data, "count"),
            text(data, "purchased_on")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Card:", card_label(card)),
            ("Closing day:", text(card, "closing_day")),
            ("Due day:", text(card, "due_day")),
            ("First invoice:", text(data, "first_reference_month")),
            ("Last due date:", text(data, "last_due_on")),
        ],
        2,
    ));

    let table_rows = installments
        .iter()
        .map(|row| {
            vec![
                text(row, "sequence"),
                text(row, "amount"),
                text(row, "reference_month"),
                text(row, "due_on"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.push("Installments:".to_string());
    lines.extend(format::render_table_or_blocks(
        &[
            Column::right("#"),
            Column::right("Amount"),
            Column::left("Invoice"),
            Column::left("Due on"),
        ],
        &table_rows,
        format::terminal_width(),
        "Installment",
    ));
    Ok(lines.join("\n"))
}

pub fn render_invoice_total(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!(
            "Invoice {} {}: {}",
            text(data, "card_id"),
            text(data, "reference_month"),
            text(data, "total")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Records on invoice:", text(data, "record_count")),
            ("Records read:", text(data, "records_read")),
            ("Source:", text(data, "source")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_invoice_list(data: &Value) -> io::Result<String> {
    let invoices = rows(data, "rows", "invoice list")?;

    let mut lines = Vec::new();
    if invoices.is_empty() {
        lines.push("No card invoices found.".to_string());
    } else {
        lines.push(format!("{} invoices found.", invoices.len()));
        lines.push(String::new());
        let table_rows = invoices
            .iter()
            .map(|row| {
                vec![
                    text(row, "card_id"),
                    text(row, "reference_month"),
                    text(row, "record_count"),
                    text(row, "total"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table_or_blocks(
            &[
                Column::left("Card"),
                Column::left("Invoice"),
                Column::right("Records"),
                Column::right("Total"),
            ],
            &table_rows,
            format::terminal_width(),
            "Invoice",
        ));
    }

    lines.push(String::new());
    lines.extend(format::key_value_rows(
        &[
            ("Records read:", text(data, "records_read")),
            (
                "Without a card:",
                format!(
                    "{} ({})",
                    text(data, "unassigned_count"),
                    text(data, "unassigned_total")
                ),
            ),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_status_check(data: &Value) -> io::Result<String> {
    let days = match data.get("days_until_due").and_then(Value::as_i64) {
        Some(days) => days_label(days),
        None => "no due date".to_string(),
    };

    let mut lines = vec![
        format!("Bucket: {}", text(data, "bucket")),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Status:", text(data, "status")),
            ("Due on:", text(data, "due_on")),
            ("Days until due:", days),
            ("Evaluated at:", text(data, "evaluated_at")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_status_list(data: &Value) -> io::Result<String> {
    let records = rows(data, "rows", "status list")?;
    let counts = data
        .get("counts")
        .ok_or_else(|| io::Error::other("status list output requires counts"))?;

    let mut lines = vec![
        format!(
            "{} records evaluated at {}.",
            text(data, "records_read"),
            text(data, "evaluated_at")
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Paid:", text(counts, "paid")),
            ("Overdue:", text(counts, "overdue")),
            ("Due soon:", text(counts, "due_soon")),
            ("Normal:", text(counts, "normal")),
        ],
        2,
    ));

    if records.is_empty() {
        return Ok(lines.join("\n"));
    }

    let table_rows = records
        .iter()
        .map(|row| {
            vec![
                text(row, "row"),
                text(row, "card_id"),
                text(row, "reference_month"),
                text(row, "amount"),
                text(row, "status"),
                text(row, "due_on"),
                text(row, "days_until_due"),
                text(row, "bucket"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.push("Records:".to_string());
    lines.extend(format::render_table_or_blocks(
        &[
            Column::right("Row"),
            Column::left("Card"),
            Column::left("Invoice"),
            Column::right("Amount"),
            Column::left("Status"),
            Column::left("Due on"),
            Column::right("Days"),
            Column::left("Bucket"),
        ],
        &table_rows,
        format::terminal_width(),
        "Record",
    ));
    Ok(lines.join("\n"))
}

pub fn render_card_list(data: &Value) -> io::Result<String> {
    let cards = rows(data, "cards", "card list")?;
    let profiles_path = text(data, "profiles_path");

    if cards.is_empty() {
        let found = data
            .get("profiles_found")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let headline = if found {
            format!("No cards are configured in {profiles_path}.")
        } else {
            format!("No card profiles file at {profiles_path}.")
        };
        return Ok([
            headline.as_str(),
            "",
            "Create it with this shape:",
            "  {\"cards\": [{\"card_id\": \"visa\", \"closing_day\": 5, \"due_day\": 20}]}",
            "",
            "Or pass --closing-day and --due-day explicitly.",
        ]
        .join("\n"));
    }

    let table_rows = cards
        .iter()
        .map(|row| {
            vec![
                text(row, "card_id"),
                text(row, "closing_day"),
                text(row, "due_day"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Cards from {profiles_path}:"), String::new()];
    lines.extend(format::render_table_or_blocks(
        &[
            Column::left("Card"),
            Column::right("Closing day"),
            Column::right("Due day"),
        ],
        &table_rows,
        format::terminal_width(),
        "Card",
    ));
    Ok(lines.join("\n"))
}

fn rows<'a>(data: &'a Value, key: &str, command: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("{command} output requires {key}")))
}

fn text(data: &Value, key: &str) -> String {
    data.get(key).map(scalar).unwrap_or_else(|| "-".to_string())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn card_label(card: &Value) -> String {
    match card.get("card_id").and_then(Value::as_str) {
        Some(card_id) => card_id.to_string(),
        None => "explicit days".to_string(),
    }
}

fn days_label(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "1 day".to_string(),
        -1 => "1 day past due".to_string(),
        value if value < 0 => format!("{} days past due", -value),
        value => format!("{value} days"),
    }
}
