use std::fs;
use std::path::{Path, PathBuf};

use billcycle_engine::{EngineResult, SuccessEnvelope};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("billcycle-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_cards(home: &Path, cards: &[Value]) -> bool {
    let content = json!({ "cards": cards }).to_string();
    fs::write(home.join("cards.json"), content).is_ok()
}

pub fn card(card_id: &str, closing_day: u32, due_day: u32) -> Value {
    json!({
        "card_id": card_id,
        "closing_day": closing_day,
        "due_day": due_day,
    })
}

pub fn write_fixture_json(dir: &Path, name: &str, rows: &[Value]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(rows)
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    fs::write(&path, content)?;
    Ok(path)
}

pub fn write_fixture_text(dir: &Path, name: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

pub fn record(
    amount: &str,
    reference_month: &str,
    card_id: Option<&str>,
    status: &str,
    due_on: Option<&str>,
) -> Value {
    json!({
        "amount": amount,
        "reference_month": reference_month,
        "card_id": card_id,
        "status": status,
        "due_on": due_on,
    })
}

pub fn payload(result: EngineResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

pub fn error_code<T>(result: EngineResult<T>) -> String {
    assert!(result.is_err());
    match result {
        Err(error) => error.code,
        Ok(_) => String::new(),
    }
}

pub fn instant(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap_or_default()
}

pub fn string_column(rows: &Value, field: &str) -> Vec<String> {
    rows.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item[field].as_str().map(std::string::ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}
