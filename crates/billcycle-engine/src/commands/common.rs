use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::billing::cycle::{CardConfig, ensure_card_day};
use crate::billing::date::parse_iso_date_strict;
use crate::billing::policy::BILLING_POLICY_V1;
use crate::contracts::types::CardData;
use crate::profiles::load_card_profiles;
use crate::{EngineError, EngineResult};

const CARD_SOURCE_PROFILE: &str = "profile";
const CARD_SOURCE_FLAGS: &str = "flags";

/// How a command was told which card geometry to use: a profile id or
/// explicit days, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct CardArgs {
    pub card_id: Option<String>,
    pub closing_day: Option<String>,
    pub due_day: Option<String>,
}

impl CardArgs {
    pub fn profile(card_id: &str) -> Self {
        Self {
            card_id: Some(card_id.to_string()),
            ..Self::default()
        }
    }

    pub fn days(closing_day: &str, due_day: Option<&str>) -> Self {
        Self {
            card_id: None,
            closing_day: Some(closing_day.to_string()),
            due_day: due_day.map(std::string::ToString::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SelectedCard {
    pub(crate) card_id: Option<String>,
    pub(crate) closing_day: u32,
    pub(crate) due_day: Option<u32>,
    source: &'static str,
}

impl SelectedCard {
    pub(crate) fn to_card_data(&self) -> CardData {
        CardData {
            card_id: self.card_id.clone(),
            closing_day: self.closing_day,
            due_day: self.due_day,
            source: self.source.to_string(),
        }
    }

    pub(crate) fn config(&self, command: &str) -> EngineResult<CardConfig> {
        let Some(due_day) = self.due_day else {
            return Err(EngineError::invalid_argument_for_command(
                "A due day is required: pass --due-day or --card.",
                Some(command),
            ));
        };
        CardConfig::new(self.closing_day, due_day)
    }
}

/// Resolves card geometry from a profile or from explicit days, never both.
pub(crate) fn select_card(
    args: &CardArgs,
    home_override: Option<&Path>,
    command: &str,
) -> EngineResult<SelectedCard> {
    let card_id = args
        .card_id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(card_id) = card_id {
        if args.closing_day.is_some() || args.due_day.is_some() {
            return Err(EngineError::invalid_argument_for_command(
                "Use either --card or explicit --closing-day/--due-day, not both.",
                Some(command),
            ));
        }
        let profiles = load_card_profiles(home_override)?;
        let profile = profiles.require(card_id)?;
        return Ok(SelectedCard {
            card_id: Some(profile.card_id.clone()),
            closing_day: profile.card.closing_day(),
            due_day: Some(profile.card.due_day()),
            source: CARD_SOURCE_PROFILE,
        });
    }

    let Some(closing_day) = args.closing_day.as_deref() else {
        return Err(EngineError::invalid_argument_for_command(
            "A card is required: pass --card or --closing-day.",
            Some(command),
        ));
    };

    Ok(SelectedCard {
        card_id: None,
        closing_day: parse_card_day("closing_day", closing_day)?,
        due_day: args
            .due_day
            .as_deref()
            .map(|value| parse_card_day("due_day", value))
            .transpose()?,
        source: CARD_SOURCE_FLAGS,
    })
}

pub(crate) fn parse_total(value: &str) -> EngineResult<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .map_err(|_| EngineError::invalid_amount(value, "not a decimal number."))
}

pub(crate) fn parse_installment_count(value: &str) -> EngineResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| {
            EngineError::invalid_installment_count(value, BILLING_POLICY_V1.max_installment_count)
        })
}

pub(crate) fn parse_card_day(field_name: &str, value: &str) -> EngineResult<u32> {
    let day = value
        .trim()
        .parse::<u32>()
        .map_err(|_| EngineError::invalid_card_day(field_name, value))?;
    ensure_card_day(BILLING_POLICY_V1, field_name, day)?;
    Ok(day)
}

pub(crate) fn parse_date(value: &str, field_name: &str) -> EngineResult<NaiveDate> {
    parse_iso_date_strict(value.trim(), field_name)
}

/// Renders an amount with exactly the policy's minor-unit places.
pub fn format_amount(amount: Decimal) -> String {
    BILLING_POLICY_V1.to_minor_units(amount).to_string()
}

pub(crate) fn log_rejection(command: &str, error: &EngineError) {
    tracing::warn!(command, code = %error.code, message = %error.message, "rejected input");
}
