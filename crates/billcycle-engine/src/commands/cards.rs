use std::path::Path;

use crate::EngineResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CardListData, CardRow};
use crate::profiles::load_card_profiles;

pub fn list() -> EngineResult<SuccessEnvelope> {
    list_with_home_override(None)
}

#[doc(hidden)]
pub fn list_with_home_override(home_override: Option<&Path>) -> EngineResult<SuccessEnvelope> {
    let profiles = load_card_profiles(home_override)?;
    let cards = profiles
        .iter()
        .map(|profile| CardRow {
            card_id: profile.card_id.clone(),
            closing_day: profile.card.closing_day(),
            due_day: profile.card.due_day(),
        })
        .collect::<Vec<CardRow>>();

    let data = CardListData {
        profiles_path: profiles.source_path.display().to_string(),
        profiles_found: profiles.found,
        cards,
    };

    success("card list", data)
}
