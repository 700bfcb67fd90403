use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::billing::cycle::CardConfig;
use crate::{EngineError, EngineResult};

pub const CARD_PROFILES_FILE: &str = "cards.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfiles {
    cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCard {
    card_id: String,
    closing_day: u32,
    due_day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProfile {
    pub card_id: String,
    pub card: CardConfig,
}

/// Cards configured under the billcycle home, in file order.
#[derive(Debug, Clone)]
pub struct CardProfiles {
    pub source_path: PathBuf,
    pub found: bool,
    profiles: Vec<CardProfile>,
}

impl CardProfiles {
    pub fn find(&self, card_id: &str) -> Option<&CardProfile> {
        let wanted = card_id.trim();
        self.profiles.iter().find(|profile| profile.card_id == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardProfile> {
        self.profiles.iter()
    }

    pub fn card_ids(&self) -> Vec<String> {
        self.profiles
            .iter()
            .map(|profile| profile.card_id.clone())
            .collect()
    }

    /// Looks up `card_id`, failing with the configured ids attached.
    pub fn require(&self, card_id: &str) -> EngineResult<&CardProfile> {
        self.find(card_id).ok_or_else(|| {
            EngineError::card_not_found(card_id.trim(), self.card_ids(), &self.source_path)
        })
    }
}

pub fn resolve_billcycle_home(home_override: Option<&Path>) -> EngineResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("BILLCYCLE_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".billcycle")
            } else {
                return Err(EngineError::internal_io(
                    Path::new("."),
                    "could not resolve a home directory for card profiles",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn card_profiles_path(home: &Path) -> PathBuf {
    home.join(CARD_PROFILES_FILE)
}

/// Loads `cards.json`; a missing file is an empty profile set.
pub fn load_card_profiles(home_override: Option<&Path>) -> EngineResult<CardProfiles> {
    let home = resolve_billcycle_home(home_override)?;
    let source_path = card_profiles_path(&home);

    let content = match fs::read_to_string(&source_path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %source_path.display(), "no card profiles file");
            return Ok(CardProfiles {
                source_path,
                found: false,
                profiles: Vec::new(),
            });
        }
        Err(error) => return Err(EngineError::internal_io(&source_path, &error.to_string())),
    };

    let profiles = parse_profiles(&source_path, &content)?;
    tracing::debug!(
        path = %source_path.display(),
        cards = profiles.len(),
        "loaded card profiles"
    );
    Ok(CardProfiles {
        source_path,
        found: true,
        profiles,
    })
}

fn parse_profiles(path: &Path, content: &str) -> EngineResult<Vec<CardProfile>> {
    let raw = serde_json::from_str::<RawProfiles>(content)
        .map_err(|error| EngineError::card_profiles_invalid(path, &error.to_string()))?;

    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(raw.cards.len());
    for (index, entry) in raw.cards.into_iter().enumerate() {
        let card_id = entry.card_id.trim().to_string();
        if card_id.is_empty() {
            return Err(EngineError::card_profiles_invalid(
                path,
                &format!("card #{} has an empty `card_id`.", index + 1),
            ));
        }
        if !seen.insert(card_id.clone()) {
            return Err(EngineError::card_profiles_invalid(
                path,
                &format!("`card_id` `{card_id}` appears more than once."),
            ));
        }
        let card = CardConfig::new(entry.closing_day, entry.due_day).map_err(|error| {
            EngineError::card_profiles_invalid(path, &format!("card `{card_id}`: {}", error.message))
        })?;
        profiles.push(CardProfile { card_id, card });
    }

    Ok(profiles)
}

fn absolutize(path: &Path) -> EngineResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| EngineError::internal_io(path, &error.to_string()))
}
