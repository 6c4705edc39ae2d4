//! Residents: the simulated characters and their wellbeing stats.
//!
//! RULE: every stat write goes through `clamp_stat`. No code outside
//! this module assigns to hunger/happiness/social directly.

use crate::{rng::RandomSource, types::ResidentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;

pub const INITIAL_HUNGER:    f64 = 30.0;
pub const INITIAL_HAPPINESS: f64 = 60.0;
pub const INITIAL_SOCIAL:    f64 = 50.0;

/// Clamp `value` into [lo, hi]. NaN collapses to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

/// Clamp into the stat range [0, 100].
pub fn clamp_stat(value: f64) -> f64 {
    clamp(value, STAT_MIN, STAT_MAX)
}

/// A signed change to the three wellbeing stats.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatDelta {
    pub hunger:    f64,
    pub happiness: f64,
    pub social:    f64,
}

impl StatDelta {
    pub const fn new(hunger: f64, happiness: f64, social: f64) -> Self {
        Self { hunger, happiness, social }
    }

    pub const fn hunger(delta: f64) -> Self {
        Self::new(delta, 0.0, 0.0)
    }

    pub const fn happiness(delta: f64) -> Self {
        Self::new(0.0, delta, 0.0)
    }

    pub const fn social(delta: f64) -> Self {
        Self::new(0.0, 0.0, delta)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Personality {
    Easygoing,
    Energetic,
    LaidBack,
    /// Anything else a save or the player names. Carries no drift.
    Other(CustomPersonality),
}

/// Free-text personality. Only built through `Personality::from`, so it is
/// always trimmed and never spells one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPersonality(String);

impl CustomPersonality {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Personality {
    /// Happiness gained per awake tick.
    pub fn happiness_drift(&self) -> f64 {
        match self {
            Self::Energetic => 1.0,
            Self::LaidBack  => 0.5,
            Self::Easygoing | Self::Other(_) => 0.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Easygoing => "easygoing",
            Self::Energetic => "energetic",
            Self::LaidBack  => "laid-back",
            Self::Other(s)  => s.as_str(),
        }
    }
}

impl From<&str> for Personality {
    fn from(s: &str) -> Self {
        let text = s.trim();
        match text.to_ascii_lowercase().as_str() {
            "easygoing" => Self::Easygoing,
            "energetic" => Self::Energetic,
            "laid-back" | "laidback" | "laid_back" => Self::LaidBack,
            _ => Self::Other(CustomPersonality(text.to_string())),
        }
    }
}

impl From<String> for Personality {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Personality> for String {
    fn from(p: Personality) -> Self {
        p.as_str().to_string()
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id:          ResidentId,
    pub name:        String,
    pub gender:      String,
    pub personality: Personality,
    /// 0 = full, 100 = starving.
    pub hunger:      f64,
    pub happiness:   f64,
    pub social:      f64,
    #[serde(default)]
    pub asleep:      bool,
    pub created_at:  DateTime<Utc>,
}

impl Resident {
    /// Build a fresh resident with starting stats. The caller inserts it
    /// into the game state.
    pub fn create(
        id: ResidentId,
        name: &str,
        gender: &str,
        personality: Personality,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            gender: gender.trim().to_string(),
            personality,
            hunger: INITIAL_HUNGER,
            happiness: INITIAL_HAPPINESS,
            social: INITIAL_SOCIAL,
            asleep: false,
            created_at: now,
        }
    }

    /// Apply each component of `delta` and clamp it immediately.
    pub fn apply(&mut self, delta: StatDelta) {
        self.hunger    = clamp_stat(self.hunger + delta.hunger);
        self.happiness = clamp_stat(self.happiness + delta.happiness);
        self.social    = clamp_stat(self.social + delta.social);
    }

    /// Re-clamp all stats. Used after loading hand-edited saves.
    pub fn normalize(&mut self) {
        self.apply(StatDelta::default());
    }

    /// Flip the asleep flag. Returns the new value.
    pub fn toggle_sleep(&mut self) -> bool {
        self.asleep = !self.asleep;
        self.asleep
    }
}

/// Draw a random v4-layout UUID from `rng`.
pub fn new_resident_id(rng: &mut dyn RandomSource) -> ResidentId {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}
