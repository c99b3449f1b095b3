use clap::ValueEnum;

/// Named difficulty levels selectable from the command line
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    /// Case-insensitive lookup. Anything unrecognised plays as medium.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            "custom" => Difficulty::Custom,
            _ => Difficulty::Medium,
        }
    }
}

/// Range and attempt budget for one round
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DifficultySetting {
    pub difficulty: Difficulty,
    pub min: i64,
    pub max: i64,
    pub max_attempts: u32,
}

impl DifficultySetting {
    const fn preset(difficulty: Difficulty, min: i64, max: i64, max_attempts: u32) -> Self {
        Self {
            difficulty,
            min,
            max,
            max_attempts,
        }
    }

    pub const EASY: Self = Self::preset(Difficulty::Easy, 1, 50, 10);
    pub const MEDIUM: Self = Self::preset(Difficulty::Medium, 1, 100, 7);
    pub const HARD: Self = Self::preset(Difficulty::Hard, 1, 200, 5);

    /// Validate user supplied custom values. All three must be positive
    /// integers with min < max, otherwise `None`.
    pub fn custom(entry: &CustomEntry) -> Option<Self> {
        let min = entry.min.trim().parse::<i64>().ok()?;
        let max = entry.max.trim().parse::<i64>().ok()?;
        let max_attempts = entry.attempts.trim().parse::<u32>().ok()?;

        (min > 0 && min < max && max_attempts > 0)
            .then_some(Self::preset(Difficulty::Custom, min, max, max_attempts))
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Raw text the player typed for a custom round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomEntry {
    pub min: String,
    pub max: String,
    pub attempts: String,
}

impl CustomEntry {
    pub fn new(min: impl Into<String>, max: impl Into<String>, attempts: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            attempts: attempts.into(),
        }
    }
}

/// Look up the settings for a difficulty. Custom values that are missing or
/// invalid fall back to medium.
pub fn settings_for(difficulty: Difficulty, custom: Option<&CustomEntry>) -> DifficultySetting {
    match difficulty {
        Difficulty::Easy => DifficultySetting::EASY,
        Difficulty::Medium => DifficultySetting::MEDIUM,
        Difficulty::Hard => DifficultySetting::HARD,
        Difficulty::Custom => match custom.and_then(DifficultySetting::custom) {
            Some(setting) => setting,
            None => {
                log::warn!("invalid custom settings {custom:?}, using medium difficulty");
                DifficultySetting::MEDIUM
            }
        },
    }
}
