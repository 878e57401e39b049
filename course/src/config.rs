//! Course configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::ops::RangeInclusive;

pub const DEFAULT_VOCAB_TOTAL: u32 = 27;
pub const DEFAULT_FRUIT_CARDS: RangeInclusive<u32> = 1..=12;
pub const DEFAULT_VEGETABLE_CARDS: RangeInclusive<u32> = 13..=25;
pub const DEFAULT_ITEM_CARDS: RangeInclusive<u32> = 26..=27;
pub const DEFAULT_ATTENTION_PERCENT: u32 = 30;
pub const DEFAULT_INACTIVE_AFTER_DAYS: u32 = 7;
pub const DEFAULT_ATTENTION_LIMIT: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, got `{raw}`")]
    InvalidNumber { var: &'static str, raw: String },
    #[error("{var}: expected an inclusive range like `1-12`, got `{raw}`")]
    InvalidRange { var: &'static str, raw: String },
}

/// Flashcard id ranges for each vocabulary category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCategories {
    pub fruit: RangeInclusive<u32>,
    pub vegetable: RangeInclusive<u32>,
    pub item: RangeInclusive<u32>,
}

impl Default for CardCategories {
    fn default() -> Self {
        Self { fruit: DEFAULT_FRUIT_CARDS, vegetable: DEFAULT_VEGETABLE_CARDS, item: DEFAULT_ITEM_CARDS }
    }
}

impl CardCategories {
    /// Categories in reporting order: fruit, vegetable, item.
    #[must_use]
    pub fn ordered(&self) -> [&RangeInclusive<u32>; 3] {
        [&self.fruit, &self.vegetable, &self.item]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseConfig {
    /// Number of flashcards in the course.
    pub vocab_total: u32,
    pub categories: CardCategories,
    /// Students below this flashcard percentage need attention.
    pub attention_percent: u32,
    /// Students idle longer than this need attention.
    pub inactive_after_days: u32,
    /// Maximum attention entries reported per class.
    pub attention_limit: usize,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            vocab_total: DEFAULT_VOCAB_TOTAL,
            categories: CardCategories::default(),
            attention_percent: DEFAULT_ATTENTION_PERCENT,
            inactive_after_days: DEFAULT_INACTIVE_AFTER_DAYS,
            attention_limit: DEFAULT_ATTENTION_LIMIT,
        }
    }
}

impl CourseConfig {
    /// Build config from environment variables.
    ///
    /// All optional:
    /// - `KINMEN_VOCAB_TOTAL`: default 27
    /// - `KINMEN_FRUIT_CARDS`: default `1-12`
    /// - `KINMEN_VEGETABLE_CARDS`: default `13-25`
    /// - `KINMEN_ITEM_CARDS`: default `26-27`
    /// - `KINMEN_ATTENTION_PERCENT`: default 30
    /// - `KINMEN_INACTIVE_AFTER_DAYS`: default 7
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vocab_total = parse_number(&lookup, "KINMEN_VOCAB_TOTAL", DEFAULT_VOCAB_TOTAL)?;
        let categories = CardCategories {
            fruit: parse_range(&lookup, "KINMEN_FRUIT_CARDS", DEFAULT_FRUIT_CARDS)?,
            vegetable: parse_range(&lookup, "KINMEN_VEGETABLE_CARDS", DEFAULT_VEGETABLE_CARDS)?,
            item: parse_range(&lookup, "KINMEN_ITEM_CARDS", DEFAULT_ITEM_CARDS)?,
        };
        let attention_percent = parse_number(&lookup, "KINMEN_ATTENTION_PERCENT", DEFAULT_ATTENTION_PERCENT)?;
        let inactive_after_days = parse_number(&lookup, "KINMEN_INACTIVE_AFTER_DAYS", DEFAULT_INACTIVE_AFTER_DAYS)?;
        Ok(Self { vocab_total, categories, attention_percent, inactive_after_days, ..Self::default() })
    }
}

fn parse_number<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, raw }),
    }
}

fn parse_range<F>(lookup: &F, var: &'static str, default: RangeInclusive<u32>) -> Result<RangeInclusive<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let invalid = || ConfigError::InvalidRange { var, raw: raw.clone() };
    let (start, end) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let start = start.trim().parse::<u32>().map_err(|_| invalid())?;
    let end = end.trim().parse::<u32>().map_err(|_| invalid())?;
    if start > end {
        return Err(invalid());
    }
    Ok(start..=end)
}
