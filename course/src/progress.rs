//! Progress records, one per learner, keyed by username.
//!
//! DESIGN
//! ======
//! Records mirror the JSON the course front end syncs: camelCase keys, and
//! times in whichever shape the front end wrote them (see [`Timestamp`]).
//! Updates are partial: each section present in a
//! [`ProgressUpdate`] replaces the stored section wholesale, absent sections
//! are left alone, and an update with no sections is rejected rather than
//! silently bumping the timestamp.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::achievements::{Achievement, Achievements};
use crate::stats::SessionStats;
use crate::timestamp::Timestamp;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("username is required")]
    MissingUsername,
    #[error("no progress record for `{0}`")]
    NotFound(String),
    #[error("progress record for `{0}` already exists")]
    AlreadyExists(String),
    #[error("update carries no progress sections")]
    EmptyUpdate,
}

/// Mini-game kinds tracked in statistics, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Matching,
    Sorting,
    Maze,
    Bingo,
    Duel,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [Self::Matching, Self::Sorting, Self::Maze, Self::Bingo, Self::Duel];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardProgress {
    /// Distinct flashcards opened.
    #[serde(default)]
    pub viewed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyProgress {
    #[serde(default)]
    pub flashcards: FlashcardProgress,
    /// Ids of flashcards the learner has opened (1-based).
    #[serde(default)]
    pub viewed_cards: Vec<u32>,
    /// Ids of flashcards the learner has mastered (1-based).
    #[serde(default)]
    pub mastered_cards: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub games_played: BTreeMap<GameKind, u32>,
    /// Best score per game, in percent.
    #[serde(default)]
    pub best_scores: BTreeMap<GameKind, u32>,
    /// Accumulated study time in seconds.
    #[serde(default)]
    pub total_study_time: u64,
    /// Consecutive calendar days with study activity, ending at
    /// `last_study_date`.
    #[serde(default)]
    pub daily_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<Timestamp>,
}

impl Statistics {
    /// Games of `kind` played so far.
    #[must_use]
    pub fn games(&self, kind: GameKind) -> u32 {
        self.games_played.get(&kind).copied().unwrap_or(0)
    }

    /// Games of every kind played so far.
    #[must_use]
    pub fn total_games(&self) -> u32 {
        self.games_played.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub username: String,
    #[serde(default)]
    pub vocabulary: VocabularyProgress,
    /// Dialogue scenario progress; shape owned by the front end.
    #[serde(default)]
    pub dialogue: serde_json::Value,
    /// Practice activity progress; shape owned by the front end.
    #[serde(default)]
    pub practice: serde_json::Value,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub achievements: Achievements,
    /// Last write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl ProgressRecord {
    /// A fresh record with empty sections, as created at registration.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            vocabulary: VocabularyProgress::default(),
            dialogue: serde_json::json!({}),
            practice: serde_json::json!({}),
            statistics: Statistics::default(),
            achievements: Achievements::default(),
            updated_at: None,
        }
    }

    /// Distinct flashcards mastered.
    #[must_use]
    pub fn mastered_count(&self) -> usize {
        let mut ids = self.vocabulary.mastered_cards.clone();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Unlock every achievement the record now qualifies for, stamping each
    /// with `now`. Returns the newly unlocked ones.
    pub fn check_achievements(&mut self, now: Timestamp) -> Vec<&'static Achievement> {
        let mastered = self.mastered_count();
        self.achievements.check(&self.statistics, mastered, now)
    }
}

/// Sparse progress update. Only present sections are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default)]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<VocabularyProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice: Option<serde_json::Value>,
}

impl ProgressUpdate {
    #[must_use]
    pub fn for_user(username: impl Into<String>) -> Self {
        Self { username: username.into(), ..Self::default() }
    }

    /// Returns `true` if no section would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_none() && self.dialogue.is_none() && self.practice.is_none()
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory progress records keyed by username.
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    records: HashMap<String, ProgressRecord>,
}

impl ProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records. Later duplicates win.
    #[must_use]
    pub fn from_records(records: Vec<ProgressRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Create the empty record for a newly registered learner.
    ///
    /// # Errors
    ///
    /// Returns `MissingUsername` for a blank name and `AlreadyExists` when a
    /// record is already stored.
    pub fn create(&mut self, username: &str, now_ms: i64) -> Result<&ProgressRecord, ProgressError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ProgressError::MissingUsername);
        }
        if self.records.contains_key(username) {
            return Err(ProgressError::AlreadyExists(username.to_string()));
        }
        let mut record = ProgressRecord::new(username);
        record.updated_at = Some(Timestamp::from_millis(now_ms));
        Ok(&*self.records.entry(username.to_string()).or_insert(record))
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, record: ProgressRecord) {
        self.records.insert(record.username.clone(), record);
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<&ProgressRecord> {
        self.records.get(username)
    }

    /// Records for `usernames`, in the given order. Unknown names are skipped.
    #[must_use]
    pub fn batch_get<S: AsRef<str>>(&self, usernames: &[S]) -> Vec<&ProgressRecord> {
        usernames
            .iter()
            .filter_map(|u| self.records.get(u.as_ref()))
            .collect()
    }

    /// Apply a partial update and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `MissingUsername`, `EmptyUpdate`, or `NotFound`; the stored
    /// record is unchanged in every error case.
    pub fn apply_update(&mut self, update: ProgressUpdate, now_ms: i64) -> Result<&ProgressRecord, ProgressError> {
        if update.username.trim().is_empty() {
            return Err(ProgressError::MissingUsername);
        }
        if update.is_empty() {
            return Err(ProgressError::EmptyUpdate);
        }
        let record = self
            .records
            .get_mut(update.username.trim())
            .ok_or_else(|| ProgressError::NotFound(update.username.clone()))?;

        if let Some(vocabulary) = update.vocabulary {
            record.vocabulary = vocabulary;
        }
        if let Some(dialogue) = update.dialogue {
            record.dialogue = dialogue;
        }
        if let Some(practice) = update.practice {
            record.practice = practice;
        }
        record.updated_at = Some(Timestamp::from_millis(now_ms));
        debug!(username = %record.username, "progress updated");
        Ok(&*record)
    }

    /// Fold a finished play session into a learner's statistics, then check
    /// achievements. Returns the achievements this session unlocked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown learners.
    pub fn record_session(
        &mut self,
        username: &str,
        session: &SessionStats,
        now_ms: i64,
    ) -> Result<Vec<&'static Achievement>, ProgressError> {
        let record = self
            .records
            .get_mut(username)
            .ok_or_else(|| ProgressError::NotFound(username.to_string()))?;
        let now = Timestamp::from_millis(now_ms);
        session.apply_to(&mut record.statistics);
        record.updated_at = Some(now);
        let unlocked = record.check_achievements(now);
        for achievement in &unlocked {
            info!(username, achievement = achievement.id, "achievement unlocked");
        }
        Ok(unlocked)
    }

    /// Mutable access to a learner's statistics.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown learners.
    pub fn statistics_mut(&mut self, username: &str) -> Result<&mut Statistics, ProgressError> {
        self.records
            .get_mut(username)
            .map(|r| &mut r.statistics)
            .ok_or_else(|| ProgressError::NotFound(username.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
