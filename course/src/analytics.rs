//! Class-level aggregates for the class dashboard.
//!
//! Every function here is pure over a slice of [`ProgressRecord`]s; fetching
//! the records (roster lookup, batch get) is the caller's job. Percentages use
//! half-up rounding throughout.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::config::CourseConfig;
use crate::achievements::ACHIEVEMENTS;
use crate::progress::{GameKind, ProgressRecord};
use crate::timestamp::{DAY_MS, Timestamp};

/// Dialogue scenarios in course order.
pub const DIALOGUE_SCENARIOS: [&str; 7] = ["greeting", "pricing", "bargaining", "quantity", "payment", "thanks", "farewell"];

/// Relative study load per weekday, Monday first.
pub const WEEKDAY_FACTORS: [f64; 7] = [0.8, 1.0, 0.9, 1.1, 1.0, 0.5, 0.4];


/// A class roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub class_id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub student_usernames: Vec<String>,
}

/// Dashboard histograms for one class or for every class an instructor owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAnalytics {
    /// Learners per flashcard-progress bucket: ≤20, ≤40, ≤60, ≤80, above.
    pub progress_distribution: [u32; 5],
    /// Mastered percentage per card category: fruit, vegetable, item.
    pub vocab_mastery: [u32; 3],
    /// Games played per kind, in [`GameKind::ALL`] order.
    pub game_preferences: [u32; 5],
    /// Estimated study minutes per weekday.
    pub time_data: [u32; 7],
}

impl ClassAnalytics {
    #[must_use]
    pub fn from_progress(records: &[ProgressRecord], config: &CourseConfig) -> Self {
        if records.is_empty() {
            return Self {
                progress_distribution: [0; 5],
                vocab_mastery: [0; 3],
                game_preferences: [0; 5],
                time_data: [0; 7],
            };
        }
        Self {
            progress_distribution: progress_distribution(records, config.vocab_total),
            vocab_mastery: vocab_mastery(records, config),
            game_preferences: game_preferences(records),
            time_data: time_data(records),
        }
    }
}

/// Merge class rosters into one list of learners, first occurrence wins.
#[must_use]
pub fn collect_students(classes: &[ClassRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    classes
        .iter()
        .flat_map(|c| c.student_usernames.iter())
        .filter(|u| seen.insert(u.as_str()))
        .cloned()
        .collect()
}

/// Rounded share of the vocabulary a learner has viewed.
#[must_use]
pub fn viewed_percent(record: &ProgressRecord, vocab_total: u32) -> u32 {
    let viewed = f64::from(record.vocabulary.flashcards.viewed);
    round_u32(viewed / f64::from(vocab_total.max(1)) * 100.0)
}

#[must_use]
pub fn progress_distribution(records: &[ProgressRecord], vocab_total: u32) -> [u32; 5] {
    let mut buckets = [0; 5];
    for record in records {
        let bucket = match viewed_percent(record, vocab_total) {
            0..=20 => 0,
            21..=40 => 1,
            41..=60 => 2,
            61..=80 => 3,
            _ => 4,
        };
        buckets[bucket] += 1;
    }
    buckets
}

#[must_use]
pub fn vocab_mastery(records: &[ProgressRecord], config: &CourseConfig) -> [u32; 3] {
    let students = f64::from(u32::try_from(records.len()).unwrap_or(u32::MAX).max(1));
    config.categories.ordered().map(|range| {
        let mastered: usize = records
            .iter()
            .map(|r| r.vocabulary.mastered_cards.iter().filter(|id| range.contains(*id)).count())
            .sum();
        let size = range.end().saturating_sub(*range.start()) + 1;
        let mastered = f64::from(u32::try_from(mastered).unwrap_or(u32::MAX));
        round_u32(mastered / (students * f64::from(size)) * 100.0)
    })
}

#[must_use]
pub fn game_preferences(records: &[ProgressRecord]) -> [u32; 5] {
    GameKind::ALL.map(|kind| records.iter().map(|r| r.statistics.games(kind)).sum())
}

#[must_use]
pub fn time_data(records: &[ProgressRecord]) -> [u32; 7] {
    let avg_minutes = round_u32(average_study_secs(records) / 60.0);
    WEEKDAY_FACTORS.map(|f| round_u32(f64::from(avg_minutes) * f / 7.0))
}

fn average_study_secs(records: &[ProgressRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = records.iter().map(|r| r.statistics.total_study_time).sum::<u64>() as f64;
    #[allow(clippy::cast_precision_loss)]
    let count = records.len() as f64;
    total / count
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_u32(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

// =============================================================================
// CLASS OVERVIEW
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttentionKind {
    /// Studied before, but not within the inactivity window.
    Inactive,
    /// Viewed share of vocabulary below the attention threshold.
    Progress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionStudent {
    pub username: String,
    pub class_id: String,
    #[serde(rename = "type")]
    pub kind: AttentionKind,
    pub reason: String,
}

/// Roster summary shown on the instructor's class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOverview {
    pub class_id: String,
    pub class_name: String,
    pub student_count: u32,
    pub active_count: u32,
    /// Mean viewed percentage.
    pub avg_progress: u32,
    /// Mean study time in seconds.
    pub avg_study_time: u32,
    pub attention_students: Vec<AttentionStudent>,
}

impl ClassOverview {
    /// Summarise `class` from `lookup`. Learners without a record count as
    /// zero progress and never studied.
    #[must_use]
    pub fn build<'a>(
        class: &ClassRecord,
        lookup: impl Fn(&str) -> Option<&'a ProgressRecord>,
        config: &CourseConfig,
        now_ms: i64,
    ) -> Self {
        let active_since = now_ms - i64::from(config.inactive_after_days) * DAY_MS;
        let mut total_percent = 0_u64;
        let mut total_secs = 0_u64;
        let mut active_count = 0;
        let mut attention = Vec::new();

        for username in &class.student_usernames {
            let record = lookup(username);
            let percent = record.map_or(0, |r| viewed_percent(r, config.vocab_total));
            total_percent += u64::from(percent);
            total_secs += record.map_or(0, |r| r.statistics.total_study_time);

            let last = record
                .and_then(|r| r.statistics.last_study_date)
                .map_or(0, Timestamp::as_millis);
            let flagged = if last > active_since {
                active_count += 1;
                None
            } else if last > 0 {
                Some((
                    AttentionKind::Inactive,
                    format!("超過 {} 天未學習", config.inactive_after_days),
                ))
            } else {
                None
            };
            let flagged = flagged.or_else(|| {
                (percent < config.attention_percent)
                    .then(|| (AttentionKind::Progress, format!("進度落後 ({percent}%)")))
            });
            if let Some((kind, reason)) = flagged {
                attention.push(AttentionStudent {
                    username: username.clone(),
                    class_id: class.class_id.clone(),
                    kind,
                    reason,
                });
            }
        }

        let count = u32::try_from(class.student_usernames.len()).unwrap_or(u32::MAX);
        attention.truncate(config.attention_limit);
        Self {
            class_id: class.class_id.clone(),
            class_name: class.class_name.clone(),
            student_count: count,
            active_count,
            avg_progress: rounded_mean(total_percent, count),
            avg_study_time: rounded_mean(total_secs, count),
            attention_students: attention,
        }
    }
}

fn rounded_mean(total: u64, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let count = u64::from(count);
    u32::try_from((total + count / 2) / count).unwrap_or(u32::MAX)
}

// =============================================================================
// STUDENT DETAIL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub viewed: u32,
    pub mastered: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub fruit: CategoryProgress,
    pub vegetable: CategoryProgress,
    pub item: CategoryProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyDetail {
    pub viewed: u32,
    pub mastered: u32,
    pub total: u32,
    pub by_category: CategoryBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Completed,
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioDetail {
    pub id: &'static str,
    pub status: ScenarioStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueDetail {
    pub completed: u32,
    pub total: u32,
    pub scenarios: Vec<ScenarioDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub played: u32,
    pub best_score: u32,
    /// Maze only: best score once the maze has been played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<u32>,
    /// Bingo only: best score once bingo has been played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDetail {
    pub total_study_time: u64,
    pub daily_streak: u32,
    pub last_study_date: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDetail {
    pub unlocked: Vec<String>,
    pub unlocked_at: BTreeMap<String, Timestamp>,
    pub total: usize,
}

/// One learner's progress as shown on the instructor's student page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDetail {
    pub username: String,
    pub vocabulary: VocabularyDetail,
    pub dialogue: DialogueDetail,
    pub games: BTreeMap<GameKind, GameDetail>,
    pub statistics: StatisticsDetail,
    pub achievements: AchievementDetail,
}

impl StudentDetail {
    #[must_use]
    pub fn from_record(record: &ProgressRecord, config: &CourseConfig) -> Self {
        let viewed = distinct(&record.vocabulary.viewed_cards);
        let mastered = distinct(&record.vocabulary.mastered_cards);
        let [fruit, vegetable, item] = config.categories.ordered().map(|range| CategoryProgress {
            viewed: count_u32(viewed.iter().filter(|id| range.contains(*id)).count()),
            mastered: count_u32(mastered.iter().filter(|id| range.contains(*id)).count()),
            total: range.end().saturating_sub(*range.start()) + 1,
        });

        let completed: Vec<&str> = record
            .dialogue
            .get("completedScenarios")
            .and_then(serde_json::Value::as_array)
            .map(|ids| ids.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default();
        let scenarios = DIALOGUE_SCENARIOS
            .iter()
            .map(|&id| ScenarioDetail {
                id,
                status: if completed.contains(&id) { ScenarioStatus::Completed } else { ScenarioStatus::NotStarted },
            })
            .collect();

        let stats = &record.statistics;
        let games = GameKind::ALL
            .iter()
            .map(|&kind| {
                let played = stats.games(kind);
                let best_score = stats.best_scores.get(&kind).copied().unwrap_or(0);
                let rate = if played > 0 { best_score } else { 0 };
                let detail = GameDetail {
                    played,
                    best_score,
                    completion_rate: (kind == GameKind::Maze).then_some(rate),
                    win_rate: (kind == GameKind::Bingo).then_some(rate),
                };
                (kind, detail)
            })
            .collect();

        Self {
            username: record.username.clone(),
            vocabulary: VocabularyDetail {
                viewed: count_u32(viewed.len()),
                mastered: count_u32(mastered.len()),
                total: config.vocab_total,
                by_category: CategoryBreakdown { fruit, vegetable, item },
            },
            dialogue: DialogueDetail {
                completed: count_u32(completed.len()),
                total: count_u32(DIALOGUE_SCENARIOS.len()),
                scenarios,
            },
            games,
            statistics: StatisticsDetail {
                total_study_time: stats.total_study_time,
                daily_streak: stats.daily_streak,
                last_study_date: stats.last_study_date,
            },
            achievements: AchievementDetail {
                unlocked: record.achievements.unlocked.clone(),
                unlocked_at: record.achievements.unlocked_at.clone(),
                total: ACHIEVEMENTS.len(),
            },
        }
    }
}

fn distinct(ids: &[u32]) -> Vec<u32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
