//! Per-session game statistics, folded into a learner's [`Statistics`] on sync.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::progress::{GameKind, Statistics};
use crate::timestamp::{DAY_MS, Timestamp};

/// Tallies gathered while the learner plays, before they are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    games_played: BTreeMap<GameKind, u32>,
    best_scores: BTreeMap<GameKind, u32>,
    study_secs: u64,
    /// UTC days with any activity.
    active_days: BTreeSet<i64>,
    last_activity_ms: Option<i64>,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished game of `kind`, keeping the best percent score.
    pub fn record_game(&mut self, kind: GameKind, score_percent: u32, at_ms: i64) {
        let score = score_percent.min(100);
        *self.games_played.entry(kind).or_insert(0) += 1;
        let best = self.best_scores.entry(kind).or_insert(0);
        *best = (*best).max(score);
        self.record_activity(at_ms);
        debug!(?kind, score, "game recorded");
    }

    /// Count a checked matching board. A board with no answers scores 0.
    pub fn record_matching(&mut self, correct: usize, total: usize, at_ms: i64) {
        self.record_game(GameKind::Matching, percent(correct, total), at_ms);
    }

    /// Note study activity that is not a game, such as a flashcard review.
    pub fn record_activity(&mut self, at_ms: i64) {
        self.active_days.insert(at_ms.div_euclid(DAY_MS));
        self.last_activity_ms = Some(self.last_activity_ms.map_or(at_ms, |t| t.max(at_ms)));
    }

    pub fn add_study_time(&mut self, secs: u64) {
        self.study_secs = self.study_secs.saturating_add(secs);
    }

    #[must_use]
    pub fn games(&self, kind: GameKind) -> u32 {
        self.games_played.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn best_score(&self, kind: GameKind) -> Option<u32> {
        self.best_scores.get(&kind).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games_played.is_empty() && self.study_secs == 0 && self.active_days.is_empty()
    }

    /// Merge this session into persisted statistics.
    ///
    /// Counts and time add up and best scores keep the maximum. Each active
    /// day extends the daily streak when it directly follows the last study
    /// day and restarts it at 1 after a gap. Days already counted, or older
    /// than the last study day, leave it alone. `last_study_date` only moves
    /// forward.
    pub fn apply_to(&self, stats: &mut Statistics) {
        for (kind, count) in &self.games_played {
            *stats.games_played.entry(*kind).or_insert(0) += count;
        }
        for (kind, score) in &self.best_scores {
            let best = stats.best_scores.entry(*kind).or_insert(0);
            *best = (*best).max(*score);
        }
        stats.total_study_time = stats.total_study_time.saturating_add(self.study_secs);

        let mut last_day = stats.last_study_date.map(Timestamp::day);
        for &day in &self.active_days {
            stats.daily_streak = match last_day {
                None => 1,
                Some(last) if day == last => stats.daily_streak.max(1),
                Some(last) if day == last + 1 => stats.daily_streak.saturating_add(1),
                Some(last) if day > last => 1,
                Some(_) => stats.daily_streak,
            };
            if last_day.is_none_or(|last| day > last) {
                last_day = Some(day);
            }
        }

        if let Some(at) = self.last_activity_ms {
            let latest = stats.last_study_date.map_or(at, |t| t.as_millis().max(at));
            stats.last_study_date = Some(Timestamp::from_millis(latest));
        }
    }
}

/// `correct / total` as a rounded percentage, 0 when `total` is 0.
#[must_use]
pub fn percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    u32::try_from((correct * 100 + total / 2) / total).unwrap_or(100)
}
