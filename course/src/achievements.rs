//! The nine course achievements and their unlock bookkeeping.
//!
//! Conditions read a learner's [`Statistics`] plus the number of flashcards
//! mastered. Once unlocked an achievement stays unlocked, even if the data
//! that earned it is later overwritten.

#[cfg(test)]
#[path = "achievements_test.rs"]
mod achievements_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::progress::{GameKind, Statistics};
use crate::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least this many flashcards mastered.
    Mastered(usize),
    AnyGamePlayed,
    EveryGamePlayed,
    /// Best score for the game at or above the threshold.
    BestScore(GameKind, u32),
    /// Daily streak at or above this many days.
    Streak(u32),
}

impl Condition {
    #[must_use]
    pub fn is_met(self, stats: &Statistics, mastered: usize) -> bool {
        match self {
            Self::Mastered(n) => mastered >= n,
            Self::AnyGamePlayed => GameKind::ALL.iter().any(|kind| stats.games(*kind) > 0),
            Self::EveryGamePlayed => GameKind::ALL.iter().all(|kind| stats.games(*kind) > 0),
            Self::BestScore(kind, min) => stats.best_scores.get(&kind).is_some_and(|best| *best >= min),
            Self::Streak(days) => stats.daily_streak >= days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    #[serde(skip)]
    pub condition: Condition,
}

pub static ACHIEVEMENTS: [Achievement; 9] = [
    Achievement {
        id: "first_word",
        name: "初學者",
        description: "學習第 1 個詞彙",
        icon: "seedling",
        condition: Condition::Mastered(1),
    },
    Achievement {
        id: "vocab_10",
        name: "詞彙達人",
        description: "學習 10 個詞彙",
        icon: "book",
        condition: Condition::Mastered(10),
    },
    Achievement {
        id: "vocab_all",
        name: "詞彙大師",
        description: "學習全部 27 個詞彙",
        icon: "trophy",
        condition: Condition::Mastered(27),
    },
    Achievement {
        id: "game_first",
        name: "遊戲新手",
        description: "完成第 1 個遊戲",
        icon: "gamepad",
        condition: Condition::AnyGamePlayed,
    },
    Achievement {
        id: "game_all",
        name: "遊戲專家",
        description: "玩過所有 5 種遊戲",
        icon: "target",
        condition: Condition::EveryGamePlayed,
    },
    Achievement {
        id: "perfect_match",
        name: "完美配對",
        description: "連連看獲得滿分",
        icon: "star",
        condition: Condition::BestScore(GameKind::Matching, 100),
    },
    Achievement {
        id: "speed_demon",
        name: "閃電反應",
        description: "決鬥遊戲獲得 100 分以上",
        icon: "zap",
        condition: Condition::BestScore(GameKind::Duel, 100),
    },
    Achievement {
        id: "streak_3",
        name: "堅持學習",
        description: "連續 3 天學習",
        icon: "fire",
        condition: Condition::Streak(3),
    },
    Achievement {
        id: "streak_7",
        name: "學習週冠",
        description: "連續 7 天學習",
        icon: "crown",
        condition: Condition::Streak(7),
    },
];

/// Look up a definition by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// A learner's unlocked achievements, as stored on the progress record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    /// Ids in unlock order.
    #[serde(default)]
    pub unlocked: Vec<String>,
    #[serde(default)]
    pub unlocked_at: BTreeMap<String, Timestamp>,
}

impl Achievements {
    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Unlock every locked achievement whose condition holds, in definition
    /// order. Returns the ones unlocked by this call.
    pub fn check(&mut self, stats: &Statistics, mastered: usize, now: Timestamp) -> Vec<&'static Achievement> {
        let mut newly = Vec::new();
        for achievement in &ACHIEVEMENTS {
            if self.is_unlocked(achievement.id) || !achievement.condition.is_met(stats, mastered) {
                continue;
            }
            self.unlocked.push(achievement.id.to_string());
            self.unlocked_at.insert(achievement.id.to_string(), now);
            newly.push(achievement);
        }
        newly
    }
}
