//! Result notices shown after an answer check.
//!
//! A notice is fire-and-forget: it carries its own display duration and the
//! engine keeps nothing once it has been handed to the reporter.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::connections::MatchResult;
use crate::consts::{RESULT_DISPLAY_MS, RESULT_FADE_MS};

/// Visual tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Every pair found.
    Success,
    /// Some pairs missing or wrong.
    Info,
}

/// A transient, self-dismissing result message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNotice {
    pub correct_count: usize,
    pub total: usize,
    pub tone: Tone,
    pub message: String,
    /// Time on screen before fading out.
    pub display_ms: u64,
    /// Fade-out time after `display_ms`.
    pub fade_ms: u64,
}

impl ResultNotice {
    #[must_use]
    pub fn from_result(result: &MatchResult) -> Self {
        let perfect = result.is_perfect();
        let mut message = format!("答對 {} / {} 題！", result.correct_count, result.total);
        if perfect {
            message.push_str(" 太棒了！");
        }
        Self {
            correct_count: result.correct_count,
            total: result.total,
            tone: if perfect { Tone::Success } else { Tone::Info },
            message,
            display_ms: RESULT_DISPLAY_MS,
            fade_ms: RESULT_FADE_MS,
        }
    }
}

/// Presents result notices to the learner.
pub trait FeedbackReporter {
    fn report(&mut self, notice: &ResultNotice);
}

/// Reporter that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FeedbackReporter for LogReporter {
    fn report(&mut self, notice: &ResultNotice) {
        info!(
            correct = notice.correct_count,
            total = notice.total,
            tone = ?notice.tone,
            "{}",
            notice.message
        );
    }
}
