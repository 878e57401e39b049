use super::*;

const NOW: Timestamp = Timestamp::from_millis(1_792_368_000_000);

fn stats_with(games: &[(GameKind, u32)], best: &[(GameKind, u32)], streak: u32) -> Statistics {
    Statistics {
        games_played: games.iter().copied().collect(),
        best_scores: best.iter().copied().collect(),
        daily_streak: streak,
        ..Statistics::default()
    }
}

fn unlocked_ids(stats: &Statistics, mastered: usize) -> Vec<&'static str> {
    Achievements::default()
        .check(stats, mastered, NOW)
        .iter()
        .map(|a| a.id)
        .collect()
}

// =============================================================================
// definitions
// =============================================================================

#[test]
fn nine_distinct_definitions() {
    let mut ids: Vec<&str> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 9);
    assert_eq!(find("perfect_match").map(|a| a.icon), Some("star"));
    assert!(find("nope").is_none());
}

#[test]
fn empty_statistics_unlock_nothing() {
    assert!(unlocked_ids(&Statistics::default(), 0).is_empty());
}

// =============================================================================
// conditions
// =============================================================================

#[test]
fn vocabulary_thresholds() {
    let stats = Statistics::default();
    assert_eq!(unlocked_ids(&stats, 1), vec!["first_word"]);
    assert_eq!(unlocked_ids(&stats, 9), vec!["first_word"]);
    assert_eq!(unlocked_ids(&stats, 10), vec!["first_word", "vocab_10"]);
    assert_eq!(unlocked_ids(&stats, 27), vec!["first_word", "vocab_10", "vocab_all"]);
}

#[test]
fn game_first_needs_any_game() {
    let stats = stats_with(&[(GameKind::Maze, 1)], &[], 0);
    assert_eq!(unlocked_ids(&stats, 0), vec!["game_first"]);
}

#[test]
fn game_all_needs_every_kind() {
    let four: Vec<(GameKind, u32)> = GameKind::ALL[..4].iter().map(|k| (*k, 1)).collect();
    assert!(!unlocked_ids(&stats_with(&four, &[], 0), 0).contains(&"game_all"));
    let five: Vec<(GameKind, u32)> = GameKind::ALL.iter().map(|k| (*k, 2)).collect();
    assert!(unlocked_ids(&stats_with(&five, &[], 0), 0).contains(&"game_all"));
}

#[test]
fn perfect_match_needs_full_matching_score() {
    let played = [(GameKind::Matching, 1)];
    assert!(!unlocked_ids(&stats_with(&played, &[(GameKind::Matching, 99)], 0), 0).contains(&"perfect_match"));
    assert!(unlocked_ids(&stats_with(&played, &[(GameKind::Matching, 100)], 0), 0).contains(&"perfect_match"));
}

#[test]
fn speed_demon_needs_duel_score_of_100() {
    let played = [(GameKind::Duel, 1)];
    assert!(!unlocked_ids(&stats_with(&played, &[(GameKind::Duel, 80)], 0), 0).contains(&"speed_demon"));
    assert!(unlocked_ids(&stats_with(&played, &[(GameKind::Duel, 120)], 0), 0).contains(&"speed_demon"));
}

#[test]
fn streak_thresholds() {
    assert!(unlocked_ids(&stats_with(&[], &[], 2), 0).is_empty());
    assert_eq!(unlocked_ids(&stats_with(&[], &[], 3), 0), vec!["streak_3"]);
    assert_eq!(unlocked_ids(&stats_with(&[], &[], 6), 0), vec!["streak_3"]);
    assert_eq!(unlocked_ids(&stats_with(&[], &[], 7), 0), vec!["streak_3", "streak_7"]);
}

// =============================================================================
// bookkeeping
// =============================================================================

#[test]
fn check_stamps_and_reports_only_new_unlocks() {
    let mut achievements = Achievements::default();
    let first = achievements.check(&Statistics::default(), 1, NOW);
    assert_eq!(first.len(), 1);
    assert_eq!(achievements.unlocked_at.get("first_word"), Some(&NOW));

    let later = Timestamp::from_millis(NOW.as_millis() + 1000);
    let second = achievements.check(&Statistics::default(), 10, later);
    assert_eq!(second.iter().map(|a| a.id).collect::<Vec<_>>(), vec!["vocab_10"]);
    assert_eq!(achievements.unlocked, vec!["first_word", "vocab_10"]);
    assert_eq!(achievements.unlocked_at.get("first_word"), Some(&NOW));
    assert_eq!(achievements.unlocked_at.get("vocab_10"), Some(&later));
}

#[test]
fn unlocks_are_never_revoked() {
    let mut achievements = Achievements::default();
    achievements.check(&Statistics::default(), 1, NOW);
    assert!(achievements.check(&Statistics::default(), 0, NOW).is_empty());
    assert!(achievements.is_unlocked("first_word"));
}

#[test]
fn stored_shape_round_trips_through_json() {
    let stored = serde_json::json!({
        "unlocked": ["game_first"],
        "unlockedAt": { "game_first": "2026-10-19T00:00:00.000Z" }
    });
    let achievements: Achievements = serde_json::from_value(stored).unwrap();
    assert!(achievements.is_unlocked("game_first"));
    assert_eq!(achievements.unlocked_at["game_first"], NOW);
}
