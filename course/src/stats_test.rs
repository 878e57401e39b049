use super::*;

const DAY0: i64 = 20_000 * DAY_MS;

fn at_day(day: i64) -> i64 {
    DAY0 + day * DAY_MS + 3_600_000
}

fn session_on(days: &[i64]) -> SessionStats {
    let mut s = SessionStats::new();
    for day in days {
        s.record_game(GameKind::Sorting, 50, at_day(*day));
    }
    s
}

// =============================================================================
// scores
// =============================================================================

#[test]
fn percent_rounds_half_up() {
    assert_eq!(percent(0, 0), 0);
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 8), 13);
    assert_eq!(percent(5, 3), 100);
}

#[test]
fn matching_keeps_best_score() {
    let mut s = SessionStats::new();
    assert!(s.is_empty());
    s.record_matching(1, 3, 10);
    s.record_matching(3, 3, 20);
    s.record_matching(2, 3, 15);
    assert_eq!(s.games(GameKind::Matching), 3);
    assert_eq!(s.best_score(GameKind::Matching), Some(100));
    assert_eq!(s.best_score(GameKind::Maze), None);
    assert!(!s.is_empty());
}

#[test]
fn empty_board_scores_zero() {
    let mut s = SessionStats::new();
    s.record_matching(0, 0, 1);
    assert_eq!(s.best_score(GameKind::Matching), Some(0));
}

#[test]
fn apply_to_merges_into_persisted_statistics() {
    let mut stats = Statistics::default();
    stats.games_played.insert(GameKind::Matching, 2);
    stats.best_scores.insert(GameKind::Matching, 80);
    stats.total_study_time = 100;
    stats.last_study_date = Some(Timestamp::from_millis(500));

    let mut s = SessionStats::new();
    s.record_matching(2, 3, 300);
    s.record_game(GameKind::Bingo, 150, 400);
    s.add_study_time(60);
    s.apply_to(&mut stats);

    assert_eq!(stats.games(GameKind::Matching), 3);
    assert_eq!(stats.games(GameKind::Bingo), 1);
    assert_eq!(stats.best_scores[&GameKind::Matching], 80);
    assert_eq!(stats.best_scores[&GameKind::Bingo], 100);
    assert_eq!(stats.total_study_time, 160);
    assert_eq!(stats.last_study_date, Some(Timestamp::from_millis(500)));
}

#[test]
fn apply_to_moves_last_study_date_forward() {
    let mut stats = Statistics::default();
    let mut s = SessionStats::new();
    s.record_game(GameKind::Duel, 50, 900);
    s.apply_to(&mut stats);
    assert_eq!(stats.last_study_date, Some(Timestamp::from_millis(900)));
}

// =============================================================================
// daily streak
// =============================================================================

#[test]
fn first_activity_starts_streak_at_one() {
    let mut stats = Statistics::default();
    session_on(&[0, 0]).apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 1);
}

#[test]
fn three_consecutive_days_make_a_three_day_streak() {
    let mut stats = Statistics::default();
    session_on(&[0, 1, 2]).apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 3);
    assert_eq!(stats.last_study_date.map(Timestamp::day), Some(DAY0 / DAY_MS + 2));
}

#[test]
fn seven_days_across_sessions_make_a_seven_day_streak() {
    let mut stats = Statistics::default();
    for day in 0..7 {
        session_on(&[day]).apply_to(&mut stats);
    }
    assert_eq!(stats.daily_streak, 7);
}

#[test]
fn same_day_again_keeps_streak() {
    let mut stats = Statistics::default();
    session_on(&[0, 1]).apply_to(&mut stats);
    session_on(&[1]).apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 2);
}

#[test]
fn gap_restarts_streak() {
    let mut stats = Statistics::default();
    session_on(&[0, 1, 2]).apply_to(&mut stats);
    session_on(&[4]).apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 1);
}

#[test]
fn older_activity_leaves_streak_alone() {
    let mut stats = Statistics::default();
    session_on(&[5, 6]).apply_to(&mut stats);
    session_on(&[1]).apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 2);
    assert_eq!(stats.last_study_date.map(Timestamp::day), Some(DAY0 / DAY_MS + 6));
}

#[test]
fn study_time_alone_does_not_touch_streak() {
    let mut stats = Statistics::default();
    let mut s = SessionStats::new();
    s.add_study_time(30);
    s.apply_to(&mut stats);
    assert_eq!(stats.daily_streak, 0);
    assert_eq!(stats.last_study_date, None);
}
