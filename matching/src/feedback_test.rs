use super::*;

fn result(correct_count: usize, total: usize) -> MatchResult {
    MatchResult { correct_count, total, committed: total }
}

#[test]
fn perfect_result_celebrates() {
    let notice = ResultNotice::from_result(&result(3, 3));
    assert_eq!(notice.message, "答對 3 / 3 題！ 太棒了！");
    assert_eq!(notice.tone, Tone::Success);
}

#[test]
fn partial_result_is_informational() {
    let notice = ResultNotice::from_result(&result(1, 4));
    assert_eq!(notice.message, "答對 1 / 4 題！");
    assert_eq!(notice.tone, Tone::Info);
    assert_eq!(notice.correct_count, 1);
    assert_eq!(notice.total, 4);
}

#[test]
fn notice_uses_fixed_display_duration() {
    let notice = ResultNotice::from_result(&result(0, 2));
    assert_eq!(notice.display_ms, RESULT_DISPLAY_MS);
    assert_eq!(notice.fade_ms, RESULT_FADE_MS);
}

#[test]
fn custom_reporter_receives_notice() {
    struct Capture(Vec<String>);
    impl FeedbackReporter for Capture {
        fn report(&mut self, notice: &ResultNotice) {
            self.0.push(notice.message.clone());
        }
    }
    let mut capture = Capture(Vec::new());
    capture.report(&ResultNotice::from_result(&result(2, 2)));
    assert_eq!(capture.0, vec!["答對 2 / 2 題！ 太棒了！".to_string()]);
}

#[test]
fn log_reporter_accepts_notice() {
    let mut reporter = LogReporter;
    reporter.report(&ResultNotice::from_result(&result(0, 1)));
}
