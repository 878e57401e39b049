use super::*;

const OCT_19_2026: i64 = 1_792_368_000_000;

#[test]
fn parses_epoch_millis() {
    assert_eq!(Timestamp::parse("1792368000000"), Ok(Timestamp::from_millis(OCT_19_2026)));
}

#[test]
fn parses_iso_8601() {
    assert_eq!(Timestamp::parse("2026-10-19T00:00:00.000Z"), Ok(Timestamp::from_millis(OCT_19_2026)));
    assert_eq!(
        Timestamp::parse("2026-10-19T08:30:15.250Z"),
        Ok(Timestamp::from_millis(1_792_398_615_250))
    );
}

#[test]
fn parses_browser_date_string_as_utc_midnight() {
    assert_eq!(Timestamp::parse("Mon Oct 19 2026"), Ok(Timestamp::from_millis(OCT_19_2026)));
    let oct_5 = Timestamp::parse("Mon Oct 05 2026").unwrap();
    assert_eq!(Timestamp::from_millis(OCT_19_2026).day() - oct_5.day(), 14);
}

#[test]
fn rejects_other_text() {
    assert!(Timestamp::parse("yesterday").is_err());
    assert!(Timestamp::parse("").is_err());
}

#[test]
fn day_counts_utc_days() {
    let ts = Timestamp::from_millis(OCT_19_2026);
    assert_eq!(Timestamp::from_millis(OCT_19_2026 + DAY_MS - 1).day(), ts.day());
    assert_eq!(Timestamp::from_millis(OCT_19_2026 + DAY_MS).day(), ts.day() + 1);
}

#[test]
fn serde_reads_all_shapes_and_writes_iso() {
    let shapes = [
        serde_json::json!(OCT_19_2026),
        serde_json::json!("2026-10-19T00:00:00.000Z"),
        serde_json::json!("Mon Oct 19 2026"),
    ];
    for shape in shapes {
        let ts: Timestamp = serde_json::from_value(shape).unwrap();
        assert_eq!(ts.as_millis(), OCT_19_2026);
    }
    let written = serde_json::to_value(Timestamp::from_millis(OCT_19_2026)).unwrap();
    assert_eq!(written, "2026-10-19T00:00:00Z");
    assert!(serde_json::from_value::<Timestamp>(serde_json::json!("soon")).is_err());
}

#[test]
fn display_is_iso() {
    assert_eq!(Timestamp::from_millis(OCT_19_2026).to_string(), "2026-10-19T00:00:00Z");
}

#[test]
fn now_is_after_2020() {
    assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
}
