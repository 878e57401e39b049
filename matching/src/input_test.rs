use super::*;

// =============================================================
// Side
// =============================================================

#[test]
fn side_opposite_flips() {
    assert_eq!(Side::Left.opposite(), Side::Right);
    assert_eq!(Side::Right.opposite(), Side::Left);
}

#[test]
fn side_orders_left_first() {
    assert!(Side::Left < Side::Right);
}

#[test]
fn side_display_is_lowercase() {
    assert_eq!(Side::Left.to_string(), "left");
    assert_eq!(Side::Right.to_string(), "right");
}

// =============================================================
// EndpointStatus
// =============================================================

#[test]
fn status_default_is_free() {
    assert_eq!(EndpointStatus::default(), EndpointStatus::Free);
}

#[test]
fn only_free_is_free() {
    assert!(EndpointStatus::Free.is_free());
    for status in [
        EndpointStatus::Active,
        EndpointStatus::Connected,
        EndpointStatus::Correct,
        EndpointStatus::Incorrect,
    ] {
        assert!(!status.is_free(), "{status:?}");
    }
}

#[test]
fn checked_statuses_still_count_as_connected() {
    assert!(EndpointStatus::Connected.is_connected());
    assert!(EndpointStatus::Correct.is_connected());
    assert!(EndpointStatus::Incorrect.is_connected());
    assert!(!EndpointStatus::Free.is_connected());
    assert!(!EndpointStatus::Active.is_connected());
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn pointer_event_parses_trace_line() {
    let event: PointerEvent = serde_json::from_str(r#"{"pointer":2,"phase":"up","x":10.5,"y":20}"#).unwrap();
    assert_eq!(event.pointer_id, 2);
    assert_eq!(event.phase, PointerPhase::Up);
    assert_eq!(event.position, Point::new(10.5, 20.0));
}

#[test]
fn pointer_event_defaults_to_primary_pointer() {
    let event: PointerEvent = serde_json::from_str(r#"{"phase":"down","x":1,"y":2}"#).unwrap();
    assert_eq!(event.pointer_id, 0);
    assert_eq!(event, PointerEvent::primary(PointerPhase::Down, Point::new(1.0, 2.0)));
}

#[test]
fn pointer_event_rejects_unknown_phase() {
    let result = serde_json::from_str::<PointerEvent>(r#"{"phase":"hover","x":1,"y":2}"#);
    assert!(result.is_err());
}

// =============================================================
// DragState
// =============================================================

#[test]
fn drag_state_default_is_idle() {
    let state = DragState::default();
    assert_eq!(state, DragState::Idle);
    assert!(state.session().is_none());
}

#[test]
fn dragging_exposes_session() {
    let session = DragSession {
        pointer_id: 1,
        origin: EndpointId::left(0),
        line: LineGeometry::drawing_from(Point::new(3.0, 4.0)),
    };
    let state = DragState::Dragging(session.clone());
    assert_eq!(state.session(), Some(&session));
}
