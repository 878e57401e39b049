#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn term(value: &str, x: f64, y: f64) -> TermSpec {
    TermSpec { value: value.into(), x: Coord::Percent(x), y: Coord::Percent(y) }
}

fn surface() -> Surface {
    Surface::new(1000.0, 500.0)
}

fn sample() -> PointRegistry {
    let mut registry = PointRegistry::new(20.0);
    registry.initialize(
        &[term("A", 20.0, 20.0), term("B", 20.0, 60.0)],
        &[term("X", 80.0, 20.0), term("Y", 80.0, 60.0)],
        surface(),
    );
    registry
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_creates_free_endpoints_in_order() {
    let registry = sample();
    assert_eq!(registry.len(), 4);
    let left = registry.side(Side::Left);
    assert_eq!(left[0].id, EndpointId::left(0));
    assert_eq!(left[0].value, "A");
    assert_eq!(left[1].id, EndpointId::left(1));
    assert_eq!(left[1].value, "B");
    assert_eq!(registry.side(Side::Right)[1].value, "Y");
    assert!(registry.endpoints().all(|e| e.status == EndpointStatus::Free));
}

#[test]
fn initialize_resolves_centres() {
    let registry = sample();
    let a = registry.get(EndpointId::left(0)).unwrap();
    assert_eq!(a.center, Point::new(200.0, 100.0));
    let y = registry.get(EndpointId::right(1)).unwrap();
    assert_eq!(y.center, Point::new(800.0, 300.0));
}

#[test]
fn initialize_discards_prior_state() {
    let mut registry = sample();
    registry.set_status(EndpointId::left(0), EndpointStatus::Connected);
    registry.initialize(&[term("C", 10.0, 10.0)], &[term("Z", 90.0, 10.0)], surface());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(EndpointId::left(0)).unwrap().value, "C");
    assert_eq!(registry.status(EndpointId::left(0)), Some(EndpointStatus::Free));
    assert!(registry.get(EndpointId::left(1)).is_none());
}

#[test]
fn new_registry_is_empty() {
    let registry = PointRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.hit_radius(), crate::consts::DEFAULT_HIT_RADIUS_PX);
}

// =============================================================
// find_at
// =============================================================

#[test]
fn find_at_hits_centre_and_radius() {
    let registry = sample();
    assert_eq!(registry.find_at(Point::new(200.0, 100.0)), Some(EndpointId::left(0)));
    assert_eq!(registry.find_at(Point::new(212.0, 116.0)), Some(EndpointId::left(0)));
    assert_eq!(registry.find_at(Point::new(800.0, 310.0)), Some(EndpointId::right(1)));
}

#[test]
fn find_at_misses_empty_space() {
    let registry = sample();
    assert_eq!(registry.find_at(Point::new(500.0, 250.0)), None);
    assert_eq!(registry.find_at(Point::new(221.0, 100.0)), None);
}

// =============================================================
// set_status
// =============================================================

#[test]
fn set_status_updates_known_endpoint() {
    let mut registry = sample();
    assert!(registry.set_status(EndpointId::right(0), EndpointStatus::Active));
    assert_eq!(registry.status(EndpointId::right(0)), Some(EndpointStatus::Active));
}

#[test]
fn set_status_on_unknown_endpoint_is_noop() {
    let mut registry = sample();
    assert!(!registry.set_status(EndpointId::left(9), EndpointStatus::Connected));
    assert_eq!(registry.status(EndpointId::left(9)), None);
    assert!(registry.endpoints().all(|e| e.status == EndpointStatus::Free));
}

#[test]
fn free_all_reverts_every_status() {
    let mut registry = sample();
    registry.set_status(EndpointId::left(0), EndpointStatus::Correct);
    registry.set_status(EndpointId::right(1), EndpointStatus::Incorrect);
    registry.free_all();
    assert!(registry.endpoints().all(|e| e.status.is_free()));
}

// =============================================================
// relayout
// =============================================================

#[test]
fn relayout_moves_centres_and_keeps_status() {
    let mut registry = sample();
    registry.set_status(EndpointId::left(1), EndpointStatus::Connected);
    registry.relayout(Surface::new(500.0, 1000.0));
    let b = registry.get(EndpointId::left(1)).unwrap();
    assert_eq!(b.center, Point::new(100.0, 600.0));
    assert_eq!(b.status, EndpointStatus::Connected);
}
