use super::*;
use crate::geometry::Coord;
use crate::input::{EndpointStatus, Side};

// =============================================================
// Helpers
// =============================================================

fn endpoint(side: Side, index: usize, x: f64, y: f64) -> Endpoint {
    Endpoint {
        id: EndpointId::new(side, index),
        value: format!("{side}{index}"),
        x: Coord::Px(x),
        y: Coord::Px(y),
        center: Point::new(x, y),
        status: EndpointStatus::Free,
    }
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn no_endpoints_no_hit() {
    assert_eq!(hit_test(Point::new(0.0, 0.0), &Vec::<Endpoint>::new(), 10.0), None);
}

#[test]
fn hit_inside_radius() {
    let eps = vec![endpoint(Side::Left, 0, 100.0, 100.0)];
    assert_eq!(hit_test(Point::new(106.0, 108.0), &eps, 10.0), Some(EndpointId::left(0)));
}

#[test]
fn boundary_counts_as_hit() {
    let eps = vec![endpoint(Side::Left, 0, 0.0, 0.0)];
    assert_eq!(hit_test(Point::new(10.0, 0.0), &eps, 10.0), Some(EndpointId::left(0)));
}

#[test]
fn outside_radius_misses() {
    let eps = vec![endpoint(Side::Left, 0, 0.0, 0.0)];
    assert_eq!(hit_test(Point::new(10.5, 0.0), &eps, 10.0), None);
}

#[test]
fn nearest_of_overlapping_endpoints_wins() {
    let eps = vec![endpoint(Side::Left, 0, 0.0, 0.0), endpoint(Side::Right, 0, 12.0, 0.0)];
    assert_eq!(hit_test(Point::new(7.0, 0.0), &eps, 10.0), Some(EndpointId::right(0)));
    assert_eq!(hit_test(Point::new(5.0, 0.0), &eps, 10.0), Some(EndpointId::left(0)));
}

#[test]
fn equal_distance_prefers_left_then_lower_index() {
    let eps = vec![
        endpoint(Side::Right, 0, 10.0, 0.0),
        endpoint(Side::Left, 1, -10.0, 0.0),
        endpoint(Side::Left, 0, 0.0, 10.0),
    ];
    assert_eq!(hit_test(Point::new(0.0, 0.0), &eps, 10.0), Some(EndpointId::left(0)));
}

#[test]
fn result_does_not_depend_on_iteration_order() {
    let a = endpoint(Side::Left, 0, 0.0, 0.0);
    let b = endpoint(Side::Right, 0, 4.0, 0.0);
    let forward = vec![a.clone(), b.clone()];
    let backward = vec![b, a];
    let pt = Point::new(2.0, 0.0);
    assert_eq!(hit_test(pt, &forward, 10.0), hit_test(pt, &backward, 10.0));
}
