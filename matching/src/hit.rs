//! Hit-testing pointer positions against endpoint centres.
//!
//! An endpoint is hit when the pointer is within `radius` of its centre.
//! Overlapping reach is resolved by distance, then by side (left first),
//! then by index, so the answer never depends on paint order.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::cmp::Ordering;

use crate::geometry::Point;
use crate::registry::{Endpoint, EndpointId};

/// Nearest endpoint within `radius` of `point`, if any.
#[must_use]
pub fn hit_test<'a, I>(point: Point, endpoints: I, radius: f64) -> Option<EndpointId>
where
    I: IntoIterator<Item = &'a Endpoint>,
{
    let reach_sq = radius * radius;
    endpoints
        .into_iter()
        .map(|e| (e.id, e.center.distance_sq(point)))
        .filter(|(_, d)| *d <= reach_sq)
        .min_by(|(a_id, a_d), (b_id, b_d)| {
            a_d.partial_cmp(b_d)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a_id.cmp(b_id))
        })
        .map(|(id, _)| id)
}
