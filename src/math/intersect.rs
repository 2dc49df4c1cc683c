use super::{LatLng, Segment};
use crate::util::Interval;
use itertools::Itertools;

/// The crossing point of two lanes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Where the lanes cross.
    pub point: LatLng,
    /// The indices of the two lanes, in ascending order.
    pub lanes: (usize, usize),
}

/// Computes the point at which two finite segments cross.
///
/// Returns `None` when the segments are parallel or collinear (even if they overlap),
/// or when the crossing of their supporting lines lies outside either segment.
/// The returned point is interpolated along `a`.
pub fn compute_intersection(a: &Segment, b: &Segment) -> Option<LatLng> {
    let (p1, p2) = (a.start, a.end);
    let (p3, p4) = (b.start, b.end);

    let denominator = (p1.lat - p2.lat) * (p3.lng - p4.lng) - (p1.lng - p2.lng) * (p3.lat - p4.lat);
    if denominator == 0.0 {
        return None;
    }

    let t = ((p1.lat - p3.lat) * (p3.lng - p4.lng) - (p1.lng - p3.lng) * (p3.lat - p4.lat))
        / denominator;
    let u = -(((p1.lat - p2.lat) * (p1.lng - p3.lng) - (p1.lng - p2.lng) * (p1.lat - p3.lat))
        / denominator);

    let unit = Interval::new(0.0, 1.0);
    if unit.contains(t) && unit.contains(u) {
        Some(a.lerp(t))
    } else {
        None
    }
}

/// Enumerates every unordered pair `(i, j)` with `i < j < count`,
/// with `i` ascending and then `j` ascending.
pub fn lane_pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count).tuple_combinations()
}

/// Finds the crossings between every pair of segments, in pair visitation order.
///
/// Coincident points produced by different pairs are all kept.
pub fn find_intersections(segments: &[Segment]) -> Vec<Intersection> {
    lane_pairs(segments.len())
        .filter_map(|(i, j)| {
            compute_intersection(&segments[i], &segments[j]).map(|point| Intersection {
                point,
                lanes: (i, j),
            })
        })
        .collect()
}
