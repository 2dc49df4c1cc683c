use super::Point2d;
use crate::util::Interval;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Views the coordinate as a planar point, with `x = lat` and `y = lng`.
    pub fn to_point(self) -> Point2d {
        Point2d::new(self.lat, self.lng)
    }
}

impl From<Point2d> for LatLng {
    fn from(p: Point2d) -> Self {
        Self::new(p.x, p.y)
    }
}

/// A straight line segment between two coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: LatLng,
    pub end: LatLng,
}

impl Segment {
    /// Creates a new segment.
    pub const fn new(start: LatLng, end: LatLng) -> Self {
        Self { start, end }
    }

    /// Samples the segment at parameter `t`, where 0 is the start and 1 the end.
    pub fn lerp(&self, t: f64) -> LatLng {
        LatLng {
            lat: Interval::new(self.start.lat, self.end.lat).lerp(t),
            lng: Interval::new(self.start.lng, self.end.lng).lerp(t),
        }
    }
}
