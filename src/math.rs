//! Mathematical structs and functions.

use cgmath::Point2;
pub use distance::{haversine_distance, planar_distance, DistanceMetric, Proximity, EARTH_RADIUS_M};
pub use intersect::{compute_intersection, find_intersections, lane_pairs, Intersection};
pub use point::{LatLng, Segment};

mod distance;
mod intersect;
mod point;

/// A 2D point in (lat, lng) degree space.
pub type Point2d = Point2<f64>;
