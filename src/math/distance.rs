use super::LatLng;
use cgmath::MetricSpace;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in m.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Euclidean distance over raw (lat, lng) deltas, in degrees.
pub fn planar_distance(a: LatLng, b: LatLng) -> f64 {
    a.to_point().distance(b.to_point())
}

/// Great-circle distance in m.
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// A way of measuring the distance between two coordinates.
///
/// The metrics do not share units, so a threshold calibrated for one
/// is meaningless for the other. See [Proximity].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance in degree space.
    Planar,
    /// Great-circle distance in metres.
    Haversine,
}

impl DistanceMetric {
    /// Measures the distance between `a` and `b`.
    pub fn distance(self, a: LatLng, b: LatLng) -> f64 {
        match self {
            DistanceMetric::Planar => planar_distance(a, b),
            DistanceMetric::Haversine => haversine_distance(a, b),
        }
    }
}

/// A distance threshold together with the metric it is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub metric: DistanceMetric,
    pub threshold: f64,
}

impl Proximity {
    /// A threshold in degrees, measured with [DistanceMetric::Planar].
    pub const fn planar(threshold: f64) -> Self {
        Self {
            metric: DistanceMetric::Planar,
            threshold,
        }
    }

    /// A threshold in metres, measured with [DistanceMetric::Haversine].
    pub const fn haversine(threshold: f64) -> Self {
        Self {
            metric: DistanceMetric::Haversine,
            threshold,
        }
    }

    /// Measures the distance between two points with this threshold's metric.
    pub fn distance(&self, a: LatLng, b: LatLng) -> f64 {
        self.metric.distance(a, b)
    }

    /// Whether a distance measured with this threshold's metric is within the threshold.
    pub fn admits(&self, distance: f64) -> bool {
        distance <= self.threshold
    }

    /// Whether `a` and `b` are within the threshold of each other.
    pub fn is_near(&self, a: LatLng, b: LatLng) -> bool {
        self.admits(self.distance(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn planar_is_euclidean() {
        let d = planar_distance(LatLng::new(0.0, 0.0), LatLng::new(3.0, 4.0));
        assert_approx_eq!(d, 5.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert_approx_eq!(d, EARTH_RADIUS_M * std::f64::consts::PI / 180.0, 1e-6);
    }

    #[test]
    fn haversine_is_symmetric_and_zero_on_self() {
        let a = LatLng::new(-12.86238, -72.69372);
        let b = LatLng::new(-12.86441, -72.6933);
        assert_eq!(haversine_distance(a, a), 0.0);
        assert_approx_eq!(haversine_distance(a, b), haversine_distance(b, a), 1e-9);
        // Roughly 230 m apart.
        let d = haversine_distance(a, b);
        assert!(d > 200.0 && d < 260.0, "{d}");
    }

    #[test]
    fn threshold_uses_its_own_metric() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.00005, 0.0);
        // ~5.6 m apart, but only 0.00005 degrees.
        assert!(Proximity::haversine(10.0).is_near(a, b));
        assert!(!Proximity::haversine(1.0).is_near(a, b));
        assert!(Proximity::planar(0.0001).is_near(a, b));
        assert!(!Proximity::planar(0.00001).is_near(a, b));
    }
}
