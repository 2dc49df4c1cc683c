use crate::config::ConfigError;
use crate::math::{LatLng, Segment};
use crate::LaneId;
use smallvec::SmallVec;

/// A directed path that vehicles travel along.
///
/// Intermediate waypoints are retained for rendering, but crossings and motion
/// only consider the straight segment between the first and last points.
#[derive(Clone, Debug)]
pub struct Lane {
    /// The lane ID.
    id: LaneId,
    /// The waypoints, from start to end.
    points: SmallVec<[LatLng; 2]>,
}

impl Lane {
    /// Checks that the waypoints describe a lane.
    pub(crate) fn validate(points: &[LatLng]) -> Result<(), ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::DegenerateLane {
                points: points.len(),
            });
        }
        Ok(())
    }

    /// Creates a new lane from waypoints that have passed [Lane::validate].
    pub(crate) fn new(id: LaneId, points: &[LatLng]) -> Self {
        Self {
            id,
            points: points.into(),
        }
    }

    /// Gets the lane's ID.
    pub fn id(&self) -> LaneId {
        self.id
    }

    /// Gets all of the lane's waypoints.
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    /// The point where vehicles enter the lane.
    pub fn start(&self) -> LatLng {
        self.points[0]
    }

    /// The point where vehicles leave the lane.
    pub fn end(&self) -> LatLng {
        self.points[self.points.len() - 1]
    }

    /// The governing segment, from the first to the last waypoint.
    pub fn segment(&self) -> Segment {
        Segment::new(self.start(), self.end())
    }

    /// Gets the position of a vehicle which has travelled `progress` of the lane.
    pub fn sample(&self, progress: f64) -> LatLng {
        self.segment().lerp(progress)
    }
}
