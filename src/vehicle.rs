use crate::lane::Lane;
use crate::math::LatLng;
use crate::{LaneId, VehicleId};

/// A simulated vehicle travelling along a single lane.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's ID
    pub(crate) id: VehicleId,
    /// The order in which the vehicle was spawned.
    serial: u64,
    /// The lane the vehicle travels along.
    lane: LaneId,
    /// The fraction of the lane already travelled.
    progress: f64,
    /// The world coordinates of the vehicle.
    position: LatLng,
    /// Whether the vehicle was held in place on its last tick.
    stopped: bool,
}

impl Vehicle {
    /// Creates a vehicle at the start of a lane.
    pub(crate) fn new(id: VehicleId, serial: u64, lane: &Lane) -> Self {
        Self {
            id,
            serial,
            lane: lane.id(),
            progress: 0.0,
            position: lane.start(),
            stopped: false,
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Gets the ID of the lane the vehicle is on.
    pub fn lane_id(&self) -> LaneId {
        self.lane
    }

    /// Gets the fraction of the lane the vehicle has travelled.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Gets the vehicle's world coordinates.
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Whether the vehicle was held in place on its last tick.
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Checks whether `other` is ahead of this vehicle on the same lane.
    /// Of two vehicles level with each other, the one spawned first is ahead.
    pub(crate) fn is_behind(&self, other: &Vehicle) -> bool {
        if other.lane != self.lane {
            return false;
        }
        other.progress > self.progress
            || (other.progress == self.progress && other.serial < self.serial)
    }

    pub(crate) fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// Moves the vehicle `increment` further along its lane.
    /// Returns `true` iff the vehicle has reached the end of the lane,
    /// in which case its position is left unchanged.
    pub(crate) fn advance(&mut self, lane: &Lane, increment: f64) -> bool {
        self.progress += increment.max(0.0);
        if self.progress >= 1.0 {
            return true;
        }
        self.position = lane.sample(self.progress);
        false
    }
}
