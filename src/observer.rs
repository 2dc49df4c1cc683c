//! The callbacks through which a renderer follows the simulation.

use crate::lane::Lane;
use crate::light::{Phase, TrafficLight};
use crate::math::LatLng;
use crate::{LaneId, SignalId, VehicleId};

/// Receives updates from a [Simulation](crate::Simulation).
///
/// Every method does nothing by default. Implementations must not assume
/// the simulation waits for them to finish any visual work.
#[allow(unused_variables)]
pub trait Observer {
    /// The lanes have been added to the network.
    fn on_lanes_ready(&mut self, lanes: &[&Lane]) {}

    /// The crossing points between lanes have been computed.
    fn on_intersections_computed(&mut self, points: &[LatLng]) {}

    /// A signal has been placed in the network.
    fn on_signal_placed(&mut self, id: SignalId, light: &TrafficLight) {}

    /// A signal has moved to a new phase.
    fn on_signal_phase_changed(&mut self, id: SignalId, phase: Phase) {}

    /// A vehicle has entered the network.
    fn on_vehicle_spawned(&mut self, id: VehicleId, lane: LaneId, position: LatLng) {}

    /// A vehicle has moved.
    fn on_vehicle_position_changed(&mut self, id: VehicleId, position: LatLng) {}

    /// A vehicle has reached the end of its lane and left the network.
    fn on_vehicle_removed(&mut self, id: VehicleId) {}
}

/// Ignores every update.
impl Observer for () {}

/// A single update received by an [EventLog].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    LanesReady(usize),
    IntersectionsComputed(Vec<LatLng>),
    SignalPlaced(SignalId),
    SignalPhaseChanged(SignalId, Phase),
    VehicleSpawned(VehicleId, LaneId),
    VehiclePositionChanged(VehicleId, LatLng),
    VehicleRemoved(VehicleId),
}

/// Records every update in the order it was received.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Default::default()
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The phase changes recorded for one signal.
    pub fn phases_of(&self, signal: SignalId) -> Vec<Phase> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::SignalPhaseChanged(id, phase) if *id == signal => Some(*phase),
                _ => None,
            })
            .collect()
    }

    /// The number of times a vehicle was reported removed.
    pub fn removals_of(&self, vehicle: VehicleId) -> usize {
        self.events
            .iter()
            .filter(|event| **event == Event::VehicleRemoved(vehicle))
            .count()
    }
}

impl Observer for EventLog {
    fn on_lanes_ready(&mut self, lanes: &[&Lane]) {
        self.events.push(Event::LanesReady(lanes.len()));
    }

    fn on_intersections_computed(&mut self, points: &[LatLng]) {
        self.events.push(Event::IntersectionsComputed(points.to_vec()));
    }

    fn on_signal_placed(&mut self, id: SignalId, _light: &TrafficLight) {
        self.events.push(Event::SignalPlaced(id));
    }

    fn on_signal_phase_changed(&mut self, id: SignalId, phase: Phase) {
        self.events.push(Event::SignalPhaseChanged(id, phase));
    }

    fn on_vehicle_spawned(&mut self, id: VehicleId, lane: LaneId, _position: LatLng) {
        self.events.push(Event::VehicleSpawned(id, lane));
    }

    fn on_vehicle_position_changed(&mut self, id: VehicleId, position: LatLng) {
        self.events.push(Event::VehiclePositionChanged(id, position));
    }

    fn on_vehicle_removed(&mut self, id: VehicleId) {
        self.events.push(Event::VehicleRemoved(id));
    }
}
