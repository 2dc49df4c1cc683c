pub use cgmath;
pub use config::{ConfigError, Network, SignalSpec, SimulationConfig};
pub use lane::Lane;
pub use light::{Phase, PhaseDurations, TrafficLight, UnknownPhase, MIN_PHASE};
pub use observer::{Event, EventLog, Observer};
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use snapshot::{SignalState, Snapshot, VehicleState};
pub use vehicle::Vehicle;

pub mod config;
mod lane;
mod light;
pub mod math;
mod observer;
mod simulation;
mod snapshot;
mod timer;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a [Lane].
    pub struct LaneId;
    /// Unique ID of a [Vehicle].
    pub struct VehicleId;
    /// Unique ID of a [TrafficLight].
    pub struct SignalId;
}

type LaneSet = SlotMap<LaneId, Lane>;
type SignalSet = SlotMap<SignalId, TrafficLight>;
type VehicleSet = SlotMap<VehicleId, Vehicle>;
