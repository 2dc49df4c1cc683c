use crate::light::{Phase, TrafficLight};
use crate::math::LatLng;
use crate::vehicle::Vehicle;
use crate::{LaneId, SignalId, VehicleId};
use serde::Serialize;
use std::time::Duration;

/// The state of the simulation at one instant, for renderers that poll.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The simulation time in ms.
    pub time_ms: u64,
    pub signals: Vec<SignalState>,
    pub vehicles: Vec<VehicleState>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignalState {
    pub id: SignalId,
    pub name: String,
    pub position: LatLng,
    pub phase: Phase,
}

#[derive(Clone, Debug, Serialize)]
pub struct VehicleState {
    pub id: VehicleId,
    pub lane: LaneId,
    pub progress: f64,
    pub position: LatLng,
    pub stopped: bool,
}

impl Snapshot {
    pub(crate) fn capture<'a>(
        now: Duration,
        lights: impl Iterator<Item = (SignalId, &'a TrafficLight)>,
        vehicles: impl Iterator<Item = &'a Vehicle>,
    ) -> Self {
        Self {
            time_ms: now.as_millis() as u64,
            signals: lights
                .map(|(id, light)| SignalState {
                    id,
                    name: light.name().to_string(),
                    position: light.position(),
                    phase: light.phase(),
                })
                .collect(),
            vehicles: vehicles
                .map(|vehicle| VehicleState {
                    id: vehicle.id(),
                    lane: vehicle.lane_id(),
                    progress: vehicle.progress(),
                    position: vehicle.position(),
                    stopped: vehicle.stopped(),
                })
                .collect(),
        }
    }

    /// Converts the snapshot to JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
