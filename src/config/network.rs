use super::{read, ConfigError};
use crate::light::{Phase, PhaseDurations, TrafficLight};
use crate::math::LatLng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The lanes and signals that make up a road network.
#[derive(Clone, Debug, Default)]
pub struct Network {
    /// The waypoints of each lane.
    pub lanes: Vec<Vec<LatLng>>,
    /// The signal descriptors, in placement order.
    pub signals: Vec<SignalSpec>,
}

/// A normalised signal descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalSpec {
    /// The external name of the signal.
    pub name: String,
    /// Where the signal stands. When absent, it is placed at the next unclaimed crossing.
    pub location: Option<LatLng>,
    /// The phase the signal starts in.
    pub initial_phase: Phase,
    /// The time spent in each phase.
    pub durations: PhaseDurations,
}

/// The accepted shapes of a lane file.
#[derive(Deserialize)]
#[serde(untagged)]
enum LaneFile {
    List { lanes: Vec<Vec<LatLng>> },
    Named { lanes: BTreeMap<String, Vec<LatLng>> },
    Bare(Vec<Vec<LatLng>>),
}

/// The accepted shapes of a signal file.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignalFile {
    /// One descriptor per computed crossing, in order.
    Flat {
        #[serde(rename = "trafficLights")]
        traffic_lights: Vec<SignalDescriptor>,
    },
    /// Descriptors grouped under intersection names.
    Keyed {
        intersections: BTreeMap<String, Vec<SignalDescriptor>>,
    },
    Bare(Vec<SignalDescriptor>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalDescriptor {
    id: SignalName,
    #[serde(default)]
    location: Option<LatLng>,
    #[serde(default)]
    initial_state: Option<String>,
    #[serde(default)]
    green_time: Option<f64>,
    #[serde(default)]
    red_time: Option<f64>,
    #[serde(default, alias = "yellowTime")]
    amber_time: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignalName {
    Text(String),
    Number(serde_json::Number),
}

impl SignalDescriptor {
    fn into_spec(self) -> SignalSpec {
        let name = match self.id {
            SignalName::Text(name) => name,
            SignalName::Number(n) => n.to_string(),
        };
        let initial_phase = match self.initial_state.as_deref().map(str::parse::<Phase>) {
            None => Phase::Red,
            Some(Ok(phase)) => phase,
            Some(Err(err)) => {
                log::warn!("signal {name}: {err}, starting at red");
                Phase::Red
            }
        };
        SignalSpec {
            name,
            location: self.location,
            initial_phase,
            durations: PhaseDurations::from_millis(self.red_time, self.green_time, self.amber_time),
        }
    }
}

impl Network {
    /// Parses a lane file.
    pub fn parse_lanes(json: &str) -> Result<Vec<Vec<LatLng>>, ConfigError> {
        Ok(match serde_json::from_str::<LaneFile>(json)? {
            LaneFile::List { lanes } | LaneFile::Bare(lanes) => lanes,
            LaneFile::Named { lanes } => lanes.into_values().collect(),
        })
    }

    /// Parses a signal file into normalised descriptors.
    pub fn parse_signals(json: &str) -> Result<Vec<SignalSpec>, ConfigError> {
        let descriptors = match serde_json::from_str::<SignalFile>(json)? {
            SignalFile::Flat { traffic_lights } | SignalFile::Bare(traffic_lights) => traffic_lights,
            SignalFile::Keyed { intersections } => intersections.into_values().flatten().collect(),
        };
        Ok(descriptors.into_iter().map(SignalDescriptor::into_spec).collect())
    }

    /// Parses a network from the contents of a lane file and a signal file.
    pub fn from_json(lanes: &str, signals: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            lanes: Self::parse_lanes(lanes)?,
            signals: Self::parse_signals(signals)?,
        })
    }

    /// Reads a network from a lane file and a signal file.
    pub fn from_files(lanes: impl AsRef<Path>, signals: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&read(lanes.as_ref())?, &read(signals.as_ref())?)
    }

    /// Reads a network, substituting an empty lane or signal set for any file
    /// that cannot be read or parsed.
    pub fn load_or_empty(lanes: impl AsRef<Path>, signals: impl AsRef<Path>) -> Self {
        let lanes = load_logged(lanes.as_ref(), Self::parse_lanes);
        let signals = load_logged(signals.as_ref(), Self::parse_signals);
        Self { lanes, signals }
    }

    /// Pairs the signal descriptors with the computed crossing points.
    ///
    /// Descriptors with a location stand there. The rest claim crossings in order.
    /// Crossings left unclaimed get no signal, and descriptors that find no crossing are dropped.
    pub fn place_signals(&self, crossings: &[LatLng]) -> Vec<TrafficLight> {
        let mut crossings = crossings.iter();
        let lights = self
            .signals
            .iter()
            .filter_map(|spec| {
                let position = match spec.location {
                    Some(location) => location,
                    None => match crossings.next() {
                        Some(point) => *point,
                        None => {
                            log::warn!("signal {} has no location and no crossing left, skipping", spec.name);
                            return None;
                        }
                    },
                };
                Some(TrafficLight::new(
                    spec.name.clone(),
                    position,
                    spec.initial_phase,
                    spec.durations,
                ))
            })
            .collect();
        let unclaimed = crossings.count();
        if unclaimed > 0 {
            log::warn!("{unclaimed} crossing(s) have no signal descriptor");
        }
        lights
    }
}

fn load_logged<T: Default>(path: &Path, parse: fn(&str) -> Result<T, ConfigError>) -> T {
    match read(path).and_then(|content| parse(&content)) {
        Ok(value) => value,
        Err(err) => {
            log::error!("failed to load {}: {err}, continuing without it", path.display());
            T::default()
        }
    }
}
