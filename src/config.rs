//! Simulation settings and network configuration files.

use crate::math::Proximity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use network::{Network, SignalSpec};

mod network;

/// An error raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a lane needs at least two points, got {points}")]
    DegenerateLane { points: usize },
}

/// Tuning knobs for the motion simulator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// The time between vehicle spawns in ms.
    pub spawn_interval_ms: u64,
    /// The time between a vehicle's motion updates in ms.
    pub tick_interval_ms: u64,
    /// The fraction of its lane a vehicle travels per tick.
    pub speed_increment: f64,
    /// How near a signal must be for a vehicle to obey it.
    pub signal_proximity: Proximity,
    /// How near a leading vehicle must be for a vehicle to wait behind it.
    pub vehicle_proximity: Proximity,
    /// Seeds the lane choice of the spawner. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 2000,
            tick_interval_ms: 30,
            speed_increment: 0.002,
            signal_proximity: Proximity::haversine(10.0),
            vehicle_proximity: Proximity::planar(0.0001),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads settings from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The time between vehicle spawns. Never zero.
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms.max(1))
    }

    /// The time between a vehicle's motion updates. Never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
