use crate::math::LatLng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// The phase duration used when a signal is configured with no time in any phase.
pub const MIN_PHASE: Duration = Duration::from_millis(1);

/// The state of a traffic signal.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Red,
    Green,
    Amber,
}

impl FromStr for Phase {
    type Err = UnknownPhase;

    /// Parses a phase name, ignoring case. `yellow` is accepted for amber.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Phase::Red),
            "green" => Ok(Phase::Green),
            "amber" | "yellow" => Ok(Phase::Amber),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

/// A phase name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signal phase `{0}`")]
pub struct UnknownPhase(pub String);

impl Phase {
    /// The phase that follows this one in the cycle.
    pub fn next(self) -> Self {
        use Phase::*;
        match self {
            Red => Green,
            Green => Amber,
            Amber => Red,
        }
    }

    /// Whether vehicles must stop at a signal in this phase.
    pub fn is_stop(self) -> bool {
        self != Phase::Green
    }
}

/// How long a signal remains in each phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseDurations {
    pub red: Duration,
    pub green: Duration,
    pub amber: Duration,
}

impl PhaseDurations {
    /// Creates a set of durations from millisecond values.
    ///
    /// Missing, negative or non-finite values are treated as zero,
    /// meaning the phase is left as soon as it is entered.
    pub fn from_millis(red: Option<f64>, green: Option<f64>, amber: Option<f64>) -> Self {
        let millis = |value: Option<f64>| match value {
            Some(ms) if ms.is_finite() && ms > 0.0 => Duration::from_micros((ms * 1000.0).round() as u64),
            _ => Duration::ZERO,
        };
        Self {
            red: millis(red),
            green: millis(green),
            amber: millis(amber),
        }
    }

    /// Gets the duration of a phase.
    pub fn get(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Red => self.red,
            Phase::Green => self.green,
            Phase::Amber => self.amber,
        }
    }

    /// The length of one full cycle.
    pub fn cycle(&self) -> Duration {
        self.red + self.green + self.amber
    }

    /// Whether some time passes over a full cycle.
    pub fn is_live(&self) -> bool {
        !self.cycle().is_zero()
    }
}

/// A traffic signal with its own phase cycle.
#[derive(Clone, Debug)]
pub struct TrafficLight {
    /// The external name of the signal.
    name: String,
    /// Where the signal stands.
    position: LatLng,
    /// The current phase.
    phase: Phase,
    /// The time spent in each phase.
    durations: PhaseDurations,
}

impl TrafficLight {
    /// Creates a new traffic signal.
    ///
    /// A signal whose durations add up to nothing would cycle forever without
    /// letting time pass, so each of its phases is given [MIN_PHASE] instead.
    pub fn new(name: impl Into<String>, position: LatLng, phase: Phase, durations: PhaseDurations) -> Self {
        let name = name.into();
        let durations = if durations.is_live() {
            durations
        } else {
            log::warn!("signal {name} has no phase time configured, using {MIN_PHASE:?} per phase");
            PhaseDurations {
                red: MIN_PHASE,
                green: MIN_PHASE,
                amber: MIN_PHASE,
            }
        };
        Self {
            name,
            position,
            phase,
            durations,
        }
    }

    /// Gets the external name of the signal.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the position of the signal.
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Gets the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Gets the durations of each phase.
    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// How long the signal stays in its current phase.
    pub fn current_duration(&self) -> Duration {
        self.durations.get(self.phase)
    }

    /// Moves the signal to the next phase in its cycle, returning the new phase.
    pub(crate) fn advance(&mut self) -> Phase {
        self.phase = self.phase.next();
        self.phase
    }
}
