use crate::config::{ConfigError, Network, SimulationConfig};
use crate::lane::Lane;
use crate::light::TrafficLight;
use crate::math::{find_intersections, Intersection, LatLng};
use crate::observer::Observer;
use crate::snapshot::Snapshot;
use crate::timer::{Task, TimerQueue};
use crate::vehicle::Vehicle;
use crate::{LaneId, LaneSet, SignalId, SignalSet, VehicleId, VehicleSet};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

/// A traffic simulation.
pub struct Simulation {
    /// The tuning knobs.
    config: SimulationConfig,
    /// The lanes in the network.
    lanes: LaneSet,
    /// The lanes in the order they were added.
    lane_order: Vec<LaneId>,
    /// The traffic signals.
    lights: SignalSet,
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// The number of vehicles spawned so far.
    spawned: u64,
    /// The crossings between lanes, as last computed.
    intersections: Vec<Intersection>,
    /// The virtual clock and pending timers.
    timers: TimerQueue,
    /// Chooses the lane of each spawned vehicle.
    rng: StdRng,
    /// Whether the timers have been started.
    started: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    /// Creates a new, empty simulation.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            lanes: Default::default(),
            lane_order: vec![],
            lights: Default::default(),
            vehicles: Default::default(),
            spawned: 0,
            intersections: vec![],
            timers: Default::default(),
            rng,
            started: false,
        }
    }

    /// Builds a simulation from a network configuration.
    ///
    /// Lanes with fewer than two points are skipped. Signals are placed at their
    /// configured locations or at the computed crossings, see [Network::place_signals].
    pub fn from_network(config: SimulationConfig, network: &Network, observer: &mut impl Observer) -> Self {
        let mut sim = Self::new(config);

        for (idx, points) in network.lanes.iter().enumerate() {
            if let Err(err) = sim.add_lane(points) {
                log::warn!("skipping lane {idx}: {err}");
            }
        }
        observer.on_lanes_ready(&sim.iter_lanes().collect::<Vec<_>>());

        let points = sim.compute_intersections().iter().map(|i| i.point).collect::<Vec<_>>();
        observer.on_intersections_computed(&points);

        for light in network.place_signals(&points) {
            let id = sim.add_traffic_light(light);
            observer.on_signal_placed(id, &sim.lights[id]);
        }

        log::info!(
            "network ready: {} lanes, {} crossings, {} signals",
            sim.lanes.len(),
            sim.intersections.len(),
            sim.lights.len()
        );
        sim
    }

    /// Adds a lane to the network.
    pub fn add_lane(&mut self, points: &[LatLng]) -> Result<LaneId, ConfigError> {
        Lane::validate(points)?;
        let id = self.lanes.insert_with_key(|id| Lane::new(id, points));
        self.lane_order.push(id);
        Ok(id)
    }

    /// Computes the crossings between every pair of lanes, in the order the lanes were added.
    pub fn compute_intersections(&mut self) -> &[Intersection] {
        let segments = self
            .lane_order
            .iter()
            .map(|id| self.lanes[*id].segment())
            .collect::<Vec<_>>();
        self.intersections = find_intersections(&segments);
        &self.intersections
    }

    /// Adds a traffic signal to the simulation.
    ///
    /// If the simulation is already running, the signal's first transition is
    /// due once its current phase has elapsed from now.
    pub fn add_traffic_light(&mut self, light: TrafficLight) -> SignalId {
        let after = light.current_duration();
        let id = self.lights.insert(light);
        if self.started {
            self.timers.schedule(after, Task::Signal(id));
        }
        id
    }

    /// Starts the signal timers and the spawner. Does nothing if already started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for (id, light) in &self.lights {
            self.timers.schedule(light.current_duration(), Task::Signal(id));
        }
        self.timers.schedule(self.config.spawn_interval(), Task::Spawn);
    }

    /// Advances the simulation by `dt`, firing every timer that falls due on the way
    /// at its own deadline. Starts the simulation first if needed.
    pub fn advance(&mut self, dt: Duration, observer: &mut impl Observer) {
        self.start();
        let until = self.timers.now() + dt;
        while let Some(task) = self.timers.pop_due(until) {
            match task {
                Task::Spawn => self.spawn(observer),
                Task::Signal(id) => self.tick_light(id, observer),
                Task::Vehicle(id) => self.tick_vehicle(id, observer),
            }
        }
        self.timers.settle(until);
    }

    /// Places a vehicle at the start of the given lane.
    /// Its first tick is due one tick interval from now.
    pub fn spawn_vehicle(&mut self, lane: LaneId, observer: &mut impl Observer) -> Option<VehicleId> {
        let lane = self.lanes.get(lane)?;
        let serial = self.spawned;
        self.spawned += 1;
        let id = self.vehicles.insert_with_key(|id| Vehicle::new(id, serial, lane));
        let position = lane.start();
        self.timers.schedule(self.config.tick_interval(), Task::Vehicle(id));
        log::debug!("vehicle {id:?} spawned on lane {:?}", lane.id());
        observer.on_vehicle_spawned(id, lane.id(), position);
        Some(id)
    }

    /// Gets the time elapsed since the simulation started.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Gets the tuning knobs.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns an iterator over the lanes, in the order they were added.
    pub fn iter_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lane_order.iter().map(|id| &self.lanes[*id])
    }

    /// Returns an iterator over all the vehicles in the simulation.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Returns an iterator over all the traffic signals in the simulation.
    pub fn iter_lights(&self) -> impl Iterator<Item = (SignalId, &TrafficLight)> {
        self.lights.iter()
    }

    /// Gets the crossings found by the last call to [Self::compute_intersections].
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Gets a reference to the lane with the given ID.
    pub fn get_lane(&self, lane_id: LaneId) -> Option<&Lane> {
        self.lanes.get(lane_id)
    }

    /// Gets a reference to the vehicle with the given ID, if it is still live.
    pub fn get_vehicle(&self, vehicle_id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    /// Gets a reference to the traffic signal with the given ID.
    pub fn get_light(&self, signal_id: SignalId) -> Option<&TrafficLight> {
        self.lights.get(signal_id)
    }

    /// Captures the current signal phases and vehicle positions.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.now(), self.lights.iter(), self.vehicles.values())
    }

    /// Spawns a vehicle on a random lane and schedules the next spawn.
    fn spawn(&mut self, observer: &mut impl Observer) {
        self.timers.schedule(self.config.spawn_interval(), Task::Spawn);
        match self.lane_order.choose(&mut self.rng).copied() {
            Some(lane) => {
                self.spawn_vehicle(lane, observer);
            }
            None => log::debug!("no lanes to spawn on"),
        }
    }

    /// Moves a signal to its next phase and schedules the following transition.
    fn tick_light(&mut self, id: SignalId, observer: &mut impl Observer) {
        let Some(light) = self.lights.get_mut(id) else {
            return;
        };
        let phase = light.advance();
        self.timers.schedule(light.current_duration(), Task::Signal(id));
        log::trace!("signal {} is now {phase:?}", light.name());
        observer.on_signal_phase_changed(id, phase);
    }

    /// Determines whether a vehicle must wait, then moves it along its lane.
    /// A vehicle reaching the end of its lane is removed and not ticked again.
    fn tick_vehicle(&mut self, id: VehicleId, observer: &mut impl Observer) {
        let Some(vehicle) = self.vehicles.get(id) else {
            return;
        };
        let stopped = self.held_by_signal(vehicle) || self.held_by_leader(vehicle);

        let vehicle = &mut self.vehicles[id];
        vehicle.set_stopped(stopped);
        if stopped {
            self.timers.schedule(self.config.tick_interval(), Task::Vehicle(id));
            return;
        }

        let lane = &self.lanes[vehicle.lane_id()];
        if vehicle.advance(lane, self.config.speed_increment) {
            self.vehicles.remove(id);
            log::debug!("vehicle {id:?} reached the end of its lane");
            observer.on_vehicle_removed(id);
        } else {
            let position = vehicle.position();
            self.timers.schedule(self.config.tick_interval(), Task::Vehicle(id));
            observer.on_vehicle_position_changed(id, position);
        }
    }

    /// Checks whether the signal nearest to the vehicle is close and showing red or amber.
    fn held_by_signal(&self, vehicle: &Vehicle) -> bool {
        let proximity = &self.config.signal_proximity;
        self.lights
            .values()
            .map(|light| (light, proximity.distance(vehicle.position(), light.position())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(false, |(light, dist)| proximity.admits(dist) && light.phase().is_stop())
    }

    /// Checks whether the nearest vehicle ahead on the same lane is close enough to wait behind.
    /// Vehicles on other lanes never hold each other up, even where they pass close by.
    fn held_by_leader(&self, vehicle: &Vehicle) -> bool {
        let proximity = &self.config.vehicle_proximity;
        self.vehicles
            .values()
            .filter(|other| other.id() != vehicle.id())
            .filter(|other| vehicle.is_behind(other))
            .map(|other| proximity.distance(vehicle.position(), other.position()))
            .min_by(f64::total_cmp)
            .map_or(false, |dist| proximity.admits(dist))
    }
}
