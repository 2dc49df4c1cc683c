use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use traffic_signal_sim::math::LatLng;
use traffic_signal_sim::{LaneId, Network, Observer, Phase, SignalId, Simulation, SimulationConfig, VehicleId};

/// Runs the traffic animation against the wall clock and logs what happens.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The lane file.
    #[arg(long, default_value = "data/lanes.json")]
    lanes: PathBuf,
    /// The signal file.
    #[arg(long, default_value = "data/duration_light.json")]
    signals: PathBuf,
    /// Optional simulation settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the spawner.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many seconds. Runs until interrupted when unset.
    #[arg(long)]
    duration: Option<f64>,
    /// Print a JSON snapshot at this interval, in seconds.
    #[arg(long)]
    snapshot_every: Option<f64>,
}

/// Forwards every update to the log.
struct LogObserver;

impl Observer for LogObserver {
    fn on_intersections_computed(&mut self, points: &[LatLng]) {
        log::info!("{} crossings", points.len());
    }

    fn on_signal_phase_changed(&mut self, id: SignalId, phase: Phase) {
        log::info!("signal {id:?} -> {phase:?}");
    }

    fn on_vehicle_spawned(&mut self, id: VehicleId, lane: LaneId, position: LatLng) {
        log::info!("vehicle {id:?} entered lane {lane:?} at ({}, {})", position.lat, position.lng);
    }

    fn on_vehicle_position_changed(&mut self, id: VehicleId, position: LatLng) {
        log::trace!("vehicle {id:?} at ({}, {})", position.lat, position.lng);
    }

    fn on_vehicle_removed(&mut self, id: VehicleId) {
        log::info!("vehicle {id:?} left");
    }
}

const FRAME: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let network = Network::load_or_empty(&args.lanes, &args.signals);
    let mut observer = LogObserver;
    let mut sim = Simulation::from_network(config, &network, &mut observer);
    sim.start();

    let stop_at = args
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --duration")?;
    let snapshot_every = args
        .snapshot_every
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --snapshot-every")?;
    let mut last_snapshot = Duration::ZERO;
    let mut last = Instant::now();
    loop {
        std::thread::sleep(FRAME);
        let now = Instant::now();
        sim.advance(now - last, &mut observer);
        last = now;

        if let Some(every) = snapshot_every {
            if sim.now() - last_snapshot >= every {
                last_snapshot = sim.now();
                println!("{}", sim.snapshot().to_json()?);
            }
        }
        if stop_at.is_some_and(|stop| sim.now() >= stop) {
            break;
        }
    }
    Ok(())
}
