//! Tests of the per-signal phase timers.

use std::time::Duration;
use traffic_signal_sim::math::LatLng;
use traffic_signal_sim::{EventLog, Phase, PhaseDurations, Simulation, SimulationConfig, TrafficLight};

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn durations(red: f64, green: f64, amber: f64) -> PhaseDurations {
    PhaseDurations::from_millis(Some(red), Some(green), Some(amber))
}

fn quiet_sim() -> Simulation {
    Simulation::new(SimulationConfig {
        spawn_interval_ms: 1_000_000,
        seed: Some(1),
        ..Default::default()
    })
}

fn assert_cyclic(start: Phase, phases: &[Phase]) {
    let mut prev = start;
    for phase in phases {
        assert_eq!(*phase, prev.next(), "phase skipped after {prev:?}");
        prev = *phase;
    }
}

#[test]
fn phases_change_on_schedule() {
    let mut sim = quiet_sim();
    let light = sim.add_traffic_light(TrafficLight::new(
        "1",
        LatLng::default(),
        Phase::Red,
        durations(1000.0, 2000.0, 500.0),
    ));
    let mut log = EventLog::new();

    let phase_at = |sim: &mut Simulation, log: &mut EventLog, t: u64| {
        sim.advance(ms(t) - sim.now(), log);
        sim.get_light(light).unwrap().phase()
    };

    assert_eq!(phase_at(&mut sim, &mut log, 999), Phase::Red);
    assert_eq!(phase_at(&mut sim, &mut log, 1000), Phase::Green);
    assert_eq!(phase_at(&mut sim, &mut log, 2999), Phase::Green);
    assert_eq!(phase_at(&mut sim, &mut log, 3000), Phase::Amber);
    assert_eq!(phase_at(&mut sim, &mut log, 3499), Phase::Amber);
    assert_eq!(phase_at(&mut sim, &mut log, 3500), Phase::Red);
    assert_eq!(phase_at(&mut sim, &mut log, 4500), Phase::Green);

    assert_eq!(
        log.phases_of(light),
        vec![Phase::Green, Phase::Amber, Phase::Red, Phase::Green]
    );
}

#[test]
fn cycle_repeats_without_skipping() {
    let mut sim = quiet_sim();
    let light = sim.add_traffic_light(TrafficLight::new(
        "1",
        LatLng::default(),
        Phase::Red,
        durations(1000.0, 2000.0, 500.0),
    ));
    let mut log = EventLog::new();
    // Ten full cycles of 3.5 s, in uneven steps.
    for step in [7, 1300, 2, 9000, 24691] {
        sim.advance(ms(step), &mut log);
    }
    let phases = log.phases_of(light);
    assert_eq!(phases.len(), 30);
    assert_cyclic(Phase::Red, &phases);
}

#[test]
fn first_wait_uses_initial_phase() {
    let mut sim = quiet_sim();
    let light = sim.add_traffic_light(TrafficLight::new(
        "1",
        LatLng::default(),
        Phase::Green,
        durations(1000.0, 2000.0, 500.0),
    ));
    let mut log = EventLog::new();
    sim.advance(ms(1999), &mut log);
    assert!(log.phases_of(light).is_empty());
    sim.advance(ms(1), &mut log);
    assert_eq!(log.phases_of(light), vec![Phase::Amber]);
}

#[test]
fn zero_duration_is_an_immediate_transition() {
    let mut sim = quiet_sim();
    let light = sim.add_traffic_light(TrafficLight::new(
        "1",
        LatLng::default(),
        Phase::Red,
        PhaseDurations::from_millis(Some(1000.0), None, Some(500.0)),
    ));
    let mut log = EventLog::new();
    sim.advance(ms(1000), &mut log);
    assert_eq!(log.phases_of(light), vec![Phase::Green, Phase::Amber]);
    assert_eq!(sim.get_light(light).unwrap().phase(), Phase::Amber);
    sim.advance(ms(500), &mut log);
    assert_eq!(sim.get_light(light).unwrap().phase(), Phase::Red);
}

#[test]
fn signal_without_any_time_still_lets_time_pass() {
    let mut sim = quiet_sim();
    let light = sim.add_traffic_light(TrafficLight::new(
        "1",
        LatLng::default(),
        Phase::Red,
        PhaseDurations::from_millis(None, Some(0.0), Some(-10.0)),
    ));
    let mut log = EventLog::new();
    sim.advance(ms(10), &mut log);
    let phases = log.phases_of(light);
    assert_eq!(phases.len(), 10);
    assert_cyclic(Phase::Red, &phases);
    assert_eq!(sim.now(), ms(10));
}

#[test]
fn signals_run_independently() {
    let mut sim = quiet_sim();
    let fast = sim.add_traffic_light(TrafficLight::new(
        "fast",
        LatLng::default(),
        Phase::Red,
        durations(100.0, 100.0, 100.0),
    ));
    let slow = sim.add_traffic_light(TrafficLight::new(
        "slow",
        LatLng::new(1.0, 1.0),
        Phase::Amber,
        durations(1000.0, 1000.0, 250.0),
    ));
    let mut log = EventLog::new();
    sim.advance(ms(1250), &mut log);

    assert_eq!(log.phases_of(fast).len(), 12);
    assert_eq!(log.phases_of(slow), vec![Phase::Red, Phase::Green]);
    assert_cyclic(Phase::Red, &log.phases_of(fast));
}

#[test]
fn signal_added_while_running_starts_from_now() {
    let mut sim = quiet_sim();
    let mut log = EventLog::new();
    sim.advance(ms(5000), &mut log);
    let light = sim.add_traffic_light(TrafficLight::new(
        "late",
        LatLng::default(),
        Phase::Red,
        durations(1000.0, 2000.0, 500.0),
    ));
    sim.advance(ms(999), &mut log);
    assert!(log.phases_of(light).is_empty());
    sim.advance(ms(1), &mut log);
    assert_eq!(log.phases_of(light), vec![Phase::Green]);
}
