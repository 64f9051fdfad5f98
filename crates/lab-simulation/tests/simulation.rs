use lab_simulation::{EventKind, ExperimentKind, RenderSnapshot, Simulation, SimulationConfig};

const FRAME_MS: f64 = 16.0;

fn simulation(kind: ExperimentKind, seed: u64) -> Simulation {
    Simulation::for_kind(kind, SimulationConfig::default().with_seed(seed))
}

/// Tick `frames` frames starting at `start`; returns every snapshot
fn run(sim: &mut Simulation, start: u64, frames: u64) -> Vec<RenderSnapshot> {
    (start..start + frames)
        .map(|frame| sim.tick(frame as f64 * FRAME_MS).clone())
        .collect()
}

fn count(snapshots: &[RenderSnapshot], kind: EventKind) -> usize {
    snapshots
        .iter()
        .flat_map(|s| &s.events)
        .filter(|e| e.kind == kind)
        .count()
}

// ==================================================================================
// Determinism
// ==================================================================================

#[test]
fn same_seed_same_run() {
    let mut a = simulation(ExperimentKind::FranckHertz, 7);
    let mut b = simulation(ExperimentKind::FranckHertz, 7);
    assert_eq!(run(&mut a, 0, 300), run(&mut b, 0, 300));
}

#[test]
fn different_seed_different_run() {
    let mut a = simulation(ExperimentKind::FranckHertz, 7);
    let mut b = simulation(ExperimentKind::FranckHertz, 8);
    assert_ne!(run(&mut a, 0, 300), run(&mut b, 0, 300));
}

#[test]
fn reset_replays_identically() {
    let mut sim = simulation(ExperimentKind::Millikan, 3);
    sim.set_parameter("spray_rate", 5.0).unwrap();
    let first = run(&mut sim, 0, 200);

    sim.reset();
    sim.set_parameter("spray_rate", 5.0).unwrap();
    let second = run(&mut sim, 0, 200);
    assert_eq!(first, second);
}

// ==================================================================================
// Invariants
// ==================================================================================

#[test]
fn particles_stay_finite_and_active() {
    for kind in ExperimentKind::ALL {
        let mut sim = simulation(kind, 1);
        for frame in 0..500u64 {
            if frame % 20 == 0 {
                sim.fire_once();
            }
            sim.tick(frame as f64 * FRAME_MS);
            for p in sim.particles() {
                assert!(p.is_active(), "{kind}: inactive particle in pool");
                assert!(p.is_finite(), "{kind}: non-finite particle");
                assert!(sim.experiment().bounds().contains(p.position), "{kind}: out of bounds");
            }
            assert!(sim.measurement().is_finite());
        }
    }
}

#[test]
fn pool_respects_capacity() {
    let config = SimulationConfig::default().with_max_particles(10);
    let mut sim = Simulation::for_kind(ExperimentKind::Millikan, config);
    // drops take tens of seconds to fall without a field
    sim.set_parameter("voltage", 0.0).unwrap();
    for frame in 0..200u64 {
        if frame < 3 {
            sim.fire_once();
        }
        let snapshot = sim.tick(frame as f64 * FRAME_MS);
        assert!(snapshot.particles.len() <= 10);
    }
    assert_eq!(sim.particles().len(), 10);
}

#[test]
fn long_pause_is_one_clamped_step() {
    let mut sim = simulation(ExperimentKind::Compton, 1);
    sim.tick(0.0);
    sim.fire_once();
    sim.tick(16.0);
    let before = sim.particles()[0].position.x;
    // tab hidden for a minute
    sim.tick(60_016.0);
    let after = sim.particles()[0].position.x;
    // 100 ms at 2 units/s
    assert!((after - before - 0.2).abs() < 1e-9, "{}", after - before);
}

#[test]
fn snapshot_bytes_match_particles() {
    let mut sim = simulation(ExperimentKind::Malus, 1);
    let snapshots = run(&mut sim, 0, 100);
    let last = snapshots.last().unwrap();
    assert!(!last.particles.is_empty());
    assert_eq!(last.particle_bytes().len(), last.particles.len() * 16);
}

// ==================================================================================
// Experiments
// ==================================================================================

#[test]
fn red_light_on_copper_emits_nothing() {
    let mut sim = simulation(ExperimentKind::Photoelectric, 1);
    sim.set_parameter("wavelength", 700.0).unwrap();
    sim.set_parameter("metal", 4.0).unwrap();
    sim.set_parameter("intensity", 100.0).unwrap();

    let snapshots = run(&mut sim, 0, 1000);
    assert_eq!(count(&snapshots, EventKind::Emitted), 0);
    assert_eq!(count(&snapshots, EventKind::Detected), 0);
    assert!(sim.particles().is_empty());
    assert_eq!(sim.measurement(), 0.0);

    let last = snapshots.last().unwrap();
    assert_eq!(last.display_value("max_kinetic_energy"), Some(0.0));
}

#[test]
fn photocurrent_rises_and_decays() {
    let mut sim = simulation(ExperimentKind::Photoelectric, 2);
    sim.set_parameter("intensity", 100.0).unwrap();
    sim.set_parameter("voltage", 5.0).unwrap();

    let on = run(&mut sim, 0, 300);
    assert!(count(&on, EventKind::Detected) > 0);
    let peak = sim.measurement();
    assert!(peak > 10.0, "{peak}");

    sim.set_parameter("intensity", 0.0).unwrap();
    run(&mut sim, 300, 300);
    assert!(sim.measurement() < peak * 1e-3, "{}", sim.measurement());
}

#[test]
fn stopping_voltage_stops_current() {
    let mut sim = simulation(ExperimentKind::Photoelectric, 4);
    sim.set_parameter("intensity", 100.0).unwrap();
    // sodium at 400 nm stops at 0.82 V
    sim.set_parameter("voltage", -1.0).unwrap();
    let snapshots = run(&mut sim, 0, 400);
    assert!(count(&snapshots, EventKind::Emitted) > 0);
    assert!(count(&snapshots, EventKind::Absorbed) > 0);
    assert_eq!(count(&snapshots, EventKind::Detected), 0);
}

#[test]
fn compton_detector_sees_shifted_wavelength() {
    let mut sim = simulation(ExperimentKind::Compton, 1);
    sim.set_parameter("wavelength", 71.0).unwrap();
    sim.set_parameter("angle", 45.0).unwrap();
    sim.fire_once();

    let snapshots = run(&mut sim, 0, 120);
    assert_eq!(count(&snapshots, EventKind::Collision), 1);
    assert_eq!(count(&snapshots, EventKind::Detected), 1);

    let detected = snapshots
        .iter()
        .flat_map(|s| &s.events)
        .find(|e| e.kind == EventKind::Detected)
        .unwrap();
    assert!((detected.magnitude.unwrap() - 71.7117).abs() < 1e-3);
    assert!((sim.aggregator().instantaneous() - 71.7117).abs() < 1e-3);

    let last = snapshots.last().unwrap();
    assert!((last.display_value("shift").unwrap() - 0.7117).abs() < 1e-3);
    assert!((last.display_value("incident_energy").unwrap() - 17.4648).abs() < 1e-2);
}

#[test]
fn franck_hertz_model_current_dips() {
    let mut sim = simulation(ExperimentKind::FranckHertz, 1);
    sim.set_parameter("temperature", 180.0).unwrap();

    let mut current_at = |voltage: f64| {
        sim.set_parameter("voltage", voltage).unwrap();
        let t = sim.ticks() as f64 * FRAME_MS;
        sim.tick(t).display_value("model_current").unwrap()
    };

    for n in 1..=3 {
        let dip = n as f64 * 4.9 + 2.0;
        let at = current_at(dip);
        assert!(at < current_at(dip - 1.0), "dip {n}");
        assert!(at < current_at(dip + 1.0), "dip {n}");
    }
}

/// Anode hits over 16 s at peak dip strength
fn franck_hertz_detected(voltage: f64, retarding: f64) -> usize {
    let mut sim = simulation(ExperimentKind::FranckHertz, 9);
    sim.set_parameter("temperature", 180.0).unwrap();
    sim.set_parameter("emission", 100.0).unwrap();
    sim.set_parameter("retarding", retarding).unwrap();
    sim.set_parameter("voltage", voltage).unwrap();
    count(&run(&mut sim, 0, 1000), EventKind::Detected)
}

#[test]
fn franck_hertz_anode_current_dips() {
    for retarding in [1.5, 0.0] {
        for n in 1..=3 {
            let dip = n as f64 * 4.9 + 2.0;
            let at = franck_hertz_detected(dip, retarding);
            let below = franck_hertz_detected(dip - 1.0, retarding);
            let above = franck_hertz_detected(dip + 1.0, retarding);
            assert!(below > 500 && above > 500, "dip {n}: {below} {above}");
            assert!(at * 4 < below, "dip {n}, retarding {retarding}: {at} vs {below}");
            assert!(at * 4 < above, "dip {n}, retarding {retarding}: {at} vs {above}");
        }
    }
}

#[test]
fn franck_hertz_meter_follows_collisions() {
    let mut sim = simulation(ExperimentKind::FranckHertz, 9);
    sim.set_parameter("temperature", 180.0).unwrap();
    sim.set_parameter("emission", 100.0).unwrap();
    sim.set_parameter("voltage", 7.9).unwrap();
    run(&mut sim, 0, 1000);
    let off_dip = sim.measurement();

    sim.set_parameter("voltage", 6.9).unwrap();
    run(&mut sim, 1000, 1000);
    assert!(sim.measurement() < off_dip / 4.0, "{} vs {off_dip}", sim.measurement());
}

#[test]
fn franck_hertz_collisions_need_hot_tube() {
    let collisions = |temperature: f64| {
        let mut sim = simulation(ExperimentKind::FranckHertz, 5);
        sim.set_parameter("voltage", 20.0).unwrap();
        sim.set_parameter("temperature", temperature).unwrap();
        let snapshots = run(&mut sim, 0, 400);
        count(&snapshots, EventKind::Collision)
    };
    let hot = collisions(180.0);
    let cold = collisions(20.0);
    assert!(hot > 10, "{hot}");
    assert!(cold < hot / 10, "{cold} vs {hot}");
}

#[test]
fn millikan_measures_whole_charges() {
    let mut sim = simulation(ExperimentKind::Millikan, 11);
    sim.set_parameter("voltage", 100.0).unwrap();
    sim.set_parameter("spray_rate", 0.0).unwrap();
    for _ in 0..3 {
        sim.fire_once();
    }

    // drops fall ~0.1 mm/s from 4.5 mm; give them time to reach the reticle
    sim.set_parameter("radius", 2.0).unwrap();
    let snapshots = run(&mut sim, 0, 2500);

    let readings: Vec<f64> = snapshots
        .iter()
        .flat_map(|s| &s.events)
        .filter(|e| e.kind == EventKind::Detected)
        .filter_map(|e| e.magnitude)
        .collect();
    assert!(!readings.is_empty());
    for q in readings {
        assert!((q - q.round()).abs() < 1e-6, "{q}");
        assert!((1.0..=6.0).contains(&q.round()), "{q}");
    }
}

#[test]
fn michelson_samples_every_tick() {
    let mut sim = simulation(ExperimentKind::MichelsonMorley, 1);
    let snapshots = run(&mut sim, 0, 100);
    assert_eq!(count(&snapshots, EventKind::Sample), 100);
    assert!(sim.particles().is_empty());

    let expected = snapshots[0].display_value("expected_shift").unwrap();
    let history = sim.aggregator().history_len();
    assert!(history > 0 && history <= 32, "{history}");
    assert!(sim.measurement().abs() <= expected);

    sim.set_parameter("ether_speed", 0.0).unwrap();
    run(&mut sim, 100, 200);
    assert!(sim.measurement().abs() < 1e-6);
}

#[test]
fn double_slit_builds_up_hits() {
    let mut sim = simulation(ExperimentKind::DoubleSlit, 1);
    let snapshots = run(&mut sim, 0, 300);
    let hits = count(&snapshots, EventKind::Detected);
    assert!(hits > 100, "{hits}");
    let last = snapshots.last().unwrap();
    assert!((last.display_value("fringe_spacing").unwrap() - 5.5).abs() < 1e-9);
}

#[test]
fn malus_crossed_polarizer_blocks_everything() {
    let mut sim = simulation(ExperimentKind::Malus, 1);
    sim.set_parameter("angle", 90.0).unwrap();
    let snapshots = run(&mut sim, 0, 300);
    assert!(count(&snapshots, EventKind::Absorbed) > 0);
    assert_eq!(count(&snapshots, EventKind::Detected), 0);
}
