//! End-to-end scenarios on hand-built boards.

use colony_core::{Percept, Policy, SimConfig, Simulation};
use colony_events::{EventType, ObjectKind, Position};

fn board(size: usize, policy: Policy, seed: u64) -> Simulation {
    let mut config = SimConfig::default();
    config.grid.width = size;
    config.grid.height = size;
    config.behavior.policy = policy;
    Simulation::empty(config, seed).unwrap()
}

#[test]
fn test_first_perception_fills_memory() {
    let mut sim = board(5, Policy::Basic, 0);
    let start = Position::new(1, 1);
    sim.place_object(ObjectKind::A, start).unwrap();
    sim.place_object(ObjectKind::B, Position::new(3, 3)).unwrap();
    let id = sim.spawn_agent(start).unwrap();

    sim.tick().unwrap();
    let memory: Vec<Percept> = sim.agent(id).unwrap().memory.iter().copied().collect();
    assert_eq!(memory, vec![Percept::Object(ObjectKind::A)]);
}

#[test]
fn test_first_pick_up_is_rare() {
    let trials = 20_000u64;
    let mut picked = 0usize;
    for seed in 0..trials {
        let mut sim = board(5, Policy::Basic, seed);
        let start = Position::new(2, 2);
        sim.place_object(ObjectKind::A, start).unwrap();
        sim.place_object(ObjectKind::B, Position::new(0, 4)).unwrap();
        let id = sim.spawn_agent(start).unwrap();
        sim.tick().unwrap();
        if sim.agent(id).unwrap().carried == Some(ObjectKind::A) {
            picked += 1;
        }
    }
    let observed = picked as f64 / trials as f64;
    let expected = (0.1f64 / 1.1).powi(2);
    assert!(picked > 0);
    assert!((observed - expected).abs() < 0.003, "observed {}", observed);
}

#[test]
fn test_heavy_object_starts_waiting() {
    let mut sim = board(7, Policy::Cooperative, 0);
    let origin = Position::new(3, 3);
    sim.place_object(ObjectKind::C, origin).unwrap();
    let id = sim.spawn_agent(origin).unwrap();

    sim.tick().unwrap();
    let agent = sim.agent(id).unwrap();
    assert!(agent.waiting);
    assert_eq!(agent.position, origin);

    let marker = sim.markers().get(agent.pheromone.unwrap()).unwrap();
    assert_eq!(marker.strength, 100);
    assert_eq!(marker.cells.len(), 24);
    assert!(!marker.cells.contains(&origin));
    assert!(marker.cells.iter().all(|c| c.chebyshev(origin) <= 2));

    let snapshot = sim.snapshot();
    assert!(!snapshot.cell(origin).unwrap().has_marker());
    assert_eq!(snapshot.cells.iter().filter(|c| c.has_marker()).count(), 24);
}

#[test]
fn test_marker_at_distance_two_links() {
    let mut sim = board(7, Policy::Cooperative, 0);
    let origin = Position::new(3, 3);
    sim.place_object(ObjectKind::C, origin).unwrap();
    let waiter = sim.spawn_agent(origin).unwrap();
    let helper = sim.spawn_agent(Position::new(1, 3)).unwrap();

    sim.tick().unwrap();
    let helper_state = sim.agent(helper).unwrap();
    assert_eq!(helper_state.linked, Some(waiter));
    assert_eq!(helper_state.position, origin);
    assert_eq!(sim.agent(waiter).unwrap().pheromone, None);
    assert!(sim.markers().is_empty());

    let linked: Vec<_> = sim
        .events()
        .iter()
        .filter(|e| e.event_type() == EventType::Linked)
        .collect();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].agent, helper);
}

#[test]
fn test_marker_decays_then_resolves() {
    let mut gave_up = 0;
    let mut refreshed = 0;
    for seed in 0..40 {
        let mut sim = board(5, Policy::Cooperative, seed);
        let origin = Position::new(2, 2);
        sim.place_object(ObjectKind::C, origin).unwrap();
        let id = sim.spawn_agent(origin).unwrap();

        sim.tick().unwrap();
        let first = sim.agent(id).unwrap().pheromone.unwrap();
        for tick in 2..=100u32 {
            sim.tick().unwrap();
            let agent = sim.agent(id).unwrap();
            assert!(agent.waiting);
            assert_eq!(agent.pheromone, Some(first));
            assert_eq!(sim.markers().get(first).unwrap().strength, 101 - tick);
        }

        sim.drain_events();
        sim.tick().unwrap();
        assert!(sim.markers().get(first).is_none());
        let agent = sim.agent(id).unwrap();
        match sim.events()[0].event_type() {
            EventType::GaveUp => {
                gave_up += 1;
                assert!(!agent.waiting);
                assert_eq!(agent.pheromone, None);
                assert!(sim.markers().is_empty());
                assert_ne!(agent.position, origin);
            }
            EventType::MarkerRefreshed => {
                refreshed += 1;
                assert!(agent.waiting);
                let fresh = agent.pheromone.unwrap();
                assert_ne!(fresh, first);
                assert_eq!(sim.markers().get(fresh).unwrap().strength, 100);
                assert_eq!(sim.markers().len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert!(gave_up > 0 && refreshed > 0, "{} / {}", gave_up, refreshed);
}

#[test]
fn test_pair_moves_rigidly_until_release() {
    let mut sim = board(21, Policy::Cooperative, 3);
    let origin = Position::new(10, 10);
    sim.place_object(ObjectKind::C, origin).unwrap();
    let follower = sim.spawn_agent(origin).unwrap();
    let leader = sim.spawn_agent(Position::new(10, 12)).unwrap();

    sim.tick().unwrap();
    assert_eq!(sim.agent(leader).unwrap().linked, Some(follower));

    sim.tick().unwrap();
    assert_eq!(sim.agent(leader).unwrap().carried, Some(ObjectKind::C));

    let mut released = false;
    for _ in 0..200 {
        let (l, f) = (sim.agent(leader).unwrap(), sim.agent(follower).unwrap());
        if l.linked.is_none() {
            assert!(f.linked.is_none());
            assert!(!f.waiting);
            released = true;
            break;
        }
        assert_eq!(l.position, f.position);
        assert!(f.waiting);
        sim.tick().unwrap();
    }
    assert!(released);
    assert_eq!(sim.snapshot().count_objects(ObjectKind::C), 1);
    assert!(sim.agents().iter().all(|a| a.carried.is_none()));
}

#[test]
fn test_tick_is_reproducible_from_same_state() {
    let mut config = SimConfig::default();
    config.grid.width = 15;
    config.grid.height = 15;
    config.population.objects_a = 40;
    config.population.objects_b = 40;
    config.population.objects_c = 10;
    config.population.agents = 20;
    let mut sim = Simulation::new(config, 8).unwrap();
    sim.run(25).unwrap();

    let mut first = sim.clone();
    let mut second = sim;
    first.tick().unwrap();
    second.tick().unwrap();
    assert_eq!(first.grid(), second.grid());
}

#[test]
fn test_shipped_tuning_file_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tuning.toml");
    let config = SimConfig::load(path).unwrap();
    assert_eq!(config, SimConfig::default());
}
