//! Multi-tick integration tests for the ghost simulation.
//!
//! These tests run the built-in arena from spawn until every agent is loose
//! and check the gate and containment rules along the way.
//!
//! Run with: cargo test --release simulation_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use ghostgate::game::{AgentState, BarrierState, Phase};
use ghostgate::{Arena, Cell, Role, Simulation, SimulationConfig, Walkable};

fn builtin(seed: u64) -> (Arena, Simulation) {
    let arena = Arena::builtin().unwrap();
    let config = SimulationConfig {
        seed,
        ..SimulationConfig::default()
    };
    let sim = Simulation::from_arena(&arena, config, None).unwrap();
    (arena, sim)
}

#[test]
fn test_full_run_releases_every_agent() {
    let (arena, mut sim) = builtin(7);
    let mut breached_at = None;
    let mut escaped_at = Vec::new();

    for _ in 0..600 {
        let report = sim.tick(arena.player_starts);
        if report.breached {
            assert!(breached_at.is_none(), "barrier broke twice");
            breached_at = Some(report.tick);
        }
        for role in report.escaped {
            escaped_at.push((role, report.tick));
        }
    }

    let breached_at = breached_at.unwrap();
    assert_eq!(sim.barrier().state(), BarrierState::Breached);
    assert_eq!(sim.barrier().hits(), 2);
    assert_eq!(sim.barrier().escaped_count(), 4);
    assert!(sim.all_escaped());
    assert_eq!(escaped_at.len(), 4);
    for (_, tick) in &escaped_at {
        assert!(*tick > breached_at, "escape before the barrier broke");
    }
}

#[test]
fn test_contained_agents_never_back_away() {
    let (arena, mut sim) = builtin(0);
    let ts = sim.config().tile_size;
    let radius = sim.config().containment_radius;
    let limits: Vec<f32> = sim
        .agents()
        .iter()
        .map(|a| a.tile(ts).distance(arena.barrier).max(radius))
        .collect();

    for _ in 0..600 {
        sim.tick(arena.player_starts);
        for (agent, &limit) in sim.agents().iter().zip(&limits) {
            if agent.phase() == Phase::Contained {
                let d = agent.tile(ts).distance(arena.barrier);
                assert!(
                    d <= limit + 1e-3,
                    "{} wandered to {} ({d:.2} > {limit:.2})",
                    agent.role().name(),
                    agent.tile(ts)
                );
            }
        }
    }
}

#[test]
fn test_agents_report_breaching_after_gate_breaks() {
    let (arena, mut sim) = builtin(3);
    while !sim.barrier().is_breached() {
        sim.tick(arena.player_starts);
        assert!(sim.ticks() < 300, "barrier never broke");
    }
    for agent in sim.agents() {
        let state = agent.state(sim.barrier());
        if agent.is_escaped() {
            assert_eq!(state, AgentState::Escaped);
        } else {
            assert_eq!(state, AgentState::Breaching);
        }
    }
}

#[test]
fn test_escaped_agents_stay_out_of_cage() {
    let (arena, mut sim) = builtin(11);
    let ts = sim.config().tile_size;
    for _ in 0..600 {
        sim.tick(arena.player_starts);
        for agent in sim.agents().iter().filter(|a| a.is_escaped()) {
            let (cx, cy) = agent.center(ts);
            assert!(
                !sim.barrier().cage_contains(cx, cy, ts),
                "{} re-entered the cage",
                agent.role().name()
            );
        }
    }
}

#[test]
fn test_maze_regeneration_mid_run() {
    let (arena, mut sim) = builtin(5);
    for _ in 0..40 {
        sim.tick(arena.player_starts);
    }

    // Wall over escaped agents that are clear of the gate
    let ts = sim.config().tile_size;
    let mut grid = arena.grid.clone();
    let clear_of_gate = |tile: ghostgate::Position| tile.distance(arena.barrier) >= 3.0;
    for agent in sim.agents().iter().filter(|a| a.is_escaped()) {
        let tile = agent.tile(ts);
        if clear_of_gate(tile) {
            grid.set(tile, Cell::Wall);
        }
        if let Some(step) = agent.step().filter(|&s| clear_of_gate(s)) {
            grid.set(step, Cell::Wall);
        }
    }
    sim.replace_grid(grid);

    for _ in 0..200 {
        sim.tick(arena.player_starts);
        for agent in sim.agents().iter().filter(|a| a.is_escaped()) {
            if agent.is_aligned(ts) {
                assert!(sim.grid().is_open(agent.tile(ts)));
            }
        }
    }
}

#[test]
fn test_roles_keep_their_strategies() {
    let (_, sim) = builtin(0);
    let names: Vec<(Role, &str)> = sim
        .agents()
        .iter()
        .map(|a| (a.role(), a.strategy_name()))
        .collect();
    assert_eq!(
        names,
        vec![
            (Role::Pinky, "bfs"),
            (Role::Blinky, "astar"),
            (Role::Clyde, "adversarial"),
            (Role::Inky, "random"),
        ]
    );
}
