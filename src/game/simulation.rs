//! The per-tick simulation loop.
//!
//! [`Simulation`] owns the grid, the barrier, every agent and the fallback
//! RNG. Nothing else holds simulation state.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::error::ConfigError;
use crate::game::agent::{Agent, Role, TickContext};
use crate::game::arena::Arena;
use crate::game::barrier::Barrier;
use crate::game::config::SimulationConfig;
use crate::gp::TrainedPath;
use crate::grid::{Grid, Position};

/// Summary of one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Hits that changed the barrier's counter this tick.
    pub hits: u32,
    /// True if the barrier broke this tick.
    pub breached: bool,
    /// Roles that escaped this tick, in agent order.
    pub escaped: Vec<Role>,
}

/// Simulation context: grid, barrier and agents, advanced one tick at a time.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    barrier: Barrier,
    agents: Vec<Agent>,
    rng: SmallRng,
    ticks: u64,
}

impl Simulation {
    /// Build a simulation with one contained agent per spawn.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(
        grid: Grid,
        barrier: Barrier,
        spawns: &[(Role, Position)],
        config: SimulationConfig,
        trained: Option<&TrainedPath>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let agents = spawns
            .iter()
            .map(|&(role, tile)| Agent::new(role, tile, config.tile_size, role.strategy(&config, trained)))
            .collect();
        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            config,
            grid,
            barrier,
            agents,
            ticks: 0,
        })
    }

    /// Build a simulation for an arena's grid, barrier and agent starts.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn from_arena(
        arena: &Arena,
        config: SimulationConfig,
        trained: Option<&TrainedPath>,
    ) -> Result<Self, ConfigError> {
        let barrier = arena.new_barrier(config.flicker_ticks);
        Self::new(arena.grid.clone(), barrier, &arena.spawns(), config, trained)
    }

    /// Advance every agent, then the barrier, by one tick.
    ///
    /// Agents update in order, all reading the barrier as it was when the
    /// tick began; their hits and escapes are applied afterwards, so the
    /// result does not depend on agent order.
    pub fn tick(&mut self, targets: [Position; 2]) -> TickReport {
        self.ticks += 1;
        let mut hits = 0;
        let mut escaped = Vec::new();

        let mut ctx = TickContext {
            config: &self.config,
            grid: &self.grid,
            barrier: &self.barrier,
            targets,
            rng: &mut self.rng,
        };
        for agent in &mut self.agents {
            let outcome = agent.update(&mut ctx);
            if outcome.hit {
                hits += 1;
            }
            if outcome.escaped {
                escaped.push(agent.role());
            }
        }

        self.barrier.tick();
        let hits_before = self.barrier.hits();
        let was_breached = self.barrier.is_breached();
        for _ in 0..hits {
            self.barrier.hit();
        }
        for _ in &escaped {
            self.barrier.record_escape();
        }

        TickReport {
            tick: self.ticks,
            hits: self.barrier.hits() - hits_before,
            breached: !was_breached && self.barrier.is_breached(),
            escaped,
        }
    }

    /// Swap in a regenerated maze between ticks.
    ///
    /// Every agent is placed exactly on the nearest open tile to where it
    /// stood and loses any step in progress.
    pub fn replace_grid(&mut self, grid: Grid) {
        let ts = self.config.tile_size;
        for agent in &mut self.agents {
            let here = agent.tile(ts);
            let tile = grid.nearest_open(here).unwrap_or(here);
            agent.place(tile, ts);
        }
        self.grid = grid;
        tracing::debug!(agents = self.agents.len(), "maze replaced, agents re-seated");
    }

    /// Agents in spawn order.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The barrier.
    #[must_use]
    pub const fn barrier(&self) -> &Barrier {
        &self.barrier
    }

    /// The current maze.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks advanced so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once every agent has escaped.
    #[must_use]
    pub fn all_escaped(&self) -> bool {
        self.agents.iter().all(Agent::is_escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Walkable};

    fn builtin() -> (Arena, Simulation) {
        let arena = Arena::builtin().unwrap();
        let sim = Simulation::from_arena(&arena, SimulationConfig::default(), None).unwrap();
        (arena, sim)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let arena = Arena::builtin().unwrap();
        let config = SimulationConfig {
            speed: 0.0,
            ..SimulationConfig::default()
        };
        assert!(Simulation::from_arena(&arena, config, None).is_err());
    }

    #[test]
    fn test_breach_takes_exactly_two_hits() {
        let (arena, mut sim) = builtin();
        let mut breach_ticks = Vec::new();
        let mut total_hits = 0;
        for _ in 0..200 {
            let report = sim.tick(arena.player_starts);
            total_hits += report.hits;
            if report.breached {
                breach_ticks.push(report.tick);
            }
        }
        assert_eq!(breach_ticks.len(), 1);
        assert_eq!(total_hits, 2);
        assert_eq!(sim.barrier().hits(), 2);
    }

    #[test]
    fn test_every_agent_escapes_once() {
        let (arena, mut sim) = builtin();
        let mut escapes = Vec::new();
        for _ in 0..300 {
            escapes.extend(sim.tick(arena.player_starts).escaped);
        }
        assert!(sim.all_escaped());
        assert_eq!(escapes.len(), 4);
        assert_eq!(sim.barrier().escaped_count(), 4);
        for role in Role::ALL {
            assert!(escapes.contains(&role));
        }
    }

    #[test]
    fn test_replace_grid_reseats_agents() {
        let (arena, mut sim) = builtin();
        for _ in 0..5 {
            sim.tick(arena.player_starts);
        }
        let mut grid = arena.grid.clone();
        let ts = sim.config().tile_size;
        let blocked: Vec<Position> = sim.agents().iter().map(|a| a.tile(ts)).collect();
        for &tile in &blocked {
            grid.set(tile, Cell::Wall);
        }
        sim.replace_grid(grid);

        for agent in sim.agents() {
            assert!(agent.is_aligned(ts));
            assert!(agent.step().is_none());
            assert!(sim.grid().is_open(agent.tile(ts)));
        }
    }

    #[test]
    fn test_seeded_runs_agree() {
        let (arena, mut a) = builtin();
        let (_, mut b) = builtin();
        for _ in 0..250 {
            assert_eq!(a.tick(arena.player_starts), b.tick(arena.player_starts));
        }
        let ts = a.config().tile_size;
        for (x, y) in a.agents().iter().zip(b.agents()) {
            assert_eq!(x.tile(ts), y.tile(ts));
        }
    }
}
