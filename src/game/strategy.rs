//! Pursuit strategies for escaped agents.
//!
//! Each agent owns one boxed [`Pursuit`], chosen once from its role when
//! the agent is built. A strategy is asked for a plan whenever its agent
//! stands exactly on a tile with no step in progress.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::gp::TrainedPath;
use crate::grid::{Direction, Grid, Position, Walkable};
use crate::search::{adversarial_move, astar, bfs};

/// Which of the two player-controlled entities a strategy chases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    /// Index 0 of the per-tick target pair.
    First,
    /// Index 1 of the per-tick target pair.
    Second,
}

impl PlayerSlot {
    const fn index(self) -> usize {
        match self {
            PlayerSlot::First => 0,
            PlayerSlot::Second => 1,
        }
    }
}

/// What an agent should do from its current tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Glide to this adjacent tile at the agent's speed.
    Step(Position),
    /// Jump straight onto this tile this tick.
    Snap(Position),
    /// Stay put.
    Hold,
}

/// Inputs available to a strategy during planning.
#[derive(Debug)]
pub struct PlanContext<'a> {
    /// Current maze.
    pub grid: &'a Grid,
    /// Tile positions of the two players, in fixed order.
    pub targets: [Position; 2],
    /// Source of randomness for fallback movement.
    pub rng: &'a mut SmallRng,
}

impl PlanContext<'_> {
    fn target(&self, slot: PlayerSlot) -> Position {
        self.targets[slot.index()]
    }
}

/// A movement policy for an escaped agent.
pub trait Pursuit: std::fmt::Debug {
    /// Short label for logs and reports.
    fn name(&self) -> &'static str;

    /// Decide the next move from `from`.
    fn plan(&mut self, from: Position, ctx: &mut PlanContext<'_>) -> Plan;
}

/// Follow the first step of a breadth-first path to a player.
#[derive(Debug, Clone, Copy)]
pub struct BfsPursuit {
    slot: PlayerSlot,
}

impl BfsPursuit {
    /// Chase the player in `slot`.
    #[must_use]
    pub const fn new(slot: PlayerSlot) -> Self {
        Self { slot }
    }
}

impl Pursuit for BfsPursuit {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn plan(&mut self, from: Position, ctx: &mut PlanContext<'_>) -> Plan {
        let path = bfs(from, ctx.target(self.slot), ctx.grid);
        tracing::trace!(%from, ?path, "bfs plan");
        path.first().map_or(Plan::Hold, |&next| Plan::Step(next))
    }
}

/// Follow the first step of an A* path to a player.
#[derive(Debug, Clone, Copy)]
pub struct AStarPursuit {
    slot: PlayerSlot,
}

impl AStarPursuit {
    /// Chase the player in `slot`.
    #[must_use]
    pub const fn new(slot: PlayerSlot) -> Self {
        Self { slot }
    }
}

impl Pursuit for AStarPursuit {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn plan(&mut self, from: Position, ctx: &mut PlanContext<'_>) -> Plan {
        let path = astar(from, ctx.target(self.slot), ctx.grid);
        tracing::trace!(%from, ?path, "astar plan");
        path.first().map_or(Plan::Hold, |&next| Plan::Step(next))
    }
}

/// Jump one tile per plan to the minimax-best neighbor.
#[derive(Debug, Clone, Copy)]
pub struct AdversarialPursuit {
    slot: PlayerSlot,
    depth: u32,
}

impl AdversarialPursuit {
    /// Chase the player in `slot`, searching `depth` plies.
    #[must_use]
    pub const fn new(slot: PlayerSlot, depth: u32) -> Self {
        Self { slot, depth }
    }
}

impl Pursuit for AdversarialPursuit {
    fn name(&self) -> &'static str {
        "adversarial"
    }

    fn plan(&mut self, from: Position, ctx: &mut PlanContext<'_>) -> Plan {
        let next = adversarial_move(from, ctx.target(self.slot), ctx.grid, self.depth);
        if next == from { Plan::Hold } else { Plan::Snap(next) }
    }
}

/// Step to a random open neighbor, trying directions in shuffled order.
///
/// Holds when every neighbor is blocked.
pub fn random_step<W: Walkable + ?Sized>(from: Position, grid: &W, rng: &mut SmallRng) -> Plan {
    let mut order = Direction::SEARCH_ORDER;
    order.shuffle(rng);
    order
        .into_iter()
        .map(|dir| from.step(dir))
        .find(|&next| grid.is_open(next))
        .map_or(Plan::Hold, Plan::Step)
}

/// Most steps a replaying agent spends walking back to its next waypoint
/// before the replay is dropped.
pub const MAX_DETOUR: u32 = 32;

/// Replay a trained path, then wander at random.
///
/// A waypoint equal to the current tile is consumed without moving. An
/// open adjacent waypoint is consumed and stepped to. A waypoint further
/// away is walked to by breadth-first search, one step per plan, without
/// consuming it. The replay is dropped for random movement when the
/// waypoint is unreachable or the walk exceeds [`MAX_DETOUR`] steps.
#[derive(Debug, Clone)]
pub struct ReplaySequence {
    waypoints: Vec<Position>,
    cursor: usize,
    detour: u32,
    abandoned: bool,
}

impl ReplaySequence {
    /// Replay `trained`, or wander from the start when `None`.
    #[must_use]
    pub fn new(trained: Option<&TrainedPath>) -> Self {
        Self {
            waypoints: trained.map(|t| t.waypoints().to_vec()).unwrap_or_default(),
            cursor: 0,
            detour: 0,
            abandoned: false,
        }
    }

    /// Waypoints not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.cursor)
    }

    /// True if the replay was dropped because the agent could not get back
    /// onto the trajectory.
    #[must_use]
    pub const fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    fn consume(&mut self) {
        self.cursor += 1;
        self.detour = 0;
    }
}

impl Pursuit for ReplaySequence {
    fn name(&self) -> &'static str {
        if self.remaining() > 0 { "replay" } else { "random" }
    }

    fn plan(&mut self, from: Position, ctx: &mut PlanContext<'_>) -> Plan {
        let Some(&waypoint) = self.waypoints.get(self.cursor) else {
            return random_step(from, ctx.grid, ctx.rng);
        };

        if waypoint == from {
            self.consume();
            return Plan::Hold;
        }
        if from.is_adjacent(waypoint) && ctx.grid.is_open(waypoint) {
            self.consume();
            return Plan::Step(waypoint);
        }
        let detour_step = if self.detour < MAX_DETOUR {
            bfs(from, waypoint, ctx.grid).first().copied()
        } else {
            None
        };
        if let Some(next) = detour_step {
            self.detour += 1;
            tracing::trace!(%from, %waypoint, detour = self.detour, "walking back to trained path");
            return Plan::Step(next);
        }

        tracing::warn!(
            %from,
            %waypoint,
            index = self.cursor,
            "agent cannot rejoin its trained path, switching to random movement"
        );
        self.cursor = self.waypoints.len();
        self.abandoned = true;
        random_step(from, ctx.grid, ctx.rng)
    }
}
