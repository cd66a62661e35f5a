//! Agent state machine and movement.
//!
//! An agent is contained until it stands on the barrier tile while the
//! barrier is breached, then escapes for good and follows its role's
//! pursuit strategy. Movement is smooth for stepping strategies: the agent
//! commits to one adjacent tile at a tile boundary and glides there at a
//! fixed speed, snapping exactly onto the tile when close.

// Tile coordinates and sub-tile positions convert between i32 and f32
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]

use rand::rngs::SmallRng;
use serde::Serialize;

use crate::game::barrier::{Barrier, BarrierState};
use crate::game::config::SimulationConfig;
use crate::game::containment::ContainmentView;
use crate::game::strategy::{
    AStarPursuit, AdversarialPursuit, BfsPursuit, Plan, PlanContext, PlayerSlot, Pursuit,
    ReplaySequence,
};
use crate::gp::TrainedPath;
use crate::grid::{Cell, Direction, Grid, Position, Walkable};
use crate::search::bfs;

/// The four fixed agent identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Breadth-first pursuit of the first player.
    Pinky,
    /// A* pursuit of the second player.
    Blinky,
    /// Adversarial pursuit of the first player, moving a whole tile per tick.
    Clyde,
    /// Trained-path replay with a random-movement fallback.
    Inky,
}

impl Role {
    /// All roles, in layout-marker order (`1` to `4`).
    pub const ALL: [Role; 4] = [Role::Pinky, Role::Blinky, Role::Clyde, Role::Inky];

    /// Layout marker for this role's start tile.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Role::Pinky => '1',
            Role::Blinky => '2',
            Role::Clyde => '3',
            Role::Inky => '4',
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Pinky => "pinky",
            Role::Blinky => "blinky",
            Role::Clyde => "clyde",
            Role::Inky => "inky",
        }
    }

    /// Build this role's pursuit strategy.
    ///
    /// Only [`Role::Inky`] uses `trained`; without it, Inky moves randomly.
    #[must_use]
    pub fn strategy(self, config: &SimulationConfig, trained: Option<&TrainedPath>) -> Box<dyn Pursuit> {
        match self {
            Role::Pinky => Box::new(BfsPursuit::new(PlayerSlot::First)),
            Role::Blinky => Box::new(AStarPursuit::new(PlayerSlot::Second)),
            Role::Clyde => Box::new(AdversarialPursuit::new(PlayerSlot::First, config.adversarial_depth)),
            Role::Inky => Box::new(ReplaySequence::new(trained)),
        }
    }
}

/// Whether the agent is still behind the barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Confined near the barrier.
    Contained,
    /// Free to roam the maze. Terminal.
    Escaped,
}

/// Externally visible agent state.
///
/// `Breaching` is a contained agent whose barrier has already broken; it
/// moves exactly like a contained agent but no longer attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    /// Attacking the intact barrier.
    Contained,
    /// Heading for the broken barrier.
    Breaching,
    /// Roaming the maze.
    Escaped,
}

/// Shared, read-only inputs for one agent update.
#[derive(Debug)]
pub struct TickContext<'a> {
    /// Simulation tunables.
    pub config: &'a SimulationConfig,
    /// Current maze.
    pub grid: &'a Grid,
    /// Barrier as it was at the start of the tick.
    pub barrier: &'a Barrier,
    /// Player tile positions for this tick.
    pub targets: [Position; 2],
    /// Randomness for fallback movement.
    pub rng: &'a mut SmallRng,
}

/// What an agent did during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The agent struck the intact barrier.
    pub hit: bool,
    /// The agent left containment this tick.
    pub escaped: bool,
}

/// One autonomous agent.
#[derive(Debug)]
pub struct Agent {
    role: Role,
    phase: Phase,
    x: f32,
    y: f32,
    step: Option<Position>,
    facing: Direction,
    frame: u32,
    frame_counter: u32,
    strategy: Box<dyn Pursuit>,
}

impl Agent {
    /// Place a contained agent exactly on `tile`.
    #[must_use]
    pub fn new(role: Role, tile: Position, tile_size: f32, strategy: Box<dyn Pursuit>) -> Self {
        Self {
            role,
            phase: Phase::Contained,
            x: tile.x as f32 * tile_size,
            y: tile.y as f32 * tile_size,
            step: None,
            facing: Direction::Up,
            frame: 0,
            frame_counter: 0,
            strategy,
        }
    }

    /// The agent's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Containment phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the agent has left the cage.
    #[must_use]
    pub fn is_escaped(&self) -> bool {
        self.phase == Phase::Escaped
    }

    /// State machine view combining the phase with the barrier.
    #[must_use]
    pub const fn state(&self, barrier: &Barrier) -> AgentState {
        match (self.phase, barrier.state()) {
            (Phase::Escaped, _) => AgentState::Escaped,
            (Phase::Contained, BarrierState::Intact) => AgentState::Contained,
            (Phase::Contained, BarrierState::Breached) => AgentState::Breaching,
        }
    }

    /// Sub-tile position of the agent's top-left corner.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Sub-tile position of the agent's center.
    #[must_use]
    pub fn center(&self, tile_size: f32) -> (f32, f32) {
        (self.x + tile_size / 2.0, self.y + tile_size / 2.0)
    }

    /// The nearest tile.
    #[must_use]
    pub fn tile(&self, tile_size: f32) -> Position {
        Position::new(
            (self.x / tile_size).round() as i32,
            (self.y / tile_size).round() as i32,
        )
    }

    /// True if the agent sits exactly on a tile.
    #[must_use]
    pub fn is_aligned(&self, tile_size: f32) -> bool {
        let tile = self.tile(tile_size);
        self.x == tile.x as f32 * tile_size && self.y == tile.y as f32 * tile_size
    }

    /// The adjacent tile the agent is currently moving to, if any.
    #[must_use]
    pub const fn step(&self) -> Option<Position> {
        self.step
    }

    /// Facing used for animation.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Current animation frame.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Label of the pursuit strategy in use.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Put the agent exactly on `tile`, dropping any step in progress.
    pub fn place(&mut self, tile: Position, tile_size: f32) {
        self.x = tile.x as f32 * tile_size;
        self.y = tile.y as f32 * tile_size;
        self.step = None;
    }

    /// Advance the agent by one tick.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> TickOutcome {
        let outcome = match self.phase {
            Phase::Contained => self.update_contained(ctx),
            Phase::Escaped => {
                self.update_escaped(ctx);
                TickOutcome::default()
            }
        };
        self.animate(ctx.config);
        outcome
    }

    fn update_contained(&mut self, ctx: &TickContext<'_>) -> TickOutcome {
        let ts = ctx.config.tile_size;
        let barrier_tile = ctx.barrier.tile();

        if self.step.is_none() && self.is_aligned(ts) {
            let from = self.tile(ts);
            let view = ContainmentView::new(ctx.grid, barrier_tile, ctx.config.containment_radius, from);
            self.step = bfs(from, barrier_tile, &view).first().copied();
        }
        self.advance(ctx, |grid, tile| grid.get(tile).is_some_and(|c| c != Cell::Wall));

        let mut outcome = TickOutcome::default();
        if self.tile(ts) != barrier_tile {
            return outcome;
        }
        if ctx.barrier.is_breached() {
            self.phase = Phase::Escaped;
            outcome.escaped = true;
            tracing::info!(role = self.role.name(), tile = %barrier_tile, "agent escaped");
            self.keep_out_of_cage(ctx);
        } else {
            let (cx, cy) = self.center(ts);
            outcome.hit = ctx.barrier.hitbox_contains(cx, cy, ts, ctx.config.hitbox_margin);
        }
        outcome
    }

    fn update_escaped(&mut self, ctx: &mut TickContext<'_>) {
        let ts = ctx.config.tile_size;

        if self.step.is_none() && self.is_aligned(ts) {
            let from = self.tile(ts);
            let mut plan_ctx = PlanContext {
                grid: ctx.grid,
                targets: ctx.targets,
                rng: &mut *ctx.rng,
            };
            match self.strategy.plan(from, &mut plan_ctx) {
                Plan::Step(next) => self.step = Some(next),
                Plan::Snap(next) => {
                    let dx = (next.x - from.x) as f32;
                    let dy = (next.y - from.y) as f32;
                    if let Some(facing) = Direction::dominant(dx, dy) {
                        self.facing = facing;
                    }
                    self.place(next, ts);
                }
                Plan::Hold => {}
            }
        }
        self.advance(ctx, |grid, tile| grid.is_open(tile));
        self.keep_out_of_cage(ctx);
    }

    /// Move toward the committed step, or settle back onto the nearest
    /// usable tile if the agent is between tiles with nothing committed.
    ///
    /// A step that `passable` rejects (the grid changed underneath it) is
    /// dropped without moving.
    fn advance(&mut self, ctx: &TickContext<'_>, passable: impl Fn(&Grid, Position) -> bool) {
        let ts = ctx.config.tile_size;
        let target = match self.step {
            Some(step) if passable(ctx.grid, step) => step,
            Some(step) => {
                tracing::debug!(role = self.role.name(), %step, "step blocked by new maze, skipping move");
                self.step = None;
                return;
            }
            None if self.is_aligned(ts) => return,
            None => {
                let here = self.tile(ts);
                if passable(ctx.grid, here) {
                    here
                } else {
                    ctx.grid.nearest_open(here).unwrap_or(here)
                }
            }
        };

        if self.move_toward(target, ts, ctx.config.speed) && self.step == Some(target) {
            self.step = None;
        }
    }

    /// Glide toward `target`, returning true once exactly on it.
    fn move_toward(&mut self, target: Position, tile_size: f32, speed: f32) -> bool {
        let tx = target.x as f32 * tile_size;
        let ty = target.y as f32 * tile_size;
        let dx = tx - self.x;
        let dy = ty - self.y;

        if let Some(facing) = Direction::dominant(dx, dy) {
            self.facing = facing;
        }
        let length = dx.hypot(dy);
        if length > 0.0 {
            self.x += dx / length * speed;
            self.y += dy / length * speed;
        }
        if (tx - self.x).abs() < speed {
            self.x = tx;
        }
        if (ty - self.y).abs() < speed {
            self.y = ty;
        }
        self.x == tx && self.y == ty
    }

    /// Push an escaped agent whose center has drifted into the cage one
    /// tile out toward the exit.
    fn keep_out_of_cage(&mut self, ctx: &TickContext<'_>) {
        let ts = ctx.config.tile_size;
        let (cx, cy) = self.center(ts);
        if ctx.barrier.cage_contains(cx, cy, ts) {
            let tile = self.tile(ts).step(ctx.barrier.exit_direction());
            tracing::debug!(role = self.role.name(), %tile, "pushed back out of the cage");
            self.place(tile, ts);
        }
    }

    fn animate(&mut self, config: &SimulationConfig) {
        self.frame_counter += 1;
        if self.frame_counter >= config.animation_period {
            self.frame_counter = 0;
            self.frame = (self.frame + 1) % config.animation_frames.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::barrier::TileRect;
    use rand::SeedableRng;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// A 7x7 room with the cage interior at rows 1-2 and the barrier below it.
    fn setup() -> (Grid, Barrier, SimulationConfig) {
        let grid: Grid = "\
#######
#=...=#
#=...=#
#==.==#
#.....#
#.....#
#######
"
        .parse()
        .unwrap();
        let cage = TileRect {
            x: 2,
            y: 1,
            width: 3,
            height: 2,
        };
        (grid, Barrier::new(p(3, 3), cage, 10), SimulationConfig::default())
    }

    fn run(agent: &mut Agent, grid: &Grid, barrier: &Barrier, config: &SimulationConfig) -> TickOutcome {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut ctx = TickContext {
            config,
            grid,
            barrier,
            targets: [p(1, 5), p(5, 5)],
            rng: &mut rng,
        };
        agent.update(&mut ctx)
    }

    fn agent(role: Role, tile: Position, config: &SimulationConfig) -> Agent {
        Agent::new(role, tile, config.tile_size, role.strategy(config, None))
    }

    #[test]
    fn test_glides_then_snaps() {
        let (grid, barrier, config) = setup();
        let mut a = agent(Role::Blinky, p(3, 1), &config);

        run(&mut a, &grid, &barrier, &config);
        assert_eq!(a.step(), Some(p(3, 2)));
        assert_eq!(a.position(), (75.0, 27.0));
        assert_eq!(a.facing(), Direction::Down);
        assert!(!a.is_aligned(config.tile_size));

        for _ in 0..11 {
            run(&mut a, &grid, &barrier, &config);
        }
        // 12 * 2 = 24; the final unit is closed by the snap.
        assert_eq!(a.position(), (75.0, 50.0));
        assert!(a.is_aligned(config.tile_size));
        assert_eq!(a.step(), None);
    }

    #[test]
    fn test_hits_only_on_barrier_tile() {
        let (grid, barrier, config) = setup();
        let mut a = agent(Role::Pinky, p(3, 2), &config);
        let mut hits = 0;
        for _ in 0..20 {
            if run(&mut a, &grid, &barrier, &config).hit {
                hits += 1;
            }
        }
        assert!(hits > 0);
        assert_eq!(a.tile(config.tile_size), p(3, 3));
        assert_eq!(a.phase(), Phase::Contained);
        assert_eq!(a.state(&barrier), AgentState::Contained);
    }

    #[test]
    fn test_escapes_through_breached_barrier() {
        let (grid, mut barrier, config) = setup();
        barrier.hit();
        barrier.hit();
        let mut a = agent(Role::Pinky, p(3, 3), &config);
        assert_eq!(a.state(&barrier), AgentState::Breaching);

        let outcome = run(&mut a, &grid, &barrier, &config);
        assert!(outcome.escaped);
        assert!(!outcome.hit);
        assert!(a.is_escaped());
        assert_eq!(a.state(&barrier), AgentState::Escaped);
    }

    #[test]
    fn test_escaped_agent_is_pushed_out_of_cage() {
        let (grid, barrier, config) = setup();
        let mut a = agent(Role::Inky, p(3, 2), &config);
        a.phase = Phase::Escaped;
        run(&mut a, &grid, &barrier, &config);
        assert_eq!(a.tile(config.tile_size), p(3, 3));
        assert!(a.is_aligned(config.tile_size));
    }

    #[test]
    fn test_clyde_snaps_whole_tiles() {
        let (grid, barrier, config) = setup();
        let mut a = agent(Role::Clyde, p(3, 4), &config);
        a.phase = Phase::Escaped;
        run(&mut a, &grid, &barrier, &config);
        assert!(a.is_aligned(config.tile_size));
        assert_eq!(a.tile(config.tile_size).manhattan(p(3, 4)), 1);
    }

    #[test]
    fn test_stale_step_is_skipped() {
        let (mut grid, barrier, config) = setup();
        let mut a = agent(Role::Pinky, p(1, 4), &config);
        a.phase = Phase::Escaped;
        run(&mut a, &grid, &barrier, &config);
        let step = a.step().unwrap();
        let before = a.position();

        grid.set(step, Cell::Wall);
        run(&mut a, &grid, &barrier, &config);
        assert_eq!(a.position(), before);
        assert_eq!(a.step(), None);

        // Between tiles with nothing committed: settle back onto the tile.
        for _ in 0..5 {
            run(&mut a, &grid, &barrier, &config);
        }
        assert!(a.is_aligned(config.tile_size));
        assert_eq!(a.tile(config.tile_size), p(1, 4));
    }

    #[test]
    fn test_animation_cycles() {
        let (grid, barrier, config) = setup();
        let mut a = agent(Role::Blinky, p(3, 3), &config);
        assert_eq!(a.frame(), 0);
        for _ in 0..config.animation_period {
            run(&mut a, &grid, &barrier, &config);
        }
        assert_eq!(a.frame(), 1);
        for _ in 0..config.animation_period {
            run(&mut a, &grid, &barrier, &config);
        }
        assert_eq!(a.frame(), 0);
    }
}
