//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use ghostgate::game::{AgentState, BarrierState, TickReport};
use ghostgate::{Position, Role, Simulation};
use serde::Serialize;

/// JSON-serializable run summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunSummary {
    /// Fallback RNG seed.
    pub(super) seed: u64,
    /// Ticks simulated.
    pub(super) ticks: u64,
    /// Tick on which the barrier broke (null if intact).
    pub(super) breached_at: Option<u64>,
    /// Final barrier state.
    pub(super) barrier: JsonBarrier,
    /// Per-agent final state.
    pub(super) agents: Vec<JsonAgent>,
}

/// JSON-serializable barrier state.
#[derive(Debug, Serialize)]
pub(super) struct JsonBarrier {
    /// Intact or breached.
    pub(super) state: BarrierState,
    /// Hits taken.
    pub(super) hits: u32,
    /// Agents that passed through.
    pub(super) escaped: u32,
}

/// JSON-serializable agent state.
#[derive(Debug, Serialize)]
pub(super) struct JsonAgent {
    /// Agent role.
    pub(super) role: Role,
    /// Pursuit strategy name.
    pub(super) strategy: &'static str,
    /// Contained, breaching or escaped.
    pub(super) state: AgentState,
    /// Nearest tile.
    pub(super) tile: Position,
    /// Tick the agent escaped on (null if still contained).
    pub(super) escaped_at: Option<u64>,
}

/// Tick numbers of the notable events in a run.
#[derive(Debug, Default)]
pub(super) struct RunEvents {
    /// Tick the barrier broke.
    pub(super) breached_at: Option<u64>,
    /// Escape tick per role.
    pub(super) escapes: Vec<(Role, u64)>,
}

impl RunEvents {
    /// Fold one tick report into the event log.
    pub(super) fn record(&mut self, report: &TickReport) {
        if report.breached {
            self.breached_at = Some(report.tick);
        }
        self.escapes
            .extend(report.escaped.iter().map(|&role| (role, report.tick)));
    }

    fn escaped_at(&self, role: Role) -> Option<u64> {
        self.escapes
            .iter()
            .find(|(r, _)| *r == role)
            .map(|&(_, tick)| tick)
    }
}

impl JsonRunSummary {
    /// Create from a finished simulation.
    pub(super) fn from_simulation(sim: &Simulation, events: &RunEvents) -> Self {
        let ts = sim.config().tile_size;
        let barrier = sim.barrier();
        Self {
            seed: sim.config().seed,
            ticks: sim.ticks(),
            breached_at: events.breached_at,
            barrier: JsonBarrier {
                state: barrier.state(),
                hits: barrier.hits(),
                escaped: barrier.escaped_count(),
            },
            agents: sim
                .agents()
                .iter()
                .map(|a| JsonAgent {
                    role: a.role(),
                    strategy: a.strategy_name(),
                    state: a.state(barrier),
                    tile: a.tile(ts),
                    escaped_at: events.escaped_at(a.role()),
                })
                .collect(),
        }
    }
}

/// Format a run summary as human-readable text.
pub(super) fn format_text(sim: &Simulation, events: &RunEvents) -> String {
    let mut output = String::new();
    let ts = sim.config().tile_size;
    let barrier = sim.barrier();

    let _ = writeln!(output, "Simulation (seed: {})", sim.config().seed);
    let _ = writeln!(output, "  Ticks: {}", sim.ticks());
    match events.breached_at {
        Some(tick) => {
            let _ = writeln!(output, "  Barrier: breached on tick {tick}");
        }
        None => {
            let _ = writeln!(output, "  Barrier: intact ({} hits)", barrier.hits());
        }
    }
    let _ = writeln!(output, "  Escaped: {}/{}\n", barrier.escaped_count(), sim.agents().len());

    for agent in sim.agents() {
        let state = match agent.state(barrier) {
            AgentState::Contained => "contained",
            AgentState::Breaching => "breaching",
            AgentState::Escaped => "escaped",
        };
        let _ = write!(
            output,
            "  {:<6} {:<11} {:<10} at {}",
            agent.role().name(),
            agent.strategy_name(),
            state,
            agent.tile(ts)
        );
        if let Some(tick) = events.escaped_at(agent.role()) {
            let _ = write!(output, " [escaped tick {tick}]");
        }
        output.push('\n');
    }

    output
}

/// Render the maze with the barrier, players and agents drawn over it.
pub(super) fn render_frame(sim: &Simulation, players: [Position; 2]) -> String {
    let grid = sim.grid();
    let ts = sim.config().tile_size;
    let mut rows: Vec<Vec<char>> = grid.to_layout().lines().map(|l| l.chars().collect()).collect();

    let mut put = |pos: Position, ch: char| {
        let cell = usize::try_from(pos.y)
            .ok()
            .zip(usize::try_from(pos.x).ok())
            .and_then(|(y, x)| rows.get_mut(y).and_then(|row| row.get_mut(x)));
        if let Some(cell) = cell {
            *cell = ch;
        }
    };

    let barrier = sim.barrier();
    put(barrier.tile(), if barrier.is_breached() { '_' } else { 'G' });
    put(players[0], 'P');
    put(players[1], 'Q');
    for agent in sim.agents() {
        put(agent.tile(ts), agent.role().marker());
    }

    let mut out = format!("tick {}\n", sim.ticks());
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
