// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — interface that all decision-making agents implement
// ═══════════════════════════════════════════════════════════════════════
//
// One call per turn: the agent sees the immutable configuration and the
// current turn snapshot and returns a full command bundle for its side.
// The clock bounds how long the agent may think; finished agents report
// their elapsed time through the command annotations.

use splash_engine::clock::TurnClock;
use splash_engine::types::{GameConfig, PlayerId, TeamCommand, TurnState};

pub trait Agent: Send {
    /// Human-readable name for this agent (e.g. "Planner", "Random").
    fn name(&self) -> &str;

    /// The side this agent is playing.
    fn player(&self) -> PlayerId;

    /// Decide this turn's commands for every living agent of the side.
    /// Agents left without a command hunker in place.
    fn plan(&mut self, config: &GameConfig, state: &TurnState, clock: &TurnClock) -> TeamCommand;
}
