// ═══════════════════════════════════════════════════════════════════════
// Command assembly — full move+action commands for one agent
// ═══════════════════════════════════════════════════════════════════════
//
// Crosses every movement candidate with the combat actions available
// from its destination. Per movement that is at most one throw (the best
// one), the shot candidates, and the hunker fallback, so an agent always
// has at least one command. The combined list is sorted by score and
// capped before the bundle composer sees it.

use splash_engine::pathing::ThreatMap;
use splash_engine::types::{AgentCommand, AgentId, CombatAction, GameConfig, TurnState};

use crate::actions::{movement_options, shoot_options, throw_options};

/// Upper bound on commands per agent: 5 movements times at most
/// 1 throw + 5 shots + 1 hunker.
pub const MAX_COMMANDS_PER_AGENT: usize = 35;

/// Build the scored command list for one agent, best first. Never empty
/// for a living agent: hunkering in place is always a candidate.
pub fn agent_commands(
    config: &GameConfig,
    state: &TurnState,
    threats: &ThreatMap,
    agent: AgentId,
) -> Vec<AgentCommand> {
    let mut commands = Vec::with_capacity(MAX_COMMANDS_PER_AGENT);

    for movement in movement_options(config, state, threats, agent) {
        let throws = throw_options(config, state, agent, movement.dest);
        if let Some(throw) = throws.first() {
            commands.push(AgentCommand {
                agent,
                dest: movement.dest,
                action: CombatAction::Throw(throw.target),
                score: movement.score + throw.score,
            });
        }

        for shot in shoot_options(config, state, agent, movement.dest) {
            commands.push(AgentCommand {
                agent,
                dest: movement.dest,
                action: CombatAction::Shoot(shot.target),
                score: movement.score + shot.score,
            });
        }

        commands.push(AgentCommand {
            agent,
            dest: movement.dest,
            action: CombatAction::Hunker,
            score: movement.score,
        });
    }

    commands.sort_by(|a, b| b.score.total_cmp(&a.score));
    commands.truncate(MAX_COMMANDS_PER_AGENT);
    commands
}
