// ═══════════════════════════════════════════════════════════════════════
// Referee — resolves both sides' bundles into the next turn state
// ═══════════════════════════════════════════════════════════════════════
//
// Unlike the one-ply forward model in the engine, the referee arbitrates
// two simultaneous bundles: cooldowns tick, movements are validated and
// applied, then all damage is accumulated against the post-move
// positions and applied at once. Illegal commands degrade to doing
// nothing rather than failing the match, the same leniency the online
// referee shows.

use splash_engine::sim::{in_blast, soak};
use splash_engine::types::{
    AgentState, CombatAction, GameConfig, PlayerId, TeamCommand, TurnState, MAX_THROW_RANGE,
    SPLASH_DAMAGE,
};
use splash_engine::Cell;

/// One step per turn, orthogonal, onto an open unoccupied cell.
fn valid_move(config: &GameConfig, agents: &[AgentState], actor: usize, dest: Cell) -> bool {
    agents[actor].pos.manhattan(dest) <= 1
        && config.board.is_open(dest)
        && !agents
            .iter()
            .enumerate()
            .any(|(i, a)| i != actor && a.alive && a.pos == dest)
}

/// Advance the match by one turn under both bundles. Bundles are indexed
/// by player; commands for dead or foreign agents are ignored.
pub fn resolve_turn(config: &GameConfig, state: &mut TurnState, bundles: [&TeamCommand; 2]) {
    for a in state.agents.iter_mut().filter(|a| a.alive) {
        a.cooldown = (a.cooldown - 1).max(0);
    }

    // Movement phase. Resolution in roster order; a blocked or occupied
    // destination means the agent stays put.
    for player in PlayerId::ALL {
        let roster = *config.roster(player);
        for cmd in &bundles[player.index()].commands {
            if !roster.contains(cmd.agent) || !state.agent(cmd.agent).alive {
                continue;
            }
            if valid_move(config, &state.agents, cmd.agent.index(), cmd.dest) {
                state.agent_mut(cmd.agent).pos = cmd.dest;
            }
        }
    }

    // Combat phase: damage accumulates against post-move positions and
    // lands simultaneously, so mutual elimination is possible.
    let mut damage = vec![0i32; state.agents.len()];
    for player in PlayerId::ALL {
        let roster = *config.roster(player);
        for cmd in &bundles[player.index()].commands {
            if !roster.contains(cmd.agent) || !state.agent(cmd.agent).alive {
                continue;
            }
            let actor_pos = state.agent(cmd.agent).pos;
            let profile = config.profile(cmd.agent);

            match cmd.action {
                CombatAction::Shoot(target) => {
                    let shooter = state.agent(cmd.agent);
                    if shooter.cooldown > 0 || !state.agent(target).alive {
                        continue;
                    }
                    if actor_pos.manhattan(state.agent(target).pos) > 2 * profile.optimal_range {
                        continue;
                    }
                    state.agent_mut(cmd.agent).cooldown = profile.shoot_cooldown;
                    damage[target.index()] += profile.soaking_power / 2;
                }
                CombatAction::Throw(cell) => {
                    if state.agent(cmd.agent).splash_bombs <= 0
                        || actor_pos.manhattan(cell) > MAX_THROW_RANGE
                    {
                        continue;
                    }
                    state.agent_mut(cmd.agent).splash_bombs -= 1;
                    for i in 0..state.agents.len() {
                        if state.agents[i].alive && in_blast(cell, state.agents[i].pos) {
                            damage[i] += SPLASH_DAMAGE;
                        }
                    }
                }
                CombatAction::Hunker => {}
            }
        }
    }

    for (i, dmg) in damage.iter().enumerate() {
        if *dmg > 0 && state.agents[i].alive {
            soak(&mut state.agents[i], *dmg);
        }
    }
}
