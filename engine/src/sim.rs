// ═══════════════════════════════════════════════════════════════════════
// One-ply combat resolution — the evaluation function's forward model
// ═══════════════════════════════════════════════════════════════════════

use crate::grid::Cell;
use crate::types::{
    AgentState, CombatAction, GameConfig, TeamCommand, LETHAL_WETNESS, SPLASH_DAMAGE,
};

/// A splash blast covers the target cell and its 8 neighbours.
pub const SPLASH_RADIUS: i32 = 1;

pub fn in_blast(center: Cell, pos: Cell) -> bool {
    center.chebyshev(pos) <= SPLASH_RADIUS
}

/// Add wetness, saturating at the lethal threshold. A unit reaching the
/// threshold is marked not alive.
pub fn soak(agent: &mut AgentState, amount: i32) {
    agent.wetness = (agent.wetness + amount).min(LETHAL_WETNESS);
    if agent.wetness >= LETHAL_WETNESS {
        agent.alive = false;
    }
}

/// Apply one side's command bundle to a scratch copy of agent state:
/// all movements first, then combat actions in roster order.
///
/// This models only the acting side; no opponent reply. Callers own the
/// scratch slice; the real turn state is never touched.
pub fn apply_team(config: &GameConfig, agents: &mut [AgentState], bundle: &TeamCommand) {
    for cmd in &bundle.commands {
        let actor = &mut agents[cmd.agent.index()];
        if actor.alive {
            actor.pos = cmd.dest;
        }
    }

    for cmd in &bundle.commands {
        if !agents[cmd.agent.index()].alive {
            continue;
        }
        match cmd.action {
            CombatAction::Shoot(target) => {
                let power = config.profile(cmd.agent).soaking_power;
                agents[cmd.agent.index()].cooldown = config.profile(cmd.agent).shoot_cooldown;
                let victim = &mut agents[target.index()];
                if victim.alive {
                    soak(victim, power / 2);
                }
            }
            CombatAction::Throw(target) => {
                agents[cmd.agent.index()].splash_bombs -= 1;
                for victim in agents.iter_mut() {
                    if victim.alive && in_blast(target, victim.pos) {
                        soak(victim, SPLASH_DAMAGE);
                    }
                }
            }
            CombatAction::Hunker => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Board;
    use crate::setup::{build_config, AgentRecord, TileRecord};
    use crate::types::{AgentCommand, AgentId, PlayerId, TurnState};

    fn duel_config() -> GameConfig {
        let tiles: Vec<TileRecord> = Board::new(6, 6, vec![false; 36])
            .cells()
            .map(|c| TileRecord { x: c.x, y: c.y, tile: 0 })
            .collect();
        let records = [
            AgentRecord { id: 1, player: 0, shoot_cooldown: 2, optimal_range: 3, soaking_power: 24, splash_bombs: 2 },
            AgentRecord { id: 2, player: 1, shoot_cooldown: 2, optimal_range: 3, soaking_power: 24, splash_bombs: 2 },
        ];
        build_config(0, &records, 6, 6, &tiles).expect("valid setup")
    }

    fn place(state: &mut TurnState, id: AgentId, pos: Cell, wetness: i32) {
        let a = state.agent_mut(id);
        a.pos = pos;
        a.wetness = wetness;
        a.splash_bombs = 2;
        a.alive = true;
    }

    #[test]
    fn shoot_applies_half_power_and_sets_cooldown() {
        let config = duel_config();
        let mut state = TurnState::empty(2);
        place(&mut state, AgentId(0), Cell::new(0, 0), 0);
        place(&mut state, AgentId(1), Cell::new(3, 0), 10);

        let bundle = TeamCommand {
            commands: vec![AgentCommand {
                agent: AgentId(0),
                dest: Cell::new(0, 0),
                action: CombatAction::Shoot(AgentId(1)),
                score: 0.0,
            }],
        };
        let mut scratch = state.agents.clone();
        apply_team(&config, &mut scratch, &bundle);

        assert_eq!(scratch[1].wetness, 10 + 24 / 2);
        assert_eq!(scratch[0].cooldown, 2);
        assert!(scratch[1].alive);
    }

    #[test]
    fn throw_soaks_everyone_in_blast() {
        let config = duel_config();
        let mut state = TurnState::empty(2);
        place(&mut state, AgentId(0), Cell::new(0, 0), 0);
        place(&mut state, AgentId(1), Cell::new(4, 0), 0);

        let target = Cell::new(4, 0);
        let bundle = TeamCommand {
            commands: vec![AgentCommand {
                agent: AgentId(0),
                dest: Cell::new(0, 0),
                action: CombatAction::Throw(target),
                score: 0.0,
            }],
        };
        let mut scratch = state.agents.clone();
        apply_team(&config, &mut scratch, &bundle);

        assert_eq!(scratch[1].wetness, SPLASH_DAMAGE);
        assert_eq!(scratch[0].splash_bombs, 1);
        assert_eq!(scratch[0].wetness, 0, "thrower outside the blast stays dry");
    }

    #[test]
    fn wetness_saturates_and_kills() {
        let mut agent = AgentState::dead(AgentId(0));
        agent.alive = true;
        agent.wetness = 90;

        soak(&mut agent, SPLASH_DAMAGE);
        assert_eq!(agent.wetness, LETHAL_WETNESS);
        assert!(!agent.alive);

        // Further damage never pushes past the threshold.
        soak(&mut agent, 50);
        assert_eq!(agent.wetness, LETHAL_WETNESS);
    }

    #[test]
    fn movement_resolves_before_combat() {
        let config = duel_config();
        let mut state = TurnState::empty(2);
        place(&mut state, AgentId(0), Cell::new(0, 0), 0);
        place(&mut state, AgentId(1), Cell::new(5, 5), 0);

        // Throw lands next to the mover's destination, not its origin.
        let bundle = TeamCommand {
            commands: vec![AgentCommand {
                agent: AgentId(0),
                dest: Cell::new(1, 0),
                action: CombatAction::Throw(Cell::new(5, 4)),
                score: 0.0,
            }],
        };
        let mut scratch = state.agents.clone();
        apply_team(&config, &mut scratch, &bundle);

        assert_eq!(scratch[0].pos, Cell::new(1, 0));
        assert_eq!(scratch[1].wetness, SPLASH_DAMAGE);
    }
}
