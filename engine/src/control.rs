// ═══════════════════════════════════════════════════════════════════════
// Area control — net cell count nearer to one side than the other
// ═══════════════════════════════════════════════════════════════════════
//
// A cell belongs to the side whose nearest living unit is strictly
// closer by Manhattan distance; ties are contested and count for
// neither. Soaked units (wetness ≥ 50) have their distances doubled to
// reflect reduced reach. Recomputed on demand, never cached; it runs
// once per movement candidate per agent, so it has to stay cheap.

use crate::grid::Cell;
use crate::types::{AgentId, AgentState, GameConfig, PlayerId, SOAKED_WETNESS};

/// Position and slowdown flag of one living unit.
#[derive(Debug, Clone, Copy)]
struct Presence {
    pos: Cell,
    slowed: bool,
}

impl Presence {
    fn of(agent: &AgentState) -> Presence {
        Presence {
            pos: agent.pos,
            slowed: agent.wetness >= SOAKED_WETNESS,
        }
    }

    fn reach(self, c: Cell) -> i32 {
        let d = self.pos.manhattan(c);
        if self.slowed {
            d * 2
        } else {
            d
        }
    }
}

fn min_reach(units: &[Presence], c: Cell) -> i32 {
    units.iter().map(|u| u.reach(c)).min().unwrap_or(i32::MAX)
}

fn side_presences(config: &GameConfig, agents: &[AgentState], side: PlayerId) -> Vec<Presence> {
    let roster = config.roster(side);
    agents[roster.start..=roster.stop]
        .iter()
        .filter(|a| a.alive)
        .map(Presence::of)
        .collect()
}

fn balance_of(config: &GameConfig, friendly: &[Presence], enemy: &[Presence]) -> i32 {
    let mut balance = 0;
    for c in config.board.open_cells() {
        let mine = min_reach(friendly, c);
        let theirs = min_reach(enemy, c);
        if mine < theirs {
            balance += 1;
        } else if theirs < mine {
            balance -= 1;
        }
    }
    balance
}

/// Net number of open cells controlled by `side`: cells strictly closer
/// to `side` minus cells strictly closer to the opponent.
pub fn control_balance(config: &GameConfig, agents: &[AgentState], side: PlayerId) -> i32 {
    let friendly = side_presences(config, agents, side);
    let enemy = side_presences(config, agents, side.opponent());
    balance_of(config, &friendly, &enemy)
}

/// Change in `side`'s control balance if `agent` stood at `dest` instead
/// of its current cell, all other units held fixed.
pub fn move_gain(
    config: &GameConfig,
    agents: &[AgentState],
    side: PlayerId,
    agent: AgentId,
    dest: Cell,
) -> i32 {
    let mut friendly = Vec::new();
    let roster = config.roster(side);
    for a in agents[roster.start..=roster.stop].iter().filter(|a| a.alive) {
        let mut p = Presence::of(a);
        if a.id == agent {
            p.pos = dest;
        }
        friendly.push(p);
    }
    let enemy = side_presences(config, agents, side.opponent());
    let current = side_presences(config, agents, side);

    balance_of(config, &friendly, &enemy) - balance_of(config, &current, &enemy)
}
