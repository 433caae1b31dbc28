// ═══════════════════════════════════════════════════════════════════════
// Action generation — scored per-agent candidates for one turn
// ═══════════════════════════════════════════════════════════════════════
//
// Three independent generators, one per action kind. Each returns a
// short, score-sorted candidate list; the assembler crosses movements
// with combat actions. Shoot and throw candidates are generated against
// a hypothetical position so they can be evaluated per movement.
//
// All sorts are stable and descending, so equal scores keep generation
// order and the whole pipeline stays deterministic.

use splash_engine::control::move_gain;
use splash_engine::grid::MOVE_DIRS;
use splash_engine::pathing::ThreatMap;
use splash_engine::sim::in_blast;
use splash_engine::types::{
    AgentId, GameConfig, TurnState, MAX_THROW_RANGE, SOAKED_WETNESS,
};
use splash_engine::Cell;

/// At most this many candidates survive per generator.
pub const MAX_OPTIONS: usize = 5;

/// Weight of one cell of area-control gain in a movement score.
pub const TERRITORY_WEIGHT: f32 = 10.0;

/// Penalty for moving adjacent to an ally while a bomb-carrying enemy
/// is close enough to punish the cluster.
pub const CLUSTER_PENALTY: f32 = 15.0;

/// An enemy this close (bomb range plus one step of movement) can land
/// a splash bomb on us next turn.
pub const DANGER_RADIUS: i32 = MAX_THROW_RANGE + 1;

/// Shots land up to twice the optimal range; inside it they score a
/// wetness bonus.
pub const OPTIMAL_RANGE_BONUS: f32 = 1.5;

/// Per-cell distance penalty on shot scores, favouring close targets.
pub const SHOOT_DISTANCE_WEIGHT: f32 = 2.0;

/// Score per enemy caught in a splash blast.
pub const THROW_HIT_WEIGHT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOption {
    pub dest: Cell,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootOption {
    pub target: AgentId,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowOption {
    pub target: Cell,
    pub score: f32,
}

fn sort_desc<T>(options: &mut Vec<T>, score: impl Fn(&T) -> f32) {
    options.sort_by(|a, b| score(b).total_cmp(&score(a)));
    options.truncate(MAX_OPTIONS);
}

/// True when standing at `dest` would put the agent next to an ally
/// while a bomb-carrying, unslowed enemy is within striking distance.
fn clustered_under_threat(
    config: &GameConfig,
    state: &TurnState,
    agent: AgentId,
    dest: Cell,
) -> bool {
    let side = config.profile(agent).player;

    let threatened = state.living(config.roster(side.opponent())).any(|e| {
        e.splash_bombs > 0
            && e.wetness < SOAKED_WETNESS
            && e.pos.manhattan(dest) <= DANGER_RADIUS
    });
    if !threatened {
        return false;
    }

    state
        .living(config.roster(side))
        .any(|a| a.id != agent && a.pos.chebyshev(dest) <= 1)
}

/// Movement candidates: stay plus the four open orthogonal steps, each
/// scored by enemy proximity, area-control gain and cluster risk.
pub fn movement_options(
    config: &GameConfig,
    state: &TurnState,
    threats: &ThreatMap,
    agent: AgentId,
) -> Vec<MoveOption> {
    let pos = state.agent(agent).pos;
    let side = config.profile(agent).player;

    let mut options = Vec::with_capacity(MOVE_DIRS.len());
    for (dx, dy) in MOVE_DIRS {
        let dest = pos.offset(dx, dy);
        if !config.board.is_open(dest) {
            continue;
        }
        // A cell held by another living unit is not a destination.
        if state.agents.iter().any(|a| a.alive && a.id != agent && a.pos == dest) {
            continue;
        }

        let proximity = if threats.is_empty() {
            0.0
        } else {
            -(threats.min_dist(dest) as f32)
        };
        let territory = TERRITORY_WEIGHT * move_gain(config, &state.agents, side, agent, dest) as f32;
        let cluster = if clustered_under_threat(config, state, agent, dest) {
            CLUSTER_PENALTY
        } else {
            0.0
        };

        options.push(MoveOption { dest, score: proximity + territory - cluster });
    }

    sort_desc(&mut options, |o| o.score);
    options
}

/// Shot candidates from a hypothetical position. Empty while the
/// shooter's cooldown is running.
pub fn shoot_options(
    config: &GameConfig,
    state: &TurnState,
    shooter: AgentId,
    from: Cell,
) -> Vec<ShootOption> {
    if state.agent(shooter).cooldown > 0 {
        return Vec::new();
    }
    let profile = config.profile(shooter);
    let side = profile.player;

    let mut options = Vec::new();
    for enemy in state.living(config.roster(side.opponent())) {
        let dist = from.manhattan(enemy.pos);
        if dist > 2 * profile.optimal_range {
            continue;
        }
        let bonus = if dist <= profile.optimal_range {
            OPTIMAL_RANGE_BONUS
        } else {
            1.0
        };
        let score = enemy.wetness as f32 * bonus - SHOOT_DISTANCE_WEIGHT * dist as f32;
        options.push(ShootOption { target: enemy.id, score });
    }

    sort_desc(&mut options, |o| o.score);
    options
}

/// Splash bomb candidates from a hypothetical position: one per in-range
/// enemy cell, rejected when the blast would catch any friend, the
/// thrower's own hypothetical position included.
pub fn throw_options(
    config: &GameConfig,
    state: &TurnState,
    thrower: AgentId,
    from: Cell,
) -> Vec<ThrowOption> {
    if state.agent(thrower).splash_bombs <= 0 {
        return Vec::new();
    }
    let side = config.profile(thrower).player;

    let mut options = Vec::new();
    for enemy in state.living(config.roster(side.opponent())) {
        let target = enemy.pos;
        if from.manhattan(target) > MAX_THROW_RANGE {
            continue;
        }

        let friendly_hit = state.living(config.roster(side)).any(|a| {
            let pos = if a.id == thrower { from } else { a.pos };
            in_blast(target, pos)
        });
        if friendly_hit {
            continue;
        }

        let hits = state
            .living(config.roster(side.opponent()))
            .filter(|e| in_blast(target, e.pos))
            .count();
        options.push(ThrowOption { target, score: THROW_HIT_WEIGHT * hits as f32 });
    }

    sort_desc(&mut options, |o| o.score);
    options
}
