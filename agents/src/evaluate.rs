// ═══════════════════════════════════════════════════════════════════════
// Bundle evaluation — one-ply lookahead scoring and selection
// ═══════════════════════════════════════════════════════════════════════
//
// Each candidate bundle is applied to a scratch copy of the turn state
// and the outcome scored from the acting side's point of view. The score
// combines four terms: area control of the resulting position, net
// wetness exchanged, and the two milestone counters (units newly soaked,
// units newly eliminated). Selection keeps the first best score, so ties
// fall to the earlier, greedier bundle.

use splash_engine::control::control_balance;
use splash_engine::sim::apply_team;
use splash_engine::types::{
    AgentState, GameConfig, PlayerId, SideRoster, TeamCommand, TurnState, LETHAL_WETNESS,
    SOAKED_WETNESS,
};

pub const CONTROL_WEIGHT: f32 = 10.0;
pub const DAMAGE_WEIGHT: f32 = 1.5;
pub const SOAKED_WEIGHT: f32 = 20.0;
pub const ELIMINATED_WEIGHT: f32 = 30.0;

/// A scored candidate bundle.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub bundle: TeamCommand,
    pub score: f32,
}

/// Aggregates of one side used by the score: total wetness plus the two
/// milestone counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SideTally {
    wetness: i32,
    soaked: i32,
    eliminated: i32,
}

fn tally(agents: &[AgentState], roster: &SideRoster) -> SideTally {
    let mut t = SideTally { wetness: 0, soaked: 0, eliminated: 0 };
    for a in &agents[roster.start..=roster.stop] {
        t.wetness += a.wetness;
        if a.wetness >= SOAKED_WETNESS {
            t.soaked += 1;
        }
        if !a.alive || a.wetness >= LETHAL_WETNESS {
            t.eliminated += 1;
        }
    }
    t
}

/// Score one bundle for `side`: apply it to a scratch copy and compare
/// the outcome against the current state. Higher is better.
pub fn score_bundle(
    config: &GameConfig,
    state: &TurnState,
    side: PlayerId,
    bundle: &TeamCommand,
) -> f32 {
    let friendly = config.roster(side);
    let enemy = config.roster(side.opponent());

    let friendly_before = tally(&state.agents, friendly);
    let enemy_before = tally(&state.agents, enemy);

    let mut scratch = state.agents.clone();
    apply_team(config, &mut scratch, bundle);

    let friendly_after = tally(&scratch, friendly);
    let enemy_after = tally(&scratch, enemy);

    let control = control_balance(config, &scratch, side) as f32;
    let dealt = enemy_after.wetness - enemy_before.wetness;
    let received = friendly_after.wetness - friendly_before.wetness;
    let soaked = (enemy_after.soaked - enemy_before.soaked)
        - (friendly_after.soaked - friendly_before.soaked);
    let eliminated = (enemy_after.eliminated - enemy_before.eliminated)
        - (friendly_after.eliminated - friendly_before.eliminated);

    CONTROL_WEIGHT * control
        + DAMAGE_WEIGHT * (dealt - received) as f32
        + SOAKED_WEIGHT * soaked as f32
        + ELIMINATED_WEIGHT * eliminated as f32
}

/// Score every candidate bundle in composition order.
pub fn evaluate_bundles(
    config: &GameConfig,
    state: &TurnState,
    side: PlayerId,
    bundles: Vec<TeamCommand>,
) -> Vec<Evaluation> {
    bundles
        .into_iter()
        .map(|bundle| {
            let score = score_bundle(config, state, side, &bundle);
            Evaluation { bundle, score }
        })
        .collect()
}

/// Pick the best-scoring evaluation; the earliest wins a tie.
pub fn select_best(evaluations: Vec<Evaluation>) -> Option<Evaluation> {
    evaluations
        .into_iter()
        .reduce(|best, e| if e.score > best.score { e } else { best })
}
