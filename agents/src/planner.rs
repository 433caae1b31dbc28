// ═══════════════════════════════════════════════════════════════════════
// Planner Agent — the full generate/compose/evaluate/select pipeline
// ═══════════════════════════════════════════════════════════════════════

use splash_engine::clock::TurnClock;
use splash_engine::pathing::ThreatMap;
use splash_engine::types::{GameConfig, PlayerId, TeamCommand, TurnState};

use crate::agent::Agent;
use crate::assemble::agent_commands;
use crate::compose::{compose_team, ComposeStatus, TeamPlans, DEFAULT_SEARCH_WIDTH, MAX_TEAM_BUNDLES};
use crate::evaluate::{evaluate_bundles, select_best};

pub struct PlannerAgent {
    player: PlayerId,
    search_width: usize,
}

impl PlannerAgent {
    pub fn new(player: PlayerId) -> PlannerAgent {
        PlannerAgent { player, search_width: DEFAULT_SEARCH_WIDTH }
    }

    /// Widen or narrow the per-agent shortlist fed into composition.
    pub fn with_search_width(player: PlayerId, search_width: usize) -> PlannerAgent {
        PlannerAgent { player, search_width: search_width.max(1) }
    }
}

impl Agent for PlannerAgent {
    fn name(&self) -> &str {
        "Planner"
    }

    fn player(&self) -> PlayerId {
        self.player
    }

    fn plan(&mut self, config: &GameConfig, state: &TurnState, clock: &TurnClock) -> TeamCommand {
        let threats = ThreatMap::build(&config.board, state, config.roster(self.player.opponent()));

        let per_agent: Vec<_> = state
            .living(config.roster(self.player))
            .map(|a| agent_commands(config, state, &threats, a.id))
            .collect();

        let plans = TeamPlans::new(per_agent, self.search_width);
        let (bundles, status) = compose_team(&plans, MAX_TEAM_BUNDLES);
        if status == ComposeStatus::Truncated {
            log::warn!(
                "{}: bundle space {} capped at {}",
                self.player,
                plans.bundle_space(),
                bundles.len()
            );
        }

        let evaluations = evaluate_bundles(config, state, self.player, bundles);
        match select_best(evaluations) {
            Some(best) => {
                log::debug!(
                    "{}: picked bundle scoring {:.1} after {:.2}ms",
                    self.player,
                    best.score,
                    clock.elapsed_ms()
                );
                best.bundle
            }
            None => {
                log::debug!("{}: no living agents, empty bundle", self.player);
                TeamCommand::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splash_engine::clock::TURN_BUDGET_MS;
    use splash_engine::setup::{build_config, AgentRecord, TileRecord};
    use splash_engine::types::{AgentId, CombatAction};
    use splash_engine::Cell;

    fn open_tiles(width: i32, height: i32) -> Vec<TileRecord> {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| TileRecord { x, y, tile: 0 }))
            .collect()
    }

    fn skirmish(records: &[AgentRecord], width: i32, height: i32) -> (GameConfig, TurnState) {
        let config =
            build_config(0, records, width, height, &open_tiles(width, height)).expect("valid");
        let state = TurnState::empty(records.len());
        (config, state)
    }

    fn wake(state: &mut TurnState, id: u8, pos: Cell, bombs: i32) {
        let a = state.agent_mut(AgentId(id));
        a.pos = pos;
        a.alive = true;
        a.splash_bombs = bombs;
    }

    #[test]
    fn closes_in_and_attacks_a_wet_enemy() {
        let records = [
            AgentRecord { id: 1, player: 0, shoot_cooldown: 1, optimal_range: 3, soaking_power: 20, splash_bombs: 1 },
            AgentRecord { id: 2, player: 1, shoot_cooldown: 1, optimal_range: 3, soaking_power: 20, splash_bombs: 0 },
        ];
        let (config, mut state) = skirmish(&records, 9, 3);
        wake(&mut state, 0, Cell::new(1, 1), 1);
        wake(&mut state, 1, Cell::new(5, 1), 0);
        state.agent_mut(AgentId(1)).wetness = 40;

        let mut agent = PlannerAgent::new(PlayerId(0));
        let clock = TurnClock::start(TURN_BUDGET_MS);
        let bundle = agent.plan(&config, &state, &clock);

        let cmd = bundle.command_for(AgentId(0)).expect("one command");
        // An attack on the wet enemy, not a passive hunker.
        match cmd.action {
            CombatAction::Shoot(target) => assert_eq!(target, AgentId(1)),
            CombatAction::Throw(cell) => {
                assert!(cell.chebyshev(state.agent(AgentId(1)).pos) <= 1)
            }
            CombatAction::Hunker => panic!("expected an attack, got hunker"),
        }
        // And no retreat while doing it.
        assert!(cmd.dest.manhattan(Cell::new(5, 1)) <= 4);
    }

    #[test]
    fn planning_is_deterministic() {
        let records = [
            AgentRecord { id: 1, player: 0, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 2, player: 0, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 3, player: 1, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 4, player: 1, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
        ];
        let (config, mut state) = skirmish(&records, 10, 6);
        wake(&mut state, 0, Cell::new(1, 1), 1);
        wake(&mut state, 1, Cell::new(1, 4), 1);
        wake(&mut state, 2, Cell::new(8, 1), 1);
        wake(&mut state, 3, Cell::new(8, 4), 1);

        let mut first = PlannerAgent::new(PlayerId(0));
        let mut second = PlannerAgent::new(PlayerId(0));
        let clock = TurnClock::start(TURN_BUDGET_MS);

        assert_eq!(first.plan(&config, &state, &clock), second.plan(&config, &state, &clock));
    }

    #[test]
    fn every_living_agent_gets_a_command() {
        let records = [
            AgentRecord { id: 1, player: 0, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 2, player: 0, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 3, player: 1, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
        ];
        let (config, mut state) = skirmish(&records, 8, 4);
        wake(&mut state, 0, Cell::new(0, 0), 1);
        wake(&mut state, 1, Cell::new(0, 3), 1);
        wake(&mut state, 2, Cell::new(7, 1), 1);

        let mut agent = PlannerAgent::new(PlayerId(0));
        let clock = TurnClock::start(TURN_BUDGET_MS);
        let bundle = agent.plan(&config, &state, &clock);

        assert!(bundle.command_for(AgentId(0)).is_some());
        assert!(bundle.command_for(AgentId(1)).is_some());
        assert!(bundle.command_for(AgentId(2)).is_none(), "no commands for the enemy");
    }

    #[test]
    fn wiped_side_plans_an_empty_bundle() {
        let records = [
            AgentRecord { id: 1, player: 0, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
            AgentRecord { id: 2, player: 1, shoot_cooldown: 1, optimal_range: 2, soaking_power: 16, splash_bombs: 1 },
        ];
        let (config, mut state) = skirmish(&records, 8, 4);
        wake(&mut state, 1, Cell::new(7, 1), 1);

        let mut agent = PlannerAgent::new(PlayerId(0));
        let clock = TurnClock::start(TURN_BUDGET_MS);
        assert!(agent.plan(&config, &state, &clock).commands.is_empty());
    }
}
