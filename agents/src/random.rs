// ═══════════════════════════════════════════════════════════════════════
// Random Agent — picks uniformly among legal commands.
// Serves as baseline opponent and for exercising the referee.
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use splash_engine::clock::TurnClock;
use splash_engine::pathing::ThreatMap;
use splash_engine::types::{
    AgentCommand, CombatAction, GameConfig, PlayerId, TeamCommand, TurnState,
};

use crate::actions::{movement_options, shoot_options, throw_options};
use crate::agent::Agent;

pub struct RandomAgent {
    player: PlayerId,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(player: PlayerId, seed: u64) -> RandomAgent {
        RandomAgent { player, rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> PlayerId {
        self.player
    }

    /// One uniformly random legal command per living agent, drawn from
    /// the same generators the planner uses so legality comes for free.
    fn plan(&mut self, config: &GameConfig, state: &TurnState, _clock: &TurnClock) -> TeamCommand {
        let threats = ThreatMap::build(&config.board, state, config.roster(self.player.opponent()));

        let mut commands = Vec::new();
        for agent in state.living(config.roster(self.player)) {
            let moves = movement_options(config, state, &threats, agent.id);
            let dest = match moves.choose(&mut self.rng) {
                Some(m) => m.dest,
                None => agent.pos,
            };

            let mut actions = vec![CombatAction::Hunker];
            actions.extend(
                shoot_options(config, state, agent.id, dest)
                    .iter()
                    .map(|s| CombatAction::Shoot(s.target)),
            );
            actions.extend(
                throw_options(config, state, agent.id, dest)
                    .iter()
                    .map(|t| CombatAction::Throw(t.target)),
            );
            let action = actions[self.rng.gen_range(0..actions.len())];

            commands.push(AgentCommand { agent: agent.id, dest, action, score: 0.0 });
        }
        TeamCommand { commands }
    }
}
