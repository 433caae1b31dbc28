// ═══════════════════════════════════════════════════════════════════════
// Core types — static game configuration and per-turn mutable state
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::grid::{Board, Cell};

// ── Compiled-in maxima ─────────────────────────────────────────────────
// The referee never exceeds these; setup rejects anything larger instead
// of leaving oversized input undefined.

pub const MAX_WIDTH: usize = 20;
pub const MAX_HEIGHT: usize = 20;
pub const MAX_AGENTS: usize = 10;
pub const NUM_PLAYERS: usize = 2;

/// Wetness at which a unit is removed from play.
pub const LETHAL_WETNESS: i32 = 100;

/// Wetness at which a unit counts as soaked: half effective speed for
/// area control, and the first scoring milestone in evaluation.
pub const SOAKED_WETNESS: i32 = 50;

/// Splash bombs land anywhere within this Manhattan range of the thrower.
pub const MAX_THROW_RANGE: i32 = 4;

/// Wetness added to every unit caught in a splash blast.
pub const SPLASH_DAMAGE: i32 = 30;

// ── Identifiers ────────────────────────────────────────────────────────

/// One of the two players. The wire protocol numbers them 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ALL: [PlayerId; NUM_PLAYERS] = [PlayerId(0), PlayerId(1)];

    pub fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Compact agent identifier: zero-based index into the profile list.
/// The wire protocol numbers agents from 1; the adapters translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u8);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── Static configuration ───────────────────────────────────────────────

/// Immutable per-agent statics, read once at setup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub player: PlayerId,
    /// Turns between shots.
    pub shoot_cooldown: i32,
    /// Shots within this Manhattan range get a scoring bonus; twice this
    /// range is the hard maximum.
    pub optimal_range: i32,
    /// Base damage of a shot (halved on application).
    pub soaking_power: i32,
    /// Splash bombs carried at the start of the game.
    pub splash_bombs: i32,
}

/// Contiguous index range `[start, stop]` of one player's agents in the
/// profile list. Setup enforces the contiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRoster {
    pub start: usize,
    pub stop: usize,
}

impl SideRoster {
    pub fn ids(&self) -> impl Iterator<Item = AgentId> {
        (self.start..=self.stop).map(|i| AgentId(i as u8))
    }

    pub fn len(&self) -> usize {
        self.stop - self.start + 1
    }

    pub fn contains(&self, id: AgentId) -> bool {
        (self.start..=self.stop).contains(&id.index())
    }
}

/// Write-once game configuration: board, agent statics, side rosters.
/// Built by `setup::build_config` and injected read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub my_player: PlayerId,
    pub profiles: Vec<AgentProfile>,
    pub rosters: [SideRoster; NUM_PLAYERS],
    pub board: Board,
}

impl GameConfig {
    pub fn profile(&self, id: AgentId) -> &AgentProfile {
        &self.profiles[id.index()]
    }

    pub fn roster(&self, player: PlayerId) -> &SideRoster {
        &self.rosters[player.index()]
    }

    pub fn agent_count(&self) -> usize {
        self.profiles.len()
    }
}

// ── Per-turn state ─────────────────────────────────────────────────────

/// Mutable snapshot of one agent for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub pos: Cell,
    pub cooldown: i32,
    pub splash_bombs: i32,
    pub wetness: i32,
    pub alive: bool,
}

impl AgentState {
    /// Placeholder for an agent missing from the turn input.
    pub fn dead(id: AgentId) -> AgentState {
        AgentState {
            id,
            pos: Cell { x: 0, y: 0 },
            cooldown: 0,
            splash_bombs: 0,
            wetness: 0,
            alive: false,
        }
    }
}

/// Full mutable state for one turn, replaced wholesale from fresh input.
/// Agents absent from the input stay dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub agents: Vec<AgentState>,
}

impl TurnState {
    pub fn empty(agent_count: usize) -> TurnState {
        TurnState {
            agents: (0..agent_count)
                .map(|i| AgentState::dead(AgentId(i as u8)))
                .collect(),
        }
    }

    pub fn agent(&self, id: AgentId) -> &AgentState {
        &self.agents[id.index()]
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut AgentState {
        &mut self.agents[id.index()]
    }

    /// Living agents of one roster, in roster order.
    pub fn living<'a>(&'a self, roster: &SideRoster) -> impl Iterator<Item = &'a AgentState> {
        self.agents[roster.start..=roster.stop].iter().filter(|a| a.alive)
    }

    pub fn living_count(&self, roster: &SideRoster) -> usize {
        self.living(roster).count()
    }
}

// ── Commands ───────────────────────────────────────────────────────────

/// The combat half of an agent's turn. Hunkering is the always-available
/// fallback with no offensive effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    Shoot(AgentId),
    Throw(Cell),
    Hunker,
}

/// One agent's full turn: a movement destination plus one combat action.
/// Movement resolves before combat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentCommand {
    pub agent: AgentId,
    pub dest: Cell,
    pub action: CombatAction,
    pub score: f32,
}

/// A full assignment of one command to every living agent of one side,
/// in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCommand {
    pub commands: Vec<AgentCommand>,
}

impl TeamCommand {
    pub fn command_for(&self, id: AgentId) -> Option<&AgentCommand> {
        self.commands.iter().find(|c| c.agent == id)
    }
}
