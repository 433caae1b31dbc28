// ═══════════════════════════════════════════════════════════════════════
// Wire protocol — referee stdin/stdout adapters
// ═══════════════════════════════════════════════════════════════════════
//
// The referee speaks whitespace-separated integers on stdin and expects
// one `;`-separated command line per friendly agent on stdout. These
// adapters carry no game logic beyond the one-based/zero-based id shift.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use thiserror::Error;

use crate::grid::Cell;
use crate::setup::{self, AgentRecord, SetupError, TileRecord};
use crate::types::{AgentState, CombatAction, GameConfig, TeamCommand, TurnState};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o error reading game input: {0}")]
    Io(#[from] std::io::Error),

    #[error("game input ended unexpectedly")]
    UnexpectedEof,

    #[error("expected an integer, got {0:?}")]
    BadToken(String),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("turn input references unknown agent id {0}")]
    UnknownAgent(i32),
}

/// Pulls whitespace-separated integer tokens off a reader, independent
/// of how the referee breaks its lines.
pub struct Scanner<R> {
    reader: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Scanner<R> {
        Scanner { reader, tokens: VecDeque::new() }
    }

    /// Buffer the next non-empty line of tokens. Ok(false) on EOF.
    fn refill(&mut self) -> Result<bool, ProtocolError> {
        while self.tokens.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            self.tokens.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(true)
    }

    pub fn next_i32(&mut self) -> Result<i32, ProtocolError> {
        match self.try_next_i32()? {
            Some(v) => Ok(v),
            None => Err(ProtocolError::UnexpectedEof),
        }
    }

    /// Like `next_i32` but yields None on a clean end of input, so the
    /// turn loop can distinguish "game over" from a truncated turn.
    pub fn try_next_i32(&mut self) -> Result<Option<i32>, ProtocolError> {
        if !self.refill()? {
            return Ok(None);
        }
        let token = self.tokens.pop_front().unwrap_or_default();
        token
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ProtocolError::BadToken(token))
    }
}

/// Read and validate the one-shot setup block.
pub fn read_setup<R: BufRead>(sc: &mut Scanner<R>) -> Result<GameConfig, ProtocolError> {
    let my_id = sc.next_i32()?;

    let agent_count = sc.next_i32()?.max(0) as usize;
    let mut agents = Vec::with_capacity(agent_count);
    for _ in 0..agent_count {
        agents.push(AgentRecord {
            id: sc.next_i32()?,
            player: sc.next_i32()?,
            shoot_cooldown: sc.next_i32()?,
            optimal_range: sc.next_i32()?,
            soaking_power: sc.next_i32()?,
            splash_bombs: sc.next_i32()?,
        });
    }

    let width = sc.next_i32()?;
    let height = sc.next_i32()?;
    let mut tiles = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
    for _ in 0..width.max(0) * height.max(0) {
        tiles.push(TileRecord {
            x: sc.next_i32()?,
            y: sc.next_i32()?,
            tile: sc.next_i32()?,
        });
    }

    Ok(setup::build_config(my_id, &agents, width, height, &tiles)?)
}

/// Read one turn's agent snapshot. Agents absent from the input stay
/// dead. Returns None on a clean end of input (match over).
pub fn read_turn<R: BufRead>(
    sc: &mut Scanner<R>,
    config: &GameConfig,
) -> Result<Option<TurnState>, ProtocolError> {
    let visible = match sc.try_next_i32()? {
        Some(n) => n.max(0) as usize,
        None => return Ok(None),
    };

    let mut state = TurnState::empty(config.agent_count());
    for _ in 0..visible {
        let wire_id = sc.next_i32()?;
        let x = sc.next_i32()?;
        let y = sc.next_i32()?;
        let cooldown = sc.next_i32()?;
        let splash_bombs = sc.next_i32()?;
        let wetness = sc.next_i32()?;

        let index = wire_id - 1;
        if index < 0 || index as usize >= config.agent_count() {
            return Err(ProtocolError::UnknownAgent(wire_id));
        }
        let agent = &mut state.agents[index as usize];
        *agent = AgentState {
            id: agent.id,
            pos: Cell::new(x, y),
            cooldown,
            splash_bombs,
            wetness,
            alive: true,
        };
    }

    // Trailing count of my own agents; consumed but redundant.
    let _my_agent_count = sc.next_i32()?;

    Ok(Some(state))
}

/// Render the chosen bundle as referee command lines, one per living
/// friendly agent: one-based id, `MOVE` (omitted when staying put), the
/// combat action, and an elapsed-time annotation for diagnostics.
pub fn format_commands(
    config: &GameConfig,
    state: &TurnState,
    bundle: &TeamCommand,
    elapsed_ms: f64,
) -> String {
    let mut out = String::new();
    for agent in state.living(config.roster(config.my_player)) {
        out.push_str(&(agent.id.0 as i32 + 1).to_string());

        match bundle.command_for(agent.id) {
            Some(cmd) => {
                if cmd.dest != agent.pos {
                    out.push_str(&format!(";MOVE {} {}", cmd.dest.x, cmd.dest.y));
                }
                match cmd.action {
                    CombatAction::Shoot(target) => {
                        out.push_str(&format!(";SHOOT {}", target.0 as i32 + 1));
                    }
                    CombatAction::Throw(cell) => {
                        out.push_str(&format!(";THROW {} {}", cell.x, cell.y));
                    }
                    CombatAction::Hunker => out.push_str(";HUNKER_DOWN"),
                }
            }
            // An agent the planner produced nothing for falls back to
            // hunkering in place.
            None => out.push_str(";HUNKER_DOWN"),
        }

        out.push_str(&format!(";MESSAGE {elapsed_ms:.2}ms\n"));
    }
    out
}

pub fn write_commands<W: Write>(
    w: &mut W,
    config: &GameConfig,
    state: &TurnState,
    bundle: &TeamCommand,
    elapsed_ms: f64,
) -> std::io::Result<()> {
    w.write_all(format_commands(config, state, bundle, elapsed_ms).as_bytes())?;
    w.flush()
}
