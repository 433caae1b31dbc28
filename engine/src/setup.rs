// ═══════════════════════════════════════════════════════════════════════
// Setup — validates the one-shot setup data into an immutable GameConfig
// ═══════════════════════════════════════════════════════════════════════
//
// Every precondition the game relies on is checked here once, so the
// per-turn pipeline can index freely without re-validating.

use thiserror::Error;

use crate::grid::{Board, Cell};
use crate::types::{
    AgentId, AgentProfile, GameConfig, PlayerId, SideRoster, MAX_AGENTS, MAX_HEIGHT, MAX_WIDTH,
    NUM_PLAYERS,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("board {width}x{height} exceeds the supported {MAX_WIDTH}x{MAX_HEIGHT}")]
    BoardTooLarge { width: i32, height: i32 },

    #[error("board dimensions must be positive, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },

    #[error("{count} agents exceeds the supported maximum of {MAX_AGENTS}")]
    TooManyAgents { count: usize },

    #[error("setup data contains no agents")]
    NoAgents,

    #[error("my_id {0} does not name a player")]
    UnknownMyId(i32),

    #[error("agent {id} belongs to unknown player {player}")]
    UnknownPlayer { id: i32, player: i32 },

    #[error("agent ids must run sequentially from 1, got {got} at position {pos}")]
    NonSequentialIds { got: i32, pos: usize },

    #[error("player {player}'s agents are not contiguous in the setup list")]
    NonContiguousSides { player: u8 },

    #[error("player {player} has no agents")]
    MissingSide { player: u8 },

    #[error("tile ({x},{y}) lies outside the {width}x{height} board")]
    TileOutOfBounds { x: i32, y: i32, width: i32, height: i32 },

    #[error("tile list leaves {missing} cells of the grid undescribed")]
    IncompleteBoard { missing: usize },
}

/// Raw per-agent setup record as it arrives on the wire.
#[derive(Debug, Clone, Copy)]
pub struct AgentRecord {
    pub id: i32,
    pub player: i32,
    pub shoot_cooldown: i32,
    pub optimal_range: i32,
    pub soaking_power: i32,
    pub splash_bombs: i32,
}

/// Raw per-cell terrain record; `tile > 0` blocks movement.
#[derive(Debug, Clone, Copy)]
pub struct TileRecord {
    pub x: i32,
    pub y: i32,
    pub tile: i32,
}

/// Build the immutable game configuration, rejecting malformed setup
/// data with a descriptive error instead of corrupting later turns.
pub fn build_config(
    my_id: i32,
    agents: &[AgentRecord],
    width: i32,
    height: i32,
    tiles: &[TileRecord],
) -> Result<GameConfig, SetupError> {
    if width <= 0 || height <= 0 {
        return Err(SetupError::EmptyBoard { width, height });
    }
    if width as usize > MAX_WIDTH || height as usize > MAX_HEIGHT {
        return Err(SetupError::BoardTooLarge { width, height });
    }
    if agents.is_empty() {
        return Err(SetupError::NoAgents);
    }
    if agents.len() > MAX_AGENTS {
        return Err(SetupError::TooManyAgents { count: agents.len() });
    }
    if !(0..NUM_PLAYERS as i32).contains(&my_id) {
        return Err(SetupError::UnknownMyId(my_id));
    }

    let mut profiles = Vec::with_capacity(agents.len());
    for (pos, rec) in agents.iter().enumerate() {
        if !(0..NUM_PLAYERS as i32).contains(&rec.player) {
            return Err(SetupError::UnknownPlayer { id: rec.id, player: rec.player });
        }
        // Internal ids are the protocol ids shifted to zero base; the
        // shift only works when the referee numbers agents 1..=n in
        // list order, so enforce that.
        if rec.id != pos as i32 + 1 {
            return Err(SetupError::NonSequentialIds { got: rec.id, pos });
        }
        profiles.push(AgentProfile {
            id: AgentId(pos as u8),
            player: PlayerId(rec.player as u8),
            shoot_cooldown: rec.shoot_cooldown,
            optimal_range: rec.optimal_range,
            soaking_power: rec.soaking_power,
            splash_bombs: rec.splash_bombs,
        });
    }

    let rosters = group_rosters(&profiles)?;

    let mut blocked = vec![false; (width * height) as usize];
    let mut seen = vec![false; (width * height) as usize];
    for t in tiles {
        let c = Cell::new(t.x, t.y);
        if t.x < 0 || t.x >= width || t.y < 0 || t.y >= height {
            return Err(SetupError::TileOutOfBounds { x: t.x, y: t.y, width, height });
        }
        let idx = (c.y * width + c.x) as usize;
        blocked[idx] = t.tile > 0;
        seen[idx] = true;
    }
    let missing = seen.iter().filter(|&&s| !s).count();
    if missing > 0 {
        return Err(SetupError::IncompleteBoard { missing });
    }

    log::debug!(
        "configured {}x{} board, {} agents, playing as {}",
        width,
        height,
        profiles.len(),
        PlayerId(my_id as u8)
    );

    Ok(GameConfig {
        my_player: PlayerId(my_id as u8),
        profiles,
        rosters,
        board: Board::new(width, height, blocked),
    })
}

/// Group agents into one contiguous index range per player.
fn group_rosters(profiles: &[AgentProfile]) -> Result<[SideRoster; NUM_PLAYERS], SetupError> {
    let mut ranges: [Option<(usize, usize)>; NUM_PLAYERS] = [None; NUM_PLAYERS];
    for (i, p) in profiles.iter().enumerate() {
        let slot = &mut ranges[p.player.index()];
        match slot {
            None => *slot = Some((i, i)),
            Some((_, stop)) => {
                if *stop != i - 1 {
                    return Err(SetupError::NonContiguousSides { player: p.player.0 });
                }
                *stop = i;
            }
        }
    }

    let mut rosters = [SideRoster { start: 0, stop: 0 }; NUM_PLAYERS];
    for (player, range) in ranges.iter().enumerate() {
        match range {
            Some((start, stop)) => rosters[player] = SideRoster { start: *start, stop: *stop },
            None => return Err(SetupError::MissingSide { player: player as u8 }),
        }
    }
    Ok(rosters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, player: i32) -> AgentRecord {
        AgentRecord {
            id,
            player,
            shoot_cooldown: 2,
            optimal_range: 4,
            soaking_power: 16,
            splash_bombs: 1,
        }
    }

    fn full_tiles(width: i32, height: i32) -> Vec<TileRecord> {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| TileRecord { x, y, tile: 0 }))
            .collect()
    }

    #[test]
    fn builds_rosters_from_contiguous_sides() {
        let agents = [record(1, 0), record(2, 0), record(3, 1), record(4, 1)];
        let config = build_config(0, &agents, 4, 4, &full_tiles(4, 4)).expect("valid setup");

        assert_eq!(config.roster(PlayerId(0)), &SideRoster { start: 0, stop: 1 });
        assert_eq!(config.roster(PlayerId(1)), &SideRoster { start: 2, stop: 3 });
        assert_eq!(config.profile(AgentId(2)).player, PlayerId(1));
        assert_eq!(config.my_player, PlayerId(0));
    }

    #[test]
    fn rejects_interleaved_sides() {
        let agents = [record(1, 0), record(2, 1), record(3, 0)];
        let err = build_config(0, &agents, 4, 4, &full_tiles(4, 4)).unwrap_err();
        assert_eq!(err, SetupError::NonContiguousSides { player: 0 });
    }

    #[test]
    fn rejects_oversized_board() {
        let agents = [record(1, 0), record(2, 1)];
        let err = build_config(0, &agents, 25, 4, &full_tiles(25, 4)).unwrap_err();
        assert_eq!(err, SetupError::BoardTooLarge { width: 25, height: 4 });
    }

    #[test]
    fn rejects_one_sided_setup() {
        let agents = [record(1, 0), record(2, 0)];
        let err = build_config(0, &agents, 4, 4, &full_tiles(4, 4)).unwrap_err();
        assert_eq!(err, SetupError::MissingSide { player: 1 });
    }

    #[test]
    fn rejects_gaps_in_the_tile_list() {
        let agents = [record(1, 0), record(2, 1)];
        let mut tiles = full_tiles(4, 4);
        tiles.pop();
        tiles.pop();
        let err = build_config(0, &agents, 4, 4, &tiles).unwrap_err();
        assert_eq!(err, SetupError::IncompleteBoard { missing: 2 });
    }

    #[test]
    fn rejects_non_sequential_ids() {
        let agents = [record(1, 0), record(5, 1)];
        let err = build_config(0, &agents, 4, 4, &full_tiles(4, 4)).unwrap_err();
        assert_eq!(err, SetupError::NonSequentialIds { got: 5, pos: 1 });
    }

    #[test]
    fn blocked_tiles_become_walls() {
        let agents = [record(1, 0), record(2, 1)];
        let mut tiles = full_tiles(4, 4);
        tiles[5].tile = 1; // (1,1)
        let config = build_config(0, &agents, 4, 4, &tiles).expect("valid setup");
        assert!(!config.board.is_open(Cell::new(1, 1)));
        assert!(config.board.is_open(Cell::new(2, 1)));
    }
}
