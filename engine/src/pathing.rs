// ═══════════════════════════════════════════════════════════════════════
// Distance fields — per-enemy shortest walkable paths over the grid
// ═══════════════════════════════════════════════════════════════════════

use std::collections::VecDeque;

use crate::grid::{Board, Cell};
use crate::types::{SideRoster, TurnState};

/// Distance assigned to cells no walkable path reaches. Larger than any
/// real path on a 20×20 board.
pub const UNREACHABLE: i32 = 9999;

/// Shortest walkable-path hop counts from one origin to every cell,
/// computed by breadth-first search over open 4-connected cells.
/// Rebuilt every turn; read-only afterwards.
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: i32,
    dist: Vec<i32>,
}

impl DistanceField {
    pub fn build(board: &Board, origin: Cell) -> DistanceField {
        let mut dist = vec![UNREACHABLE; (board.width() * board.height()) as usize];
        let mut queue = VecDeque::new();

        if board.is_open(origin) {
            dist[board.idx(origin)] = 0;
            queue.push_back(origin);
        }

        while let Some(cur) = queue.pop_front() {
            let next = dist[board.idx(cur)] + 1;
            for n in board.open_neighbors(cur) {
                let slot = &mut dist[board.idx(n)];
                if *slot > next {
                    *slot = next;
                    queue.push_back(n);
                }
            }
        }

        DistanceField { width: board.width(), dist }
    }

    pub fn get(&self, c: Cell) -> i32 {
        self.dist[(c.y * self.width + c.x) as usize]
    }
}

/// One distance field per living agent of a roster, conventionally the
/// enemy side, so that "distance to the nearest threat" is a lookup.
#[derive(Debug)]
pub struct ThreatMap {
    fields: Vec<DistanceField>,
}

impl ThreatMap {
    pub fn build(board: &Board, state: &TurnState, roster: &SideRoster) -> ThreatMap {
        ThreatMap {
            fields: state
                .living(roster)
                .map(|a| DistanceField::build(board, a.pos))
                .collect(),
        }
    }

    /// Shortest path from any tracked unit to `c`; `UNREACHABLE` when the
    /// roster has no living units or no path exists.
    pub fn min_dist(&self, c: Cell) -> i32 {
        self.fields.iter().map(|f| f.get(c)).min().unwrap_or(UNREACHABLE)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentId, AgentState};

    fn board_with_wall() -> Board {
        // 5x3, vertical wall at x=2 with a gap at y=2.
        let mut blocked = vec![false; 15];
        blocked[0 * 5 + 2] = true;
        blocked[1 * 5 + 2] = true;
        Board::new(5, 3, blocked)
    }

    #[test]
    fn bfs_routes_around_walls() {
        let board = board_with_wall();
        let field = DistanceField::build(&board, Cell::new(0, 0));

        assert_eq!(field.get(Cell::new(0, 0)), 0);
        assert_eq!(field.get(Cell::new(1, 0)), 1);
        // (3,0) is 3 away in Manhattan terms but the wall forces a detour.
        assert_eq!(field.get(Cell::new(3, 0)), 7);
    }

    #[test]
    fn unreachable_cells_get_sentinel() {
        // Solid wall, no gap.
        let mut blocked = vec![false; 15];
        for y in 0..3 {
            blocked[y * 5 + 2] = true;
        }
        let board = Board::new(5, 3, blocked);
        let field = DistanceField::build(&board, Cell::new(0, 0));

        assert_eq!(field.get(Cell::new(4, 0)), UNREACHABLE);
        assert_eq!(field.get(Cell::new(2, 1)), UNREACHABLE);
    }

    #[test]
    fn threat_map_takes_nearest_unit() {
        let board = Board::new(5, 3, vec![false; 15]);
        let mut state = TurnState::empty(2);
        *state.agent_mut(AgentId(0)) = AgentState {
            id: AgentId(0),
            pos: Cell::new(0, 0),
            cooldown: 0,
            splash_bombs: 0,
            wetness: 0,
            alive: true,
        };
        *state.agent_mut(AgentId(1)) = AgentState {
            id: AgentId(1),
            pos: Cell::new(4, 2),
            cooldown: 0,
            splash_bombs: 0,
            wetness: 0,
            alive: true,
        };

        let map = ThreatMap::build(&board, &state, &SideRoster { start: 0, stop: 1 });
        assert_eq!(map.min_dist(Cell::new(1, 0)), 1);
        assert_eq!(map.min_dist(Cell::new(4, 1)), 1);
        assert_eq!(map.min_dist(Cell::new(2, 1)), 3);
    }

    #[test]
    fn empty_roster_is_all_unreachable() {
        let board = Board::new(3, 3, vec![false; 9]);
        let state = TurnState::empty(2);
        let map = ThreatMap::build(&board, &state, &SideRoster { start: 0, stop: 1 });
        assert!(map.is_empty());
        assert_eq!(map.min_dist(Cell::new(1, 1)), UNREACHABLE);
    }
}
