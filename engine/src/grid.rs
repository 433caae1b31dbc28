// ═══════════════════════════════════════════════════════════════════════
// Board model — static grid of open and blocked cells
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

/// A grid coordinate. Signed so that off-grid neighbours can be formed
/// and then rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chessboard distance; a splash blast covers every cell within 1.
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Movement options in generation order: stay, left, right, up, down.
/// Score ties between candidates keep this order.
pub const MOVE_DIRS: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// The four single-step directions, for breadth-first expansion.
pub const STEP_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The playing field. Terrain is write-once: built by setup, read-only
/// for the rest of the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Board {
    /// `blocked` is row-major, `width * height` entries.
    pub(crate) fn new(width: i32, height: i32, blocked: Vec<bool>) -> Board {
        debug_assert_eq!(blocked.len(), (width * height) as usize);
        Board { width, height, blocked }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// In bounds and not blocked by terrain.
    pub fn is_open(&self, c: Cell) -> bool {
        self.contains(c) && !self.blocked[self.idx(c)]
    }

    pub(crate) fn idx(&self, c: Cell) -> usize {
        (c.y * self.width + c.x) as usize
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell { x, y }))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&c| !self.blocked[self.idx(c)])
    }

    /// Open 4-connected neighbours of a cell.
    pub fn open_neighbors(&self, c: Cell) -> impl Iterator<Item = Cell> + '_ {
        STEP_DIRS
            .iter()
            .map(move |&(dx, dy)| c.offset(dx, dy))
            .filter(move |&n| self.is_open(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board(width: i32, height: i32) -> Board {
        Board::new(width, height, vec![false; (width * height) as usize])
    }

    #[test]
    fn distances() {
        let a = Cell::new(1, 1);
        let b = Cell::new(4, 3);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn bounds_and_blockers() {
        let mut blocked = vec![false; 12];
        blocked[1 * 4 + 2] = true; // (2,1)
        let board = Board::new(4, 3, blocked);

        assert!(board.is_open(Cell::new(0, 0)));
        assert!(!board.is_open(Cell::new(2, 1)));
        assert!(!board.is_open(Cell::new(-1, 0)));
        assert!(!board.is_open(Cell::new(4, 0)));
        assert!(board.contains(Cell::new(2, 1)));
    }

    #[test]
    fn open_neighbors_skip_walls_and_edges() {
        let mut blocked = vec![false; 9];
        blocked[1 * 3 + 0] = true; // (0,1)
        let board = Board::new(3, 3, blocked);

        let n: Vec<Cell> = board.open_neighbors(Cell::new(0, 0)).collect();
        assert_eq!(n, vec![Cell::new(1, 0)]);
    }

    #[test]
    fn cell_iteration_is_row_major() {
        let board = open_board(2, 2);
        let cells: Vec<Cell> = board.cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
        assert_eq!(board.open_cells().count(), 4);
    }
}
