//! The 15x15 board and its locked cells

use tracing::debug;

use super::error::PlayError;
use super::letter::Letter;
use super::nearest::nearest_grid;
use super::{NUM_BOARD_COLUMNS, NUM_BOARD_ROWS};

/// Premium square kinds, used only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Premium {
    None,
    TripleWord,
    Centre,
}

/// Tiles on the board, and which of them were committed on earlier turns.
///
/// A locked cell always holds a tile, and drag operations never touch it.
#[derive(Debug, Clone)]
pub struct BoardState {
    letters: [[Letter; NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS],
    locked: [[bool; NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// An empty, unlocked board.
    pub fn new() -> Self {
        Self {
            letters: [[Letter::EMPTY; NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS],
            locked: [[false; NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS],
        }
    }

    fn check(row: usize, column: usize) -> Result<(), PlayError> {
        if row < NUM_BOARD_ROWS && column < NUM_BOARD_COLUMNS {
            Ok(())
        } else {
            Err(PlayError::CellOutOfBounds { row, column })
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Letter> {
        self.letters.get(row)?.get(column)
    }

    pub fn is_locked(&self, row: usize, column: usize) -> bool {
        self.locked
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(false)
    }

    /// Whether the cell exists and holds no tile.
    pub fn is_empty_cell(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(|l| l.is_empty())
    }

    /// Whether a tile here may be picked up this turn.
    pub fn is_movable(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some_and(|l| !l.is_empty()) && !self.is_locked(row, column)
    }

    /// Nearest empty cell to `(row, column)`, searching down, right, up,
    /// left.
    pub fn nearest_empty(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        nearest_grid(NUM_BOARD_ROWS, NUM_BOARD_COLUMNS, (row, column), |r, c| {
            self.letters[r][c].is_empty()
        })
    }

    /// Remove the tile at an unlocked cell.
    pub(crate) fn take(&mut self, row: usize, column: usize) -> Letter {
        debug_assert!(!self.locked[row][column], "took from locked cell");
        std::mem::replace(&mut self.letters[row][column], Letter::EMPTY)
    }

    pub(crate) fn place(&mut self, row: usize, column: usize, letter: Letter) {
        debug_assert!(!self.locked[row][column], "placed on locked cell");
        self.letters[row][column] = letter;
    }

    /// Commit the tile at a cell so it can no longer be moved.
    pub fn lock(&mut self, row: usize, column: usize) -> Result<(), PlayError> {
        Self::check(row, column)?;
        if self.letters[row][column].is_empty() {
            return Err(PlayError::LockEmptyCell { row, column });
        }
        self.locked[row][column] = true;
        debug!(row, column, "locked cell");
        Ok(())
    }

    /// Seed a committed tile from an earlier turn.
    pub fn place_locked(
        &mut self,
        row: usize,
        column: usize,
        letter: Letter,
    ) -> Result<(), PlayError> {
        Self::check(row, column)?;
        if letter.is_empty() {
            return Err(PlayError::LockEmptyCell { row, column });
        }
        self.letters[row][column] = letter;
        self.locked[row][column] = true;
        Ok(())
    }

    /// Tiles placed this turn, in row-major order.
    pub fn unlocked_tiles(&self) -> impl Iterator<Item = (usize, usize, Letter)> + '_ {
        self.letters.iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(column, letter)| !letter.is_empty() && !self.locked[row][*column])
                .map(move |(column, letter)| (row, column, *letter))
        })
    }

    pub fn tile_count(&self) -> usize {
        self.letters
            .iter()
            .flatten()
            .filter(|l| !l.is_empty())
            .count()
    }

    pub fn locked_count(&self) -> usize {
        self.locked.iter().flatten().filter(|&&l| l).count()
    }
}

/// Premium square layout: triple-word squares at the corners and edge
/// midpoints, and the centre star.
pub fn premium_at(row: usize, column: usize) -> Premium {
    let last_row = NUM_BOARD_ROWS - 1;
    let last_column = NUM_BOARD_COLUMNS - 1;
    let mid_row = NUM_BOARD_ROWS / 2;
    let mid_column = NUM_BOARD_COLUMNS / 2;

    if row == mid_row && column == mid_column {
        return Premium::Centre;
    }
    let edge_row = row == 0 || row == mid_row || row == last_row;
    let edge_column = column == 0 || column == mid_column || column == last_column;
    if edge_row && edge_column {
        Premium::TripleWord
    } else {
        Premium::None
    }
}
