//! Where a tile currently sits

use super::{NUM_BOARD_COLUMNS, NUM_BOARD_ROWS, NUM_RACK_TILES};

/// A tile's location: a board cell, a rack slot, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    BoardCell { row: usize, column: usize },
    RackSlot(usize),
    /// Off every surface, e.g. a tile released in mid-air.
    #[default]
    Unplaced,
}

impl Position {
    pub fn board(row: usize, column: usize) -> Self {
        Position::BoardCell { row, column }
    }

    pub fn rack(index: usize) -> Self {
        Position::RackSlot(index)
    }

    /// The rack index, if this is a rack slot.
    pub fn rack_index(&self) -> Option<usize> {
        match *self {
            Position::RackSlot(index) => Some(index),
            _ => None,
        }
    }

    /// The `(row, column)` pair, if this is a board cell.
    pub fn board_cell(&self) -> Option<(usize, usize)> {
        match *self {
            Position::BoardCell { row, column } => Some((row, column)),
            _ => None,
        }
    }

    pub fn is_unplaced(&self) -> bool {
        matches!(self, Position::Unplaced)
    }

    /// Whether the position refers to a slot or cell that actually exists.
    pub fn in_bounds(&self) -> bool {
        match *self {
            Position::BoardCell { row, column } => {
                row < NUM_BOARD_ROWS && column < NUM_BOARD_COLUMNS
            }
            Position::RackSlot(index) => index < NUM_RACK_TILES,
            Position::Unplaced => true,
        }
    }

    /// Collapse positions that point outside the rack or board to `Unplaced`.
    pub fn clamped(self) -> Self {
        if self.in_bounds() {
            self
        } else {
            Position::Unplaced
        }
    }
}
