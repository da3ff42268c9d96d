//! Screen geometry: where every rack slot and board cell is drawn
//!
//! The same rects drive both rendering and mouse hit-testing, so a tile is
//! always dropped where it appears to be.

use lobsterble::game::{Position, SlotLayout, NUM_BOARD_COLUMNS, NUM_BOARD_ROWS, NUM_RACK_TILES};
use ratatui::layout::{Constraint, Layout, Margin, Position as Point, Rect};

/// Terminal columns per board cell.
pub const CELL_WIDTH: u16 = 3;
/// Terminal columns per rack slot.
pub const SLOT_WIDTH: u16 = 5;

const BOARD_WIDTH: u16 = CELL_WIDTH * NUM_BOARD_COLUMNS as u16 + 2;
const BOARD_HEIGHT: u16 = NUM_BOARD_ROWS as u16 + 2;
const RACK_WIDTH: u16 = SLOT_WIDTH * NUM_RACK_TILES as u16 + 2;

/// Rects for every region of the play space.
#[derive(Debug, Clone, Default)]
pub struct SlotGrid {
    pub area: Rect,
    pub header: Rect,
    pub board: Rect,
    pub rack: Rect,
    pub actions: Rect,
    pub footer: Rect,
    rack_slots: [Rect; NUM_RACK_TILES],
    cells: [[Rect; NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS],
}

impl SlotGrid {
    /// Lay out the play space inside `area`.
    pub fn new(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(3),            // Title and scores
            Constraint::Length(BOARD_HEIGHT), // Board
            Constraint::Length(3),            // Rack
            Constraint::Length(4),            // Actions and feedback
            Constraint::Min(0),               // Help
        ])
        .split(area);

        let board = centered(rows[1], BOARD_WIDTH);
        let rack = centered(rows[2], RACK_WIDTH);
        let board_inner = board.inner(Margin::new(1, 1));
        let rack_inner = rack.inner(Margin::new(1, 1));

        let mut cells = [[Rect::default(); NUM_BOARD_COLUMNS]; NUM_BOARD_ROWS];
        for (row, cells_in_row) in cells.iter_mut().enumerate() {
            for (column, cell) in cells_in_row.iter_mut().enumerate() {
                *cell = Rect::new(
                    board_inner.x + column as u16 * CELL_WIDTH,
                    board_inner.y + row as u16,
                    CELL_WIDTH,
                    1,
                )
                .intersection(board_inner);
            }
        }

        let mut rack_slots = [Rect::default(); NUM_RACK_TILES];
        for (index, slot) in rack_slots.iter_mut().enumerate() {
            *slot = Rect::new(rack_inner.x + index as u16 * SLOT_WIDTH, rack_inner.y, SLOT_WIDTH, 1)
                .intersection(rack_inner);
        }

        Self {
            area,
            header: rows[0],
            board,
            rack,
            actions: rows[3],
            footer: rows[4],
            rack_slots,
            cells,
        }
    }

    pub fn rack_slot(&self, index: usize) -> Rect {
        self.rack_slots[index]
    }

    pub fn board_cell(&self, row: usize, column: usize) -> Rect {
        self.cells[row][column]
    }

    /// The slot or cell under a point, rack first.
    pub fn position_at(&self, point: Point) -> Position {
        if let Some(index) = (0..NUM_RACK_TILES).find(|&i| self.rack_slot_contains(i, &point)) {
            return Position::RackSlot(index);
        }
        for row in 0..NUM_BOARD_ROWS {
            for column in 0..NUM_BOARD_COLUMNS {
                if self.board_cell_contains(row, column, &point) {
                    return Position::BoardCell { row, column };
                }
            }
        }
        Position::Unplaced
    }
}

impl SlotLayout for SlotGrid {
    type Location = Point;

    fn rack_slot_contains(&self, index: usize, location: &Point) -> bool {
        self.rack_slots.get(index).is_some_and(|slot| slot.contains(*location))
    }

    fn board_cell_contains(&self, row: usize, column: usize, location: &Point) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .is_some_and(|cell| cell.contains(*location))
    }
}

/// A horizontally centred strip of `width` columns inside `area`.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

/// A rect of at most `width` x `height` centred in `area`.
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SlotGrid {
        SlotGrid::new(Rect::new(0, 0, 80, 40))
    }

    #[test]
    fn test_board_cells_tile_the_board() {
        let grid = grid();
        assert_eq!(grid.board, Rect::new(16, 3, 47, 17));
        assert_eq!(grid.board_cell(0, 0), Rect::new(17, 4, 3, 1));
        assert_eq!(grid.board_cell(14, 14), Rect::new(59, 18, 3, 1));
    }

    #[test]
    fn test_rack_slots_follow_board() {
        let grid = grid();
        assert_eq!(grid.rack, Rect::new(21, 20, 37, 3));
        assert_eq!(grid.rack_slot(0), Rect::new(22, 21, 5, 1));
        assert_eq!(grid.rack_slot(6), Rect::new(52, 21, 5, 1));
    }

    #[test]
    fn test_hit_testing() {
        let grid = grid();
        assert_eq!(grid.position_at(Point::new(23, 21)), Position::RackSlot(0));
        assert_eq!(grid.position_at(Point::new(56, 21)), Position::RackSlot(6));
        assert_eq!(grid.position_at(Point::new(19, 4)), Position::board(0, 0));
        assert_eq!(grid.position_at(Point::new(20, 4)), Position::board(0, 1));
        assert_eq!(grid.position_at(Point::new(38, 11)), Position::board(7, 7));
        assert_eq!(grid.position_at(Point::new(0, 0)), Position::Unplaced);
        assert_eq!(grid.position_at(Point::new(16, 4)), Position::Unplaced);
    }

    #[test]
    fn test_tiny_terminal_has_no_phantom_hits() {
        let grid = SlotGrid::new(Rect::new(0, 0, 10, 5));
        assert!(!grid.board_cell_contains(14, 14, &Point::new(9, 4)));
        assert!(!grid.rack_slot_contains(6, &Point::new(9, 4)));
    }

    #[test]
    fn test_centered_popup() {
        let area = Rect::new(0, 0, 80, 40);
        assert_eq!(centered_popup(area, 40, 6), Rect::new(20, 17, 40, 6));
        assert_eq!(centered_popup(Rect::new(0, 0, 10, 4), 40, 6), Rect::new(0, 0, 10, 4));
    }
}
