//! Drag-and-drop resolution and turn actions
//!
//! `MoveResolver` owns the rack and board for one game view. The UI reports
//! drag moves and drops; the resolver turns them into rack shifts and tile
//! placements, and tells the UI when it needs to ask for a blank's letter.
//! Geometry stays with the UI behind [`SlotLayout`]; turn rules beyond tile
//! placement stay with the caller behind [`TurnHooks`].

use rand::Rng;
use tracing::{debug, info, trace, warn};

use super::board::BoardState;
use super::error::PlayError;
use super::letter::Letter;
use super::position::Position;
use super::rack::RackState;
use super::{NUM_BOARD_COLUMNS, NUM_BOARD_ROWS, NUM_RACK_TILES};

/// Which surface's tiles should be drawn on top while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontTaker {
    #[default]
    Unknown,
    Board,
    Rack,
}

/// Hit-testing supplied by whoever knows where slots are drawn.
pub trait SlotLayout {
    type Location;

    fn rack_slot_contains(&self, index: usize, location: &Self::Location) -> bool;

    fn board_cell_contains(&self, row: usize, column: usize, location: &Self::Location) -> bool;
}

/// A tile put down this turn and not yet committed.
#[derive(Debug, Clone, Copy)]
pub struct PlacedTile {
    pub row: usize,
    pub column: usize,
    pub letter: Letter,
}

/// Turn actions the core leaves to the caller: validating and scoring plays,
/// passing, and drawing replacement tiles.
pub trait TurnHooks {
    /// Decide whether the tiles placed this turn form an acceptable play.
    /// Accepted tiles are locked on the board.
    fn play(&mut self, _placed: &[PlacedTile]) -> bool {
        true
    }

    fn pass(&mut self) {}

    /// Called with the rack slots chosen for exchange.
    fn exchange(&mut self, _rack: &RackState, _chosen: &[usize]) {}
}

/// Hooks that accept every play and ignore passes and exchanges.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl TurnHooks for AcceptAll {}

/// What a drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Where the dragged tile ended up.
    pub landed: Position,
    /// Board cell whose blank needs a letter from the player.
    pub blank_prompt: Option<(usize, usize)>,
}

impl DropOutcome {
    fn stayed(origin: Position) -> Self {
        Self {
            landed: origin,
            blank_prompt: None,
        }
    }
}

/// Owner of the rack and board state for one game view.
#[derive(Debug)]
pub struct MoveResolver<H = AcceptAll> {
    rack: RackState,
    board: BoardState,
    rack_tiles_on_board: usize,
    front_taker: FrontTaker,
    pending_blank: Option<(usize, usize)>,
    exchange_picker_open: bool,
    exchange_chosen: [bool; NUM_RACK_TILES],
    hooks: H,
}

impl Default for MoveResolver<AcceptAll> {
    fn default() -> Self {
        Self::new(RackState::default(), BoardState::new(), AcceptAll)
    }
}

impl<H: TurnHooks> MoveResolver<H> {
    pub fn new(rack: RackState, board: BoardState, hooks: H) -> Self {
        Self {
            rack,
            board,
            rack_tiles_on_board: 0,
            front_taker: FrontTaker::Unknown,
            pending_blank: None,
            exchange_picker_open: false,
            exchange_chosen: [false; NUM_RACK_TILES],
            hooks,
        }
    }

    pub fn rack(&self) -> &RackState {
        &self.rack
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Tiles moved from the rack to the board this turn.
    pub fn rack_tiles_on_board(&self) -> usize {
        self.rack_tiles_on_board
    }

    pub fn front_taker(&self) -> FrontTaker {
        self.front_taker
    }

    pub fn pending_blank(&self) -> Option<(usize, usize)> {
        self.pending_blank
    }

    pub fn blank_picker_open(&self) -> bool {
        self.pending_blank.is_some()
    }

    pub fn exchange_picker_open(&self) -> bool {
        self.exchange_picker_open
    }

    pub fn exchange_chosen(&self) -> &[bool; NUM_RACK_TILES] {
        &self.exchange_chosen
    }

    /// Whether any picker is waiting on the player. Drags and actions are
    /// ignored meanwhile.
    pub fn picker_open(&self) -> bool {
        self.blank_picker_open() || self.exchange_picker_open
    }

    /// Whether Recall and Play have anything to act on.
    pub fn has_tiles_in_play(&self) -> bool {
        self.rack_tiles_on_board > 0 && !self.picker_open()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Tiles anywhere in the view: rack, shuffle buffer and board.
    pub fn tile_count(&self) -> usize {
        self.rack.tile_count() + self.board.tile_count()
    }

    /// The tile a drag from `origin` would pick up, if that drag is allowed.
    pub fn draggable_at(&self, origin: Position) -> Option<Letter> {
        if self.picker_open() {
            return None;
        }
        match origin.clamped() {
            Position::RackSlot(index) => self.rack.get(index).copied().filter(|l| !l.is_empty()),
            Position::BoardCell { row, column } if self.board.is_movable(row, column) => {
                self.board.get(row, column).copied()
            }
            _ => None,
        }
    }

    /// Track a tile being dragged from `origin` over `location`.
    ///
    /// Hovering over the rack makes room for the tile straight away; hovering
    /// over the board reports the cell without touching it.
    pub fn on_drag_move<L: SlotLayout>(
        &mut self,
        layout: &L,
        location: &L::Location,
        letter: &Letter,
        origin: Position,
    ) -> Position {
        if self.draggable_at(origin).is_none() {
            trace!(?origin, "ignoring move of undraggable tile");
            return Position::Unplaced;
        }

        self.front_taker = match origin {
            Position::RackSlot(_) => FrontTaker::Rack,
            Position::BoardCell { .. } => FrontTaker::Board,
            Position::Unplaced => self.front_taker,
        };

        if let Some(index) = (0..NUM_RACK_TILES).find(|&i| layout.rack_slot_contains(i, location)) {
            if self.rack.shift(index, origin.rack_index()).is_none() {
                trace!(index, %letter, "no room on rack");
                return Position::Unplaced;
            }
            return Position::RackSlot(index);
        }

        for row in 0..NUM_BOARD_ROWS {
            for column in 0..NUM_BOARD_COLUMNS {
                if layout.board_cell_contains(row, column, location) {
                    trace!(row, column, %letter, "hovering board");
                    return Position::BoardCell { row, column };
                }
            }
        }
        Position::Unplaced
    }

    /// Settle a drag that started at `start` and was released over `end`.
    pub fn on_drag_end(&mut self, letter: Letter, start: Position, end: Position) -> DropOutcome {
        let start = start.clamped();
        let end = end.clamped();

        let Some(dragged) = self.draggable_at(start) else {
            warn!(?start, "ignoring drop of undraggable tile");
            return DropOutcome::stayed(start);
        };
        if !dragged.same_face(&letter) {
            warn!(%letter, %dragged, ?start, "drop letter disagrees with origin, using origin");
        }

        self.front_taker = FrontTaker::Unknown;

        let outcome = match end {
            Position::BoardCell { row, column } => match self.board.nearest_empty(row, column) {
                Some(cell) => self.drop_on_board(dragged, start, cell),
                None => {
                    warn!(row, column, "board is full");
                    self.drop_off_surface(dragged, start)
                }
            },
            Position::RackSlot(index) => self.drop_on_rack(dragged, start, index),
            Position::Unplaced => self.drop_off_surface(dragged, start),
        };

        self.rack.merge_shuffle_buffer();
        debug!(?start, ?end, landed = ?outcome.landed, "tile dropped");
        outcome
    }

    fn drop_on_board(
        &mut self,
        letter: Letter,
        start: Position,
        (row, column): (usize, usize),
    ) -> DropOutcome {
        let mut blank_prompt = None;
        match start {
            Position::RackSlot(index) => {
                self.rack.take(index);
                self.rack_tiles_on_board += 1;
                if letter.is_blank() {
                    self.pending_blank = Some((row, column));
                    blank_prompt = Some((row, column));
                }
            }
            Position::BoardCell { row: from_row, column: from_column } => {
                self.board.take(from_row, from_column);
            }
            Position::Unplaced => return DropOutcome::stayed(start),
        }
        self.board.place(row, column, letter);
        DropOutcome {
            landed: Position::BoardCell { row, column },
            blank_prompt,
        }
    }

    fn drop_on_rack(&mut self, letter: Letter, start: Position, target: usize) -> DropOutcome {
        match start {
            Position::RackSlot(index) => {
                // Normally the hover already emptied `target`; fall back to the
                // closest free slot so a drop can never overwrite a tile.
                let Some(slot) = self.rack.nearest_empty(target, Some(index)) else {
                    return self.drop_off_surface(letter, start);
                };
                self.rack.take(index);
                self.rack.place(slot, letter);
                DropOutcome::stayed(Position::RackSlot(slot))
            }
            Position::BoardCell { row, column } => {
                let Some(slot) = self.rack.nearest_empty(target, None) else {
                    debug!(row, column, "rack full, tile stays on board");
                    return DropOutcome::stayed(start);
                };
                self.board.take(row, column);
                self.rack.place(slot, letter.off_board());
                self.rack_tiles_on_board = self.rack_tiles_on_board.saturating_sub(1);
                DropOutcome::stayed(Position::RackSlot(slot))
            }
            Position::Unplaced => DropOutcome::stayed(start),
        }
    }

    fn drop_off_surface(&mut self, letter: Letter, start: Position) -> DropOutcome {
        let Position::RackSlot(index) = start else {
            // Board tiles were never lifted; they stay where they were.
            return DropOutcome::stayed(start);
        };
        if self.rack.shuffle_buffer()[index].is_empty() {
            return DropOutcome::stayed(start);
        }
        // Another tile was shifted into the origin slot; the dragged tile
        // moves to the first free slot instead.
        match self.rack.place_in_first_empty(letter) {
            Some(slot) => DropOutcome::stayed(Position::RackSlot(slot)),
            None => {
                warn!(index, "no free rack slot for cancelled drag");
                DropOutcome::stayed(start)
            }
        }
    }

    /// Give the pending blank its letter.
    pub fn set_blank(&mut self, choice: char) -> Result<(), PlayError> {
        let (row, column) = self.pending_blank.ok_or(PlayError::NoPendingBlank)?;
        if !choice.is_ascii_alphabetic() {
            return Err(PlayError::InvalidBlankLetter(choice));
        }
        self.pending_blank = None;

        let current = self.board.get(row, column).copied().unwrap_or(Letter::EMPTY);
        if !current.is_unresolved_blank() {
            return Err(PlayError::BlankNotPending { row, column });
        }
        let resolved = current.with_choice(choice.to_ascii_uppercase());
        self.board.place(row, column, resolved);
        debug!(row, column, choice = %resolved, "blank resolved");
        Ok(())
    }

    /// Bring every tile placed this turn back to the rack.
    ///
    /// Returns how many tiles came back. Stops early if the rack fills.
    pub fn recall_tiles(&mut self) -> usize {
        if self.picker_open() {
            warn!("recall ignored while a picker is open");
            return 0;
        }

        let mut recalled = 0;
        let mut slot = self.rack.next_empty(0);
        'scan: for row in 0..NUM_BOARD_ROWS {
            for column in 0..NUM_BOARD_COLUMNS {
                let Some(index) = slot else {
                    break 'scan;
                };
                if !self.board.is_movable(row, column) {
                    continue;
                }
                let letter = self.board.take(row, column);
                self.rack.place(index, letter.off_board());
                recalled += 1;
                slot = self.rack.next_empty(index);
            }
        }
        self.rack_tiles_on_board = 0;
        info!(recalled, "recalled tiles");
        recalled
    }

    /// Randomly reorder the rack.
    pub fn shuffle_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.picker_open() {
            warn!("shuffle ignored while a picker is open");
            return;
        }
        self.rack.shuffle(rng);
    }

    /// Recall everything and open the exchange picker with nothing chosen.
    pub fn select_exchange(&mut self) {
        if self.picker_open() {
            return;
        }
        self.recall_tiles();
        self.exchange_chosen = [false; NUM_RACK_TILES];
        self.exchange_picker_open = true;
        debug!("exchange picker opened");
    }

    /// Toggle whether a rack slot is marked for exchange.
    pub fn choose_tile_for_exchange(&mut self, index: usize) -> Result<(), PlayError> {
        if !self.exchange_picker_open {
            return Err(PlayError::ExchangeNotOpen);
        }
        let chosen = self
            .exchange_chosen
            .get_mut(index)
            .ok_or(PlayError::SlotOutOfBounds(index))?;
        *chosen = !*chosen;
        Ok(())
    }

    /// Close the exchange picker without exchanging anything.
    pub fn cancel_exchange(&mut self) {
        self.exchange_picker_open = false;
        self.exchange_chosen = [false; NUM_RACK_TILES];
    }

    /// Hand the chosen slots to the turn hooks and close the picker.
    pub fn confirm_exchange(&mut self) -> Result<Vec<usize>, PlayError> {
        if !self.exchange_picker_open {
            return Err(PlayError::ExchangeNotOpen);
        }
        let chosen: Vec<usize> = self
            .exchange_chosen
            .iter()
            .enumerate()
            .filter(|(index, &picked)| picked && !self.rack.letters()[*index].is_empty())
            .map(|(index, _)| index)
            .collect();
        self.hooks.exchange(&self.rack, &chosen);
        self.cancel_exchange();
        info!(?chosen, "exchange confirmed");
        Ok(chosen)
    }

    pub fn confirm_pass(&mut self) {
        if self.picker_open() {
            return;
        }
        self.hooks.pass();
        info!("turn passed");
    }

    /// Offer this turn's tiles to the hooks; lock them if accepted.
    pub fn confirm_play(&mut self) -> bool {
        if self.picker_open() {
            return false;
        }
        let placed: Vec<PlacedTile> = self
            .board
            .unlocked_tiles()
            .map(|(row, column, letter)| PlacedTile { row, column, letter })
            .collect();
        if placed.is_empty() || !self.hooks.play(&placed) {
            info!(tiles = placed.len(), "play not accepted");
            return false;
        }
        for tile in &placed {
            // Cells come from `unlocked_tiles`, so they hold a tile.
            if let Err(err) = self.board.lock(tile.row, tile.column) {
                warn!(%err, "could not lock played tile");
            }
        }
        self.rack_tiles_on_board = 0;
        info!(tiles = placed.len(), "play committed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::letter::BLANK;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Layout where a location is simply the position being hovered.
    struct Direct;

    impl SlotLayout for Direct {
        type Location = Position;

        fn rack_slot_contains(&self, index: usize, location: &Position) -> bool {
            *location == Position::RackSlot(index)
        }

        fn board_cell_contains(&self, row: usize, column: usize, location: &Position) -> bool {
            *location == Position::BoardCell { row, column }
        }
    }

    fn rack_of(faces: &str) -> RackState {
        let mut letters = [Letter::EMPTY; NUM_RACK_TILES];
        for (slot, c) in letters.iter_mut().zip(faces.chars()) {
            *slot = match c {
                '_' => Letter::EMPTY,
                BLANK => Letter::blank(0),
                c => Letter::tile(c),
            };
        }
        RackState::new(letters)
    }

    fn rack_faces(resolver: &MoveResolver<impl TurnHooks>) -> String {
        resolver
            .rack()
            .letters()
            .iter()
            .map(|l| if l.is_empty() { '_' } else { l.character() })
            .collect()
    }

    fn resolver_with(faces: &str) -> MoveResolver {
        MoveResolver::new(rack_of(faces), BoardState::new(), AcceptAll)
    }

    /// Drag from `start` over each hover target, then drop on the last one.
    fn drag(
        resolver: &mut MoveResolver<impl TurnHooks>,
        start: Position,
        hovers: &[Position],
    ) -> DropOutcome {
        let letter = resolver.draggable_at(start).unwrap_or(Letter::EMPTY);
        let mut end = Position::Unplaced;
        for hover in hovers {
            end = resolver.on_drag_move(&Direct, hover, &letter, start);
        }
        resolver.on_drag_end(letter, start, end)
    }

    fn board_char(resolver: &MoveResolver<impl TurnHooks>, row: usize, column: usize) -> char {
        resolver.board().get(row, column).unwrap().character()
    }

    #[test]
    fn test_rack_to_board() {
        let mut resolver = resolver_with("ABCDEFG");
        let outcome = drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);

        assert_eq!(outcome.landed, Position::board(7, 7));
        assert_eq!(outcome.blank_prompt, None);
        assert_eq!(board_char(&resolver, 7, 7), 'A');
        assert_eq!(rack_faces(&resolver), "_BCDEFG");
        assert_eq!(resolver.rack_tiles_on_board(), 1);
        assert_eq!(resolver.front_taker(), FrontTaker::Unknown);
    }

    #[test]
    fn test_front_taker_follows_origin() {
        let mut resolver = resolver_with("ABCDEFG");
        let a = Letter::tile('A');
        resolver.on_drag_move(&Direct, &Position::board(3, 3), &a, Position::rack(0));
        assert_eq!(resolver.front_taker(), FrontTaker::Rack);
        resolver.on_drag_end(a, Position::rack(0), Position::board(3, 3));
        assert_eq!(resolver.front_taker(), FrontTaker::Unknown);

        resolver.on_drag_move(&Direct, &Position::Unplaced, &a, Position::board(3, 3));
        assert_eq!(resolver.front_taker(), FrontTaker::Board);
        resolver.on_drag_end(a, Position::board(3, 3), Position::Unplaced);
        assert_eq!(resolver.front_taker(), FrontTaker::Unknown);
    }

    #[test]
    fn test_board_hover_does_not_shift() {
        let mut resolver = resolver_with("ABCDEFG");
        let a = Letter::tile('A');
        let hovered = resolver.on_drag_move(&Direct, &Position::board(0, 0), &a, Position::rack(0));
        assert_eq!(hovered, Position::board(0, 0));
        assert_eq!(resolver.board().tile_count(), 0);
        assert_eq!(rack_faces(&resolver), "ABCDEFG");
    }

    #[test]
    fn test_drop_on_occupied_cell_uses_bfs_order() {
        let mut resolver = resolver_with("ABCDEFG");
        drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);
        drag(&mut resolver, Position::rack(1), &[Position::board(7, 7)]);
        assert_eq!(board_char(&resolver, 8, 7), 'B');

        drag(&mut resolver, Position::rack(2), &[Position::board(7, 7)]);
        assert_eq!(board_char(&resolver, 7, 8), 'C');

        drag(&mut resolver, Position::rack(3), &[Position::board(7, 7)]);
        assert_eq!(board_char(&resolver, 6, 7), 'D');

        drag(&mut resolver, Position::rack(4), &[Position::board(7, 7)]);
        assert_eq!(board_char(&resolver, 7, 6), 'E');
        assert_eq!(resolver.rack_tiles_on_board(), 5);
    }

    /// Every cell taken: a third locked from earlier turns, the rest unlocked.
    fn full_board() -> BoardState {
        let mut board = BoardState::new();
        for row in 0..NUM_BOARD_ROWS {
            for column in 0..NUM_BOARD_COLUMNS {
                if (row + column) % 3 == 0 {
                    board.place_locked(row, column, Letter::tile('Z')).unwrap();
                } else {
                    board.place(row, column, Letter::tile('Y'));
                }
            }
        }
        board
    }

    #[test]
    fn test_drop_on_full_board_returns_to_rack() {
        let mut resolver = MoveResolver::new(rack_of("ABC_EFG"), full_board(), AcceptAll);

        let outcome = drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);
        assert_eq!(outcome.landed, Position::rack(0));
        assert_eq!(outcome.blank_prompt, None);
        assert_eq!(rack_faces(&resolver), "ABC_EFG");
        assert_eq!(resolver.rack_tiles_on_board(), 0);
        assert_eq!(resolver.board().tile_count(), NUM_BOARD_ROWS * NUM_BOARD_COLUMNS);
    }

    #[test]
    fn test_drop_on_full_board_after_rack_shift() {
        let mut resolver = MoveResolver::new(rack_of("ABC_EFG"), full_board(), AcceptAll);

        // Hovering slot 1 parks B in the buffer of the origin slot 2.
        let outcome = drag(
            &mut resolver,
            Position::rack(2),
            &[Position::rack(1), Position::board(7, 7)],
        );
        assert_eq!(outcome.landed, Position::rack(1));
        assert_eq!(rack_faces(&resolver), "ACB_EFG");
        assert!(resolver.rack().shuffle_buffer().iter().all(|l| l.is_empty()));
        assert_eq!(resolver.rack_tiles_on_board(), 0);
        assert_eq!(resolver.tile_count(), 6 + NUM_BOARD_ROWS * NUM_BOARD_COLUMNS);
    }

    #[test]
    fn test_drop_never_lands_on_locked_cell() {
        let mut board = BoardState::new();
        board.place_locked(7, 7, Letter::tile('Z')).unwrap();
        let mut resolver = MoveResolver::new(rack_of("ABCDEFG"), board, AcceptAll);

        drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);
        assert_eq!(board_char(&resolver, 7, 7), 'Z');
        assert_eq!(board_char(&resolver, 8, 7), 'A');
    }

    #[test]
    fn test_locked_tiles_cannot_be_dragged() {
        let mut board = BoardState::new();
        board.place_locked(0, 0, Letter::tile('Z')).unwrap();
        let mut resolver = MoveResolver::new(rack_of("ABC_EFG"), board, AcceptAll);

        let outcome = drag(&mut resolver, Position::board(0, 0), &[Position::rack(3)]);
        assert_eq!(outcome.landed, Position::board(0, 0));
        assert_eq!(board_char(&resolver, 0, 0), 'Z');
        assert_eq!(rack_faces(&resolver), "ABC_EFG");
    }

    #[test]
    fn test_board_to_board() {
        let mut resolver = resolver_with("ABCDEFG");
        drag(&mut resolver, Position::rack(0), &[Position::board(2, 2)]);
        let outcome = drag(&mut resolver, Position::board(2, 2), &[Position::board(10, 4)]);

        assert_eq!(outcome.landed, Position::board(10, 4));
        assert!(resolver.board().is_empty_cell(2, 2));
        assert_eq!(board_char(&resolver, 10, 4), 'A');
        assert_eq!(resolver.rack_tiles_on_board(), 1);
    }

    #[test]
    fn test_board_tile_released_off_surface_stays() {
        let mut resolver = resolver_with("ABCDEFG");
        drag(&mut resolver, Position::rack(0), &[Position::board(2, 2)]);
        let outcome = drag(
            &mut resolver,
            Position::board(2, 2),
            &[Position::board(5, 5), Position::Unplaced],
        );
        assert_eq!(outcome.landed, Position::board(2, 2));
        assert_eq!(board_char(&resolver, 2, 2), 'A');
        assert!(resolver.board().is_empty_cell(5, 5));
    }

    #[test]
    fn test_board_to_rack() {
        let mut resolver = resolver_with("ABCDEFG");
        drag(&mut resolver, Position::rack(3), &[Position::board(4, 4)]);
        assert_eq!(rack_faces(&resolver), "ABC_EFG");

        let outcome = drag(&mut resolver, Position::board(4, 4), &[Position::rack(0)]);
        assert_eq!(outcome.landed, Position::rack(0));
        assert_eq!(rack_faces(&resolver), "DABCEFG");
        assert_eq!(resolver.board().tile_count(), 0);
        assert_eq!(resolver.rack_tiles_on_board(), 0);
    }

    #[test]
    fn test_board_tile_cannot_enter_full_rack() {
        let mut board = BoardState::new();
        board.place(1, 1, Letter::tile('Q'));
        let mut resolver = MoveResolver::new(rack_of("ABCDEFG"), board, AcceptAll);

        let q = Letter::tile('Q');
        let hovered = resolver.on_drag_move(&Direct, &Position::rack(2), &q, Position::board(1, 1));
        assert_eq!(hovered, Position::Unplaced);

        let outcome = resolver.on_drag_end(q, Position::board(1, 1), Position::rack(2));
        assert_eq!(outcome.landed, Position::board(1, 1));
        assert_eq!(rack_faces(&resolver), "ABCDEFG");
        assert_eq!(board_char(&resolver, 1, 1), 'Q');
    }

    #[test]
    fn test_rack_reorder_by_drag() {
        let mut resolver = resolver_with("ABCDEFG");
        let outcome = drag(
            &mut resolver,
            Position::rack(0),
            &[Position::rack(1), Position::rack(2), Position::rack(3)],
        );
        assert_eq!(outcome.landed, Position::rack(3));
        assert_eq!(rack_faces(&resolver), "BCDAEFG");
        assert!(resolver.rack().shuffle_buffer().iter().all(|l| l.is_empty()));
    }

    #[test]
    fn test_rack_drop_on_own_slot() {
        let mut resolver = resolver_with("ABCDEFG");
        let outcome = drag(
            &mut resolver,
            Position::rack(2),
            &[Position::rack(3), Position::rack(2)],
        );
        assert_eq!(outcome.landed, Position::rack(2));
        assert_eq!(rack_faces(&resolver), "ABCDEFG");
    }

    #[test]
    fn test_cancelled_rack_drag_keeps_tile() {
        let mut resolver = resolver_with("ABCDEFG");
        // A hovers over B, so B is parked in A's slot; then A is released
        // off every surface.
        let outcome = drag(
            &mut resolver,
            Position::rack(0),
            &[Position::rack(1), Position::Unplaced],
        );

        assert_eq!(outcome.landed, Position::rack(1));
        assert_eq!(rack_faces(&resolver), "BACDEFG");
        assert_eq!(resolver.tile_count(), 7);
    }

    #[test]
    fn test_cancelled_rack_drag_uses_first_empty_slot() {
        let mut resolver = resolver_with("_BC_EFG");
        // C over B parks B in C's slot; released, C takes the leftmost gap.
        let outcome = drag(
            &mut resolver,
            Position::rack(2),
            &[Position::rack(1), Position::Unplaced],
        );
        assert_eq!(outcome.landed, Position::rack(0));
        assert_eq!(rack_faces(&resolver), "C_B_EFG");
    }

    #[test]
    fn test_cancelled_drag_without_displacement_is_noop() {
        let mut resolver = resolver_with("ABCDEFG");
        let outcome = drag(
            &mut resolver,
            Position::rack(4),
            &[Position::board(0, 0), Position::Unplaced],
        );
        assert_eq!(outcome.landed, Position::rack(4));
        assert_eq!(rack_faces(&resolver), "ABCDEFG");
        assert_eq!(resolver.rack_tiles_on_board(), 0);
    }

    #[test]
    fn test_blank_prompt_and_resolution() {
        let mut resolver = resolver_with("ABCDE--");
        let outcome = drag(&mut resolver, Position::rack(5), &[Position::board(7, 7)]);

        assert_eq!(outcome.blank_prompt, Some((7, 7)));
        assert!(resolver.blank_picker_open());
        assert!(resolver.picker_open());
        assert!(resolver.board().get(7, 7).unwrap().is_unresolved_blank());

        resolver.set_blank('q').unwrap();
        let resolved = resolver.board().get(7, 7).unwrap();
        assert_eq!(resolved.character(), 'Q');
        assert!(resolved.is_blank());
        assert_eq!(resolved.value(), 0);
        assert!(!resolver.blank_picker_open());
    }

    #[test]
    fn test_drags_ignored_while_blank_pending() {
        let mut resolver = resolver_with("ABCDE--");
        drag(&mut resolver, Position::rack(5), &[Position::board(7, 7)]);

        let outcome = drag(&mut resolver, Position::rack(0), &[Position::board(0, 0)]);
        assert_eq!(outcome.landed, Position::rack(0));
        assert!(resolver.board().is_empty_cell(0, 0));
        assert_eq!(resolver.recall_tiles(), 0);
    }

    #[test]
    fn test_set_blank_errors() {
        let mut resolver = resolver_with("ABCDE--");
        assert_eq!(resolver.set_blank('A'), Err(PlayError::NoPendingBlank));

        drag(&mut resolver, Position::rack(6), &[Position::board(3, 3)]);
        assert_eq!(resolver.set_blank('7'), Err(PlayError::InvalidBlankLetter('7')));
        assert!(resolver.blank_picker_open());

        // The pending cell changed behind the picker's back.
        resolver.board.take(3, 3);
        assert_eq!(
            resolver.set_blank('A'),
            Err(PlayError::BlankNotPending { row: 3, column: 3 })
        );
    }

    #[test]
    fn test_blank_reverts_when_dragged_back() {
        let mut resolver = resolver_with("ABCDE-_");
        drag(&mut resolver, Position::rack(5), &[Position::board(7, 7)]);
        resolver.set_blank('Z').unwrap();

        drag(&mut resolver, Position::board(7, 7), &[Position::rack(6)]);
        let back = resolver.rack().get(6).unwrap();
        assert_eq!(back.character(), BLANK);
        assert!(back.is_blank());
    }

    #[test]
    fn test_recall_reverts_blank() {
        let mut resolver = resolver_with("ABCDE--");
        drag(&mut resolver, Position::rack(5), &[Position::board(7, 7)]);
        resolver.set_blank('Q').unwrap();
        drag(&mut resolver, Position::rack(0), &[Position::board(7, 8)]);

        assert_eq!(resolver.recall_tiles(), 2);
        assert_eq!(resolver.board().tile_count(), 0);
        assert_eq!(resolver.rack_tiles_on_board(), 0);
        // Row-major: the blank at (7, 7) fills slot 0, A at (7, 8) slot 5.
        assert_eq!(rack_faces(&resolver), "-BCDEA-");
        assert!(resolver.rack().get(0).unwrap().is_blank());
    }

    #[test]
    fn test_recall_leaves_locked_tiles() {
        let mut board = BoardState::new();
        board.place_locked(0, 0, Letter::tile('Z')).unwrap();
        let mut resolver = MoveResolver::new(rack_of("ABCDEFG"), board, AcceptAll);
        drag(&mut resolver, Position::rack(1), &[Position::board(0, 1)]);

        assert_eq!(resolver.recall_tiles(), 1);
        assert_eq!(board_char(&resolver, 0, 0), 'Z');
        assert_eq!(rack_faces(&resolver), "ABCDEFG");
    }

    #[test]
    fn test_recall_stops_when_rack_fills() {
        let mut board = BoardState::new();
        board.place(0, 0, Letter::tile('X'));
        board.place(0, 1, Letter::tile('Y'));
        let mut resolver = MoveResolver::new(rack_of("ABCDEF_"), board, AcceptAll);

        assert_eq!(resolver.recall_tiles(), 1);
        assert_eq!(rack_faces(&resolver), "ABCDEFX");
        assert_eq!(board_char(&resolver, 0, 1), 'Y');
        assert_eq!(resolver.rack_tiles_on_board(), 0);
    }

    #[test]
    fn test_shuffle_tiles_is_permutation() {
        let mut resolver = resolver_with("ABCD_FG");
        let mut rng = StdRng::seed_from_u64(3);
        let mut before: Vec<char> = rack_faces(&resolver).chars().collect();
        before.sort_unstable();
        resolver.shuffle_tiles(&mut rng);
        let mut after: Vec<char> = rack_faces(&resolver).chars().collect();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[derive(Default)]
    struct Recorder {
        plays: usize,
        passes: usize,
        exchanged: Vec<usize>,
        accept: bool,
    }

    impl TurnHooks for Recorder {
        fn play(&mut self, placed: &[PlacedTile]) -> bool {
            self.plays += placed.len();
            self.accept
        }

        fn pass(&mut self) {
            self.passes += 1;
        }

        fn exchange(&mut self, _rack: &RackState, chosen: &[usize]) {
            self.exchanged = chosen.to_vec();
        }
    }

    #[test]
    fn test_confirm_play_locks_when_accepted() {
        let hooks = Recorder {
            accept: true,
            ..Default::default()
        };
        let mut resolver = MoveResolver::new(rack_of("ABCDEFG"), BoardState::new(), hooks);
        drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);
        drag(&mut resolver, Position::rack(1), &[Position::board(7, 8)]);

        assert!(resolver.confirm_play());
        assert_eq!(resolver.hooks().plays, 2);
        assert!(resolver.board().is_locked(7, 7));
        assert!(resolver.board().is_locked(7, 8));
        assert_eq!(resolver.rack_tiles_on_board(), 0);
        assert_eq!(resolver.recall_tiles(), 0);
    }

    #[test]
    fn test_confirm_play_rejected_keeps_tiles_movable() {
        let mut resolver =
            MoveResolver::new(rack_of("ABCDEFG"), BoardState::new(), Recorder::default());
        drag(&mut resolver, Position::rack(0), &[Position::board(7, 7)]);

        assert!(!resolver.confirm_play());
        assert!(!resolver.board().is_locked(7, 7));
        assert_eq!(resolver.rack_tiles_on_board(), 1);
    }

    #[test]
    fn test_confirm_play_with_nothing_placed() {
        let mut resolver =
            MoveResolver::new(rack_of("ABCDEFG"), BoardState::new(), Recorder::default());
        assert!(!resolver.confirm_play());
        assert_eq!(resolver.hooks().plays, 0);
    }

    #[test]
    fn test_pass_reaches_hooks() {
        let mut resolver =
            MoveResolver::new(rack_of("ABCDEFG"), BoardState::new(), Recorder::default());
        resolver.confirm_pass();
        assert_eq!(resolver.hooks().passes, 1);
    }

    #[test]
    fn test_exchange_flow() {
        let mut resolver =
            MoveResolver::new(rack_of("ABCDEFG"), BoardState::new(), Recorder::default());
        drag(&mut resolver, Position::rack(2), &[Position::board(7, 7)]);

        assert_eq!(resolver.choose_tile_for_exchange(0), Err(PlayError::ExchangeNotOpen));

        resolver.select_exchange();
        assert!(resolver.exchange_picker_open());
        // Selecting recalls everything first.
        assert_eq!(resolver.board().tile_count(), 0);
        assert_eq!(rack_faces(&resolver), "ABCDEFG");

        resolver.choose_tile_for_exchange(1).unwrap();
        resolver.choose_tile_for_exchange(4).unwrap();
        resolver.choose_tile_for_exchange(4).unwrap();
        resolver.choose_tile_for_exchange(6).unwrap();
        assert_eq!(
            resolver.choose_tile_for_exchange(NUM_RACK_TILES),
            Err(PlayError::SlotOutOfBounds(NUM_RACK_TILES))
        );

        assert_eq!(resolver.confirm_exchange(), Ok(vec![1, 6]));
        assert_eq!(resolver.hooks().exchanged, vec![1, 6]);
        assert!(!resolver.exchange_picker_open());
        assert!(resolver.exchange_chosen().iter().all(|c| !c));
    }

    #[test]
    fn test_cancel_exchange() {
        let mut resolver = resolver_with("ABCDEFG");
        resolver.select_exchange();
        resolver.choose_tile_for_exchange(3).unwrap();
        resolver.cancel_exchange();
        assert!(!resolver.exchange_picker_open());
        assert!(!resolver.exchange_chosen()[3]);
        assert_eq!(resolver.confirm_exchange(), Err(PlayError::ExchangeNotOpen));
    }

    fn random_position(rng: &mut StdRng) -> Position {
        match rng.random_range(0..4) {
            0 => Position::Unplaced,
            1 => Position::rack(rng.random_range(0..NUM_RACK_TILES)),
            _ => Position::board(rng.random_range(0..4), rng.random_range(0..4)),
        }
    }

    #[test]
    fn test_random_drags_conserve_tiles() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut board = BoardState::new();
        board.place_locked(1, 1, Letter::tile('Z')).unwrap();
        let mut resolver = MoveResolver::new(rack_of("ABCDE--"), board, AcceptAll);
        let total = resolver.tile_count();

        for step in 0..2000 {
            if resolver.blank_picker_open() {
                resolver.set_blank('S').unwrap();
            }
            match rng.random_range(0..20) {
                0 => {
                    resolver.recall_tiles();
                    let unlocked = resolver.board().unlocked_tiles().count();
                    assert!(unlocked == 0 || resolver.rack().is_full());
                }
                1 => resolver.shuffle_tiles(&mut rng),
                _ => {
                    let start = random_position(&mut rng);
                    let hovers: Vec<Position> =
                        (0..rng.random_range(1..5)).map(|_| random_position(&mut rng)).collect();
                    drag(&mut resolver, start, &hovers);
                }
            }

            assert_eq!(resolver.tile_count(), total, "tile count changed at step {step}");
            assert!(resolver.rack().shuffle_buffer().iter().all(|l| l.is_empty()));
            assert_eq!(board_char(&resolver, 1, 1), 'Z');
            assert_eq!(
                resolver.rack_tiles_on_board(),
                resolver.board().unlocked_tiles().count(),
                "uncommitted count drifted at step {step}"
            );
        }
    }
}
