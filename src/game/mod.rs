//! Game core: tiles, rack, board and drag resolution

pub mod board;
pub mod error;
pub mod letter;
pub mod nearest;
pub mod position;
pub mod rack;
pub mod resolver;

pub use board::{premium_at, BoardState, Premium};
pub use error::PlayError;
pub use letter::{initial_letters, Letter, BLANK};
pub use position::Position;
pub use rack::RackState;
pub use resolver::{
    AcceptAll, DropOutcome, FrontTaker, MoveResolver, PlacedTile, SlotLayout, TurnHooks,
};

/// Slots on a player's rack.
pub const NUM_RACK_TILES: usize = 7;

/// Board height.
pub const NUM_BOARD_ROWS: usize = 15;

/// Board width.
pub const NUM_BOARD_COLUMNS: usize = 15;
