//! Errors raised by the game core

/// Rule and consistency violations reported by the board, rack and resolver.
///
/// `BlankNotPending` means the board drifted out of sync with the picker;
/// callers treat it as a bug, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("no blank tile is waiting for a letter")]
    NoPendingBlank,

    #[error("cell ({row}, {column}) no longer holds an unresolved blank")]
    BlankNotPending { row: usize, column: usize },

    #[error("'{0}' cannot be assigned to a blank")]
    InvalidBlankLetter(char),

    #[error("cell ({row}, {column}) is outside the board")]
    CellOutOfBounds { row: usize, column: usize },

    #[error("rack slot {0} is outside the rack")]
    SlotOutOfBounds(usize),

    #[error("cell ({row}, {column}) is empty and cannot be locked")]
    LockEmptyCell { row: usize, column: usize },

    #[error("the exchange picker is not open")]
    ExchangeNotOpen,
}
