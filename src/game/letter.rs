//! Tile faces

use std::fmt;

use super::NUM_RACK_TILES;

/// Placeholder shown on a blank tile that has no letter assigned.
pub const BLANK: char = '-';

/// Character carried by the empty-slot sentinel.
pub const INVISIBLE: char = ' ';

/// Standard English tile values. Blanks are worth nothing.
const LETTER_VALUES: [(char, u32); 26] = [
    ('A', 1),
    ('B', 3),
    ('C', 3),
    ('D', 2),
    ('E', 1),
    ('F', 4),
    ('G', 2),
    ('H', 4),
    ('I', 1),
    ('J', 8),
    ('K', 5),
    ('L', 1),
    ('M', 3),
    ('N', 1),
    ('O', 1),
    ('P', 3),
    ('Q', 10),
    ('R', 1),
    ('S', 1),
    ('T', 1),
    ('U', 1),
    ('V', 4),
    ('W', 4),
    ('X', 8),
    ('Y', 4),
    ('Z', 10),
];

/// A single tile face: the letter shown, whether it is a blank, and its value.
///
/// `Letter` deliberately has no `PartialEq`. Use [`Letter::same_face`], which
/// compares the character and blank flag but not the value.
#[derive(Debug, Clone, Copy)]
pub struct Letter {
    character: char,
    is_blank: bool,
    value: u32,
}

impl Letter {
    /// Sentinel for an unoccupied slot or cell.
    pub const EMPTY: Letter = Letter {
        character: INVISIBLE,
        is_blank: false,
        value: 0,
    };

    /// Create a letter with an explicit value.
    pub const fn new(character: char, is_blank: bool, value: u32) -> Self {
        Self {
            character,
            is_blank,
            value,
        }
    }

    /// A regular tile carrying its standard value.
    pub fn tile(character: char) -> Self {
        let character = character.to_ascii_uppercase();
        Self::new(character, false, letter_value(character))
    }

    /// An unassigned blank tile.
    pub const fn blank(value: u32) -> Self {
        Self::new(BLANK, true, value)
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn is_blank(&self) -> bool {
        self.is_blank
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Face equality: character and blank flag match, value ignored.
    pub fn same_face(&self, other: &Letter) -> bool {
        self.character == other.character && self.is_blank == other.is_blank
    }

    /// Whether this is the empty-slot sentinel.
    pub fn is_empty(&self) -> bool {
        self.same_face(&Self::EMPTY)
    }

    /// A blank still waiting for the player to choose its letter.
    pub fn is_unresolved_blank(&self) -> bool {
        self.is_blank && self.character == BLANK
    }

    /// The face this tile shows once it leaves the board.
    ///
    /// Blanks drop their chosen letter and show the placeholder again.
    pub fn off_board(self) -> Self {
        if self.is_blank {
            Self::blank(self.value)
        } else {
            self
        }
    }

    /// A blank with the given letter chosen for it, keeping its value.
    pub fn with_choice(self, choice: char) -> Self {
        Self::new(choice, true, self.value)
    }
}

impl Default for Letter {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character)
    }
}

/// Value of a letter tile. Unknown characters are worth nothing.
pub fn letter_value(character: char) -> u32 {
    let upper = character.to_ascii_uppercase();
    LETTER_VALUES
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

/// The rack every new game view starts with.
pub fn initial_letters() -> [Letter; NUM_RACK_TILES] {
    [
        Letter::tile('A'),
        Letter::tile('B'),
        Letter::tile('C'),
        Letter::tile('D'),
        Letter::tile('E'),
        Letter::blank(0),
        Letter::blank(0),
    ]
}
