//! The player's rack and its drag-time shuffle buffer

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::letter::{initial_letters, Letter};
use super::nearest::nearest_linear;
use super::NUM_RACK_TILES;

/// Seven ordered rack slots plus the shuffle buffer used while a drag is in
/// progress.
///
/// During a drag out of slot `dragged`, the live slot keeps the dragged tile
/// and any tile shifted into that slot is parked in the shuffle buffer
/// instead. Dropping merges the buffer back.
#[derive(Debug, Clone)]
pub struct RackState {
    letters: [Letter; NUM_RACK_TILES],
    shuffle_buffer: [Letter; NUM_RACK_TILES],
}

impl Default for RackState {
    fn default() -> Self {
        Self::new(initial_letters())
    }
}

impl RackState {
    pub fn new(letters: [Letter; NUM_RACK_TILES]) -> Self {
        Self {
            letters,
            shuffle_buffer: [Letter::EMPTY; NUM_RACK_TILES],
        }
    }

    /// Live rack slots in visual order.
    pub fn letters(&self) -> &[Letter; NUM_RACK_TILES] {
        &self.letters
    }

    pub fn shuffle_buffer(&self) -> &[Letter; NUM_RACK_TILES] {
        &self.shuffle_buffer
    }

    pub fn get(&self, index: usize) -> Option<&Letter> {
        self.letters.get(index)
    }

    /// Tiles held by the rack, counting the shuffle buffer.
    pub fn tile_count(&self) -> usize {
        self.letters
            .iter()
            .chain(self.shuffle_buffer.iter())
            .filter(|l| !l.is_empty())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.letters.iter().all(|l| !l.is_empty())
    }

    /// Whether a slot can take a tile, with the slot under drag answering
    /// from the shuffle buffer.
    fn slot_is_empty(&self, index: usize, dragged: Option<usize>) -> bool {
        if dragged == Some(index) {
            self.shuffle_buffer[index].is_empty()
        } else {
            self.letters[index].is_empty()
        }
    }

    /// Nearest slot to `new_index` that can take a tile.
    pub fn nearest_empty(&self, new_index: usize, dragged: Option<usize>) -> Option<usize> {
        nearest_linear(NUM_RACK_TILES, new_index, |i| self.slot_is_empty(i, dragged))
    }

    /// First empty live slot at or after `start`.
    pub fn next_empty(&self, start: usize) -> Option<usize> {
        (start..NUM_RACK_TILES).find(|&i| self.letters[i].is_empty())
    }

    fn read_drag(&self, index: usize, dragged: Option<usize>) -> Letter {
        if dragged == Some(index) {
            self.shuffle_buffer[index]
        } else {
            self.letters[index]
        }
    }

    fn write_drag(&mut self, index: usize, dragged: Option<usize>, letter: Letter) {
        if dragged == Some(index) {
            self.shuffle_buffer[index] = letter;
        } else {
            self.letters[index] = letter;
        }
    }

    /// Open a gap at `new_index` by rotating the tiles between it and the
    /// nearest empty slot one step toward that slot.
    ///
    /// Returns the slot that absorbed the rotation, or `None` (rack
    /// untouched) if the rack has no room.
    pub fn shift(&mut self, new_index: usize, dragged: Option<usize>) -> Option<usize> {
        let empty = self.nearest_empty(new_index, dragged)?;

        let mut carry = self.read_drag(new_index, dragged);
        self.write_drag(new_index, dragged, Letter::EMPTY);

        let mut index = new_index;
        while index != empty {
            index = if empty > index { index + 1 } else { index - 1 };
            let displaced = self.read_drag(index, dragged);
            self.write_drag(index, dragged, carry);
            carry = displaced;
        }

        debug!(new_index, ?dragged, empty, "shifted rack");
        Some(empty)
    }

    /// Empty a slot, returning what it held.
    pub fn take(&mut self, index: usize) -> Letter {
        std::mem::replace(&mut self.letters[index], Letter::EMPTY)
    }

    pub fn place(&mut self, index: usize, letter: Letter) {
        self.letters[index] = letter;
    }

    /// Put a tile into the leftmost empty live slot.
    pub fn place_in_first_empty(&mut self, letter: Letter) -> Option<usize> {
        let index = self.next_empty(0)?;
        self.letters[index] = letter;
        Some(index)
    }

    /// Move every parked tile back into its live slot and clear the buffer.
    pub fn merge_shuffle_buffer(&mut self) {
        for (slot, parked) in self.letters.iter_mut().zip(self.shuffle_buffer.iter()) {
            if !parked.is_empty() {
                *slot = *parked;
            }
        }
        self.shuffle_buffer = [Letter::EMPTY; NUM_RACK_TILES];
    }

    /// Reorder the live rack by a uniformly random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..NUM_RACK_TILES).collect();
        order.shuffle(rng);

        let copy = self.letters;
        for (slot, source) in self.letters.iter_mut().zip(order) {
            *slot = copy[source];
        }
        debug!("shuffled rack");
    }
}
