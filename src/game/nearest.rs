//! Nearest-empty-slot search for the rack (linear) and the board (grid)
//!
//! Both searches prefer the target itself when it is empty and otherwise
//! widen outward. The visiting order decides ties and is part of the game's
//! feel: rack tiles shift toward higher indices first, and board drops
//! settle down, then right, then up, then left.

use std::collections::VecDeque;

/// Neighbour offsets in visiting order: down, right, up, left.
const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Find the empty index closest to `target` in a row of `len` slots.
///
/// At each distance `target + delta` is checked before `target - delta`.
pub fn nearest_linear(
    len: usize,
    target: usize,
    is_empty: impl Fn(usize) -> bool,
) -> Option<usize> {
    for delta in 0..len {
        if let Some(index) = target.checked_add(delta).filter(|&i| i < len) {
            if is_empty(index) {
                return Some(index);
            }
        }
        if let Some(index) = target.checked_sub(delta).filter(|&i| i < len) {
            if is_empty(index) {
                return Some(index);
            }
        }
    }
    None
}

/// Breadth-first search from `target` for the first empty cell of a
/// `rows` x `columns` grid.
pub fn nearest_grid(
    rows: usize,
    columns: usize,
    target: (usize, usize),
    is_empty: impl Fn(usize, usize) -> bool,
) -> Option<(usize, usize)> {
    let (row, column) = target;
    if row >= rows || column >= columns {
        return None;
    }

    let mut visited = vec![false; rows * columns];
    let mut queue = VecDeque::with_capacity(rows * columns);
    visited[row * columns + column] = true;
    queue.push_back(target);

    while let Some((row, column)) = queue.pop_front() {
        if is_empty(row, column) {
            return Some((row, column));
        }
        for (dr, dc) in NEIGHBOURS {
            let Some(next_row) = row.checked_add_signed(dr).filter(|&r| r < rows) else {
                continue;
            };
            let Some(next_column) = column.checked_add_signed(dc).filter(|&c| c < columns) else {
                continue;
            };
            let seen = &mut visited[next_row * columns + next_column];
            if !*seen {
                *seen = true;
                queue.push_back((next_row, next_column));
            }
        }
    }
    None
}
