//! Cells in the world.

use std::{
    fmt::{Debug, Error, Formatter},
    sync::{Mutex, MutexGuard, PoisonError},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed.
pub type Coord = (usize, usize);

/// The maximal number of neighbours of a cell.
pub const MAX_NEIGHBOURS: u8 = 8;

/// A copy of everything the rules need to know about a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellState {
    /// Whether the cell is alive.
    pub alive: bool,
    /// Number of living cells around it, always in `0..=8`.
    pub neighbours: u8,
}

/// A cell in the world.
///
/// Every operation locks the cell for its whole duration, so a cell can be
/// shared between the worker threads. Nothing is guaranteed about the order
/// of operations on *different* cells; composing them is the job of
/// [`World`](crate::World).
#[derive(Default)]
pub struct Cell {
    state: Mutex<CellState>,
}

impl Cell {
    /// Creates a dead cell without neighbours.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CellState> {
        // A panic while holding the lock cannot leave the state half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the state and the neighbour count at once.
    pub fn state(&self) -> CellState {
        *self.lock()
    }

    /// Whether the cell is alive.
    pub fn is_alive(&self) -> bool {
        self.lock().alive
    }

    /// Number of living neighbours.
    pub fn neighbour_count(&self) -> u8 {
        self.lock().neighbours
    }

    /// Makes the cell alive.
    ///
    /// Returns `false` if it was already alive, in which case nothing changes.
    /// The neighbour count is never touched.
    pub fn make_alive(&self) -> bool {
        let mut state = self.lock();
        !std::mem::replace(&mut state.alive, true)
    }

    /// Makes the cell dead.
    ///
    /// Returns `false` if it was already dead, in which case nothing changes.
    pub fn make_dead(&self) -> bool {
        let mut state = self.lock();
        std::mem::replace(&mut state.alive, false)
    }

    /// Adds a living neighbour. Saturates at [`MAX_NEIGHBOURS`].
    pub fn add_neighbour(&self) {
        let mut state = self.lock();
        if state.neighbours < MAX_NEIGHBOURS {
            state.neighbours += 1;
        }
    }

    /// Removes a living neighbour. Saturates at `0`.
    pub fn remove_neighbour(&self) {
        let mut state = self.lock();
        state.neighbours = state.neighbours.saturating_sub(1);
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let state = self.state();
        f.debug_struct("Cell")
            .field("alive", &state.alive)
            .field("neighbours", &state.neighbours)
            .finish()
    }
}
