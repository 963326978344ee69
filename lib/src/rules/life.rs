//! Totalistic Life-like rules.

use super::{Borders, GameLimits, GameRules};
use crate::cells::{Cell, MAX_NEIGHBOURS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A totalistic Life-like rule, such as `B36/S23` (HighLife).
///
/// Birth and survival conditions are stored as bit masks over the
/// neighbour counts `0..=8`. Counts above 8 are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LifeLike {
    birth: u16,
    survival: u16,
    borders: Borders,
    limits: GameLimits,
}

fn mask(counts: &[u8]) -> u16 {
    counts
        .iter()
        .filter(|&&n| n <= MAX_NEIGHBOURS)
        .fold(0, |mask, &n| mask | (1 << n))
}

impl LifeLike {
    /// Constructs a new rule from the `b` and `s` data,
    /// with ring borders and the same limits as [`Conway`](super::Conway).
    pub fn new(b: &[u8], s: &[u8]) -> Self {
        LifeLike {
            birth: mask(b),
            survival: mask(s),
            borders: Borders::default(),
            limits: GameLimits::default(),
        }
    }

    /// Sets the border behaviour.
    pub fn set_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Sets the limits that end the game.
    pub fn set_limits(mut self, limits: GameLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The border behaviour.
    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// The limits that end the game.
    pub fn limits(&self) -> GameLimits {
        self.limits
    }
}

impl GameRules for LifeLike {
    fn next_state(&self, cell: &Cell) -> bool {
        let state = cell.state();
        let mask = if state.alive {
            self.survival
        } else {
            self.birth
        };
        mask & (1 << state.neighbours) != 0
    }

    fn map_index(&self, index: isize, bound: usize) -> Option<usize> {
        self.borders.map_index(index, bound)
    }

    fn is_game_over(
        &self,
        alive_cells_count: u64,
        equal_worlds_count: u32,
        generations_count: u32,
    ) -> bool {
        self.limits
            .is_game_over(alive_cells_count, equal_worlds_count, generations_count)
    }
}
