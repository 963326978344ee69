//! Conway's rules.

use super::{Borders, GameLimits, GameRules};
use crate::cells::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighbour counts with which a living cell survives.
const SURVIVAL: [u8; 2] = [2, 3];
/// Neighbour counts with which a dead cell is born.
const REBIRTH: [u8; 1] = [3];

const LIMITS: GameLimits = GameLimits {
    min_alive_cells: 1,
    max_equal_worlds: 0,
    max_generations: 20,
};

/// The rules suggested by Conway: `B3/S23` on a torus.
///
/// The game is over when every cell is dead, when the world repeats
/// one of the previous generations, or after 20 generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conway;

impl GameRules for Conway {
    fn next_state(&self, cell: &Cell) -> bool {
        let state = cell.state();
        if state.alive {
            SURVIVAL.contains(&state.neighbours)
        } else {
            REBIRTH.contains(&state.neighbours)
        }
    }

    fn map_index(&self, index: isize, bound: usize) -> Option<usize> {
        Borders::Ring.map_index(index, bound)
    }

    fn is_game_over(
        &self,
        alive_cells_count: u64,
        equal_worlds_count: u32,
        generations_count: u32,
    ) -> bool {
        LIMITS.is_game_over(alive_cells_count, equal_worlds_count, generations_count)
    }
}
