//! Rules of the game.
//!
//! A rule decides three things:
//! - the state of a cell in the next generation;
//! - what happens to coordinates that fall outside the world;
//! - when the game is over.
//!
//! The engine only talks to the [`GameRules`] trait. [`Rules`] is the closed
//! set of rules that a [`Config`](crate::Config) can choose from.

mod conway;
mod life;

use crate::cells::Cell;
pub use conway::Conway;
pub use life::LifeLike;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens at the borders of the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Borders {
    /// The world is a torus: stepping over one border leads to the opposite one.
    #[default]
    Ring,
    /// There is nothing outside the world.
    Limited,
}

impl Borders {
    /// Maps a possibly out-of-range index into `0..bound`.
    ///
    /// For [`Ring`](Borders::Ring), a negative index gets `bound` added once,
    /// and the result is then taken modulo `bound`. This is only correct
    /// for indices in `-bound..`, which is enough for neighbours.
    ///
    /// Returns `None` if there is no such cell.
    pub fn map_index(self, index: isize, bound: usize) -> Option<usize> {
        if bound == 0 {
            return None;
        }
        match self {
            Borders::Ring => {
                let bound = bound as isize;
                let index = if index < 0 { index + bound } else { index };
                usize::try_from(index % bound).ok()
            }
            Borders::Limited => usize::try_from(index).ok().filter(|&i| i < bound),
        }
    }
}

/// When the game stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameLimits {
    /// The game is over when fewer cells than this are alive.
    pub min_alive_cells: u64,
    /// The game is over when more generations than this repeated an earlier one.
    pub max_equal_worlds: u32,
    /// The game is over after this many generations.
    pub max_generations: u32,
}

impl Default for GameLimits {
    fn default() -> Self {
        GameLimits {
            min_alive_cells: 1,
            max_equal_worlds: 0,
            max_generations: 20,
        }
    }
}

impl GameLimits {
    /// Whether a game with these statistics is over.
    pub fn is_game_over(
        &self,
        alive_cells_count: u64,
        equal_worlds_count: u32,
        generations_count: u32,
    ) -> bool {
        alive_cells_count < self.min_alive_cells
            || equal_worlds_count > self.max_equal_worlds
            || generations_count > self.max_generations
    }
}

/// A rule of the game.
///
/// Implementations must be stateless, since they are shared by all the
/// worker threads.
pub trait GameRules: Send + Sync {
    /// Whether the cell will be alive in the next generation.
    fn next_state(&self, cell: &Cell) -> bool;

    /// Maps an index that might be out of `0..bound` into the world.
    ///
    /// Returns `None` if the index points outside the world.
    fn map_index(&self, index: isize, bound: usize) -> Option<usize>;

    /// Whether the game is over.
    fn is_game_over(
        &self,
        alive_cells_count: u64,
        equal_worlds_count: u32,
        generations_count: u32,
    ) -> bool;
}

/// All the rules that can be chosen in a [`Config`](crate::Config).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rules {
    /// The rules suggested by Conway.
    Conway(Conway),
    /// A totalistic Life-like rule with its own limits.
    LifeLike(LifeLike),
}

impl Default for Rules {
    fn default() -> Self {
        Rules::Conway(Conway)
    }
}

impl From<Conway> for Rules {
    fn from(rule: Conway) -> Self {
        Rules::Conway(rule)
    }
}

impl From<LifeLike> for Rules {
    fn from(rule: LifeLike) -> Self {
        Rules::LifeLike(rule)
    }
}

impl GameRules for Rules {
    fn next_state(&self, cell: &Cell) -> bool {
        match self {
            Rules::Conway(rule) => rule.next_state(cell),
            Rules::LifeLike(rule) => rule.next_state(cell),
        }
    }

    fn map_index(&self, index: isize, bound: usize) -> Option<usize> {
        match self {
            Rules::Conway(rule) => rule.map_index(index, bound),
            Rules::LifeLike(rule) => rule.map_index(index, bound),
        }
    }

    fn is_game_over(
        &self,
        alive_cells_count: u64,
        equal_worlds_count: u32,
        generations_count: u32,
    ) -> bool {
        match self {
            Rules::Conway(rule) => {
                rule.is_game_over(alive_cells_count, equal_worlds_count, generations_count)
            }
            Rules::LifeLike(rule) => {
                rule.is_game_over(alive_cells_count, equal_worlds_count, generations_count)
            }
        }
    }
}
