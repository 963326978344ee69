//! A Game of Life simulator on a bounded grid.
//!
//! Large worlds are advanced by a fixed pool of worker threads, each owning
//! a range of cells. Every generation is fingerprinted, so that the game can
//! stop when the world repeats itself.
//!
//! ```
//! use rlifesim_lib::{Config, Figure};
//!
//! let mut game = Config::new(5, 5).game().unwrap();
//! game.fill_initial_picture(Figure::CenterLine).unwrap();
//! let mut generations = 0;
//! while !game.is_game_over() {
//!     game.execute_next_generation();
//!     generations += 1;
//! }
//! assert_eq!(generations, 2);
//! ```

mod cells;
mod config;
mod error;
mod figure;
mod game;
mod hasher;
mod render;
pub mod rules;
mod sync;
mod workers;
mod world;

pub use cells::{Cell, CellState, Coord, MAX_NEIGHBOURS};
pub use config::{Config, Threading};
pub use error::Error;
pub use figure::{Figure, InitialFigure};
pub use game::{GameOfLife, NeighbourDelta};
pub use hasher::{WorldHash, WorldHasher, CELLS_PER_SEGMENT};
pub use render::{GridSnapshot, PlaintextRenderer, Renderer};
pub use rules::{GameRules, Rules};
pub use sync::{Barrier, Signal};
pub use world::World;
