//! Fingerprints of the world, used to detect repeated generations.

use crate::error::Error;
use log::trace;
use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Number of cells covered by one segment word.
pub const CELLS_PER_SEGMENT: usize = 32;

/// The fingerprint of a whole world.
///
/// Bit `i` of segment `s` is set iff the cell with linear index
/// `s * 32 + i` is alive.
pub type WorldHash = Vec<u32>;

/// Everything behind the hasher lock.
#[derive(Debug, Default)]
struct HasherState {
    /// Fingerprint of the current configuration.
    hash: WorldHash,
    /// Every fingerprint that has been committed.
    history: HashSet<WorldHash>,
    /// How many commits found their fingerprint already in the history.
    equal_hash_count: u32,
}

/// Keeps the fingerprint of the current generation up to date, and
/// remembers the fingerprints of all the previous ones.
#[derive(Debug)]
pub struct WorldHasher {
    rows: usize,
    columns: usize,

    /// A single lock for all the segments.
    ///
    /// Worker threads update it concurrently while applying their deltas,
    /// but every update is a single bit operation.
    state: Mutex<HasherState>,
}

impl WorldHasher {
    /// Creates a hasher for a `rows × columns` world, with every cell dead.
    pub fn new(rows: usize, columns: usize) -> Self {
        let segments = (rows * columns + CELLS_PER_SEGMENT - 1) / CELLS_PER_SEGMENT;
        WorldHasher {
            rows,
            columns,
            state: Mutex::new(HasherState {
                hash: vec![0; segments],
                ..HasherState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HasherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of segment words in a fingerprint.
    pub fn segment_count(&self) -> usize {
        self.lock().hash.len()
    }

    /// Linear index of a cell.
    fn linear_index(&self, row: usize, column: usize) -> Result<usize, Error> {
        if row < self.rows && column < self.columns {
            Ok(row * self.columns + column)
        } else {
            Err(Error::InvalidCoordinate(row, column))
        }
    }

    /// The index of the segment word that holds the bit of a cell.
    pub fn hasher_index(&self, row: usize, column: usize) -> Result<usize, Error> {
        self.linear_index(row, column)
            .map(|index| index / CELLS_PER_SEGMENT)
    }

    /// Marks a cell as alive in the current fingerprint.
    pub fn update_cell_alive(&self, row: usize, column: usize) -> Result<(), Error> {
        let index = self.linear_index(row, column)?;
        self.lock().hash[index / CELLS_PER_SEGMENT] |= 1 << (index % CELLS_PER_SEGMENT);
        Ok(())
    }

    /// Marks a cell as dead in the current fingerprint.
    pub fn update_cell_died(&self, row: usize, column: usize) -> Result<(), Error> {
        let index = self.linear_index(row, column)?;
        self.lock().hash[index / CELLS_PER_SEGMENT] &= !(1 << (index % CELLS_PER_SEGMENT));
        Ok(())
    }

    /// Commits the current fingerprint to the history.
    ///
    /// If exactly the same fingerprint was committed before,
    /// the equal hash count is increased instead.
    pub fn update_hash(&self) {
        let mut state = self.lock();
        if state.history.contains(&state.hash) {
            state.equal_hash_count += 1;
            trace!("repeated world, {} so far", state.equal_hash_count);
        } else {
            let hash = state.hash.clone();
            state.history.insert(hash);
        }
    }

    /// The current fingerprint.
    pub fn hash(&self) -> WorldHash {
        self.lock().hash.clone()
    }

    /// How many committed fingerprints were repeats.
    pub fn equal_hash_count(&self) -> u32 {
        self.lock().equal_hash_count
    }
}
