//! The world.

use crate::{
    cells::{Cell, Coord},
    error::Error,
    hasher::WorldHasher,
    render::GridSnapshot,
    rules::GameRules,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Offsets of the eight neighbours.
const NBHD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The world.
///
/// All the methods take `&self`, so that a world can be shared between
/// the worker threads. Each cell has its own lock, the hasher has another
/// one, and the number of living cells is atomic. There is no lock for the
/// whole world.
///
/// A world with zero rows or columns can be created. It has no cells, so
/// every coordinate is invalid.
#[derive(Debug)]
pub struct World {
    rows: usize,
    columns: usize,

    /// All the cells, row by row.
    ///
    /// This vector is never resized after its creation.
    cells: Box<[Cell]>,

    /// Fingerprints of the current and all the previous generations.
    hasher: WorldHasher,

    /// Number of living cells.
    alive_cells_count: AtomicU64,
}

impl World {
    /// Creates a world where every cell is dead.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows. [`Config::game`](crate::Config::game)
    /// checks this before creating a world.
    pub fn new(rows: usize, columns: usize) -> Self {
        let cells = (0..rows * columns).map(|_| Cell::new()).collect();
        World {
            rows,
            columns,
            cells,
            hasher: WorldHasher::new(rows, columns),
            alive_cells_count: AtomicU64::new(0),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the world has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Finds the index of a cell in [`cells`](#structfield.cells).
    fn index(&self, row: usize, column: usize) -> Result<usize, Error> {
        if row < self.rows && column < self.columns {
            Ok(row * self.columns + column)
        } else {
            Err(Error::InvalidCoordinate(row, column))
        }
    }

    /// Gets a reference to the cell at some position.
    pub fn cell_at(&self, row: usize, column: usize) -> Result<&Cell, Error> {
        self.index(row, column).map(|i| &self.cells[i])
    }

    /// Gets a reference to a cell by its linear index, `row * columns + column`.
    pub(crate) fn cell_by_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Makes a cell alive, and tells its neighbours.
    ///
    /// Does nothing if the cell is already alive.
    pub fn make_cell_alive<R: GameRules + ?Sized>(
        &self,
        row: usize,
        column: usize,
        rules: &R,
    ) -> Result<(), Error> {
        let cell = self.cell_at(row, column)?;
        if cell.make_alive() {
            self.alive_cells_count.fetch_add(1, Ordering::SeqCst);
            self.hasher.update_cell_alive(row, column)?;
            self.update_neighbours(row, column, rules, Cell::add_neighbour);
        }
        Ok(())
    }

    /// Makes a cell dead, and tells its neighbours.
    ///
    /// Does nothing if the cell is already dead.
    pub fn make_cell_died<R: GameRules + ?Sized>(
        &self,
        row: usize,
        column: usize,
        rules: &R,
    ) -> Result<(), Error> {
        let cell = self.cell_at(row, column)?;
        if cell.make_dead() {
            self.alive_cells_count.fetch_sub(1, Ordering::SeqCst);
            self.hasher.update_cell_died(row, column)?;
            self.update_neighbours(row, column, rules, Cell::remove_neighbour);
        }
        Ok(())
    }

    /// Applies `update` to every neighbour of a cell.
    ///
    /// The coordinates are mapped by the rules, one axis at a time.
    /// Neighbours the rules map outside the world are skipped, and so is
    /// the cell itself when a tiny ring world wraps back onto it.
    fn update_neighbours<R: GameRules + ?Sized>(
        &self,
        row: usize,
        column: usize,
        rules: &R,
        update: fn(&Cell),
    ) {
        for (dr, dc) in NBHD {
            let r = rules.map_index(row as isize + dr, self.rows);
            let c = rules.map_index(column as isize + dc, self.columns);
            if let (Some(r), Some(c)) = (r, c) {
                if (r, c) != (row, column) {
                    update(&self.cells[r * self.columns + c]);
                }
            }
        }
    }

    /// Makes the given cells alive, in order.
    ///
    /// Stops at the first cell outside the world.
    pub fn set_initial_cells<R: GameRules + ?Sized>(
        &self,
        points: &[Coord],
        rules: &R,
    ) -> Result<(), Error> {
        for &(row, column) in points {
            self.make_cell_alive(row, column, rules)?;
        }
        Ok(())
    }

    /// Commits the fingerprint of the current generation.
    pub fn update_hash(&self) {
        self.hasher.update_hash();
    }

    /// Number of living cells.
    pub fn alive_cell_count(&self) -> u64 {
        self.alive_cells_count.load(Ordering::SeqCst)
    }

    /// Number of committed generations that repeated an earlier one.
    pub fn equal_world_count(&self) -> u32 {
        self.hasher.equal_hash_count()
    }

    /// The hasher of this world.
    pub fn hasher(&self) -> &WorldHasher {
        &self.hasher
    }

    /// Copies the states of all cells, row by row.
    pub fn snapshot(&self) -> GridSnapshot {
        let rows = if self.columns == 0 {
            vec![Vec::new(); self.rows]
        } else {
            self.cells
                .chunks(self.columns)
                .map(|row| row.iter().map(Cell::is_alive).collect())
                .collect()
        };
        GridSnapshot::new(rows)
    }
}
