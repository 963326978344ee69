//! Initial figures.

use crate::cells::Coord;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The figures a game can start with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Figure {
    /// A random number of random points.
    #[default]
    Random,
    /// A horizontal line of 3 cells at a random position.
    RandomLine,
    /// A single cell at a random position.
    RandomPoint,
    /// A single cell in the center.
    CenterPoint,
    /// A horizontal line of 3 cells starting from the center.
    CenterLine,
    /// A glider at a random position.
    Glider,
}

/// Builds the points of initial figures inside a `rows × columns` box.
///
/// Figures wrap around the borders of the box. Random coordinates are
/// always inside it. Nothing is built in an empty box.
#[derive(Debug)]
pub struct InitialFigure {
    rows: usize,
    columns: usize,
    points: Vec<Coord>,
    rng: StdRng,
}

impl InitialFigure {
    /// Creates a builder with a random seed.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::from_rng(rows, columns, StdRng::from_entropy())
    }

    /// Creates a builder whose random figures are determined by `seed`.
    pub fn with_seed(rows: usize, columns: usize, seed: u64) -> Self {
        Self::from_rng(rows, columns, StdRng::seed_from_u64(seed))
    }

    fn from_rng(rows: usize, columns: usize, rng: StdRng) -> Self {
        InitialFigure {
            rows,
            columns,
            points: Vec::new(),
            rng,
        }
    }

    fn is_empty_box(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    fn random_coord(&mut self) -> Coord {
        (
            self.rng.gen_range(0..self.rows),
            self.rng.gen_range(0..self.columns),
        )
    }

    /// Builds a named figure.
    pub fn build(&mut self, figure: Figure) {
        match figure {
            Figure::Random => self.build_random(),
            Figure::RandomLine => self.build_random_line(),
            Figure::RandomPoint => self.build_random_point(),
            Figure::CenterPoint => self.build_point(self.rows / 2, self.columns / 2),
            Figure::CenterLine => self.build_line(self.rows / 2, self.columns / 2),
            Figure::Glider => self.build_random_glider(),
        }
    }

    /// Adds a point.
    pub fn build_point(&mut self, row: usize, column: usize) {
        if !self.is_empty_box() {
            self.points.push((row, column));
        }
    }

    /// Adds a random point.
    pub fn build_random_point(&mut self) {
        if !self.is_empty_box() {
            let (row, column) = self.random_coord();
            self.build_point(row, column);
        }
    }

    /// Replaces the figure with a horizontal line of 3 cells,
    /// starting from the given point.
    pub fn build_line(&mut self, row: usize, column: usize) {
        if self.is_empty_box() {
            return;
        }
        let columns = self.columns;
        self.points = (0..3).map(|i| (row, (column + i) % columns)).collect();
    }

    /// Replaces the figure with a line at a random position.
    pub fn build_random_line(&mut self) {
        if !self.is_empty_box() {
            let (row, column) = self.random_coord();
            self.build_line(row, column);
        }
    }

    /// Replaces the figure with a glider at a random position.
    ///
    /// ```text
    /// .o.
    /// ..o
    /// ooo
    /// ```
    ///
    /// The top left corner is the random position.
    pub fn build_random_glider(&mut self) {
        if self.is_empty_box() {
            return;
        }
        let (rows, columns) = (self.rows, self.columns);
        let (row, column) = self.random_coord();
        self.points = vec![
            ((row + 2) % rows, column),
            ((row + 2) % rows, (column + 1) % columns),
            ((row + 2) % rows, (column + 2) % columns),
            ((row + 1) % rows, (column + 2) % columns),
            (row, (column + 1) % columns),
        ];
    }

    /// Adds a random number (less than the number of cells) of random points.
    ///
    /// The points may repeat.
    pub fn build_random(&mut self) {
        if self.is_empty_box() {
            return;
        }
        let count = self.rng.gen_range(0..self.rows * self.columns);
        for _ in 0..count {
            let (row, column) = self.random_coord();
            self.build_point(row, column);
        }
    }

    /// The points of the figure.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }
}
