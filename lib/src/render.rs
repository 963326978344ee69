//! Drawing the world.

use crate::error::Error;
use std::fmt::Write;

/// A copy of the states of all cells, row by row. `true` means alive.
///
/// Nothing stops a snapshot from being ragged or empty;
/// [`dimensions`](Self::dimensions) checks it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridSnapshot {
    rows: Vec<Vec<bool>>,
}

impl GridSnapshot {
    /// Wraps the rows of a grid.
    pub fn new(rows: Vec<Vec<bool>>) -> Self {
        GridSnapshot { rows }
    }

    /// The rows.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Returns `(rows, columns)` if the grid is a non-empty rectangle.
    pub fn dimensions(&self) -> Result<(usize, usize), Error> {
        let columns = match self.rows.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => {
                return Err(Error::MalformedGrid(String::from(
                    "rows and columns count should be at least 1",
                )))
            }
        };
        if let Some(i) = self.rows.iter().position(|row| row.len() != columns) {
            return Err(Error::MalformedGrid(format!(
                "row {} has {} columns instead of {}",
                i,
                self.rows[i].len(),
                columns
            )));
        }
        Ok((self.rows.len(), columns))
    }

}

/// Something that can draw a grid.
pub trait Renderer {
    /// Draws the grid.
    ///
    /// A grid that is empty or not rectangular is reported as
    /// [`Error::MalformedGrid`], and nothing is drawn.
    fn draw(&mut self, grid: &GridSnapshot) -> Result<(), Error>;
}

/// Renders the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
/// format, and keeps the result.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
#[derive(Clone, Debug, Default)]
pub struct PlaintextRenderer {
    output: String,
}

impl PlaintextRenderer {
    /// Creates a renderer with no output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Takes everything drawn so far, leaving the renderer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Renderer for PlaintextRenderer {
    fn draw(&mut self, grid: &GridSnapshot) -> Result<(), Error> {
        grid.dimensions()?;
        for row in grid.rows() {
            for &alive in row {
                self.output.push(if alive { 'o' } else { '.' });
            }
            self.output.push('\n');
        }
        Ok(())
    }
}

/// Writes a grid with one line per row, e.g. for logging.
impl std::fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            for &alive in row {
                f.write_char(if alive { 'o' } else { '.' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
