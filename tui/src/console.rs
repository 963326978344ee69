//! Coloured output on the terminal.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rlifesim_lib::{Error, GridSnapshot, Renderer};
use std::io::{self, Write};

/// Prints each generation below a heading line of `- `.
///
/// Living cells are red `X`, dead cells are green `-`.
pub(crate) struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        ConsoleRenderer { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_grid(&mut self, grid: &GridSnapshot, columns: usize) -> io::Result<()> {
        queue!(self.out, Print("- ".repeat(columns)), Print('\n'))?;
        for row in grid.rows() {
            for &alive in row {
                if alive {
                    queue!(self.out, SetForegroundColor(Color::Red), Print("X "))?;
                } else {
                    queue!(self.out, SetForegroundColor(Color::Green), Print("- "))?;
                }
            }
            queue!(self.out, ResetColor, Print('\n'))?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn draw(&mut self, grid: &GridSnapshot) -> Result<(), Error> {
        let (_, columns) = grid.dimensions()?;
        self.write_grid(grid, columns)
            .map_err(|e| Error::Output(e.to_string()))
    }
}
