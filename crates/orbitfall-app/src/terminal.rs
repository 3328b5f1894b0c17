//! Crossterm canvas: circles in display pixels drawn onto a character grid.
//!
//! The display rectangle is stretched over the whole terminal except the
//! bottom row, which carries a status line. Only cells that changed since
//! the previous frame are rewritten.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, ClearType, EndSynchronizedUpdate},
};
use glam::DVec2;
use tracing::trace;

use orbitfall_core::canvas::{Canvas, CircleHandle};
use orbitfall_core::components::Tint;
use orbitfall_core::coords::DisplaySize;
use orbitfall_core::enums::SimPhase;
use orbitfall_core::state::SimSnapshot;

use crate::game_loop::Frame;

/// Glyph for an ellipse that covers several cells.
const FILL: char = '█';
/// Glyph for an ellipse smaller than one cell.
const DOT: char = '•';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Circle {
    center: DVec2,
    radii: DVec2,
    tint: Tint,
}

/// One character cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
    };
}

/// Canvas that renders to a terminal through `crossterm`.
pub struct TerminalCanvas<W: Write> {
    out: W,
    display: DisplaySize,
    circles: BTreeMap<u64, Circle>,
    next_handle: u64,
    fixed_size: Option<(u16, u16)>,
    prev: Vec<Cell>,
    prev_size: (u16, u16),
}

impl<W: Write> TerminalCanvas<W> {
    /// Canvas following the current terminal size.
    pub fn new(out: W, display: DisplaySize) -> Self {
        Self {
            out,
            display,
            circles: BTreeMap::new(),
            next_handle: 0,
            fixed_size: None,
            prev: Vec::new(),
            prev_size: (0, 0),
        }
    }

    /// Canvas with a fixed grid of `cols` x `rows`, independent of the terminal.
    pub fn with_size(out: W, display: DisplaySize, cols: u16, rows: u16) -> Self {
        Self {
            fixed_size: Some((cols, rows)),
            ..Self::new(out, display)
        }
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Rasterize every live circle onto a `cols` x `rows` grid.
    /// Circles are painted in creation order, later ones on top.
    pub fn rasterize(&self, cols: u16, rows: u16) -> Vec<Cell> {
        let (cols_n, rows_n) = (cols as usize, rows as usize);
        let mut grid = vec![Cell::BLANK; cols_n * rows_n];
        if cols == 0 || rows == 0 {
            return grid;
        }

        let cell_scale = DVec2::new(
            f64::from(cols) / f64::from(self.display.width),
            f64::from(rows) / f64::from(self.display.height),
        );

        for circle in self.circles.values() {
            let center = circle.center * cell_scale;
            let radii = circle.radii * cell_scale;
            let fg = color(circle.tint);
            let mut painted = false;

            let col_lo = (center.x - radii.x).floor().max(0.0) as usize;
            let col_hi = ((center.x + radii.x).ceil().max(0.0) as usize).min(cols_n);
            let row_lo = (center.y - radii.y).floor().max(0.0) as usize;
            let row_hi = ((center.y + radii.y).ceil().max(0.0) as usize).min(rows_n);

            for row in row_lo..row_hi {
                for col in col_lo..col_hi {
                    let offset = (DVec2::new(col as f64 + 0.5, row as f64 + 0.5) - center) / radii;
                    if offset.length_squared() <= 1.0 {
                        grid[row * cols_n + col] = Cell { ch: FILL, fg };
                        painted = true;
                    }
                }
            }

            // Too small to cover a cell center: mark the cell it sits in.
            if !painted && center.x >= 0.0 && center.y >= 0.0 {
                let (col, row) = (center.x as usize, center.y as usize);
                if col < cols_n && row < rows_n {
                    grid[row * cols_n + col] = Cell { ch: DOT, fg };
                }
            }
        }

        grid
    }

    fn terminal_size(&self) -> io::Result<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => terminal::size(),
        }
    }

    fn render_diff(&mut self, cols: u16, rows: u16, cur: &[Cell]) -> io::Result<()> {
        let mut cur_fg = Color::Reset;
        queue!(self.out, SetForegroundColor(cur_fg))?;

        for y in 0..rows as usize {
            for x in 0..cols as usize {
                let i = y * cols as usize + x;
                if self.prev[i] == cur[i] {
                    continue;
                }
                self.prev[i] = cur[i];

                let c = cur[i];
                queue!(self.out, cursor::MoveTo(x as u16, y as u16))?;
                if c.fg != cur_fg {
                    cur_fg = c.fg;
                    queue!(self.out, SetForegroundColor(cur_fg))?;
                }
                queue!(self.out, Print(c.ch))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn create_circle(&mut self, center: DVec2, radii: DVec2, tint: Tint) -> CircleHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.circles.insert(handle, Circle { center, radii, tint });
        CircleHandle(handle)
    }

    fn move_circle(&mut self, handle: CircleHandle, delta: DVec2) {
        if let Some(circle) = self.circles.get_mut(&handle.0) {
            circle.center += delta;
        }
    }

    fn destroy_circle(&mut self, handle: CircleHandle) {
        self.circles.remove(&handle.0);
    }
}

impl<W: Write> Frame for TerminalCanvas<W> {
    fn present(&mut self, snapshot: &SimSnapshot) -> io::Result<()> {
        let (cols, rows) = self.terminal_size()?;
        if cols == 0 || rows < 2 {
            return Ok(());
        }
        let plot_rows = rows - 1;

        if (cols, rows) != self.prev_size {
            self.prev_size = (cols, rows);
            self.prev = vec![Cell::BLANK; cols as usize * plot_rows as usize];
            queue!(self.out, terminal::Clear(ClearType::All))?;
        }

        queue!(self.out, BeginSynchronizedUpdate)?;
        let grid = self.rasterize(cols, plot_rows);
        self.render_diff(cols, plot_rows, &grid)?;

        let mut line = status_line(snapshot);
        line.truncate(line.char_indices().nth(cols as usize).map_or(line.len(), |(i, _)| i));
        queue!(
            self.out,
            cursor::MoveTo(0, plot_rows),
            SetForegroundColor(Color::Reset),
            terminal::Clear(ClearType::CurrentLine),
            Print(line),
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;

        trace!(circles = self.circles.len(), "frame presented");
        Ok(())
    }
}

/// Status text shown under the plot.
pub fn status_line(snapshot: &SimSnapshot) -> String {
    let days = snapshot.time.elapsed_secs / 86_400.0;
    let paused = if snapshot.phase == SimPhase::Paused {
        "  PAUSED"
    } else {
        ""
    };
    format!(
        "day {days:.1}  bodies {}  debris {}  speed x{}{paused}  | space pause  r restart  +/- speed  q quit",
        snapshot.bodies.len(),
        snapshot.debris.active,
        snapshot.time_scale,
    )
}

fn color(tint: Tint) -> Color {
    Color::Rgb {
        r: tint.r,
        g: tint.g,
        b: tint.b,
    }
}
