//! Plot: capture points and straight lines on a coarse guide grid, for
//! pixel-perfect glyphs and icons, and round-trip them through JSON.

mod drawing;
mod grid;

use std::path::Path;

use log::{debug, info};

use crate::bitmap::{Bitmap, Ink, ink, rgb};
use crate::error::PlotError;
use crate::geometry::Point;
use crate::input::{Pen, PenEvent};
use crate::piece::{Cursor, Piece};

pub use drawing::{EncodedDrawing, PlotCommand, decode, encode};
pub use grid::{Cell, Grid};

mod colors {
    use super::{Ink, ink, rgb};

    pub const BACKGROUND: Ink = rgb(0, 20, 0);
    pub const GRID: Ink = rgb(0, 100, 0);
    pub const GRID_OUTLINE: Ink = ink(255, 255, 0, 32);
    pub const LINES: Ink = ink(0, 220, 220, 50);
    pub const INNER_LINE: Ink = ink(128, 128, 0, 200);
    pub const INLINE_PREVIEW: Ink = ink(128, 128, 0, 64);
    pub const ACTIVE_SQUARE_INLINE: Ink = ink(255, 255, 255, 128);
    pub const ACTIVE_SQUARE_CENTER: Ink = rgb(0, 255, 0);
    pub const GHOST_SQUARE: Ink = ink(100, 100, 100, 50);
    pub const BASELINE: Ink = ink(255, 200, 200, 20);
}

/// Row of the grid the lowercase letters sit on.
const ABC_BASELINE: i32 = 8;

#[derive(Debug)]
pub struct PlotPiece {
    grid: Grid,
    start: Option<Cell>,
    commands: Vec<PlotCommand>,
    needs_paint: bool,
}

impl Default for PlotPiece {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotPiece {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(17, 2, 6, 10, 5),
            start: None,
            commands: Vec::new(),
            needs_paint: true,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn commands(&self) -> &[PlotCommand] {
        &self.commands
    }

    /// True while a press inside the grid waits for its lift.
    pub fn is_marking(&self) -> bool {
        self.start.is_some()
    }

    pub fn encode(&self, timestamp: u64) -> Result<EncodedDrawing, PlotError> {
        encode(&self.commands, [self.grid.w, self.grid.h], timestamp)
    }

    /// Replace the drawing with the one in `json`. Returns the command count.
    pub fn decode(&mut self, json: &str) -> Result<usize, PlotError> {
        self.commands = decode(json)?;
        self.needs_paint = true;
        Ok(self.commands.len())
    }

    /// Write the drawing into `dir` and return the path written.
    pub fn save_to(&self, dir: &Path, timestamp: u64) -> Result<std::path::PathBuf, PlotError> {
        let EncodedDrawing { filename, data } = self.encode(timestamp)?;
        let path = dir.join(filename);
        std::fs::write(&path, data)?;
        info!("Saved drawing to {}", path.display());
        Ok(path)
    }

    pub fn open(&mut self, path: &Path) -> Result<usize, PlotError> {
        let json = std::fs::read_to_string(path)?;
        let count = self.decode(&json)?;
        info!("Loaded {count} commands from {}", path.display());
        Ok(count)
    }

    fn lift(&mut self, at: Point) {
        let Some(start) = self.start.take() else {
            return;
        };
        let end = self.grid.under(at);
        if !end.inside {
            debug!("Lifted outside the grid, dropping mark");
            return;
        }
        let command = if end.same_cell(&start) {
            PlotCommand::Point { x: start.gx, y: start.gy }
        } else {
            PlotCommand::Line {
                x0: start.gx,
                y0: start.gy,
                x1: end.gx,
                y1: end.gy,
            }
        };
        debug!("Added {command:?}");
        self.commands.push(command);
    }

    /// Rasterise the commands at one pixel per cell, then fill the matching cells.
    fn paint_cells(&self, screen: &mut Bitmap) {
        let cells = self.grid.cells();
        let raster = Bitmap::new(cells.w as u32, cells.h as u32, |b| {
            for command in &self.commands {
                command.draw(b, rgb(255, 255, 255), Point::new);
            }
        });
        for gy in 0..cells.h {
            for gx in 0..cells.w {
                if raster.pixel(gx, gy).is_some_and(|p| p.0[3] > 0) {
                    screen.box_fill(self.grid.cell(gx, gy).rect, colors::LINES);
                }
            }
        }
    }
}

impl Piece for PlotPiece {
    fn name(&self) -> &'static str {
        "plot"
    }

    fn resolution(&self) -> (u32, u32) {
        (64, 64)
    }

    fn act(&mut self, event: PenEvent, pen: &Pen) {
        match event {
            PenEvent::Touch => {
                let cell = self.grid.under(pen.position());
                if cell.inside {
                    self.start = Some(cell);
                }
            }
            PenEvent::Lift => self.lift(pen.position()),
            PenEvent::Draw => {}
        }
        self.needs_paint = true;
    }

    fn sim(&mut self, pen: &Pen) {
        if pen.changed() {
            self.needs_paint = true;
        }
    }

    fn paint(&mut self, screen: &mut Bitmap, pen: &Pen, _paint_count: u64) -> bool {
        if !self.needs_paint {
            return false;
        }
        let grid = self.grid;

        screen.wipe(colors::BACKGROUND);
        for gy in 0..grid.h {
            for gx in 0..grid.w {
                screen.box_inline(grid.cell(gx, gy).rect, colors::GRID);
            }
        }
        screen.box_outline(grid.scaled(), colors::GRID_OUTLINE);

        self.paint_cells(screen);

        let cell = grid.under(pen.position());
        if cell.inside {
            let center = cell.rect.origin() + grid.center_offset();
            screen
                .box_inline(cell.rect, colors::ACTIVE_SQUARE_INLINE)
                .plot(center.x, center.y, colors::ACTIVE_SQUARE_CENTER);
        }

        for command in &self.commands {
            command.draw(screen, colors::INNER_LINE, |x, y| grid.get(x, y));
        }

        if let Some(start) = &self.start {
            screen.line(
                grid.get(start.gx, start.gy),
                grid.get(cell.gx, cell.gy),
                colors::INLINE_PREVIEW,
            );
            if !cell.inside {
                screen.box_inline(cell.rect, colors::GHOST_SQUARE);
            }
        }

        let y = grid.y + ABC_BASELINE * grid.scale;
        screen.line(Point::new(0, y), Point::new(screen.width() as i32 - 1, y), colors::BASELINE);

        self.needs_paint = false;
        true
    }

    fn cursor(&self) -> Cursor {
        Cursor::Tiny
    }
}
