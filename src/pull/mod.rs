//! Pull: select a square of the sketch, drag a copy of it somewhere else, and
//! keep a compact log of every move in a strip along the bottom.

mod compositor;
mod selection;
mod turn_log;

use log::{debug, warn};

use crate::bitmap::{Bitmap, rgb};
use crate::config::PullConfig;
use crate::error::PieceError;
use crate::geometry::Rect;
use crate::input::Pen;
use crate::piece::{Cursor, Piece};

pub use compositor::Compositor;
pub use selection::{Blink, Selection, SelectionController, SelectionState};
pub use turn_log::{BIAS, Turn, TurnLog};

/// The pull piece: a sketch, the selection controller working on it, the
/// turn log and the compositor that draws them.
#[derive(Debug)]
pub struct PullPiece {
    sketch: Bitmap,
    controller: SelectionController,
    log: TurnLog,
    compositor: Compositor,
}

impl Default for PullPiece {
    fn default() -> Self {
        Self::new(&PullConfig::default())
    }
}

impl PullPiece {
    pub fn new(config: &PullConfig) -> Self {
        Self::with_sketch(config, starting_sketch(config.width, config.height))
    }

    /// The history strip shares the bottom row with the sketch, so it is
    /// never wider than the sketch.
    pub fn with_sketch(config: &PullConfig, sketch: Bitmap) -> Self {
        let history_width = config.history_width.min(sketch.width());
        if history_width < config.history_width {
            warn!(
                "History strip clamped from {} to {} pixels",
                config.history_width, history_width
            );
        }
        Self {
            controller: SelectionController::new(sketch.bounds()),
            sketch,
            log: TurnLog::new(history_width),
            compositor: Compositor::new(config.blink_interval),
        }
    }

    pub fn sketch(&self) -> &Bitmap {
        &self.sketch
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn turn_log(&self) -> &TurnLog {
        &self.log
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    fn record(&mut self, result: Result<Turn, PieceError>) {
        let outcome = result.and_then(|turn| self.log.append(turn));
        match outcome {
            Ok(index) => debug!("Turn {index} added"),
            Err(err @ (PieceError::CapacityExceeded { .. } | PieceError::OutOfEncodingRange { .. })) => {
                warn!("Turn dropped: {err}");
            }
            Err(err) => debug!("No turn: {err}"),
        }
    }
}

/// Dark background with a light square in the middle.
fn starting_sketch(width: u32, height: u32) -> Bitmap {
    Bitmap::new(width, height, |b| {
        let side = width.div_ceil(2) as i32;
        let (cx, cy) = (side, height.div_ceil(2) as i32);
        b.wipe(rgb(40, 40, 60)).box_fill(
            Rect::new(cx - side / 2, cy - side / 2, side, side),
            rgb(100, 100, 150),
        );
    })
}

impl Piece for PullPiece {
    fn name(&self) -> &'static str {
        "pull"
    }

    fn resolution(&self) -> (u32, u32) {
        (self.sketch.width(), self.sketch.height() + 1)
    }

    fn sim(&mut self, pen: &Pen) {
        for result in self.controller.update(pen) {
            self.record(result);
        }
    }

    fn paint(&mut self, screen: &mut Bitmap, pen: &Pen, paint_count: u64) -> bool {
        self.compositor.paint(
            screen,
            &mut self.sketch,
            &mut self.controller,
            &mut self.log,
            pen,
            paint_count,
        )
    }

    fn cursor(&self) -> Cursor {
        self.controller.cursor()
    }
}
