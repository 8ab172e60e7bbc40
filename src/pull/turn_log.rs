use log::debug;

use crate::bitmap::{Bitmap, Ink, rgb};
use crate::error::{PieceError, PieceResult};
use crate::geometry::{Point, Rect};

/// Added to destination coordinates so signed offsets fit an unsigned channel.
pub const BIAS: i32 = 127;

/// A committed move of a captured region from `origin` to `dest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    origin: Rect,
    dest: Point,
}

impl Turn {
    /// Validate a finished move. The region has to have moved, and its
    /// destination has to keep at least one pixel on `canvas`.
    pub fn new(origin: Rect, dest: Point, canvas: Rect) -> PieceResult<Self> {
        if origin.origin() == dest {
            return Err(PieceError::Unmoved);
        }
        let dest_rect = origin.moved_to(dest);
        if !dest_rect.overlaps(&canvas) {
            return Err(PieceError::OffscreenCommit { dest: dest_rect });
        }
        Ok(Self { origin, dest })
    }

    pub fn origin(&self) -> Rect {
        self.origin
    }

    pub fn dest(&self) -> Point {
        self.dest
    }

    pub fn dest_rect(&self) -> Rect {
        self.origin.moved_to(self.dest)
    }

    /// `[x, y, w, h, dest_x, dest_y]`
    pub fn to_array(&self) -> [i32; 6] {
        let o = self.origin;
        [o.x, o.y, o.w, o.h, self.dest.x, self.dest.y]
    }

    /// Pack into two opaque pixels: `(x, y, w)` then `(h, dest_x + BIAS, dest_y + BIAS)`.
    pub fn encode(&self) -> PieceResult<[Ink; 2]> {
        let [x, y, w, h, dx, dy] = self.to_array();
        Ok([
            rgb(channel(x)?, channel(y)?, channel(w)?),
            rgb(channel(h)?, channel(dx + BIAS)?, channel(dy + BIAS)?),
        ])
    }

    /// Inverse of [`Turn::encode`]. No validity checks are repeated.
    pub fn decode(records: [Ink; 2]) -> Self {
        let [first, second] = records;
        let c = |ink: Ink, i: usize| i32::from(ink.0[i]);
        Self {
            origin: Rect::new(c(first, 0), c(first, 1), c(first, 2), c(second, 0)),
            dest: Point::new(c(second, 1) - BIAS, c(second, 2) - BIAS),
        }
    }
}

fn channel(value: i32) -> PieceResult<u8> {
    u8::try_from(value).map_err(|_| PieceError::OutOfEncodingRange { value })
}

/// Bounded, append-only history of turns, mirrored into a 1-row pixel strip.
#[derive(Debug, Clone)]
pub struct TurnLog {
    turns: Vec<Turn>,
    capacity: usize,
    strip: Bitmap,
    plotted: usize,
}

impl TurnLog {
    /// A log whose strip is `strip_width` pixels wide, holding `strip_width / 2` turns.
    pub fn new(strip_width: u32) -> Self {
        Self {
            turns: Vec::new(),
            capacity: (strip_width / 2) as usize,
            strip: Bitmap::new(strip_width, 1, |b| {
                b.wipe(rgb(0, 0, 0));
            }),
            plotted: 0,
        }
    }

    /// Append a turn and return its index. A full log keeps its entries and
    /// rejects the new one.
    pub fn append(&mut self, turn: Turn) -> PieceResult<usize> {
        if self.is_full() {
            return Err(PieceError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        // Refuse anything the strip could not hold.
        turn.encode()?;
        self.turns.push(turn);
        debug!("Logged turn {}: {:?}", self.turns.len() - 1, turn.to_array());
        Ok(self.turns.len() - 1)
    }

    /// Write every turn not yet drawn into the strip. Returns how many were
    /// drawn; each turn is drawn once over the life of the log.
    pub fn render(&mut self) -> usize {
        let start = self.plotted;
        while self.plotted < self.turns.len() {
            let index = self.plotted;
            if let Ok([first, second]) = self.turns[index].encode() {
                let x = (index * 2) as i32;
                self.strip.plot(x, 0, first).plot(x + 1, 0, second);
            }
            self.plotted += 1;
        }
        self.plotted - start
    }

    /// Read the drawn turns back out of the strip.
    pub fn decode_strip(&self) -> Vec<Turn> {
        (0..self.plotted)
            .filter_map(|i| {
                let x = (i * 2) as i32;
                Some(Turn::decode([self.strip.pixel(x, 0)?, self.strip.pixel(x + 1, 0)?]))
            })
            .collect()
    }

    pub fn strip(&self) -> &Bitmap {
        &self.strip
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.turns.len() >= self.capacity
    }

    pub fn plotted(&self) -> usize {
        self.plotted
    }
}
