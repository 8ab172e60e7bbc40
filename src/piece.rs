use crate::bitmap::Bitmap;
use crate::input::{Pen, PenEvent};

/// Cursor style a piece asks the host for. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Precise,
    Tiny,
    Hidden,
}

/// Piece trait defines the callbacks the host drives every frame.
///
/// Construction plays the part of `boot`. Per frame the host calls
/// [`Piece::act`] once for every pen edge, then [`Piece::sim`], then
/// [`Piece::paint`].
pub trait Piece {
    /// Return the name of the piece
    fn name(&self) -> &'static str;

    /// Screen size in pixels the piece paints into.
    fn resolution(&self) -> (u32, u32);

    /// Handle a single pen edge.
    fn act(&mut self, _event: PenEvent, _pen: &Pen) {
        // default: do nothing
    }

    /// Advance state once per tick.
    fn sim(&mut self, _pen: &Pen) {
        // default: do nothing
    }

    /// Render into `screen`. Returns false when nothing was drawn and the
    /// previous frame is still valid.
    fn paint(&mut self, screen: &mut Bitmap, pen: &Pen, paint_count: u64) -> bool;

    fn cursor(&self) -> Cursor {
        Cursor::Precise
    }
}
