use log::debug;

use crate::error::{PieceError, PieceResult};
use crate::geometry::{Point, Rect};
use crate::input::{Pen, PenEvent};
use crate::piece::Cursor;

use super::turn_log::Turn;

/// The rectangle being selected or carried around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection currently sits.
    pub rect: Rect,
    /// Where it was when the drag ended. Captured pixels come from here.
    pub origin: Rect,
}

impl Selection {
    /// Single cell under `point`, clipped to `canvas`. Off the canvas this is
    /// an empty rectangle.
    fn at(point: Point, canvas: Rect) -> Self {
        let rect = Rect::new(point.x, point.y, 1, 1).cropped_to(canvas);
        Self { rect, origin: rect }
    }

    pub fn is_degenerate(&self) -> bool {
        self.origin.is_empty()
    }

    pub fn has_moved(&self) -> bool {
        self.rect.origin() != self.origin.origin()
    }
}

/// Outline blink while a selection is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blink {
    count: u32,
    on: bool,
}

impl Blink {
    /// Step one frame, toggling every `interval` frames starting with the first.
    pub fn advance(&mut self, interval: u32) -> bool {
        if self.count % interval.max(1) == 0 {
            self.on = !self.on;
        }
        self.count = self.count.wrapping_add(1);
        self.on
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Rest,
    Selecting(Selection),
    Selected { selection: Selection, blink: Blink },
    Placing { selection: Selection, blink: Blink },
}

impl SelectionState {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Rest => None,
            Self::Selecting(selection)
            | Self::Selected { selection, .. }
            | Self::Placing { selection, .. } => Some(selection),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Selecting(_) => "selecting",
            Self::Selected { .. } => "selected",
            Self::Placing { .. } => "placing",
        }
    }
}

/// Drives a selection through select, lift, move and commit.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    canvas: Rect,
    /// Selection dropped by the last lift, waiting for the compositor to paste it.
    released: Option<Selection>,
}

impl SelectionController {
    pub fn new(canvas: Rect) -> Self {
        Self {
            state: SelectionState::Rest,
            canvas,
            released: None,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection()
    }

    pub fn released(&self) -> Option<&Selection> {
        self.released.as_ref()
    }

    /// Hand the released selection to the compositor for its commit.
    pub fn take_released(&mut self) -> Option<Selection> {
        self.released.take()
    }

    pub fn is_blinking(&self) -> bool {
        matches!(self.state, SelectionState::Selected { .. } | SelectionState::Placing { .. })
    }

    /// Step the blink while placing. `None` in every other state.
    pub fn advance_blink(&mut self, interval: u32) -> Option<bool> {
        match &mut self.state {
            SelectionState::Placing { blink, .. } => Some(blink.advance(interval)),
            _ => None,
        }
    }

    pub fn cursor(&self) -> Cursor {
        match self.state {
            SelectionState::Rest => Cursor::Precise,
            SelectionState::Selecting(_) => Cursor::Hidden,
            SelectionState::Selected { .. } | SelectionState::Placing { .. } => Cursor::Tiny,
        }
    }

    /// Apply every edge of this tick in order. Returns the turns the ticks
    /// produced, each already validated against the canvas.
    pub fn update(&mut self, pen: &Pen) -> Vec<PieceResult<Turn>> {
        pen.events()
            .iter()
            .filter_map(|&event| self.handle(event, pen))
            .collect()
    }

    /// Transition on a single edge. Pairs with no transition leave the state
    /// as it is. A lift out of placing yields the attempted turn.
    pub fn handle(&mut self, event: PenEvent, pen: &Pen) -> Option<PieceResult<Turn>> {
        let (next, turn) = match (self.state, event) {
            (SelectionState::Rest, PenEvent::Touch) => {
                let start = pen.drag_start().unwrap_or(pen.position());
                (SelectionState::Selecting(Selection::at(start, self.canvas)), None)
            }
            (SelectionState::Selecting(selection), PenEvent::Draw) => {
                (SelectionState::Selecting(self.dragged(selection, pen)), None)
            }
            (SelectionState::Selecting(mut selection), PenEvent::Lift) => {
                selection.origin = selection.rect;
                debug!("Selected {:?}", selection.rect);
                (SelectionState::Selected { selection, blink: Blink::default() }, None)
            }
            (SelectionState::Selected { selection, blink }, PenEvent::Touch) => {
                (SelectionState::Placing { selection, blink }, None)
            }
            (SelectionState::Placing { mut selection, blink }, PenEvent::Draw) => {
                selection.rect = selection.rect.translated(pen.drag_delta());
                (SelectionState::Placing { selection, blink }, None)
            }
            (SelectionState::Placing { selection, .. }, PenEvent::Lift) => {
                self.released = Some(selection);
                (SelectionState::Rest, Some(self.finish(selection)))
            }
            (state, _) => (state, None),
        };
        if next.name() != self.state.name() {
            debug!("Selection {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        turn
    }

    fn dragged(&self, selection: Selection, pen: &Pen) -> Selection {
        let start = pen.drag_start().unwrap_or(selection.rect.origin());
        let amount = pen.drag_amount();
        if amount.is_zero() {
            return Selection::at(start, self.canvas);
        }
        let rect = Rect::from_drag(start, amount).cropped_to(self.canvas);
        Selection { rect, origin: rect }
    }

    fn finish(&self, selection: Selection) -> PieceResult<Turn> {
        if selection.is_degenerate() {
            return Err(PieceError::DegenerateSelection {
                w: selection.origin.w,
                h: selection.origin.h,
            });
        }
        Turn::new(selection.origin, selection.rect.origin(), self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect::sized(64, 64);

    fn touch(pen: &mut Pen, x: i32, y: i32) {
        pen.begin_tick();
        pen.press(Point::new(x, y));
    }

    fn drag(pen: &mut Pen, x: i32, y: i32) {
        pen.begin_tick();
        pen.move_to(Point::new(x, y));
    }

    fn lift(pen: &mut Pen) {
        pen.begin_tick();
        let at = pen.position();
        pen.release(at);
    }

    #[test]
    fn test_select_crops_to_canvas() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);

        touch(&mut pen, 60, 60);
        controller.update(&pen);
        drag(&mut pen, 70, 70);
        controller.update(&pen);
        assert_eq!(controller.selection().unwrap().rect, Rect::new(60, 60, 4, 4));

        drag(&mut pen, 50, 58);
        controller.update(&pen);
        assert_eq!(controller.selection().unwrap().rect, Rect::new(50, 58, 10, 2));
    }

    #[test]
    fn test_drag_box_follows_the_pen_back_to_the_start() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);

        touch(&mut pen, 10, 10);
        controller.update(&pen);
        drag(&mut pen, 30, 30);
        controller.update(&pen);
        assert_eq!(controller.selection().unwrap().rect, Rect::new(10, 10, 20, 20));

        drag(&mut pen, 4, 6);
        controller.update(&pen);
        assert_eq!(controller.selection().unwrap().rect, Rect::new(4, 6, 6, 4));

        drag(&mut pen, 10, 10);
        controller.update(&pen);
        let selection = controller.selection().unwrap();
        assert_eq!(selection.rect, Rect::new(10, 10, 1, 1));
        assert_eq!(selection.origin, selection.rect);
    }

    #[test]
    fn test_touch_off_the_sketch_is_degenerate() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);

        touch(&mut pen, 5, 64);
        controller.update(&pen);
        lift(&mut pen);
        controller.update(&pen);
        assert!(controller.selection().unwrap().is_degenerate());

        touch(&mut pen, 5, 64);
        controller.update(&pen);
        drag(&mut pen, 5, 30);
        controller.update(&pen);
        lift(&mut pen);
        let turns = controller.update(&pen);
        assert!(matches!(turns[..], [Err(PieceError::DegenerateSelection { .. })]));
    }

    #[test]
    fn test_single_cell_selection_is_valid() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);
        touch(&mut pen, 3, 4);
        controller.update(&pen);
        lift(&mut pen);
        controller.update(&pen);
        match controller.state() {
            SelectionState::Selected { selection, .. } => {
                assert_eq!(selection.origin, Rect::new(3, 4, 1, 1));
            }
            other => panic!("expected selected, got {other:?}"),
        }
    }

    #[test]
    fn test_unlisted_pairs_keep_state() {
        let pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);
        for event in [PenEvent::Draw, PenEvent::Lift] {
            assert!(controller.handle(event, &pen).is_none());
            assert_eq!(*controller.state(), SelectionState::Rest);
        }

        controller.handle(PenEvent::Touch, &pen);
        let selecting = *controller.state();
        assert!(controller.handle(PenEvent::Touch, &pen).is_none());
        assert_eq!(*controller.state(), selecting);

        controller.handle(PenEvent::Lift, &pen);
        let selected = *controller.state();
        for event in [PenEvent::Draw, PenEvent::Lift] {
            controller.handle(event, &pen);
            assert_eq!(*controller.state(), selected);
        }

        controller.handle(PenEvent::Touch, &pen);
        let placing = *controller.state();
        assert!(matches!(placing, SelectionState::Placing { .. }));
        controller.handle(PenEvent::Touch, &pen);
        assert_eq!(*controller.state(), placing);
    }

    #[test]
    fn test_move_translates_without_resizing() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);
        touch(&mut pen, 0, 0);
        controller.update(&pen);
        drag(&mut pen, 4, 4);
        controller.update(&pen);
        lift(&mut pen);
        controller.update(&pen);

        touch(&mut pen, 2, 2);
        controller.update(&pen);
        drag(&mut pen, -20, 2);
        controller.update(&pen);
        assert_eq!(controller.selection().unwrap().rect, Rect::new(-22, 0, 4, 4));
        assert_eq!(controller.cursor(), Cursor::Tiny);

        drag(&mut pen, 12, 12);
        controller.update(&pen);
        lift(&mut pen);
        let turns = controller.update(&pen);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].as_ref().unwrap().to_array(), [0, 0, 4, 4, 10, 10]);
        assert_eq!(*controller.state(), SelectionState::Rest);
        assert_eq!(controller.released().unwrap().rect, Rect::new(10, 10, 4, 4));
    }

    #[test]
    fn test_blink_only_toggles_while_placing() {
        let pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);
        assert_eq!(controller.advance_blink(60), None);
        controller.handle(PenEvent::Touch, &pen);
        controller.handle(PenEvent::Lift, &pen);
        assert_eq!(controller.advance_blink(60), None);
        assert!(controller.is_blinking());

        controller.handle(PenEvent::Touch, &pen);
        assert_eq!(controller.advance_blink(60), Some(true));
        for _ in 1..60 {
            assert_eq!(controller.advance_blink(60), Some(true));
        }
        assert_eq!(controller.advance_blink(60), Some(false));
    }

    #[test]
    fn test_degenerate_selection_never_logs() {
        let mut pen = Pen::new();
        let mut controller = SelectionController::new(CANVAS);
        touch(&mut pen, 5, 5);
        controller.update(&pen);
        drag(&mut pen, 9, 5);
        controller.update(&pen);
        assert!(controller.selection().unwrap().rect.is_empty());
        lift(&mut pen);
        controller.update(&pen);

        touch(&mut pen, 5, 5);
        controller.update(&pen);
        drag(&mut pen, 9, 9);
        controller.update(&pen);
        lift(&mut pen);
        let turns = controller.update(&pen);
        assert_eq!(turns, vec![Err(PieceError::DegenerateSelection { w: 4, h: 0 })]);
    }
}
