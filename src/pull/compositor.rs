use log::{debug, info};

use crate::bitmap::{Bitmap, Ink, ink};
use crate::input::Pen;

use super::selection::{SelectionController, SelectionState};
use super::turn_log::TurnLog;

const SELECTING_INK: Ink = ink(255, 0, 0, 128);
const SELECTED_INK: Ink = ink(200, 0, 0, 128);

/// Builds each pull frame and owns the floating copy of the selection.
#[derive(Debug, Default)]
pub struct Compositor {
    buffer: Option<Bitmap>,
    captures: usize,
    blink_interval: u32,
}

impl Compositor {
    pub fn new(blink_interval: u32) -> Self {
        Self {
            buffer: None,
            captures: 0,
            blink_interval,
        }
    }

    /// How many selection buffers have been captured so far.
    pub fn captures(&self) -> usize {
        self.captures
    }

    pub fn buffer(&self) -> Option<&Bitmap> {
        self.buffer.as_ref()
    }

    /// Always paint the first frame, then only on pen change or while a held
    /// selection is blinking.
    pub fn is_dirty(&self, controller: &SelectionController, pen: &Pen, paint_count: u64) -> bool {
        paint_count == 0 || pen.changed() || controller.is_blinking()
    }

    /// Compose one frame into `screen`. Returns false when the frame was skipped.
    pub fn paint(
        &mut self,
        screen: &mut Bitmap,
        sketch: &mut Bitmap,
        controller: &mut SelectionController,
        log: &mut TurnLog,
        pen: &Pen,
        paint_count: u64,
    ) -> bool {
        if !self.is_dirty(controller, pen, paint_count) {
            return false;
        }

        screen.paste(sketch, 0, 0);

        let outline = match controller.advance_blink(self.blink_interval) {
            Some(on) => Some(ink(200, 0, 0, if on { 64 } else { 0 })),
            None => match controller.state() {
                SelectionState::Selecting(_) => Some(SELECTING_INK),
                SelectionState::Selected { .. } => Some(SELECTED_INK),
                _ => None,
            },
        };
        if let (Some(selection), Some(color)) = (controller.selection(), outline) {
            screen.box_outline(selection.rect, color);
        }

        self.capture(sketch, controller);

        if let Some(buffer) = &self.buffer {
            if let Some(selection) = controller.selection() {
                screen.paste(buffer, selection.rect.x, selection.rect.y);
            }
        }

        if matches!(controller.state(), SelectionState::Rest) {
            if let Some(selection) = controller.take_released() {
                if let Some(buffer) = self.buffer.take() {
                    sketch.paste(&buffer, selection.rect.x, selection.rect.y);
                    debug!("Committed selection at {:?}", selection.rect);
                }
                screen.paste(sketch, 0, 0);
            }
        }

        log.render();
        screen.paste(log.strip(), 0, screen.height() as i32 - 1);

        true
    }

    /// Copy the pixels under a freshly held selection, once.
    fn capture(&mut self, sketch: &Bitmap, controller: &SelectionController) {
        if self.buffer.is_some() || !controller.is_blinking() {
            return;
        }
        let Some(selection) = controller.selection() else {
            return;
        };
        if selection.is_degenerate() {
            return;
        }
        if let Some(buffer) = sketch.copy_region(selection.origin) {
            info!("Captured selection: {}x{}", buffer.width(), buffer.height());
            self.buffer = Some(buffer);
            self.captures += 1;
        }
    }
}
