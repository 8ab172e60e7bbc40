use egui::{Context, Pos2, Rect as ScreenRect};

use crate::geometry::Point;

/// Discrete pen edges seen during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenEvent {
    /// Press began.
    Touch,
    /// Moved while held down.
    Draw,
    /// Released.
    Lift,
}

/// Pointer state in canvas pixels, rebuilt by the host every tick.
#[derive(Debug, Clone, Default)]
pub struct Pen {
    position: Point,
    down: bool,
    drag_start: Option<Point>,
    delta: Point,
    events: Vec<PenEvent>,
    changed: bool,
}

impl Pen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last tick's edges and deltas. Position and drag start persist.
    pub fn begin_tick(&mut self) {
        self.events.clear();
        self.delta = Point::ZERO;
        self.changed = false;
    }

    pub fn press(&mut self, at: Point) {
        self.position = at;
        self.down = true;
        self.drag_start = Some(at);
        self.events.push(PenEvent::Touch);
        self.changed = true;
    }

    pub fn move_to(&mut self, at: Point) {
        if at == self.position {
            return;
        }
        if self.down {
            self.delta = self.delta + (at - self.position);
            // One draw edge per tick; the delta above already covers every step.
            if !self.events.contains(&PenEvent::Draw) {
                self.events.push(PenEvent::Draw);
            }
        }
        self.position = at;
        self.changed = true;
    }

    /// Release at `at`. The drag start is kept so the lift tick can still
    /// read the total drag amount.
    pub fn release(&mut self, at: Point) {
        self.move_to(at);
        self.down = false;
        self.events.push(PenEvent::Lift);
        self.changed = true;
    }

    pub fn is(&self, event: PenEvent) -> bool {
        self.events.contains(&event)
    }

    pub fn events(&self) -> &[PenEvent] {
        &self.events
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn drag_start(&self) -> Option<Point> {
        self.drag_start
    }

    /// Movement since the previous tick while held down.
    pub fn drag_delta(&self) -> Point {
        self.delta
    }

    /// Movement from the drag start to the current position.
    pub fn drag_amount(&self) -> Point {
        self.drag_start.map_or(Point::ZERO, |start| self.position - start)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Force the next paint to be treated as dirty.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }
}

/// Converts egui pointer input over the canvas widget into [`Pen`] updates
pub struct InputHandler {
    canvas_rect: ScreenRect,
    scale: f32,
}

impl InputHandler {
    pub fn new(canvas_rect: ScreenRect, scale: f32) -> Self {
        Self {
            canvas_rect,
            scale: scale.max(1.0),
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: ScreenRect) {
        self.canvas_rect = rect;
    }

    /// Map a screen position to a canvas pixel.
    pub fn to_pixel(&self, pos: Pos2) -> Point {
        let local = (pos - self.canvas_rect.min) / self.scale;
        Point::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// Feed this frame's pointer input into `pen`. Presses only count inside
    /// the canvas; releases count anywhere once a press is held.
    pub fn process_input(&self, ctx: &Context, pen: &mut Pen) {
        ctx.input(|input| {
            let Some(pos) = input.pointer.latest_pos() else {
                return;
            };
            let at = self.to_pixel(pos);

            if input.pointer.primary_pressed() && !pen.is_down() && self.canvas_rect.contains(pos) {
                pen.press(at);
            } else {
                pen.move_to(at);
            }

            if input.pointer.primary_released() && pen.is_down() {
                pen.release(at);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_tracks_delta_and_amount() {
        let mut pen = Pen::new();
        pen.press(Point::new(5, 5));
        assert!(pen.is(PenEvent::Touch));

        pen.begin_tick();
        pen.move_to(Point::new(7, 6));
        pen.move_to(Point::new(9, 9));
        assert_eq!(pen.events(), &[PenEvent::Draw]);
        assert_eq!(pen.drag_delta(), Point::new(4, 4));
        assert_eq!(pen.drag_amount(), Point::new(4, 4));

        pen.begin_tick();
        pen.release(Point::new(9, 9));
        assert_eq!(pen.events(), &[PenEvent::Lift]);
        assert_eq!(pen.drag_amount(), Point::new(4, 4));
        assert!(!pen.is_down());
    }

    #[test]
    fn test_hover_changes_without_draw() {
        let mut pen = Pen::new();
        pen.move_to(Point::new(3, 3));
        assert!(pen.changed());
        assert!(pen.events().is_empty());
        pen.begin_tick();
        assert!(!pen.changed());
    }

    #[test]
    fn test_screen_to_pixel() {
        let rect = ScreenRect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(640.0, 650.0));
        let handler = InputHandler::new(rect, 10.0);
        assert_eq!(handler.to_pixel(egui::pos2(10.0, 20.0)), Point::new(0, 0));
        assert_eq!(handler.to_pixel(egui::pos2(35.0, 59.0)), Point::new(2, 3));
        assert_eq!(handler.to_pixel(egui::pos2(5.0, 20.0)), Point::new(-1, 0));
    }
}
