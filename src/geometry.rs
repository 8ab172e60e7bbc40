//! Integer pixel geometry shared by every piece.

/// A pixel coordinate or an integer offset between two of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned pixel rectangle. `w` and `h` may be negative straight out of
/// a drag; [`Rect::abs`] normalises them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin with the given size.
    pub const fn sized(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// Box spanned by a drag, normalised so the size is never negative.
    pub fn from_drag(start: Point, amount: Point) -> Self {
        Self::new(start.x, start.y, amount.x, amount.y).abs()
    }

    /// Flip negative extents so `(x, y)` becomes the top-left corner.
    pub fn abs(self) -> Self {
        let (x, w) = if self.w < 0 { (self.x + self.w, -self.w) } else { (self.x, self.w) };
        let (y, h) = if self.h < 0 { (self.y + self.h, -self.h) } else { (self.y, self.h) };
        Self::new(x, y, w, h)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Clamp to `bounds`. A rectangle entirely outside collapses to zero size
    /// on the nearest edge.
    pub fn cropped_to(self, bounds: Rect) -> Self {
        let r = self.abs();
        let x0 = r.x.clamp(bounds.x, bounds.right());
        let y0 = r.y.clamp(bounds.y, bounds.bottom());
        let x1 = r.right().clamp(bounds.x, bounds.right());
        let y1 = r.bottom().clamp(bounds.y, bounds.bottom());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// True when at least one pixel is shared with `other`.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || self.x >= other.right()
            || self.bottom() <= other.y
            || self.y >= other.bottom())
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn translated(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Same size, top-left moved to `to`.
    pub fn moved_to(self, to: Point) -> Self {
        Self::new(to.x, to.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_flips_negative_drag() {
        let r = Rect::from_drag(Point::new(10, 10), Point::new(-4, -3));
        assert_eq!(r, Rect::new(6, 7, 4, 3));
    }

    #[test]
    fn test_crop_to_bounds() {
        let bounds = Rect::sized(64, 64);
        assert_eq!(Rect::new(60, -2, 10, 6).cropped_to(bounds), Rect::new(60, 0, 4, 4));
        assert_eq!(Rect::new(70, 70, 5, 5).cropped_to(bounds), Rect::new(64, 64, 0, 0));
    }

    #[test]
    fn test_overlap_edges() {
        let canvas = Rect::sized(64, 64);
        assert!(Rect::new(60, 60, 4, 4).overlaps(&canvas));
        assert!(Rect::new(-3, -3, 4, 4).overlaps(&canvas));
        assert!(!Rect::new(64, 0, 4, 4).overlaps(&canvas));
        assert!(!Rect::new(-4, 10, 4, 4).overlaps(&canvas));
        assert!(!Rect::new(100, 100, 4, 4).overlaps(&canvas));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(Point::new(2, 2)));
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 4)));
    }
}
