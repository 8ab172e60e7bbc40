use crate::geometry::{Point, Rect};

/// A guide grid of `w x h` cells, each `scale` pixels square, placed at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub scale: i32,
}

/// The grid cell under some screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Grid column and row. May lie outside the grid.
    pub gx: i32,
    pub gy: i32,
    /// Screen rectangle of the cell.
    pub rect: Rect,
    pub inside: bool,
}

impl Cell {
    pub fn same_cell(&self, other: &Cell) -> bool {
        self.gx == other.gx && self.gy == other.gy
    }
}

impl Grid {
    pub const fn new(x: i32, y: i32, w: i32, h: i32, scale: i32) -> Self {
        Self { x, y, w, h, scale }
    }

    /// Size in cells.
    pub fn cells(&self) -> Rect {
        Rect::sized(self.w, self.h)
    }

    /// Screen rectangle covered by the grid.
    pub fn scaled(&self) -> Rect {
        Rect::new(self.x, self.y, self.w * self.scale, self.h * self.scale)
    }

    /// Offset from a cell's corner to its centre pixel.
    pub fn center_offset(&self) -> Point {
        Point::new(self.scale / 2, self.scale / 2)
    }

    pub fn cell(&self, gx: i32, gy: i32) -> Cell {
        Cell {
            gx,
            gy,
            rect: Rect::new(self.x + gx * self.scale, self.y + gy * self.scale, self.scale, self.scale),
            inside: self.cells().contains(Point::new(gx, gy)),
        }
    }

    pub fn under(&self, p: Point) -> Cell {
        let scale = self.scale.max(1);
        self.cell((p.x - self.x).div_euclid(scale), (p.y - self.y).div_euclid(scale))
    }

    /// Screen position of the centre of cell `(gx, gy)`.
    pub fn get(&self, gx: i32, gy: i32) -> Point {
        self.cell(gx, gy).rect.origin() + self.center_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_maps_pixels_to_cells() {
        let grid = Grid::new(17, 2, 6, 10, 5);
        let cell = grid.under(Point::new(17, 2));
        assert_eq!((cell.gx, cell.gy, cell.inside), (0, 0, true));
        let cell = grid.under(Point::new(46, 51));
        assert_eq!((cell.gx, cell.gy, cell.inside), (5, 9, true));
        let cell = grid.under(Point::new(16, 2));
        assert_eq!((cell.gx, cell.inside), (-1, false));
        assert_eq!(cell.rect, Rect::new(12, 2, 5, 5));
    }

    #[test]
    fn test_centers() {
        let grid = Grid::new(17, 2, 6, 10, 5);
        assert_eq!(grid.get(0, 0), Point::new(19, 4));
        assert_eq!(grid.get(1, 2), Point::new(24, 14));
    }
}
