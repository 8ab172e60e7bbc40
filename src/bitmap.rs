use image::{Rgba, RgbaImage, imageops};

use crate::geometry::{Point, Rect};

/// Drawing colour. An alpha of 255 overwrites, anything lower blends.
pub type Ink = Rgba<u8>;

/// Shorthand for an [`Ink`] from its four channels.
pub const fn ink(r: u8, g: u8, b: u8, a: u8) -> Ink {
    Rgba([r, g, b, a])
}

/// Opaque ink.
pub const fn rgb(r: u8, g: u8, b: u8) -> Ink {
    Rgba([r, g, b, 255])
}

/// An owned RGBA pixel buffer with the handful of primitives the pieces draw with.
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Create a buffer and run `init` on it before handing it out.
    pub fn new(width: u32, height: u32, init: impl FnOnce(&mut Bitmap)) -> Self {
        let mut bitmap = Self::blank(width, height);
        init(&mut bitmap);
        bitmap
    }

    /// Fully transparent buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width() as i32, self.height() as i32)
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Ink> {
        if self.bounds().contains(Point::new(x, y)) {
            Some(*self.pixels.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Fill every pixel with `color`, ignoring blending.
    pub fn wipe(&mut self, color: Ink) -> &mut Self {
        for p in self.pixels.pixels_mut() {
            *p = color;
        }
        self
    }

    /// Draw one pixel. Coordinates outside the buffer are ignored.
    pub fn plot(&mut self, x: i32, y: i32, color: Ink) -> &mut Self {
        if !self.bounds().contains(Point::new(x, y)) {
            return self;
        }
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        *dst = blend(*dst, color);
        self
    }

    pub fn box_fill(&mut self, rect: Rect, color: Ink) -> &mut Self {
        let r = rect.abs().cropped_to(self.bounds());
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                self.plot(x, y, color);
            }
        }
        self
    }

    /// One-pixel border drawn just outside `rect`.
    pub fn box_outline(&mut self, rect: Rect, color: Ink) -> &mut Self {
        let r = rect.abs();
        self.border(Rect::new(r.x - 1, r.y - 1, r.w + 2, r.h + 2), color)
    }

    /// One-pixel border drawn on the edge pixels of `rect`.
    pub fn box_inline(&mut self, rect: Rect, color: Ink) -> &mut Self {
        self.border(rect.abs(), color)
    }

    fn border(&mut self, r: Rect, color: Ink) -> &mut Self {
        if r.is_empty() {
            return self;
        }
        for x in r.x..r.right() {
            self.plot(x, r.y, color);
            if r.h > 1 {
                self.plot(x, r.bottom() - 1, color);
            }
        }
        for y in (r.y + 1)..(r.bottom() - 1) {
            self.plot(r.x, y, color);
            if r.w > 1 {
                self.plot(r.right() - 1, y, color);
            }
        }
        self
    }

    /// Bresenham line including both endpoints.
    pub fn line(&mut self, from: Point, to: Point, color: Ink) -> &mut Self {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.plot(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        self
    }

    /// Overwrite the pixels under `src` placed at `(x, y)`. Parts falling
    /// outside this buffer are clipped.
    pub fn paste(&mut self, src: &Bitmap, x: i32, y: i32) -> &mut Self {
        let target = Rect::new(x, y, src.width() as i32, src.height() as i32).cropped_to(self.bounds());
        for ty in target.y..target.bottom() {
            for tx in target.x..target.right() {
                let p = *src.pixels.get_pixel((tx - x) as u32, (ty - y) as u32);
                self.pixels.put_pixel(tx as u32, ty as u32, p);
            }
        }
        self
    }

    /// Copy the region under `rect` into a new buffer. Returns `None` when the
    /// region is empty once clipped to this buffer.
    pub fn copy_region(&self, rect: Rect) -> Option<Bitmap> {
        let r = rect.cropped_to(self.bounds());
        if r.is_empty() {
            return None;
        }
        let view = imageops::crop_imm(&self.pixels, r.x as u32, r.y as u32, r.w as u32, r.h as u32);
        Some(Bitmap {
            pixels: view.to_image(),
        })
    }
}

/// Source-over blend of `src` onto `dst`.
fn blend(dst: Ink, src: Ink) -> Ink {
    match src.0[3] {
        255 => src,
        0 => dst,
        a => {
            let a = u32::from(a);
            let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8;
            let out_a = a + u32::from(dst.0[3]) * (255 - a) / 255;
            Rgba([
                mix(src.0[0], dst.0[0]),
                mix(src.0[1], dst.0[1]),
                mix(src.0[2], dst.0[2]),
                out_a.min(255) as u8,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initializer_runs_before_return() {
        let b = Bitmap::new(4, 2, |b| {
            b.wipe(rgb(1, 2, 3));
        });
        assert_eq!(b.pixel(3, 1), Some(rgb(1, 2, 3)));
        assert_eq!(b.pixel(4, 1), None);
    }

    #[test]
    fn test_paste_clips_negative_offsets() {
        let mut dst = Bitmap::new(4, 4, |b| {
            b.wipe(rgb(0, 0, 0));
        });
        let src = Bitmap::new(2, 2, |b| {
            b.wipe(rgb(9, 9, 9));
        });
        dst.paste(&src, -1, -1);
        assert_eq!(dst.pixel(0, 0), Some(rgb(9, 9, 9)));
        assert_eq!(dst.pixel(1, 0), Some(rgb(0, 0, 0)));
        dst.paste(&src, 3, 3);
        assert_eq!(dst.pixel(3, 3), Some(rgb(9, 9, 9)));
    }

    #[test]
    fn test_copy_region() {
        let mut b = Bitmap::new(8, 8, |b| {
            b.wipe(rgb(0, 0, 0));
        });
        b.plot(2, 3, rgb(200, 0, 0));
        let copy = b.copy_region(Rect::new(2, 3, 2, 2)).unwrap();
        assert_eq!((copy.width(), copy.height()), (2, 2));
        assert_eq!(copy.pixel(0, 0), Some(rgb(200, 0, 0)));
        assert!(b.copy_region(Rect::new(2, 3, 0, 2)).is_none());
    }

    #[test]
    fn test_zero_alpha_plot_is_invisible() {
        let mut b = Bitmap::new(1, 1, |b| {
            b.wipe(rgb(10, 20, 30));
        });
        b.plot(0, 0, ink(200, 0, 0, 0));
        assert_eq!(b.pixel(0, 0), Some(rgb(10, 20, 30)));
        b.plot(0, 0, ink(255, 255, 255, 128));
        let p = b.pixel(0, 0).unwrap();
        assert!(p.0[0] > 10 && p.0[0] < 255);
    }

    #[test]
    fn test_line_hits_endpoints() {
        let mut b = Bitmap::blank(6, 6);
        b.line(Point::new(0, 0), Point::new(5, 3), rgb(1, 1, 1));
        assert_eq!(b.pixel(0, 0), Some(rgb(1, 1, 1)));
        assert_eq!(b.pixel(5, 3), Some(rgb(1, 1, 1)));
    }
}
