//! Pixel target and drawing primitives
//!
//! Every shape is built from single-pixel writes. None of the primitives
//! clip or report errors; coordinates outside the panel are passed straight
//! to the target.

use core::f32::consts::PI;

use crate::draw::DrawMode;

/// Anything that can set or clear a single pixel
pub trait PixelTarget {
    /// Draw one pixel in the given mode
    fn set_pixel(&mut self, x: i32, y: i32, mode: DrawMode);
}

/// Geometric primitives on top of [`PixelTarget`]
pub trait Primitives: PixelTarget {
    /// Draw a line from (x1, y1) to (x2, y2), endpoints included
    ///
    /// Integer Bresenham. The endpoints are ordered so the major axis always
    /// steps forward, which makes the pixel set independent of the order the
    /// endpoints are given in.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: DrawMode) {
        let x_major = (x2 - x1).abs() > (y2 - y1).abs();
        let swap = if x_major { x1 > x2 } else { y1 > y2 };
        let (mut x, mut y, x_end, y_end) = if swap {
            (x2, y2, x1, y1)
        } else {
            (x1, y1, x2, y2)
        };

        let mut dx = x_end - x;
        let mut dy = y_end - y;
        let step_x = if dx < 0 {
            dx = -dx;
            -1
        } else {
            1
        };
        let step_y = if dy < 0 {
            dy = -dy;
            -1
        } else {
            1
        };

        dx <<= 1;
        dy <<= 1;
        self.set_pixel(x, y, mode);

        if dx > dy {
            let mut fraction = dy - (dx >> 1);
            while x != x_end {
                if fraction >= 0 {
                    y += step_y;
                    fraction -= dx;
                }
                x += step_x;
                fraction += dy;
                self.set_pixel(x, y, mode);
            }
        } else {
            let mut fraction = dx - (dy >> 1);
            while y != y_end {
                if fraction >= 0 {
                    x += step_x;
                    fraction -= dy;
                }
                y += step_y;
                fraction += dx;
                self.set_pixel(x, y, mode);
            }
        }
    }

    /// Draw a circle outline centred on (cx, cy)
    ///
    /// Midpoint algorithm, one octant computed and mirrored eight ways.
    /// Radius 0 plots the centre pixel.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, mode: DrawMode) {
        let mut xc = 0;
        let mut yc = radius;
        let mut p = 3 - (radius << 1);

        while xc <= yc {
            self.set_pixel(cx + xc, cy + yc, mode);
            self.set_pixel(cx + xc, cy - yc, mode);
            self.set_pixel(cx - xc, cy + yc, mode);
            self.set_pixel(cx - xc, cy - yc, mode);
            self.set_pixel(cx + yc, cy + xc, mode);
            self.set_pixel(cx + yc, cy - xc, mode);
            self.set_pixel(cx - yc, cy + xc, mode);
            self.set_pixel(cx - yc, cy - xc, mode);

            if p < 0 {
                p += (xc << 2) + 6;
            } else {
                p += ((xc - yc) << 2) + 10;
                yc -= 1;
            }
            xc += 1;
        }
    }

    /// Draw the rectangle with corners (x1, y1) and (x2, y2)
    ///
    /// Expects x1 <= x2 and y1 <= y2. [`DrawMode::Fill`] and
    /// [`DrawMode::Erase`] also cover every interior scanline, so their cost
    /// grows with the area.
    fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: DrawMode) {
        for x in x1..=x2 {
            self.set_pixel(x, y1, mode);
        }
        for x in x1..=x2 {
            self.set_pixel(x, y2, mode);
        }
        for y in y1..=y2 {
            self.set_pixel(x1, y, mode);
        }
        for y in y1..=y2 {
            self.set_pixel(x2, y, mode);
        }

        if mode.covers_interior() {
            for y in y1..=y2 {
                self.draw_line(x1, y, x2, y, mode);
            }
        }
    }

    /// Draw a radial segment around (x, y)
    ///
    /// 0 degrees points up (towards negative y) and angles grow clockwise.
    /// The segment runs from `inner_radius` to `outer_radius`.
    fn draw_radial_line(
        &mut self,
        x: i32,
        y: i32,
        degrees: i32,
        inner_radius: i32,
        outer_radius: i32,
        mode: DrawMode,
    ) {
        let radians = degrees as f32 * PI / 180.0;
        let sin = libm::sinf(radians);
        let cos = libm::cosf(radians);

        // Offsets truncate on their own; sin/cos residue near the axes must
        // not pull a whole-number centre down by one
        let from_x = x + (inner_radius as f32 * sin) as i32;
        let from_y = y - (inner_radius as f32 * cos) as i32;
        let to_x = x + (outer_radius as f32 * sin) as i32;
        let to_y = y - (outer_radius as f32 * cos) as i32;

        self.draw_line(from_x, from_y, to_x, to_y, mode);
    }
}

// Blanket implementation for all PixelTarget types
impl<T: PixelTarget + ?Sized> Primitives for T {}
