//! Integer raster primitives used to author built-in shapes.

use tg_core::Argb;

/// Draws into a square, row-major pixel grid.
///
/// Coordinates outside the grid are dropped with a warning.
pub struct ShapePainter<'a> {
    side: u32,
    pixels: &'a mut [Argb],
}

impl<'a> ShapePainter<'a> {
    pub fn new(side: u32, pixels: &'a mut [Argb]) -> Self {
        debug_assert_eq!(pixels.len(), (side * side) as usize);
        Self { side, pixels }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Index of the middle column/row.
    pub fn center(&self) -> i32 {
        (self.side / 2) as i32
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Argb) {
        let side = self.side as i32;
        if x < 0 || y < 0 || x >= side || y >= side {
            tracing::warn!(x, y, side, "shape pixel outside sprite buffer");
            return;
        }
        self.pixels[(y * side + x) as usize] = pixel;
    }

    /// Bresenham line including both endpoints.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Argb) {
        if y0 == y1 {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set_pixel(x, y0, pixel);
            }
        } else if x0 == x1 {
            for y in y0.min(y1)..=y0.max(y1) {
                self.set_pixel(x0, y, pixel);
            }
        } else if (y1 - y0).abs() <= (x1 - x0).abs() {
            let ((ax, ay), (bx, by)) = if x0 <= x1 { ((x0, y0), (x1, y1)) } else { ((x1, y1), (x0, y0)) };
            self.x_major(ax, ay, bx, by, pixel);
        } else {
            let ((ax, ay), (bx, by)) = if y0 <= y1 { ((x0, y0), (x1, y1)) } else { ((x1, y1), (x0, y0)) };
            self.y_major(ax, ay, bx, by, pixel);
        }
    }

    fn x_major(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Argb) {
        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let step = if y1 < y0 { -1 } else { 1 };
        let mut d = 2 * dy - dx;
        let mut y = y0;
        self.set_pixel(x0, y0, pixel);
        for x in x0 + 1..=x1 {
            if d <= 0 {
                d += 2 * dy;
            } else {
                d += 2 * (dy - dx);
                y += step;
            }
            self.set_pixel(x, y, pixel);
        }
    }

    fn y_major(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pixel: Argb) {
        let dy = y1 - y0;
        let dx = (x1 - x0).abs();
        let step = if x1 < x0 { -1 } else { 1 };
        let mut d = 2 * dx - dy;
        let mut x = x0;
        self.set_pixel(x0, y0, pixel);
        for y in y0 + 1..=y1 {
            if d <= 0 {
                d += 2 * dx;
            } else {
                d += 2 * (dx - dy);
                x += step;
            }
            self.set_pixel(x, y, pixel);
        }
    }

    /// Closed outline through `points`.
    pub fn polygon(&mut self, points: &[(i32, i32)], pixel: Argb) {
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            self.line(x0, y0, x1, y1, pixel);
        }
    }

    /// Midpoint circle outline.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, pixel: Argb) {
        let (mut dx, mut dy) = (0, radius);
        let mut mid = 1 - radius;
        self.octants(cx, cy, dx, dy, pixel);
        while dy > dx {
            if mid < 0 {
                mid += 2 * dx + 3;
            } else {
                mid += 2 * (dx - dy) + 5;
                dy -= 1;
            }
            dx += 1;
            self.octants(cx, cy, dx, dy, pixel);
        }
    }

    fn octants(&mut self, cx: i32, cy: i32, dx: i32, dy: i32, pixel: Argb) {
        for (ox, oy) in [(dx, dy), (dy, dx), (-dx, dy), (-dy, dx), (dx, -dy), (dy, -dx), (-dx, -dy), (-dy, -dx)] {
            self.set_pixel(cx + ox, cy + oy, pixel);
        }
    }
}
