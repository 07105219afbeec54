//! Drawing primitives.
//!
//! Every primitive converts its [`Color`] to an 8-bit ink once per call and
//! clips silently at the image edges. Pixels are painted through
//! [`Image::paint`], so they composite when alpha blending is on. Each
//! pixel is painted at most once per call, which keeps translucent strokes
//! even.

use super::{Image, ink};
use crate::color::Color;
use crate::error::Result;
use crate::geometry::{Point, Rectangle, Size};
use image::Rgba;

/// Bresenham ellipse stepper over the first quadrant.
///
/// Starts at `(0, -ry)` and moves toward `(rx, 0)`, one unit step in x,
/// y, or both per call to [`Self::next`]. The error terms grow with
/// `rx^2 * ry`, so they are kept in `i128` to cover any `u32` size.
struct EllipseStepper {
    rx2: i128,
    ry2: i128,
    two_rx2: i128,
    two_ry2: i128,
    dx: i64,
    dy: i64,
    inc_x: i128,
    inc_y: i128,
    cur_f: i128,
}

impl EllipseStepper {
    fn new(rx: i64, ry: i64) -> Self {
        let (rx, ry) = (rx as i128, ry as i128);
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        Self {
            rx2,
            ry2,
            two_rx2: rx2 << 1,
            two_ry2: ry2 << 1,
            dx: 0,
            dy: 0,
            inc_x: 0,
            inc_y: -ry * (rx2 << 1),
            cur_f: 0,
        }
    }

    fn next(&mut self) {
        let fx = self.cur_f + self.inc_x + self.ry2;
        let fy = self.cur_f + self.inc_y + self.rx2;
        let fxy = fx + self.inc_y + self.rx2;

        let (mx, my, mxy) = (fx.abs(), fy.abs(), fxy.abs());
        let (min_m, step_x) = if mx > my { (my, false) } else { (mx, true) };

        self.dx = 0;
        self.dy = 0;
        if min_m > mxy {
            self.inc_x += self.two_ry2;
            self.inc_y += self.two_rx2;
            self.cur_f = fxy;
            self.dx = 1;
            self.dy = 1;
        } else if step_x {
            self.inc_x += self.two_ry2;
            self.cur_f = fx;
            self.dx = 1;
        } else {
            self.inc_y += self.two_rx2;
            self.cur_f = fy;
            self.dy = 1;
        }
    }
}

/// Range of steps `k` in `0..=len` where `start + sign * k` lies in
/// `0..limit`.
fn visible_steps(start: i64, sign: i64, len: i64, limit: i64) -> Option<(i64, i64)> {
    let (lo, hi) = if sign < 0 {
        (start - (limit - 1), start)
    } else {
        (-start, limit - 1 - start)
    };
    let (lo, hi) = (lo.max(0), hi.min(len));
    (lo <= hi).then_some((lo, hi))
}

/// Minor-axis offset at major step `k`: `minor / major * k`, rounded half up.
fn minor_offset(k: i64, minor: i64, major: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let (k, minor, major) = (k as i128, minor as i128, major as i128);
    ((2 * k * minor + major) / (2 * major)) as i64
}

impl Image {
    /// Flood-fill the 4-connected region sharing the seed pixel's color.
    pub fn fill(&mut self, seed: Point, color: Color) -> Result<()> {
        let (sx, sy) = self.checked(seed)?;
        let ink = ink(color);
        let (width, height) = (self.width(), self.height());
        let target = *self.bitmap().get_pixel(sx, sy);
        let index = |x: u32, y: u32| (y as usize) * width as usize + x as usize;
        let mut visited = vec![false; width as usize * height as usize];
        let mut stack = vec![(sx, sy)];

        while let Some((x, y)) = stack.pop() {
            let matches = |image: &Image, visited: &[bool], x: u32| {
                !visited[index(x, y)] && *image.bitmap().get_pixel(x, y) == target
            };
            if !matches(self, &visited, x) {
                continue;
            }
            let mut left = x;
            while left > 0 && matches(self, &visited, left - 1) {
                left -= 1;
            }
            let mut right = x;
            while right + 1 < width && matches(self, &visited, right + 1) {
                right += 1;
            }
            for px in left..=right {
                visited[index(px, y)] = true;
                self.paint(px as i64, y as i64, ink);
                if y > 0 {
                    stack.push((px, y - 1));
                }
                if y + 1 < height {
                    stack.push((px, y + 1));
                }
            }
        }
        Ok(())
    }

    /// Draw a one-pixel line including both endpoints.
    ///
    /// Only the steps along the major axis that land inside the image are
    /// visited, so far-away endpoints cost nothing extra.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let ink = ink(color);
        let (x0, y0) = (from.x as i64, from.y as i64);
        let (dx, dy) = (to.x as i64 - x0, to.y as i64 - y0);
        let (sx, sy) = (dx.signum(), dy.signum());
        let (adx, ady) = (dx.abs(), dy.abs());

        if adx >= ady {
            let Some((first, last)) = visible_steps(x0, sx, adx, self.width() as i64) else {
                return;
            };
            for k in first..=last {
                self.paint(x0 + sx * k, y0 + sy * minor_offset(k, ady, adx), ink);
            }
        } else {
            let Some((first, last)) = visible_steps(y0, sy, ady, self.height() as i64) else {
                return;
            };
            for k in first..=last {
                self.paint(x0 + sx * minor_offset(k, adx, ady), y0 + sy * k, ink);
            }
        }
    }

    /// Outline of the ellipse inscribed in `size`, centered at `center`.
    pub fn stroke_ellipse(&mut self, center: Point, size: Size, color: Color) {
        let ink = ink(color);
        let (cx, cy) = (center.x as i64, center.y as i64);
        let (rx, ry) = (size.width as i64 / 2, size.height as i64 / 2);
        if rx == 0 || ry == 0 {
            self.degenerate_ellipse(cx, cy, rx, ry, ink);
            return;
        }

        let mut stepper = EllipseStepper::new(rx, ry);
        let (mut dx, mut dy) = (0i64, -ry);
        self.paint_mirrored(cx, cy, dx, dy, ink);
        while dy < 0 {
            stepper.next();
            dx += stepper.dx;
            dy += stepper.dy;
            self.paint_mirrored(cx, cy, dx, dy, ink);
        }
        // Flat ellipses can reach the axis before dx == rx.
        if dx < rx {
            self.hline(cx + dx + 1, cx + rx, cy, ink);
            self.hline(cx - rx, cx - dx - 1, cy, ink);
        }
    }

    /// Filled ellipse inscribed in `size`, centered at `center`.
    pub fn fill_ellipse(&mut self, center: Point, size: Size, color: Color) {
        let ink = ink(color);
        let (cx, cy) = (center.x as i64, center.y as i64);
        let (rx, ry) = (size.width as i64 / 2, size.height as i64 / 2);
        if rx == 0 || ry == 0 {
            self.degenerate_ellipse(cx, cy, rx, ry, ink);
            return;
        }

        let mut stepper = EllipseStepper::new(rx, ry);
        let (mut dx, mut dy) = (0i64, -ry);
        let (mut dx0, mut dy0) = (dx, dy);
        loop {
            stepper.next();
            dx += stepper.dx;
            dy += stepper.dy;
            if dy != dy0 {
                self.hline(cx - dx0, cx + dx0, cy + dy0, ink);
                self.hline(cx - dx0, cx + dx0, cy - dy0, ink);
            }
            dx0 = dx;
            dy0 = dy;
            if dy >= 0 {
                break;
            }
        }
        self.hline(cx - rx, cx + rx, cy, ink);
    }

    /// One-pixel outline of `rect`.
    pub fn stroke_rectangle(&mut self, rect: Rectangle, color: Color) {
        if rect.size.is_empty() {
            return;
        }
        let ink = ink(color);
        let (x0, y0) = (rect.origin.x as i64, rect.origin.y as i64);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);

        self.hline(x0, x1, y0, ink);
        if y1 != y0 {
            self.hline(x0, x1, y1, ink);
        }
        let top = (y0 + 1).max(0);
        let bottom = (y1 - 1).min(self.height() as i64 - 1);
        for y in top..=bottom {
            self.paint(x0, y, ink);
            if x1 != x0 {
                self.paint(x1, y, ink);
            }
        }
    }

    pub fn fill_rectangle(&mut self, rect: Rectangle, color: Color) {
        if rect.size.is_empty() {
            return;
        }
        let ink = ink(color);
        let top = (rect.origin.y as i64).max(0);
        let bottom = (rect.bottom() - 1).min(self.height() as i64 - 1);
        for y in top..=bottom {
            self.hline(rect.origin.x as i64, rect.right() - 1, y, ink);
        }
    }

    fn hline(&mut self, x0: i64, x1: i64, y: i64, ink: Rgba<u8>) {
        if y < 0 || y >= self.height() as i64 {
            return;
        }
        let left = x0.min(x1).max(0);
        let right = x0.max(x1).min(self.width() as i64 - 1);
        for x in left..=right {
            self.paint(x, y, ink);
        }
    }

    /// Paint the up-to-four reflections of a quadrant point, each once.
    fn paint_mirrored(&mut self, cx: i64, cy: i64, dx: i64, dy: i64, ink: Rgba<u8>) {
        let xs: &[i64] = if dx == 0 { &[0] } else { &[dx, -dx] };
        let ys: &[i64] = if dy == 0 { &[0] } else { &[dy, -dy] };
        for &ox in xs {
            for &oy in ys {
                self.paint(cx + ox, cy + oy, ink);
            }
        }
    }

    /// A zero radius flattens the ellipse into a line (or a point).
    fn degenerate_ellipse(&mut self, cx: i64, cy: i64, rx: i64, ry: i64, ink: Rgba<u8>) {
        if ry == 0 {
            self.hline(cx - rx, cx + rx, cy, ink);
        } else {
            let top = (cy - ry).max(0);
            let bottom = (cy + ry).min(self.height() as i64 - 1);
            for y in top..=bottom {
                self.paint(cx, y, ink);
            }
        }
    }
}
