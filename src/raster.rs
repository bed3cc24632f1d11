//! # Scan Conversion
//!
//! Pixel plotting and integer line drawing shared by the line and rectangle
//! shapes. No anti-aliasing.
//!
//! Both functions take a [`SurfaceLock`], so a caller cannot write pixels
//! without holding the surface lock. Coordinates are not validated against
//! the surface; pixels that fall outside it are dropped by the buffer.

use log::debug;

use crate::color::Color;
use crate::surface::{Surface, SurfaceLock};

/// Write an already mapped native pixel at `(x, y)`.
#[inline]
pub fn plot_pixel(lock: &mut SurfaceLock<'_>, pixel: u32, x: i32, y: i32) {
    lock.put_pixel(x, y, pixel);
}

/// Draw a line between two points, endpoints inclusive.
///
/// Vertical and horizontal segments use direct loops. Everything else uses
/// Bresenham stepping along x, one pixel per column, so exactly
/// `|x2 - x1| + 1` pixels are plotted. Loops only visit columns and rows
/// that intersect the surface; the result is the same as plotting every
/// pixel and dropping those outside.
pub fn draw_line(lock: &mut SurfaceLock<'_>, color: Color, x1: i32, y1: i32, x2: i32, y2: i32) {
    let pixel = Surface::map_rgba(color);
    let width = lock.width() as i64;
    let height = lock.height() as i64;

    debug!(
        target: "easel::draw",
        "Shape: draw line from: {},{} to: {},{} canvas width {} canvas height {}",
        x1, y1, x2, y2, width, height
    );

    if width == 0 || height == 0 {
        return;
    }

    let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);

    // vertical
    if x1 == x2 {
        if !(0..width).contains(&x1) {
            return;
        }
        let (top, bottom) = if y2 < y1 { (y2, y1) } else { (y1, y2) };
        for y in top.max(0)..=bottom.min(height - 1) {
            plot_pixel(lock, pixel, x1 as i32, y as i32);
        }
        return;
    }

    // horizontal
    if y1 == y2 {
        if !(0..height).contains(&y1) {
            return;
        }
        let (left, right) = if x2 < x1 { (x2, x1) } else { (x1, x2) };
        for x in left.max(0)..=right.min(width - 1) {
            plot_pixel(lock, pixel, x as i32, y1 as i32);
        }
        return;
    }

    let (x1, y1, x2, y2) = if x1 > x2 { (x2, y2, x1, y1) } else { (x1, y1, x2, y2) };
    if x2 < 0 || x1 >= width {
        return;
    }

    let dx = x2 - x1;
    let mut dy = y2 - y1;
    let mut slope = 1;
    if dy < 0 {
        slope = -1;
        dy = -dy;
    }

    let inc_e = 2 * dy;
    let inc_ne = 2 * dy - 2 * dx;
    let mut d = 2 * dy - dx;
    let mut x = x1;
    let mut y = y1;

    // jump straight to the first visible column
    if x < 0 {
        let skipped = -x;
        let steps = bresenham_steps(dx, dy, skipped);
        d = (d as i128 + skipped as i128 * inc_e as i128 + steps as i128 * (inc_ne - inc_e) as i128) as i64;
        y += slope * steps;
        x = 0;
    }

    let last = x2.min(width - 1);
    while x <= last {
        if (0..height).contains(&y) {
            plot_pixel(lock, pixel, x as i32, y as i32);
        }
        if d <= 0 {
            d += inc_e;
        } else {
            d += inc_ne;
            y += slope;
        }
        x += 1;
    }
}

/// Number of y steps Bresenham takes over its first `columns` columns.
fn bresenham_steps(dx: i64, dy: i64, columns: i64) -> i64 {
    // smallest m with 2 * dx * m >= 2 * dy * columns - dx, at most one per column
    let numerator = 2 * dy as i128 * columns as i128 - dx as i128;
    let denominator = 2 * dx as i128;
    let steps = -((-numerator).div_euclid(denominator));
    steps.clamp(0, columns as i128) as i64
}
