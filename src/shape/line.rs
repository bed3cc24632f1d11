//! The `line` shape.

use log::debug;

use crate::color::{self, Color};
use crate::config::Attributes;
use crate::dynamic::{parse_signed, parse_unsigned};
use crate::raster::draw_line;
use crate::surface::Surface;

/// A straight line between two points.
///
/// Negative coordinates count back from the far edge of the canvas:
/// `x = -1` is the last column, `y = -1` the last row.
///
/// ```text
/// [line]
///     x1, y1 = (int = 0), (int = 0)   start point
///     x2, y2 = (int = 0), (int = 0)   end point
///     colour = (colour = "")          line colour
///     thickness = (uint = 0)          parsed, not applied
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub colour: Color,
    pub thickness: u32,
}

impl Line {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, colour: Color, thickness: u32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            colour,
            thickness,
        }
    }

    pub fn from_attributes(cfg: &Attributes) -> Self {
        Self {
            x1: parse_signed(cfg.get("x1")),
            y1: parse_signed(cfg.get("y1")),
            x2: parse_signed(cfg.get("x2")),
            y2: parse_signed(cfg.get("y2")),
            colour: color::decode(cfg.get("colour")),
            thickness: parse_unsigned(cfg.get("thickness")) as u32,
        }
    }

    /// Endpoints with negative coordinates wrapped against the canvas size.
    pub fn resolved_points(&self, width: u32, height: u32) -> (i32, i32, i32, i32) {
        let wrap = |v: i32, extent: u32| {
            if v < 0 {
                v.saturating_add(i32::try_from(extent).unwrap_or(i32::MAX))
            } else {
                v
            }
        };
        (
            wrap(self.x1, width),
            wrap(self.y1, height),
            wrap(self.x2, width),
            wrap(self.y2, height),
        )
    }

    pub fn draw(&self, canvas: &mut Surface) {
        debug!(
            target: "easel::draw",
            "Line: draw from: {},{} to: {},{}",
            self.x1, self.y1, self.x2, self.y2
        );

        let (x1, y1, x2, y2) = self.resolved_points(canvas.width(), canvas.height());

        let mut lock = canvas.lock();
        if x1 > x2 {
            draw_line(&mut lock, self.colour, x2, y2, x1, y1);
        } else {
            draw_line(&mut lock, self.colour, x1, y1, x2, y2);
        }
    }
}
