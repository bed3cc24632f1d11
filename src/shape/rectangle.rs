//! The `rectangle` shape.

use log::debug;

use crate::color::{self, Color};
use crate::config::Attributes;
use crate::dynamic::{DynamicValue, parse_unsigned};
use crate::formula::FormulaError;
use crate::raster::draw_line;
use crate::surface::{Surface, SurfaceLock};
use crate::variables::VariableContext;

/// An outlined and/or filled rectangle.
///
/// Position and size may be formulas, re-evaluated on every draw. Unlike
/// lines, rectangles do not wrap negative coordinates.
///
/// ```text
/// [rectangle]
///     x, y = (int = 0), (int = 0)      top left corner
///     w, h = (int = 0), (int = 0)      size
///     border_thickness = (uint = 0)    border width, 0 draws none
///     border_colour = (colour = "")    empty means no border
///     fill_colour = (colour = "")      empty means no fill
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub x: DynamicValue,
    pub y: DynamicValue,
    pub w: DynamicValue,
    pub h: DynamicValue,
    border_thickness: u32,
    pub border_colour: Color,
    pub fill_colour: Color,
}

impl Rectangle {
    pub fn new(
        x: DynamicValue,
        y: DynamicValue,
        w: DynamicValue,
        h: DynamicValue,
        border_thickness: u32,
        border_colour: Color,
        fill_colour: Color,
    ) -> Self {
        // a border without a colour is not drawn at all
        let border_thickness = if border_colour.is_none() { 0 } else { border_thickness };
        Self {
            x,
            y,
            w,
            h,
            border_thickness,
            border_colour,
            fill_colour,
        }
    }

    pub fn from_attributes(cfg: &Attributes) -> Self {
        Self::new(
            DynamicValue::from_text(cfg.get("x"), 0),
            DynamicValue::from_text(cfg.get("y"), 0),
            DynamicValue::from_text(cfg.get("w"), 0),
            DynamicValue::from_text(cfg.get("h"), 0),
            parse_unsigned(cfg.get("border_thickness")) as u32,
            color::decode(cfg.get("border_colour")),
            color::decode(cfg.get("fill_colour")),
        )
    }

    /// Effective border thickness.
    pub fn border_thickness(&self) -> u32 {
        self.border_thickness
    }

    /// Evaluate any pending formulas for the geometry.
    pub fn update(&mut self, variables: &VariableContext) -> Result<(), FormulaError> {
        self.y.evaluate(variables)?;
        self.x.evaluate(variables)?;
        self.w.evaluate(variables)?;
        self.h.evaluate(variables)?;
        Ok(())
    }

    pub fn draw(&mut self, canvas: &mut Surface, variables: &VariableContext) -> Result<(), FormulaError> {
        self.update(variables)?;

        let x = self.x.value() as i64;
        let y = self.y.value() as i64;
        let w = self.w.value() as i64;
        let h = self.h.value() as i64;

        debug!(
            target: "easel::draw",
            "Rectangle: draw from: {},{} width: {} height: {}",
            x, y, w, h
        );

        let canvas_height = canvas.height() as i64;
        let mut lock = canvas.lock();

        for i in 0..self.border_thickness as i64 {
            let left = x + i;
            let right = left + w - i * 2 - 1;
            let top = y + i;
            let bottom = top + h - i * 2 - 1;

            let (left, right, top, bottom) = (coord(left), coord(right), coord(top), coord(bottom));

            // top
            span(&mut lock, self.border_colour, left, right, top);
            // right
            draw_line(&mut lock, self.border_colour, right, top, right, bottom);
            // bottom
            span(&mut lock, self.border_colour, left, right, bottom);
            // left
            draw_line(&mut lock, self.border_colour, left, top, left, bottom);
        }

        // Opaque scanline fill, no alpha blending.
        if !self.fill_colour.is_none() {
            let bt = self.border_thickness as i64;
            let left = x + bt;
            let right = left + w - 2 * bt - 1;
            let top = y + bt;
            let bottom = top + h - 2 * bt;

            if right >= left {
                for row in top.max(0)..bottom.min(canvas_height) {
                    span(&mut lock, self.fill_colour, coord(left), coord(right), coord(row));
                }
            }
        }

        Ok(())
    }
}

/// Horizontal run from `left` to `right` inclusive; nothing when `right < left`.
fn span(lock: &mut SurfaceLock<'_>, colour: Color, left: i32, right: i32, y: i32) {
    if right >= left {
        draw_line(lock, colour, left, y, right, y);
    }
}

/// Narrow an intermediate coordinate to pixel space.
fn coord(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeEntry;

    const WHITE: Color = Color::from_rgba(255, 255, 255, 255);
    const BLUE: Color = Color::from_rgba(0, 0, 255, 255);

    fn rect(x: i32, y: i32, w: i32, h: i32, bt: u32, border: Color, fill: Color) -> Rectangle {
        Rectangle::new(
            DynamicValue::Resolved(x),
            DynamicValue::Resolved(y),
            DynamicValue::Resolved(w),
            DynamicValue::Resolved(h),
            bt,
            border,
            fill,
        )
    }

    fn render(r: &mut Rectangle, w: u32, h: u32) -> Surface {
        let mut s = Surface::new(w, h);
        r.draw(&mut s, &VariableContext::new()).unwrap();
        s
    }

    #[test]
    fn test_no_border_colour_disables_border() {
        let entry = ShapeEntry::new("rectangle").attr("border_thickness", 5).attr("w", 4).attr("h", 4);
        let r = Rectangle::from_attributes(&entry.attributes);
        assert_eq!(r.border_thickness(), 0);

        let mut r = r;
        let s = render(&mut r, 8, 8);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_border_outline() {
        let mut r = rect(1, 1, 4, 3, 1, WHITE, Color::NONE);
        let s = render(&mut r, 6, 5);
        let expected = [
            "......", //
            ".####.", //
            ".#..#.", //
            ".####.", //
            "......",
        ];
        assert_eq!(ascii(&s), expected.join("\n"));
    }

    #[test]
    fn test_thick_border_and_fill() {
        let mut r = rect(0, 0, 6, 6, 2, WHITE, BLUE);
        let s = render(&mut r, 6, 6);
        let expected = [
            "######", //
            "######", //
            "##oo##", //
            "##oo##", //
            "######", //
            "######",
        ];
        assert_eq!(ascii(&s), expected.join("\n"));
    }

    #[test]
    fn test_fill_without_border() {
        let mut r = rect(1, 0, 3, 2, 0, Color::NONE, BLUE);
        let s = render(&mut r, 5, 3);
        let expected = [
            ".ooo.", //
            ".ooo.", //
            ".....",
        ];
        assert_eq!(ascii(&s), expected.join("\n"));
    }

    #[test]
    fn test_formulas_evaluated_each_draw() {
        let entry = ShapeEntry::new("rectangle")
            .attr("x", "(width - 3)")
            .attr("y", 0)
            .attr("w", 2)
            .attr("h", "(height)")
            .attr("fill_colour", "0 0 255 255");
        let mut r = Rectangle::from_attributes(&entry.attributes);

        let mut vars = VariableContext::new();
        vars.add("width", 10);
        vars.add("height", 4);
        let mut s = Surface::new(10, 4);
        r.draw(&mut s, &vars).unwrap();
        assert_eq!(r.x.value(), 7);
        assert_eq!(s.rgba_at(7, 3), Some(BLUE));
        assert_eq!(s.rgba_at(8, 0), Some(BLUE));

        vars.add("width", 6);
        let mut s = Surface::new(6, 4);
        r.draw(&mut s, &vars).unwrap();
        assert_eq!(r.x.value(), 3);
        assert_eq!(s.rgba_at(3, 0), Some(BLUE));
        assert_eq!(s.rgba_at(5, 0), Some(Color::NONE));
    }

    #[test]
    fn test_formula_error_propagates() {
        let entry = ShapeEntry::new("rectangle").attr("w", "(1 / 0)");
        let mut r = Rectangle::from_attributes(&entry.attributes);
        let mut s = Surface::new(2, 2);
        assert_eq!(r.draw(&mut s, &VariableContext::new()), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn test_no_wraparound() {
        // a negative literal does not parse as unsigned and reads as 0
        let entry = ShapeEntry::new("rectangle")
            .attr("x", -5)
            .attr("w", 1)
            .attr("h", 1)
            .attr("fill_colour", "0 0 255 255");
        let mut r = Rectangle::from_attributes(&entry.attributes);
        let s = render(&mut r, 20, 1);
        assert_eq!(s.rgba_at(0, 0), Some(BLUE));
        assert_eq!(s.rgba_at(15, 0), Some(Color::NONE));

        // a negative formula result stays off the surface
        let entry = ShapeEntry::new("rectangle")
            .attr("x", "(0 - 5)")
            .attr("w", 3)
            .attr("h", 1)
            .attr("fill_colour", "0 0 255 255");
        let mut r = Rectangle::from_attributes(&entry.attributes);
        let s = render(&mut r, 20, 1);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_degenerate_width_paints_nothing() {
        let mut r = rect(2, 0, 0, 2, 0, Color::NONE, BLUE);
        let s = render(&mut r, 5, 2);
        assert!(s.pixels().iter().all(|&b| b == 0));

        let entry = ShapeEntry::new("rectangle")
            .attr("x", 6)
            .attr("w", "(0 - 4)")
            .attr("h", 1)
            .attr("fill_colour", "0 0 255 255");
        let mut r = Rectangle::from_attributes(&entry.attributes);
        let s = render(&mut r, 10, 1);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_formula_width_below_zero() {
        let entry = ShapeEntry::new("rectangle")
            .attr("x", 1)
            .attr("w", "(width - 50)")
            .attr("h", 2)
            .attr("fill_colour", "0 0 255 255");
        let mut r = Rectangle::from_attributes(&entry.attributes);
        let mut vars = VariableContext::new();
        vars.add("width", 8);
        let mut s = Surface::new(8, 2);
        r.draw(&mut s, &vars).unwrap();
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_huge_height_fill_stays_on_surface() {
        let mut r = rect(0, -1_000_000_000, 2, i32::MAX, 0, Color::NONE, BLUE);
        let s = render(&mut r, 2, 2);
        assert_eq!(s.rgba_at(1, 1), Some(BLUE));
        assert_eq!(s.rgba_at(0, 0), Some(BLUE));
    }

    fn ascii(s: &Surface) -> String {
        (0..s.height() as i32)
            .map(|y| {
                (0..s.width() as i32)
                    .map(|x| match s.rgba_at(x, y) {
                        Some(c) if c == WHITE => '#',
                        Some(c) if c == BLUE => 'o',
                        _ => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
