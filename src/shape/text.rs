//! The `text` shape.

use log::{debug, warn};

use crate::color::{self, Color};
use crate::config::Attributes;
use crate::dynamic::parse_unsigned;
use crate::font::render_text;
use crate::formula::{Formula, FormulaError};
use crate::surface::{Rect, Surface};
use crate::variables::VariableContext;

/// A text string centered in a bounding box.
///
/// Text that does not fit is not scaled; it is placed at the box edge and
/// clipped to the box. A `text` value in parentheses is a formula whose
/// result is rendered, e.g. `"('Version ' + revision)"`. Text that starts
/// with `(` but is not a valid formula, such as `"(c) 2008"`, is drawn as
/// written.
///
/// ```text
/// [text]
///     x, y = (uint = 0), (uint = 0)   top left of the bounding box
///     w, h = (uint = 0), (uint = 0)   size of the bounding box
///     font_size = (uint = 0)          pixel height of the glyphs
///     colour = (colour = "")          text colour
///     text = (string = "")            the text, or a formula
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub font_size: u32,
    pub colour: Color,
    pub text: String,
}

impl Text {
    pub fn from_attributes(cfg: &Attributes) -> Self {
        Self {
            x: parse_unsigned(cfg.get("x")) as u32,
            y: parse_unsigned(cfg.get("y")) as u32,
            w: parse_unsigned(cfg.get("w")) as u32,
            h: parse_unsigned(cfg.get("h")) as u32,
            font_size: parse_unsigned(cfg.get("font_size")) as u32,
            colour: color::decode(cfg.get("colour")),
            text: cfg.get("text").to_string(),
        }
    }

    /// The string to render, evaluating the formula form.
    pub fn content(&self, variables: &VariableContext) -> Result<String, FormulaError> {
        if self.text.starts_with('(')
            && let Ok(formula) = Formula::parse(&self.text)
        {
            return Ok(formula.execute(variables)?.as_string());
        }
        Ok(self.text.clone())
    }

    /// Offset that centers `inner` within `outer`, or 0 when it does not fit.
    fn center_offset(inner: u32, outer: u32) -> u32 {
        if inner >= outer { 0 } else { (outer - inner) / 2 }
    }

    pub fn draw(&self, canvas: &mut Surface, variables: &VariableContext) -> Result<(), FormulaError> {
        let content = self.content(variables)?;

        debug!(
            target: "easel::draw",
            "Text: draw at {},{} text '{}'",
            self.x, self.y, content
        );

        let surf = render_text(&content, self.font_size, self.colour);
        if surf.width() == 0 || surf.height() == 0 {
            return Ok(());
        }

        if surf.width() > self.w {
            warn!(target: "easel::draw", "Text: text is too wide for the canvas and will be clipped.");
        }
        if surf.height() > self.h {
            warn!(target: "easel::draw", "Text: text is too high for the canvas and will be clipped.");
        }

        let x_off = Self::center_offset(surf.width(), self.w);
        let y_off = Self::center_offset(surf.height(), self.h);

        let bounds = Rect::new(self.x as i32, self.y as i32, self.w, self.h);
        canvas.blit(
            &surf,
            surf.bounds(),
            (self.x + x_off) as i32,
            (self.y + y_off) as i32,
            Some(bounds),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeEntry;
    use crate::font::measure_text;

    const WHITE: Color = Color::from_rgba(255, 255, 255, 255);

    fn text(x: u32, y: u32, w: u32, h: u32, size: u32, s: &str) -> Text {
        let entry = ShapeEntry::new("text")
            .attr("x", x)
            .attr("y", y)
            .attr("w", w)
            .attr("h", h)
            .attr("font_size", size)
            .attr("colour", "255 255 255 255")
            .attr("text", s);
        Text::from_attributes(&entry.attributes)
    }

    /// Bounding box of painted pixels: (min_x, min_y, max_x, max_y).
    fn painted_bounds(s: &Surface) -> Option<(i32, i32, i32, i32)> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for y in 0..s.height() as i32 {
            for x in 0..s.width() as i32 {
                if s.pixel(x, y) != Some(0) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((a, b, c, d)) => (a.min(x), b.min(y), c.max(x), d.max(y)),
                    });
                }
            }
        }
        bounds
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(Text::center_offset(10, 30), 10);
        assert_eq!(Text::center_offset(10, 15), 2);
        assert_eq!(Text::center_offset(30, 10), 0);
        assert_eq!(Text::center_offset(10, 10), 0);
    }

    #[test]
    fn test_centered_in_box() {
        // "X" at 12px is one 6x12 cell
        let t = text(10, 20, 26, 32, 12, "X");
        let mut s = Surface::new(60, 60);
        t.draw(&mut s, &VariableContext::new()).unwrap();

        let (min_x, min_y, max_x, max_y) = painted_bounds(&s).unwrap();
        // cell placed at (10 + 10, 20 + 10)
        assert!(min_x >= 20 && max_x < 26, "x range {}..={}", min_x, max_x);
        assert!(min_y >= 30 && max_y < 42, "y range {}..={}", min_y, max_y);
        assert_eq!(s.rgba_at(min_x, min_y).map(|c| c.a()), Some(255));
    }

    #[test]
    fn test_overflow_clipped_to_box() {
        let t = text(2, 2, 12, 12, 24, "WWWW");
        assert!(measure_text("WWWW", 24).0 > 12);
        let mut s = Surface::new(40, 40);
        t.draw(&mut s, &VariableContext::new()).unwrap();

        let (min_x, min_y, max_x, max_y) = painted_bounds(&s).unwrap();
        assert!(min_x >= 2 && min_y >= 2);
        assert!(max_x < 14 && max_y < 14, "painted up to {},{}", max_x, max_y);
    }

    #[test]
    fn test_formula_text() {
        let mut vars = VariableContext::new();
        vars.add("revision", "1.2");
        let t = text(0, 0, 100, 20, 12, "('Version ' + revision)");
        assert_eq!(t.content(&vars).unwrap(), "Version 1.2");

        let literal = text(0, 0, 100, 20, 12, "plain (not a formula)");
        assert_eq!(literal.content(&vars).unwrap(), "plain (not a formula)");
    }

    #[test]
    fn test_unparsable_parenthesized_text_is_literal() {
        let vars = VariableContext::new();
        let t = text(0, 0, 100, 20, 12, "(c) 2008");
        assert_eq!(t.content(&vars).unwrap(), "(c) 2008");

        let mut s = Surface::new(100, 20);
        t.draw(&mut s, &vars).unwrap();
        assert!(painted_bounds(&s).is_some());

        // a well-formed formula still reports runtime errors
        let t = text(0, 0, 100, 20, 12, "(1 / 0)");
        assert_eq!(t.content(&vars), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let t = text(0, 0, 10, 10, 12, "");
        let mut s = Surface::new(10, 10);
        t.draw(&mut s, &VariableContext::new()).unwrap();
        assert!(s.pixels().iter().all(|&b| b == 0));

        let t = text(0, 0, 10, 10, 0, "abc");
        t.draw(&mut s, &VariableContext::new()).unwrap();
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_colour_ignores_alpha() {
        let entry = ShapeEntry::new("text")
            .attr("w", 12)
            .attr("h", 12)
            .attr("font_size", 12)
            .attr("colour", "255 255 255")
            .attr("text", "H");
        let t = Text::from_attributes(&entry.attributes);
        let mut s = Surface::new(12, 12);
        t.draw(&mut s, &VariableContext::new()).unwrap();
        let (x, y, _, _) = painted_bounds(&s).unwrap();
        assert_eq!(s.rgba_at(x, y), Some(WHITE));
    }
}
