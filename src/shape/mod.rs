//! # Shapes
//!
//! Drawable primitives built from configuration entries. Each shape lives
//! in its own module; [`Shape`] is the closed set the canvas draws.
//!
//! ## Adding a New Shape
//!
//! 1. Create `src/shape/myshape.rs` with `from_attributes` and `draw`
//! 2. Add `pub mod myshape;` below
//! 3. Add a variant to [`Shape`] and its tag to [`SHAPES`]

pub mod image;
pub mod line;
pub mod rectangle;
pub mod text;

use log::{debug, error};

use crate::config::ShapeEntry;
use crate::error::CanvasError;
use crate::resources::ImageLoader;
use crate::surface::Surface;
use crate::variables::VariableContext;

pub use image::Image;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

/// All shape tags, in documentation order.
pub const SHAPES: &[&str] = &["line", "rectangle", "image", "text"];

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Image(Image),
    Text(Text),
}

impl Shape {
    /// Build a shape from a tagged configuration entry.
    ///
    /// An optional `debug` attribute is logged and otherwise ignored.
    pub fn from_entry(entry: &ShapeEntry, loader: &dyn ImageLoader) -> Result<Self, CanvasError> {
        let cfg = &entry.attributes;

        let shape = match entry.tag.as_str() {
            "line" => Shape::Line(Line::from_attributes(cfg)),
            "rectangle" => Shape::Rectangle(Rectangle::from_attributes(cfg)),
            "image" => Shape::Image(Image::from_attributes(cfg, loader)?),
            "text" => Shape::Text(Text::from_attributes(cfg)),
            other => {
                error!(target: "easel::parse", "Canvas: found a non-existing shape '{}'", other);
                return Err(CanvasError::UnknownShape(other.to_string()));
            }
        };

        debug!(target: "easel::parse", "Canvas: found shape of the type {}", entry.tag);
        let message = cfg.get("debug");
        if !message.is_empty() {
            debug!(target: "easel::parse", "{}: {}", shape.name(), message);
        }

        Ok(shape)
    }

    /// The configuration tag of this shape.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Line(_) => "line",
            Shape::Rectangle(_) => "rectangle",
            Shape::Image(_) => "image",
            Shape::Text(_) => "text",
        }
    }

    /// Draw onto `canvas`, evaluating formulas against `variables`.
    pub fn draw(&mut self, canvas: &mut Surface, variables: &VariableContext) -> Result<(), CanvasError> {
        match self {
            Shape::Line(line) => line.draw(canvas),
            Shape::Rectangle(rect) => rect.draw(canvas, variables)?,
            Shape::Image(image) => image.draw(canvas),
            Shape::Text(text) => text.draw(canvas, variables)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::MemoryImages;

    #[test]
    fn test_from_entry_dispatch() {
        let loader = MemoryImages::new().with("dot", Surface::new(1, 1));
        for tag in SHAPES {
            let entry = ShapeEntry::new(*tag).attr("name", "dot").attr("debug", "hello");
            let shape = Shape::from_entry(&entry, &loader).unwrap();
            assert_eq!(shape.name(), *tag);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let entry = ShapeEntry::new("circle");
        let err = Shape::from_entry(&entry, &MemoryImages::new()).unwrap_err();
        assert!(matches!(err, CanvasError::UnknownShape(ref t) if t == "circle"));
        assert_eq!(err.to_string(), "Unknown shape type: circle");
    }

    #[test]
    fn test_draw_formula_error() {
        let entry = ShapeEntry::new("text").attr("text", "(nope(1))").attr("font_size", 12);
        let mut shape = Shape::from_entry(&entry, &MemoryImages::new()).unwrap();
        let mut s = Surface::new(4, 4);
        let err = shape.draw(&mut s, &VariableContext::new()).unwrap_err();
        assert!(matches!(err, CanvasError::Formula(_)));
    }
}
