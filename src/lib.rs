//! # Easel - Declarative Shape Canvas
//!
//! Easel renders a list of declarative shapes onto an in-memory 32-bit pixel
//! surface. It provides:
//!
//! - **Shapes**: lines, rectangles, images and bitmap text
//! - **Formulas**: geometry computed from runtime variables such as the
//!   canvas size
//! - **Caching**: a canvas only repaints after it changed
//! - **Export**: PNG encoding of the drawn surface
//!
//! ## Quick Start
//!
//! ```
//! use easel::{Canvas, Color};
//! use easel::config::{CanvasConfig, ShapeEntry};
//! use easel::resources::MemoryImages;
//!
//! let config = CanvasConfig::new()
//!     .with(ShapeEntry::new("rectangle")
//!         .attr("x", 0)
//!         .attr("y", 0)
//!         .attr("w", "(width)")
//!         .attr("h", "(height)")
//!         .attr("border_thickness", 1)
//!         .attr("border_colour", "255 255 255 255"))
//!     .with(ShapeEntry::new("line")
//!         .attr("x1", 1)
//!         .attr("y1", -2)
//!         .attr("x2", -2)
//!         .attr("y2", -2)
//!         .attr("colour", "255 0 0 255"));
//!
//! let mut canvas = Canvas::with_loader(MemoryImages::new());
//! canvas.set_width(32);
//! canvas.set_height(16);
//! canvas.parse(&config)?;
//! canvas.draw(false)?;
//!
//! let surface = canvas.surface();
//! assert_eq!(surface.rgba_at(31, 15), Some(Color::from_rgba(255, 255, 255, 255)));
//! assert_eq!(surface.rgba_at(30, 14), Some(Color::from_rgba(255, 0, 0, 255)));
//!
//! let png = surface.to_png()?;
//! assert!(!png.is_empty());
//! # Ok::<(), easel::CanvasError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canvas`] | Shape list, dirty tracking and drawing |
//! | [`shape`] | Line, rectangle, image and text primitives |
//! | [`config`] | Configuration entries and JSON documents |
//! | [`formula`] | Expression language for computed geometry |
//! | [`dynamic`] | Literal-or-formula attribute values |
//! | [`surface`] | 32-bit pixel buffers |
//! | [`raster`] | Pixel plotting and line scan conversion |
//! | [`font`] | Bitmap text rendering |
//! | [`resources`] | Image loading |
//! | [`color`] | Textual color decoding |
//! | [`variables`] | Runtime values and bindings |
//! | [`error`] | Error types |

pub mod canvas;
pub mod color;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod font;
pub mod formula;
pub mod raster;
pub mod resources;
pub mod shape;
pub mod surface;
pub mod variables;

// Re-exports for convenience
pub use canvas::Canvas;
pub use color::Color;
pub use error::CanvasError;
pub use surface::Surface;
