//! # Canvas
//!
//! A [`Canvas`] owns an ordered list of shapes, the surface they are drawn
//! onto, and the variables their formulas see.
//!
//! ```
//! use easel::{Canvas, Color};
//! use easel::config::{CanvasConfig, ShapeEntry};
//!
//! let config = CanvasConfig::new()
//!     .with(ShapeEntry::new("line").attr("x1", 0).attr("x2", -1).attr("colour", "255 0 0 255"));
//!
//! let mut canvas = Canvas::new();
//! canvas.set_width(10);
//! canvas.set_height(2);
//! canvas.parse(&config)?;
//! assert!(canvas.draw(false)?);
//!
//! assert_eq!(canvas.surface().rgba_at(9, 0), Some(Color::from_rgba(255, 0, 0, 255)));
//! // nothing changed, nothing to do
//! assert!(!canvas.draw(false)?);
//! # Ok::<(), easel::CanvasError>(())
//! ```
//!
//! Drawing is cached: [`Canvas::draw`] only repaints when the canvas is
//! dirty (after construction, a parse or a size change) or when forced.

use log::debug;

use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::resources::{DirectoryImages, ImageLoader};
use crate::shape::Shape;
use crate::surface::Surface;
use crate::variables::{Variant, VariableContext};

pub struct Canvas {
    shapes: Vec<Shape>,
    canvas: Surface,
    variables: VariableContext,
    loader: Box<dyn ImageLoader>,
    width: u32,
    height: u32,
    dirty: bool,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("shapes", &self.shapes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// An empty canvas resolving images against the working directory.
    pub fn new() -> Self {
        Self::with_loader(DirectoryImages::default())
    }

    pub fn with_loader(loader: impl ImageLoader + 'static) -> Self {
        Self {
            shapes: Vec::new(),
            canvas: Surface::default(),
            variables: VariableContext::new(),
            loader: Box::new(loader),
            width: 0,
            height: 0,
            dirty: true,
        }
    }

    /// A canvas with `cfg` already parsed.
    pub fn from_config(cfg: &CanvasConfig) -> Result<Self, CanvasError> {
        let mut canvas = Self::new();
        canvas.parse(cfg)?;
        Ok(canvas)
    }

    /// Replace all shapes with those described by `cfg`.
    ///
    /// On an unknown tag or a failed image load the canvas keeps no shapes.
    pub fn parse(&mut self, cfg: &CanvasConfig) -> Result<(), CanvasError> {
        debug!(target: "easel::parse", "Canvas: parsing config.");
        self.shapes.clear();
        self.dirty = true;

        let mut shapes = Vec::with_capacity(cfg.len());
        for entry in cfg.entries() {
            shapes.push(Shape::from_entry(entry, self.loader.as_ref())?);
        }
        self.shapes = shapes;
        Ok(())
    }

    /// Repaint if dirty or `force`d. Returns whether a repaint happened.
    ///
    /// A failing formula aborts the draw and leaves the canvas dirty.
    pub fn draw(&mut self, force: bool) -> Result<bool, CanvasError> {
        debug!(target: "easel::draw", "Canvas: drawing.");
        if !self.dirty && !force {
            debug!(target: "easel::draw", "Canvas: nothing to draw.");
            return Ok(false);
        }

        if self.dirty {
            self.variables.add("width", self.width);
            self.variables.add("height", self.height);
        }

        debug!(
            target: "easel::draw",
            "Canvas: create new empty canvas {}x{}",
            self.width, self.height
        );
        self.canvas = Surface::new(self.width, self.height);

        for shape in &mut self.shapes {
            shape.draw(&mut self.canvas, &self.variables)?;
        }

        self.dirty = false;
        Ok(true)
    }

    /// Parse `cfg` and draw it immediately.
    pub fn draw_config(&mut self, cfg: &CanvasConfig) -> Result<(), CanvasError> {
        self.parse(cfg)?;
        self.draw(true)?;
        Ok(())
    }

    pub fn set_width(&mut self, width: u32) {
        if self.width != width {
            self.width = width;
            self.dirty = true;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_height(&mut self, height: u32) {
        if self.height != height {
            self.height = height;
            self.dirty = true;
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bind a variable for formulas. Takes effect on the next draw; it does
    /// not mark the canvas dirty.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Variant>) {
        self.variables.add(name, value);
    }

    pub fn variables(&self) -> &VariableContext {
        &self.variables
    }

    /// The most recently drawn surface.
    pub fn surface(&self) -> &Surface {
        &self.canvas
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
