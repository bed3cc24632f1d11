//! Image resolution: turns image identifiers from configuration into
//! surfaces.
//!
//! Shapes only see the [`ImageLoader`] trait, so the canvas stays unaware of
//! where images come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::CanvasError;
use crate::surface::Surface;

/// Resolves an image identifier to a decoded surface.
pub trait ImageLoader {
    fn load(&self, name: &str) -> Result<Surface, CanvasError>;
}

/// Loads image files relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryImages {
    root: PathBuf,
}

impl DirectoryImages {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for DirectoryImages {
    /// Resolve names against the working directory.
    fn default() -> Self {
        Self::new(".")
    }
}

impl ImageLoader for DirectoryImages {
    fn load(&self, name: &str) -> Result<Surface, CanvasError> {
        if name.is_empty() {
            return Err(CanvasError::Image("empty image name".to_string()));
        }
        let path = self.root.join(name);
        debug!(target: "easel::parse", "Image: loading {}", path.display());

        let image = image::open(&path)
            .map_err(|e| CanvasError::Image(format!("Failed to load {}: {}", path.display(), e)))?;

        Ok(Surface::from_rgba_image(&image.to_rgba8()))
    }
}

/// Serves surfaces registered up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    images: HashMap<String, Surface>,
}

impl MemoryImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, surface: Surface) {
        self.images.insert(name.into(), surface);
    }

    /// Builder form of [`MemoryImages::insert`].
    pub fn with(mut self, name: impl Into<String>, surface: Surface) -> Self {
        self.insert(name, surface);
        self
    }
}

impl ImageLoader for MemoryImages {
    fn load(&self, name: &str) -> Result<Surface, CanvasError> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| CanvasError::Image(format!("No image named '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_directory_loads_png() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 255, 255]));
        img.save(dir.path().join("blue.png")).unwrap();

        let loader = DirectoryImages::new(dir.path());
        let surface = loader.load("blue.png").unwrap();
        assert_eq!((surface.width(), surface.height()), (3, 2));
        assert_eq!(surface.pixel(2, 1), Some(0xFF00_00FF));
    }

    #[test]
    fn test_directory_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirectoryImages::new(dir.path());
        assert!(matches!(loader.load("nope.png"), Err(CanvasError::Image(_))));
        assert!(matches!(loader.load(""), Err(CanvasError::Image(_))));
    }

    #[test]
    fn test_memory_images() {
        let loader = MemoryImages::new().with("dot", Surface::new(1, 1));
        assert_eq!(loader.load("dot").unwrap().width(), 1);
        assert!(loader.load("other").is_err());
    }
}
