//! The `image` shape.

use log::debug;

use crate::config::Attributes;
use crate::dynamic::parse_unsigned;
use crate::error::CanvasError;
use crate::resources::ImageLoader;
use crate::surface::{Rect, Surface};

/// A pre-loaded image drawn unscaled.
///
/// ```text
/// [image]
///     name = (string = "")            image identifier
///     x, y = (uint = 0), (uint = 0)   destination of the top left corner
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub x: u32,
    pub y: u32,
    image: Surface,
    src_clip: Rect,
}

impl Image {
    pub fn new(name: impl Into<String>, image: Surface, x: u32, y: u32) -> Self {
        let src_clip = image.bounds();
        Self {
            name: name.into(),
            x,
            y,
            image,
            src_clip,
        }
    }

    /// Build from configuration, loading the image eagerly.
    pub fn from_attributes(cfg: &Attributes, loader: &dyn ImageLoader) -> Result<Self, CanvasError> {
        let name = cfg.get("name");
        let image = loader.load(name)?;
        Ok(Self::new(
            name,
            image,
            parse_unsigned(cfg.get("x")) as u32,
            parse_unsigned(cfg.get("y")) as u32,
        ))
    }

    pub fn image(&self) -> &Surface {
        &self.image
    }

    /// Region of the source image that is drawn.
    pub fn src_clip(&self) -> Rect {
        self.src_clip
    }

    pub fn draw(&self, canvas: &mut Surface) {
        debug!(
            target: "easel::draw",
            "Image: draw '{}' at {},{} size {}x{}",
            self.name,
            self.x,
            self.y,
            self.src_clip.w,
            self.src_clip.h
        );

        canvas.blit(&self.image, self.src_clip, self.x as i32, self.y as i32, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::ShapeEntry;
    use crate::resources::MemoryImages;

    const RED: Color = Color::from_rgba(255, 0, 0, 255);

    fn solid(w: u32, h: u32, color: Color) -> Surface {
        let mut s = Surface::new(w, h);
        {
            let pixel = Surface::map_rgba(color);
            let mut lock = s.lock();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    lock.put_pixel(x, y, pixel);
                }
            }
        }
        s
    }

    #[test]
    fn test_loads_eagerly() {
        let loader = MemoryImages::new().with("logo", solid(2, 3, RED));
        let entry = ShapeEntry::new("image").attr("name", "logo").attr("x", 4);
        let image = Image::from_attributes(&entry.attributes, &loader).unwrap();
        assert_eq!(image.name, "logo");
        assert_eq!((image.x, image.y), (4, 0));
        assert_eq!(image.src_clip(), Rect::new(0, 0, 2, 3));
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let entry = ShapeEntry::new("image").attr("name", "absent");
        let result = Image::from_attributes(&entry.attributes, &MemoryImages::new());
        assert!(matches!(result, Err(CanvasError::Image(_))));
    }

    #[test]
    fn test_draw_at_position_clipped_to_surface() {
        let image = Image::new("logo", solid(3, 3, RED), 2, 1);
        let mut s = Surface::new(4, 4);
        image.draw(&mut s);

        assert_eq!(s.rgba_at(2, 1), Some(RED));
        assert_eq!(s.rgba_at(3, 3), Some(RED));
        assert_eq!(s.rgba_at(1, 1), Some(Color::NONE));
        assert_eq!(s.rgba_at(2, 0), Some(Color::NONE));
    }

    #[test]
    fn test_transparent_pixels_keep_background() {
        let mut img = solid(2, 1, RED);
        img.lock().put_pixel(1, 0, 0);

        let mut s = solid(2, 1, Color::from_rgba(0, 0, 255, 255));
        Image::new("half", img, 0, 0).draw(&mut s);
        assert_eq!(s.rgba_at(0, 0), Some(RED));
        assert_eq!(s.rgba_at(1, 0), Some(Color::from_rgba(0, 0, 255, 255)));
    }
}
