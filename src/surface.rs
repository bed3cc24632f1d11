//! # Pixel Surfaces
//!
//! A [`Surface`] is a row-major buffer of 32-bit pixels, 4 bytes each, stored
//! as little-endian words in a fixed format:
//!
//! ```text
//! bits:  31..24  23..16  15..8   7..0
//!          A       R       G      B        masks: A 0xFF000000  R 0x00FF0000
//!                                                 G 0x0000FF00  B 0x000000FF
//! ```
//!
//! Pixel `(x, y)` starts at byte `y * width * 4 + x * 4`.
//!
//! Direct pixel writes go through a [`SurfaceLock`], a scoped guard borrowed
//! from the surface; it is released when dropped, on every exit path.

use image::{ImageEncoder, Rgba, RgbaImage};
use log::trace;

use crate::color::Color;
use crate::error::CanvasError;

pub const RMASK: u32 = 0x00FF_0000;
pub const GMASK: u32 = 0x0000_FF00;
pub const BMASK: u32 = 0x0000_00FF;
pub const AMASK: u32 = 0xFF00_0000;

/// Bytes per pixel.
pub const BPP: usize = 4;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    /// Overlap of two rectangles, `None` when they do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = (self.x as i64).max(other.x as i64);
        let top = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as i32,
            y: top as i32,
            w: (right - left) as u32,
            h: (bottom - top) as u32,
        })
    }
}

/// An owned 32-bit pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.pixels.len())
            .finish()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Surface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * BPP],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * BPP
    }

    /// Raw pixel bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Convert an RGBA color to this surface's native pixel value.
    #[inline]
    pub fn map_rgba(color: Color) -> u32 {
        ((color.a() as u32) << 24) | ((color.r() as u32) << 16) | ((color.g() as u32) << 8) | color.b() as u32
    }

    /// Convert a native pixel value back to an RGBA color.
    #[inline]
    pub fn unmap(pixel: u32) -> Color {
        Color::from_rgba(
            ((pixel & RMASK) >> 16) as u8,
            ((pixel & GMASK) >> 8) as u8,
            (pixel & BMASK) as u8,
            ((pixel & AMASK) >> 24) as u8,
        )
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.pitch() + x as usize * BPP)
    }

    /// Native pixel at `(x, y)`, `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let at = self.offset(x, y)?;
        let bytes: [u8; 4] = self.pixels[at..at + BPP].try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }

    /// RGBA color at `(x, y)`, `None` outside the surface.
    pub fn rgba_at(&self, x: i32, y: i32) -> Option<Color> {
        self.pixel(x, y).map(Self::unmap)
    }

    fn write(&mut self, x: i32, y: i32, pixel: u32) -> bool {
        match self.offset(x, y) {
            Some(at) => {
                self.pixels[at..at + BPP].copy_from_slice(&pixel.to_le_bytes());
                true
            }
            None => false,
        }
    }

    /// Acquire direct pixel access for the lifetime of the guard.
    pub fn lock(&mut self) -> SurfaceLock<'_> {
        trace!(target: "easel::draw", "Surface: lock {}x{}", self.width, self.height);
        SurfaceLock { surface: self }
    }

    /// Composite `src_rect` of `src` onto this surface with its top-left
    /// corner at `(dst_x, dst_y)`.
    ///
    /// Source pixels are blended "source over" using their alpha. Output is
    /// clipped to this surface and, if given, to `clip`.
    pub fn blit(&mut self, src: &Surface, src_rect: Rect, dst_x: i32, dst_y: i32, clip: Option<Rect>) {
        let Some(src_rect) = src_rect.intersect(&src.bounds()) else {
            return;
        };

        let mut target = Rect::new(dst_x, dst_y, src_rect.w, src_rect.h);
        let Some(visible) = target.intersect(&self.bounds()) else {
            return;
        };
        target = visible;
        if let Some(clip) = clip {
            match target.intersect(&clip) {
                Some(r) => target = r,
                None => return,
            }
        }

        for ty in target.y..target.y + target.h as i32 {
            for tx in target.x..target.x + target.w as i32 {
                let sx = src_rect.x + (tx - dst_x);
                let sy = src_rect.y + (ty - dst_y);
                let Some(s) = src.pixel(sx, sy) else {
                    continue;
                };
                let d = self.pixel(tx, ty).unwrap_or(0);
                self.write(tx, ty, blend_over(s, d));
            }
        }
    }

    /// Build a surface from an `image` RGBA buffer.
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let mut surface = Surface::new(img.width(), img.height());
        for (x, y, p) in img.enumerate_pixels() {
            let native = Self::map_rgba(Color::from_rgba(p[0], p[1], p[2], p[3]));
            surface.write(x as i32, y as i32, native);
        }
        surface
    }

    /// Copy into an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.rgba_at(x as i32, y as i32).unwrap_or_default();
            Rgba([c.r(), c.g(), c.b(), c.a()])
        })
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, CanvasError> {
        let img = self.to_rgba_image();
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                img.as_raw(),
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| CanvasError::Image(e.to_string()))?;

        Ok(png_bytes)
    }
}

/// "Source over" for straight (non-premultiplied) alpha native pixels.
fn blend_over(src: u32, dst: u32) -> u32 {
    let sa = (src >> 24) & 0xFF;
    if sa == 0xFF {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = (dst >> 24) & 0xFF;
    // dst contribution, scaled by 255
    let dw = da * (255 - sa) / 255;
    let out_a = sa + dw;
    if out_a == 0 {
        return 0;
    }

    let channel = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * sa + d * dw) / out_a) & 0xFF
    };

    (out_a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Scoped direct pixel access to a [`Surface`].
///
/// Holding the guard is what permits raw pixel writes; dropping it
/// releases the surface.
pub struct SurfaceLock<'a> {
    surface: &'a mut Surface,
}

impl SurfaceLock<'_> {
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Write a native pixel. Writes outside the surface are dropped and
    /// reported as `false`.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, pixel: u32) -> bool {
        self.surface.write(x, y, pixel)
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.surface.pixel(x, y)
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        trace!(target: "easel::draw", "Surface: unlock");
    }
}
