//! Bitmap text rendering.
//!
//! Uses the Spleen bitmap font family. Glyphs are 1-bit, so rendered text
//! has hard edges: every pixel is either fully the text color or fully
//! transparent.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::color::Color;
use crate::surface::Surface;

/// A Spleen face and its cell size.
#[derive(Debug, Clone, Copy)]
pub struct FontFace {
    data: &'static [u8],
    pub char_width: usize,
    pub char_height: usize,
}

/// Available faces, smallest first.
pub const FACES: [FontFace; 3] = [
    FontFace {
        data: FONT_6X12,
        char_width: 6,
        char_height: 12,
    },
    FontFace {
        data: FONT_8X16,
        char_width: 8,
        char_height: 16,
    },
    FontFace {
        data: FONT_12X24,
        char_width: 12,
        char_height: 24,
    },
];

/// Largest face whose cell height fits in `font_size`, else the smallest.
pub fn face_for_size(font_size: u32) -> FontFace {
    FACES
        .iter()
        .rev()
        .find(|f| f.char_height as u32 <= font_size)
        .copied()
        .unwrap_or(FACES[0])
}

/// Cell size of one character at `font_size` pixels tall.
pub fn cell_size(font_size: u32) -> (usize, usize) {
    let face = face_for_size(font_size);
    let h = font_size as usize;
    let w = (face.char_width * h / face.char_height).max(1);
    (w, h)
}

/// Pixel size of `text` rendered at `font_size` (one row per line).
pub fn measure_text(text: &str, font_size: u32) -> (u32, u32) {
    if text.is_empty() || font_size == 0 {
        return (0, 0);
    }
    let (cw, ch) = cell_size(font_size);
    let lines: Vec<&str> = text.split('\n').collect();
    let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    ((columns * cw) as u32, (lines.len() * ch) as u32)
}

/// Render `text` onto a new transparent surface sized to fit it.
///
/// Only the RGB channels of `color` are used; glyph pixels are opaque.
pub fn render_text(text: &str, font_size: u32, color: Color) -> Surface {
    let (width, height) = measure_text(text, font_size);
    let mut surface = Surface::new(width, height);
    if width == 0 || height == 0 {
        return surface;
    }

    let face = face_for_size(font_size);
    let (cw, ch) = cell_size(font_size);
    let pixel = Surface::map_rgba(Color::from_rgba(color.r(), color.g(), color.b(), 0xFF));

    let mut lock = surface.lock();
    for (row, line) in text.split('\n').enumerate() {
        for (col, c) in line.chars().enumerate() {
            let glyph = glyph_bitmap(face, c);
            let origin_x = col * cw;
            let origin_y = row * ch;
            // nearest-neighbour scale from the face cell to the target cell
            for dy in 0..ch {
                for dx in 0..cw {
                    let sx = dx * face.char_width / cw;
                    let sy = dy * face.char_height / ch;
                    if glyph.get(sy * face.char_width + sx).copied().unwrap_or(0) != 0 {
                        lock.put_pixel((origin_x + dx) as i32, (origin_y + dy) as i32, pixel);
                    }
                }
            }
        }
    }
    drop(lock);

    surface
}

/// 1-byte-per-pixel glyph bitmap (0 or 1) at the face's native size.
fn glyph_bitmap(face: FontFace, ch: char) -> Vec<u8> {
    let (w, h) = (face.char_width, face.char_height);
    let mut glyph = vec![0u8; w * h];

    if ch == ' ' {
        return glyph;
    }

    let mut found = false;
    if let Ok(mut spleen) = PSF2Font::new(face.data) {
        let utf8_bytes = ch.to_string();
        if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8_bytes.as_bytes()) {
            for (row_y, row) in spleen_glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < h && col_x < w && on {
                        glyph[row_y * w + col_x] = 1;
                    }
                }
            }
            found = true;
        }
    }

    if !found {
        draw_box(&mut glyph, w, h);
    }

    glyph
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
