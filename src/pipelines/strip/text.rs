// SPDX-License-Identifier: GPL-3.0-only

//! Bitmap text rendering for strip captions and badges
//!
//! Renders the Spleen bitmap fonts onto the strip canvas, scaling glyphs
//! with nearest-neighbor so output stays crisp and fully deterministic at
//! every export scale.

use crate::templates::Rgb;
use image::RgbaImage;
use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

/// Base glyph dimensions of the two embedded fonts
const LARGE_GLYPH: (usize, usize) = (12, 24);
const SMALL_GLYPH: (usize, usize) = (6, 12);

/// Glyph cell size (width, height) for text of the given pixel height
pub fn glyph_size(px_height: u32) -> (u32, u32) {
    let (base_w, base_h) = base_glyph(px_height);
    let width = (px_height as usize * base_w).div_ceil(base_h) as u32;
    (width, px_height)
}

/// Total size of a rendered line of text
pub fn text_size(text: &str, px_height: u32) -> (u32, u32) {
    let (glyph_w, glyph_h) = glyph_size(px_height);
    (glyph_w * text.chars().count() as u32, glyph_h)
}

/// Draw a line of text with its top-left corner at (x, y)
pub fn draw_text(canvas: &mut RgbaImage, text: &str, x: u32, y: u32, px_height: u32, color: Rgb) {
    let (glyph_w, glyph_h) = glyph_size(px_height);
    let mut pen_x = x;

    for ch in text.chars() {
        draw_glyph(canvas, ch, pen_x, y, glyph_w, glyph_h, color);
        pen_x += glyph_w;
    }
}

/// Draw a line of text horizontally centered on `center_x`, with its
/// vertical midline at `center_y`
pub fn draw_text_centered(
    canvas: &mut RgbaImage,
    text: &str,
    center_x: u32,
    center_y: u32,
    px_height: u32,
    color: Rgb,
) {
    let (text_w, text_h) = text_size(text, px_height);
    let x = center_x.saturating_sub(text_w / 2);
    let y = center_y.saturating_sub(text_h / 2);
    draw_text(canvas, text, x, y, px_height, color);
}

/// Pick the base font for a target pixel height
fn base_glyph(px_height: u32) -> (usize, usize) {
    if px_height <= 16 { SMALL_GLYPH } else { LARGE_GLYPH }
}

/// Rasterize one glyph, scaled with nearest neighbor
fn draw_glyph(
    canvas: &mut RgbaImage,
    ch: char,
    x: u32,
    y: u32,
    glyph_w: u32,
    glyph_h: u32,
    color: Rgb,
) {
    let (base_w, base_h) = base_glyph(glyph_h);
    let bitmap = glyph_bitmap(ch, base_w, base_h);

    let (canvas_w, canvas_h) = canvas.dimensions();
    for dy in 0..glyph_h as usize {
        let sy = dy * base_h / glyph_h as usize;
        for dx in 0..glyph_w as usize {
            let sx = dx * base_w / glyph_w as usize;
            if bitmap[sy * base_w + sx] == 0 {
                continue;
            }
            let px = x + dx as u32;
            let py = y + dy as u32;
            if px < canvas_w && py < canvas_h {
                canvas.put_pixel(px, py, image::Rgba([color.r, color.g, color.b, 0xff]));
            }
        }
    }
}

/// Collect a glyph's base-resolution bitmap (1 = set pixel).
///
/// Unknown characters fall back to a box outline.
fn glyph_bitmap(ch: char, base_w: usize, base_h: usize) -> Vec<u8> {
    let mut bitmap = vec![0u8; base_w * base_h];

    let font_data: &[u8] = if (base_w, base_h) == LARGE_GLYPH {
        FONT_12X24
    } else {
        FONT_6X12
    };

    let Ok(mut font) = PSF2Font::new(font_data) else {
        draw_box(&mut bitmap, base_w, base_h);
        return bitmap;
    };

    let utf8 = ch.to_string();
    if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < base_h && col_x < base_w && on {
                    bitmap[row_y * base_w + col_x] = 1;
                }
            }
        }
    } else {
        draw_box(&mut bitmap, base_w, base_h);
    }

    bitmap
}

/// Draw a box outline in the glyph buffer (fallback for unknown chars)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_size_scales() {
        assert_eq!(glyph_size(24), (12, 24));
        assert_eq!(glyph_size(48), (24, 48));
        assert_eq!(glyph_size(12), (6, 12));
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut canvas = RgbaImage::new(200, 40);
        draw_text(&mut canvas, "HELLO", 2, 2, 24, Rgb::BLACK);
        let set = canvas.pixels().filter(|p| p[3] != 0).count();
        assert!(set > 0, "text rendering should set pixels");
    }

    #[test]
    fn test_draw_is_deterministic() {
        let mut a = RgbaImage::new(120, 40);
        let mut b = RgbaImage::new(120, 40);
        draw_text_centered(&mut a, "BOOTH", 60, 20, 24, Rgb::new(10, 20, 30));
        draw_text_centered(&mut b, "BOOTH", 60, 20, 24, Rgb::new(10, 20, 30));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_clipping_at_canvas_edge() {
        let mut canvas = RgbaImage::new(10, 10);
        // Must not panic even when the text falls outside the canvas
        draw_text(&mut canvas, "WIDE TEXT", 4, 4, 24, Rgb::WHITE);
    }
}
