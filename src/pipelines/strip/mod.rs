// SPDX-License-Identifier: GPL-3.0-only

//! Strip compositor
//!
//! Lays out three captured photos plus template decoration into a single
//! RGBA image: background (solid or gradient) with rounded corners, outer
//! border, per-photo cells with borders/shadows/effects and optional index
//! badges, and header/footer caption bands. The compositor is pure: the same
//! photos, template and scale always produce the same pixels. The preview
//! and the exported artifact are both rendered here, only at different
//! scales.

pub mod export;
pub mod layout;
pub mod text;

pub use export::{artifact_filename, render_artifact, render_preview};
pub use layout::{CellLayout, Rect, StripLayout, layout};

use crate::constants::STRIP_PHOTO_COUNT;
use crate::errors::ComposeError;
use crate::pipelines::photo::processing;
use crate::session::Photo;
use crate::templates::{BackgroundFill, PhotoEffect, Rgb, ShadowSpec, Template};
use image::RgbaImage;
use tracing::debug;

/// Compose the strip at the given integer scale factor
pub fn compose(
    photos: &[Photo],
    template: &Template,
    scale: u32,
) -> Result<RgbaImage, ComposeError> {
    if photos.len() != STRIP_PHOTO_COUNT {
        return Err(ComposeError::IncompleteSession {
            have: photos.len(),
            need: STRIP_PHOTO_COUNT,
        });
    }

    let decoded: Vec<RgbaImage> = photos
        .iter()
        .map(|photo| {
            image::load_from_memory(&photo.data)
                .map(|img| img.to_rgba8())
                .map_err(|e| ComposeError::PhotoDecodeFailed(e.to_string()))
        })
        .collect::<Result<_, _>>()?;

    let layout = layout::layout(template, scale);
    let mut canvas = RgbaImage::new(layout.width, layout.height);

    paint_background(&mut canvas, template, &layout);

    for (index, cell) in layout.cells.iter().enumerate() {
        if let Some(shadow) = &template.photo_shadow {
            paint_cell_shadow(&mut canvas, cell, shadow, template, scale);
        }
        paint_cell_photo(&mut canvas, &decoded[index], cell, template, scale);
        if let Some(badge) = &template.photo_number {
            paint_badge(&mut canvas, cell, index + 1, badge, scale);
        }
    }

    if let (Some(band), Some(caption)) = (&layout.header, &template.header) {
        let px = 20 * scale;
        text::draw_text_centered(
            &mut canvas,
            caption.text,
            band.x + band.width / 2,
            band.y + band.height / 2,
            px,
            caption.color,
        );
    }
    if let (Some(band), Some(caption)) = (&layout.footer, &template.footer) {
        let px = 14 * scale;
        text::draw_text_centered(
            &mut canvas,
            caption.text,
            band.x + band.width / 2,
            band.y + band.height / 2,
            px,
            caption.color,
        );
    }

    debug!(
        width = layout.width,
        height = layout.height,
        template = template.id,
        "Strip composed"
    );

    Ok(canvas)
}

/// Fill the strip background and stroke the outer border. Pixels outside the
/// rounded outline stay transparent.
fn paint_background(canvas: &mut RgbaImage, template: &Template, layout: &StripLayout) {
    let outer = Rect {
        x: 0,
        y: 0,
        width: layout.width,
        height: layout.height,
    };
    let radius = (template.corner_radius * layout.scale) as f32;
    let border_width = template
        .border
        .map(|b| (b.width * layout.scale) as f32)
        .unwrap_or(0.0);

    for y in 0..layout.height {
        let row_color = background_color_at(&template.background, y, layout.height);
        for x in 0..layout.width {
            let d = rounded_rect_sdf(x as f32 + 0.5, y as f32 + 0.5, &outer, radius);
            if d > 0.0 {
                continue;
            }
            let color = if let Some(border) = &template.border {
                if d > -border_width {
                    border.color
                } else {
                    row_color
                }
            } else {
                row_color
            };
            canvas.put_pixel(x, y, image::Rgba([color.r, color.g, color.b, 0xff]));
        }
    }
}

/// Resolve the background color for a canvas row
fn background_color_at(background: &BackgroundFill, y: u32, height: u32) -> Rgb {
    match background {
        BackgroundFill::Solid(color) => *color,
        BackgroundFill::VerticalGradient(stops) => {
            if stops.len() == 1 {
                return stops[0];
            }
            let t = y as f32 / (height - 1).max(1) as f32;
            let span = t * (stops.len() - 1) as f32;
            let seg = (span as usize).min(stops.len() - 2);
            let frac = span - seg as f32;
            lerp_color(stops[seg], stops[seg + 1], frac)
        }
    }
}

fn lerp_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: u8, y: u8| -> u8 { (x as f32 + (y as f32 - x as f32) * t).round() as u8 };
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Soft drop shadow behind a photo cell: darkening with linear falloff over
/// the blur distance, clipped to painted strip pixels.
fn paint_cell_shadow(
    canvas: &mut RgbaImage,
    cell: &CellLayout,
    shadow: &ShadowSpec,
    template: &Template,
    scale: u32,
) {
    let blur = (shadow.blur * scale) as f32;
    let radius = (template.photo_corner_radius * scale) as f32;
    let offset_x = shadow.dx * scale as i32;
    let offset_y = shadow.dy * scale as i32;

    let shadow_rect = Rect {
        x: cell.photo.x.saturating_add_signed(offset_x),
        y: cell.photo.y.saturating_add_signed(offset_y),
        width: cell.photo.width,
        height: cell.photo.height,
    };

    let pad = blur.ceil() as u32;
    let x0 = shadow_rect.x.saturating_sub(pad);
    let y0 = shadow_rect.y.saturating_sub(pad);
    let x1 = (shadow_rect.right() + pad).min(canvas.width());
    let y1 = (shadow_rect.bottom() + pad).min(canvas.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = canvas.get_pixel(x, y);
            if pixel[3] == 0 {
                continue; // outside the strip outline
            }
            let d = rounded_rect_sdf(x as f32 + 0.5, y as f32 + 0.5, &shadow_rect, radius);
            let coverage = if d <= 0.0 {
                1.0
            } else if d < blur {
                1.0 - d / blur
            } else {
                continue;
            };
            let alpha = shadow.alpha * coverage;
            let mut out = *pixel;
            for channel in 0..3 {
                out[channel] = (out[channel] as f32 * (1.0 - alpha)) as u8;
            }
            canvas.put_pixel(x, y, out);
        }
    }
}

/// Draw one photo into its cell: border ring on the outer edge of the cell
/// square, the resized photo (with the template's effect baked in) inside
/// it, both masked by the cell's corner radius.
fn paint_cell_photo(
    canvas: &mut RgbaImage,
    photo: &RgbaImage,
    cell: &CellLayout,
    template: &Template,
    scale: u32,
) {
    let radius = (template.photo_corner_radius * scale) as f32;
    let border_width = template.photo_border.map(|b| b.width * scale).unwrap_or(0);

    let image_rect = Rect {
        x: cell.photo.x + border_width,
        y: cell.photo.y + border_width,
        width: cell.photo.width.saturating_sub(2 * border_width),
        height: cell.photo.height.saturating_sub(2 * border_width),
    };

    let resized = image::imageops::resize(
        photo,
        image_rect.width.max(1),
        image_rect.height.max(1),
        image::imageops::FilterType::Triangle,
    );

    for y in cell.photo.y..cell.photo.bottom().min(canvas.height()) {
        for x in cell.photo.x..cell.photo.right().min(canvas.width()) {
            let d = rounded_rect_sdf(x as f32 + 0.5, y as f32 + 0.5, &cell.photo, radius);
            if d > 0.0 {
                continue;
            }

            if image_rect.contains(x, y) {
                let src = resized.get_pixel(x - image_rect.x, y - image_rect.y);
                let mut r = src[0] as f32 / 255.0;
                let mut g = src[1] as f32 / 255.0;
                let mut b = src[2] as f32 / 255.0;
                apply_effect(&mut r, &mut g, &mut b, template.photo_effect);
                canvas.put_pixel(
                    x,
                    y,
                    image::Rgba([
                        (r * 255.0) as u8,
                        (g * 255.0) as u8,
                        (b * 255.0) as u8,
                        0xff,
                    ]),
                );
            } else if let Some(border) = &template.photo_border {
                canvas.put_pixel(
                    x,
                    y,
                    image::Rgba([border.color.r, border.color.g, border.color.b, 0xff]),
                );
            }
        }
    }
}

/// Bake a template photo effect into a pixel. Values in [0, 1].
fn apply_effect(r: &mut f32, g: &mut f32, b: &mut f32, effect: PhotoEffect) {
    match effect {
        PhotoEffect::None => {}
        PhotoEffect::Sepia(amount) => processing::sepia_mix(r, g, b, amount),
        PhotoEffect::Brighten(amount) => processing::brighten(r, g, b, amount),
        PhotoEffect::Contrast(amount) => processing::contrast(r, g, b, amount),
    }
}

/// Filled circle with the 1-based photo number
fn paint_badge(
    canvas: &mut RgbaImage,
    cell: &CellLayout,
    number: usize,
    badge: &crate::templates::BadgeSpec,
    scale: u32,
) {
    let (cx, cy) = cell.badge_center;
    let radius = cell.badge_radius as f32;

    let x0 = cx.saturating_sub(cell.badge_radius);
    let y0 = cy.saturating_sub(cell.badge_radius);
    let x1 = (cx + cell.badge_radius + 1).min(canvas.width());
    let y1 = (cy + cell.badge_radius + 1).min(canvas.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx as f32;
            let dy = y as f32 + 0.5 - cy as f32;
            if dx * dx + dy * dy <= radius * radius {
                canvas.put_pixel(
                    x,
                    y,
                    image::Rgba([
                        badge.background.r,
                        badge.background.g,
                        badge.background.b,
                        0xff,
                    ]),
                );
            }
        }
    }

    let label = number.to_string();
    text::draw_text_centered(canvas, &label, cx, cy, 12 * scale, badge.color);
}

/// Signed distance from a point to a rounded rectangle (negative inside)
fn rounded_rect_sdf(px: f32, py: f32, rect: &Rect, radius: f32) -> f32 {
    let half_w = rect.width as f32 / 2.0;
    let half_h = rect.height as f32 / 2.0;
    let radius = radius.min(half_w).min(half_h);

    let cx = rect.x as f32 + half_w;
    let cy = rect.y as f32 + half_h;

    let qx = (px - cx).abs() - (half_w - radius);
    let qy = (py - cy).abs() - (half_h - radius);

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::encode_jpeg;
    use crate::templates;
    use std::sync::Arc;

    fn test_photo(fill: [u8; 3]) -> Photo {
        let image = image::RgbImage::from_pixel(32, 32, image::Rgb(fill));
        let encoded = encode_jpeg(&image, 90).unwrap();
        Photo {
            data: Arc::from(encoded.data.into_boxed_slice()),
            width: 32,
            height: 32,
        }
    }

    fn three_photos() -> Vec<Photo> {
        vec![
            test_photo([200, 40, 40]),
            test_photo([40, 200, 40]),
            test_photo([40, 40, 200]),
        ]
    }

    #[test]
    fn test_compose_dimensions() {
        let photos = three_photos();
        for template in templates::all() {
            let strip = compose(&photos, template, 1).unwrap();
            assert_eq!(strip.dimensions(), (300, 960), "{}", template.id);
        }
    }

    #[test]
    fn test_compose_rejects_incomplete_set() {
        let photos = vec![test_photo([1, 2, 3])];
        let err = compose(&photos, templates::default_template(), 1).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::IncompleteSession { have: 1, need: 3 }
        ));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let photos = three_photos();
        let template = templates::find("vintage").unwrap();
        let a = compose(&photos, template, 2).unwrap();
        let b = compose(&photos, template, 2).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_rounded_corners_are_transparent() {
        let photos = three_photos();
        let modern = templates::find("modern").unwrap();
        assert!(modern.corner_radius > 0);
        let strip = compose(&photos, modern, 1).unwrap();
        // The very corner pixel lies outside the rounded outline
        assert_eq!(strip.get_pixel(0, 0)[3], 0);
        // A pixel well inside is painted
        assert_eq!(strip.get_pixel(150, 480)[3], 0xff);
    }

    #[test]
    fn test_template_changes_output() {
        let photos = three_photos();
        let classic = compose(&photos, templates::find("classic").unwrap(), 1).unwrap();
        let vintage = compose(&photos, templates::find("vintage").unwrap(), 1).unwrap();
        assert_ne!(classic.as_raw(), vintage.as_raw());
    }

    #[test]
    fn test_sdf_sign() {
        let rect = Rect {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        };
        assert!(rounded_rect_sdf(20.0, 20.0, &rect, 4.0) < 0.0);
        assert!(rounded_rect_sdf(5.0, 5.0, &rect, 4.0) > 0.0);
        // Corner pixel is rounded off
        assert!(rounded_rect_sdf(10.5, 10.5, &rect, 8.0) > 0.0);
    }
}
