// SPDX-License-Identifier: GPL-3.0-only

//! Capture post-processing
//!
//! Turns a raw RGBA preview frame into the booth photo: centered square
//! crop, optional horizontal mirror, then the selected filter as a
//! pixel-level pass. The whole transform is a pure function of the frame,
//! the mirror flag and the filter, so identical inputs yield identical
//! photos.

use crate::app::FilterType;
use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbImage;

/// Capture transform parameters
#[derive(Debug, Clone, Copy)]
pub struct CaptureTransform {
    pub mirror: bool,
    pub filter: FilterType,
}

/// Apply the capture transform: centered square crop, mirror, filter.
///
/// The crop side is `min(width, height)`; the crop window is centered on
/// both axes. Mirroring flips the crop horizontally, matching what the user
/// saw in a mirrored preview.
pub fn apply_transform(
    frame: &CameraFrame,
    transform: &CaptureTransform,
) -> Result<RgbImage, PhotoError> {
    let side = frame.width.min(frame.height);
    if side == 0 {
        return Err(PhotoError::CaptureFailed("Frame has zero size".into()));
    }

    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() < expected {
        return Err(PhotoError::CaptureFailed(format!(
            "RGBA data too small: expected {}, got {}",
            expected,
            frame.data.len()
        )));
    }

    let x_offset = (frame.width - side) / 2;
    let y_offset = (frame.height - side) / 2;

    let mut image = RgbImage::new(side, side);
    for y in 0..side {
        let src_y = y + y_offset;
        for x in 0..side {
            let src_x = if transform.mirror {
                x_offset + (side - 1 - x)
            } else {
                x_offset + x
            };
            let idx = (src_y as usize * frame.width as usize + src_x as usize) * 4;

            let mut r = frame.data[idx] as f32 / 255.0;
            let mut g = frame.data[idx + 1] as f32 / 255.0;
            let mut b = frame.data[idx + 2] as f32 / 255.0;

            apply_filter_rgb(&mut r, &mut g, &mut b, transform.filter);

            image.put_pixel(
                x,
                y,
                image::Rgb([
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                ]),
            );
        }
    }

    Ok(image)
}

/// Produce the preview pixels for a frame: mirror and filter applied to the
/// full (uncropped) frame. Returns a tightly packed RGBA buffer.
pub fn process_preview_rgba(frame: &CameraFrame, mirror: bool, filter: FilterType) -> Vec<u8> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let mut out = vec![0u8; width * height * 4];

    for y in 0..height {
        for x in 0..width {
            let src_x = if mirror { width - 1 - x } else { x };
            let src = (y * width + src_x) * 4;
            let dst = (y * width + x) * 4;

            let mut r = frame.data[src] as f32 / 255.0;
            let mut g = frame.data[src + 1] as f32 / 255.0;
            let mut b = frame.data[src + 2] as f32 / 255.0;

            apply_filter_rgb(&mut r, &mut g, &mut b, filter);

            out[dst] = (r * 255.0) as u8;
            out[dst + 1] = (g * 255.0) as u8;
            out[dst + 2] = (b * 255.0) as u8;
            out[dst + 3] = 0xff;
        }
    }

    out
}

/// Apply a filter to RGB values in-place. Values are in [0, 1].
#[inline]
pub fn apply_filter_rgb(r: &mut f32, g: &mut f32, b: &mut f32, filter: FilterType) {
    match filter {
        FilterType::Standard => {}

        FilterType::Mono => {
            let gray = luminance(*r, *g, *b);
            *r = gray;
            *g = gray;
            *b = gray;
        }

        FilterType::Sepia => {
            sepia_mix(r, g, b, 1.0);
        }

        FilterType::Vintage => {
            // Half-strength sepia with a slight contrast lift
            sepia_mix(r, g, b, 0.5);
            contrast(r, g, b, 1.1);
        }

        FilterType::Fade => {
            brighten(r, g, b, 1.1);
            contrast(r, g, b, 0.9);
            saturate(r, g, b, 0.7);
        }

        FilterType::Warm => {
            saturate(r, g, b, 1.5);
            brighten(r, g, b, 1.05);
            sepia_mix(r, g, b, 0.2);
        }

        FilterType::Cool => {
            saturate(r, g, b, 1.4);
            *r = (*r * 0.9).clamp(0.0, 1.0);
            *g = (*g * 0.95).clamp(0.0, 1.0);
            *b = (*b * 1.1).clamp(0.0, 1.0);
            brighten(r, g, b, 1.05);
        }

        FilterType::Dramatic => {
            contrast(r, g, b, 1.2);
            brighten(r, g, b, 0.9);
            saturate(r, g, b, 1.5);
        }
    }
}

/// BT.601 luminance
#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Blend toward a sepia toning of the pixel. `amount` 0 = unchanged, 1 = full sepia.
#[inline]
pub(crate) fn sepia_mix(r: &mut f32, g: &mut f32, b: &mut f32, amount: f32) {
    let lum = luminance(*r, *g, *b);
    let sr = (lum * 1.2 + 0.1).clamp(0.0, 1.0);
    let sg = (lum * 0.9 + 0.05).clamp(0.0, 1.0);
    let sb = (lum * 0.7).clamp(0.0, 1.0);
    *r = *r + (sr - *r) * amount;
    *g = *g + (sg - *g) * amount;
    *b = *b + (sb - *b) * amount;
}

#[inline]
pub(crate) fn saturate(r: &mut f32, g: &mut f32, b: &mut f32, amount: f32) {
    let lum = luminance(*r, *g, *b);
    *r = (lum + (*r - lum) * amount).clamp(0.0, 1.0);
    *g = (lum + (*g - lum) * amount).clamp(0.0, 1.0);
    *b = (lum + (*b - lum) * amount).clamp(0.0, 1.0);
}

#[inline]
pub(crate) fn contrast(r: &mut f32, g: &mut f32, b: &mut f32, amount: f32) {
    *r = ((*r - 0.5) * amount + 0.5).clamp(0.0, 1.0);
    *g = ((*g - 0.5) * amount + 0.5).clamp(0.0, 1.0);
    *b = ((*b - 0.5) * amount + 0.5).clamp(0.0, 1.0);
}

#[inline]
pub(crate) fn brighten(r: &mut f32, g: &mut f32, b: &mut f32, amount: f32) {
    *r = (*r * amount).clamp(0.0, 1.0);
    *g = (*g * amount).clamp(0.0, 1.0);
    *b = (*b * amount).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn rgba_frame(width: u32, height: u32, fill: [u8; 4]) -> CameraFrame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&fill);
        }
        CameraFrame {
            width,
            height,
            data: Arc::from(data.into_boxed_slice()),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_square_crop_is_centered() {
        let frame = rgba_frame(8, 4, [10, 20, 30, 255]);
        let transform = CaptureTransform {
            mirror: false,
            filter: FilterType::Standard,
        };
        let image = apply_transform(&frame, &transform).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
    }

    #[test]
    fn test_mirror_flips_horizontally() {
        // Left half red, right half blue, square frame
        let width = 4u32;
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..width {
                if x < 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let frame = CameraFrame {
            width,
            height: 4,
            data: Arc::from(data.into_boxed_slice()),
            captured_at: Instant::now(),
        };

        let plain = apply_transform(
            &frame,
            &CaptureTransform {
                mirror: false,
                filter: FilterType::Standard,
            },
        )
        .unwrap();
        let mirrored = apply_transform(
            &frame,
            &CaptureTransform {
                mirror: true,
                filter: FilterType::Standard,
            },
        )
        .unwrap();

        assert_eq!(plain.get_pixel(0, 0)[0], 255); // red on the left
        assert_eq!(mirrored.get_pixel(0, 0)[2], 255); // blue on the left
    }

    #[test]
    fn test_transform_is_deterministic() {
        let frame = rgba_frame(6, 6, [120, 80, 200, 255]);
        let transform = CaptureTransform {
            mirror: true,
            filter: FilterType::Vintage,
        };
        let a = apply_transform(&frame, &transform).unwrap();
        let b = apply_transform(&frame, &transform).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_mono_equalizes_channels() {
        let (mut r, mut g, mut b) = (0.8, 0.4, 0.1);
        apply_filter_rgb(&mut r, &mut g, &mut b, FilterType::Mono);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_sepia_channel_ordering() {
        let (mut r, mut g, mut b) = (0.5, 0.5, 0.5);
        apply_filter_rgb(&mut r, &mut g, &mut b, FilterType::Sepia);
        assert!(r >= g);
        assert!(g >= b);
    }

    #[test]
    fn test_standard_is_identity() {
        let (mut r, mut g, mut b) = (0.3, 0.6, 0.9);
        apply_filter_rgb(&mut r, &mut g, &mut b, FilterType::Standard);
        assert_eq!((r, g, b), (0.3, 0.6, 0.9));
    }
}
