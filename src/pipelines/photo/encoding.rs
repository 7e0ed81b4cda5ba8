// SPDX-License-Identifier: GPL-3.0-only

//! Photo encoding
//!
//! Captured photos are held in memory as compressed JPEG; the strip export
//! uses lossless PNG. Both paths go through the `image` crate encoders.

use crate::errors::PhotoError;
use image::{RgbImage, RgbaImage};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

/// Encoded image data
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Encode an RGB image as JPEG with the given quality (0-100)
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<EncodedImage, PhotoError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    Ok(EncodedImage {
        data: buffer,
        format: EncodingFormat::Jpeg,
        width: image.width(),
        height: image.height(),
    })
}

/// Encode an RGBA image as PNG (lossless, maximum quality)
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage, PhotoError> {
    let mut buffer = Vec::new();

    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(EncodedImage {
        data: buffer,
        format: EncodingFormat::Png,
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_roundtrip_dimensions() {
        let image = RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]));
        let encoded = encode_jpeg(&image, 90).unwrap();
        assert_eq!(encoded.format, EncodingFormat::Jpeg);
        assert!(!encoded.data.is_empty());

        let decoded = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn test_png_is_lossless() {
        let mut image = RgbaImage::new(4, 4);
        for (i, pixel) in image.pixels_mut().enumerate() {
            *pixel = image::Rgba([i as u8 * 16, 255 - i as u8 * 16, 7, 255]);
        }
        let encoded = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&encoded.data).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), image.as_raw());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
    }
}
