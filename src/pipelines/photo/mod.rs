// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture pipeline
//!
//! ```text
//! Camera frame → Post-Processing (crop/mirror/filter) → JPEG encode → Photo
//!       ↓
//! Preview continues uninterrupted
//! ```
//!
//! All stages run off the UI thread; frames travel as `Arc` so nothing is
//! copied on the way in. The resulting [`Photo`] is owned by the session.

pub mod encoding;
pub mod processing;

pub use encoding::{EncodedImage, EncodingFormat, encode_jpeg, encode_png};
pub use processing::{CaptureTransform, apply_transform, process_preview_rgba};

use crate::backends::camera::types::CameraFrame;
use crate::constants::capture;
use crate::errors::PhotoError;
use crate::session::Photo;
use std::sync::Arc;
use tracing::{debug, info};

/// Complete capture pipeline: process a raw frame and encode the booth photo
pub struct PhotoPipeline {
    transform: CaptureTransform,
    jpeg_quality: u8,
}

impl PhotoPipeline {
    pub fn new(transform: CaptureTransform) -> Self {
        Self {
            transform,
            jpeg_quality: capture::PHOTO_JPEG_QUALITY,
        }
    }

    /// Run the pipeline on a captured frame.
    ///
    /// CPU-bound work happens on the blocking pool so the preview stream and
    /// UI stay responsive.
    pub async fn capture(&self, frame: Arc<CameraFrame>) -> Result<Photo, PhotoError> {
        info!(
            width = frame.width,
            height = frame.height,
            mirror = self.transform.mirror,
            filter = ?self.transform.filter,
            "Processing capture"
        );

        let transform = self.transform;
        let quality = self.jpeg_quality;

        let encoded = tokio::task::spawn_blocking(move || {
            let processed = apply_transform(&frame, &transform)?;
            encode_jpeg(&processed, quality)
        })
        .await
        .map_err(|e| PhotoError::CaptureFailed(format!("Capture task error: {}", e)))??;

        debug!(bytes = encoded.data.len(), "Photo encoded");

        Ok(Photo {
            data: Arc::from(encoded.data.into_boxed_slice()),
            width: encoded.width,
            height: encoded.height,
        })
    }
}
