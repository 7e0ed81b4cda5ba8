// SPDX-License-Identifier: GPL-3.0-only

//! Strip export
//!
//! Renders the composed strip at the export scale, encodes it as lossless
//! PNG and hands back the final artifact. The artifact carries no file path;
//! saving it is the storage module's job.

use super::compose;
use crate::constants::strip;
use crate::errors::ComposeError;
use crate::pipelines::photo::encode_png;
use crate::session::{FinalArtifact, Photo};
use crate::templates::Template;
use std::sync::Arc;
use tracing::info;

/// Render the downloadable artifact at export scale (>= 2x on-screen size)
pub async fn render_artifact(
    photos: Vec<Photo>,
    template: &'static Template,
) -> Result<FinalArtifact, ComposeError> {
    info!(template = template.id, "Rendering final artifact");

    tokio::task::spawn_blocking(move || {
        let strip_image = compose(&photos, template, strip::EXPORT_SCALE)?;
        let encoded = encode_png(&strip_image)
            .map_err(|e| ComposeError::EncodingFailed(e.to_string()))?;

        Ok(FinalArtifact {
            data: Arc::from(encoded.data.into_boxed_slice()),
            width: encoded.width,
            height: encoded.height,
        })
    })
    .await
    .map_err(|e| ComposeError::EncodingFailed(format!("Compose task error: {}", e)))?
}

/// Render the on-screen preview of the strip. Returns tightly packed RGBA
/// pixels plus dimensions, ready for an image widget handle.
pub async fn render_preview(
    photos: Vec<Photo>,
    template: &'static Template,
) -> Result<(Vec<u8>, u32, u32), ComposeError> {
    tokio::task::spawn_blocking(move || {
        let strip_image = compose(&photos, template, strip::PREVIEW_SCALE)?;
        let (width, height) = strip_image.dimensions();
        Ok((strip_image.into_raw(), width, height))
    })
    .await
    .map_err(|e| ComposeError::EncodingFailed(format!("Compose task error: {}", e)))?
}

/// Download filename for an artifact exported at the given epoch
/// milliseconds timestamp
pub fn artifact_filename(timestamp_millis: i64) -> String {
    format!("photo-strip-{}.png", timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_filename_format() {
        let name = artifact_filename(1_700_000_000_123);
        assert_eq!(name, "photo-strip-1700000000123.png");
        assert!(name.starts_with("photo-strip-"));
        assert!(name.ends_with(".png"));
    }
}
