// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for exported photo strips

use crate::constants::SAVE_FOLDER;
use crate::errors::ComposeError;
use crate::session::FinalArtifact;
use std::path::PathBuf;
use tracing::info;

/// Get the strip save directory (~/Pictures/photobooth)
pub fn strip_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(SAVE_FOLDER)
}

/// Ensure the save directory exists, creating it if necessary
pub fn ensure_strip_directory() -> Result<PathBuf, std::io::Error> {
    let dir = strip_directory();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Save an exported artifact under a unique time-based filename.
///
/// The write happens on the blocking pool; the returned path is the saved
/// file. This is the booth's "download": purely local, no server round-trip.
pub async fn save_artifact(artifact: FinalArtifact) -> Result<PathBuf, ComposeError> {
    let filename =
        crate::pipelines::strip::artifact_filename(chrono::Local::now().timestamp_millis());

    let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, ComposeError> {
        let dir = ensure_strip_directory().map_err(|e| ComposeError::SaveFailed(e.to_string()))?;
        let path = dir.join(&filename);
        std::fs::write(&path, &artifact.data)
            .map_err(|e| ComposeError::SaveFailed(e.to_string()))?;
        Ok(path)
    })
    .await
    .map_err(|e| ComposeError::SaveFailed(format!("Save task error: {}", e)))??;

    info!(path = %path.display(), "Strip saved");
    Ok(path)
}

/// Reveal the save directory in the system file manager
pub fn open_strip_directory() -> Result<(), std::io::Error> {
    let dir = strip_directory();
    info!(path = %dir.display(), "Opening strip directory");
    open::that(dir)
}
