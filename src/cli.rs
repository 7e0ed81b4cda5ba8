// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for booth operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Listing the strip templates
//! - Composing a strip from existing image files

use photobooth::backends::camera::enumerate_cameras;
use photobooth::errors::{AppResult, CameraError, ComposeError};
use photobooth::pipelines::strip::render_artifact;
use photobooth::session::Photo;
use photobooth::{storage, templates};
use std::path::PathBuf;
use std::sync::Arc;

/// List all available cameras
pub fn list_cameras() -> AppResult<()> {
    // Initialize GStreamer
    gstreamer::init().map_err(|e| CameraError::BackendError(e.to_string()))?;

    let cameras = enumerate_cameras();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let facing = camera
            .facing
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  [{}] {} (facing: {})", index, camera.name, facing);
    }

    Ok(())
}

/// List the strip templates
pub fn list_templates() -> AppResult<()> {
    println!("Available templates:");
    println!();
    for template in templates::all() {
        let mut traits = Vec::new();
        if template.header.is_some() {
            traits.push("header");
        }
        if template.footer.is_some() {
            traits.push("footer");
        }
        if template.photo_number.is_some() {
            traits.push("numbered");
        }
        println!(
            "  {:10} {} [{}]",
            template.id,
            template.name,
            traits.join(", ")
        );
    }

    Ok(())
}

/// Compose a strip from three image files
pub fn compose_strip(
    photos: Vec<PathBuf>,
    template_id: &str,
    output: Option<PathBuf>,
) -> AppResult<()> {
    let template = templates::find(template_id)
        .ok_or_else(|| format!("Unknown template '{}'", template_id))?;

    let mut loaded = Vec::new();
    for path in &photos {
        let bytes = std::fs::read(path)?;
        // Decode once up front so a broken file fails fast with its name
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ComposeError::PhotoDecodeFailed(format!("{}: {}", path.display(), e)))?;

        println!(
            "  Loaded: {} ({}x{})",
            path.file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default(),
            decoded.width(),
            decoded.height()
        );

        loaded.push(Photo {
            data: Arc::from(bytes.into_boxed_slice()),
            width: decoded.width(),
            height: decoded.height(),
        });
    }

    println!("Composing with template '{}'...", template.id);

    // Create async runtime for the pipeline
    let rt = tokio::runtime::Runtime::new()?;
    let artifact = rt.block_on(render_artifact(loaded, template))?;

    let path = match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &artifact.data)?;
            path
        }
        None => rt.block_on(storage::save_artifact(artifact))?,
    };

    println!("Strip saved: {}", path.display());
    Ok(())
}
