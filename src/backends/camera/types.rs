// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Which way the selected camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FacingMode {
    /// User-facing (selfie) camera
    #[default]
    Front,
    /// World-facing camera
    Back,
}

impl FacingMode {
    /// The opposite facing mode
    pub fn toggled(&self) -> Self {
        match self {
            FacingMode::Front => FacingMode::Back,
            FacingMode::Back => FacingMode::Front,
        }
    }

    /// Front cameras preview mirrored by default, back cameras do not
    pub fn default_mirror(&self) -> bool {
        matches!(self, FacingMode::Front)
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::Front => write!(f, "front"),
            FacingMode::Back => write!(f, "back"),
        }
    }
}

/// Represents a camera device discovered through PipeWire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// Path to the capture device (PipeWire serial or node id; empty lets
    /// PipeWire auto-select)
    pub path: String,
    /// Facing classification, when the backend could determine one
    pub facing: Option<FacingMode>,
}

/// Resolution hint passed to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A single RGBA frame delivered by the preview pipeline
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixel data (4 bytes per pixel)
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Camera backend errors
#[derive(Debug, Clone)]
pub enum BackendError {
    /// GStreamer or PipeWire initialization failed
    InitializationFailed(String),
    /// The pipeline reported an error while running
    PipelineError(String),
    /// PipeWire is not available on this system
    NotAvailable(String),
    /// Generic backend error
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::InitializationFailed(msg) => {
                write!(f, "Initialization failed: {}", msg)
            }
            BackendError::PipelineError(msg) => write!(f, "Pipeline error: {}", msg),
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Channel used to deliver frames from the pipeline callback to the app
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_mode_toggle() {
        assert_eq!(FacingMode::Front.toggled(), FacingMode::Back);
        assert_eq!(FacingMode::Back.toggled(), FacingMode::Front);
    }

    #[test]
    fn test_default_mirror_only_for_front() {
        assert!(FacingMode::Front.default_mirror());
        assert!(!FacingMode::Back.default_mirror());
    }
}
