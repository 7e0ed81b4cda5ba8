// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photo booth application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera capability is missing on this system (fatal for the session)
    CapabilityUnsupported(String),
    /// Camera-related errors
    Camera(CameraError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Strip composition / export errors
    Compose(ComposeError),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// Camera acquisition failed (permission, busy device, broken pipeline)
    AcquisitionFailed(String),
    /// Camera disconnected during operation
    Disconnected,
    /// Backend error (e.g., PipeWire)
    BackendError(String),
}

/// Photo capture errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// No frame available for capture
    NoFrameAvailable,
    /// Capture failed
    CaptureFailed(String),
    /// Encoding failed
    EncodingFailed(String),
}

/// Strip composition and export errors
#[derive(Debug, Clone)]
pub enum ComposeError {
    /// The session does not hold a full set of photos
    IncompleteSession { have: usize, need: usize },
    /// A captured photo could not be decoded back into pixels
    PhotoDecodeFailed(String),
    /// PNG encoding of the composed strip failed
    EncodingFailed(String),
    /// Writing the exported file failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::CapabilityUnsupported(msg) => {
                write!(f, "Camera capability unavailable: {}", msg)
            }
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Compose(e) => write!(f, "Strip error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::AcquisitionFailed(msg) => write!(f, "Camera acquisition failed: {}", msg),
            CameraError::Disconnected => write!(f, "Camera disconnected"),
            CameraError::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::IncompleteSession { have, need } => {
                write!(f, "Session holds {} of {} photos", have, need)
            }
            ComposeError::PhotoDecodeFailed(msg) => write!(f, "Photo decode failed: {}", msg),
            ComposeError::EncodingFailed(msg) => write!(f, "PNG encoding failed: {}", msg),
            ComposeError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for ComposeError {}

// Conversions from sub-errors to AppError
impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<ComposeError> for AppError {
    fn from(err: ComposeError) -> Self {
        AppError::Compose(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for ComposeError {
    fn from(err: std::io::Error) -> Self {
        ComposeError::SaveFailed(err.to_string())
    }
}
