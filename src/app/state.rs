// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::{CameraDevice, CameraFrame, FacingMode};
use crate::config::Config;
use crate::constants::STRIP_PHOTO_COUNT;
use crate::session::{FinalArtifact, Session};
use crate::templates::Template;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Result of the startup camera capability probe.
///
/// The gate is checked once per session: while `Checking`, the UI shows a
/// neutral placeholder; `Unsupported` is terminal (the capture UI is never
/// rendered); `Supported` unlocks the booth for the rest of the session.
#[derive(Debug, Clone, Default)]
pub enum CapabilityState {
    #[default]
    Checking,
    Supported,
    Unsupported(String),
}

impl CapabilityState {
    pub fn is_supported(&self) -> bool {
        matches!(self, CapabilityState::Supported)
    }
}

/// Filter types for camera preview and capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// No filter applied (displays as "Normal")
    #[default]
    Standard,
    /// Black & white
    Mono,
    /// Full sepia toning
    Sepia,
    /// Half sepia with a contrast lift
    Vintage,
    /// Lifted brightness with muted colors
    Fade,
    /// Saturated with an amber cast
    Warm,
    /// Saturated with a blue cast
    Cool,
    /// High contrast, darkened, saturated
    Dramatic,
}

impl FilterType {
    /// All filters, in picker order
    pub const ALL: [FilterType; 8] = [
        FilterType::Standard,
        FilterType::Mono,
        FilterType::Sepia,
        FilterType::Vintage,
        FilterType::Fade,
        FilterType::Warm,
        FilterType::Cool,
        FilterType::Dramatic,
    ];

    /// Display name for the filter picker
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Standard => "Normal",
            FilterType::Mono => "B&W",
            FilterType::Sepia => "Sepia",
            FilterType::Vintage => "Vintage",
            FilterType::Fade => "Fade",
            FilterType::Warm => "Warm",
            FilterType::Cool => "Cool",
            FilterType::Dramatic => "Dramatic",
        }
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    /// Startup camera capability probe result
    pub capability: CapabilityState,
    /// Available camera devices
    pub cameras: Vec<CameraDevice>,
    /// Active facing mode
    pub facing: FacingMode,
    /// Whether the preview (and captures) are mirrored
    pub mirrored: bool,
    /// Currently selected capture filter
    pub selected_filter: FilterType,
    /// Countdown value while a timed capture is running (3-2-1, then 0
    /// during the settle delay)
    pub countdown: Option<u8>,
    /// True once the pipeline has delivered a frame
    pub camera_ready: bool,
    /// Human-readable camera failure, cleared by a successful frame
    pub camera_error: Option<String>,
    /// Latest raw camera frame
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Preview pixels with mirror and filter applied
    pub preview_handle: Option<cosmic::widget::image::Handle>,
    /// Flag to cancel the camera subscription (used when switching cameras)
    pub camera_cancel_flag: Arc<AtomicBool>,
    /// Bumped to force a camera subscription restart on manual retry
    pub camera_generation: u64,
    /// Whether a photo capture is in progress
    pub is_capturing: bool,

    /// The booth session state machine
    pub session: Session,
    /// Decoded previews of the captured photos, per slot
    pub slot_handles: [Option<cosmic::widget::image::Handle>; STRIP_PHOTO_COUNT],
    /// Rendered strip preview for the customize step
    pub strip_preview: Option<cosmic::widget::image::Handle>,
    /// Whether the final artifact is being composed
    pub composing: bool,
    /// Compose/export failure shown in the customize step
    pub compose_error: Option<String>,
    /// Where the last artifact was saved, if any
    pub saved_path: Option<String>,
    /// Save failure shown in the download step
    pub save_error: Option<String>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About)
    ToggleContextPage(ContextPage),

    // ===== Capability Gate =====
    /// Startup probe finished
    CapabilityChecked(Result<Vec<CameraDevice>, String>),

    // ===== Camera Control =====
    /// New camera frame received from the pipeline
    CameraFrame(Arc<CameraFrame>),
    /// The camera pipeline failed; holds a user-facing diagnostic
    CameraFailed(String),
    /// Re-acquire the camera after a failure (user-initiated retry)
    RetryCamera,
    /// Toggle front/back camera
    SwitchCamera,
    /// Toggle mirrored preview
    ToggleMirror,
    /// Select a capture filter
    SelectFilter(FilterType),

    // ===== Capture Operations =====
    /// Start the 3-2-1 countdown
    BeginCountdown,
    /// One-second countdown tick
    CountdownTick,
    /// Settle delay after zero elapsed; take the photo
    CaptureNow,
    /// Capture pipeline finished
    PhotoCaptured(Result<crate::session::Photo, String>),

    // ===== Session Workflow =====
    /// Mark a slot for re-capture
    Retake(usize),
    /// Abandon the pending retake
    CancelRetake,
    /// Discard the session and start over
    ResetSession,
    /// Select a strip template (customize step)
    SelectTemplate(&'static Template),
    /// Strip preview rendered (pixels, width, height)
    StripPreviewReady(Result<(Vec<u8>, u32, u32), String>),
    /// Compose the final artifact
    ComposeStrip,
    /// Final artifact composition finished
    StripComposed(Result<FinalArtifact, String>),
    /// Save the artifact to disk (the "download")
    SaveArtifact,
    /// Artifact save finished, with the file path on success
    ArtifactSaved(Result<String, String>),
    /// Reveal the save directory in the file manager
    OpenStripFolder,

    // ===== Settings =====
    /// Configuration updated
    UpdateConfig(Config),

    /// No-op message for async tasks that don't need a response
    Noop,
}
