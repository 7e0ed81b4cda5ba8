// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all application messages by routing them to focused
//! handler methods. The main `update()` function acts as a dispatcher, while
//! specific handlers are implemented in the `handlers` submodules organized
//! by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::camera`: Capability gate, frames, facing mode, mirror, retry
//! - `handlers::capture`: Countdown, capture, filters
//! - `handlers::session`: Retake, reset, templates, compose, export

use crate::app::state::{AppModel, Message};
use cosmic::Task;
use tracing::error;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => {
                if let Err(e) = open::that_detached(&url) {
                    error!(url = %url, error = %e, "Failed to open URL");
                }
                Task::none()
            }
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Capability Gate =====
            Message::CapabilityChecked(result) => self.handle_capability_checked(result),

            // ===== Camera Control =====
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::CameraFailed(reason) => self.handle_camera_failed(reason),
            Message::RetryCamera => self.handle_retry_camera(),
            Message::SwitchCamera => self.handle_switch_camera(),
            Message::ToggleMirror => self.handle_toggle_mirror(),
            Message::SelectFilter(filter) => self.handle_select_filter(filter),

            // ===== Capture Operations =====
            Message::BeginCountdown => self.handle_begin_countdown(),
            Message::CountdownTick => self.handle_countdown_tick(),
            Message::CaptureNow => self.handle_capture_now(),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),

            // ===== Session Workflow =====
            Message::Retake(slot) => self.handle_retake(slot),
            Message::CancelRetake => self.handle_cancel_retake(),
            Message::ResetSession => self.handle_reset_session(),
            Message::SelectTemplate(template) => self.handle_select_template(template),
            Message::StripPreviewReady(result) => self.handle_strip_preview_ready(result),
            Message::ComposeStrip => self.handle_compose_strip(),
            Message::StripComposed(result) => self.handle_strip_composed(result),
            Message::SaveArtifact => self.handle_save_artifact(),
            Message::ArtifactSaved(result) => self.handle_artifact_saved(result),
            Message::OpenStripFolder => self.handle_open_strip_folder(),

            // ===== Settings =====
            Message::UpdateConfig(config) => {
                self.config = config;
                Task::none()
            }

            Message::Noop => Task::none(),
        }
    }
}
