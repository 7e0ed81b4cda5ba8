// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles the capability gate result, frame delivery, facing-mode switch,
//! mirror toggle and camera retry.

use crate::app::state::{AppModel, CapabilityState, FilterType, Message};
use crate::backends::camera::types::CameraFrame;
use crate::pipelines::photo::process_preview_rgba;
use cosmic::Task;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

impl AppModel {
    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    pub(crate) fn handle_capability_checked(
        &mut self,
        result: Result<Vec<crate::backends::camera::CameraDevice>, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(cameras) => {
                info!(count = cameras.len(), "Camera capability confirmed");
                self.cameras = cameras;
                self.facing = self.config.last_facing;
                self.mirrored = self.facing.default_mirror() && self.config.mirror_preview;
                self.capability = CapabilityState::Supported;
                // The camera subscription starts now that the gate is open
            }
            Err(reason) => {
                warn!(reason = %reason, "Camera capability missing");
                let error = crate::errors::AppError::CapabilityUnsupported(reason);
                self.capability = CapabilityState::Unsupported(error.to_string());
            }
        }
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        if !self.camera_ready {
            info!(
                width = frame.width,
                height = frame.height,
                "First frame received, camera ready"
            );
        }
        self.camera_ready = true;
        self.camera_error = None;
        self.current_frame = Some(Arc::clone(&frame));
        self.refresh_preview();
        Task::none()
    }

    pub(crate) fn handle_camera_failed(
        &mut self,
        reason: String,
    ) -> Task<cosmic::Action<Message>> {
        warn!(reason = %reason, "Camera pipeline failed");
        self.camera_ready = false;
        self.preview_handle = None;
        self.camera_error = Some(reason);
        Task::none()
    }

    /// User-initiated retry after an acquisition failure. Re-checks the
    /// device list and restarts the subscription with a fresh generation.
    pub(crate) fn handle_retry_camera(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Retrying camera acquisition");
        self.camera_error = None;
        self.camera_ready = false;
        self.camera_generation += 1;
        self.cancel_camera_subscription();

        // Devices may have appeared since the failure (hotplug, permission
        // change), so enumerate again before the pipeline restarts
        Task::perform(
            async {
                tokio::task::spawn_blocking(crate::backends::camera::enumerate_cameras)
                    .await
                    .unwrap_or_default()
            },
            |cameras| cosmic::Action::App(Message::CapabilityChecked(Ok(cameras))),
        )
    }

    pub(crate) fn handle_switch_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if self.countdown.is_some() || !self.capability.is_supported() {
            return Task::none();
        }

        self.facing = self.facing.toggled();
        info!(facing = %self.facing, "Switching camera");

        // Mirror default follows the new facing mode
        self.mirrored = self.facing.default_mirror();

        self.camera_ready = false;
        self.preview_handle = None;
        self.current_frame = None;
        self.cancel_camera_subscription();
        self.camera_generation += 1;

        self.config.last_facing = self.facing;
        self.persist_config();

        Task::none()
    }

    pub(crate) fn handle_toggle_mirror(&mut self) -> Task<cosmic::Action<Message>> {
        if self.countdown.is_some() {
            return Task::none();
        }
        self.mirrored = !self.mirrored;
        info!(mirrored = self.mirrored, "Mirror toggled");
        self.refresh_preview();

        self.config.mirror_preview = self.mirrored;
        self.persist_config();
        Task::none()
    }

    pub(crate) fn handle_select_filter(
        &mut self,
        filter: FilterType,
    ) -> Task<cosmic::Action<Message>> {
        self.selected_filter = filter;
        info!(filter = ?filter, "Filter selected");
        self.refresh_preview();
        Task::none()
    }

    /// Signal the running camera subscription to shut down its pipeline and
    /// install a fresh cancel flag for the successor. The flag handshake
    /// guarantees the old pipeline releases the hardware before a new one is
    /// created.
    pub(crate) fn cancel_camera_subscription(&mut self) {
        self.camera_cancel_flag
            .store(true, std::sync::atomic::Ordering::Release);
        self.camera_cancel_flag = Arc::new(AtomicBool::new(false));
    }

    /// Recompute the preview image from the latest frame, applying mirror
    /// and the selected filter
    pub(crate) fn refresh_preview(&mut self) {
        if let Some(frame) = &self.current_frame {
            let pixels = process_preview_rgba(frame, self.mirrored, self.selected_filter);
            self.preview_handle = Some(cosmic::widget::image::Handle::from_rgba(
                frame.width,
                frame.height,
                pixels,
            ));
        }
    }
}
