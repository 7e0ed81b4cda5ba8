// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the 3-2-1 countdown, the settle delay and the capture pipeline.

use crate::app::state::{AppModel, Message};
use crate::constants::countdown;
use crate::pipelines::photo::{CaptureTransform, PhotoPipeline};
use crate::session::Phase;
use cosmic::Task;
use std::sync::Arc;
use tracing::{info, warn};

impl AppModel {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    pub(crate) fn handle_begin_countdown(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.camera_ready {
            info!("Countdown refused: camera not ready");
            return Task::none();
        }
        if self.countdown.is_some() || self.is_capturing {
            info!("Countdown refused: capture already in progress");
            return Task::none();
        }
        // Captures only happen in the capture step (including retakes)
        if self.session.phase() != Phase::Capturing && self.session.retake_slot().is_none() {
            return Task::none();
        }

        info!(start = countdown::START, "Starting countdown");
        self.countdown = Some(countdown::START);
        Self::delay_task(countdown::TICK_MS, Message::CountdownTick)
    }

    pub(crate) fn handle_countdown_tick(&mut self) -> Task<cosmic::Action<Message>> {
        match self.countdown {
            Some(remaining) if remaining > 1 => {
                self.countdown = Some(remaining - 1);
                info!(remaining = remaining - 1, "Countdown tick");
                Self::delay_task(countdown::TICK_MS, Message::CountdownTick)
            }
            Some(_) => {
                // Reached zero: give the preview a moment to settle, then
                // capture exactly once
                self.countdown = Some(0);
                Self::delay_task(countdown::SETTLE_MS, Message::CaptureNow)
            }
            None => Task::none(),
        }
    }

    pub(crate) fn handle_capture_now(&mut self) -> Task<cosmic::Action<Message>> {
        self.countdown = None;
        self.capture_photo()
    }

    /// Capture the current frame with the active mirror flag and filter.
    /// A capture without a ready camera is a no-op.
    pub(crate) fn capture_photo(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.camera_ready || self.is_capturing {
            info!("No capture: camera not ready or capture in progress");
            return Task::none();
        }
        let Some(frame) = &self.current_frame else {
            info!("No frame available to capture");
            return Task::none();
        };

        info!(slot = self.session.next_capture_slot(), "Capturing photo");
        self.is_capturing = true;

        let frame = Arc::clone(frame);
        let transform = CaptureTransform {
            mirror: self.mirrored,
            filter: self.selected_filter,
        };

        Task::perform(
            async move {
                let pipeline = PhotoPipeline::new(transform);
                pipeline.capture(frame).await.map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::PhotoCaptured(result)),
        )
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<crate::session::Photo, String>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;

        let photo = match result {
            Ok(photo) => photo,
            Err(err) => {
                warn!(error = %err, "Capture pipeline failed");
                let error = crate::errors::PhotoError::CaptureFailed(err);
                self.camera_error = Some(error.to_string());
                return Task::none();
            }
        };

        let handle = cosmic::widget::image::Handle::from_bytes(photo.data.to_vec());

        match self.session.complete_capture(photo) {
            Ok(outcome) => {
                info!(
                    slot = outcome.slot,
                    replaced = outcome.replaced,
                    completed = outcome.completed_set,
                    "Photo stored in session"
                );
                self.slot_handles[outcome.slot] = Some(handle);

                if outcome.completed_set {
                    // Entering the customize step: render the first strip preview
                    return self.spawn_strip_preview();
                }
            }
            Err(err) => {
                warn!(error = %err, "Session rejected the capture");
            }
        }

        Task::none()
    }
}
