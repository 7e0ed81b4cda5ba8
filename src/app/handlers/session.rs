// SPDX-License-Identifier: GPL-3.0-only

//! Session workflow handlers
//!
//! Handles retakes, session reset, template selection, strip composition and
//! the export/download step.

use crate::app::state::{AppModel, Message};
use crate::pipelines::strip;
use crate::session::FinalArtifact;
use crate::storage;
use crate::templates::Template;
use cosmic::Task;
use tracing::{error, info, warn};

impl AppModel {
    // =========================================================================
    // Session Workflow Handlers
    // =========================================================================

    pub(crate) fn handle_retake(&mut self, slot: usize) -> Task<cosmic::Action<Message>> {
        match self.session.request_retake(slot) {
            Ok(()) => info!(slot, "Retake requested"),
            Err(err) => warn!(error = %err, "Retake rejected"),
        }
        Task::none()
    }

    pub(crate) fn handle_cancel_retake(&mut self) -> Task<cosmic::Action<Message>> {
        self.session.cancel_retake();
        info!("Retake cancelled");
        Task::none()
    }

    pub(crate) fn handle_reset_session(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Session reset");
        self.session.reset();
        self.slot_handles = Default::default();
        self.strip_preview = None;
        self.composing = false;
        self.compose_error = None;
        self.saved_path = None;
        self.save_error = None;
        Task::none()
    }

    pub(crate) fn handle_select_template(
        &mut self,
        template: &'static Template,
    ) -> Task<cosmic::Action<Message>> {
        match self.session.select_template(template) {
            Ok(()) => {
                info!(template = template.id, "Template selected");
                self.config.last_template = template.id.to_string();
                self.persist_config();
                self.spawn_strip_preview()
            }
            Err(err) => {
                warn!(error = %err, "Template selection rejected");
                Task::none()
            }
        }
    }

    /// Render the on-screen strip preview for the current photos + template
    pub(crate) fn spawn_strip_preview(&mut self) -> Task<cosmic::Action<Message>> {
        let photos = self.session.photos().to_vec();
        let template = self.session.template();

        Task::perform(
            async move {
                strip::render_preview(photos, template)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::StripPreviewReady(result)),
        )
    }

    pub(crate) fn handle_strip_preview_ready(
        &mut self,
        result: Result<(Vec<u8>, u32, u32), String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok((pixels, width, height)) => {
                self.strip_preview = Some(cosmic::widget::image::Handle::from_rgba(
                    width, height, pixels,
                ));
            }
            Err(err) => {
                error!(error = %err, "Strip preview rendering failed");
                self.compose_error = Some(err);
            }
        }
        Task::none()
    }

    pub(crate) fn handle_compose_strip(&mut self) -> Task<cosmic::Action<Message>> {
        if self.composing {
            return Task::none();
        }
        if !self.session.is_complete() {
            warn!(
                photos = self.session.photo_count(),
                "Compose refused: incomplete photo set"
            );
            return Task::none();
        }

        info!(template = self.session.template().id, "Composing strip");
        self.composing = true;
        self.compose_error = None;

        let photos = self.session.photos().to_vec();
        let template = self.session.template();

        Task::perform(
            async move {
                strip::render_artifact(photos, template)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::StripComposed(result)),
        )
    }

    pub(crate) fn handle_strip_composed(
        &mut self,
        result: Result<FinalArtifact, String>,
    ) -> Task<cosmic::Action<Message>> {
        self.composing = false;

        match result {
            Ok(artifact) => {
                info!(
                    width = artifact.width,
                    height = artifact.height,
                    bytes = artifact.data.len(),
                    "Final artifact ready"
                );
                if let Err(err) = self.session.store_artifact(artifact) {
                    // Compose finished after a reset; nothing to store
                    warn!(error = %err, "Artifact discarded");
                }
            }
            Err(err) => {
                // Stay in Customizing; the user may retry
                error!(error = %err, "Strip composition failed");
                self.compose_error = Some(err);
            }
        }
        Task::none()
    }

    pub(crate) fn handle_save_artifact(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(artifact) = self.session.artifact() else {
            warn!("Save requested without an artifact");
            return Task::none();
        };

        self.save_error = None;
        let artifact = artifact.clone();

        Task::perform(
            async move {
                storage::save_artifact(artifact)
                    .await
                    .map(|path| path.display().to_string())
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::ArtifactSaved(result)),
        )
    }

    pub(crate) fn handle_artifact_saved(
        &mut self,
        result: Result<String, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(path) => {
                info!(path = %path, "Strip saved");
                self.saved_path = Some(path);
            }
            Err(err) => {
                error!(error = %err, "Strip save failed");
                self.save_error = Some(err);
            }
        }
        Task::none()
    }

    pub(crate) fn handle_open_strip_folder(&mut self) -> Task<cosmic::Action<Message>> {
        if let Err(err) = storage::open_strip_directory() {
            error!(error = %err, "Failed to open strip directory");
        }
        Task::none()
    }
}
