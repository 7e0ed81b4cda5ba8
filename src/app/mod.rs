// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for the photo booth
//!
//! This module contains the application state, message handling, UI
//! rendering, and business logic.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, FilterType, etc.)
//! - `update`: Message dispatch
//! - `handlers`: Focused message handlers by domain
//! - `view`: Main view rendering
//!
//! # Main Types
//!
//! - `AppModel`: Main application state with camera and session management
//! - `Message`: All possible user interactions and system events

mod handlers;
mod state;
mod update;
mod view;

// Re-export public API
pub use state::{AppModel, CapabilityState, ContextPage, FilterType, Message};

use crate::backends::camera::{self, CameraFormat, CameraPipeline};
use crate::config::Config;
use crate::constants::capture;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/arcta-io/photobooth";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.arcta.photobooth";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name("Photo Booth")
            .version(crate::constants::app_info::version())
            .links([("Repository", REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Ensure the save directory exists
        if let Err(e) = crate::storage::ensure_strip_directory() {
            error!(error = %e, "Failed to create strip directory");
        }

        // Restore the last template pick; a stale id falls back to the default
        let session = crate::templates::find(&config.last_template)
            .map(crate::session::Session::with_template)
            .unwrap_or_default();

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            capability: CapabilityState::Checking,
            cameras: Vec::new(),
            facing: Default::default(),
            mirrored: true,
            selected_filter: FilterType::default(),
            countdown: None,
            camera_ready: false,
            camera_error: None,
            current_frame: None,
            preview_handle: None,
            camera_cancel_flag: Arc::new(AtomicBool::new(false)),
            camera_generation: 0,
            is_capturing: false,
            session,
            slot_handles: Default::default(),
            strip_preview: None,
            composing: false,
            compose_error: None,
            saved_path: None,
            save_error: None,
        };

        // Probe the camera capability asynchronously (GStreamer init and
        // device enumeration can be slow)
        let probe_task = Task::perform(
            async {
                tokio::task::spawn_blocking(camera::probe_cameras)
                    .await
                    .unwrap_or_else(|e| Err(format!("Capability probe failed: {}", e)))
            },
            |result| cosmic::Action::App(Message::CapabilityChecked(result)),
        );

        (app, probe_task)
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // The camera only runs behind an open capability gate
        if !self.capability.is_supported() {
            return config_sub;
        }

        let device = camera::pick_device(&self.cameras, self.facing);
        let facing = self.facing;
        let generation = self.camera_generation;
        let cancel_flag = Arc::clone(&self.camera_cancel_flag);

        // The subscription identity carries the facing mode and a retry
        // generation: changing either tears the old pipeline down (hardware
        // released on drop) before this stream starts a new one.
        let camera_sub = Subscription::run_with_id(
            ("camera", facing, generation),
            cosmic::iced::stream::channel(100, move |mut output| async move {
                info!(facing = %facing, generation, "Camera subscription started");

                let Some(device) = device else {
                    let error = crate::errors::CameraError::NoCameraFound;
                    let _ = output.send(Message::CameraFailed(error.to_string())).await;
                    return;
                };

                // Give the previous pipeline time to reach Null and release
                // the device
                tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
                if cancel_flag.load(std::sync::atomic::Ordering::Acquire) {
                    info!("Cancel flag set before pipeline creation - exiting");
                    return;
                }

                let (sender, mut receiver) = cosmic::iced::futures::channel::mpsc::channel(100);

                // Prefer the ideal resolution, fall back for constrained
                // devices, and finally let the camera pick
                let format_attempts = [
                    Some(CameraFormat {
                        width: capture::IDEAL_WIDTH,
                        height: capture::IDEAL_HEIGHT,
                    }),
                    Some(CameraFormat {
                        width: capture::FALLBACK_WIDTH,
                        height: capture::FALLBACK_HEIGHT,
                    }),
                    None,
                ];

                let mut pipeline = None;
                let mut last_error = None;
                for format in format_attempts {
                    match CameraPipeline::new(&device, format, sender.clone()) {
                        Ok(p) => {
                            pipeline = Some(p);
                            break;
                        }
                        Err(e) => {
                            warn!(?format, error = %e, "Pipeline creation failed");
                            last_error = Some(e);
                        }
                    }
                }

                let Some(pipeline) = pipeline else {
                    let reason = last_error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "Unknown pipeline failure".to_string());
                    let error = crate::errors::CameraError::AcquisitionFailed(format!(
                        "{}. Make sure no other application is using the camera.",
                        reason
                    ));
                    let _ = output.send(Message::CameraFailed(error.to_string())).await;
                    return;
                };

                info!("Waiting for frames from pipeline...");
                loop {
                    if cancel_flag.load(std::sync::atomic::Ordering::Acquire) {
                        info!("Cancel flag set - camera subscription exiting");
                        break;
                    }
                    if output.is_closed() {
                        info!("Output channel closed - camera subscription exiting");
                        break;
                    }

                    // Wait with a timeout so cancellation is checked even
                    // when no frames arrive
                    match tokio::time::timeout(
                        tokio::time::Duration::from_millis(16),
                        receiver.next(),
                    )
                    .await
                    {
                        Ok(Some(frame)) => {
                            // Dropping frames is fine for live preview
                            if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame)))
                                && e.is_disconnected()
                            {
                                info!("Output channel disconnected");
                                break;
                            }
                        }
                        Ok(None) => {
                            let error = crate::errors::CameraError::Disconnected;
                            let _ = output.send(Message::CameraFailed(error.to_string())).await;
                            break;
                        }
                        Err(_) => continue,
                    }
                }

                info!("Cleaning up camera pipeline");
                drop(pipeline);
            }),
        );

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
