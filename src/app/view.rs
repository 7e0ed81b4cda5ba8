// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! The view routes on the capability gate first, then on the session phase:
//! capture (live preview, countdown, slot rail), customize (template picker
//! and strip preview) and download (final artifact and save actions).

use crate::app::state::{AppModel, CapabilityState, FilterType, Message};
use crate::constants::{STRIP_PHOTO_COUNT, strip, ui};
use crate::session::Phase;
use crate::templates;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.capability {
            CapabilityState::Checking => self.build_capability_checking(),
            CapabilityState::Unsupported(reason) => self.build_capability_unsupported(reason),
            CapabilityState::Supported => match self.session.phase() {
                Phase::Capturing => self.build_capture_view(),
                Phase::Customizing => self.build_customize_view(),
                Phase::Downloading => self.build_download_view(),
            },
        };

        let spacing = cosmic::theme::spacing();
        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing.space_s)
            .center_x(Length::Fill)
            .into()
    }

    // =========================================================================
    // Capability Gate
    // =========================================================================

    fn build_capability_checking(&self) -> Element<'_, Message> {
        widget::container(widget::text::body("Checking camera availability…"))
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    fn build_capability_unsupported(&self, reason: &str) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let content = widget::column()
            .push(widget::text::heading("Camera not available"))
            .push(widget::text::body(
                "This application needs a camera to capture your photo strip.",
            ))
            .push(widget::text::body(reason.to_string()))
            .push(widget::text::body(
                "Connect a camera and restart the application.",
            ))
            .spacing(spacing.space_xs)
            .align_x(Alignment::Center);

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    // =========================================================================
    // Capture Step
    // =========================================================================

    fn build_capture_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let status_text = if let Some(slot) = self.session.retake_slot() {
            format!("Retaking photo {}", slot + 1)
        } else {
            format!(
                "Photo {} of {}",
                self.session.photo_count() + 1,
                STRIP_PHOTO_COUNT
            )
        };

        let mut column = widget::column()
            .push(widget::text::heading(status_text))
            .push(self.build_preview_area())
            .push(self.build_filter_row())
            .push(self.build_capture_controls())
            .push(self.build_slot_rail())
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        if self.session.photo_count() > 0 && self.session.retake_slot().is_none() {
            column = column.push(
                widget::button::standard("Start Over").on_press(Message::ResetSession),
            );
        }

        column.into()
    }

    /// Live preview with countdown overlay, or the camera error panel
    fn build_preview_area(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        if let Some(error) = &self.camera_error {
            let content = widget::column()
                .push(widget::text::body(error.clone()))
                .push(widget::button::suggested("Try Again").on_press(Message::RetryCamera))
                .spacing(spacing.space_s)
                .align_x(Alignment::Center);

            return widget::container(content)
                .width(Length::Fill)
                .height(Length::Fixed(360.0))
                .center(Length::Fill)
                .into();
        }

        let preview: Element<'_, Message> = if let Some(handle) = &self.preview_handle {
            widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fixed(360.0))
                .into()
        } else {
            widget::container(widget::text::body("Starting camera…"))
                .width(Length::Fill)
                .height(Length::Fixed(360.0))
                .center(Length::Fill)
                .into()
        };

        let mut preview_stack = cosmic::iced::widget::stack![preview];

        if let Some(remaining) = self.countdown
            && remaining > 0
        {
            let overlay = widget::container(
                widget::text(remaining.to_string()).size(ui::COUNTDOWN_TEXT_SIZE),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(
                    0.0,
                    0.0,
                    0.0,
                    ui::OVERLAY_BACKGROUND_ALPHA,
                ))),
                text_color: Some(Color::WHITE),
                ..Default::default()
            });
            preview_stack = preview_stack.push(overlay);
        }

        widget::container(preview_stack)
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Horizontal list of capture filters
    fn build_filter_row(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let interactive = self.countdown.is_none();

        let mut row = widget::row().spacing(spacing.space_xxs);
        for filter in FilterType::ALL {
            let selected = self.selected_filter == filter;
            let mut button = widget::button::text(filter.display_name()).class(if selected {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            });
            if interactive {
                button = button.on_press(Message::SelectFilter(filter));
            }
            row = row.push(button);
        }

        row.into()
    }

    /// Camera switch, mirror toggle and the shutter button
    fn build_capture_controls(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let idle = self.countdown.is_none() && !self.is_capturing;
        let can_interact = self.camera_ready && idle;

        let mut switch_button = widget::button::standard("Switch Camera");
        if can_interact && crate::backends::camera::can_switch_facing(&self.cameras) {
            switch_button = switch_button.on_press(Message::SwitchCamera);
        }

        let mirror_label = if self.mirrored { "Unmirror" } else { "Mirror" };
        let mut mirror_button = widget::button::standard(mirror_label);
        if can_interact {
            mirror_button = mirror_button.on_press(Message::ToggleMirror);
        }

        let mut capture_button = widget::button::suggested("Take Photo");
        if can_interact {
            capture_button = capture_button.on_press(Message::BeginCountdown);
        }

        widget::row()
            .push(switch_button)
            .push(mirror_button)
            .push(capture_button)
            .spacing(spacing.space_xs)
            .align_y(Alignment::Center)
            .into()
    }

    /// Per-slot previews with retake controls
    fn build_slot_rail(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let retaking = self.session.retake_slot();

        let mut rail = widget::row().spacing(spacing.space_s);
        for slot in 0..STRIP_PHOTO_COUNT {
            let highlighted = retaking == Some(slot);

            let preview: Element<'_, Message> = if let Some(handle) = &self.slot_handles[slot] {
                widget::image::Image::new(handle.clone())
                    .content_fit(cosmic::iced::ContentFit::Cover)
                    .width(Length::Fixed(ui::SLOT_PREVIEW_SIZE))
                    .height(Length::Fixed(ui::SLOT_PREVIEW_SIZE))
                    .into()
            } else {
                let label = if self.session.next_capture_slot() == slot {
                    "Up next"
                } else {
                    "Empty"
                };
                widget::container(widget::text::body(label))
                    .width(Length::Fixed(ui::SLOT_PREVIEW_SIZE))
                    .height(Length::Fixed(ui::SLOT_PREVIEW_SIZE))
                    .center(ui::SLOT_PREVIEW_SIZE)
                    .into()
            };

            let framed = widget::container(preview).style(move |_theme| widget::container::Style {
                border: cosmic::iced::Border {
                    width: if highlighted { 2.0 } else { 1.0 },
                    color: if highlighted {
                        Color::from_rgb(0.3, 0.6, 1.0)
                    } else {
                        Color::from_rgba(1.0, 1.0, 1.0, 0.3)
                    },
                    radius: [4.0; 4].into(),
                },
                ..Default::default()
            });

            let mut cell = widget::column()
                .push(framed)
                .push(widget::text::body(format!("Photo {}", slot + 1)))
                .spacing(spacing.space_xxs)
                .align_x(Alignment::Center);

            if highlighted {
                cell = cell.push(
                    widget::button::text("Cancel Retake").on_press(Message::CancelRetake),
                );
            } else if retaking.is_none() && self.slot_handles[slot].is_some() {
                cell = cell.push(widget::button::text("Retake").on_press(Message::Retake(slot)));
            }

            rail = rail.push(cell);
        }

        rail.into()
    }

    // =========================================================================
    // Customize Step
    // =========================================================================

    fn build_customize_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview: Element<'_, Message> = if let Some(handle) = &self.strip_preview {
            widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fixed(strip::BASE_WIDTH as f32))
                .into()
        } else {
            widget::container(widget::text::body("Rendering preview…"))
                .width(Length::Fixed(strip::BASE_WIDTH as f32))
                .height(Length::Fixed(strip::BASE_HEIGHT as f32))
                .center(Length::Fill)
                .into()
        };

        let mut template_list = widget::column().spacing(spacing.space_xxs);
        for template in templates::all() {
            let selected = self.session.template().id == template.id;
            template_list = template_list.push(
                widget::button::text(template.name)
                    .class(if selected {
                        cosmic::theme::Button::Suggested
                    } else {
                        cosmic::theme::Button::Standard
                    })
                    .width(Length::Fixed(ui::TEMPLATE_SWATCH_WIDTH))
                    .on_press(Message::SelectTemplate(template)),
            );
        }

        let mut build_button = widget::button::suggested(if self.composing {
            "Building…"
        } else {
            "Build Strip"
        });
        if !self.composing {
            build_button = build_button.on_press(Message::ComposeStrip);
        }

        let mut actions = widget::column()
            .push(widget::text::heading("Choose a template"))
            .push(template_list)
            .push(
                widget::row()
                    .push(widget::button::standard("Start Over").on_press(Message::ResetSession))
                    .push(build_button)
                    .spacing(spacing.space_xs),
            )
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        if let Some(error) = &self.compose_error {
            actions = actions.push(widget::text::body(format!("Could not build strip: {}", error)));
        }

        widget::row()
            .push(widget::container(preview).padding(spacing.space_xs))
            .push(actions)
            .spacing(spacing.space_l)
            .align_y(Alignment::Center)
            .into()
    }

    // =========================================================================
    // Download Step
    // =========================================================================

    fn build_download_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview: Element<'_, Message> = if let Some(handle) = &self.strip_preview {
            widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fixed(strip::BASE_WIDTH as f32))
                .into()
        } else {
            widget::container(widget::text::body("Strip ready"))
                .width(Length::Fixed(strip::BASE_WIDTH as f32))
                .center(Length::Fill)
                .into()
        };

        let mut column = widget::column()
            .push(widget::text::heading("Your photo strip is ready!"))
            .push(widget::container(preview).padding(spacing.space_xs))
            .push(
                widget::row()
                    .push(widget::button::standard("New Strip").on_press(Message::ResetSession))
                    .push(widget::button::suggested("Download").on_press(Message::SaveArtifact))
                    .spacing(spacing.space_xs),
            )
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        if let Some(path) = &self.saved_path {
            column = column
                .push(widget::text::body(format!("Saved to {}", path)))
                .push(
                    widget::button::text("Show in Folder").on_press(Message::OpenStripFolder),
                );
        }
        if let Some(error) = &self.save_error {
            column = column.push(widget::text::body(format!("Could not save strip: {}", error)));
        }

        column.into()
    }
}
